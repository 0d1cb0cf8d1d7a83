//! Собственные типы ошибок приложения.
//!
//! Для поддержки функциональности применяется крейт `thiserror`.

use thiserror::Error;

/// Дерево ошибок сборщика курсов.
#[derive(Error, Debug)]
pub enum RatesError {
    /// Сбой сети или транспорта при запросе курсов.
    #[error("ошибка получения курсов: {0}")]
    FetchError(String),

    /// Некорректный XML, дата или число в ответе источника.
    #[error("ошибка разбора данных: {0}")]
    ParseError(String),

    /// Системное время недоступно.
    #[error("системное время недоступно: {0}")]
    ClockError(String),

    /// Некорректное значение.
    ///
    /// Например, отрицательный период в аргументах командной строки.
    #[error("неверное значение: {0}")]
    ValueError(String),

    /// Канал передачи курсов закрыт или поток сборщика аварийно завершился.
    #[error("ошибка канала: {0}")]
    ChannelError(String),

    /// Не удалось подготовить log-файл.
    #[error("ошибка логгера: {0}")]
    LoggerError(String),
}

impl RatesError {
    /// Конструктор для ошибки [`RatesError::FetchError`].
    pub fn fetch_err(message: impl Into<String>) -> RatesError {
        Self::FetchError(message.into())
    }

    /// Конструктор для ошибки [`RatesError::ParseError`].
    pub fn parse_err(message: impl Into<String>) -> RatesError {
        Self::ParseError(message.into())
    }

    /// Конструктор для ошибки [`RatesError::ClockError`].
    pub fn clock_err(message: impl Into<String>) -> RatesError {
        Self::ClockError(message.into())
    }

    /// Конструктор для ошибки [`RatesError::ValueError`].
    pub fn value_err(message: impl Into<String>) -> RatesError {
        Self::ValueError(message.into())
    }

    /// Конструктор для ошибки [`RatesError::ChannelError`].
    pub fn channel_err(message: impl Into<String>) -> RatesError {
        Self::ChannelError(message.into())
    }

    /// Конструктор для ошибки [`RatesError::LoggerError`].
    pub fn logger_err(message: impl Into<String>) -> RatesError {
        Self::LoggerError(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_keep_message() {
        let err = RatesError::fetch_err("нет соединения");
        assert!(matches!(&err, RatesError::FetchError(msg) if msg == "нет соединения"));
        assert_eq!(err.to_string(), "ошибка получения курсов: нет соединения");
    }

    #[test]
    fn parse_error_display() {
        let err = RatesError::parse_err("дата 32.13.2026");
        assert_eq!(err.to_string(), "ошибка разбора данных: дата 32.13.2026");
    }
}
