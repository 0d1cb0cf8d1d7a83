//! Обработка аргументов командной строки при запуске приложения.
//! ## Пример
//!
//! ```text
//! $ rcollector --period 7
//! ```

use crate::config::DEFAULT_PERIOD_DAYS;
use clap::Parser;
use commons::errors::RatesError;
use log::error;
use std::process::exit;

/// Перечисление кодов завершения приложения с ошибкой.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Источник недоступен или вернул ошибку.
    Fetch = 1,
    /// Ответ источника не удалось разобрать.
    Parse,
    /// Системное время недоступно.
    Clock,
    /// Прочие ошибки.
    Other,
}

impl ExitCode {
    /// Предоставить цифровое значение выбранного перечисления (`u8`).
    pub fn value(&self) -> u8 {
        *self as u8
    }
}

impl From<&RatesError> for ExitCode {
    fn from(err: &RatesError) -> Self {
        match err {
            RatesError::FetchError(_) => ExitCode::Fetch,
            RatesError::ParseError(_) => ExitCode::Parse,
            RatesError::ClockError(_) => ExitCode::Clock,
            _ => ExitCode::Other,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Rates Collector. Daily CBR exchange rates statistics for a trailing period.")]
#[command(author, version, long_about = None)]
struct CliArgs {
    /// Trailing period in days (0 queries today only).
    #[arg(short, long, required = false, default_value_t = DEFAULT_PERIOD_DAYS, value_parser = validate_period)]
    period: u32,
}

/// Валидатор для поля `period`.
fn validate_period(s: &str) -> Result<u32, String> {
    s.trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid period (expected non-negative number of days): {s}"))
}

/// Параметры, полученные из командной строки при запуске приложения.
#[derive(Debug)]
pub struct CollectorSet {
    /// Количество дней, на которое просматривается история от текущей даты.
    pub period: u32,
}

impl CollectorSet {
    fn new(args: &CliArgs) -> Self {
        Self {
            period: args.period,
        }
    }
}

/// Получить от пользователя первичные настройки приложения.
pub fn parse_cli_args() -> CollectorSet {
    let args = CliArgs::parse();

    CollectorSet::new(&args)
}

/// Опубликовать сообщение об ошибке и завершить работу приложения.
pub fn exit_err(err: &RatesError) -> ! {
    let code = ExitCode::from(err);
    error!("Ошибка: {} (код {})", err, code.value());
    eprintln!("Ошибка: {}", err);
    exit(code.value() as i32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_validator_accepts_zero() {
        assert_eq!(validate_period("0"), Ok(0));
    }

    #[test]
    fn period_validator_rejects_negative() {
        assert!(validate_period("-3").is_err());
    }

    #[test]
    fn period_validator_rejects_text() {
        assert!(validate_period("week").is_err());
    }

    #[test]
    fn default_period_is_used() {
        let args = CliArgs::parse_from(["rcollector"]);
        let set = CollectorSet::new(&args);
        assert_eq!(set.period, DEFAULT_PERIOD_DAYS);
    }

    #[test]
    fn explicit_period_is_parsed() {
        let args = CliArgs::parse_from(["rcollector", "--period", "14"]);
        assert_eq!(CollectorSet::new(&args).period, 14);

        let args = CliArgs::parse_from(["rcollector", "-p", "3"]);
        assert_eq!(CollectorSet::new(&args).period, 3);
    }

    #[test]
    fn exit_code_follows_error_kind() {
        assert_eq!(ExitCode::from(&RatesError::fetch_err("x")), ExitCode::Fetch);
        assert_eq!(ExitCode::from(&RatesError::parse_err("x")).value(), 2);
        assert_eq!(ExitCode::from(&RatesError::clock_err("x")).value(), 3);
        assert_eq!(ExitCode::from(&RatesError::channel_err("x")), ExitCode::Other);
    }
}
