//! Универсальные утилиты.

use crate::errors::RatesError;
use chrono::{DateTime, Local, NaiveDate};
use std::path::PathBuf;
use std::time::SystemTime;

/// Текущая календарная дата в локальном часовом поясе.
///
/// ## Ошибки
///
/// [`RatesError::ClockError`], если системные часы выставлены ранее
/// 1 января 1970 года или вне диапазона, представимого `chrono`.
pub fn today() -> Result<NaiveDate, RatesError> {
    let since_epoch = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|err| RatesError::clock_err(err.to_string()))?;

    let secs = i64::try_from(since_epoch.as_secs())
        .map_err(|_| RatesError::clock_err("время вне допустимого диапазона"))?;

    DateTime::from_timestamp(secs, since_epoch.subsec_nanos())
        .map(|utc| utc.with_timezone(&Local).date_naive())
        .ok_or_else(|| RatesError::clock_err("время вне допустимого диапазона"))
}

/// Разобрать десятичное число с учётом локали источника.
///
/// Источник использует `,` как десятичный разделитель. Первая запятая
/// заменяется точкой, окружающие пробелы отбрасываются.
///
/// ## Пример
///
/// ```
/// use commons::utils::parse_decimal;
///
/// assert_eq!(parse_decimal("34,5678").unwrap(), 34.5678);
/// ```
pub fn parse_decimal(raw: &str) -> Result<f64, RatesError> {
    raw.trim()
        .replacen(',', ".", 1)
        .parse::<f64>()
        .map_err(|err| RatesError::parse_err(format!("число '{}': {}", raw, err)))
}

/// Предоставить родительский каталог проекта.
///
/// Для `debug` это будет директория расположения `cargo.toml`, а для `release`
/// расположение скомпилированного файла.
#[cfg(debug_assertions)]
pub fn get_project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

#[cfg(not(debug_assertions))]
pub fn get_project_root() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Предоставить корневую директорию всего проекта.
///
/// В `debug` это каталог `workspace`, в `release` — каталог исполняемого
/// файла.
pub fn get_workspace_root() -> PathBuf {
    let project_root = get_project_root();
    if cfg!(debug_assertions) {
        project_root
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or(project_root)
    } else {
        project_root
    }
}
