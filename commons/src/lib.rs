use log::LevelFilter;
use simplelog::{CombinedLogger, Config, WriteLogger};
use std::fs;
use std::fs::File;
use std::path::Path;

pub mod errors;
pub mod models;
pub mod traits;
pub mod utils;

use errors::RatesError;

/// Фабрика по созданию индивидуальных логгеров для приложений.
///
/// Инициализация требуется один раз при запуске приложения. Далее используются
/// стандартные макросы [`log::info`], [`log::warn`], [`log::error`] для
/// логирования событий.
///
/// ## Args
///
/// - `app_name` — название приложения (будет использовано для создания файла)
/// - `log_dir` — путь к директории расположения log-файлов (при отсутствии
///   пытается создать)
/// - `level` — минимальный уровень записываемых событий
///
/// ## Пример
///
/// ```no_run
/// use log::*;
/// use commons::init_simple_logger;
/// use commons::utils::get_workspace_root;
///
/// let log_dir = get_workspace_root().join("log");
/// init_simple_logger("app_name", &log_dir, LevelFilter::Info).unwrap();
///
/// info!("Всё в порядке");
/// ```
///
/// ## Ошибки
///
/// [`RatesError::LoggerError`] при ошибке создания директории или log-файла,
/// а также при повторной инициализации логгера.
pub fn init_simple_logger(
    app_name: &str,
    log_dir: &Path,
    level: LevelFilter,
) -> Result<(), RatesError> {
    let log_file = open_log_file(app_name, log_dir)?;
    let logger = WriteLogger::new(level, Config::default(), log_file);

    CombinedLogger::init(vec![logger])
        .map_err(|e| RatesError::logger_err(format!("инициализация логгера: {e}")))
}

/// Создать (перезаписать) log-файл `<log_dir>/<app_name>.log`.
fn open_log_file(app_name: &str, log_dir: &Path) -> Result<File, RatesError> {
    if !log_dir.exists() {
        fs::create_dir_all(log_dir).map_err(|e| {
            RatesError::logger_err(format!("не удалось создать {}: {e}", log_dir.display()))
        })?;
    }

    let log_file_path = log_dir.join(format!("{}.log", app_name));
    File::create(&log_file_path).map_err(|e| {
        RatesError::logger_err(format!("log-файл {}: {e}", log_file_path.display()))
    })
}
