//! Rates Collector. Консольное приложение сбора ежедневных курсов валют
//! ЦБ РФ за заданное количество дней. Считает по каждой валюте накопленный
//! курс, а также минимальный и максимальный курс с датами публикации.

#![warn(missing_docs)]

use commons::errors::RatesError;
use commons::init_simple_logger;
use commons::utils::{get_workspace_root, today};
use log::info;
use std::sync::Arc;
use std::time::Instant;

mod channels;
mod cli;
mod config;
mod fetcher;
mod generator;
mod parser;
mod report;
mod stats;

use channels::RatesPipeline;
use cli::{CollectorSet, exit_err, parse_cli_args};
use config::{LOG_FOLDER, LOG_LEVEL};
use fetcher::CbrClient;
use report::render_report;

fn main() {
    let timer = Instant::now();
    let settings = parse_cli_args();

    // Инициализация логгера.
    if let Err(err) = init_logger() {
        eprintln!("Логирование отключено: {}", err);
    }

    info!("Rates Collector запущен, период {} дн.", settings.period);

    if let Err(err) = run(&settings) {
        exit_err(&err);
    }

    info!("Rates Collector завершён");
    println!("время работы {:?}", timer.elapsed());
}

/// Собрать курсы за период и вывести отчёт.
fn run(settings: &CollectorSet) -> Result<(), RatesError> {
    let today = today()?;
    let source = Arc::new(CbrClient::new()?);

    let mut pipeline = RatesPipeline::new(source, today, settings.period);
    let state = pipeline.run()?;
    info!("Конвейер завершён в состоянии {}", pipeline.state());

    print!("{}", render_report(&state));
    Ok(())
}

/// Инициализировать логгер приложения.
///
/// Используется метод [`init_simple_logger`] из крейта [`commons`].
fn init_logger() -> Result<(), RatesError> {
    let log_folder = get_workspace_root().join(LOG_FOLDER);
    let app_name = env!("CARGO_PKG_NAME");
    init_simple_logger(app_name, &log_folder, LOG_LEVEL)
}
