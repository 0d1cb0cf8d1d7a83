//! Конфигурация приложения.

use log::LevelFilter;

/// Название директории для log-файлов.
pub const LOG_FOLDER: &str = "log";

/// Уровень событий, записываемых в log-файл.
pub const LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Период по умолчанию, в днях.
pub const DEFAULT_PERIOD_DAYS: u32 = 1;

/// Адрес ежедневных курсов ЦБ РФ (английская версия).
pub const CBR_DAILY_URL: &str = "http://www.cbr.ru/scripts/XML_daily_eng.asp";

/// Параметр запроса с датой.
pub const DATE_QUERY_PARAM: &str = "date_req";

/// Формат даты в запросе к источнику: `dd/mm/yyyy`.
pub const QUERY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Формат даты публикации в ответе источника: `dd.mm.yyyy`.
pub const SOURCE_DATE_FORMAT: &str = "%d.%m.%Y";

/// Формат дат в отчёте.
pub const REPORT_DATE_FORMAT: &str = "%d/%m/%Y";

/// User-Agent браузера: источник отклоняет запросы с агентом по умолчанию.
pub const USER_AGENT: &str = "Mozilla/5.0";

/// Ёмкость канала между сборщиком и обработчиком.
///
/// `0` — канал-рандеву: сборщик ждёт, пока обработчик не заберёт запись.
pub const HANDOFF_CAPACITY: usize = 0;

/// Кодировка ответа, если ни транспорт, ни документ её не объявили.
pub const DEFAULT_CHARSET: &str = "utf-8";
