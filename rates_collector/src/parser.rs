//! Разбор XML-публикации курсов ЦБ РФ.
//!
//! Ответ источника приходит не обязательно в UTF-8 (обычно `windows-1251`),
//! поэтому тело сначала декодируется по объявленной кодировке, а затем
//! десериализуется через `serde-xml-rs`.

use crate::config::{DEFAULT_CHARSET, SOURCE_DATE_FORMAT};
use chrono::NaiveDate;
use commons::errors::RatesError;
use commons::models::{DailyRate, Quote};
use commons::utils::parse_decimal;
use encoding_rs::Encoding;
use serde::Deserialize;

/// Сколько байт от начала документа просматривать в поисках XML-декларации.
const DECLARATION_SCAN_LIMIT: usize = 256;

/// Корневой элемент `<ValCurs Date="dd.mm.yyyy">`.
#[derive(Debug, Deserialize)]
struct RawValCurs {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Valute", default)]
    valutes: Vec<RawValute>,
}

/// Элемент `<Valute ID="...">`.
#[derive(Debug, Deserialize)]
struct RawValute {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "CharCode")]
    char_code: String,
    #[serde(rename = "Nominal")]
    nominal: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Value")]
    value: String,
    #[serde(rename = "VunitRate", default)]
    vunit_rate: Option<String>,
}

impl RawValute {
    /// Преобразовать сырые строки в [`Quote`].
    ///
    /// Старые публикации не содержат `VunitRate`: тогда курс за единицу
    /// считается как `Value / Nominal`.
    fn into_quote(self) -> Result<Quote, RatesError> {
        let nominal: u32 = self.nominal.trim().parse().map_err(|_| {
            RatesError::parse_err(format!("номинал '{}' для {}", self.nominal, self.id))
        })?;
        let value = parse_decimal(&self.value)?;

        let unit_rate = match self.vunit_rate.as_deref() {
            Some(raw) => parse_decimal(raw)?,
            None if nominal == 0 => {
                return Err(RatesError::parse_err(format!(
                    "нулевой номинал для {}",
                    self.id
                )));
            }
            None => value / f64::from(nominal),
        };

        Ok(Quote {
            id: self.id,
            char_code: self.char_code,
            name: self.name,
            nominal,
            value,
            unit_rate,
        })
    }
}

/// Разобрать тело ответа источника в [`DailyRate`].
///
/// ## Args
///
/// - `body` — тело ответа как есть
/// - `content_type` — значение заголовка `Content-Type`, если он был
///
/// ## Ошибки
///
/// [`RatesError::ParseError`] при неизвестной кодировке, некорректном XML,
/// дате или числе, а также при пустом списке валют.
pub fn parse_daily_rate(body: &[u8], content_type: Option<&str>) -> Result<DailyRate, RatesError> {
    let text = decode_body(body, content_type)?;

    let raw: RawValCurs = serde_xml_rs::from_str(strip_declaration(&text))
        .map_err(|err| RatesError::parse_err(format!("XML: {err}")))?;

    let date = NaiveDate::parse_from_str(raw.date.trim(), SOURCE_DATE_FORMAT)
        .map_err(|err| RatesError::parse_err(format!("дата '{}': {err}", raw.date)))?;

    if raw.valutes.is_empty() {
        return Err(RatesError::parse_err(format!(
            "публикация {} без курсов валют",
            raw.date
        )));
    }

    let quotes = raw
        .valutes
        .into_iter()
        .map(RawValute::into_quote)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DailyRate { date, quotes })
}

/// Декодировать тело в строку.
///
/// Кодировка берётся из `Content-Type`, затем из XML-декларации, иначе
/// [`DEFAULT_CHARSET`]. BOM в начале тела имеет приоритет.
fn decode_body(body: &[u8], content_type: Option<&str>) -> Result<String, RatesError> {
    let label = content_type
        .and_then(charset_from_content_type)
        .or_else(|| charset_from_declaration(body))
        .unwrap_or_else(|| DEFAULT_CHARSET.to_string());

    let encoding = Encoding::for_label(label.as_bytes())
        .ok_or_else(|| RatesError::parse_err(format!("неизвестная кодировка '{label}'")))?;

    let (text, used, had_errors) = encoding.decode(body);
    if had_errors {
        return Err(RatesError::parse_err(format!(
            "тело ответа не соответствует кодировке {}",
            used.name()
        )));
    }

    Ok(text.into_owned())
}

/// Параметр `charset` из заголовка `Content-Type`.
fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"').to_string())
            .filter(|v| !v.is_empty())
    })
}

/// Атрибут `encoding` из XML-декларации `<?xml ... ?>`.
fn charset_from_declaration(body: &[u8]) -> Option<String> {
    let head = &body[..body.len().min(DECLARATION_SCAN_LIMIT)];
    let head = String::from_utf8_lossy(head);
    let declaration = &head[head.find("<?xml")?..];
    let declaration = &declaration[..declaration.find("?>")?];

    let rest = &declaration[declaration.find("encoding")? + "encoding".len()..];
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let rest = &rest[1..];

    rest.find(quote).map(|end| rest[..end].to_string())
}

/// Отбросить BOM и XML-декларацию: текст уже декодирован, а парсер не
/// должен повторно интерпретировать объявленную кодировку.
fn strip_declaration(text: &str) -> &str {
    let text = text.trim_start_matches('\u{feff}').trim_start();
    text.strip_prefix("<?xml")
        .and_then(|rest| rest.find("?>").map(|end| &rest[end + 2..]))
        .unwrap_or(text)
}
