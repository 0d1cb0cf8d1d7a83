//! HTTP-клиент источника курсов ЦБ РФ.

use crate::config::{CBR_DAILY_URL, DATE_QUERY_PARAM, QUERY_DATE_FORMAT, USER_AGENT};
use crate::parser::parse_daily_rate;
use chrono::NaiveDate;
use commons::errors::RatesError;
use commons::models::DailyRate;
use commons::traits::RateSource;
use log::info;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use url::Url;

/// Клиент ежедневных курсов ЦБ РФ.
///
/// Клиент создаётся один раз и переиспользуется для всех дат. Таймаут
/// запросов не задан: зависший запрос останавливает весь конвейер.
#[derive(Debug, Clone)]
pub struct CbrClient {
    client: Client,
    base_url: Url,
}

impl CbrClient {
    /// Клиент с адресом источника из конфигурации ([`CBR_DAILY_URL`]).
    pub fn new() -> Result<Self, RatesError> {
        Self::with_base_url(CBR_DAILY_URL)
    }

    /// Клиент с произвольным адресом источника.
    pub fn with_base_url(base_url: &str) -> Result<Self, RatesError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| RatesError::value_err(format!("адрес '{base_url}': {err}")))?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Option::<Duration>::None)
            .build()
            .map_err(|err| RatesError::fetch_err(format!("HTTP-клиент: {err}")))?;

        Ok(Self { client, base_url })
    }

    /// Адрес запроса курсов на дату: `...?date_req=dd/mm/yyyy`.
    pub fn request_url(&self, date: NaiveDate) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(Some(&format!(
            "{}={}",
            DATE_QUERY_PARAM,
            date.format(QUERY_DATE_FORMAT)
        )));
        url
    }
}

impl RateSource for CbrClient {
    fn fetch(&self, date: NaiveDate) -> Result<DailyRate, RatesError> {
        let url = self.request_url(date);
        info!("Запрос курсов: {}", url);

        let response = self
            .client
            .get(url.as_str())
            .send()
            .and_then(|resp| resp.error_for_status())
            .map_err(|err| RatesError::fetch_err(format!("{url}: {err}")))?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let body = response
            .bytes()
            .map_err(|err| RatesError::fetch_err(format!("тело ответа {url}: {err}")))?;

        parse_daily_rate(&body, content_type.as_deref())
    }
}
