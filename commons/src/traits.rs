//! Универсальные трейты для приложений сбора курсов.

use crate::errors::RatesError;
use crate::models::DailyRate;
use chrono::NaiveDate;

/// Источник ежедневных курсов валют.
///
/// Реализация обязана вернуть публикацию с непустым списком валют и
/// полностью разобранными числами. Любая ошибка считается фатальной для
/// всего прогона.
pub trait RateSource {
    /// Получить публикацию курсов на дату `date`.
    fn fetch(&self, date: NaiveDate) -> Result<DailyRate, RatesError>;
}
