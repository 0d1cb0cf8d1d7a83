//! Модели данных для приложений.

use chrono::NaiveDate;

/// Курс одной валюты в составе ежедневной публикации.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// Стабильный идентификатор валюты у источника (например, `R01235`).
    pub id: String,
    /// Буквенный код валюты (`USD`).
    pub char_code: String,
    /// Отображаемое название.
    pub name: String,
    /// Количество единиц валюты, к которому относится `value`.
    pub nominal: u32,
    /// Курс за `nominal` единиц в базовой валюте.
    pub value: f64,
    /// Курс за одну единицу в базовой валюте.
    pub unit_rate: f64,
}

/// Одна публикация курсов.
///
/// `date` — дата, указанная источником. Она может не совпадать с датой
/// запроса: в выходные и праздники источник отдаёт последнюю публикацию.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRate {
    /// Дата публикации.
    pub date: NaiveDate,
    /// Курсы валют в порядке источника.
    pub quotes: Vec<Quote>,
}
