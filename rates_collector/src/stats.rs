//! Накопление статистики по курсам: суммы, минимум и максимум.

use chrono::NaiveDate;
use commons::models::{DailyRate, Quote};
use std::collections::{HashMap, HashSet};

/// Ссылка на курс внутри истории публикаций.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Extreme {
    /// Индекс публикации в `history`.
    record: usize,
    /// Индекс курса в публикации.
    position: usize,
    unit_rate: f64,
}

/// Состояние обработчика.
///
/// Изменяется только потоком-обработчиком. Минимум и максимум не владеют
/// курсами, а указывают на них внутри `history`.
///
/// Инвариант: `running_sum[id]` равна сумме `unit_rate` всех курсов с этим
/// `id` во всех публикациях `history`, в порядке обработки.
#[derive(Debug, Default)]
pub struct AggregateState {
    history: Vec<DailyRate>,
    running_sum: HashMap<String, f64>,
    min: Option<Extreme>,
    max: Option<Extreme>,
}

impl AggregateState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Учесть очередную уникальную публикацию.
    ///
    /// Минимум обновляется при строго меньшем курсе, поэтому при равенстве
    /// остаётся курс, обработанный раньше (более поздняя дата). Максимум
    /// обновляется при курсе не меньше текущего: при равенстве побеждает
    /// обработанный позже (более ранняя дата).
    pub fn absorb(&mut self, rate: DailyRate) {
        let record = self.history.len();
        self.history.push(rate);
        let rate = &self.history[record];

        for (position, quote) in rate.quotes.iter().enumerate() {
            *self.running_sum.entry(quote.id.clone()).or_insert(0.0) += quote.unit_rate;

            let candidate = Extreme {
                record,
                position,
                unit_rate: quote.unit_rate,
            };

            if self.min.is_none_or(|min| quote.unit_rate < min.unit_rate) {
                self.min = Some(candidate);
            }
            if self.max.is_none_or(|max| quote.unit_rate >= max.unit_rate) {
                self.max = Some(candidate);
            }
        }
    }

    /// Все обработанные публикации в порядке обработки.
    pub fn history(&self) -> &[DailyRate] {
        &self.history
    }

    /// Накопленная сумма курсов за единицу для валюты `id`.
    pub fn running_sum(&self, id: &str) -> Option<f64> {
        self.running_sum.get(id).copied()
    }

    /// Минимальный курс и дата его публикации.
    pub fn min_quote(&self) -> Option<(&Quote, NaiveDate)> {
        self.min.map(|min| self.resolve(min))
    }

    /// Максимальный курс и дата его публикации.
    pub fn max_quote(&self) -> Option<(&Quote, NaiveDate)> {
        self.max.map(|max| self.resolve(max))
    }

    /// Валюты, встречавшиеся в истории, без повторов по `id`, в порядке
    /// первого появления.
    pub fn currencies(&self) -> Vec<&Quote> {
        let mut seen = HashSet::new();
        let mut currencies = Vec::new();
        for quote in self.history.iter().flat_map(|rate| rate.quotes.iter()) {
            if seen.insert(quote.id.as_str()) {
                currencies.push(quote);
            }
        }
        currencies
    }

    fn resolve(&self, at: Extreme) -> (&Quote, NaiveDate) {
        let rate = &self.history[at.record];
        (&rate.quotes[at.position], rate.date)
    }
}
