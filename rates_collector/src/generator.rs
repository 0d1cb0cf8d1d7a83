//! Генерация дат для запросов и отсев повторных публикаций.

use chrono::{Days, NaiveDate};
use std::collections::HashSet;

/// Окно дат для запросов курсов.
///
/// Ленивая конечная последовательность: от `today` назад по одному дню,
/// включая `today - period`. При `period = 0` выдаёт только `today`.
/// Повторно не запускается: исчерпанный итератор всегда возвращает `None`.
///
/// ## Пример
///
/// ```ignore
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
/// let dates: Vec<_> = DateWindow::new(today, 2).collect();
///
/// assert_eq!(dates.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DateWindow {
    /// Следующая дата для выдачи.
    cursor: Option<NaiveDate>,
    /// Самая ранняя дата окна (включительно).
    end: NaiveDate,
}

impl DateWindow {
    /// Создать окно на `period` дней назад от `today`.
    ///
    /// Для периодов, выходящих за пределы календаря `chrono`, нижняя граница
    /// прижимается к [`NaiveDate::MIN`].
    pub fn new(today: NaiveDate, period: u32) -> Self {
        let end = today
            .checked_sub_days(Days::new(u64::from(period)))
            .unwrap_or(NaiveDate::MIN);

        Self {
            cursor: Some(today),
            end,
        }
    }
}

impl Iterator for DateWindow {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor.filter(|date| *date >= self.end)?;
        self.cursor = current.pred_opt();
        Some(current)
    }
}

/// Набор уже обработанных дат публикации.
///
/// Принадлежит только потоку сборщика.
#[derive(Debug, Default)]
pub struct SeenDates {
    seen: HashSet<NaiveDate>,
}

impl SeenDates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Отметить дату публикации.
    ///
    /// Возвращает `true`, если дата встретилась впервые.
    pub fn first_seen(&mut self, published: NaiveDate) -> bool {
        self.seen.insert(published)
    }
}
