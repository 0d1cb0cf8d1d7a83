//! Формирование текстового отчёта по накопленной статистике.

use crate::config::REPORT_DATE_FORMAT;
use crate::stats::AggregateState;
use chrono::NaiveDate;
use commons::models::Quote;
use std::fmt::Write;

/// Ширина колонки в блоке минимума и максимума.
const COLUMN_WIDTH: usize = 40;

/// Сформировать отчёт.
///
/// Строка «средний курс» выводит накопленную сумму курсов за единицу по
/// каждой валюте, без деления на количество публикаций.
pub fn render_report(state: &AggregateState) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Средний курс за период:");
    for quote in state.currencies() {
        let sum = state.running_sum(&quote.id).unwrap_or_default();
        let _ = writeln!(
            out,
            "{:<20} {:<5}: {:.6} RUB",
            quote.name, quote.char_code, sum
        );
    }
    out.push('\n');

    let (Some(max), Some(min)) = (state.max_quote(), state.min_quote()) else {
        let _ = writeln!(out, "Нет данных о курсах за период.");
        return out;
    };

    push_row(&mut out, "Максимальный курс:", "Минимальный курс:");
    for (left, right) in extreme_lines(max).into_iter().zip(extreme_lines(min)) {
        push_row(&mut out, &left, &right);
    }
    out.push('\n');

    out
}

/// Строки описания экстремума: дата, валюта, курс за единицу.
fn extreme_lines((quote, date): (&Quote, NaiveDate)) -> [String; 3] {
    [
        format!("Дата: {}", date.format(REPORT_DATE_FORMAT)),
        format!("Валюта: {} ({})", quote.name, quote.char_code),
        format!("Курс за 1 {}: {:.6} RUB", quote.char_code, quote.unit_rate),
    ]
}

fn push_row(out: &mut String, left: &str, right: &str) {
    let _ = writeln!(
        out,
        "{:<width$}{:>width$}",
        left,
        right,
        width = COLUMN_WIDTH
    );
}
