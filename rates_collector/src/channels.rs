//! Конвейер сбора курсов: поток-сборщик и обработчик, связанные каналом.

use crate::config::HANDOFF_CAPACITY;
use crate::generator::{DateWindow, SeenDates};
use crate::stats::AggregateState;
use chrono::NaiveDate;
use commons::errors::RatesError;
use commons::models::DailyRate;
use commons::traits::RateSource;
use crossbeam_channel::{Receiver, Sender, bounded};
use log::{error, info};
use macros::EnumDisplay;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Состояние конвейера.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumDisplay)]
pub enum PipelineState {
    /// Сборщик и обработчик работают.
    #[str("running")]
    Running,
    /// Канал закрыт, обработчик получил все записи.
    #[str("producer_done")]
    ProducerDone,
    /// Сборщик завершился без ошибок, статистика готова.
    #[str("complete")]
    Complete,
    /// Сборщик вернул ошибку, статистика отброшена.
    #[str("aborted")]
    Aborted,
}

/// Итоги работы сборщика.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProducerSummary {
    /// Сколько дат запрошено у источника.
    pub queried: usize,
    /// Сколько уникальных публикаций передано обработчику.
    pub emitted: usize,
    /// Сколько публикаций отброшено как повторные.
    pub skipped: usize,
}

/// Запустить поток-сборщик.
///
/// Обходит окно дат, запрашивает курсы, отбрасывает повторные публикации
/// и передаёт уникальные в канал. Первая же ошибка источника завершает
/// поток; канал закрывается при выходе из потока в любом случае.
pub fn start_producer<S>(
    source: Arc<S>,
    window: DateWindow,
    tx: Sender<DailyRate>,
) -> JoinHandle<Result<ProducerSummary, RatesError>>
where
    S: RateSource + Send + Sync + 'static,
{
    thread::spawn(move || {
        info!("Сборщик курсов запущен");

        let mut seen = SeenDates::new();
        let mut summary = ProducerSummary::default();

        for date in window {
            summary.queried += 1;
            let rate = source.fetch(date)?;

            if !seen.first_seen(rate.date) {
                info!("Дата {}: повтор публикации от {}, пропуск", date, rate.date);
                summary.skipped += 1;
                continue;
            }

            tx.send(rate)
                .map_err(|_| RatesError::channel_err("канал курсов закрыт обработчиком"))?;
            summary.emitted += 1;
        }

        info!("Сборщик курсов остановлен");
        Ok(summary)
    })
}

/// Обработчик: забирает публикации из канала до его закрытия и накапливает
/// статистику.
pub fn drain_rates(rx: Receiver<DailyRate>) -> AggregateState {
    let mut state = AggregateState::new();

    for rate in rx.iter() {
        info!(
            "Получена публикация {} ({} валют)",
            rate.date,
            rate.quotes.len()
        );
        state.absorb(rate);
    }

    state
}

/// Конвейер сбора курсов за период.
///
/// ## Пример
///
/// ```ignore
/// let source = Arc::new(CbrClient::new()?);
/// let mut pipeline = RatesPipeline::new(source, today()?, 7);
///
/// let state = pipeline.run()?;
/// assert_eq!(pipeline.state(), PipelineState::Complete);
/// ```
pub struct RatesPipeline<S> {
    source: Arc<S>,
    today: NaiveDate,
    period: u32,
    state: PipelineState,
}

impl<S> RatesPipeline<S>
where
    S: RateSource + Send + Sync + 'static,
{
    pub fn new(source: Arc<S>, today: NaiveDate, period: u32) -> Self {
        Self {
            source,
            today,
            period,
            state: PipelineState::Running,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Запустить сборщик в отдельном потоке, а обработчик в текущем.
    ///
    /// ## Ошибки
    ///
    /// Первая ошибка сборщика. Накопленная к этому моменту статистика
    /// отбрасывается.
    pub fn run(&mut self) -> Result<AggregateState, RatesError> {
        self.transition(PipelineState::Running);

        let (tx, rx) = bounded(HANDOFF_CAPACITY);
        let window = DateWindow::new(self.today, self.period);
        let producer = start_producer(Arc::clone(&self.source), window, tx);

        let state = drain_rates(rx);
        self.transition(PipelineState::ProducerDone);

        let outcome = producer
            .join()
            .map_err(|_| RatesError::channel_err("поток сборщика завершился паникой"))
            .and_then(|result| result);

        match outcome {
            Ok(summary) => {
                info!(
                    "Запрошено дат: {}, уникальных публикаций: {}, повторов: {}",
                    summary.queried, summary.emitted, summary.skipped
                );
                info!("В истории публикаций: {}", state.history().len());
                self.transition(PipelineState::Complete);
                Ok(state)
            }
            Err(err) => {
                error!("Сбор курсов прерван: {}", err);
                self.transition(PipelineState::Aborted);
                Err(err)
            }
        }
    }

    fn transition(&mut self, next: PipelineState) {
        info!("Конвейер: {} -> {}", self.state, next);
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commons::models::Quote;
    use crossbeam_channel::TrySendError;
    use std::collections::HashMap;
    use std::str::FromStr;
    use std::sync::Mutex;

    /// Ответ источника на запрошенную дату.
    enum Scripted {
        /// Публикация от даты с курсами `(id, unit_rate)`.
        Rate(NaiveDate, Vec<(&'static str, f64)>),
        /// Сбой запроса.
        Fail,
    }

    /// Источник с заранее заданными ответами и журналом запросов.
    struct ScriptedSource {
        script: HashMap<NaiveDate, Scripted>,
        requested: Mutex<Vec<NaiveDate>>,
    }

    impl ScriptedSource {
        fn new(script: Vec<(NaiveDate, Scripted)>) -> Self {
            Self {
                script: script.into_iter().collect(),
                requested: Mutex::new(Vec::new()),
            }
        }

        /// Источник, который на любую дату отвечает публикацией от этой же даты.
        fn echo() -> Self {
            Self::new(Vec::new())
        }

        fn requested(&self) -> Vec<NaiveDate> {
            self.requested.lock().unwrap().clone()
        }
    }

    impl RateSource for ScriptedSource {
        fn fetch(&self, date: NaiveDate) -> Result<DailyRate, RatesError> {
            self.requested.lock().unwrap().push(date);

            match self.script.get(&date) {
                Some(Scripted::Rate(published, quotes)) => Ok(daily(*published, quotes)),
                Some(Scripted::Fail) => Err(RatesError::fetch_err(format!("нет ответа на {date}"))),
                None => Ok(daily(date, &[("R01235", 90.0)])),
            }
        }
    }

    fn daily(date: NaiveDate, quotes: &[(&str, f64)]) -> DailyRate {
        DailyRate {
            date,
            quotes: quotes
                .iter()
                .map(|(id, unit_rate)| Quote {
                    id: id.to_string(),
                    char_code: "USD".to_string(),
                    name: "US Dollar".to_string(),
                    nominal: 1,
                    value: *unit_rate,
                    unit_rate: *unit_rate,
                })
                .collect(),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn three_distinct_days_end_to_end() {
        let source = Arc::new(ScriptedSource::new(vec![
            (day(17), Scripted::Rate(day(17), vec![("USD", 90.0)])),
            (day(16), Scripted::Rate(day(16), vec![("USD", 91.0)])),
            (day(15), Scripted::Rate(day(15), vec![("USD", 89.5)])),
        ]));
        let mut pipeline = RatesPipeline::new(Arc::clone(&source), day(17), 2);

        let state = pipeline.run().unwrap();

        let dates: Vec<_> = state.history().iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![day(17), day(16), day(15)]);
        assert_eq!(state.running_sum("USD"), Some(270.5));

        let (min, min_date) = state.min_quote().unwrap();
        assert_eq!(min.unit_rate, 89.5);
        assert_eq!(min_date, day(15));

        let (max, max_date) = state.max_quote().unwrap();
        assert_eq!(max.unit_rate, 91.0);
        assert_eq!(max_date, day(16));

        assert_eq!(pipeline.state(), PipelineState::Complete);
    }

    #[test]
    fn weekend_duplicates_are_skipped() {
        // Воскресенье и суббота отдают пятничную публикацию.
        let friday = day(16);
        let source = Arc::new(ScriptedSource::new(vec![
            (day(18), Scripted::Rate(friday, vec![("USD", 90.0)])),
            (day(17), Scripted::Rate(friday, vec![("USD", 90.0)])),
            (day(16), Scripted::Rate(friday, vec![("USD", 90.0)])),
            (day(15), Scripted::Rate(day(15), vec![("USD", 92.0)])),
        ]));
        let mut pipeline = RatesPipeline::new(Arc::clone(&source), day(18), 3);

        let state = pipeline.run().unwrap();

        let dates: Vec<_> = state.history().iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![friday, day(15)]);
        assert_eq!(state.running_sum("USD"), Some(182.0));
        assert_eq!(source.requested(), vec![day(18), day(17), day(16), day(15)]);
    }

    #[test]
    fn fetch_failure_aborts_whole_run() {
        let source = Arc::new(ScriptedSource::new(vec![
            (day(17), Scripted::Rate(day(17), vec![("USD", 90.0)])),
            (day(16), Scripted::Fail),
            (day(15), Scripted::Rate(day(15), vec![("USD", 89.5)])),
        ]));
        let mut pipeline = RatesPipeline::new(Arc::clone(&source), day(17), 2);

        let result = pipeline.run();

        assert!(matches!(result, Err(RatesError::FetchError(_))));
        assert_eq!(pipeline.state(), PipelineState::Aborted);
        assert_eq!(source.requested(), vec![day(17), day(16)]);
    }

    #[test]
    fn zero_period_queries_today_only() {
        let source = Arc::new(ScriptedSource::echo());
        let mut pipeline = RatesPipeline::new(Arc::clone(&source), day(17), 0);

        let state = pipeline.run().unwrap();

        assert_eq!(source.requested(), vec![day(17)]);
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn queried_dates_are_strictly_decreasing_from_today() {
        let period = 9;
        let source = Arc::new(ScriptedSource::echo());
        let mut pipeline = RatesPipeline::new(Arc::clone(&source), day(17), period);

        pipeline.run().unwrap();

        let requested = source.requested();
        assert_eq!(requested.len(), period as usize + 1);
        assert_eq!(requested[0], day(17));
        assert!(requested.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn producer_summary_counts_duplicates() {
        let source = Arc::new(ScriptedSource::new(vec![
            (day(17), Scripted::Rate(day(16), vec![("USD", 1.0)])),
            (day(16), Scripted::Rate(day(16), vec![("USD", 1.0)])),
        ]));
        let (tx, rx) = bounded(HANDOFF_CAPACITY);
        let producer = start_producer(source, DateWindow::new(day(17), 1), tx);

        let state = drain_rates(rx);
        let summary = producer.join().unwrap().unwrap();

        assert_eq!(
            summary,
            ProducerSummary {
                queried: 2,
                emitted: 1,
                skipped: 1
            }
        );
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn handoff_holds_no_record_without_receiver_ready() {
        let (tx, _rx) = bounded::<DailyRate>(HANDOFF_CAPACITY);
        let res = tx.try_send(daily(day(17), &[("USD", 1.0)]));
        assert!(matches!(res, Err(TrySendError::Full(_))));
    }

    #[test]
    fn pipeline_state_labels() {
        assert_eq!(PipelineState::ProducerDone.to_string(), "producer_done");
        assert_eq!(
            PipelineState::from_str("Complete").unwrap(),
            PipelineState::Complete
        );
        assert!(PipelineState::from_str("paused").is_err());
    }
}
