use chrono::{Duration, NaiveDate, NaiveDateTime};
use log::info;
use rand::Rng;
use std::path::Path;

use crate::config::GeneratorConfig;
use crate::csv_handler::{self, WriteLogError};
use crate::record::{self, Status, Transaction, TransactionType};

/// Fallback gap when random jitter would move a timestamp backwards.
const MIN_GAP_MINUTES: i64 = 5;
const JITTER_MINUTES: i64 = 30;

/// A calendar month. Ordering is year-major, so ranges of months compare
/// the way `(year, month)` tuples do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Self {
        Month { year, month }
    }

    pub fn next(self) -> Month {
        if self.month == 12 {
            Month { year: self.year + 1, month: 1 }
        } else {
            Month { year: self.year, month: self.month + 1 }
        }
    }

    pub fn start(self) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("first day of month")
            .and_hms_opt(0, 0, 0)
            .expect("midnight")
    }

    /// Last representable instant of the month at second precision,
    /// 23:59:59 of the last day.
    pub fn last_second(self) -> NaiveDateTime {
        self.next().start() - Duration::seconds(1)
    }

    fn minutes(self) -> i64 {
        (self.next().start() - self.start()).num_minutes()
    }
}

/// Synthesizes `count` transactions for one client-month. IDs continue from
/// `last_id`; the updated counter is returned so the caller can thread it
/// through the whole run.
pub fn generate_month(
    rng: &mut impl Rng,
    client_id: &str,
    month: Month,
    count: usize,
    mut last_id: u64,
) -> (Vec<Transaction>, u64) {
    let month_end = month.last_second();
    let base_increment = Duration::minutes(month.minutes() / count as i64);

    let mut records = Vec::with_capacity(count);
    let mut current = month.start();
    for _ in 0..count {
        let id = last_id + 1;
        let jitter = Duration::minutes(rng.gen_range(-JITTER_MINUTES..=JITTER_MINUTES));
        let mut date = current + base_increment + jitter;
        if date < current {
            date = current + Duration::minutes(MIN_GAP_MINUTES);
        }
        if date > month_end {
            date = month_end;
        }

        records.push(Transaction {
            id,
            client_id: client_id.to_string(),
            transaction_type: TransactionType::sample(rng),
            amount: record::sample_amount(rng),
            date,
            status: Status::sample(rng),
        });
        last_id = id;
        current = date;
    }

    (records, last_id)
}

/// Runs the whole generation range: for every month and every client, writes
/// one log file under `base_dir`. Any filesystem failure aborts the run.
pub fn run(
    rng: &mut impl Rng,
    config: &GeneratorConfig,
    base_dir: &Path,
) -> Result<(), WriteLogError> {
    let clients = config.clients();
    let mut last_id = config.id_seed;

    let mut month = config.first_month;
    while month <= config.last_month {
        for client_id in &clients {
            let (records, next_id) =
                generate_month(rng, client_id, month, config.transactions_per_month, last_id);
            last_id = next_id;

            let path = csv_handler::write_month_log(base_dir, client_id, month, &records)?;
            info!(
                "{} transactions saved for {} in {}-{:02} at {}",
                records.len(),
                client_id,
                month.year,
                month.month,
                path.display()
            );
        }
        month = month.next();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_month_next_rolls_over_year() {
        assert_eq!(Month::new(2024, 11).next(), Month::new(2024, 12));
        assert_eq!(Month::new(2024, 12).next(), Month::new(2025, 1));
    }

    #[test]
    fn test_month_ordering_is_year_major() {
        assert!(Month::new(2024, 12) < Month::new(2025, 1));
        assert!(Month::new(2025, 1) < Month::new(2025, 3));
    }

    #[test]
    fn test_generate_month_produces_requested_count() {
        let mut rng = StdRng::seed_from_u64(1);
        let (records, _) = generate_month(&mut rng, "client1", Month::new(2024, 12), 50, 1000);
        assert_eq!(records.len(), 50);
    }

    #[test]
    fn test_ids_continue_across_calls() {
        let mut rng = StdRng::seed_from_u64(2);
        let (first, last_id) = generate_month(&mut rng, "client1", Month::new(2024, 12), 50, 1000);
        assert_eq!(first[0].id, 1001);
        assert_eq!(last_id, 1050);

        let (second, last_id) = generate_month(&mut rng, "client2", Month::new(2024, 12), 50, last_id);
        assert_eq!(second[0].id, 1051);
        assert_eq!(last_id, 1100);
    }

    #[test]
    fn test_ids_strictly_increasing_within_month() {
        let mut rng = StdRng::seed_from_u64(3);
        let (records, _) = generate_month(&mut rng, "client1", Month::new(2025, 2), 50, 1000);
        for pair in records.windows(2) {
            assert!(pair[1].id > pair[0].id);
        }
    }

    #[test]
    fn test_dates_non_decreasing_and_inside_month() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let month = Month::new(2024, 12);
            let (records, _) = generate_month(&mut rng, "client1", month, 50, 1000);

            let start = month.start();
            let end = month.last_second();
            let mut previous = start;
            for record in &records {
                assert!(record.date >= previous, "date went backwards: {:?}", record);
                assert!(record.date >= start && record.date <= end, "date outside month: {:?}", record);
                previous = record.date;
            }
        }
    }

    #[test]
    fn test_february_month_bounds() {
        let month = Month::new(2025, 2);
        assert_eq!(month.start().to_string(), "2025-02-01 00:00:00");
        assert_eq!(month.last_second().to_string(), "2025-02-28 23:59:59");
        assert_eq!(month.minutes(), 28 * 24 * 60);
    }
}
