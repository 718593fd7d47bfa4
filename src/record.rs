use chrono::NaiveDateTime;
use rand::Rng;
use serde::{Serialize, Serializer};

/// Wire format for timestamps, second precision, always UTC.
const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransactionType {
    D,
    W,
}

impl TransactionType {
    pub fn sample(rng: &mut impl Rng) -> Self {
        if rng.gen_bool(0.5) {
            TransactionType::D
        } else {
            TransactionType::W
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Completed,
    Pending,
    Failed,
}

impl Status {
    /// Weighted draw: 70% Completed, 15% Pending, 15% Failed.
    pub fn sample(rng: &mut impl Rng) -> Self {
        match rng.gen_range(0..100) {
            0..=69 => Status::Completed,
            70..=84 => Status::Pending,
            _ => Status::Failed,
        }
    }
}

/// One synthetic transaction row. Field names are renamed to match the
/// CSV header `ID,ClientID,Transaction,Amount,Date,Status`.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "ClientID")]
    pub client_id: String,
    #[serde(rename = "Transaction")]
    pub transaction_type: TransactionType,
    #[serde(rename = "Amount", serialize_with = "two_decimals")]
    pub amount: f64,
    #[serde(rename = "Date", serialize_with = "iso_utc")]
    pub date: NaiveDateTime,
    #[serde(rename = "Status")]
    pub status: Status,
}

/// Draws an amount in [10.00, 10000.00] rounded to 2 fractional digits.
pub fn sample_amount(rng: &mut impl Rng) -> f64 {
    let raw: f64 = rng.gen_range(10.00..=10000.00);
    (raw * 100.0).round() / 100.0
}

fn two_decimals<S: Serializer>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:.2}", amount))
}

fn iso_utc<S: Serializer>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format(DATE_FORMAT))
}
