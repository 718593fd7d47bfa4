use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::generator::Month;
use crate::record::Transaction;

#[derive(Debug, Error)]
pub enum WriteLogError {
    #[error("cannot create log directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("cannot write log record to {path}: {source}")]
    WriteRecord { path: PathBuf, source: csv::Error },
    #[error("cannot flush log file {path}: {source}")]
    Flush { path: PathBuf, source: io::Error },
}

pub fn log_file_name(month: Month) -> String {
    format!("txn_log_{}_{:02}.csv", month.year, month.month)
}

/// Writes one client-month log file under `base_dir/<client_id>/`, creating
/// the directory if absent and overwriting any previous file. Returns the
/// path of the written file.
pub fn write_month_log(
    base_dir: &Path,
    client_id: &str,
    month: Month,
    records: &[Transaction],
) -> Result<PathBuf, WriteLogError> {
    let dir = base_dir.join(client_id);
    fs::create_dir_all(&dir).map_err(|source| WriteLogError::CreateDir {
        path: dir.clone(),
        source,
    })?;

    let path = dir.join(log_file_name(month));
    let mut writer = csv::Writer::from_path(&path).map_err(|source| WriteLogError::WriteRecord {
        path: path.clone(),
        source,
    })?;
    for record in records {
        writer
            .serialize(record)
            .map_err(|source| WriteLogError::WriteRecord {
                path: path.clone(),
                source,
            })?;
    }
    writer.flush().map_err(|source| WriteLogError::Flush {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Status, TransactionType};
    use chrono::NaiveDate;

    fn record(id: u64, day: u32) -> Transaction {
        Transaction {
            id,
            client_id: "client1".to_string(),
            transaction_type: TransactionType::W,
            amount: 99.9,
            date: NaiveDate::from_ymd_opt(2025, 1, day)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            status: Status::Pending,
        }
    }

    #[test]
    fn test_log_file_name_pads_month() {
        assert_eq!(log_file_name(Month::new(2025, 3)), "txn_log_2025_03.csv");
        assert_eq!(log_file_name(Month::new(2024, 12)), "txn_log_2024_12.csv");
    }

    #[test]
    fn test_write_month_log_creates_directory_and_file() {
        let base = tempfile::tempdir().unwrap();
        let records = vec![record(1001, 1), record(1002, 2)];

        let path =
            write_month_log(base.path(), "client1", Month::new(2025, 1), &records).unwrap();
        assert_eq!(path, base.path().join("client1").join("txn_log_2025_01.csv"));

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "ID,ClientID,Transaction,Amount,Date,Status");
        assert_eq!(lines[1], "1001,client1,W,99.90,2025-01-01T12:00:00Z,Pending");
        assert_eq!(lines[2], "1002,client1,W,99.90,2025-01-02T12:00:00Z,Pending");
    }

    #[test]
    fn test_write_month_log_overwrites_existing_file() {
        let base = tempfile::tempdir().unwrap();
        let month = Month::new(2025, 1);

        write_month_log(base.path(), "client1", month, &[record(1001, 1), record(1002, 2)])
            .unwrap();
        let path = write_month_log(base.path(), "client1", month, &[record(2001, 3)]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("2001"));
        assert!(!content.contains("1001"));
    }
}
