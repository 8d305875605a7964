//! 全履歴レコードの CSV 出力
//!
//! 列: Date, Time Period, Medicine, Time, Status。日付 → 時刻の昇順。

use crate::domain::dates::format_date_key;
use crate::domain::RecordEntry;
use crate::ports::outbound::{Notifier, Severity};
use crate::store::PillStore;
use chrono::NaiveDate;
use common::error::Error;
use common::ports::outbound::{FileSystem, Log, LogLevel, LogRecord};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const HEADER: [&str; 5] = ["Date", "Time Period", "Medicine", "Time", "Status"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub csv: String,
    pub rows: usize,
    /// 書き出したファイル（指定が無ければ None）
    pub path: Option<PathBuf>,
}

pub struct ExportUseCase {
    fs: Arc<dyn FileSystem>,
    notifier: Arc<dyn Notifier>,
    log: Arc<dyn Log>,
}

impl ExportUseCase {
    pub fn new(fs: Arc<dyn FileSystem>, notifier: Arc<dyn Notifier>, log: Arc<dyn Log>) -> Self {
        Self { fs, notifier, log }
    }

    /// CSV を作る。output があればそこへ書く。レコードが無ければ書かずに通知のみ。
    pub fn export(&self, store: &PillStore, output: Option<&Path>) -> Result<ExportOutcome, Error> {
        let rows = rows(store);
        if rows.is_empty() {
            self.notifier
                .notify("No medication records available.", Severity::Info);
            return Ok(ExportOutcome {
                csv: String::new(),
                rows: 0,
                path: None,
            });
        }

        let mut csv = csv_line(&HEADER.map(String::from));
        for (date, record) in &rows {
            csv.push_str(&csv_line(&[
                format_date_key(*date),
                record
                    .time_of_day
                    .map(|t| t.label().to_string())
                    .unwrap_or_default(),
                record.name.clone(),
                record.time.to_12h(),
                record.status.as_str().to_string(),
            ]));
        }

        let path = match output {
            Some(p) => {
                if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
                    self.fs.create_dir_all(parent)?;
                }
                self.fs.write(p, &csv)?;
                self.notifier.notify(
                    &format!("Exported {} records to {}", rows.len(), p.display()),
                    Severity::Success,
                );
                Some(p.to_path_buf())
            }
            None => None,
        };
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "usecase", "export", "records exported")
                .field("rows", rows.len())
                .field("to_file", path.is_some()),
        );
        Ok(ExportOutcome {
            csv,
            rows: rows.len(),
            path,
        })
    }
}

fn rows(store: &PillStore) -> Vec<(NaiveDate, &RecordEntry)> {
    let mut rows = Vec::new();
    for (date, records) in store.records.iter() {
        let mut day: Vec<&RecordEntry> = records.iter().collect();
        day.sort_by_key(|r| r.time);
        rows.extend(day.into_iter().map(|r| (date, r)));
    }
    rows
}

fn csv_line(fields: &[String]) -> String {
    let mut line = fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

/// カンマ・引用符・改行を含む値だけ引用する
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::RecordingNotifier;
    use crate::domain::{ClockTime, IntakeStatus, RecordSource, TimeOfDay};
    use common::adapter::{MemoryKeyValueStore, NoopLog, StdFileSystem};

    fn record(name: &str, time: &str, status: IntakeStatus) -> RecordEntry {
        RecordEntry {
            id: 1,
            name: name.to_string(),
            time: ClockTime::parse(time).unwrap(),
            status,
            time_of_day: Some(TimeOfDay::for_time(ClockTime::parse(time).unwrap())),
            source: RecordSource::Manual,
            timestamp: String::new(),
        }
    }

    fn setup() -> (ExportUseCase, PillStore, Arc<RecordingNotifier>) {
        let (store, _) = PillStore::load(Arc::new(MemoryKeyValueStore::new()), &NoopLog);
        let notifier = Arc::new(RecordingNotifier::new());
        let uc = ExportUseCase::new(Arc::new(StdFileSystem), notifier.clone(), Arc::new(NoopLog));
        (uc, store, notifier)
    }

    #[test]
    fn test_csv_is_ordered_by_date_then_time() {
        let (uc, mut store, _) = setup();
        let d1 = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        store.records.push(d2, record("Zinc", "07:00", IntakeStatus::Taken));
        store.records.push(d1, record("Fish oil, 1g", "20:00", IntakeStatus::Missed));
        store.records.push(d1, record("Aspirin", "08:00", IntakeStatus::Taken));

        let out = uc.export(&store, None).unwrap();
        assert_eq!(out.rows, 3);
        let lines: Vec<&str> = out.csv.lines().collect();
        assert_eq!(lines[0], "Date,Time Period,Medicine,Time,Status");
        assert_eq!(lines[1], "2024-03-01,Morning,Aspirin,8:00 AM,taken");
        assert_eq!(lines[2], "2024-03-01,Evening,\"Fish oil, 1g\",8:00 PM,missed");
        assert_eq!(lines[3], "2024-03-02,Morning,Zinc,7:00 AM,taken");
    }

    #[test]
    fn test_no_records_notifies() {
        let (uc, store, notifier) = setup();
        let out = uc.export(&store, None).unwrap();
        assert_eq!(out.rows, 0);
        assert_eq!(
            notifier.last(),
            Some((Severity::Info, "No medication records available.".to_string()))
        );
    }

    #[test]
    fn test_writes_file() {
        let (uc, mut store, _) = setup();
        let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        store.records.push(d, record("Aspirin", "08:00", IntakeStatus::Taken));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("records.csv");
        let out = uc.export(&store, Some(&path)).unwrap();
        assert_eq!(out.path.as_deref(), Some(path.as_path()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), out.csv);
    }
}
