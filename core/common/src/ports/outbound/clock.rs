//! 時刻 Outbound ポート
//!
//! usecase はこの trait 経由で「今日の日付」と「現在時刻」を取得する。
//! エントリ ID（epoch ミリ秒）とタイムスタンプもここから作る。

use chrono::{DateTime, Local, NaiveDate, SecondsFormat, Utc};

/// 時刻取得の抽象
///
/// 実装は `common::adapter::StdClock` やテスト用の `FixedClock`。
pub trait Clock: Send + Sync {
    /// 現在時刻（ローカルタイムゾーン）
    fn now(&self) -> DateTime<Local>;

    /// 今日の日付（ローカル）
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// 現在時刻をミリ秒（Unix epoch）で返す
    fn now_ms(&self) -> i64 {
        self.now().timestamp_millis()
    }

    /// 現在時刻を ISO8601 (UTC, ミリ秒, 末尾 Z) で返す
    fn now_iso8601(&self) -> String {
        self.now()
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}
