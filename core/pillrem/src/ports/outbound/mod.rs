//! Outbound ポート: アプリが利用者に知らせる・確認するための trait

pub mod confirm;
pub mod notifier;

pub use confirm::Confirm;
pub use notifier::{Notifier, Severity};
