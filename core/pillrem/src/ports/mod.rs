//! Ports & Adapters のポート定義
//!
//! - inbound: ドライバ（CLI / シェル）がアプリを呼び出すインターフェース
//! - outbound: 通知・確認ダイアログの trait（KV ストア・時刻・ログは common のものを使う）

pub mod inbound;
pub mod outbound;
