//! pillrem 共通ライブラリ
//!
//! エラー型・Outbound ポート・標準アダプタを提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（実行時ディレクトリ）
pub mod domain;

/// Ports & Adapters のポート定義
pub mod ports;

/// ポートの標準実装
pub mod adapter;
