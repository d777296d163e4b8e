//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// パース失敗もTransportに畳み込む（失敗時のみボディテキストを保持する方針）。
/// 到達不能なホストは status = 0 で表現する。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeadError {
    #[error("config error: {0}")]
    Config(String),

    #[error("HTTP {status}: {body}")]
    Transport { status: u16, body: String },
}

impl MeadError {
    /// 接続自体に失敗した場合（ステータスなし）
    pub fn unreachable(detail: impl Into<String>) -> Self {
        MeadError::Transport {
            status: 0,
            body: detail.into(),
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, MeadError>;
