//! 一覧・詳細エクスプローラの中核ロジック
//!
//! 検索→ページング→選択→カルーセルのデータフローを描画非依存で実装する。
//! 各ページ（conditions / geography）はここをパラメタ化して使う。

pub mod carousel;
pub mod layout;
pub mod pagination;
pub mod selection;
