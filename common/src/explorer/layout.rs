//! ページサイズ推定
//!
//! 詳細カードの高さに合わせて一覧の1ページ件数を決める計算部。
//! 計測（DOM依存）は呼び出し側の仕事で、ここは純粋な算術のみ。
//! 計測できない環境では固定のページサイズにフォールバックする。

/// CSS変数が取れない場合の行高さ（px）
pub const DEFAULT_ROW_HEIGHT: f64 = 160.0;

/// 計測済みレイアウト値
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelMetrics {
    /// 詳細カードの高さ
    pub detail_height: f64,
    /// ページネーション行の高さ
    pub pagination_height: f64,
    /// 一覧パネル内の縦ギャップ
    pub panel_gap: f64,
    /// 一覧1行の高さ
    pub row_height: f64,
    /// 行間ギャップ
    pub row_gap: f64,
}

impl PanelMetrics {
    /// 利用可能な高さに収まる行数
    ///
    /// 高さが計測不能（0以下）の場合はNoneを返し、呼び出し側は
    /// 現在のページサイズを維持する。
    pub fn fit_count(&self) -> Option<usize> {
        let available_height = self.detail_height - self.pagination_height - self.panel_gap;
        if self.row_height <= 0.0 || available_height <= 0.0 {
            return None;
        }
        let count = ((available_height + self.row_gap) / (self.row_height + self.row_gap)).floor();
        Some((count as usize).max(1))
    }
}
