//! 画像カルーセル状態機械
//!
//! 詳細パネル内の画像送り。読み込みに失敗したURLを除外集合に入れ、
//! 残りをラップアラウンドで巡回する。選択が変わったらリセット。

use std::collections::HashSet;

use crate::images::normalize_image_key;

/// スワイプと判定する横方向移動量（px）
pub const SWIPE_DISTANCE_THRESHOLD: f64 = 40.0;

/// カルーセル状態
///
/// `current_index` は除外後の表示リストに対するインデックス。
/// 非空のとき常に `current_index < visible_images().len()` を保つ。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarouselState {
    images: Vec<String>,
    excluded: HashSet<String>,
    current_index: usize,
    swipe_start_x: Option<f64>,
}

impl CarouselState {
    pub fn new(images: Vec<String>) -> Self {
        Self {
            images,
            excluded: HashSet::new(),
            current_index: 0,
            swipe_start_x: None,
        }
    }

    /// 選択（詳細）の切り替え。インデックスと除外集合を初期化する
    pub fn rekey(&mut self, images: Vec<String>) {
        self.images = images;
        self.excluded.clear();
        self.current_index = 0;
        self.swipe_start_x = None;
    }

    /// 除外を差し引いた表示対象
    pub fn visible_images(&self) -> Vec<&str> {
        self.images
            .iter()
            .filter(|url| !self.excluded.contains(&normalize_image_key(url)))
            .map(String::as_str)
            .collect()
    }

    pub fn image_count(&self) -> usize {
        self.visible_images().len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// 現在表示中の画像URL（表示対象が空ならNone）
    pub fn current_image(&self) -> Option<String> {
        let visible = self.visible_images();
        visible.get(self.current_index).map(|url| url.to_string())
    }

    pub fn next(&mut self) {
        let count = self.image_count();
        if count == 0 {
            return;
        }
        self.current_index = (self.current_index + 1) % count;
    }

    pub fn previous(&mut self) {
        let count = self.image_count();
        if count == 0 {
            return;
        }
        self.current_index = (self.current_index + count - 1) % count;
    }

    /// ドットナビゲーション用の直接ジャンプ（範囲外は無視）
    pub fn set_index(&mut self, index: usize) {
        if index < self.image_count() {
            self.current_index = index;
        }
    }

    /// 読み込み失敗の記録（冪等）。インデックスが範囲外になったら0に戻す
    pub fn report_load_failure(&mut self, url: &str) {
        let key = normalize_image_key(url);
        if key.is_empty() {
            return;
        }
        self.excluded.insert(key);
        self.clamp_index();
    }

    /// タッチ開始位置の記録
    pub fn swipe_start(&mut self, client_x: f64) {
        self.swipe_start_x = Some(client_x);
    }

    /// タッチ終了。閾値を超えた横移動なら右スワイプ=prev、左スワイプ=next
    pub fn swipe_end(&mut self, client_x: f64) {
        let Some(start_x) = self.swipe_start_x.take() else {
            return;
        };
        let distance = client_x - start_x;
        if distance.abs() > SWIPE_DISTANCE_THRESHOLD {
            if distance > 0.0 {
                self.previous();
            } else {
                self.next();
            }
        }
    }

    fn clamp_index(&mut self) {
        let count = self.image_count();
        if count > 0 && self.current_index >= count {
            self.current_index = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_images() -> CarouselState {
        CarouselState::new(vec![
            "u1".to_string(),
            "u2".to_string(),
            "u3".to_string(),
        ])
    }

    /// next()をlength回でひと回り、prev()はnext()を打ち消す
    #[test]
    fn test_wraparound() {
        let mut carousel = three_images();
        for _ in 0..3 {
            carousel.next();
        }
        assert_eq!(carousel.current_index(), 0);

        carousel.next();
        carousel.previous();
        assert_eq!(carousel.current_index(), 0);

        carousel.previous();
        assert_eq!(carousel.current_index(), 2);
    }

    #[test]
    fn test_navigation_noop_when_empty() {
        let mut carousel = CarouselState::new(vec![]);
        carousel.next();
        carousel.previous();
        assert_eq!(carousel.current_index(), 0);
        assert_eq!(carousel.current_image(), None);
    }

    #[test]
    fn test_load_failure_excludes_image() {
        let mut carousel = three_images();
        carousel.report_load_failure("u2");
        assert_eq!(carousel.visible_images(), vec!["u1", "u3"]);
    }

    /// 同じURLの失敗報告は冪等
    #[test]
    fn test_load_failure_idempotent() {
        let mut carousel = three_images();
        carousel.report_load_failure("u2");
        let once = carousel.clone();
        carousel.report_load_failure("u2");
        assert_eq!(carousel, once);
    }

    #[test]
    fn test_load_failure_clamps_out_of_range_index() {
        let mut carousel = three_images();
        carousel.set_index(2);
        carousel.report_load_failure("u2");
        // 表示対象が2枚になりインデックス2は範囲外 → 先頭へ
        assert_eq!(carousel.current_index(), 0);
        assert_eq!(carousel.current_image(), Some("u1".to_string()));
    }

    #[test]
    fn test_all_images_failed() {
        let mut carousel = three_images();
        carousel.report_load_failure("u1");
        carousel.report_load_failure("u2");
        carousel.report_load_failure("u3");
        assert_eq!(carousel.image_count(), 0);
        assert_eq!(carousel.current_image(), None);
        carousel.next();
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn test_rekey_resets_everything() {
        let mut carousel = three_images();
        carousel.next();
        carousel.report_load_failure("u1");
        carousel.rekey(vec!["v1".to_string(), "v2".to_string()]);
        assert_eq!(carousel.current_index(), 0);
        assert_eq!(carousel.visible_images(), vec!["v1", "v2"]);
    }

    #[test]
    fn test_set_index_ignores_out_of_range() {
        let mut carousel = three_images();
        carousel.set_index(5);
        assert_eq!(carousel.current_index(), 0);
        carousel.set_index(2);
        assert_eq!(carousel.current_index(), 2);
    }

    #[test]
    fn test_swipe_right_goes_previous() {
        let mut carousel = three_images();
        carousel.swipe_start(100.0);
        carousel.swipe_end(150.0);
        assert_eq!(carousel.current_index(), 2);
    }

    #[test]
    fn test_swipe_left_goes_next() {
        let mut carousel = three_images();
        carousel.swipe_start(200.0);
        carousel.swipe_end(150.0);
        assert_eq!(carousel.current_index(), 1);
    }

    #[test]
    fn test_swipe_below_threshold_is_noop() {
        let mut carousel = three_images();
        carousel.swipe_start(100.0);
        carousel.swipe_end(140.0);
        assert_eq!(carousel.current_index(), 0);
        // 開始位置は消費済みなので続けて終了イベントが来ても動かない
        carousel.swipe_end(300.0);
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn test_exclusion_uses_normalized_key() {
        let mut carousel = CarouselState::new(vec![
            "https://commons.wikimedia.org/wiki/Special:FilePath/Flu.jpg".to_string(),
            "u2".to_string(),
        ]);
        carousel
            .report_load_failure("https://upload.wikimedia.org/wikipedia/commons/3/3a/Flu.jpg");
        assert_eq!(carousel.visible_images(), vec!["u2"]);
    }
}
