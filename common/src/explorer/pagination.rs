//! 検索・ページング演算
//!
//! コレクション一覧の絞り込みとページ分割。純粋関数なので
//! 描画レイヤなしでそのままテストできる。

/// デフォルトのページサイズ（レイアウト計測が入るまでの初期値）
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// 一覧に載る要素の共通インターフェース
///
/// conditionsとregionsでフィールド構成が違うため、検索に必要な
/// id/nameだけをここで抽象化する。
pub trait CollectionEntry {
    fn entry_id(&self) -> &str;
    fn entry_name(&self) -> &str;
}

/// 検索語・ページ番号・ページサイズの組
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub search_query: String,
    pub page_number: usize,
    pub page_size: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 比較用の検索語（前後空白を除去して小文字化）
    pub fn search_term(&self) -> String {
        self.search_query.trim().to_lowercase()
    }

    /// 検索語の変更は必ず1ページ目に戻す
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.page_number = 1;
    }

    pub fn previous_page(&mut self) {
        self.page_number = self.page_number.saturating_sub(1).max(1);
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.page_number = (self.page_number + 1).min(total_pages.max(1));
    }

    /// ページ番号を総ページ数の範囲に収める
    pub fn clamp_page(&mut self, total_pages: usize) {
        if total_pages == 0 {
            self.page_number = 1;
        } else if self.page_number > total_pages {
            self.page_number = total_pages;
        }
    }

    /// ページサイズを変更。値が同じ場合は何もしない（フィードバックループ防止）
    pub fn apply_page_size(&mut self, page_size: usize) -> bool {
        let page_size = page_size.max(1);
        if self.page_size == page_size {
            return false;
        }
        self.page_size = page_size;
        true
    }
}

/// ページ計算の結果
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<T> {
    /// 検索語にマッチした全件
    pub filtered: Vec<T>,
    /// 現在ページ分のスライス
    pub page: Vec<T>,
    /// 総ページ数（0件なら0）
    pub total_pages: usize,
    /// クランプ済みページ番号（常に1以上）
    pub active_page: usize,
}

/// 検索語マッチ判定（name または id の部分一致、大文字小文字無視）
pub fn matches_search<T: CollectionEntry>(entry: &T, search_term: &str) -> bool {
    if search_term.is_empty() {
        return true;
    }
    entry.entry_name().to_lowercase().contains(search_term)
        || entry.entry_id().to_lowercase().contains(search_term)
}

/// 絞り込み＋ページ分割
pub fn paginate<T: CollectionEntry + Clone>(items: &[T], query: &QueryState) -> PageView<T> {
    let search_term = query.search_term();
    let filtered: Vec<T> = items
        .iter()
        .filter(|item| matches_search(*item, &search_term))
        .cloned()
        .collect();

    let page_size = query.page_size.max(1);
    let total_pages = filtered.len().div_ceil(page_size);
    // page_numberは公開フィールドなので0もここで1に寄せる
    let active_page = if total_pages == 0 {
        1
    } else {
        query.page_number.max(1).min(total_pages)
    };
    let start = (active_page - 1) * page_size;
    let page: Vec<T> = filtered
        .iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    PageView {
        filtered,
        page,
        total_pages,
        active_page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        id: &'static str,
        name: &'static str,
    }

    impl CollectionEntry for Entry {
        fn entry_id(&self) -> &str {
            self.id
        }
        fn entry_name(&self) -> &str {
            self.name
        }
    }

    fn flu_and_cold() -> Vec<Entry> {
        vec![
            Entry { id: "a", name: "Flu" },
            Entry { id: "b", name: "Cold" },
        ]
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let items = flu_and_cold();
        let view = paginate(&items, &QueryState::new());
        assert_eq!(view.filtered.len(), 2);
    }

    #[test]
    fn test_search_matches_name_case_insensitive() {
        let items = flu_and_cold();
        let mut query = QueryState::new();
        query.set_search_query("co");
        let view = paginate(&items, &query);
        assert_eq!(view.filtered, vec![items[1].clone()]);
        assert_eq!(view.total_pages, 1);
    }

    #[test]
    fn test_search_matches_id() {
        let items = flu_and_cold();
        let mut query = QueryState::new();
        query.set_search_query("A");
        let view = paginate(&items, &query);
        assert_eq!(view.filtered, vec![items[0].clone()]);
    }

    #[test]
    fn test_search_trims_whitespace() {
        let items = flu_and_cold();
        let mut query = QueryState::new();
        query.set_search_query("  flu  ");
        let view = paginate(&items, &query);
        assert_eq!(view.filtered.len(), 1);
    }

    #[test]
    fn test_page_slices() {
        let items = flu_and_cold();
        let mut query = QueryState::new();
        query.page_size = 1;
        let view = paginate(&items, &query);
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.active_page, 1);
        assert_eq!(view.page, vec![items[0].clone()]);

        query.page_number = 2;
        let view = paginate(&items, &query);
        assert_eq!(view.page, vec![items[1].clone()]);
    }

    #[test]
    fn test_page_number_zero_treated_as_first_page() {
        let items = flu_and_cold();
        let mut query = QueryState::new();
        query.page_size = 1;
        query.page_number = 0;
        let view = paginate(&items, &query);
        assert_eq!(view.active_page, 1);
        assert_eq!(view.page, vec![items[0].clone()]);
    }

    #[test]
    fn test_page_number_beyond_end_clamps_to_last_page() {
        let items = flu_and_cold();
        let mut query = QueryState::new();
        query.page_size = 1;
        query.page_number = 3;
        let view = paginate(&items, &query);
        assert_eq!(view.active_page, 2);
        assert_eq!(view.page, vec![items[1].clone()]);
    }

    #[test]
    fn test_empty_filtered_set() {
        let items = flu_and_cold();
        let mut query = QueryState::new();
        query.set_search_query("zzz");
        let view = paginate(&items, &query);
        assert_eq!(view.total_pages, 0);
        assert_eq!(view.active_page, 1);
        assert!(view.page.is_empty());
    }

    /// クランプ後のページ番号は常に 1..=max(1, total_pages)
    #[test]
    fn test_active_page_always_in_range() {
        let items: Vec<Entry> = (0..17)
            .map(|_| Entry { id: "x", name: "X" })
            .collect();
        for page_size in 1..=6 {
            for page_number in [0usize, 1, 2, 5, 100] {
                let query = QueryState {
                    search_query: String::new(),
                    page_number,
                    page_size,
                };
                let view = paginate(&items, &query);
                assert!(view.active_page >= 1);
                assert!(view.active_page <= view.total_pages.max(1));
            }
        }
    }

    /// 同じ検索語での絞り込みは冪等
    #[test]
    fn test_filter_idempotent() {
        let items = flu_and_cold();
        let mut query = QueryState::new();
        query.set_search_query("l");
        let once = paginate(&items, &query);
        let twice = paginate(&once.filtered, &query);
        assert_eq!(once.filtered, twice.filtered);
    }

    #[test]
    fn test_set_search_resets_page() {
        let mut query = QueryState::new();
        query.page_number = 4;
        query.set_search_query("flu");
        assert_eq!(query.page_number, 1);
    }

    #[test]
    fn test_clamp_page() {
        let mut query = QueryState::new();
        query.page_number = 9;
        query.clamp_page(3);
        assert_eq!(query.page_number, 3);
        query.clamp_page(0);
        assert_eq!(query.page_number, 1);
    }

    #[test]
    fn test_next_and_previous_page_bounds() {
        let mut query = QueryState::new();
        query.previous_page();
        assert_eq!(query.page_number, 1);
        query.next_page(3);
        assert_eq!(query.page_number, 2);
        query.next_page(2);
        assert_eq!(query.page_number, 2);
    }

    #[test]
    fn test_apply_page_size_only_on_change() {
        let mut query = QueryState::new();
        assert!(query.apply_page_size(5));
        assert!(!query.apply_page_size(5));
        // 0は1に切り上げ
        assert!(query.apply_page_size(0));
        assert_eq!(query.page_size, 1);
    }
}
