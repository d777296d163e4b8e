//! アクティブ選択コントローラ
//!
//! 一覧から選ばれた1件の詳細取得を管理する状態機械。
//! 取得は非同期なので、遅れて届いた古いレスポンスが新しい選択を
//! 上書きしないよう世代トークンで照合する（mountedフラグ方式の置き換え）。

use crate::error::{MeadError, Result};
use crate::explorer::pagination::CollectionEntry;

/// 取得リクエストの世代トークン
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(u64);

/// コントローラが発行する取得指示
///
/// 呼び出し側がこのidで詳細をfetchし、結果を同じチケットで
/// `resolve` に渡す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub id: String,
    pub token: FetchToken,
}

/// 選択状態
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionState<D> {
    /// 選択なし（絞り込み結果が空）
    Idle,
    /// 詳細取得中
    Loading { id: String },
    /// 詳細表示中
    Ready { id: String, detail: D },
    /// 詳細取得失敗（再選択までこのまま）
    Failed { id: String, error: MeadError },
}

impl<D> SelectionState<D> {
    pub fn active_id(&self) -> Option<&str> {
        match self {
            SelectionState::Idle => None,
            SelectionState::Loading { id }
            | SelectionState::Ready { id, .. }
            | SelectionState::Failed { id, .. } => Some(id),
        }
    }
}

/// 選択とその詳細取得を1インスタンスで所有するコントローラ
#[derive(Debug, Clone)]
pub struct SelectionController<D> {
    state: SelectionState<D>,
    generation: u64,
}

impl<D> Default for SelectionController<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> SelectionController<D> {
    pub fn new() -> Self {
        Self {
            state: SelectionState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &SelectionState<D> {
        &self.state
    }

    pub fn active_id(&self) -> Option<&str> {
        self.state.active_id()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SelectionState::Loading { .. })
    }

    pub fn detail(&self) -> Option<&D> {
        match &self.state {
            SelectionState::Ready { detail, .. } => Some(detail),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&MeadError> {
        match &self.state {
            SelectionState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// 明示的な選択。世代を進めてLoadingに遷移し、取得チケットを返す
    pub fn select(&mut self, id: impl Into<String>) -> FetchTicket {
        let id = id.into();
        self.generation += 1;
        self.state = SelectionState::Loading { id: id.clone() };
        FetchTicket {
            id,
            token: FetchToken(self.generation),
        }
    }

    /// 絞り込み結果の変化に選択を追従させる
    ///
    /// - 選択なしで結果が非空なら先頭を選択
    /// - 選択中のidが結果から消えたら先頭へ移す（空ならIdle）
    /// - 選択中のidが残っていれば何もしない
    ///
    /// 新しい取得が必要な場合のみチケットを返す。
    pub fn sync_filtered<T: CollectionEntry>(&mut self, filtered: &[T]) -> Option<FetchTicket> {
        match self.active_id() {
            None => filtered
                .first()
                .map(|first| first.entry_id().to_string())
                .map(|id| self.select(id)),
            Some(active) => {
                if filtered.iter().any(|item| item.entry_id() == active) {
                    None
                } else if let Some(first) = filtered.first() {
                    let id = first.entry_id().to_string();
                    Some(self.select(id))
                } else {
                    // 古い取得が残っていても世代を進めて無効化する
                    self.generation += 1;
                    self.state = SelectionState::Idle;
                    None
                }
            }
        }
    }

    /// 取得結果の反映
    ///
    /// チケットの世代が現在の世代と一致する場合のみ状態を書き換える。
    /// 追い越された（新しい選択が発生した後に届いた）結果は破棄され、
    /// 反映されたかどうかを返す。
    pub fn resolve(&mut self, ticket: &FetchTicket, result: Result<D>) -> bool {
        if ticket.token != FetchToken(self.generation) {
            return false;
        }
        self.state = match result {
            Ok(detail) => SelectionState::Ready {
                id: ticket.id.clone(),
                detail,
            },
            Err(error) => SelectionState::Failed {
                id: ticket.id.clone(),
                error,
            },
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Entry(&'static str);

    impl CollectionEntry for Entry {
        fn entry_id(&self) -> &str {
            self.0
        }
        fn entry_name(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_starts_idle() {
        let controller: SelectionController<String> = SelectionController::new();
        assert_eq!(controller.active_id(), None);
        assert!(!controller.is_loading());
    }

    #[test]
    fn test_select_moves_to_loading() {
        let mut controller: SelectionController<String> = SelectionController::new();
        let ticket = controller.select("a");
        assert_eq!(ticket.id, "a");
        assert!(controller.is_loading());
        assert_eq!(controller.active_id(), Some("a"));
    }

    #[test]
    fn test_resolve_success_and_failure() {
        let mut controller: SelectionController<String> = SelectionController::new();
        let ticket = controller.select("a");
        assert!(controller.resolve(&ticket, Ok("detail-a".to_string())));
        assert_eq!(controller.detail(), Some(&"detail-a".to_string()));

        let ticket = controller.select("b");
        let applied = controller.resolve(
            &ticket,
            Err(MeadError::Transport {
                status: 500,
                body: "boom".into(),
            }),
        );
        assert!(applied);
        assert!(controller.error().is_some());
        assert_eq!(controller.active_id(), Some("b"));
    }

    /// 追い越されたレスポンスは破棄される
    #[test]
    fn test_stale_resolution_discarded() {
        let mut controller: SelectionController<String> = SelectionController::new();
        let ticket_a = controller.select("a");
        let ticket_b = controller.select("b");

        // bが先に解決し、その後に遅れてaが届く
        assert!(controller.resolve(&ticket_b, Ok("detail-b".to_string())));
        assert!(!controller.resolve(&ticket_a, Ok("detail-a".to_string())));

        assert_eq!(controller.active_id(), Some("b"));
        assert_eq!(controller.detail(), Some(&"detail-b".to_string()));
    }

    #[test]
    fn test_sync_seeds_first_item_when_idle() {
        let mut controller: SelectionController<String> = SelectionController::new();
        let ticket = controller.sync_filtered(&[Entry("a"), Entry("b")]);
        assert_eq!(ticket.map(|t| t.id), Some("a".to_string()));
        assert_eq!(controller.active_id(), Some("a"));
    }

    #[test]
    fn test_sync_keeps_selection_still_present() {
        let mut controller: SelectionController<String> = SelectionController::new();
        let ticket = controller.select("b");
        assert!(controller.resolve(&ticket, Ok("detail-b".to_string())));

        let reseed = controller.sync_filtered(&[Entry("a"), Entry("b")]);
        assert!(reseed.is_none());
        assert_eq!(controller.active_id(), Some("b"));
        // 取得済みの詳細もそのまま
        assert!(controller.detail().is_some());
    }

    /// 同期後のactive_idは常にNoneか絞り込み結果のメンバー
    #[test]
    fn test_sync_reseeds_when_selection_filtered_out() {
        let mut controller: SelectionController<String> = SelectionController::new();
        let ticket = controller.select("b");
        controller.resolve(&ticket, Ok("detail-b".to_string()));

        let reseed = controller.sync_filtered(&[Entry("c"), Entry("d")]);
        assert_eq!(reseed.map(|t| t.id), Some("c".to_string()));
        assert_eq!(controller.active_id(), Some("c"));
        assert!(controller.is_loading());
    }

    #[test]
    fn test_sync_empty_set_goes_idle() {
        let mut controller: SelectionController<String> = SelectionController::new();
        let ticket = controller.select("a");
        let empty: Vec<Entry> = vec![];
        assert!(controller.sync_filtered(&empty).is_none());
        assert_eq!(controller.active_id(), None);

        // Idle化で世代が進んでいるため、残っていた取得は反映されない
        assert!(!controller.resolve(&ticket, Ok("detail-a".to_string())));
        assert_eq!(controller.active_id(), None);
    }

    #[test]
    fn test_reselect_same_id_refetches() {
        let mut controller: SelectionController<String> = SelectionController::new();
        let old = controller.select("a");
        let new = controller.select("a");
        assert!(!controller.resolve(&old, Ok("stale".to_string())));
        assert!(controller.resolve(&new, Ok("fresh".to_string())));
        assert_eq!(controller.detail(), Some(&"fresh".to_string()));
    }
}
