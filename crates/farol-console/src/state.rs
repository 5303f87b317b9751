//! # Order Draft State
//!
//! Holds the order dialog's working set between actions.
//!
//! ## Thread Safety
//! The draft is wrapped in `Arc<Mutex<T>>` because:
//! 1. Several actions read and edit the same draft
//! 2. Only one of them may edit it at a time
//! 3. Actions can run concurrently
//!
//! ## Draft Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Draft State Operations                               │
//! │                                                                         │
//! │  Dialog Action            Console Action            Draft Change        │
//! │  ─────────────            ──────────────            ────────────        │
//! │                                                                         │
//! │  Add service ────────────► add_service_line() ────► services.push()    │
//! │                                                                         │
//! │  Add part ───────────────► add_part_line() ───────► merge or push      │
//! │                                                                         │
//! │  Change quantity ────────► update_part_line() ────► items[i].qty = n   │
//! │                                                                         │
//! │  Save order ─────────────► create_order() ────────► clear() on success │
//! │                                                                         │
//! │  Open existing order ────► open_order() ──────────► load(lines)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use farol_core::OrderDraft;

/// Shared order draft.
///
/// Cloning shares the same draft. A poisoned lock means an action panicked
/// mid-edit; that is a bug, not a recoverable condition.
#[derive(Debug, Clone, Default)]
pub struct DraftState {
    draft: Arc<Mutex<OrderDraft>>,
}

impl DraftState {
    /// Creates a state holding an empty draft.
    pub fn new() -> Self {
        DraftState::default()
    }

    /// Executes a function with read access to the draft.
    ///
    /// ## Usage
    /// ```rust
    /// use farol_console::state::DraftState;
    ///
    /// let drafts = DraftState::new();
    /// assert!(drafts.with_draft(|d| d.is_empty()));
    /// ```
    pub fn with_draft<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&OrderDraft) -> R,
    {
        let draft = self.draft.lock().expect("Draft mutex poisoned");
        f(&draft)
    }

    /// Executes a function with write access to the draft.
    pub fn with_draft_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut OrderDraft) -> R,
    {
        let mut draft = self.draft.lock().expect("Draft mutex poisoned");
        f(&mut draft)
    }

    /// Copy of the current draft.
    pub fn snapshot(&self) -> OrderDraft {
        self.with_draft(Clone::clone)
    }

    /// Replaces the draft (opening an existing order).
    pub fn replace(&self, draft: OrderDraft) {
        self.with_draft_mut(|d| *d = draft);
    }

    pub fn clear(&self) {
        self.with_draft_mut(OrderDraft::clear);
    }

    /// Clears the draft only if it still holds exactly the lines that were
    /// submitted. Edits made while the save was in flight are kept.
    ///
    /// Returns whether the draft was cleared.
    pub fn clear_if_unchanged(&self, submitted: &OrderDraft) -> bool {
        self.with_draft_mut(|d| {
            if d == submitted {
                d.clear();
                true
            } else {
                false
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farol_core::Money;

    #[test]
    fn test_clones_share_the_draft() {
        let drafts = DraftState::new();
        let other = drafts.clone();

        other
            .with_draft_mut(|d| d.add_service("alinhamento", Money::from_cents(8000)))
            .unwrap();

        assert_eq!(drafts.with_draft(|d| d.services().len()), 1);
        assert_eq!(drafts.snapshot().totals(Money::zero()).final_total.cents(), 8000);

        drafts.clear();
        assert!(other.with_draft(OrderDraft::is_empty));
    }

    #[test]
    fn test_clear_if_unchanged() {
        let drafts = DraftState::new();
        drafts
            .with_draft_mut(|d| d.add_service("revisão", Money::from_cents(12000)))
            .unwrap();

        let submitted = drafts.snapshot();
        assert!(drafts.clear_if_unchanged(&submitted));
        assert!(drafts.with_draft(OrderDraft::is_empty));

        drafts
            .with_draft_mut(|d| d.add_service("revisão", Money::from_cents(12000)))
            .unwrap();
        let submitted = drafts.snapshot();
        drafts
            .with_draft_mut(|d| d.add_service("lavagem", Money::from_cents(5000)))
            .unwrap();

        assert!(!drafts.clear_if_unchanged(&submitted));
        assert_eq!(drafts.with_draft(|d| d.services().len()), 2);
    }

    #[test]
    fn test_concurrent_edits() {
        let drafts = DraftState::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let drafts = drafts.clone();
                std::thread::spawn(move || {
                    drafts
                        .with_draft_mut(|d| d.add_service(&format!("serviço {i}"), Money::from_cents(100)))
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(drafts.with_draft(|d| d.totals(Money::zero()).services_total.cents()), 800);
    }
}
