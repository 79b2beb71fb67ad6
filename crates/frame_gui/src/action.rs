//! Deferred builder actions
//!
//! Builder calls are recorded as [`BuilderAction`]s and executed by
//! [`ChestGuiBuilder::build`](crate::builder::ChestGuiBuilder::build) in
//! [`ActionKind`] order. Actions of the same kind keep their call order.

use crate::builder::PageScope;
use crate::config::GuiSetting;
use crate::event::{ClickHandler, CloseHandler, OpenHandler};
use crate::item::GuiItem;
use frame_core::{PageId, SlotIndex};

/// Body of a page block
pub type PageBlock = Box<dyn FnOnce(&mut PageScope<'_>)>;

/// Execution category, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionKind {
    /// Navigation templates and slot reservation
    Navigation,
    /// GUI-wide open/close/click handlers
    GlobalEvent,
    /// Items on the global page
    GlobalItems,
    /// Page blocks
    PageItems,
    /// Handlers applied to every page
    PageEvent,
    /// Navigation buttons and page registration
    Finalize,
}

/// A recorded builder call
pub enum BuilderAction {
    Navigation,
    GlobalOpen(OpenHandler),
    GlobalClose(CloseHandler),
    GlobalClick(ClickHandler),
    AddItem {
        item: GuiItem,
        on_click: Option<ClickHandler>,
    },
    SetItem {
        slots: Vec<SlotIndex>,
        item: GuiItem,
    },
    AddPage {
        id: Option<PageId>,
        setting: Option<GuiSetting>,
        block: PageBlock,
    },
    PageOpen(OpenHandler),
    PageClose(CloseHandler),
    Finalize,
}

impl BuilderAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            BuilderAction::Navigation => ActionKind::Navigation,
            BuilderAction::GlobalOpen(_) | BuilderAction::GlobalClose(_) | BuilderAction::GlobalClick(_) => {
                ActionKind::GlobalEvent
            }
            BuilderAction::AddItem { .. } | BuilderAction::SetItem { .. } => ActionKind::GlobalItems,
            BuilderAction::AddPage { .. } => ActionKind::PageItems,
            BuilderAction::PageOpen(_) | BuilderAction::PageClose(_) => ActionKind::PageEvent,
            BuilderAction::Finalize => ActionKind::Finalize,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            BuilderAction::Navigation => "navigation",
            BuilderAction::GlobalOpen(_) => "global open handler",
            BuilderAction::GlobalClose(_) => "global close handler",
            BuilderAction::GlobalClick(_) => "global click handler",
            BuilderAction::AddItem { .. } => "add item",
            BuilderAction::SetItem { .. } => "set item",
            BuilderAction::AddPage { .. } => "page block",
            BuilderAction::PageOpen(_) => "page open handler",
            BuilderAction::PageClose(_) => "page close handler",
            BuilderAction::Finalize => "finalize",
        }
    }
}

impl core::fmt::Debug for BuilderAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}({})", self.kind(), self.label())
    }
}

/// Ordered list of recorded actions
#[derive(Debug, Default)]
pub struct ActionQueue {
    actions: Vec<BuilderAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: BuilderAction) {
        self.actions.push(action);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Take every action, stably sorted by kind
    pub fn into_sorted(mut self) -> Vec<BuilderAction> {
        self.actions.sort_by_key(BuilderAction::kind);
        self.actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn empty_page(_: &mut PageScope<'_>) {}

    #[test]
    fn test_sort_is_stable_by_kind() {
        let mut queue = ActionQueue::new();
        queue.push(BuilderAction::Finalize);
        queue.push(BuilderAction::AddPage {
            id: Some(PageId(2)),
            setting: None,
            block: Box::new(empty_page),
        });
        queue.push(BuilderAction::AddItem {
            item: GuiItem::new("A", "first"),
            on_click: None,
        });
        queue.push(BuilderAction::PageOpen(Arc::new(|_: &mut crate::event::OpenEvent| {})));
        queue.push(BuilderAction::AddItem {
            item: GuiItem::new("B", "second"),
            on_click: None,
        });
        queue.push(BuilderAction::Navigation);
        queue.push(BuilderAction::GlobalClick(Arc::new(|_: &mut crate::event::ClickEvent| {})));

        let sorted = queue.into_sorted();
        let kinds: Vec<ActionKind> = sorted.iter().map(BuilderAction::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ActionKind::Navigation,
                ActionKind::GlobalEvent,
                ActionKind::GlobalItems,
                ActionKind::GlobalItems,
                ActionKind::PageItems,
                ActionKind::PageEvent,
                ActionKind::Finalize,
            ]
        );
        let names: Vec<&str> = sorted
            .iter()
            .filter_map(|a| match a {
                BuilderAction::AddItem { item, .. } => Some(item.name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
