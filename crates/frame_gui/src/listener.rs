//! Host event routing
//!
//! The host forwards every inventory event here. Events are routed to the
//! owning [`GuiHandler`] by the handler id the inventory carries; anything
//! without an owner we know is ignored.

use crate::event::ClickType;
use crate::handler::{ClickOutcome, GuiHandler};
use crate::host::{Host, InventoryRef};
use frame_core::{HandlerId, SlotIndex, ViewerId};
use std::collections::HashMap;

/// Registry of live GUI handlers
#[derive(Debug, Default)]
pub struct GuiListener {
    handlers: HashMap<HandlerId, GuiHandler>,
    deferred: Vec<(HandlerId, ViewerId)>,
}

impl GuiListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a started handler
    pub fn register(&mut self, handler: GuiHandler) -> HandlerId {
        let id = handler.id();
        log::debug!("Registered GUI {} ('{}')", id, handler.setting().title);
        self.handlers.insert(id, handler);
        id
    }

    pub fn handler(&self, id: HandlerId) -> Option<&GuiHandler> {
        self.handlers.get(&id)
    }

    pub fn handler_mut(&mut self, id: HandlerId) -> Option<&mut GuiHandler> {
        self.handlers.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Closes waiting for [`run_deferred`](Self::run_deferred)
    pub fn pending_closes(&self) -> usize {
        self.deferred.len()
    }

    fn owner_of(&mut self, inventory: InventoryRef) -> Option<&mut GuiHandler> {
        let owner = inventory.owner?;
        self.handlers.get_mut(&owner).filter(|h| h.owns(inventory.key))
    }

    /// `viewer` opened `inventory`
    pub fn on_open(&mut self, viewer: ViewerId, inventory: InventoryRef, host: &mut dyn Host) {
        if let Some(handler) = self.owner_of(inventory) {
            handler.on_open(viewer, host);
        }
    }

    /// `viewer` clicked `slot` while `inventory` was open.
    ///
    /// `clicked` is the inventory the click landed in, `None` outside the
    /// window. Clicks that did not land in the GUI inventory itself, such
    /// as those in the viewer's own inventory, are ignored.
    pub fn on_click(
        &mut self,
        viewer: ViewerId,
        inventory: InventoryRef,
        clicked: Option<InventoryRef>,
        slot: SlotIndex,
        click: ClickType,
        host: &mut dyn Host,
    ) -> ClickOutcome {
        if clicked.map(|c| c.key) != Some(inventory.key) {
            return ClickOutcome::default();
        }
        match self.owner_of(inventory) {
            Some(handler) => handler.on_click(viewer, slot, click, host),
            None => ClickOutcome::default(),
        }
    }

    /// `viewer` closed `inventory`. The close completes on the next
    /// [`run_deferred`](Self::run_deferred).
    pub fn on_close(&mut self, viewer: ViewerId, inventory: InventoryRef, host: &mut dyn Host) {
        if let Some(handler) = self.owner_of(inventory) {
            handler.on_close(viewer, host);
            let id = handler.id();
            self.deferred.push((id, viewer));
        }
    }

    /// Finish queued closes; call once per server tick. Handlers left
    /// without viewers are dropped.
    pub fn run_deferred(&mut self, host: &mut dyn Host) {
        for (id, viewer) in std::mem::take(&mut self.deferred) {
            if let Some(handler) = self.handlers.get_mut(&id) {
                handler.complete_close(viewer, host);
            }
        }
        self.handlers.retain(|id, handler| {
            let alive = handler.viewer_count() > 0;
            if !alive {
                log::debug!("Dropping GUI {} with no viewers", id);
            }
            alive
        });
    }
}
