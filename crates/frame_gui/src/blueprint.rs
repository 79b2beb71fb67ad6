//! Reusable GUI definitions
//!
//! A [`ChestGui`] is a setting plus a builder block. It holds no runtime
//! state: every [`open`](ChestGui::open) runs the block again for that
//! viewer, so two viewers never share items, handlers or inventories.

use crate::builder::ChestGuiBuilder;
use crate::config::{FrameServices, GuiSetting};
use crate::host::Host;
use crate::listener::GuiListener;
use crate::session::GuiSession;
use frame_core::{HandlerId, PageId, Result};
use frame_style::{StyleSheet, Viewer};
use std::sync::Arc;

/// Builder block of a blueprint
pub type BuildBlock = Arc<dyn Fn(&mut ChestGuiBuilder) + Send + Sync>;

/// A chest GUI that can be opened any number of times
#[derive(Clone)]
pub struct ChestGui {
    setting: GuiSetting,
    block: BuildBlock,
}

impl ChestGui {
    pub fn new(
        rows: usize,
        title: impl Into<String>,
        block: impl Fn(&mut ChestGuiBuilder) + Send + Sync + 'static,
    ) -> Self {
        Self::with_setting(GuiSetting::new(rows, title), block)
    }

    pub fn with_setting(setting: GuiSetting, block: impl Fn(&mut ChestGuiBuilder) + Send + Sync + 'static) -> Self {
        Self {
            setting,
            block: Arc::new(block),
        }
    }

    pub fn setting(&self) -> &GuiSetting {
        &self.setting
    }

    pub(crate) fn block(&self) -> &BuildBlock {
        &self.block
    }

    /// Style context for `viewer`: the setting's sheet with the viewer set
    pub fn context_for(&self, viewer: Viewer) -> StyleSheet {
        self.setting.style.clone().with_viewer(viewer)
    }

    /// Build, render and show this GUI to `viewer`, starting on `page`.
    ///
    /// The new handler is registered with `listener`; its id is returned.
    pub fn open(
        &self,
        viewer: Viewer,
        page: Option<PageId>,
        services: &FrameServices,
        listener: &mut GuiListener,
        host: &mut dyn Host,
    ) -> Result<HandlerId> {
        let session = GuiSession::new(self, &self.context_for(viewer))?;
        let handler = session.start(page, services, host)?;
        Ok(listener.register(handler))
    }
}

impl core::fmt::Debug for ChestGui {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ChestGui").field("setting", &self.setting).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingHost;
    use crate::item::GuiItem;
    use frame_core::ViewerId;

    fn shop() -> ChestGui {
        ChestGui::new(1, "&6{player}'s shop", |gui| {
            gui.add_item(GuiItem::new("EMERALD", "{player}"));
        })
    }

    #[test]
    fn test_context_carries_viewer() {
        let viewer = Viewer::new(ViewerId::random(), "Alex");
        let context = shop().context_for(viewer.clone());
        assert_eq!(context.viewer, Some(viewer));
    }

    #[test]
    fn test_open_registers_handler() {
        let services = FrameServices::default();
        let mut listener = GuiListener::new();
        let mut host = RecordingHost::new();
        let viewer = Viewer::new(ViewerId::random(), "Alex");

        let id = shop()
            .open(viewer.clone(), None, &services, &mut listener, &mut host)
            .unwrap();
        let handler = listener.handler(id).unwrap();
        assert_eq!(handler.current_page(viewer.id), Some(PageId::GLOBAL));

        let shown = host.last_opened(viewer.id).unwrap();
        assert_eq!(shown.title, "§6Alex's shop");
        assert_eq!(shown.owner, id);
        assert_eq!(shown.names()[&0], "Alex");
    }
}
