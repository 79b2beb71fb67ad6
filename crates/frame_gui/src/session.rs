//! Per-viewer GUI sessions
//!
//! A session binds a blueprint to one viewer's style context. Starting it
//! runs the builder, renders the pages for that viewer and opens the first
//! one; the result is a live [`GuiHandler`].

use crate::blueprint::{BuildBlock, ChestGui};
use crate::builder::ChestGuiBuilder;
use crate::config::{FrameServices, GuiSetting};
use crate::handler::GuiHandler;
use crate::host::Host;
use crate::render::PageRenderer;
use frame_core::{FrameError, PageId, Result, ViewerId, IDS};
use frame_style::StyleSheet;

/// A blueprint bound to one viewer
pub struct GuiSession {
    setting: GuiSetting,
    block: BuildBlock,
    context: StyleSheet,
    viewer: ViewerId,
}

impl GuiSession {
    /// Bind `blueprint` to `context`, which must name a viewer.
    ///
    /// The context is copied; later edits to the caller's sheet do not
    /// affect the session.
    pub fn new(blueprint: &ChestGui, context: &StyleSheet) -> Result<Self> {
        let viewer = context.viewer.as_ref().map(|v| v.id).ok_or(FrameError::MissingViewer)?;
        Ok(Self {
            setting: blueprint.setting().clone(),
            block: blueprint.block().clone(),
            context: context.clone(),
            viewer,
        })
    }

    pub fn viewer(&self) -> ViewerId {
        self.viewer
    }

    pub fn context(&self) -> &StyleSheet {
        &self.context
    }

    /// Build and render the GUI, then open `initial` (or the first page)
    pub fn start(self, initial: Option<PageId>, services: &FrameServices, host: &mut dyn Host) -> Result<GuiHandler> {
        let mut builder = ChestGuiBuilder::new(self.setting);
        builder.debugging(services.config.debugging);
        (self.block)(&mut builder);
        let model = builder.build()?;

        let renderer = PageRenderer::new(services.style.clone(), services.profiles.clone(), &self.context);
        let mut handler = GuiHandler::new(IDS.next_handler(), model, renderer, &services.config.sounds);

        let page = handler.initial_page(initial);
        handler.render_initial(page);
        if !handler.open(self.viewer, page, host) {
            log::warn!("GUI '{}' has no page {} to open", handler.setting().title, page);
        }
        Ok(handler)
    }
}

impl core::fmt::Debug for GuiSession {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GuiSession")
            .field("setting", &self.setting)
            .field("viewer", &self.viewer)
            .finish()
    }
}
