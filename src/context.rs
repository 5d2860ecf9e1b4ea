//! Page Context Module
//!
//! The context bundles everything setup code and event handlers share:
//! configuration, backend, timers, the event registry, the document, and the
//! compiled templates. It is created once at page initialization and passed
//! explicitly; there is no global event manager.

use crate::api::MovieApi;
use crate::batch::{BatchLoader, EventRegistry, TriggerBinding, UnitFactory};
use crate::cards::CardTemplates;
use crate::config::{Config, LoaderConfig};
use crate::dom::{Document, RatingPanel};
use crate::error::PageError;
use crate::scheduler::Timers;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared handles for one page
#[derive(Clone)]
pub struct PageContext {
    pub config: Arc<Config>,
    pub api: Arc<dyn MovieApi>,
    pub timers: Arc<dyn Timers>,
    pub events: Arc<EventRegistry>,
    pub document: Arc<RwLock<Document>>,
    pub templates: Arc<CardTemplates>,
}

impl PageContext {
    /// Creates the context and the page skeleton
    ///
    /// The document starts with the configured main and modal containers;
    /// lazy images follow `page.lazy_images`.
    ///
    /// # Returns
    /// An error if the embedded templates fail to compile
    pub fn new(
        config: Config,
        api: Arc<dyn MovieApi>,
        timers: Arc<dyn Timers>,
    ) -> Result<Self, PageError> {
        let mut document = Document::with_containers([
            config.page.main_container.as_str(),
            config.page.modal_container.as_str(),
        ]);
        document.set_lazy_images(config.page.lazy_images);
        document.set_rating_panel(RatingPanel::new(
            &config.page.rating_count_selector,
            &config.page.ready_note_selector,
        ));

        Ok(Self {
            config: Arc::new(config),
            api,
            timers,
            events: Arc::new(EventRegistry::new()),
            document: Arc::new(RwLock::new(document)),
            templates: Arc::new(CardTemplates::new()?),
        })
    }

    /// Build a loader wired to this page's timers and event registry
    pub fn loader<T: Send + 'static>(
        &self,
        name: impl Into<String>,
        settings: LoaderConfig,
        binding: TriggerBinding,
        factory: Arc<dyn UnitFactory<T>>,
    ) -> BatchLoader<T> {
        BatchLoader::new(
            name,
            settings,
            binding,
            factory,
            self.timers.clone(),
            self.events.clone(),
        )
    }

    /// Serialize the current page
    pub async fn render_html(&self) -> Result<String, PageError> {
        let document = self.document.read().await;
        Ok(self.templates.render_page(&document)?)
    }

    /// Scroll binding using the profile's offset
    pub fn scroll_binding(settings: &LoaderConfig) -> TriggerBinding {
        TriggerBinding::Scroll {
            offset_px: settings.scroll_offset_px,
        }
    }
}
