//! Arrowed Container Factory
//!
//! Each recommendation group becomes a carousel appended to the parent
//! container. The carousel's inner container is then filled by its own
//! horizontal loader, bound to the carousel's right arrow. This is a loader
//! whose units spawn loaders.

use super::factory::MovieCardFactory;
use super::kind::CardKind;
use super::templates::CarouselView;
use crate::batch::{TriggerBinding, UnitFactory};
use crate::context::PageContext;
use crate::dom::Unit;
use crate::error::CardError;
use crate::types::{MovieId, RecommendationGroup};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Selector of the inner container of carousel number `index`
pub fn carousel_selector(index: usize) -> String {
    format!("#container-ac-{index}")
}

/// Creates one carousel per recommendation group
pub struct ContainerFactory {
    parent: String,
    ctx: PageContext,
    /// Carousels created so far; ids start at 1
    created: AtomicUsize,
}

impl ContainerFactory {
    pub fn new(parent: impl Into<String>, ctx: PageContext) -> Self {
        Self {
            parent: parent.into(),
            ctx,
            created: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl UnitFactory<RecommendationGroup> for ContainerFactory {
    async fn materialize(&self, group: RecommendationGroup) -> Result<(), CardError> {
        let index = self.created.fetch_add(1, Ordering::SeqCst) + 1;
        let selector = carousel_selector(index);

        // Step 1: Append the carousel and register its inner container
        {
            let view = CarouselView {
                index,
                label: group.label.join(" / "),
                count: group.items.len(),
                inner_id: selector.trim_start_matches('#').to_string(),
            };
            let html = self.ctx.templates.render_carousel(&view)?;
            let mut document = self.ctx.document.write().await;
            document.append(&self.parent, Unit::markup(format!("carousel-{index}"), None, html))?;
            document.add_container(&selector);
        }
        debug!(index, items = group.items.len(), "carousel appended");

        // Step 2: Fill it with a nested loader driven by the right arrow
        let settings = self.ctx.config.loaders.horizontal;
        let cards: Arc<dyn UnitFactory<MovieId>> =
            Arc::new(MovieCardFactory::new(CardKind::Simple, selector.clone(), self.ctx.clone()));
        let loader = self.ctx.loader(
            format!("carousel {index}"),
            settings,
            TriggerBinding::NextArrow { container: selector },
            cards,
        );
        loader.initialize(group.items).await;
        Ok(())
    }
}
