//! Event Handler
//!
//! `Page` is the single entry point for UI events. Events are handled one at
//! a time; each call runs to completion before the next.

use crate::batch::UiEvent;
use crate::context::PageContext;
use crate::error::PageError;
use crate::modal::DetailModal;
use crate::ratings::RatingManager;
use crate::types::PageSeed;
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Outcome of [`Page::load_all`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Trigger rounds fired
    pub rounds: usize,
    /// Whether every loader finished
    pub completed: bool,
}

/// A set-up page and its event routing
#[derive(Clone)]
pub struct Page {
    ctx: PageContext,
    modal: DetailModal,
    ratings: RatingManager,
}

impl Page {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            modal: DetailModal::new(ctx.clone()),
            ratings: RatingManager::new(ctx.clone()),
            ctx,
        }
    }

    pub fn context(&self) -> &PageContext {
        &self.ctx
    }

    /// Run the setup function matching `seed`
    pub async fn setup(&self, seed: PageSeed) -> Result<(), PageError> {
        match seed {
            PageSeed::Evaluate { movies } => {
                super::evaluate(&self.ctx, movies).await?;
            }
            PageSeed::RatingRecord { records } => {
                super::rating_record(&self.ctx, records).await?;
            }
            PageSeed::Home { groups } => {
                super::home(&self.ctx, groups).await?;
            }
        }
        Ok(())
    }

    /// Fire every bound trigger, round after round, until no loader is bound
    ///
    /// Each round fires one matching event per distinct binding, then waits
    /// out the longest configured cooldown on the page's timers. Gives up
    /// after `max_rounds` rounds.
    pub async fn load_all(&self, max_rounds: usize) -> LoadReport {
        let settle = self.ctx.config.loaders.longest_cooldown() + Duration::from_millis(10);
        let mut rounds = 0;

        while !self.ctx.events.is_empty() {
            if rounds == max_rounds {
                warn!(rounds, bound = self.ctx.events.len(), "giving up with loaders still bound");
                return LoadReport {
                    rounds,
                    completed: false,
                };
            }
            rounds += 1;

            let mut fired: Vec<UiEvent> = Vec::new();
            for binding in self.ctx.events.bindings() {
                let Some(event) = binding.firing_event() else {
                    continue;
                };
                if fired.contains(&event) {
                    continue;
                }
                fired.push(event.clone());
                if let Err(e) = self.dispatch(event).await {
                    warn!(error = %e, "event failed");
                }
            }
            self.ctx.timers.sleep(settle).await;
        }

        info!(rounds, "page fully loaded");
        LoadReport {
            rounds,
            completed: true,
        }
    }

    /// Route one UI event
    ///
    /// An error concerns only the event's own target; the rest of the page
    /// keeps working.
    pub async fn dispatch(&self, event: UiEvent) -> Result<(), PageError> {
        trace!(?event, "dispatching");
        match event {
            UiEvent::Scroll { .. } => {
                let fired = self.ctx.events.dispatch(&event).await;
                debug!(fired, "scroll handled");
            }
            UiEvent::ArrowClick {
                ref container,
                direction,
            } => {
                self.ctx
                    .document
                    .write()
                    .await
                    .scroll_container(container, direction)?;
                self.ctx.events.dispatch(&event).await;
            }
            UiEvent::Intersect { unit_id } => {
                self.ctx.document.write().await.intersect(&unit_id);
            }
            UiEvent::CardClick { movie_id, in_modal } => {
                if in_modal {
                    self.modal.open_from_modal(movie_id).await?;
                } else {
                    self.modal.show(movie_id).await?;
                }
            }
            UiEvent::ReadMore { movie_id } => {
                self.modal.toggle_overview(movie_id).await?;
            }
            UiEvent::ShowSimilar { movie_id } => self.modal.show_similar(movie_id).await?,
            UiEvent::DismissModal { movie_id } => self.modal.dismiss(movie_id).await?,
            UiEvent::Rate { movie_id, score } => {
                self.ratings.submit(movie_id, score).await?;
            }
        }
        Ok(())
    }
}
