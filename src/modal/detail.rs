use crate::batch::{TriggerBinding, UnitFactory};
use crate::cards::{CardKind, DetailView, MovieCardFactory};
use crate::context::PageContext;
use crate::dom::ModalView;
use crate::error::PageError;
use crate::types::{MovieDetail, MovieId};
use std::sync::Arc;
use tracing::{debug, info};

/// Split an overview after `limit` characters
///
/// The hidden part is empty when the overview fits.
pub fn split_overview(overview: &str, limit: usize) -> (String, String) {
    match overview.char_indices().nth(limit) {
        Some((at, _)) => (overview[..at].to_string(), overview[at..].to_string()),
        None => (overview.to_string(), String::new()),
    }
}

/// A 0-10 score as a rounded percentage, `-` when unknown
pub fn score_percent(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("{}%", (score * 10.0).round() as i64),
        None => "-".to_string(),
    }
}

fn similar_selector(movie_id: MovieId) -> String {
    format!("#container-sim-{movie_id}")
}

/// Opens, toggles, and closes detail modals
#[derive(Clone)]
pub struct DetailModal {
    ctx: PageContext,
}

impl DetailModal {
    pub fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }

    /// Show the modal for `movie_id`, fetching it the first time
    pub async fn show(&self, movie_id: MovieId) -> Result<(), PageError> {
        if let Ok(modal) = self.ctx.document.write().await.modal_mut(movie_id) {
            modal.shown = true;
            debug!(movie = %movie_id, "modal reopened");
            return Ok(());
        }

        let detail = self.ctx.api.movie_detail(movie_id).await?;
        let modal = self.render(detail)?;

        let mut document = self.ctx.document.write().await;
        // Another show may have finished while the fetch was in flight
        if let Ok(existing) = document.modal_mut(movie_id) {
            existing.shown = true;
            return Ok(());
        }
        document.insert_modal(modal);
        info!(movie = %movie_id, "modal opened");
        Ok(())
    }

    /// Hide every shown modal, then show `movie_id`
    ///
    /// Used for cards clicked inside a modal's similar-items list.
    pub async fn open_from_modal(&self, movie_id: MovieId) -> Result<(), PageError> {
        {
            let mut document = self.ctx.document.write().await;
            for shown in document.shown_modals() {
                reset(document.modal_mut(shown)?);
            }
        }
        self.show(movie_id).await
    }

    /// Expand or collapse the overview tail
    ///
    /// # Returns
    /// Whether the overview is now expanded
    pub async fn toggle_overview(&self, movie_id: MovieId) -> Result<bool, PageError> {
        let mut document = self.ctx.document.write().await;
        let modal = document.modal_mut(movie_id)?;
        if modal.has_read_more {
            modal.overview_expanded = !modal.overview_expanded;
        }
        Ok(modal.overview_expanded)
    }

    /// Handle the "similar movies" button
    ///
    /// The first press loads the similar items with a detached loader; later
    /// presses only expand or collapse the container.
    pub async fn show_similar(&self, movie_id: MovieId) -> Result<(), PageError> {
        let (selector, items) = {
            let mut document = self.ctx.document.write().await;
            let modal = document.modal_mut(movie_id)?;
            let Some(selector) = modal.similar_selector.clone() else {
                return Ok(());
            };
            if modal.similar_loaded {
                modal.similar_expanded = !modal.similar_expanded;
                return Ok(());
            }
            modal.similar_loaded = true;
            modal.similar_expanded = true;
            (selector, modal.similar_items.clone())
        };

        let cards: Arc<dyn UnitFactory<MovieId>> = Arc::new(MovieCardFactory::new(
            CardKind::Poster,
            selector,
            self.ctx.clone(),
        ));
        let loader = self.ctx.loader(
            format!("similar {movie_id}"),
            self.ctx.config.loaders.similar,
            TriggerBinding::Detached,
            cards,
        );
        loader.initialize(items).await;
        Ok(())
    }

    /// Hide the modal and collapse its overview and similar list
    pub async fn dismiss(&self, movie_id: MovieId) -> Result<(), PageError> {
        let mut document = self.ctx.document.write().await;
        reset(document.modal_mut(movie_id)?);
        debug!(movie = %movie_id, "modal dismissed");
        Ok(())
    }

    fn render(&self, detail: MovieDetail) -> Result<ModalView, PageError> {
        let limit = self.ctx.config.page.overview_preview_chars;
        let (overview_visible, overview_hidden) = split_overview(&detail.overview, limit);
        let has_read_more = !overview_hidden.is_empty();
        let similar = (!detail.similar_items.is_empty()).then(|| similar_selector(detail.id));

        let view = DetailView {
            modal_id: format!("modal-{}", detail.id),
            card_id: format!("movie-card-detail-{}", detail.id),
            poster: detail.poster,
            title: detail.title,
            title_kr: detail.title_kr,
            release_year: detail.release_year.map(|year| year.to_string()).unwrap_or_default(),
            genres: detail.genres.join(", "),
            runtime: detail.runtime.map(|minutes| minutes.to_string()).unwrap_or_default(),
            countries: detail.countries.join(", "),
            actors: detail.actors.join(", "),
            directors: detail.directors.join(", "),
            imdb_percent: score_percent(detail.imdb_score),
            tmdb_percent: score_percent(detail.tmdb_score),
            overview_visible,
            overview_hidden,
            has_read_more,
            similar_container_id: similar
                .as_deref()
                .map(|selector| selector.trim_start_matches('#').to_string()),
        };

        Ok(ModalView {
            movie_id: detail.id,
            html: self.ctx.templates.render_detail(&view)?,
            shown: true,
            has_read_more,
            overview_expanded: false,
            similar_selector: similar,
            similar_items: detail.similar_items,
            similar_expanded: false,
            similar_loaded: false,
        })
    }
}

fn reset(modal: &mut ModalView) {
    modal.shown = false;
    modal.overview_expanded = false;
    modal.similar_expanded = false;
}
