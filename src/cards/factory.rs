//! Movie Card Factory
//!
//! Materializes one movie card: fetch the lite payload, append the card view
//! to the target container, then run the variant's hook. The markup itself is
//! produced when the page is rendered.

use super::kind::{CardKind, RenderedCard};
use super::templates::CardView;
use crate::batch::UnitFactory;
use crate::context::PageContext;
use crate::dom::Unit;
use crate::error::CardError;
use crate::ratings::StarPalette;
use crate::types::{MovieId, RatingRecord};
use async_trait::async_trait;
use tracing::debug;

/// What a card needs besides the fetched movie
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardRequest {
    pub movie_id: MovieId,
    /// Score the star widget starts at (0 = unrated)
    pub initial_score: f32,
    pub palette: StarPalette,
}

impl From<MovieId> for CardRequest {
    fn from(movie_id: MovieId) -> Self {
        Self {
            movie_id,
            initial_score: 0.0,
            palette: StarPalette::Standard,
        }
    }
}

impl From<RatingRecord> for CardRequest {
    /// Already-rated movies start at their score and use the alternate colours
    fn from(record: RatingRecord) -> Self {
        Self {
            movie_id: record.movie,
            initial_score: record.score,
            palette: StarPalette::Alternate,
        }
    }
}

/// Appends cards of one kind to one container
pub struct MovieCardFactory {
    kind: CardKind,
    target: String,
    ctx: PageContext,
}

impl MovieCardFactory {
    pub fn new(kind: CardKind, target: impl Into<String>, ctx: PageContext) -> Self {
        Self {
            kind,
            target: target.into(),
            ctx,
        }
    }
}

#[async_trait]
impl<T> UnitFactory<T> for MovieCardFactory
where
    T: Into<CardRequest> + Send + 'static,
{
    async fn materialize(&self, item: T) -> Result<(), CardError> {
        let request: CardRequest = item.into();
        let movie = self.ctx.api.movie_lite(request.movie_id).await?;

        let card_id = self.kind.card_id(request.movie_id);
        let mut document = self.ctx.document.write().await;
        let view = CardView {
            card_id: card_id.clone(),
            movie_id: request.movie_id.0,
            title_kr: movie.title_kr,
            release_year: movie.release_year.map(|year| year.to_string()).unwrap_or_default(),
            poster: movie.poster,
            rating_id: format!("rating-{}", request.movie_id),
            lazy: self.kind.uses_lazy_image() && document.lazy().is_enabled(),
            stars: None,
        };
        let layout = self.kind.layout();
        document.append(
            &self.target,
            Unit::card(card_id.clone(), request.movie_id, layout.template, view),
        )?;

        if let Some(hook) = layout.post_render {
            hook(&mut document, &RenderedCard { card_id, request });
        }
        debug!(kind = ?self.kind, movie = %request.movie_id, target = %self.target, "card rendered");
        Ok(())
    }
}
