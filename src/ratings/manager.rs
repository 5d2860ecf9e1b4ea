//! Rating Manager
//!
//! Sends a rating to the backend and reflects the acknowledged result on the
//! page. A score of 0 removes the rating.

use crate::context::PageContext;
use crate::error::PageError;
use crate::types::{MovieId, RatingAck};
use tracing::{info, warn};

/// Submits ratings for one page
#[derive(Clone)]
pub struct RatingManager {
    ctx: PageContext,
}

impl RatingManager {
    pub fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }

    /// Submit `score` for `movie_id`
    ///
    /// # Arguments
    /// * `movie_id` - Rated movie
    /// * `score` - New score; 0 removes the rating
    ///
    /// # Returns
    /// The backend acknowledgement. On failure nothing on the page changes.
    pub async fn submit(&self, movie_id: MovieId, score: f32) -> Result<RatingAck, PageError> {
        // Step 1: Call the backend, no lock held
        let result = if score == 0.0 {
            self.ctx.api.remove_rating(movie_id).await
        } else {
            self.ctx.api.save_rating(movie_id, score).await
        };
        let ack = match result {
            Ok(ack) => ack,
            Err(e) => {
                warn!(movie = %movie_id, score, error = %e, "rating not saved");
                return Err(e.into());
            }
        };

        // Step 2: Reflect the acknowledged state
        let threshold = self.ctx.config.page.unlock_threshold;
        let mut document = self.ctx.document.write().await;
        if let Some(widget) = document.widget_mut(movie_id) {
            widget.score = score;
        }
        let panel = document.rating_panel_mut();
        panel.count = Some(ack.rating_count);
        if ack.rating_count >= threshold {
            panel.ready_note_visible = true;
        }

        info!(movie = %movie_id, score, rating_count = ack.rating_count, "rating saved");
        Ok(ack)
    }
}
