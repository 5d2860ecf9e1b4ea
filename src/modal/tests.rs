//! Tests for the detail modal

#[cfg(test)]
mod tests {
    use crate::{
        api::fake::{self, ApiCall, FakeMovieApi},
        context::testing,
        dom::DomError,
        error::PageError,
        modal::{DetailModal, score_percent, split_overview},
        types::MovieId,
    };

    /// Movie 1 lists 2..=15 as similar; the rest are plain
    fn backend() -> FakeMovieApi {
        let mut api = FakeMovieApi::with_movies(2..=15);
        let mut movie = fake::movie(1);
        movie.similar_items = (2..=15).map(MovieId).collect();
        movie.overview = "가".repeat(260);
        api.insert(movie);
        api
    }

    #[test]
    fn test_split_overview_counts_characters() {
        let (visible, hidden) = split_overview(&"가".repeat(260), 250);
        assert_eq!(visible.chars().count(), 250);
        assert_eq!(hidden.chars().count(), 10);

        let (visible, hidden) = split_overview("short", 250);
        assert_eq!(visible, "short");
        assert!(hidden.is_empty());
    }

    #[test]
    fn test_score_percent() {
        assert_eq!(score_percent(Some(8.04)), "80%");
        assert_eq!(score_percent(Some(7.25)), "73%");
        assert_eq!(score_percent(None), "-");
    }

    #[tokio::test]
    async fn test_show_fetches_once_and_reuses_modal() {
        let (ctx, api, _) = testing::page(backend());
        let modal = DetailModal::new(ctx.clone());

        modal.show(MovieId(2)).await.unwrap();
        modal.dismiss(MovieId(2)).await.unwrap();
        modal.show(MovieId(2)).await.unwrap();

        assert_eq!(api.calls(), vec![ApiCall::Detail(MovieId(2))]);
        let document = ctx.document.read().await;
        let view = document.modal(MovieId(2)).unwrap();
        assert!(view.shown);
        assert!(view.html.contains("id=\"modal-2\""));
        assert!(view.html.contains("75% (IMDB)"));
        assert!(!view.has_read_more);
        assert!(view.similar_selector.is_none());
    }

    #[tokio::test]
    async fn test_long_overview_gets_read_more() {
        let (ctx, _, _) = testing::page(backend());
        let modal = DetailModal::new(ctx.clone());
        modal.show(MovieId(1)).await.unwrap();

        assert!(ctx.document.read().await.modal(MovieId(1)).unwrap().has_read_more);
        assert!(modal.toggle_overview(MovieId(1)).await.unwrap());
        assert!(!modal.toggle_overview(MovieId(1)).await.unwrap());
    }

    #[tokio::test]
    async fn test_short_overview_does_not_toggle() {
        let (ctx, _, _) = testing::page(backend());
        let modal = DetailModal::new(ctx);
        modal.show(MovieId(3)).await.unwrap();

        assert!(!modal.toggle_overview(MovieId(3)).await.unwrap());
    }

    #[tokio::test]
    async fn test_similar_items_load_once_then_toggle() {
        let (ctx, api, _) = testing::page(backend());
        let modal = DetailModal::new(ctx.clone());
        modal.show(MovieId(1)).await.unwrap();

        modal.show_similar(MovieId(1)).await.unwrap();
        {
            let document = ctx.document.read().await;
            let similar = document.container("#container-sim-1").unwrap();
            // Similar profile renders 12 and never binds a trigger
            assert_eq!(similar.movie_ids(), (2..=13).map(MovieId).collect::<Vec<_>>());
            assert!(document.modal(MovieId(1)).unwrap().similar_expanded);
        }
        assert!(ctx.events.is_empty());

        let lite_calls = api.calls().len();
        modal.show_similar(MovieId(1)).await.unwrap();
        assert_eq!(api.calls().len(), lite_calls);
        assert!(!ctx.document.read().await.modal(MovieId(1)).unwrap().similar_expanded);
    }

    #[tokio::test]
    async fn test_dismiss_resets_sub_state() {
        let (ctx, _, _) = testing::page(backend());
        let modal = DetailModal::new(ctx.clone());
        modal.show(MovieId(1)).await.unwrap();
        modal.toggle_overview(MovieId(1)).await.unwrap();
        modal.show_similar(MovieId(1)).await.unwrap();

        modal.dismiss(MovieId(1)).await.unwrap();

        let document = ctx.document.read().await;
        let view = document.modal(MovieId(1)).unwrap();
        assert!(!view.shown);
        assert!(!view.overview_expanded);
        assert!(!view.similar_expanded);
        assert!(view.similar_loaded);
    }

    #[tokio::test]
    async fn test_open_from_modal_switches_modals() {
        let (ctx, _, _) = testing::page(backend());
        let modal = DetailModal::new(ctx.clone());
        modal.show(MovieId(1)).await.unwrap();

        modal.open_from_modal(MovieId(5)).await.unwrap();

        assert_eq!(ctx.document.read().await.shown_modals(), vec![MovieId(5)]);
    }

    #[tokio::test]
    async fn test_failed_fetch_opens_nothing() {
        let (ctx, _, _) = testing::page(backend().failing(4));
        let modal = DetailModal::new(ctx.clone());

        assert!(matches!(modal.show(MovieId(4)).await, Err(PageError::Fetch(_))));
        assert!(ctx.document.read().await.modal(MovieId(4)).is_none());
        assert!(matches!(
            modal.dismiss(MovieId(4)).await,
            Err(PageError::Dom(DomError::MissingModal(MovieId(4))))
        ));
    }
}
