//! Page Setup
//!
//! Each setup function checks that the main container exists, then creates
//! and initializes the page's top-level loader. The returned loader keeps
//! serving triggers through the context's event registry.

use crate::batch::{BatchLoader, UnitFactory};
use crate::cards::{CardKind, ContainerFactory, MovieCardFactory};
use crate::context::PageContext;
use crate::dom::DomError;
use crate::error::PageError;
use crate::types::{MovieId, RatingRecord, RecommendationGroup};
use std::sync::Arc;

/// Evaluation page: Star cards for unrated movies, loaded on scroll
pub async fn evaluate(
    ctx: &PageContext,
    ids: Vec<MovieId>,
) -> Result<BatchLoader<MovieId>, PageError> {
    let target = main_container(ctx).await?;
    let settings = ctx.config.loaders.vertical;
    let cards: Arc<dyn UnitFactory<MovieId>> =
        Arc::new(MovieCardFactory::new(CardKind::Star, target, ctx.clone()));

    let loader = ctx.loader("evaluate", settings, PageContext::scroll_binding(&settings), cards);
    loader.initialize(ids).await;
    Ok(loader)
}

/// Rating record page: Star cards that start at the recorded score
pub async fn rating_record(
    ctx: &PageContext,
    records: Vec<RatingRecord>,
) -> Result<BatchLoader<RatingRecord>, PageError> {
    let target = main_container(ctx).await?;
    let settings = ctx.config.loaders.rated;
    let cards: Arc<dyn UnitFactory<RatingRecord>> =
        Arc::new(MovieCardFactory::new(CardKind::Star, target, ctx.clone()));

    let loader = ctx.loader("rating record", settings, PageContext::scroll_binding(&settings), cards);
    loader.initialize(records).await;
    Ok(loader)
}

/// Home page: one arrowed carousel per recommendation group
pub async fn home(
    ctx: &PageContext,
    groups: Vec<RecommendationGroup>,
) -> Result<BatchLoader<RecommendationGroup>, PageError> {
    let target = main_container(ctx).await?;
    let settings = ctx.config.loaders.containers;
    let carousels: Arc<dyn UnitFactory<RecommendationGroup>> =
        Arc::new(ContainerFactory::new(target, ctx.clone()));

    let loader = ctx.loader("home", settings, PageContext::scroll_binding(&settings), carousels);
    loader.initialize(groups).await;
    Ok(loader)
}

async fn main_container(ctx: &PageContext) -> Result<String, PageError> {
    let selector = ctx.config.page.main_container.clone();
    if !ctx.document.read().await.has_container(&selector) {
        return Err(DomError::MissingContainer(selector).into());
    }
    Ok(selector)
}
