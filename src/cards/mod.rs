//! Card Rendering Module
//!
//! This module turns queued items into rendered units:
//! - CardKind: Closed set of card variants with a single dispatch table
//! - CardTemplates: Handlebars templates for cards, carousels, and detail modals
//! - MovieCardFactory: Fetches a movie and appends its card to a container
//! - ContainerFactory: Appends an arrowed carousel and fills it with a nested loader

mod container;
mod factory;
mod kind;
mod templates;


pub use container::{ContainerFactory, carousel_selector};
pub use factory::{CardRequest, MovieCardFactory};
pub use kind::{CardKind, CardLayout, PostRenderHook, RenderedCard};
pub use templates::{CardTemplates, CardView, CarouselView, DetailView, StarView};
