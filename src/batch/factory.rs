//! Unit Factory Module
//!
//! A unit factory turns one queued item into one rendered unit. An `Err`
//! tells the loader the unit was skipped, so it can pull a replacement.

use crate::error::CardError;
use async_trait::async_trait;

/// Materializes queued items of type `T`
#[async_trait]
pub trait UnitFactory<T>: Send + Sync {
    /// Render `item` and append it to the factory's target container
    async fn materialize(&self, item: T) -> Result<(), CardError>;
}
