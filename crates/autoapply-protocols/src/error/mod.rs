//! Error types for the AutoApply protocol layer.

mod apply;
mod page;
mod store;

pub use apply::*;
pub use page::*;
pub use store::*;
