//! Data models for the seller console.
//!
//! Documents use camelCase field names to match the stored and served JSON.

mod prediction;
mod product;
mod seller;
mod view;

pub use prediction::*;
pub use product::*;
pub use seller::*;
pub use view::*;
