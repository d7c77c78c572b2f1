//! Product collections: parsing, GL number merging and display shaping.
//!
//! All functions here are pure. They are recomputed from a received
//! collection whenever a view needs them, never patched in place.

pub mod display;
pub mod model;
pub mod normalize;

pub use display::*;
pub use model::*;
pub use normalize::*;
