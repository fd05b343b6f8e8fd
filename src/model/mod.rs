//! Pure data structures shared by the sync layer and the remote service.

pub mod product;

pub use product::*;
