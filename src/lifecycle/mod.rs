//! Starting and stopping the whole product sync stack.

pub mod product_system;

pub use product_system::*;
