//! The remote gateway contract and its actor-backed implementation.

pub mod gateway;
pub mod product_client;

pub use gateway::*;
pub use product_client::*;
