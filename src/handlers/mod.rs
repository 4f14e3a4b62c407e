// handlers/mod.rs - HTTP handlers
//
// Public handlers (root, health) need no token; everything under /api sits
// behind the JWT middleware, and the commons handlers pick their own role
// requirement through their extractors.
pub mod commons;
pub mod health;

pub use health::{health, root};
