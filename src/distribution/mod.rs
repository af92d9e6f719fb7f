//! Pure allocation logic for Random claim events.

pub mod engine;

pub use engine::{distribute, distribute_with};
