//! Terminal Space Invaders: pure game rules in `compute`, drawing in `display`.

pub mod compute;
pub mod display;
pub mod entities;
pub mod error;
pub mod input;
pub mod pacing;
