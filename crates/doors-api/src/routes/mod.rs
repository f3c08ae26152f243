//! # API Route Modules
//!
//! - `games` — Game lifecycle and door transitions.

pub mod games;
