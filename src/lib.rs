//! TaskTagger Library
//!
//! Summarizes, tags and prioritizes free-text tasks using a remote language
//! model, with a deterministic rule-based fallback.

pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod processor;
pub mod record;
pub mod samples;

pub use error::{TaggerError, TaggerResult};
pub use processor::{Outcome, Source, TaskProcessor};
pub use record::{ClassificationRecord, Priority};
