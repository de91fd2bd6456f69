//! Core classification modules
//!
//! Contains the controlled tag vocabulary, the keyword rule tables, the
//! rule-based fallback classifier and the remote LLM adapter.

pub mod fallback;
pub mod remote;
pub mod rules;
pub mod vocabulary;
