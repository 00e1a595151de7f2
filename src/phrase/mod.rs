//! Keyword and phrase matching
//!
//! Keys are compiled into a [`patterns::PatternSet`] once and matched
//! against any number of documents with a [`matcher::PhraseMatcher`].

pub mod matcher;
pub mod patterns;

pub use matcher::{Match, MatchSpan, PhraseMatcher};
pub use patterns::{build_patterns, MatchMode, Pattern, PatternSet, DEFAULT_LABEL};
