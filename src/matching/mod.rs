//! Matching utilities for person lookup.
//!
//! This module provides fuzzy matching on names and exact matching on
//! phone numbers.

pub mod person_matcher;

pub use person_matcher::{MatchResult, MatchType, PersonMatcher, PersonQuery};
