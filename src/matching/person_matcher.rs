//! Person lookup by name or phone number.
//!
//! - Exact matching on phone numbers, compared by national significant digits
//! - Fuzzy name matching on "first last" and "last first" orderings
//! - Confidence scoring (0-100 scale, 100 reserved for phone matches)

use crate::domain::phone::canonicalize;
use crate::domain::CountryCode;
use crate::models::{Contact, Person};
use serde::Serialize;
use std::collections::HashMap;

/// A match result containing a person and its confidence score.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    /// The matched person
    pub person: Person,

    /// Confidence score (0-100, where 100 is an exact phone match)
    pub confidence: u8,

    /// Type of match that produced this result
    pub match_type: MatchType,
}

/// The type of match that was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    ExactPhone,
    FuzzyName,
}

/// Search parameters for person matching.
#[derive(Debug, Clone, Default)]
pub struct PersonQuery {
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Person matcher with fuzzy name and exact phone matching.
#[derive(Debug, Default)]
pub struct PersonMatcher;

impl PersonMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Find persons matching `query`, using `contacts` for phone lookups.
    ///
    /// Results are sorted by confidence (highest first), then by name, and
    /// truncated to `max_results`. Fuzzy matches below `min_confidence` are
    /// dropped; phone matches always pass.
    pub fn find_matches(
        &self,
        query: &PersonQuery,
        persons: &[Person],
        contacts: &[Contact],
        max_results: usize,
        min_confidence: u8,
    ) -> Vec<MatchResult> {
        let phones: HashMap<i64, &str> = contacts
            .iter()
            .map(|c| (c.person_id, c.phone_number.as_str()))
            .collect();
        let query_phone = query
            .phone
            .as_deref()
            .map(Self::normalize_phone)
            .filter(|p| !p.is_empty());

        let mut results: Vec<MatchResult> = Vec::new();

        for person in persons {
            if let (Some(wanted), Some(phone)) = (&query_phone, phones.get(&person.id)) {
                if Self::normalize_phone(phone) == *wanted {
                    results.push(MatchResult {
                        person: person.clone(),
                        confidence: 100,
                        match_type: MatchType::ExactPhone,
                    });
                    continue;
                }
            }

            if let Some(name) = &query.name {
                if let Some(confidence) = self.fuzzy_match_person(name, person) {
                    if confidence >= min_confidence {
                        results.push(MatchResult {
                            person: person.clone(),
                            confidence,
                            match_type: MatchType::FuzzyName,
                        });
                    }
                }
            }
        }

        results.sort_by(|a, b| {
            b.confidence
                .cmp(&a.confidence)
                .then_with(|| a.person.last_name.cmp(&b.person.last_name))
                .then_with(|| a.person.first_name.cmp(&b.person.first_name))
        });
        results.truncate(max_results);

        results
    }

    /// Best fuzzy score over both name orderings.
    fn fuzzy_match_person(&self, query: &str, person: &Person) -> Option<u8> {
        let query = Self::normalize_name(query);
        let forward = Self::normalize_name(&format!("{} {}", person.first_name, person.last_name));
        let reverse = Self::normalize_name(&format!("{} {}", person.last_name, person.first_name));

        let score = Self::calculate_fuzzy_score(&query, &forward)
            .max(Self::calculate_fuzzy_score(&query, &reverse));

        if score > 0 {
            Some(score)
        } else {
            None
        }
    }

    /// Calculate fuzzy match score using Levenshtein distance and substring matching.
    ///
    /// Returns a confidence score from 0-95 (95 max to reserve 100 for exact matches).
    fn calculate_fuzzy_score(query: &str, target: &str) -> u8 {
        if query.is_empty() || target.is_empty() {
            return 0;
        }

        if query == target {
            return 95;
        }

        if target.contains(query) {
            let ratio = query.chars().count() as f64 / target.chars().count() as f64;
            return (85.0 * ratio + 10.0) as u8;
        }

        let distance = Self::levenshtein_distance(query, target);
        let max_len = query.chars().count().max(target.chars().count());

        if distance as f64 / max_len as f64 > 0.5 {
            return 0;
        }

        let similarity = 1.0 - (distance as f64 / max_len as f64);
        (similarity * 85.0) as u8
    }

    /// Calculate Levenshtein distance between two strings.
    fn levenshtein_distance(s1: &str, s2: &str) -> usize {
        let s1_chars: Vec<char> = s1.chars().collect();
        let s2_chars: Vec<char> = s2.chars().collect();

        if s1_chars.is_empty() {
            return s2_chars.len();
        }
        if s2_chars.is_empty() {
            return s1_chars.len();
        }

        let mut previous: Vec<usize> = (0..=s2_chars.len()).collect();
        let mut current = vec![0; s2_chars.len() + 1];

        for (i, c1) in s1_chars.iter().enumerate() {
            current[0] = i + 1;
            for (j, c2) in s2_chars.iter().enumerate() {
                let cost = usize::from(c1 != c2);
                current[j + 1] = (previous[j + 1] + 1)
                    .min(current[j] + 1)
                    .min(previous[j] + cost);
            }
            std::mem::swap(&mut previous, &mut current);
        }

        previous[s2_chars.len()]
    }

    // ==================== Normalization Functions ====================

    /// Normalize a phone number to its national significant digits.
    ///
    /// `+33 6 12 34 56 78` and `06 12 34 56 78` both become `612345678`.
    pub fn normalize_phone(phone: &str) -> String {
        let canonical = canonicalize(phone);
        let national = [CountryCode::Fr, CountryCode::Uk]
            .iter()
            .find_map(|country| canonical.strip_prefix(country.dialing_prefix()))
            .or_else(|| canonical.strip_prefix('0'))
            .unwrap_or(canonical.as_str());
        national.to_string()
    }

    /// Normalize a name for fuzzy matching.
    ///
    /// Converts to lowercase and collapses whitespace.
    pub fn normalize_name(name: &str) -> String {
        name.trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}
