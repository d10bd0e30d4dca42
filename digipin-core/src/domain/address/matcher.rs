// digipin-core/src/domain/address/matcher.rs

use std::cmp::Ordering;

use crate::domain::address::gazetteer::{Gazetteer, GazetteerEntry};
use crate::domain::address::similarity::similarity;
use crate::domain::address::AddressParts;

pub const DEFAULT_THRESHOLD: f64 = 0.5;
pub const SUGGESTION_THRESHOLD: f64 = 0.3;
pub const PREDICTION_THRESHOLD: f64 = 0.6;
pub const DEFAULT_MAX_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AddressMatch<'g> {
    pub entry: &'g GazetteerEntry,
    pub similarity: f64,
}

/// Ranks gazetteer entries against a partially typed address.
///
/// Stateless and uncached; cheap enough to rerun on every field edit.
#[derive(Debug, Clone, Copy)]
pub struct AddressMatcher<'g> {
    gazetteer: &'g Gazetteer,
}

impl AddressMatcher<'static> {
    pub fn offline() -> Self {
        Self::new(Gazetteer::offline())
    }
}

impl<'g> AddressMatcher<'g> {
    pub fn new(gazetteer: &'g Gazetteer) -> Self {
        Self { gazetteer }
    }

    /// Entries scoring at least `threshold`, best first. Ties keep catalog order.
    pub fn find_similar(&self, parts: &AddressParts, threshold: f64) -> Vec<AddressMatch<'g>> {
        let input = parts.normalize();

        let mut matches: Vec<AddressMatch<'g>> = self
            .gazetteer
            .entries()
            .iter()
            .map(|entry| AddressMatch {
                entry,
                similarity: similarity(&input, &entry.address_parts.normalize()),
            })
            .filter(|m| m.similarity >= threshold)
            .collect();

        // `sort_by` is stable.
        matches.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        matches
    }

    pub fn suggestions(&self, parts: &AddressParts, max: usize) -> Vec<AddressMatch<'g>> {
        let mut matches = self.find_similar(parts, SUGGESTION_THRESHOLD);
        matches.truncate(max);
        matches
    }

    /// Advisory display string: the best confident match's name, or the
    /// plain normalized input.
    pub fn predict_normalized_address(&self, parts: &AddressParts) -> String {
        match self.find_similar(parts, PREDICTION_THRESHOLD).first() {
            Some(best) => best.entry.display_name.to_string(),
            None => parts.normalize(),
        }
    }
}
