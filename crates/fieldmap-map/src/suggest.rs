//! Suggestion generation.
//!
//! The default policy pairs fields by position: source index `i` with target
//! index `i`, up to the shorter sequence. Name similarity is available as an
//! opt-in [`NameSimilarityPolicy`] and is never used unless asked for.

use std::cmp::Ordering;

use rapidfuzz::distance::jaro_winkler::similarity as jaro_similarity;
use tracing::debug;

use fieldmap_model::{Correspondence, FieldId, FieldSequence};

use crate::store::MappingStore;
use crate::utils::normalize_name;

/// Decides which (source, target) field pairs to propose.
pub trait SuggestionPolicy {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Candidate pairs in the order they should be created.
    fn pair(&self, source: &FieldSequence, target: &FieldSequence) -> Vec<(FieldId, FieldId)>;
}

/// Pairs index `i` of the source with index `i` of the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalPolicy;

impl SuggestionPolicy for PositionalPolicy {
    fn name(&self) -> &'static str {
        "positional"
    }

    fn pair(&self, source: &FieldSequence, target: &FieldSequence) -> Vec<(FieldId, FieldId)> {
        source
            .iter()
            .zip(target.iter())
            .map(|(s, t)| (s.id.clone(), t.id.clone()))
            .collect()
    }
}

/// Default minimum Jaro-Winkler similarity for [`NameSimilarityPolicy`].
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.85;

/// Pairs fields whose normalized names are similar.
///
/// Each field takes part in at most one pair. Candidates are assigned
/// greedily from the highest score down; ties go to the lower source index,
/// then the lower target index. Pairs are returned in source order.
#[derive(Debug, Clone, Copy)]
pub struct NameSimilarityPolicy {
    pub min_similarity: f64,
}

impl Default for NameSimilarityPolicy {
    fn default() -> Self {
        Self {
            min_similarity: DEFAULT_MIN_SIMILARITY,
        }
    }
}

impl NameSimilarityPolicy {
    pub fn new(min_similarity: f64) -> Self {
        Self { min_similarity }
    }

    /// Similarity of two field names after normalization, in `[0, 1]`.
    pub fn score(a: &str, b: &str) -> f64 {
        let a = normalize_name(a);
        let b = normalize_name(b);
        if a == b {
            return 1.0;
        }
        let spaced = jaro_similarity(a.chars(), b.chars());
        let compact = jaro_similarity(
            a.chars().filter(|c| *c != ' '),
            b.chars().filter(|c| *c != ' '),
        );
        spaced.max(compact)
    }
}

impl SuggestionPolicy for NameSimilarityPolicy {
    fn name(&self) -> &'static str {
        "name-similarity"
    }

    fn pair(&self, source: &FieldSequence, target: &FieldSequence) -> Vec<(FieldId, FieldId)> {
        let mut candidates: Vec<(f64, usize, usize)> = Vec::new();
        for (si, s) in source.iter().enumerate() {
            for (ti, t) in target.iter().enumerate() {
                let score = Self::score(&s.name, &t.name);
                if score >= self.min_similarity {
                    candidates.push((score, si, ti));
                }
            }
        }
        candidates.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(&b.1))
                .then_with(|| a.2.cmp(&b.2))
        });

        let mut source_used = vec![false; source.len()];
        let mut target_used = vec![false; target.len()];
        let mut chosen: Vec<(usize, usize)> = Vec::new();
        for (_, si, ti) in candidates {
            if source_used[si] || target_used[ti] {
                continue;
            }
            source_used[si] = true;
            target_used[ti] = true;
            chosen.push((si, ti));
        }
        chosen.sort_unstable();

        chosen
            .into_iter()
            .filter_map(|(si, ti)| {
                let s = source.at(si)?;
                let t = target.at(ti)?;
                Some((s.id.clone(), t.id.clone()))
            })
            .collect()
    }
}

/// Seeds a mapping store from two field sequences.
#[derive(Debug, Clone, Default)]
pub struct SuggestionGenerator<P = PositionalPolicy> {
    policy: P,
}

impl SuggestionGenerator<PositionalPolicy> {
    pub fn positional() -> Self {
        Self {
            policy: PositionalPolicy,
        }
    }
}

impl<P: SuggestionPolicy> SuggestionGenerator<P> {
    pub fn with_policy(policy: P) -> Self {
        Self { policy }
    }

    /// Creates the initial `suggested` correspondences.
    ///
    /// Does nothing and returns an empty list when the store has already
    /// been seeded or already holds correspondences, so user edits are
    /// never overwritten.
    pub fn generate(
        &self,
        source: &FieldSequence,
        target: &FieldSequence,
        store: &mut MappingStore,
    ) -> Vec<Correspondence> {
        if store.is_seeded() || !store.is_empty() {
            return Vec::new();
        }
        let pairs = self.policy.pair(source, target);
        debug!(
            policy = self.policy.name(),
            candidates = pairs.len(),
            "generated suggestion pairs"
        );
        store.seed_suggestions(pairs)
    }
}

#[cfg(test)]
mod tests {
    use fieldmap_model::{MappingStatus, Side};

    use super::*;
    use crate::registry::FieldRegistry;

    fn registry(source: &[&str], target: &[&str]) -> FieldRegistry {
        let mut registry = FieldRegistry::new();
        registry.ingest(Side::Source, source.iter().copied()).unwrap();
        registry.ingest(Side::Target, target.iter().copied()).unwrap();
        registry
    }

    fn pair_names(registry: &FieldRegistry, corrs: &[Correspondence]) -> Vec<(String, String)> {
        corrs
            .iter()
            .map(|c| {
                (
                    registry
                        .name_of(Side::Source, &c.source_field_id)
                        .unwrap()
                        .to_string(),
                    registry
                        .name_of(Side::Target, &c.target_field_id)
                        .unwrap()
                        .to_string(),
                )
            })
            .collect()
    }

    #[test]
    fn positional_pairs_by_index() {
        let registry = registry(&["customer_id", "email"], &["id", "emailAddress"]);
        let mut store = MappingStore::new();
        let created =
            SuggestionGenerator::positional().generate(registry.source(), registry.target(), &mut store);

        assert_eq!(created.len(), 2);
        assert!(created.iter().all(|c| c.status == MappingStatus::Suggested));
        assert_eq!(
            pair_names(&registry, &created),
            vec![
                ("customer_id".to_string(), "id".to_string()),
                ("email".to_string(), "emailAddress".to_string()),
            ]
        );
    }

    #[test]
    fn positional_ignores_names() {
        let registry = registry(&["zip", "city", "state"], &["state", "city"]);
        let pairs = PositionalPolicy.pair(registry.source(), registry.target());
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0.as_str(), "s1");
        assert_eq!(pairs[0].1.as_str(), "t1");
    }

    #[test]
    fn generate_is_idempotent() {
        let registry = registry(&["a", "b"], &["x", "y", "z"]);
        let generator = SuggestionGenerator::positional();
        let mut store = MappingStore::new();
        generator.generate(registry.source(), registry.target(), &mut store);
        let snapshot = store.correspondences().to_vec();

        let again = generator.generate(registry.source(), registry.target(), &mut store);
        assert!(again.is_empty());
        assert_eq!(store.correspondences(), snapshot.as_slice());
    }

    #[test]
    fn empty_side_yields_no_suggestions() {
        let registry = registry(&[], &["x"]);
        let mut store = MappingStore::new();
        let created =
            SuggestionGenerator::positional().generate(registry.source(), registry.target(), &mut store);
        assert!(created.is_empty());
    }

    #[test]
    fn name_similarity_matches_across_positions() {
        let registry = registry(
            &["first_name", "email", "zip_code"],
            &["emailAddress", "firstName", "country"],
        );
        let pairs = NameSimilarityPolicy::default().pair(registry.source(), registry.target());
        let ids: Vec<(&str, &str)> = pairs
            .iter()
            .map(|(s, t)| (s.as_str(), t.as_str()))
            .collect();
        assert_eq!(ids, vec![("s1", "t2"), ("s2", "t1")]);
    }

    #[test]
    fn name_similarity_score_normalizes() {
        assert_eq!(NameSimilarityPolicy::score("First_Name", "firstName"), 1.0);
        assert!(NameSimilarityPolicy::score("city", "postalCode") < DEFAULT_MIN_SIMILARITY);
    }
}
