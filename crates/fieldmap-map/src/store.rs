//! Mapping store: the authoritative set of correspondences.
//!
//! Every operation either applies completely or returns an error and leaves
//! the store untouched. Entries are kept in insertion order, which is the
//! order the export uses.

use tracing::{debug, info};

use fieldmap_model::{
    Correspondence, CorrespondenceId, FieldId, MappingError, MappingStatus, Result, Side,
};

/// Correspondences for one (source, target) pair of field sequences.
#[derive(Debug, Clone)]
pub struct MappingStore {
    entries: Vec<Correspondence>,
    next_id: u64,
    seeded: bool,
}

impl Default for MappingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MappingStore {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            seeded: false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All correspondences in insertion order.
    pub fn correspondences(&self) -> &[Correspondence] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Correspondence> {
        self.entries.iter()
    }

    pub fn get(&self, id: &CorrespondenceId) -> Option<&Correspondence> {
        self.entries.iter().find(|c| &c.id == id)
    }

    /// True once suggestions have been seeded into this store.
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    /// The correspondence linking `a` and `b`, in either order.
    pub fn find_between(&self, a: &FieldId, b: &FieldId) -> Option<&Correspondence> {
        self.entries.iter().find(|c| c.connects(a, b))
    }

    /// First correspondence (insertion order) touching `field_id` on `side`.
    pub fn first_touching(&self, field_id: &FieldId, side: Side) -> Option<&Correspondence> {
        self.entries.iter().find(|c| c.touches(field_id, side))
    }

    pub fn count_with_status(&self, status: MappingStatus) -> usize {
        self.entries.iter().filter(|c| c.status == status).count()
    }

    /// Seeds `suggested` correspondences for the given pairs.
    ///
    /// Runs at most once per store: if the store was already seeded or
    /// already holds any correspondence, nothing changes and an empty list
    /// is returned. Repeated pairs in `pairs` are skipped.
    pub fn seed_suggestions<I>(&mut self, pairs: I) -> Vec<Correspondence>
    where
        I: IntoIterator<Item = (FieldId, FieldId)>,
    {
        if self.seeded || !self.entries.is_empty() {
            debug!(
                seeded = self.seeded,
                entries = self.entries.len(),
                "skipping suggestion seeding"
            );
            return Vec::new();
        }
        self.seeded = true;

        let start = self.entries.len();
        for (source, target) in pairs {
            if self.find_between(&source, &target).is_some() {
                continue;
            }
            let id = self.next_correspondence_id();
            self.entries.push(Correspondence::new(
                id,
                source,
                target,
                MappingStatus::Suggested,
            ));
        }
        let created = self.entries[start..].to_vec();
        info!(suggestions = created.len(), "seeded suggestions");
        created
    }

    /// Creates a `manual` correspondence.
    ///
    /// Rejected with `Duplicate` if any correspondence, whatever its status,
    /// already links the two fields. The ids are not checked against a
    /// registry here; `MappingSession::connect` does that first.
    pub(crate) fn create_manual(
        &mut self,
        source: &FieldId,
        target: &FieldId,
    ) -> Result<Correspondence> {
        if let Some(existing) = self.find_between(source, target) {
            return Err(MappingError::Duplicate {
                source_id: source.clone(),
                target_id: target.clone(),
                existing: existing.id.clone(),
            });
        }
        let id = self.next_correspondence_id();
        let corr = Correspondence::new(id, source.clone(), target.clone(), MappingStatus::Manual);
        debug!(id = %corr.id, %source, %target, "created manual correspondence");
        self.entries.push(corr.clone());
        Ok(corr)
    }

    /// Moves a `suggested` correspondence to `matched`.
    pub fn accept_suggestion(&mut self, id: &CorrespondenceId) -> Result<Correspondence> {
        let corr = self.entry_mut(id)?;
        if !corr.status.can_transition_to(MappingStatus::Matched) {
            return Err(MappingError::InvalidState {
                id: id.clone(),
                actual: corr.status,
                expected: MappingStatus::Suggested,
            });
        }
        corr.status = MappingStatus::Matched;
        debug!(%id, "accepted suggestion");
        Ok(corr.clone())
    }

    /// Moves every `suggested` correspondence to `matched`.
    ///
    /// Returns how many changed; zero is not an error.
    pub fn accept_all_suggestions(&mut self) -> usize {
        let mut accepted = 0;
        for corr in &mut self.entries {
            if corr.status == MappingStatus::Suggested {
                corr.status = MappingStatus::Matched;
                accepted += 1;
            }
        }
        debug!(accepted, "accepted all suggestions");
        accepted
    }

    /// Removes one correspondence and returns it.
    pub fn remove(&mut self, id: &CorrespondenceId) -> Result<Correspondence> {
        let Some(idx) = self.entries.iter().position(|c| &c.id == id) else {
            return Err(MappingError::CorrespondenceNotFound(id.clone()));
        };
        let removed = self.entries.remove(idx);
        debug!(%id, status = %removed.status, "removed correspondence");
        Ok(removed)
    }

    /// Removes every `suggested` correspondence, leaving the rest in order.
    pub fn clear_suggestions(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|c| c.status != MappingStatus::Suggested);
        let removed = before - self.entries.len();
        debug!(removed, "cleared suggestions");
        removed
    }

    /// Removes every correspondence.
    ///
    /// Id counters and the seeded flag are kept, so ids are not reused and
    /// suggestions are not generated again.
    pub fn clear_all(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        debug!(removed, "cleared all correspondences");
        removed
    }

    /// Sets the presentation offset; the status is left as is.
    pub fn set_visual_offset(&mut self, id: &CorrespondenceId, offset: f64) -> Result<()> {
        let corr = self.entry_mut(id)?;
        corr.visual_offset = Some(offset);
        Ok(())
    }

    fn entry_mut(&mut self, id: &CorrespondenceId) -> Result<&mut Correspondence> {
        self.entries
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| MappingError::CorrespondenceNotFound(id.clone()))
    }

    fn next_correspondence_id(&mut self) -> CorrespondenceId {
        let id = CorrespondenceId::sequential(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fid(s: &str) -> FieldId {
        FieldId::new(s).unwrap()
    }

    fn cid(s: &str) -> CorrespondenceId {
        CorrespondenceId::new(s).unwrap()
    }

    fn seeded_store() -> MappingStore {
        let mut store = MappingStore::new();
        store.seed_suggestions([(fid("s1"), fid("t1")), (fid("s2"), fid("t2"))]);
        store
    }

    #[test]
    fn seed_creates_suggested_entries_once() {
        let mut store = MappingStore::new();
        let created = store.seed_suggestions([(fid("s1"), fid("t1"))]);
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].status, MappingStatus::Suggested);
        assert_eq!(created[0].id.as_str(), "c1");

        let again = store.seed_suggestions([(fid("s2"), fid("t2"))]);
        assert!(again.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn seed_is_skipped_when_user_already_edited() {
        let mut store = MappingStore::new();
        store.create_manual(&fid("s1"), &fid("t3")).unwrap();
        assert!(store.seed_suggestions([(fid("s1"), fid("t1"))]).is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn create_manual_rejects_duplicate_in_either_order() {
        let mut store = MappingStore::new();
        let first = store.create_manual(&fid("s2"), &fid("t5")).unwrap();
        assert_eq!(first.status, MappingStatus::Manual);

        let err = store.create_manual(&fid("s2"), &fid("t5")).unwrap_err();
        assert!(matches!(err, MappingError::Duplicate { ref existing, .. } if existing == &first.id));
        let err = store.create_manual(&fid("t5"), &fid("s2")).unwrap_err();
        assert!(matches!(err, MappingError::Duplicate { .. }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn create_manual_rejects_pair_held_by_suggestion() {
        let mut store = seeded_store();
        let err = store.create_manual(&fid("s1"), &fid("t1")).unwrap_err();
        assert!(matches!(err, MappingError::Duplicate { .. }));
        assert_eq!(store.get(&cid("c1")).unwrap().status, MappingStatus::Suggested);
    }

    #[test]
    fn create_manual_for_differently_paired_fields_is_manual() {
        let mut store = seeded_store();
        let corr = store.create_manual(&fid("s1"), &fid("t2")).unwrap();
        assert_eq!(corr.status, MappingStatus::Manual);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn accept_suggestion_transitions_to_matched() {
        let mut store = seeded_store();
        let corr = store.accept_suggestion(&cid("c1")).unwrap();
        assert_eq!(corr.status, MappingStatus::Matched);

        let err = store.accept_suggestion(&cid("c1")).unwrap_err();
        assert_eq!(
            err,
            MappingError::InvalidState {
                id: cid("c1"),
                actual: MappingStatus::Matched,
                expected: MappingStatus::Suggested,
            }
        );
    }

    #[test]
    fn accept_suggestion_on_manual_is_invalid_state() {
        let mut store = MappingStore::new();
        let manual = store.create_manual(&fid("s1"), &fid("t1")).unwrap();
        let before = store.correspondences().to_vec();
        let err = store.accept_suggestion(&manual.id).unwrap_err();
        assert!(matches!(err, MappingError::InvalidState { actual: MappingStatus::Manual, .. }));
        assert_eq!(store.correspondences(), before.as_slice());
    }

    #[test]
    fn accept_unknown_is_not_found() {
        let mut store = seeded_store();
        assert_eq!(
            store.accept_suggestion(&cid("c99")).unwrap_err(),
            MappingError::CorrespondenceNotFound(cid("c99"))
        );
    }

    #[test]
    fn accept_all_only_touches_suggested() {
        let mut store = seeded_store();
        store.create_manual(&fid("s3"), &fid("t3")).unwrap();
        assert_eq!(store.accept_all_suggestions(), 2);
        assert_eq!(store.count_with_status(MappingStatus::Matched), 2);
        assert_eq!(store.count_with_status(MappingStatus::Manual), 1);
        assert_eq!(store.accept_all_suggestions(), 0);
    }

    #[test]
    fn remove_and_not_found() {
        let mut store = seeded_store();
        let removed = store.remove(&cid("c2")).unwrap();
        assert_eq!(removed.source_field_id, fid("s2"));
        assert_eq!(store.len(), 1);
        assert!(store.remove(&cid("c2")).unwrap_err().is_not_found());
    }

    #[test]
    fn clear_suggestions_keeps_confirmed_entries() {
        let mut store = seeded_store();
        store.accept_suggestion(&cid("c2")).unwrap();
        store.create_manual(&fid("s3"), &fid("t1")).unwrap();
        assert_eq!(store.clear_suggestions(), 1);
        let ids: Vec<&str> = store.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c2", "c3"]);
    }

    #[test]
    fn clear_all_does_not_reuse_ids_or_reseed() {
        let mut store = seeded_store();
        assert_eq!(store.clear_all(), 2);
        assert!(store.is_empty());
        assert!(store.seed_suggestions([(fid("s1"), fid("t1"))]).is_empty());
        let corr = store.create_manual(&fid("s1"), &fid("t1")).unwrap();
        assert_eq!(corr.id.as_str(), "c3");
    }

    #[test]
    fn visual_offset_survives_status_change() {
        let mut store = seeded_store();
        store.set_visual_offset(&cid("c1"), 24.0).unwrap();
        let corr = store.accept_suggestion(&cid("c1")).unwrap();
        assert_eq!(corr.visual_offset, Some(24.0));
        assert!(store.set_visual_offset(&cid("c42"), 1.0).is_err());
    }
}
