//! Mapping session: one registry, one store, and the gestures between them.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};

use fieldmap_model::{
    Correspondence, CorrespondenceId, ExportTriple, FieldId, MappingError, Result, Side,
};

use crate::drag::{DragSession, DropOutcome, DropTarget};
use crate::gesture::Gesture;
use crate::query::MappingQuery;
use crate::registry::FieldRegistry;
use crate::reorder::ReorderEngine;
use crate::store::MappingStore;
use crate::suggest::{PositionalPolicy, SuggestionGenerator, SuggestionPolicy};

/// State of one mapping between a source file and a target file.
///
/// Every method either applies completely or returns an error with the
/// session unchanged. Uploading new files means starting a new session.
#[derive(Debug, Clone, Default)]
pub struct MappingSession {
    registry: FieldRegistry,
    store: MappingStore,
}

impl MappingSession {
    /// Builds a session from the column names of both files.
    pub fn new<S, T>(source_names: S, target_names: T) -> Result<Self>
    where
        S: IntoIterator,
        S::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        let mut registry = FieldRegistry::new();
        registry.ingest(Side::Source, source_names)?;
        registry.ingest(Side::Target, target_names)?;
        Ok(Self::from_registry(registry))
    }

    /// Starts an empty mapping over an already populated registry.
    pub fn from_registry(registry: FieldRegistry) -> Self {
        Self {
            registry,
            store: MappingStore::new(),
        }
    }

    /// Seeds positional suggestions. Only the first call has any effect.
    pub fn seed(&mut self) -> Vec<Correspondence> {
        self.seed_with(PositionalPolicy)
    }

    /// Seeds suggestions with a custom pairing policy.
    pub fn seed_with<P: SuggestionPolicy>(&mut self, policy: P) -> Vec<Correspondence> {
        SuggestionGenerator::with_policy(policy).generate(
            self.registry.source(),
            self.registry.target(),
            &mut self.store,
        )
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    pub fn store(&self) -> &MappingStore {
        &self.store
    }

    pub fn query(&self) -> MappingQuery<'_> {
        MappingQuery::new(&self.registry, &self.store)
    }

    pub fn export_triples(&self) -> Vec<ExportTriple> {
        self.query().export_triples()
    }

    /// Manually links a source field to a target field.
    pub fn connect(&mut self, source: &FieldId, target: &FieldId) -> Result<Correspondence> {
        self.registry.require(Side::Source, source)?;
        self.registry.require(Side::Target, target)?;
        self.store.create_manual(source, target)
    }

    pub fn accept(&mut self, id: &CorrespondenceId) -> Result<Correspondence> {
        self.store.accept_suggestion(id)
    }

    pub fn accept_all(&mut self) -> usize {
        self.store.accept_all_suggestions()
    }

    pub fn remove(&mut self, id: &CorrespondenceId) -> Result<Correspondence> {
        self.store.remove(id)
    }

    pub fn clear_suggestions(&mut self) -> usize {
        self.store.clear_suggestions()
    }

    pub fn clear_all(&mut self) -> usize {
        self.store.clear_all()
    }

    pub fn set_visual_offset(&mut self, id: &CorrespondenceId, offset: f64) -> Result<()> {
        self.store.set_visual_offset(id, offset)
    }

    /// Reorder access. The engine cannot reach the store.
    pub fn reorder(&mut self) -> ReorderEngine<'_> {
        ReorderEngine::new(&mut self.registry)
    }

    /// Picks up a field.
    pub fn begin_field_drag(&self, side: Side, field_id: &FieldId) -> Result<DragSession> {
        let field = self.registry.require(side, field_id)?;
        Ok(DragSession::field(side, field.id.clone()))
    }

    /// Picks up the handle of a connection line at `pointer_y`.
    pub fn begin_offset_drag(&self, id: &CorrespondenceId, pointer_y: f64) -> Result<DragSession> {
        let corr = self
            .store
            .get(id)
            .ok_or_else(|| MappingError::CorrespondenceNotFound(id.clone()))?;
        Ok(DragSession::offset(
            id.clone(),
            corr.visual_offset.unwrap_or(0.0),
            pointer_y,
        ))
    }

    /// Releases a drag and applies its effect.
    ///
    /// A field dropped on the other side connects the two fields; a
    /// duplicate link is reported as [`DropOutcome::Rejected`] rather than an
    /// error. Dropped on its own side it moves to the target's index. An
    /// offset drag stores the origin offset plus the pointer delta and
    /// ignores `target`.
    pub fn end_drag(&mut self, drag: DragSession, target: Option<&DropTarget>) -> Result<DropOutcome> {
        let committed = drag.preview_offset().unwrap_or_default();
        match drag {
            DragSession::Field { side, field_id } => {
                let Some(target) = target else {
                    return Ok(DropOutcome::Unchanged);
                };
                if target.side == side {
                    self.drop_on_same_side(side, &field_id, &target.field_id)
                } else {
                    let (source, target) = match side {
                        Side::Source => (field_id, target.field_id.clone()),
                        Side::Target => (target.field_id.clone(), field_id),
                    };
                    self.drop_on_opposite_side(&source, &target)
                }
            }
            DragSession::Offset {
                correspondence_id, ..
            } => {
                self.store.set_visual_offset(&correspondence_id, committed)?;
                debug!(id = %correspondence_id, offset = committed, "committed line offset");
                Ok(DropOutcome::OffsetCommitted {
                    correspondence_id,
                    offset: committed,
                })
            }
        }
    }

    /// Abandons a drag. Nothing was applied, so nothing is undone.
    pub fn cancel_drag(&self, drag: DragSession) -> DropOutcome {
        debug!(?drag, "drag cancelled");
        drop(drag);
        DropOutcome::Cancelled
    }

    fn drop_on_same_side(
        &mut self,
        side: Side,
        field_id: &FieldId,
        target_id: &FieldId,
    ) -> Result<DropOutcome> {
        let from = self.registry.require(side, field_id)?.sequence_index;
        let to = self.registry.require(side, target_id)?.sequence_index;
        if from == to {
            return Ok(DropOutcome::Unchanged);
        }
        self.reorder().reposition(side, field_id, to)?;
        Ok(DropOutcome::Reordered { side, from, to })
    }

    fn drop_on_opposite_side(&mut self, source: &FieldId, target: &FieldId) -> Result<DropOutcome> {
        match self.connect(source, target) {
            Ok(corr) => Ok(DropOutcome::Connected(corr)),
            Err(err @ MappingError::Duplicate { .. }) => {
                warn!(%source, %target, "connection already exists");
                Ok(DropOutcome::Rejected(err))
            }
            Err(err) => Err(err),
        }
    }

    /// Applies one gesture. A rejected gesture is logged and returned as an
    /// error; the session is left as it was.
    pub fn apply(&mut self, gesture: &Gesture) -> Result<()> {
        let result = self.apply_inner(gesture);
        match &result {
            Ok(()) => debug!(%gesture, "applied gesture"),
            Err(err) => warn!(%gesture, error = %err, "gesture rejected"),
        }
        result
    }

    fn apply_inner(&mut self, gesture: &Gesture) -> Result<()> {
        match gesture {
            Gesture::Accept { id } => {
                self.accept(id)?;
            }
            Gesture::AcceptAll => {
                let accepted = self.accept_all();
                info!(accepted, "accepted all suggestions");
            }
            Gesture::Connect { source, target } => {
                self.connect(source, target)?;
            }
            Gesture::Remove { id } => {
                self.remove(id)?;
            }
            Gesture::Reorder { side, field, index } => {
                self.reorder().reposition(*side, field, *index)?;
            }
            Gesture::MoveUp { side, field } => {
                self.reorder().move_up(*side, field)?;
            }
            Gesture::MoveDown { side, field } => {
                self.reorder().move_down(*side, field)?;
            }
            Gesture::ClearSuggestions => {
                self.clear_suggestions();
            }
            Gesture::ClearAll => {
                self.clear_all();
            }
            Gesture::SetOffset { id, offset } => {
                self.set_visual_offset(id, *offset)?;
            }
        }
        Ok(())
    }
}

/// A [`MappingSession`] shared between threads.
///
/// Each call takes the lock for the whole operation, so callers never see a
/// half-applied change.
#[derive(Debug, Clone, Default)]
pub struct SharedMappingSession {
    inner: Arc<Mutex<MappingSession>>,
}

impl SharedMappingSession {
    pub fn new(session: MappingSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Runs `f` with exclusive access to the session.
    pub fn with<R>(&self, f: impl FnOnce(&mut MappingSession) -> R) -> R {
        // Each session operation validates before it mutates. A closure that
        // panics between two operations still leaves the earlier ones applied.
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn apply(&self, gesture: &Gesture) -> Result<()> {
        self.with(|session| session.apply(gesture))
    }

    pub fn export_triples(&self) -> Vec<ExportTriple> {
        self.with(|session: &mut MappingSession| session.export_triples())
    }
}
