//! Field registry: the owner of both field sequences.

use tracing::debug;

use fieldmap_model::{
    DEFAULT_FIELD_TYPE, Field, FieldId, FieldSequence, MappingError, Result, Side,
};

/// Holds the source and target sequences of one mapping.
///
/// Field ids come from per-side counters scoped to this registry. Counters
/// only move forward, so an id is never handed out twice, even when a side
/// is ingested again.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    source: FieldSequence,
    target: FieldSequence,
    next_source: u64,
    next_target: u64,
    default_type: String,
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self {
            source: FieldSequence::new(Side::Source),
            target: FieldSequence::new(Side::Target),
            next_source: 1,
            next_target: 1,
            default_type: DEFAULT_FIELD_TYPE.to_string(),
        }
    }

    /// Declared type used by [`Self::ingest`] (default `"string"`).
    #[must_use]
    pub fn with_default_type(mut self, declared_type: impl Into<String>) -> Self {
        self.default_type = declared_type.into();
        self
    }

    /// Replaces one side with fresh fields named `names`, in order.
    pub fn ingest<I, S>(&mut self, side: Side, names: I) -> Result<&FieldSequence>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let default_type = self.default_type.clone();
        self.ingest_typed(
            side,
            names
                .into_iter()
                .map(|name| (name, default_type.clone())),
        )
    }

    /// Replaces one side with fresh fields given as `(name, declared_type)`.
    pub fn ingest_typed<I, N, T>(&mut self, side: Side, fields: I) -> Result<&FieldSequence>
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: Into<String>,
    {
        let mut sequence = FieldSequence::new(side);
        for (name, declared_type) in fields {
            let id = self.next_field_id(side);
            sequence.push(id, name, declared_type)?;
        }
        debug!(%side, fields = sequence.len(), "ingested field sequence");
        let slot = self.sequence_slot(side);
        *slot = sequence;
        Ok(&*slot)
    }

    pub fn sequence(&self, side: Side) -> &FieldSequence {
        match side {
            Side::Source => &self.source,
            Side::Target => &self.target,
        }
    }

    pub fn source(&self) -> &FieldSequence {
        &self.source
    }

    pub fn target(&self) -> &FieldSequence {
        &self.target
    }

    pub fn field(&self, side: Side, id: &FieldId) -> Option<&Field> {
        self.sequence(side).get(id)
    }

    /// Looks a field up on `side`, failing with `FieldNotFound`.
    pub fn require(&self, side: Side, id: &FieldId) -> Result<&Field> {
        self.field(side, id).ok_or_else(|| MappingError::FieldNotFound {
            side,
            id: id.clone(),
        })
    }

    /// Current name of a field, looked up at call time.
    pub fn name_of(&self, side: Side, id: &FieldId) -> Option<&str> {
        self.field(side, id).map(|f| f.name.as_str())
    }

    /// Moves a field within its own sequence; returns the previous index.
    pub fn reposition(&mut self, side: Side, id: &FieldId, new_index: usize) -> Result<usize> {
        let from = self.sequence_slot(side).move_to(id, new_index)?;
        debug!(%side, field = %id, from, to = new_index, "repositioned field");
        Ok(from)
    }

    fn sequence_slot(&mut self, side: Side) -> &mut FieldSequence {
        match side {
            Side::Source => &mut self.source,
            Side::Target => &mut self.target,
        }
    }

    fn next_field_id(&mut self, side: Side) -> FieldId {
        let counter = match side {
            Side::Source => &mut self.next_source,
            Side::Target => &mut self.next_target,
        };
        let id = FieldId::sequential(side, *counter);
        *counter += 1;
        id
    }
}
