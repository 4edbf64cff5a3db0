//! Reordering of fields within one side.

use tracing::debug;

use fieldmap_model::{FieldId, Result, Side};

use crate::registry::FieldRegistry;

/// Moves fields within their own sequence.
///
/// The engine only borrows the [`FieldRegistry`]; it has no access to the
/// mapping store, so a reorder can never create, change or drop a
/// correspondence. Only `sequence_index` values move.
#[derive(Debug)]
pub struct ReorderEngine<'a> {
    registry: &'a mut FieldRegistry,
}

impl<'a> ReorderEngine<'a> {
    pub fn new(registry: &'a mut FieldRegistry) -> Self {
        Self { registry }
    }

    /// Moves `field_id` to `new_index`; returns the index it came from.
    pub fn reposition(&mut self, side: Side, field_id: &FieldId, new_index: usize) -> Result<usize> {
        self.registry.reposition(side, field_id, new_index)
    }

    /// Swaps the field with the one above it. Returns the field's index
    /// afterwards; the first field stays put.
    pub fn move_up(&mut self, side: Side, field_id: &FieldId) -> Result<usize> {
        let index = self.registry.require(side, field_id)?.sequence_index;
        if index == 0 {
            debug!(%side, field = %field_id, "already first, move up ignored");
            return Ok(index);
        }
        self.registry.reposition(side, field_id, index - 1)?;
        Ok(index - 1)
    }

    /// Swaps the field with the one below it. Returns the field's index
    /// afterwards; the last field stays put.
    pub fn move_down(&mut self, side: Side, field_id: &FieldId) -> Result<usize> {
        let index = self.registry.require(side, field_id)?.sequence_index;
        if index + 1 >= self.registry.sequence(side).len() {
            debug!(%side, field = %field_id, "already last, move down ignored");
            return Ok(index);
        }
        self.registry.reposition(side, field_id, index + 1)?;
        Ok(index + 1)
    }
}

#[cfg(test)]
mod tests {
    use fieldmap_model::MappingError;

    use super::*;

    fn registry() -> FieldRegistry {
        let mut registry = FieldRegistry::new();
        registry.ingest(Side::Target, ["a", "b", "c"]).unwrap();
        registry
    }

    fn fid(s: &str) -> FieldId {
        FieldId::new(s).unwrap()
    }

    #[test]
    fn move_up_and_down_swap_neighbours() {
        let mut registry = registry();
        let mut engine = ReorderEngine::new(&mut registry);
        assert_eq!(engine.move_up(Side::Target, &fid("t2")).unwrap(), 0);
        assert_eq!(engine.move_down(Side::Target, &fid("t1")).unwrap(), 2);
        assert_eq!(registry.target().names(), vec!["b", "c", "a"]);
    }

    #[test]
    fn boundaries_are_no_ops() {
        let mut registry = registry();
        let mut engine = ReorderEngine::new(&mut registry);
        assert_eq!(engine.move_up(Side::Target, &fid("t1")).unwrap(), 0);
        assert_eq!(engine.move_down(Side::Target, &fid("t3")).unwrap(), 2);
        assert_eq!(registry.target().names(), vec!["a", "b", "c"]);
    }

    #[test]
    fn unknown_field_is_not_found() {
        let mut registry = registry();
        let mut engine = ReorderEngine::new(&mut registry);
        assert!(matches!(
            engine.move_up(Side::Source, &fid("t1")),
            Err(MappingError::FieldNotFound { side: Side::Source, .. })
        ));
    }
}
