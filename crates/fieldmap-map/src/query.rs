//! Read-only projections over a registry and a store.

use serde::Serialize;

use fieldmap_model::{
    Correspondence, ExportTriple, Field, FieldId, FieldStatus, MappingStatus, MappingSummary, Side,
};

use crate::registry::FieldRegistry;
use crate::store::MappingStore;

/// A field together with its current mapping status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView<'a> {
    pub field: &'a Field,
    pub status: FieldStatus,
}

/// Query surface used by rendering and export.
///
/// Names are resolved against the registry each time, so renames and
/// reorders are always reflected.
#[derive(Debug, Clone, Copy)]
pub struct MappingQuery<'a> {
    registry: &'a FieldRegistry,
    store: &'a MappingStore,
}

impl<'a> MappingQuery<'a> {
    pub fn new(registry: &'a FieldRegistry, store: &'a MappingStore) -> Self {
        Self { registry, store }
    }

    /// Status of a field, taken from the first correspondence (insertion
    /// order) that touches it on `side`.
    pub fn status_of(&self, field_id: &FieldId, side: Side) -> FieldStatus {
        self.store
            .first_touching(field_id, side)
            .map_or(FieldStatus::Unmapped, |c| c.status.into())
    }

    pub fn correspondences(&self) -> &'a [Correspondence] {
        self.store.correspondences()
    }

    /// Fields of one side in display order, with their status.
    pub fn field_views(&self, side: Side) -> Vec<FieldView<'a>> {
        self.registry
            .sequence(side)
            .iter()
            .map(|field| FieldView {
                field,
                status: self.status_of(&field.id, side),
            })
            .collect()
    }

    /// Export rows in store insertion order.
    ///
    /// A field id that no longer resolves is exported as the raw id.
    pub fn export_triples(&self) -> Vec<ExportTriple> {
        self.store
            .iter()
            .map(|c| ExportTriple {
                source_field_name: self.resolve(Side::Source, &c.source_field_id),
                target_field_name: self.resolve(Side::Target, &c.target_field_id),
                status: c.status,
            })
            .collect()
    }

    pub fn summary(&self) -> MappingSummary {
        let unmapped = |side: Side| {
            self.registry
                .sequence(side)
                .iter()
                .filter(|f| self.store.first_touching(&f.id, side).is_none())
                .count()
        };
        MappingSummary {
            total: self.store.len(),
            matched: self.store.count_with_status(MappingStatus::Matched),
            suggested: self.store.count_with_status(MappingStatus::Suggested),
            manual: self.store.count_with_status(MappingStatus::Manual),
            unmapped_source: unmapped(Side::Source),
            unmapped_target: unmapped(Side::Target),
        }
    }

    fn resolve(&self, side: Side, id: &FieldId) -> String {
        self.registry
            .name_of(side, id)
            .map_or_else(|| id.to_string(), str::to_string)
    }
}
