//! Correspondence types for source-to-target field mapping.

use serde::{Deserialize, Serialize};

use crate::enums::{MappingStatus, Side};
use crate::ids::{CorrespondenceId, FieldId};

/// A link between one source field and one target field.
///
/// Fields are referenced by id only, so reordering either sequence never
/// invalidates a correspondence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correspondence {
    pub id: CorrespondenceId,
    pub source_field_id: FieldId,
    pub target_field_id: FieldId,
    pub status: MappingStatus,
    /// Presentation-only vertical offset of the drawn connection line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_offset: Option<f64>,
}

impl Correspondence {
    pub fn new(
        id: CorrespondenceId,
        source_field_id: FieldId,
        target_field_id: FieldId,
        status: MappingStatus,
    ) -> Self {
        Self {
            id,
            source_field_id,
            target_field_id,
            status,
            visual_offset: None,
        }
    }

    /// The field this correspondence references on `side`.
    pub fn field_on(&self, side: Side) -> &FieldId {
        match side {
            Side::Source => &self.source_field_id,
            Side::Target => &self.target_field_id,
        }
    }

    /// True if `field_id` is this correspondence's endpoint on `side`.
    pub fn touches(&self, field_id: &FieldId, side: Side) -> bool {
        self.field_on(side) == field_id
    }

    /// True if this correspondence links `a` and `b`, in either order.
    pub fn connects(&self, a: &FieldId, b: &FieldId) -> bool {
        (&self.source_field_id == a && &self.target_field_id == b)
            || (&self.source_field_id == b && &self.target_field_id == a)
    }
}

/// Export-ready view of one correspondence with names resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportTriple {
    #[serde(rename = "source")]
    pub source_field_name: String,
    #[serde(rename = "target")]
    pub target_field_name: String,
    pub status: MappingStatus,
}

/// Counts shown alongside the mapping view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingSummary {
    /// Total number of correspondences.
    pub total: usize,
    /// Accepted suggestions.
    pub matched: usize,
    /// Pending suggestions.
    pub suggested: usize,
    /// User-created links.
    pub manual: usize,
    /// Source fields with no correspondence.
    pub unmapped_source: usize,
    /// Target fields with no correspondence.
    pub unmapped_target: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corr(source: &str, target: &str) -> Correspondence {
        Correspondence::new(
            CorrespondenceId::sequential(1),
            FieldId::new(source).unwrap(),
            FieldId::new(target).unwrap(),
            MappingStatus::Suggested,
        )
    }

    #[test]
    fn connects_is_unordered() {
        let c = corr("s1", "t2");
        let s1 = FieldId::new("s1").unwrap();
        let t2 = FieldId::new("t2").unwrap();
        assert!(c.connects(&s1, &t2));
        assert!(c.connects(&t2, &s1));
        assert!(!c.connects(&s1, &s1));
    }

    #[test]
    fn touches_checks_side() {
        let c = corr("s1", "t2");
        let s1 = FieldId::new("s1").unwrap();
        assert!(c.touches(&s1, Side::Source));
        assert!(!c.touches(&s1, Side::Target));
    }

    #[test]
    fn offset_is_omitted_when_unset() {
        let c = corr("s1", "t1");
        let json = serde_json::to_value(&c).unwrap();
        assert!(json.get("visual_offset").is_none());
        assert_eq!(json["status"], "suggested");
    }
}
