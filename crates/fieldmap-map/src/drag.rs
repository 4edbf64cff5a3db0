//! Drag gestures.
//!
//! A [`DragSession`] records what the user is dragging and where the pointer
//! is. It never touches mapping state; the session applies the result once,
//! when the drag ends on a valid target.

use serde::{Deserialize, Serialize};

use fieldmap_model::{Correspondence, CorrespondenceId, FieldId, MappingError, Side};

/// An in-progress drag.
#[derive(Debug, Clone, PartialEq)]
pub enum DragSession {
    /// A field picked up from one side, to reorder or to connect.
    Field { side: Side, field_id: FieldId },
    /// The handle of a connection line, moved vertically.
    Offset {
        correspondence_id: CorrespondenceId,
        origin_offset: f64,
        start_y: f64,
        current_y: f64,
    },
}

impl DragSession {
    pub fn field(side: Side, field_id: FieldId) -> Self {
        Self::Field { side, field_id }
    }

    pub fn offset(correspondence_id: CorrespondenceId, origin_offset: f64, start_y: f64) -> Self {
        Self::Offset {
            correspondence_id,
            origin_offset,
            start_y,
            current_y: start_y,
        }
    }

    /// Records a pointer move. Field drags ignore vertical position.
    pub fn update(&mut self, pointer_y: f64) {
        if let Self::Offset { current_y, .. } = self {
            *current_y = pointer_y;
        }
    }

    /// Vertical distance travelled since the drag began.
    pub fn delta(&self) -> f64 {
        match self {
            Self::Field { .. } => 0.0,
            Self::Offset {
                start_y, current_y, ..
            } => current_y - start_y,
        }
    }

    /// Offset the line would have if released now.
    pub fn preview_offset(&self) -> Option<f64> {
        match self {
            Self::Field { .. } => None,
            Self::Offset { origin_offset, .. } => Some(origin_offset + self.delta()),
        }
    }
}

/// The field a drag was released over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTarget {
    pub side: Side,
    pub field_id: FieldId,
}

impl DropTarget {
    pub fn new(side: Side, field_id: FieldId) -> Self {
        Self { side, field_id }
    }
}

/// What ending a drag did.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// Dropped on the other side: a manual correspondence was created.
    Connected(Correspondence),
    /// Dropped on the same side: the field moved.
    Reordered { side: Side, from: usize, to: usize },
    /// Dropped back on itself, or released with no target.
    Unchanged,
    /// The connection could not be made; state is unchanged.
    Rejected(MappingError),
    /// An offset drag was released and its new offset stored.
    OffsetCommitted {
        correspondence_id: CorrespondenceId,
        offset: f64,
    },
    /// The drag was abandoned.
    Cancelled,
}

impl DropOutcome {
    /// True if mapping or field state changed.
    pub fn is_applied(&self) -> bool {
        matches!(
            self,
            Self::Connected(_) | Self::Reordered { .. } | Self::OffsetCommitted { .. }
        )
    }
}
