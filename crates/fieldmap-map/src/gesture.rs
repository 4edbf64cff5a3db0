//! User gestures, as replayable commands.

use std::fmt;

use serde::{Deserialize, Serialize};

use fieldmap_model::{CorrespondenceId, FieldId, Side};

/// One user action against a mapping session.
///
/// Serialized with an `action` tag, e.g.
/// `{"action": "connect", "source": "s1", "target": "t2"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Gesture {
    Accept {
        id: CorrespondenceId,
    },
    AcceptAll,
    Connect {
        source: FieldId,
        target: FieldId,
    },
    Remove {
        id: CorrespondenceId,
    },
    Reorder {
        side: Side,
        field: FieldId,
        index: usize,
    },
    MoveUp {
        side: Side,
        field: FieldId,
    },
    MoveDown {
        side: Side,
        field: FieldId,
    },
    ClearSuggestions,
    ClearAll,
    SetOffset {
        id: CorrespondenceId,
        offset: f64,
    },
}

impl Gesture {
    /// Wire name of the action.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Accept { .. } => "accept",
            Self::AcceptAll => "accept_all",
            Self::Connect { .. } => "connect",
            Self::Remove { .. } => "remove",
            Self::Reorder { .. } => "reorder",
            Self::MoveUp { .. } => "move_up",
            Self::MoveDown { .. } => "move_down",
            Self::ClearSuggestions => "clear_suggestions",
            Self::ClearAll => "clear_all",
            Self::SetOffset { .. } => "set_offset",
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accept { id } | Self::Remove { id } => write!(f, "{} {id}", self.action()),
            Self::Connect { source, target } => write!(f, "connect {source} -> {target}"),
            Self::Reorder { side, field, index } => {
                write!(f, "reorder {side} {field} to {index}")
            }
            Self::MoveUp { side, field } | Self::MoveDown { side, field } => {
                write!(f, "{} {side} {field}", self.action())
            }
            Self::SetOffset { id, offset } => write!(f, "set_offset {id} {offset}"),
            Self::AcceptAll | Self::ClearSuggestions | Self::ClearAll => {
                f.write_str(self.action())
            }
        }
    }
}
