//! Field mapping engine.
//!
//! Holds the two field sequences of a mapping, seeds positional suggestions,
//! and maintains the set of correspondences as the user edits them.
//!
//! Components, leaf to root:
//!
//! - [`FieldRegistry`]: owns the source and target [`FieldSequence`]s.
//! - [`SuggestionGenerator`]: seeds the initial `suggested` links once.
//! - [`MappingStore`]: owns correspondences and their invariants.
//! - [`ReorderEngine`]: moves fields without touching the store.
//! - [`MappingQuery`]: read-only projections for rendering and export.
//!
//! [`MappingSession`] ties them together and applies user [`Gesture`]s.
//!
//! [`FieldSequence`]: fieldmap_model::FieldSequence

#![deny(unsafe_code)]

mod drag;
mod gesture;
mod query;
mod registry;
mod reorder;
mod session;
mod store;
mod suggest;
mod utils;

pub use drag::{DragSession, DropOutcome, DropTarget};
pub use gesture::Gesture;
pub use query::{FieldView, MappingQuery};
pub use registry::FieldRegistry;
pub use reorder::ReorderEngine;
pub use session::{MappingSession, SharedMappingSession};
pub use store::MappingStore;
pub use suggest::{
    DEFAULT_MIN_SIMILARITY, NameSimilarityPolicy, PositionalPolicy, SuggestionGenerator,
    SuggestionPolicy,
};
pub use utils::normalize_name;
