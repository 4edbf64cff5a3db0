pub mod enums;
pub mod error;
pub mod field;
pub mod ids;
pub mod mapping;

pub use enums::{ExportFormat, FieldStatus, MappingStatus, Side};
pub use error::{MappingError, Result};
pub use field::{DEFAULT_FIELD_TYPE, Field, FieldSequence};
pub use ids::{CorrespondenceId, FieldId};
pub use mapping::{Correspondence, ExportTriple, MappingSummary};
