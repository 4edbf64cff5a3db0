//! Type-safe enumerations for the mapping model.
//!
//! Each enum round-trips through its lowercase wire name (`as_str` /
//! `FromStr`), which is also what serde uses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which of the two uploaded files a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Source,
    Target,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Source => "source",
            Side::Target => "target",
        }
    }

    /// Prefix used for registry-assigned field ids (`s1`, `t4`, ...).
    pub fn id_prefix(&self) -> char {
        match self {
            Side::Source => 's',
            Side::Target => 't',
        }
    }

    /// The other column of the mapping view.
    pub fn opposite(&self) -> Side {
        match self {
            Side::Source => Side::Target,
            Side::Target => Side::Source,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "source" | "s" => Ok(Side::Source),
            "target" | "t" => Ok(Side::Target),
            _ => Err(format!("Unknown side: {s}")),
        }
    }
}

/// Status of a single correspondence.
///
/// Allowed transitions are `Suggested -> Matched` and removal from any
/// status. `Matched` and `Manual` never go back to `Suggested`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingStatus {
    /// Proposed by the suggestion generator, not yet confirmed.
    Suggested,
    /// A suggestion the user accepted.
    Matched,
    /// Created by the user directly.
    Manual,
}

impl MappingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MappingStatus::Suggested => "suggested",
            MappingStatus::Matched => "matched",
            MappingStatus::Manual => "manual",
        }
    }

    /// Returns true once the user has confirmed the link in some way.
    pub fn is_confirmed(&self) -> bool {
        matches!(self, MappingStatus::Matched | MappingStatus::Manual)
    }

    /// Returns true if `self -> next` is a legal in-place transition.
    pub fn can_transition_to(&self, next: MappingStatus) -> bool {
        matches!(
            (self, next),
            (MappingStatus::Suggested, MappingStatus::Matched)
        )
    }
}

impl fmt::Display for MappingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MappingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "suggested" => Ok(MappingStatus::Suggested),
            "matched" => Ok(MappingStatus::Matched),
            "manual" => Ok(MappingStatus::Manual),
            _ => Err(format!("Unknown mapping status: {s}")),
        }
    }
}

/// Per-field status as shown next to each field in the mapping view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    Matched,
    Suggested,
    Manual,
    Unmapped,
}

impl FieldStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldStatus::Matched => "matched",
            FieldStatus::Suggested => "suggested",
            FieldStatus::Manual => "manual",
            FieldStatus::Unmapped => "unmapped",
        }
    }

    pub fn is_mapped(&self) -> bool {
        !matches!(self, FieldStatus::Unmapped)
    }
}

impl From<MappingStatus> for FieldStatus {
    fn from(status: MappingStatus) -> Self {
        match status {
            MappingStatus::Suggested => FieldStatus::Suggested,
            MappingStatus::Matched => FieldStatus::Matched,
            MappingStatus::Manual => FieldStatus::Manual,
        }
    }
}

impl fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Export format requested by the user.
///
/// `Image` is a screenshot of the mapping view and is produced by the
/// rendering layer, not by the exporters in this workspace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    #[default]
    Image,
    Json,
    Csv,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Image => "image",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    /// Default download file name for this format.
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Image => "field-mapping.png",
            ExportFormat::Json => "field-mapping.json",
            ExportFormat::Csv => "field-mapping.csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "image" | "png" => Ok(ExportFormat::Image),
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(format!("Unknown export format: {s}")),
        }
    }
}
