//! Fields and ordered field sequences.

use serde::{Deserialize, Serialize};

use crate::enums::Side;
use crate::error::{MappingError, Result};
use crate::ids::FieldId;

/// Declared type given to ingested columns when none is supplied.
pub const DEFAULT_FIELD_TYPE: &str = "string";

/// A named column of one of the uploaded files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Stable identity, assigned once at ingestion.
    pub id: FieldId,
    /// Column name as it appeared in the file header.
    pub name: String,
    /// Declared column type (`"string"` by default).
    pub declared_type: String,
    /// Current position within the owning sequence.
    pub sequence_index: usize,
}

/// Ordered fields of one side.
///
/// Ids are unique within a sequence and `sequence_index` always equals the
/// field's position. Only the field registry holds a mutable reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSequence {
    side: Side,
    fields: Vec<Field>,
}

impl FieldSequence {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            fields: Vec::new(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    /// Field at a given position.
    pub fn at(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    /// Field with a given id.
    pub fn get(&self, id: &FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| &f.id == id)
    }

    pub fn contains(&self, id: &FieldId) -> bool {
        self.get(id).is_some()
    }

    /// Current position of a field.
    pub fn position(&self, id: &FieldId) -> Option<usize> {
        self.fields.iter().position(|f| &f.id == id)
    }

    /// Field names in sequence order.
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Field ids in sequence order.
    pub fn ids(&self) -> Vec<&FieldId> {
        self.fields.iter().map(|f| &f.id).collect()
    }

    /// Appends a field at the end of the sequence.
    ///
    /// Rejects an id already present in the sequence.
    pub fn push(
        &mut self,
        id: FieldId,
        name: impl Into<String>,
        declared_type: impl Into<String>,
    ) -> Result<&Field> {
        if self.contains(&id) {
            return Err(MappingError::InvalidId(id.as_str().to_string()));
        }
        let sequence_index = self.fields.len();
        self.fields.push(Field {
            id,
            name: name.into(),
            declared_type: declared_type.into(),
            sequence_index,
        });
        Ok(&self.fields[sequence_index])
    }

    /// Moves a field to `new_index`, shifting the fields in between by one.
    ///
    /// Returns the field's previous position.
    pub fn move_to(&mut self, id: &FieldId, new_index: usize) -> Result<usize> {
        let Some(from) = self.position(id) else {
            return Err(MappingError::FieldNotFound {
                side: self.side,
                id: id.clone(),
            });
        };
        if new_index >= self.fields.len() {
            return Err(MappingError::OutOfRange {
                side: self.side,
                index: new_index,
                len: self.fields.len(),
            });
        }
        if from != new_index {
            let field = self.fields.remove(from);
            self.fields.insert(new_index, field);
            self.reindex(from.min(new_index), from.max(new_index));
        }
        Ok(from)
    }

    fn reindex(&mut self, lo: usize, hi: usize) {
        for (idx, field) in self.fields.iter_mut().enumerate().take(hi + 1).skip(lo) {
            field.sequence_index = idx;
        }
    }
}

impl<'a> IntoIterator for &'a FieldSequence {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
