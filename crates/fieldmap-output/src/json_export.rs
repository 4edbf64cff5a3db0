//! JSON rendering of a mapping.

use serde::Serialize;

use fieldmap_model::{ExportFormat, ExportTriple};

use crate::error::Result;

#[derive(Debug, Serialize)]
struct ExportDocument<'a> {
    connections: &'a [ExportTriple],
    format: ExportFormat,
}

/// Pretty-printed `{"connections": [...], "format": ...}` document.
///
/// `format` is the tag the user picked and is written through unchanged.
pub fn export_json(triples: &[ExportTriple], format: ExportFormat) -> Result<String> {
    let document = ExportDocument {
        connections: triples,
        format,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

#[cfg(test)]
mod tests {
    use fieldmap_model::MappingStatus;

    use super::*;

    #[test]
    fn empty_mapping_has_empty_connections() {
        let json = export_json(&[], ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["connections"], serde_json::json!([]));
        assert_eq!(value["format"], "json");
    }

    #[test]
    fn uses_short_key_names() {
        let triples = [ExportTriple {
            source_field_name: "email".to_string(),
            target_field_name: "emailAddress".to_string(),
            status: MappingStatus::Manual,
        }];
        let json = export_json(&triples, ExportFormat::Json).unwrap();
        insta::assert_snapshot!(json, @r#"
        {
          "connections": [
            {
              "source": "email",
              "target": "emailAddress",
              "status": "manual"
            }
          ],
          "format": "json"
        }
        "#);
    }
}
