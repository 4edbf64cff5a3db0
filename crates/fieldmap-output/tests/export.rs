use fieldmap_model::{ExportFormat, ExportTriple, MappingStatus};
use fieldmap_output::{OutputError, export, write_export};

fn sample() -> Vec<ExportTriple> {
    vec![
        ExportTriple {
            source_field_name: "customer_id".to_string(),
            target_field_name: "id".to_string(),
            status: MappingStatus::Matched,
        },
        ExportTriple {
            source_field_name: "email".to_string(),
            target_field_name: "emailAddress".to_string(),
            status: MappingStatus::Suggested,
        },
    ]
}

#[test]
fn json_export_document() {
    let json = export(&sample(), ExportFormat::Json).unwrap();
    insta::assert_snapshot!(json, @r#"
    {
      "connections": [
        {
          "source": "customer_id",
          "target": "id",
          "status": "matched"
        },
        {
          "source": "email",
          "target": "emailAddress",
          "status": "suggested"
        }
      ],
      "format": "json"
    }
    "#);
}

#[test]
fn image_is_rejected() {
    let err = export(&sample(), ExportFormat::Image).unwrap_err();
    assert!(matches!(
        err,
        OutputError::UnsupportedFormat {
            format: ExportFormat::Image
        }
    ));
}

#[test]
fn write_export_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join(ExportFormat::Csv.file_name());
    write_export(&path, &sample(), ExportFormat::Csv).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    let mut lines = written.lines();
    assert_eq!(lines.next(), Some("Source Field,Target Field,Status"));
    assert_eq!(lines.next(), Some(r#""customer_id","id","matched""#));
    assert_eq!(lines.count(), 1);
}

#[test]
fn write_export_does_not_create_file_for_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mapping.png");
    assert!(write_export(&path, &sample(), ExportFormat::Image).is_err());
    assert!(!path.exists());
}
