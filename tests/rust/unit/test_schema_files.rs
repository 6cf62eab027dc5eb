//! Schema loading from JSON and YAML files and predefined names

#[cfg(test)]
mod schema_file_tests {
    use std::fs;

    use tabgraph::graph_catalog::{load_node_specs, resolve_node_specs, GraphExportError};

    /// JSON schema with every optional field
    #[test]
    fn test_json_schema_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let schema_path = temp_dir.path().join("schema.json");
        fs::write(
            &schema_path,
            r#"[
  {"node_type": "Name",
   "columns": [{"colname": "forename", "rel_type": "FORNAME"},
               {"colname": "surname", "rel_type": "SURNAME"}],
   "id_prefix": "Name-"},
  {"node_type": "Address",
   "columns": [{"colname": "address", "rel_type": "LIVE_AT"}],
   "valname": "value",
   "id_prefix": "Address-",
   "id_start": 1000}
]"#,
        )
        .unwrap();

        let specs = load_node_specs(&schema_path).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].node_type, "NAME");
        assert_eq!(specs[0].columns.len(), 2);
        assert_eq!(specs[1].node_type, "ADDRESS");
        assert_eq!(specs[1].id_start, 1000);
    }

    /// YAML schema selected by extension
    #[test]
    fn test_yaml_schema_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let schema_path = temp_dir.path().join("schema.yml");
        fs::write(
            &schema_path,
            r#"
- node_type: company
  columns:
    - colname: employer
      rel_type: WORKS_AT
"#,
        )
        .unwrap();

        let specs = resolve_node_specs(schema_path.to_str().unwrap()).unwrap();
        assert_eq!(specs[0].node_type, "COMPANY");
        assert_eq!(specs[0].id_prefix, "node");
        assert_eq!(specs[0].value_field_name, "value");
    }

    /// A column entry without `colname` is reported as a missing field
    #[test]
    fn test_schema_file_missing_colname() {
        let temp_dir = tempfile::tempdir().unwrap();
        let schema_path = temp_dir.path().join("schema.json");
        fs::write(
            &schema_path,
            r#"[{"node_type": "Name", "columns": [{"rel_type": "FORNAME"}]}]"#,
        )
        .unwrap();

        let err = load_node_specs(&schema_path).unwrap_err();
        assert!(matches!(
            err,
            GraphExportError::MissingField { ref field, .. } if field == "colname"
        ));
    }

    /// Unreadable files are configuration read errors
    #[test]
    fn test_missing_schema_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = load_node_specs(temp_dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, GraphExportError::ConfigReadError { .. }));
    }

    /// Predefined names resolve when no such file exists
    #[test]
    fn test_predefined_reference() {
        let specs = resolve_node_specs("rp").unwrap();
        let types: Vec<_> = specs.iter().map(|s| s.node_type.as_str()).collect();
        assert_eq!(types, vec!["NAME", "ADDRESS"]);
    }
}
