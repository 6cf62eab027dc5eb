//! End-to-end conversion of CSV records into `.nodes`/`.relationships` files

#[cfg(test)]
mod graph_export_tests {
    use std::fs;

    use tabgraph::graph_catalog::{
        predefined_schema, ColumnSpec, GraphExportError, NodeSpec, RANDOM_PROPERTY_SCHEMA,
    };
    use tabgraph::graph_export::{DataSet, DEFAULT_RECORD_TYPE};

    const PEOPLE_CSV: &str = "forename,surname,address\nAmy,Li,1 Rd\nBo,Li,1 Rd\n";

    fn rp_schema() -> Vec<NodeSpec> {
        predefined_schema(RANDOM_PROPERTY_SCHEMA).unwrap()
    }

    /// The household scenario writes both files with bulk-import headers
    #[test]
    fn test_convert_household_to_graph_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let prefix = temp_dir.path().join("graph");

        let dataset =
            DataSet::from_csv(PEOPLE_CSV.as_bytes(), b',', &rp_schema(), DEFAULT_RECORD_TYPE)
                .unwrap();
        dataset.to_graph_csv(&prefix, b',').unwrap();

        let nodes = fs::read_to_string(temp_dir.path().join("graph.nodes")).unwrap();
        assert_eq!(
            nodes,
            "value,id:ID,:LABEL\n\
             Record,Record-0,Record\n\
             Record,Record-1,Record\n\
             Amy,Name-0,NAME\n\
             Bo,Name-1,NAME\n\
             Li,Name-2,NAME\n\
             1 Rd,Address-0,ADDRESS\n"
        );

        let relationships =
            fs::read_to_string(temp_dir.path().join("graph.relationships")).unwrap();
        assert_eq!(
            relationships,
            ":START_ID,:TYPE,:END_ID\n\
             Record-0,FORNAME,Name-0\n\
             Record-1,FORNAME,Name-1\n\
             Record-0,SURNAME,Name-2\n\
             Record-1,SURNAME,Name-2\n\
             Record-0,LIVE_AT,Address-0\n\
             Record-1,LIVE_AT,Address-0\n"
        );
    }

    /// A record missing a schema column aborts the whole build
    #[test]
    fn test_missing_column_aborts() {
        let csv = "forename,surname\nAmy,Li\n";

        let result = DataSet::from_csv(csv.as_bytes(), b',', &rp_schema(), DEFAULT_RECORD_TYPE);
        assert!(matches!(
            result,
            Err(GraphExportError::MissingField { ref field, .. }) if field == "address"
        ));
    }

    /// A header-only input has no rows to infer the node header from
    #[test]
    fn test_header_only_input_is_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let prefix = temp_dir.path().join("graph");

        let dataset = DataSet::from_csv(
            "forename,surname,address\n".as_bytes(),
            b',',
            &rp_schema(),
            DEFAULT_RECORD_TYPE,
        )
        .unwrap();
        let err = dataset.to_graph_csv(&prefix, b',').unwrap_err();

        assert!(matches!(err, GraphExportError::EmptyInput { .. }));
        assert!(!temp_dir.path().join("graph.nodes").exists());
        assert!(!temp_dir.path().join("graph.relationships").exists());
    }

    /// Attribute nodes keyed by a custom value field cannot share the node file
    /// with record nodes, so the export fails without touching existing files
    #[test]
    fn test_custom_value_field_conflicts_with_record_nodes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let prefix = temp_dir.path().join("graph");
        let nodes_path = temp_dir.path().join("graph.nodes");
        fs::write(&nodes_path, "previous export\n").unwrap();

        let specs = vec![
            NodeSpec::new("City", vec![ColumnSpec::new("city", "IN")]).with_value_field("name"),
        ];
        let dataset =
            DataSet::from_csv("city\nLeeds\n".as_bytes(), b',', &specs, "Person").unwrap();
        let err = dataset.to_graph_csv(&prefix, b',').unwrap_err();

        assert!(matches!(err, GraphExportError::SchemaMismatch { row: 1, .. }));
        assert_eq!(fs::read_to_string(&nodes_path).unwrap(), "previous export\n");
    }

    /// Node and relationship counts follow the record and distinct-value counts
    #[test]
    fn test_counts_match_records_and_distinct_values() {
        let mut csv = String::from("forename,surname,address\n");
        let forenames = ["Amy", "Bo", "Cy", "Di"];
        for i in 0..20 {
            csv.push_str(&format!(
                "{},{},{} Mill Lane\n",
                forenames[i % 4],
                if i % 2 == 0 { "Smith" } else { "Jones" },
                i % 5
            ));
        }

        let dataset =
            DataSet::from_csv(csv.as_bytes(), b',', &rp_schema(), DEFAULT_RECORD_TYPE).unwrap();

        // 4 forenames + 2 surnames, 5 addresses
        assert_eq!(dataset.records.len(), 20);
        assert_eq!(dataset.graph.nodes.len(), 20 + 6 + 5);
        assert_eq!(dataset.graph.relationships.len(), 2 * 20 + 20);
    }

    /// Tab-delimited input and output
    #[test]
    fn test_tab_delimited_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let prefix = temp_dir.path().join("tsv");
        let specs = vec![NodeSpec::new("City", vec![ColumnSpec::new("city", "IN")])
            .with_id_prefix("c")
            .with_id_start(1)];

        let dataset = DataSet::from_csv(
            "who\tcity\nAmy\tLeeds\n".as_bytes(),
            b'\t',
            &specs,
            DEFAULT_RECORD_TYPE,
        )
        .unwrap();
        dataset.to_graph_csv(&prefix, b'\t').unwrap();

        let relationships = fs::read_to_string(temp_dir.path().join("tsv.relationships")).unwrap();
        assert_eq!(relationships, ":START_ID\t:TYPE\t:END_ID\nRecord-0\tIN\tc1\n");
    }
}
