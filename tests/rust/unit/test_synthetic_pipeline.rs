//! Synthetic people fed through the graph export

#[cfg(test)]
mod synthetic_pipeline_tests {
    use std::collections::HashSet;
    use std::fs;

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tabgraph::graph_catalog::{predefined_schema, RANDOM_PROPERTY_SCHEMA};
    use tabgraph::graph_export::{build_dataset, write_rows_atomically, DataSet, DEFAULT_RECORD_TYPE};
    use tabgraph::synthetic::{generate_people, CorpusFaker};
    use tabgraph::utils::Row;

    /// Generated people satisfy the node/relationship count invariants
    #[test]
    fn test_generated_people_graph_invariants() {
        let people: Vec<Row> =
            generate_people(StdRng::seed_from_u64(2024), CorpusFaker, 50).collect();
        let specs = predefined_schema(RANDOM_PROPERTY_SCHEMA).unwrap();

        let graph = build_dataset(&people, &specs, DEFAULT_RECORD_TYPE).unwrap();

        let names: HashSet<&str> = people
            .iter()
            .flat_map(|p| [p["forename"].as_str(), p["surname"].as_str()])
            .collect();
        let addresses: HashSet<&str> = people.iter().map(|p| p["address"].as_str()).collect();

        assert_eq!(
            graph.nodes.len(),
            people.len() + names.len() + addresses.len()
        );
        assert_eq!(graph.relationships.len(), 3 * people.len());
        assert!(addresses.len() <= 50);
    }

    /// Generated CSV can be read back and converted
    #[test]
    fn test_generate_then_convert_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let people_path = temp_dir.path().join("people.csv");
        let mut rng = StdRng::seed_from_u64(17);

        let written =
            write_rows_atomically(&people_path, generate_people(&mut rng, CorpusFaker, 10), b',')
                .unwrap();
        assert!((10..=60).contains(&written));

        let specs = predefined_schema(RANDOM_PROPERTY_SCHEMA).unwrap();
        let dataset = DataSet::from_csv(
            fs::File::open(&people_path).unwrap(),
            b',',
            &specs,
            DEFAULT_RECORD_TYPE,
        )
        .unwrap();
        assert_eq!(dataset.records.len(), written);

        let prefix = temp_dir.path().join("graph");
        dataset.to_graph_csv(&prefix, b',').unwrap();

        let relationships = fs::read_to_string(temp_dir.path().join("graph.relationships")).unwrap();
        assert_eq!(relationships.lines().count(), 3 * written + 1);
    }
}
