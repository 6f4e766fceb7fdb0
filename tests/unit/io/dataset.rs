//! Tests for dataset loading and level export

#[cfg(test)]
mod tests {
    use crate::{AIR, GROUND};
    use std::fs;
    use std::path::Path;
    use tilecollapse::AlgorithmError;
    use tilecollapse::algorithm::level::GeneratedLevel;
    use tilecollapse::io::dataset::{Dataset, SampleRecord, level_record, save_level};
    use tilecollapse::spatial::{Direction, TileGrid, TileType};

    const DATASET: &str = r#"{
        "catalogSize": 3,
        "samples": [
            { "name": "intro", "width": 2, "height": 1,
              "tiles": [ { "tileIndex": 0, "blockType": 0 },
                         { "tileIndex": 1, "blockType": 1 } ] },
            { "width": 1, "height": 2,
              "tiles": [ { "tileIndex": 0, "blockType": 0 },
                         { "tileIndex": 1, "blockType": 1 } ] }
        ]
    }"#;

    // Tests parsing names samples and keeps the declared catalog
    // Verified by ignoring the declared catalog size
    #[test]
    fn test_from_json_str() {
        let dataset =
            Dataset::from_json_str(DATASET, Path::new("inline.json")).expect("Failed to parse");

        assert_eq!(dataset.catalog_size, 3);
        assert_eq!(dataset.samples.len(), 2);
        assert_eq!(dataset.samples.first().map(|s| s.name()), Some("intro"));
        assert_eq!(dataset.samples.get(1).map(|s| s.name()), Some("sample 1"));

        let rules = dataset.ruleset().expect("Failed to build ruleset");
        assert_eq!(rules.catalog_size(), 3);
        assert_eq!(
            rules.entry(0, Direction::Bottom, 1).map(|e| e.count),
            Some(1)
        );
    }

    // Tests the catalog size is inferred from the largest index when absent
    // Verified by inferring the largest index instead of one past it
    #[test]
    fn test_catalog_size_inferred() {
        let json = r#"{ "samples": [ { "width": 1, "height": 1,
                        "tiles": [ { "tileIndex": 4, "blockType": 5 } ] } ] }"#;
        let dataset = Dataset::from_json_str(json, Path::new("inline.json")).expect("Failed to parse");

        assert_eq!(dataset.catalog_size, 5);
        let rules = dataset.ruleset().expect("Failed to build ruleset");
        assert_eq!(rules.block_type_of(4), Some(TileType::Coin));
    }

    // Tests invalid JSON and empty datasets are reported
    // Verified by defaulting to an empty dataset on parse failure
    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            Dataset::from_json_str("{ not json", Path::new("broken.json")),
            Err(AlgorithmError::Dataset { .. })
        ));
        assert!(matches!(
            Dataset::from_json_str(r#"{ "samples": [] }"#, Path::new("empty.json")),
            Err(AlgorithmError::InvalidParameter { .. })
        ));

        let short = r#"{ "samples": [ { "name": "short", "width": 2, "height": 2,
                         "tiles": [ { "tileIndex": 0, "blockType": 0 } ] } ] }"#;
        assert!(matches!(
            Dataset::from_json_str(short, Path::new("short.json")),
            Err(AlgorithmError::MalformedSample { .. })
        ));
    }

    // Tests a lone sample file is a one-sample dataset named after the file
    // Verified by requiring the samples wrapper in every file
    #[test]
    fn test_single_sample_file() {
        let json = r#"{ "width": 2, "height": 1,
                        "tiles": [ { "tileIndex": 0, "blockType": 0 },
                                   { "tileIndex": 1, "blockType": 1 } ] }"#;
        let dataset =
            Dataset::from_json_str(json, Path::new("maps/bridge.json")).expect("Failed to parse");

        assert_eq!(dataset.catalog_size, 2);
        assert_eq!(dataset.samples.first().map(|s| s.name()), Some("bridge"));
    }

    // Tests a directory loads every JSON file in name order
    // Verified by reading files in directory order without sorting
    #[test]
    fn test_load_directory() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let sample = |index: usize| {
            format!(
                r#"{{ "width": 1, "height": 1, "tiles": [ {{ "tileIndex": {index}, "blockType": 1 }} ] }}"#
            )
        };
        fs::write(dir.path().join("b.json"), sample(1)).expect("Failed to write sample");
        fs::write(dir.path().join("a.json"), sample(0)).expect("Failed to write sample");
        fs::write(dir.path().join("notes.txt"), "ignored").expect("Failed to write notes");

        let dataset = Dataset::load(dir.path(), None).expect("Failed to load directory");

        let names: Vec<&str> = dataset.samples.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(dataset.catalog_size, 2);

        let overridden = Dataset::load(dir.path(), Some(8)).expect("Failed to load directory");
        assert_eq!(overridden.catalog_size, 8);
    }

    // Tests missing files surface as file system errors
    // Verified by mapping read failures to dataset errors
    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let result = Dataset::load(&dir.path().join("missing.json"), None);

        assert!(matches!(
            result,
            Err(AlgorithmError::FileSystem {
                operation: "read",
                ..
            })
        ));
    }

    // Tests a saved level reloads as a one-sample dataset
    // Verified by writing tiles column-major
    #[test]
    fn test_save_level_round_trip() {
        let level = GeneratedLevel {
            tiles: TileGrid::from_row_major(2, 1, vec![AIR, GROUND]).expect("Failed to build grid"),
            attempts: 1,
            fallbacks: 0,
        };
        let record = level_record(&level, "out");
        assert_eq!(record.tiles, vec![AIR, GROUND]);

        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("out_level.json");
        save_level(&level, "out", &path).expect("Failed to save level");

        let json = fs::read_to_string(&path).expect("Failed to read level");
        let reloaded: SampleRecord = serde_json::from_str(&json).expect("Failed to parse level");
        assert_eq!(reloaded, record);

        let sample = reloaded.into_sample("unused").expect("Failed to convert record");
        assert_eq!(sample.name(), "out");
        assert_eq!(sample.get(1, 0), Some(&GROUND));
    }
}
