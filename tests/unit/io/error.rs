//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use std::error::Error;
    use tilecollapse::AlgorithmError;
    use tilecollapse::io::error::{invalid_parameter, malformed_sample};
    use tilecollapse::spatial::TileType;

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = AlgorithmError::FileSystem {
            path: "/tmp/levels.json".into(),
            operation: "read",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(error.to_string().contains("/tmp/levels.json"));

        let json_error = serde_json::from_str::<u8>("x").expect_err("Parsing should fail");
        let dataset = AlgorithmError::Dataset {
            path: "levels.json".into(),
            source: json_error,
        };
        assert!(dataset.source().is_some());
    }

    // Tests plain validation errors carry no source
    // Verified by returning a source for every variant
    #[test]
    fn test_validation_errors_have_no_source() {
        let error = AlgorithmError::CatalogMismatch {
            ruleset: 4,
            solver: 6,
        };
        assert!(error.source().is_none());

        let message = error.to_string();
        assert!(message.contains("4 tiles"));
        assert!(message.contains("expects 6"));
    }

    // Tests a type mismatch names the tile and both types
    // Verified by printing only the requested type
    #[test]
    fn test_tile_type_mismatch_message() {
        let error = AlgorithmError::TileTypeMismatch {
            tile_index: 3,
            learned: TileType::Solid,
            requested: TileType::Coin,
        };
        let message = error.to_string();

        assert!(message.contains("Tile 3"));
        assert!(message.contains("solid"));
        assert!(message.contains("coin"));
        assert!(error.source().is_none());
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("scale", &0, &"must be between 1 and 64");
        let message = error.to_string();

        assert!(message.contains("scale"));
        assert!(message.contains("'0'"));
        assert!(message.contains("between 1 and 64"));
    }

    // Tests positional errors print x before y
    // Verified by printing the position array in storage order
    #[test]
    fn test_position_formatting() {
        let bounds = AlgorithmError::OutOfBounds {
            position: [7, 2],
            grid_dimensions: (5, 3),
        };
        assert!(bounds.to_string().contains("(7, 2)"));
        assert!(bounds.to_string().contains("5x3"));

        let contradiction = AlgorithmError::Contradiction {
            position: [1, 4],
            attempt: 2,
        };
        assert!(contradiction.to_string().contains("(1, 4)"));
        assert!(contradiction.to_string().contains("attempt 2"));
    }

    // Tests sample errors name the sample and both types
    // Verified by dropping the sample name from the message
    #[test]
    fn test_sample_errors() {
        let malformed = malformed_sample(&"cave_03", &"row 2 is short");
        assert!(malformed.to_string().contains("cave_03"));

        let inconsistent = AlgorithmError::InconsistentTileType {
            sample: "tower".to_string(),
            tile_index: 12,
            first: TileType::Solid,
            second: TileType::Ladder,
        };
        let message = inconsistent.to_string();
        assert!(message.contains("tower"));
        assert!(message.contains("Solid"));
        assert!(message.contains("Ladder"));
    }

    // Tests io errors convert through the question mark operator
    // Verified by removing the From implementation
    #[test]
    fn test_io_error_conversion() {
        let error: AlgorithmError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(error, AlgorithmError::FileSystem { .. }));
    }
}
