//! Tests for adjacency learning from samples

#[cfg(test)]
mod tests {
    use crate::{AIR, GROUND, ruleset, sample};
    use tilecollapse::analysis::samples::Sample;
    use tilecollapse::spatial::{Direction, TileType, TileVisual};
    use tilecollapse::{AlgorithmError, RulesetBuilder};

    // Tests a pair of tiles records one observation each way
    // Verified by recording the centre instead of the neighbour
    #[test]
    fn test_horizontal_pair_counts() {
        let rules = ruleset(&[&[".#"]]);

        let right = rules
            .entry(0, Direction::Right, 1)
            .expect("Failed to read entry");
        assert_eq!(right.count, 1);
        assert_eq!(right.block_type, TileType::Solid);

        let left = rules
            .entry(1, Direction::Left, 0)
            .expect("Failed to read entry");
        assert_eq!(left.count, 1);
        assert_eq!(left.block_type, TileType::None);

        assert_eq!(rules.observation_count(0, Direction::Left), 0);
        assert_eq!(rules.observation_count(0, Direction::Top), 0);
    }

    // Tests each centre records one observation per in-bounds neighbour
    // Verified by counting out-of-bounds neighbours as air
    #[test]
    fn test_observations_match_in_bounds_neighbours() {
        let tiles: Vec<TileVisual> = (0..9)
            .map(|index| TileVisual::new(index, TileType::Solid))
            .collect();
        let grid = Sample::new("distinct", 3, 3, tiles).expect("Failed to build sample");
        let rules = RulesetBuilder::new(9)
            .build(&[grid])
            .expect("Failed to build ruleset");

        for centre in 0..9 {
            let (x, y) = (centre % 3, centre / 3);
            for direction in Direction::ALL {
                let expected = u64::from(direction.step(x, y, 3, 3).is_some());
                assert_eq!(
                    rules.observation_count(centre, direction),
                    expected,
                    "centre {centre} {direction:?}"
                );
            }
        }

        // Centre cell sees the bottom-right corner diagonally
        let corner = rules
            .entry(4, Direction::BottomRight, 8)
            .expect("Failed to read entry");
        assert_eq!(corner.count, 1);
    }

    // Tests sample order does not change the learned table
    // Verified by overwriting counts instead of adding them
    #[test]
    fn test_sample_order_independent() {
        let first = sample("first", &["..", "##"]);
        let second = sample("second", &[".o.", "###"]);
        let builder = RulesetBuilder::new(4);

        let forward = builder
            .build(&[first.clone(), second.clone()])
            .expect("Failed to build ruleset");
        let backward = builder
            .build(&[second, first])
            .expect("Failed to build ruleset");

        assert_eq!(forward, backward);
    }

    // Tests counts accumulate across samples
    // Verified by resetting the table per sample
    #[test]
    fn test_counts_accumulate() {
        let rules = ruleset(&[&[".", "#"], &[".", "#"], &["#", "."]]);

        let below_air = rules
            .entry(0, Direction::Bottom, 1)
            .expect("Failed to read entry");
        assert_eq!(below_air.count, 2);
        assert_eq!(rules.tile_frequencies().first(), Some(&3));
        assert_eq!(rules.tile_frequencies().get(1), Some(&3));
    }

    // Tests unobserved pairs still carry the candidate's learned type
    // Verified by removing the backfill pass
    #[test]
    fn test_unobserved_entries_carry_candidate_type() {
        let rules = ruleset(&[&[".#"]]);

        let never = rules
            .entry(0, Direction::Left, 1)
            .expect("Failed to read entry");
        assert_eq!(never.count, 0);
        assert_eq!(never.block_type, TileType::Solid);

        // Index 2 never appears, so nothing is known about it
        assert_eq!(rules.block_type_of(1), Some(TileType::Solid));
        assert_eq!(rules.block_type_of(2), None);
    }

    // Tests tile indices beyond the catalog are malformed input
    // Verified by silently skipping out-of-range indices
    #[test]
    fn test_index_outside_catalog_rejected() {
        let grid = Sample::new("wide", 2, 1, vec![AIR, TileVisual::new(5, TileType::Coin)])
            .expect("Failed to build sample");
        let result = RulesetBuilder::new(4).build(&[grid]);

        assert!(matches!(
            result,
            Err(AlgorithmError::MalformedSample { ref sample, .. }) if sample == "wide"
        ));
    }

    // Tests one index may not change type between samples
    // Verified by letting the later type win
    #[test]
    fn test_inconsistent_block_type_rejected() {
        let first = Sample::new("a", 1, 1, vec![GROUND]).expect("Failed to build sample");
        let second = Sample::new("b", 1, 1, vec![TileVisual::new(1, TileType::Ladder)])
            .expect("Failed to build sample");

        match RulesetBuilder::new(4).build(&[first, second]) {
            Err(AlgorithmError::InconsistentTileType {
                sample,
                tile_index,
                first,
                second,
            }) => {
                assert_eq!(sample, "b");
                assert_eq!(tile_index, 1);
                assert_eq!(first, TileType::Solid);
                assert_eq!(second, TileType::Ladder);
            }
            other => panic!("expected InconsistentTileType, got {other:?}"),
        }
    }

    // Tests an empty catalog is refused
    // Verified by allocating a zero-sized table
    #[test]
    fn test_zero_catalog_rejected() {
        assert!(matches!(
            RulesetBuilder::new(0).build(&[]),
            Err(AlgorithmError::InvalidParameter { .. })
        ));
    }
}
