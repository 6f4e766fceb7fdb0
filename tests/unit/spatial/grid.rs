//! Tests for the fixed-size grid container

#[cfg(test)]
mod tests {
    use tilecollapse::AlgorithmError;
    use tilecollapse::spatial::TileGrid;

    // Tests (x, y) addressing over row-major input
    // Verified by indexing the backing array as [x, y]
    #[test]
    fn test_row_major_addressing() {
        let grid = TileGrid::from_row_major(3, 2, vec![0, 1, 2, 3, 4, 5])
            .expect("Failed to build grid");

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.len(), 6);
        assert_eq!(grid.get(2, 0), Some(&2));
        assert_eq!(grid.get(0, 1), Some(&3));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 2), None);
    }

    // Tests a cell count mismatch is reported instead of panicking
    // Verified by unwrapping the shape result
    #[test]
    fn test_row_major_shape_mismatch() {
        let result = TileGrid::from_row_major(2, 2, vec![0, 1, 2]);
        assert!(matches!(
            result,
            Err(AlgorithmError::InvalidParameter { parameter: "cells", .. })
        ));
    }

    // Tests positions and indexed iteration share the raster order
    // Verified by swapping the loop nesting in positions
    #[test]
    fn test_raster_order() {
        let grid = TileGrid::from_row_major(2, 2, vec!['a', 'b', 'c', 'd'])
            .expect("Failed to build grid");

        let positions: Vec<[usize; 2]> = grid.positions().collect();
        assert_eq!(positions, vec![[0, 0], [1, 0], [0, 1], [1, 1]]);

        let indexed: Vec<([usize; 2], char)> =
            grid.indexed_iter().map(|(p, c)| (p, *c)).collect();
        assert_eq!(
            indexed,
            vec![([0, 0], 'a'), ([1, 0], 'b'), ([0, 1], 'c'), ([1, 1], 'd')]
        );
    }

    // Tests checked access reports the offending position and grid size
    // Verified by swapping width and height in the error
    #[test]
    fn test_checked_out_of_bounds() {
        let mut grid = TileGrid::filled(4, 2, 0_u8).expect("Failed to build grid");

        match grid.checked(1, 5) {
            Err(AlgorithmError::OutOfBounds {
                position,
                grid_dimensions,
            }) => {
                assert_eq!(position, [1, 5]);
                assert_eq!(grid_dimensions, (4, 2));
            }
            other => panic!("expected OutOfBounds, got {other:?}"),
        }

        *grid.checked_mut(3, 1).expect("Failed to access cell") = 7;
        assert_eq!(grid.get(3, 1), Some(&7));
    }

    // Tests oversized grids are reported instead of panicking in the allocator
    // Verified by multiplying the dimensions unchecked
    #[test]
    fn test_oversized_grid_refused() {
        assert!(matches!(
            TileGrid::filled(usize::MAX, 2, 0_u8),
            Err(AlgorithmError::InvalidParameter {
                parameter: "grid size",
                ..
            })
        ));
        assert!(TileGrid::filled(usize::MAX, 1, 0_u8).is_err());
        assert!(TileGrid::from_row_major(usize::MAX, 3, vec![1_u8]).is_err());
        assert!(TileGrid::filled(3, 0, 0_u8).is_ok_and(|grid| grid.is_empty()));
    }

    // Tests map keeps the shape and positions
    // Verified by transposing inside map
    #[test]
    fn test_map_preserves_shape() {
        let grid = TileGrid::from_row_major(3, 1, vec![1, 2, 3]).expect("Failed to build grid");
        let doubled = grid.map(|value| value * 2);

        assert_eq!(doubled.width(), 3);
        assert_eq!(doubled.height(), 1);
        assert_eq!(doubled.iter().copied().collect::<Vec<_>>(), vec![2, 4, 6]);
    }
}
