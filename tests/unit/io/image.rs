//! Tests for PNG level previews

#[cfg(test)]
mod tests {
    use crate::{AIR, COIN, GROUND};
    use tilecollapse::AlgorithmError;
    use tilecollapse::algorithm::level::GeneratedLevel;
    use tilecollapse::io::image::{export_level_as_png, render_level};
    use tilecollapse::spatial::{TileGrid, TileType};

    fn level() -> GeneratedLevel {
        GeneratedLevel {
            tiles: TileGrid::from_row_major(2, 2, vec![AIR, COIN, GROUND, GROUND])
                .expect("Failed to build grid"),
            attempts: 1,
            fallbacks: 0,
        }
    }

    // Tests each tile becomes a scale x scale block of its type colour
    // Verified by swapping x and y when looking up tiles
    #[test]
    fn test_render_blocks() {
        let img = render_level(&level(), 3).expect("Failed to render level");

        assert_eq!(img.dimensions(), (6, 6));
        assert_eq!(img.get_pixel(0, 0).0, TileType::None.preview_color());
        assert_eq!(img.get_pixel(5, 2).0, TileType::Coin.preview_color());
        assert_eq!(img.get_pixel(1, 4).0, TileType::Solid.preview_color());
    }

    // Tests out-of-range scales are refused
    // Verified by removing the zero check
    #[test]
    fn test_render_scale_limits() {
        assert!(matches!(
            render_level(&level(), 0),
            Err(AlgorithmError::InvalidParameter { parameter: "scale", .. })
        ));
        assert!(render_level(&level(), 65).is_err());
    }

    // Tests scaled dimensions past u32 are refused
    // Verified by casting the tile count to u32 before scaling
    #[test]
    fn test_render_dimension_overflow() {
        let wide = usize::try_from(u32::MAX).expect("Failed to widen u32");
        let level = GeneratedLevel {
            tiles: TileGrid::from_row_major(wide, 0, Vec::new()).expect("Failed to build grid"),
            attempts: 1,
            fallbacks: 0,
        };

        assert!(matches!(
            render_level(&level, 2),
            Err(AlgorithmError::InvalidParameter {
                parameter: "preview size",
                ..
            })
        ));
    }

    // Tests export creates missing directories and writes a PNG
    // Verified by skipping directory creation
    #[test]
    fn test_export_png() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("previews").join("level.png");

        export_level_as_png(&level(), 2, &path).expect("Failed to export level");

        let reloaded = image::open(&path).expect("Failed to reopen image");
        assert_eq!((reloaded.width(), reloaded.height()), (4, 4));
    }
}
