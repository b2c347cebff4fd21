//! Tests for components scanning, layer order resolution and catalog counts

#[cfg(test)]
mod tests {
    use crate::common::{Fixture, write_png};
    use layermix::MixerError;
    use layermix::catalog::LayerDirectory;
    use layermix::catalog::loader::{
        count_combinations, detect_canvas_size, list_variants, load, read_layer_order,
    };
    use layermix::io::configuration::DEFAULT_CANVAS_SIZE;
    use layermix::io::error::LayersOrderProblem;

    fn layer(name: &str, count: usize) -> LayerDirectory {
        let variants = (0..count).map(|i| format!("{i}.png")).collect();
        LayerDirectory::new(name, name, variants)
    }

    // Tests active layers follow the declared order, not the directory order
    // Verified by iterating directories instead of declarations
    #[test]
    fn test_active_layers_follow_declared_order() {
        let fixture = Fixture::new();
        fixture
            .layer("Background", &["sky"])
            .layer("Body", &["round", "square"])
            .layer("Accessory", &["hat"]);
        let order = fixture.order(&["Body", "Background", "Missing", "Accessory"]);

        let Ok(catalog) = load(&fixture.components(), &order) else {
            unreachable!("Catalog should load");
        };

        let names: Vec<&str> = catalog.active_layers().iter().map(LayerDirectory::name).collect();
        assert_eq!(names, vec!["Body", "Background", "Accessory"]);
        assert!(catalog.skipped_layers().is_empty());
    }

    // Tests undeclared directories are catalogued as skipped and never counted
    // Verified by counting skipped images into the totals
    #[test]
    fn test_undeclared_directories_are_skipped() {
        let fixture = Fixture::new();
        fixture
            .layer("Background", &["sky", "sea"])
            .layer("Extras", &["a", "b", "c"]);
        let order = fixture.order(&["Background"]);

        let Ok(catalog) = load(&fixture.components(), &order) else {
            unreachable!("Catalog should load");
        };

        assert_eq!(catalog.skipped_layers().len(), 1);
        assert_eq!(
            catalog.skipped_layers().first().map(LayerDirectory::len),
            Some(3)
        );
        assert_eq!(catalog.total_images(), 2);
        assert_eq!(catalog.possible_combinations(), 2);
    }

    // Tests missing components root fails with the components path error
    // Verified by degrading the scan failure to an empty catalog
    #[test]
    fn test_missing_components_root_fails() {
        let fixture = Fixture::new();
        let order = fixture.order(&["Background"]);

        let result = load(&fixture.root().join("does-not-exist"), &order);
        assert!(matches!(result, Err(MixerError::ComponentsPath { .. })));
    }

    // Tests missing order file fails with the order file error
    // Verified by treating an unreadable order file as empty
    #[test]
    fn test_missing_order_file_fails() {
        let fixture = Fixture::new();
        fixture.layer("Background", &["sky"]);

        let result = load(&fixture.components(), &fixture.root().join("missing.txt"));
        assert!(matches!(
            result,
            Err(MixerError::LayersOrderFile {
                reason: LayersOrderProblem::Unreadable(_),
                ..
            })
        ));
    }

    // Tests an order file naming no existing directory is rejected
    // Verified by removing the empty active set check
    #[test]
    fn test_no_active_layers_fails() {
        let fixture = Fixture::new();
        fixture.layer("Background", &["sky"]);
        let order = fixture.order(&["Nothing", "Here"]);

        let result = load(&fixture.components(), &order);
        assert!(matches!(
            result,
            Err(MixerError::LayersOrderFile {
                reason: LayersOrderProblem::NoActiveLayers,
                ..
            })
        ));
    }

    #[test]
    fn test_read_layer_order_ignores_blanks_and_repeats() {
        let fixture = Fixture::new();
        let path = fixture.file("order.txt", "Background\r\n\n  Body \nBackground\nHat\n");

        let Ok(order) = read_layer_order(&path) else {
            unreachable!("Order file should be readable");
        };
        assert_eq!(order, vec!["Background", "Body", "Hat"]);
    }

    // Tests only PNG files are listed, in name order, whatever the extension case
    // Verified by comparing extensions case-sensitively
    #[test]
    fn test_list_variants_filters_png() {
        let fixture = Fixture::new();
        let dir = fixture.components().join("Eyes");
        write_png(&dir.join("b.png"), (2, 2), [0, 0, 0, 255]);
        write_png(&dir.join("a.PNG"), (2, 2), [0, 0, 0, 255]);
        fixture.file("components/Eyes/rarity.json", "[]");
        fixture.file("components/Eyes/notes.txt", "hello");

        let Ok(variants) = list_variants(&dir) else {
            unreachable!("Layer should be listable");
        };
        assert_eq!(variants, vec!["a.PNG", "b.png"]);
    }

    // Tests the product skips empty layers
    // Verified by multiplying by zero for empty layers
    #[test]
    fn test_count_combinations_skips_empty_layers() {
        let layers = vec![layer("A", 3), layer("B", 0), layer("C", 4)];
        assert_eq!(count_combinations(&layers), (7, 12));
    }

    // Tests the product is forced to zero without images
    // Verified by returning the initial product of one
    #[test]
    fn test_count_combinations_zero_without_images() {
        let layers = vec![layer("A", 0), layer("B", 0)];
        assert_eq!(count_combinations(&layers), (0, 0));
    }

    // Tests canvas size comes from the first variant of the first active layer
    // Verified by probing the last layer instead
    #[test]
    fn test_canvas_size_from_first_active_variant() {
        let fixture = Fixture::new();
        write_png(&fixture.components().join("Top/a.png"), (3, 3), [0, 0, 0, 255]);
        write_png(&fixture.components().join("Bottom/a.png"), (12, 7), [0, 0, 0, 255]);
        fixture.layer("Empty", &[]);
        let order = fixture.order(&["Empty", "Bottom", "Top"]);

        let Ok(catalog) = load(&fixture.components(), &order) else {
            unreachable!("Catalog should load");
        };
        assert_eq!(catalog.canvas_size(), (12, 7));
    }

    // Tests the documented fallback when no variant exists
    // Verified by returning a zero-sized canvas
    #[test]
    fn test_canvas_size_defaults_without_variants() {
        let fixture = Fixture::new();
        fixture.layer("Empty", &[]);
        let order = fixture.order(&["Empty"]);

        let Ok(catalog) = load(&fixture.components(), &order) else {
            unreachable!("Catalog should load");
        };
        assert_eq!(catalog.canvas_size(), DEFAULT_CANVAS_SIZE);
        assert_eq!(catalog.total_images(), 0);
        assert_eq!(catalog.possible_combinations(), 0);
        assert_eq!(detect_canvas_size(&[]), DEFAULT_CANVAS_SIZE);
    }

    // Tests unreadable variants are passed over when probing the canvas
    // Verified by failing on the first unreadable header
    #[test]
    fn test_canvas_size_skips_unreadable_variant() {
        let fixture = Fixture::new();
        fixture.file("components/Base/a.png", "not an image");
        write_png(&fixture.components().join("Base/b.png"), (5, 9), [0, 0, 0, 255]);
        let order = fixture.order(&["Base"]);

        let Ok(catalog) = load(&fixture.components(), &order) else {
            unreachable!("Catalog should load");
        };
        assert_eq!(catalog.canvas_size(), (5, 9));
    }
}
