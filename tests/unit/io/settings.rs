//! Tests for settings persistence and input validation

#[cfg(test)]
mod tests {
    use crate::common::Fixture;
    use layermix::MixerError;
    use layermix::io::settings::MixerSettings;
    use std::path::PathBuf;

    fn valid(fixture: &Fixture) -> MixerSettings {
        fixture.layer("Body", &["red"]);
        MixerSettings {
            components_path: Some(fixture.components()),
            layers_order_path: Some(fixture.order(&["Body"])),
            exceptions_path: None,
            rarity_filename: None,
        }
    }

    fn rejected_parameter(settings: &MixerSettings) -> Option<&'static str> {
        match settings.to_paths() {
            Err(MixerError::InvalidParameter { parameter, .. }) => Some(parameter),
            _ => None,
        }
    }

    #[test]
    fn test_save_then_load() {
        let fixture = Fixture::new();
        let path = fixture.root().join("config.json");
        let settings = MixerSettings {
            rarity_filename: Some("rarity.json".to_string()),
            ..valid(&fixture)
        };

        assert!(settings.save(&path).is_ok());
        assert_eq!(MixerSettings::load(&path), Some(settings));
    }

    // Tests missing or malformed settings files are treated as absent
    // Verified by failing the run on a bad settings file
    #[test]
    fn test_load_tolerates_bad_files() {
        let fixture = Fixture::new();
        assert_eq!(MixerSettings::load(&fixture.root().join("none.json")), None);

        let broken = fixture.file("broken.json", "{ components_path: ");
        assert_eq!(MixerSettings::load(&broken), None);

        let partial = fixture.file("partial.json", r#"{"rarity_filename": "w.json"}"#);
        assert_eq!(
            MixerSettings::load(&partial).and_then(|s| s.rarity_filename),
            Some("w.json".to_string())
        );
    }

    #[test]
    fn test_merge_prefers_other() {
        let base = MixerSettings {
            components_path: Some(PathBuf::from("a")),
            layers_order_path: Some(PathBuf::from("a.txt")),
            exceptions_path: None,
            rarity_filename: Some("r.json".to_string()),
        };
        let overrides = MixerSettings {
            components_path: Some(PathBuf::from("b")),
            ..MixerSettings::default()
        };

        let merged = base.merged_with(overrides);
        assert_eq!(merged.components_path, Some(PathBuf::from("b")));
        assert_eq!(merged.layers_order_path, Some(PathBuf::from("a.txt")));
        assert_eq!(merged.rarity_filename, Some("r.json".to_string()));
    }

    #[test]
    fn test_valid_settings_become_paths() {
        let fixture = Fixture::new();
        let settings = MixerSettings {
            rarity_filename: Some("  rarity.JSON ".to_string()),
            ..valid(&fixture)
        };

        let Ok(paths) = settings.to_paths() else {
            unreachable!("Settings should validate");
        };
        assert_eq!(paths.components_path, fixture.components());
        assert_eq!(paths.rarity_filename.as_deref(), Some("rarity.JSON"));
        assert!(paths.exceptions_path.is_none());
    }

    // Tests required fields are enforced, empty values counting as absent
    // Verified by accepting empty paths
    #[test]
    fn test_required_fields() {
        let fixture = Fixture::new();

        let no_components = MixerSettings {
            components_path: Some(PathBuf::new()),
            ..valid(&fixture)
        };
        assert_eq!(rejected_parameter(&no_components), Some("components_path"));

        let no_order = MixerSettings {
            layers_order_path: None,
            ..valid(&fixture)
        };
        assert_eq!(rejected_parameter(&no_order), Some("layers_order_path"));
    }

    // Tests files and directories are not interchangeable
    // Verified by checking existence only
    #[test]
    fn test_path_kinds() {
        let fixture = Fixture::new();
        let file = fixture.file("plain.txt", "x");

        let components_is_file = MixerSettings {
            components_path: Some(file),
            ..valid(&fixture)
        };
        assert_eq!(rejected_parameter(&components_is_file), Some("components_path"));

        let order_is_dir = MixerSettings {
            layers_order_path: Some(fixture.components()),
            ..valid(&fixture)
        };
        assert_eq!(rejected_parameter(&order_is_dir), Some("layers_order_path"));
    }

    // Tests rule inputs must be JSON
    // Verified by accepting any extension
    #[test]
    fn test_rule_files_must_be_json() {
        let fixture = Fixture::new();

        let exceptions = MixerSettings {
            exceptions_path: Some(PathBuf::from("rules.txt")),
            ..valid(&fixture)
        };
        assert_eq!(rejected_parameter(&exceptions), Some("exceptions_path"));

        let rarity = MixerSettings {
            rarity_filename: Some("weights.yaml".to_string()),
            ..valid(&fixture)
        };
        assert_eq!(rejected_parameter(&rarity), Some("rarity_filename"));

        let blank_rarity = MixerSettings {
            rarity_filename: Some("   ".to_string()),
            ..valid(&fixture)
        };
        assert!(matches!(
            blank_rarity.to_paths(),
            Ok(paths) if paths.rarity_filename.is_none()
        ));
    }
}
