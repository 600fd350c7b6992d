use waymem_core::config::*;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = WaymemConfig::from_toml("").unwrap();

    // Merge defaults
    assert_eq!(config.merge.cell_size, 32.0);
    assert_eq!(config.merge.weight_old, 0.6);
    assert_eq!(config.merge.weight_new, 0.4);
    assert_eq!(config.merge.baseline_collision, BaselineCollision::LastWriteWins);

    // Prune defaults
    assert_eq!(config.prune.min_traffic, 5.0);
    assert_eq!(config.prune.min_hazard, 2.0);
    assert_eq!(config.prune.normalize_ceiling, 100.0);

    // Cluster defaults
    assert_eq!(config.cluster.radius, 128.0);
    assert_eq!(config.cluster.min_upward_velocity, 200.0);
    assert_eq!(config.cluster.survival_window_secs, 2.0);

    // Storage defaults
    assert_eq!(config.storage.backend, StorageBackend::Sqlite);
    assert_eq!(config.storage.db_path, "waymem.db");
    assert_eq!(config.storage.memory_dir, "bot_memory");

    // Emit defaults
    assert_eq!(config.emit.high_traffic_segment, 10);

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
    assert!(!config.observability.json);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[merge]
cell_size = 16.0
baseline_collision = "blend"

[storage]
backend = "json"
"#;
    let config = WaymemConfig::from_toml(toml).unwrap();
    assert_eq!(config.merge.cell_size, 16.0);
    assert_eq!(config.merge.baseline_collision, BaselineCollision::Blend);
    assert_eq!(config.storage.backend, StorageBackend::Json);
    // Non-overridden fields keep defaults
    assert_eq!(config.merge.weight_old, 0.6);
    assert_eq!(config.prune.min_traffic, 5.0);
}

#[test]
fn config_serde_roundtrip() {
    let config = WaymemConfig::default();
    let toml_str = toml::to_string(&config).unwrap();
    let roundtripped = WaymemConfig::from_toml(&toml_str).unwrap();
    assert_eq!(roundtripped.merge.cell_size, config.merge.cell_size);
    assert_eq!(roundtripped.cluster.radius, config.cluster.radius);
}

#[test]
fn rejects_weights_that_do_not_sum_to_one() {
    let err = WaymemConfig::from_toml("[merge]\nweight_old = 0.7\nweight_new = 0.4\n").unwrap_err();
    assert!(err.to_string().contains("merge.weight_old"));
}

#[test]
fn rejects_non_positive_cell_size() {
    assert!(WaymemConfig::from_toml("[merge]\ncell_size = 0.0\n").is_err());
    assert!(WaymemConfig::from_toml("[merge]\ncell_size = -8.0\n").is_err());
}

#[test]
fn rejects_non_positive_radius_and_ceiling() {
    assert!(WaymemConfig::from_toml("[cluster]\nradius = 0.0\n").is_err());
    assert!(WaymemConfig::from_toml("[prune]\nnormalize_ceiling = 0.0\n").is_err());
}

#[test]
fn rejects_negative_thresholds() {
    assert!(WaymemConfig::from_toml("[prune]\nmin_hazard = -1.0\n").is_err());
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = WaymemConfig::from_toml("[merge\ncell_size = ").unwrap_err();
    assert!(matches!(err, waymem_core::errors::ConfigError::ParseError { .. }));
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let config =
        WaymemConfig::load_or_default(std::path::Path::new("/nonexistent/waymem.toml")).unwrap();
    assert_eq!(config.merge.cell_size, 32.0);
}

#[test]
fn missing_file_is_reported_by_load() {
    let err = WaymemConfig::load(std::path::Path::new("/nonexistent/waymem.toml")).unwrap_err();
    assert!(matches!(err, waymem_core::errors::ConfigError::FileNotFound { .. }));
}
