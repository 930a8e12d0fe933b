use std::io::Write;

use prm_plan::{load_planner_config, BlendPolicy, LocalPlanner, PlannerConfig};

fn write_yaml(body: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(body.as_bytes()).expect("write yaml");
    file
}

#[test]
fn partial_yaml_falls_back_to_defaults() {
    let file = write_yaml("interpolation_steps: 8\nblend:\n  type: sampled\n  seed: 17\n");
    let config = load_planner_config(file.path()).expect("load");
    assert_eq!(config.interpolation_steps, 8);
    assert!(config.collision_check_enabled);
    assert_eq!(config.max_transition_cost, 500.0);
    assert_eq!(config.max_connect_distance, 50.0);
    assert_eq!(config.blend, BlendPolicy::Sampled { seed: Some(17) });
}

#[test]
fn empty_mapping_is_the_default_config() {
    let file = write_yaml("{}\n");
    let config = load_planner_config(file.path()).expect("load");
    assert_eq!(config, PlannerConfig::default());
    assert_eq!(config.blend, BlendPolicy::Threshold);
}

#[test]
fn zero_steps_are_rejected() {
    let file = write_yaml("interpolation_steps: 0\n");
    let err = load_planner_config(file.path()).expect_err("zero steps");
    assert_eq!(err.code(), "invalid_interpolation_steps");

    let err = LocalPlanner::new(PlannerConfig {
        interpolation_steps: 0,
        ..PlannerConfig::default()
    })
    .expect_err("zero steps");
    assert_eq!(err.code(), "invalid_interpolation_steps");
}

#[test]
fn missing_file_reports_serde_error() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let err = load_planner_config(&dir.path().join("absent.yaml")).expect_err("absent");
    assert_eq!(err.code(), "yaml_read");
}

#[test]
fn transition_result_serializes_camel_case() {
    let planner = LocalPlanner::default();
    let a = prm_core::Configuration::new("a", &["Input", "Output"], 0.6, 1);
    let result = planner
        .plan(&a, &a, &prm_core::Architecture::default())
        .expect("plan");
    let value = serde_json::to_value(&result).expect("serialize");
    assert_eq!(value["numSteps"], 6);
    assert_eq!(value["isValid"], true);
    assert_eq!(value["waypoints"][0]["layerSequence"][1], "Output");
}
