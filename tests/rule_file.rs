// tests/rule_file.rs
use lsys_turtle::{LSystem, LSystemError, TurtleConfig, expand_blocking};

#[test]
fn test_legacy_rule_file() {
    let json = r#"{
        "Initial": "F+F+F+F",
        "NumGen": 1,
        "Rules": [{ "Character": "F", "Result": "FF" }]
    }"#;
    let system = LSystem::from_json(json).unwrap();
    assert_eq!(system.max_generation, 1);
    assert_eq!(system.axiom.len(), 7);
    assert_eq!(
        expand_blocking(system).unwrap().materialize(),
        "FF+FF+FF+FF"
    );
}

#[test]
fn test_snake_case_rule_file() {
    let json = r#"{ "initial": "A", "num_gen": 2, "rules": [{ "character": "A", "result": "AB" }] }"#;
    let system = LSystem::from_json(json).unwrap();
    assert_eq!(expand_blocking(system).unwrap().materialize(), "ABB");
}

#[test]
fn test_multi_character_symbol_rejected() {
    let json = r#"{ "Initial": "F", "NumGen": 1, "Rules": [{ "Character": "FF", "Result": "F" }] }"#;
    assert!(matches!(LSystem::from_json(json), Err(LSystemError::Config(_))));
}

#[test]
fn test_duplicate_rule_rejected() {
    let json = r#"{
        "Initial": "F",
        "NumGen": 1,
        "Rules": [
            { "Character": "F", "Result": "F+F" },
            { "Character": "F", "Result": "F-F" }
        ]
    }"#;
    assert!(matches!(LSystem::from_json(json), Err(LSystemError::Config(_))));
}

#[test]
fn test_malformed_json_rejected() {
    assert!(matches!(
        LSystem::from_json("{ \"Initial\": 3 }"),
        Err(LSystemError::Json(_))
    ));
}

#[test]
fn test_legacy_turtle_config() {
    let json = r#"{
        "InitialX": 10.0,
        "InitialY": 20.0,
        "Orientation": 0.5,
        "AngleIncrement": 1.5707963267948966,
        "Displacement": 4.0,
        "LineWidth": 0.25
    }"#;
    let config = TurtleConfig::from_json(json).unwrap();
    assert_eq!(config.start_x, 10.0);
    assert_eq!(config.start_y, 20.0);
    assert_eq!(config.start_heading, 0.5);
    assert_eq!(config.step_length, 4.0);
    assert_eq!(config.stroke_width, 0.25);
    assert_eq!(config.max_stack_depth, TurtleConfig::default().max_stack_depth);
}

#[test]
fn test_partial_turtle_config_keeps_defaults() {
    let config = TurtleConfig::from_json(r#"{ "step_length": 3.0 }"#).unwrap();
    assert_eq!(config.step_length, 3.0);
    assert_eq!(config.angle_increment, TurtleConfig::default().angle_increment);
}
