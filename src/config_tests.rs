use super::*;
use float_cmp::{ApproxEq, F64Margin};
use std::f64::consts::PI;

#[test]
fn test_new_config_uses_defaults() {
    let config = ModuleConfig::new("front_left");

    assert_eq!(config.name, "front_left");
    assert_eq!(config.hardware_variant, HardwareVariant::Competition);
    assert!(!config.drive_inverted);
    assert_eq!(config.drive_gains, PidGains::proportional(1.0));
    assert_eq!(config.turning_gains, PidGains::proportional(1.0));
    assert_eq!(config.integral_limit, 1.0);
    assert_eq!(config.control_period_in_seconds, 0.02);
    assert!(config.turning_constraints.is_none());
    assert_eq!(config.idle_mode, IdleMode::Brake);
    assert!(config.turning_distance_per_pulse.approx_eq(
        2.0 * PI / 4096.0,
        F64Margin {
            ulps: 2,
            epsilon: 1e-15
        }
    ));
    assert!(config.validate().is_ok());
}

#[test]
fn when_loading_a_minimal_document_it_should_match_the_defaults() {
    let config = ModuleConfig::from_yaml("name: front_left").unwrap();
    assert_eq!(config, ModuleConfig::new("front_left"));
}

#[test]
fn when_loading_a_full_document_it_should_read_all_values() {
    let yaml = r#"
name: rear_right
hardware_variant: test_bench
drive_inverted: true
steering_inverted: true
steering_offset_in_degrees: 90.0
drive_gains:
  kp: 0.2
turning_gains:
  kp: 4.0
  ki: 0.1
  kd: 0.05
integral_limit: 0.5
control_period_in_seconds: 0.01
turning_constraints:
  max_velocity: 12.0
  max_acceleration: 40.0
drive_position_conversion_factor: 0.05
drive_velocity_conversion_factor: 0.001
turning_distance_per_pulse: 0.002
idle_mode: coast
voltage_compensation: 7.0
"#;

    let config = ModuleConfig::from_yaml(yaml).unwrap();

    assert_eq!(config.name, "rear_right");
    assert_eq!(config.hardware_variant, HardwareVariant::TestBench);
    assert!(config.drive_inverted);
    assert!(config.steering_inverted);
    assert_eq!(config.steering_offset_in_degrees, 90.0);
    assert_eq!(config.drive_gains, PidGains::new(0.2, 0.0, 0.0));
    assert_eq!(config.turning_gains, PidGains::new(4.0, 0.1, 0.05));
    assert_eq!(config.integral_limit, 0.5);
    assert_eq!(config.control_period_in_seconds, 0.01);
    assert_eq!(
        config.turning_constraints,
        Some(ProfileConstraints::new(12.0, 40.0))
    );
    assert_eq!(config.drive_position_conversion_factor, 0.05);
    assert_eq!(config.drive_velocity_conversion_factor, 0.001);
    assert_eq!(config.turning_distance_per_pulse, 0.002);
    assert_eq!(config.idle_mode, IdleMode::Coast);
    assert_eq!(config.voltage_compensation, Some(7.0));

    assert!(config.steering_offset().radians().approx_eq(
        0.5 * PI,
        F64Margin {
            ulps: 2,
            epsilon: 1e-12
        }
    ));
}

#[test]
fn when_loading_a_malformed_document_it_should_error() {
    match ModuleConfig::from_yaml("name: [front_left") {
        Err(Error::ConfigurationLoad(_)) => {}
        other => panic!("Expected a load error, got {:?}", other),
    }

    match ModuleConfig::from_yaml("drive_inverted: true") {
        Err(Error::ConfigurationLoad(_)) => {}
        other => panic!("Expected a load error for a missing name, got {:?}", other),
    }
}

#[test]
fn when_loading_a_document_with_invalid_values_it_should_error() {
    match ModuleConfig::from_yaml("name: a\ncontrol_period_in_seconds: 0.0") {
        Err(Error::InvalidConfiguration(_)) => {}
        other => panic!("Expected a validation error, got {:?}", other),
    }
}

fn assert_invalid(description: &str, change: impl Fn(&mut ModuleConfig)) {
    let mut config = ModuleConfig::new("front_left");
    change(&mut config);

    match config.validate() {
        Err(Error::InvalidConfiguration(_)) => {}
        other => panic!(
            "Expected a validation error for {}, got {:?}",
            description, other
        ),
    }
}

#[test]
fn when_validating_out_of_range_values_it_should_error() {
    assert_invalid("empty name", |c| c.name = " ".to_string());
    assert_invalid("negative period", |c| c.control_period_in_seconds = -0.02);
    assert_invalid("nan period", |c| c.control_period_in_seconds = f64::NAN);
    assert_invalid("infinite drive gain", |c| {
        c.drive_gains = PidGains::proportional(f64::INFINITY)
    });
    assert_invalid("nan turning gain", |c| {
        c.turning_gains = PidGains::new(1.0, f64::NAN, 0.0)
    });
    assert_invalid("negative integral limit", |c| c.integral_limit = -1.0);
    assert_invalid("infinite integral limit", |c| c.integral_limit = f64::INFINITY);
    assert_invalid("nan integral limit", |c| c.integral_limit = f64::NAN);
    assert_invalid("infinite offset", |c| {
        c.steering_offset_in_degrees = f64::INFINITY
    });
    assert_invalid("zero constraint", |c| {
        c.turning_constraints = Some(ProfileConstraints::new(0.0, 1.0))
    });
    assert_invalid("zero conversion factor", |c| {
        c.drive_velocity_conversion_factor = 0.0
    });
    assert_invalid("nan distance per pulse", |c| {
        c.turning_distance_per_pulse = f64::NAN
    });
    assert_invalid("negative voltage", |c| c.voltage_compensation = Some(-7.0));
}

#[test]
fn when_a_config_is_written_to_a_file_it_should_load_back() {
    let mut config = ModuleConfig::new("front_right");
    config.hardware_variant = HardwareVariant::TestBench;
    config.turning_constraints = Some(ProfileConstraints::new(10.0, 20.0));

    let path = std::env::temp_dir().join(format!(
        "swerve_module_control_config_{}.yaml",
        std::process::id()
    ));
    std::fs::write(&path, serde_yaml::to_string(&config).unwrap()).unwrap();

    let loaded = ModuleConfig::load(&path);
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded.unwrap(), config);
}

#[test]
fn when_loading_a_missing_file_it_should_error() {
    let path = std::env::temp_dir().join("swerve_module_control_does_not_exist.yaml");

    match ModuleConfig::load(&path) {
        Err(Error::ConfigurationLoad(message)) => {
            assert!(message.contains("swerve_module_control_does_not_exist.yaml"))
        }
        other => panic!("Expected a load error, got {:?}", other),
    }
}

#[test]
fn test_motor_settings() {
    let mut config = ModuleConfig::new("front_left");
    config.drive_inverted = true;
    config.steering_inverted = true;
    config.voltage_compensation = Some(7.0);

    let drive = config.drive_motor_settings();
    assert!(drive.inverted);
    assert_eq!(drive.idle_mode, IdleMode::Brake);
    assert_eq!(drive.voltage_compensation, None);

    let steering = config.steering_motor_settings();
    assert!(steering.inverted);
    assert_eq!(steering.voltage_compensation, Some(7.0));
}

#[test]
fn when_displaying_a_hardware_variant_it_should_be_readable() {
    assert_eq!(format!("{}", HardwareVariant::Competition), "competition");
    assert_eq!(format!("{}", HardwareVariant::TestBench), "test bench");
}

#[test]
fn when_the_integral_limit_is_zero_the_config_should_be_valid() {
    let mut config = ModuleConfig::new("front_left");
    config.integral_limit = 0.0;
    assert!(config.validate().is_ok());

    match ModuleConfig::from_yaml("name: a\nintegral_limit: .inf") {
        Err(Error::InvalidConfiguration(message)) => assert!(message.contains("integral limit")),
        other => panic!("Expected a validation error, got {:?}", other),
    }
}
