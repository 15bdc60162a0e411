use super::*;
use crate::hardware::{
    devices::IdleMode,
    simulated::{SimulatedEncoder, SimulatedMotor},
};

fn create_settings() -> MotorSettings {
    MotorSettings {
        inverted: true,
        idle_mode: IdleMode::Coast,
        voltage_compensation: None,
    }
}

fn initialize(motor: &SimulatedMotor, encoder: &SimulatedEncoder) -> Result<DriveUnit, Error> {
    DriveUnit::initialize(
        Box::new(motor.clone()),
        Box::new(encoder.clone()),
        &create_settings(),
        0.25,
        0.5,
    )
}

#[test]
fn when_converting_a_read_error_it_should_become_an_initialization_error() {
    let error = initialization_error(
        "drive encoder",
        Error::DeviceRead {
            device: "drive encoder".to_string(),
            reason: "no response".to_string(),
        },
    );

    match error {
        Error::DeviceInitialization { device, reason } => {
            assert_eq!(device, "drive encoder");
            assert!(reason.contains("no response"));
        }
        other => panic!("Expected an initialization error, got {:?}", other),
    }
}

#[test]
fn when_converting_an_initialization_error_it_should_be_kept_as_is() {
    let firmware_error = || Error::DeviceInitialization {
        device: "drive motor".to_string(),
        reason: "bad firmware".to_string(),
    };

    assert_eq!(
        initialization_error("drive encoder", firmware_error()),
        firmware_error()
    );
}

#[test]
fn when_initializing_the_motor_should_be_configured_and_the_encoder_zeroed() {
    let motor = SimulatedMotor::new("drive motor");
    let encoder = SimulatedEncoder::new("drive encoder");
    encoder.set_reading(12.0);

    let unit = initialize(&motor, &encoder).unwrap();

    assert_eq!(motor.configure_count(), 1);
    assert_eq!(motor.settings(), Some(create_settings()));
    assert!(unit.is_inverted());
    assert_eq!(unit.position(), Ok(0.0));
}

#[test]
fn when_the_motor_fails_to_initialize_the_encoder_should_not_be_zeroed() {
    let motor = SimulatedMotor::new("drive motor");
    motor.fail_configuration(true);
    let encoder = SimulatedEncoder::new("drive encoder");
    encoder.set_reading(12.0);

    match initialize(&motor, &encoder) {
        Err(Error::DeviceInitialization { device, .. }) => assert_eq!(device, "drive motor"),
        Err(e) => panic!("Expected an initialization error, got {}", e),
        Ok(_) => panic!("Expected an initialization error"),
    }

    assert_eq!(encoder.position(), Ok(12.0));
}

#[test]
fn test_readings_writes_and_inversion() {
    let motor = SimulatedMotor::new("drive motor");
    let encoder = SimulatedEncoder::new("drive encoder");
    let mut unit = initialize(&motor, &encoder).unwrap();

    encoder.set_reading(8.0);
    encoder.set_velocity_reading(3.0);
    assert_eq!(unit.position(), Ok(2.0));
    assert_eq!(unit.velocity(), Ok(1.5));

    assert!(unit.write(0.6).is_ok());
    assert_eq!(motor.output(), 0.6);

    assert!(unit.set_inverted(false).is_ok());
    assert!(!unit.is_inverted());

    assert!(unit.reset_position().is_ok());
    assert_eq!(unit.position(), Ok(0.0));

    encoder.fail_reads(true);
    match unit.velocity() {
        Err(Error::DeviceRead { device, .. }) => assert_eq!(device, "drive encoder"),
        other => panic!("Expected a read error, got {:?}", other),
    }
}
