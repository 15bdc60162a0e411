use super::*;
use crate::hardware::simulated::{SimulatedAbsoluteEncoder, SimulatedEncoder, SimulatedMotor};
use float_cmp::{ApproxEq, F64Margin};
use std::f64::consts::PI;

const MARGIN: F64Margin = F64Margin {
    ulps: 4,
    epsilon: 1e-9,
};

struct Fixture {
    drive_motor: SimulatedMotor,
    drive_encoder: SimulatedEncoder,
    steering_motor: SimulatedMotor,
    steering_encoder: SimulatedEncoder,
    absolute_encoder: SimulatedAbsoluteEncoder,
}

impl Fixture {
    fn new() -> Self {
        Self {
            drive_motor: SimulatedMotor::new("drive motor"),
            drive_encoder: SimulatedEncoder::new("drive encoder"),
            steering_motor: SimulatedMotor::new("steering motor"),
            steering_encoder: SimulatedEncoder::new("steering encoder"),
            absolute_encoder: SimulatedAbsoluteEncoder::new("absolute encoder"),
        }
    }

    fn devices(&self) -> CompetitionDevices {
        CompetitionDevices {
            drive_motor: Box::new(self.drive_motor.clone()),
            drive_encoder: Box::new(self.drive_encoder.clone()),
            steering_motor: Box::new(self.steering_motor.clone()),
            steering_encoder: Box::new(self.steering_encoder.clone()),
            absolute_encoder: Box::new(self.absolute_encoder.clone()),
        }
    }
}

fn create_config() -> ModuleConfig {
    let mut config = ModuleConfig::new("front_left");
    config.turning_distance_per_pulse = 0.01;
    config.drive_position_conversion_factor = 2.0;
    config.drive_velocity_conversion_factor = 0.5;
    config
}

#[test]
fn when_initializing_the_steering_encoder_should_be_seeded_from_the_absolute_encoder() {
    let fixture = Fixture::new();
    fixture.absolute_encoder.set_angle(1.0);
    fixture.steering_encoder.set_reading(-350.0);

    let hardware = CompetitionHardware::initialize(&create_config(), fixture.devices()).unwrap();

    assert!(fixture
        .steering_encoder
        .position()
        .unwrap()
        .approx_eq(100.0, MARGIN));
    assert!(hardware.steering_angle().unwrap().approx_eq(1.0, MARGIN));
    assert_eq!(fixture.absolute_encoder.read_count(), 1);
    assert_eq!(fixture.drive_motor.configure_count(), 1);
    assert_eq!(fixture.steering_motor.configure_count(), 1);
}

#[test]
fn when_reading_the_steering_angle_the_offset_should_be_applied() {
    let fixture = Fixture::new();
    fixture.absolute_encoder.set_angle(1.0);

    let mut config = create_config();
    config.steering_offset_in_degrees = -90.0;

    let hardware = CompetitionHardware::initialize(&config, fixture.devices()).unwrap();
    assert!(hardware
        .steering_angle()
        .unwrap()
        .approx_eq(1.0 - 0.5 * PI, MARGIN));

    // The steering motor turned the wheel by half a turn since startup
    fixture.steering_encoder.set_reading(100.0 + PI / 0.01);
    assert!(hardware
        .steering_angle()
        .unwrap()
        .approx_eq(1.0 + 0.5 * PI, MARGIN));
}

#[test]
fn when_reading_the_absolute_reference_the_absolute_encoder_should_be_read() {
    let fixture = Fixture::new();
    let hardware = CompetitionHardware::initialize(&create_config(), fixture.devices()).unwrap();
    assert_eq!(fixture.absolute_encoder.read_count(), 1);

    fixture.absolute_encoder.set_angle(1.5 * PI);
    assert!(hardware
        .absolute_reference()
        .unwrap()
        .approx_eq(-0.5 * PI, MARGIN));
    assert_eq!(fixture.absolute_encoder.read_count(), 2);

    fixture.absolute_encoder.fail_reads(true);
    match hardware.absolute_reference() {
        Err(Error::DeviceRead { device, .. }) => assert_eq!(device, "absolute encoder"),
        other => panic!("Expected a read error, got {:?}", other),
    }
}

#[test]
fn when_the_absolute_encoder_fails_the_steering_encoder_should_not_be_seeded() {
    let fixture = Fixture::new();
    fixture.absolute_encoder.fail_reads(true);
    fixture.steering_encoder.set_reading(-350.0);

    match CompetitionHardware::initialize(&create_config(), fixture.devices()) {
        Err(Error::DeviceInitialization { device, reason }) => {
            assert_eq!(device, "absolute encoder");
            assert!(reason.contains("simulated read failure"));
        }
        Err(e) => panic!("Expected an initialization error, got {}", e),
        Ok(_) => panic!("Expected an initialization error"),
    }

    assert_eq!(fixture.steering_encoder.position(), Ok(-350.0));
}

#[test]
fn when_the_drive_motor_fails_to_initialize_no_other_device_should_be_touched() {
    let fixture = Fixture::new();
    fixture.drive_motor.fail_configuration(true);

    assert!(CompetitionHardware::initialize(&create_config(), fixture.devices()).is_err());

    assert_eq!(fixture.steering_motor.configure_count(), 0);
    assert_eq!(fixture.absolute_encoder.read_count(), 0);
}

#[test]
fn when_the_steering_motor_fails_to_initialize_the_absolute_encoder_should_not_be_read() {
    let fixture = Fixture::new();
    fixture.steering_motor.fail_configuration(true);

    match CompetitionHardware::initialize(&create_config(), fixture.devices()) {
        Err(Error::DeviceInitialization { device, .. }) => assert_eq!(device, "steering motor"),
        Err(e) => panic!("Expected an initialization error, got {}", e),
        Ok(_) => panic!("Expected an initialization error"),
    }

    assert_eq!(fixture.drive_motor.configure_count(), 1);
    assert_eq!(fixture.absolute_encoder.read_count(), 0);
}

#[test]
fn test_drive_readings_and_outputs() {
    let fixture = Fixture::new();
    let mut hardware =
        CompetitionHardware::initialize(&create_config(), fixture.devices()).unwrap();

    fixture.drive_encoder.set_reading(3.0);
    fixture.drive_encoder.set_velocity_reading(8.0);
    assert_eq!(hardware.drive_position(), Ok(6.0));
    assert_eq!(hardware.drive_velocity(), Ok(4.0));

    assert!(hardware.write_drive_output(-0.25).is_ok());
    assert!(hardware.write_turn_output(0.75).is_ok());
    assert_eq!(fixture.drive_motor.output(), -0.25);
    assert_eq!(fixture.steering_motor.output(), 0.75);

    fixture.steering_motor.fail_writes(true);
    match hardware.write_turn_output(0.1) {
        Err(Error::DeviceWrite { device, .. }) => assert_eq!(device, "steering motor"),
        other => panic!("Expected a write error, got {:?}", other),
    }
    assert_eq!(fixture.steering_motor.output(), 0.75);
}
