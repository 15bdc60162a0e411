//! In-memory devices that implement the device interfaces.
//!
//! Each simulated device is a handle onto shared state. Cloning a device returns another
//! handle to the same state, which allows a test to hand one handle to the module hardware
//! and keep another to inspect the outputs or change the readings.

use std::{cell::RefCell, rc::Rc};

use crate::Error;

use super::devices::{AbsoluteEncoder, Encoder, MotorController, MotorSettings};

#[cfg(test)]
#[path = "simulated_tests.rs"]
mod simulated_tests;

#[derive(Debug, Default)]
struct SimulatedMotorState {
    output: f64,
    inverted: bool,
    settings: Option<MotorSettings>,
    configure_count: usize,
    write_count: usize,
    fail_configuration: bool,
    fail_writes: bool,
}

/// A motor controller that records the values it is given.
#[derive(Clone, Debug)]
pub struct SimulatedMotor {
    name: String,
    state: Rc<RefCell<SimulatedMotorState>>,
}

impl SimulatedMotor {
    /// Returns the number of times the motor has been configured.
    pub fn configure_count(&self) -> usize {
        self.state.borrow().configure_count
    }

    /// Makes future calls to [MotorController::configure] fail.
    pub fn fail_configuration(&self, fail: bool) {
        self.state.borrow_mut().fail_configuration = fail;
    }

    /// Makes future calls to [MotorController::set_output] fail.
    pub fn fail_writes(&self, fail: bool) {
        self.state.borrow_mut().fail_writes = fail;
    }

    /// Creates a new [SimulatedMotor] with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            state: Rc::new(RefCell::new(SimulatedMotorState::default())),
        }
    }

    /// Returns the last output that was successfully written.
    pub fn output(&self) -> f64 {
        self.state.borrow().output
    }

    /// Returns the settings from the last successful configuration.
    pub fn settings(&self) -> Option<MotorSettings> {
        self.state.borrow().settings.clone()
    }

    /// Returns the number of outputs that were successfully written.
    pub fn write_count(&self) -> usize {
        self.state.borrow().write_count
    }
}

impl MotorController for SimulatedMotor {
    fn name(&self) -> &str {
        &self.name
    }

    fn configure(&mut self, settings: &MotorSettings) -> Result<(), Error> {
        let mut state = self.state.borrow_mut();
        if state.fail_configuration {
            return Err(Error::DeviceInitialization {
                device: self.name.clone(),
                reason: "simulated configuration failure".to_string(),
            });
        }

        state.configure_count += 1;
        state.inverted = settings.inverted;
        state.settings = Some(settings.clone());
        Ok(())
    }

    fn is_inverted(&self) -> bool {
        self.state.borrow().inverted
    }

    fn set_inverted(&mut self, inverted: bool) -> Result<(), Error> {
        self.state.borrow_mut().inverted = inverted;
        Ok(())
    }

    fn set_output(&mut self, output: f64) -> Result<(), Error> {
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(Error::DeviceWrite {
                device: self.name.clone(),
                reason: "simulated write failure".to_string(),
            });
        }

        state.output = output;
        state.write_count += 1;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct SimulatedEncoderState {
    position: f64,
    velocity: f64,
    fail_reads: bool,
}

/// A relative encoder whose position and velocity are set by the owner.
#[derive(Clone, Debug)]
pub struct SimulatedEncoder {
    name: String,
    state: Rc<RefCell<SimulatedEncoderState>>,
}

impl SimulatedEncoder {
    /// Makes future reads from the encoder fail.
    pub fn fail_reads(&self, fail: bool) {
        self.state.borrow_mut().fail_reads = fail;
    }

    /// Creates a new [SimulatedEncoder] with the given name, at position zero and standing still.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            state: Rc::new(RefCell::new(SimulatedEncoderState::default())),
        }
    }

    /// Sets the position that the encoder reports, in native units.
    pub fn set_reading(&self, position: f64) {
        self.state.borrow_mut().position = position;
    }

    /// Sets the velocity that the encoder reports, in native units per second.
    pub fn set_velocity_reading(&self, velocity: f64) {
        self.state.borrow_mut().velocity = velocity;
    }

    fn read_failure(&self) -> Error {
        Error::DeviceRead {
            device: self.name.clone(),
            reason: "simulated read failure".to_string(),
        }
    }
}

impl Encoder for SimulatedEncoder {
    fn name(&self) -> &str {
        &self.name
    }

    fn position(&self) -> Result<f64, Error> {
        let state = self.state.borrow();
        if state.fail_reads {
            return Err(self.read_failure());
        }

        Ok(state.position)
    }

    fn set_position(&mut self, position: f64) -> Result<(), Error> {
        self.state.borrow_mut().position = position;
        Ok(())
    }

    fn velocity(&self) -> Result<f64, Error> {
        let state = self.state.borrow();
        if state.fail_reads {
            return Err(self.read_failure());
        }

        Ok(state.velocity)
    }
}

#[derive(Debug, Default)]
struct SimulatedAbsoluteEncoderState {
    angle: f64,
    read_count: usize,
    fail_reads: bool,
}

/// An absolute encoder whose angle is set by the owner.
#[derive(Clone, Debug)]
pub struct SimulatedAbsoluteEncoder {
    name: String,
    state: Rc<RefCell<SimulatedAbsoluteEncoderState>>,
}

impl SimulatedAbsoluteEncoder {
    /// Makes future reads from the encoder fail.
    pub fn fail_reads(&self, fail: bool) {
        self.state.borrow_mut().fail_reads = fail;
    }

    /// Creates a new [SimulatedAbsoluteEncoder] with the given name, reporting an angle of zero.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            state: Rc::new(RefCell::new(SimulatedAbsoluteEncoderState::default())),
        }
    }

    /// Returns the number of successful reads.
    pub fn read_count(&self) -> usize {
        self.state.borrow().read_count
    }

    /// Sets the angle, in radians, that the encoder reports.
    pub fn set_angle(&self, angle: f64) {
        self.state.borrow_mut().angle = angle;
    }
}

impl AbsoluteEncoder for SimulatedAbsoluteEncoder {
    fn name(&self) -> &str {
        &self.name
    }

    fn absolute_angle(&self) -> Result<f64, Error> {
        let mut state = self.state.borrow_mut();
        if state.fail_reads {
            return Err(Error::DeviceRead {
                device: self.name.clone(),
                reason: "simulated read failure".to_string(),
            });
        }

        state.read_count += 1;
        Ok(state.angle)
    }
}
