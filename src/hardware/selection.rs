use log::info;

use crate::{
    config::{HardwareVariant, ModuleConfig},
    Error,
};

use super::{
    actuator_interface::ModuleHardware,
    competition::{CompetitionDevices, CompetitionHardware},
    test_bench::{TestBenchDevices, TestBenchHardware},
};

#[cfg(test)]
#[path = "selection_tests.rs"]
mod selection_tests;

/// The devices for one of the hardware variants.
pub enum ModuleDevices {
    /// The devices of a competition module.
    Competition(CompetitionDevices),

    /// The devices of a test bench module.
    TestBench(TestBenchDevices),
}

impl ModuleDevices {
    /// Returns the hardware variant the devices belong to.
    pub fn variant(&self) -> HardwareVariant {
        match self {
            ModuleDevices::Competition(_) => HardwareVariant::Competition,
            ModuleDevices::TestBench(_) => HardwareVariant::TestBench,
        }
    }
}

/// Initializes the hardware for the variant selected in the configuration.
///
/// The variant is chosen once, here. The returned hardware is used without further
/// checks on the variant.
///
/// ## Errors
///
/// * [Error::HardwareVariantMismatch] - Returned when the devices do not belong to the
///   variant named in the configuration. No devices are touched in that case.
/// * [Error::DeviceInitialization] - Returned when one of the devices fails to initialize.
pub fn select_hardware(
    config: &ModuleConfig,
    devices: ModuleDevices,
) -> Result<Box<dyn ModuleHardware>, Error> {
    if devices.variant() != config.hardware_variant {
        return Err(Error::HardwareVariantMismatch {
            expected: config.hardware_variant.to_string(),
            found: devices.variant().to_string(),
        });
    }

    info!(
        "Selecting {} hardware for module {}",
        config.hardware_variant, config.name
    );

    match devices {
        ModuleDevices::Competition(devices) => {
            Ok(Box::new(CompetitionHardware::initialize(config, devices)?))
        }
        ModuleDevices::TestBench(devices) => {
            Ok(Box::new(TestBenchHardware::initialize(config, devices)?))
        }
    }
}
