//! Light and power-sense inputs
//!
//! RP2040 ADC channels used by the controller:
//! - ADC0 (GPIO26): photoresistor divider
//! - ADC1 (GPIO27): monitor power LED sense
//!
//! The RP2040 converter is 12-bit; samples are scaled down to the
//! 0..=1023 range the controller works in.

use embassy_rp::adc::{Adc, Async, Channel};
use lumen_core::traits::SensorBank;

/// Native resolution of the RP2040 ADC
pub const ADC_BITS: u32 = 12;
/// Resolution the controller expects
pub const SAMPLE_BITS: u32 = 10;

/// Scale a raw 12-bit conversion to 0..=1023
pub const fn scale_sample(raw: u16) -> u16 {
    (raw >> (ADC_BITS - SAMPLE_BITS)) & 0x3FF
}

/// Both analog inputs on one ADC
///
/// A failed conversion repeats the previous sample for that channel.
pub struct AdcSensors<'d> {
    adc: Adc<'d, Async>,
    light: Channel<'d>,
    sense: Channel<'d>,
    last_light: u16,
    last_sense: u16,
}

impl<'d> AdcSensors<'d> {
    pub fn new(adc: Adc<'d, Async>, light: Channel<'d>, sense: Channel<'d>) -> Self {
        Self {
            adc,
            light,
            sense,
            last_light: 0,
            last_sense: 0,
        }
    }
}

impl SensorBank for AdcSensors<'_> {
    async fn light(&mut self) -> u16 {
        if let Ok(raw) = self.adc.read(&mut self.light).await {
            self.last_light = scale_sample(raw);
        }
        self.last_light
    }

    async fn power_sense(&mut self) -> u16 {
        if let Ok(raw) = self.adc.read(&mut self.sense).await {
            self.last_sense = scale_sample(raw);
        }
        self.last_sense
    }
}
