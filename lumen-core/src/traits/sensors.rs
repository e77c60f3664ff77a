//! Analog sensor trait

/// The two analog inputs the controller reads
///
/// Samples are scaled to 0..=1023 regardless of the converter's native
/// resolution, so bucket widths and the power threshold mean the same on
/// every board. Reads cannot fail in this model.
pub trait SensorBank {
    /// Ambient light from the photoresistor divider
    fn light(&mut self) -> impl core::future::Future<Output = u16>;

    /// Voltage across the monitor's power LED
    fn power_sense(&mut self) -> impl core::future::Future<Output = u16>;
}
