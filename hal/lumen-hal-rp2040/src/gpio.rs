//! Panel output lines and onboard buttons
//!
//! The panel lines drive opto-isolators across the monitor's Up, Down and
//! Menu buttons; high means pressed. The onboard buttons are active-low
//! with the internal pull-ups enabled.

use embassy_rp::gpio::{Input, Output};
use embassy_time::{Duration, Timer};
use lumen_hal::SharedPressCounter;

/// Debounce time for the onboard buttons
pub const BUTTON_DEBOUNCE: Duration = Duration::from_millis(20);

/// One of the monitor's button lines
pub struct PanelLine<'d> {
    pin: Output<'d>,
}

impl<'d> PanelLine<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }
}

impl lumen_hal::OutputPin for PanelLine<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

/// Count debounced presses of an active-low button forever
///
/// A press is a falling edge that is still low after [`BUTTON_DEBOUNCE`].
/// The held state follows the pin between edges.
pub async fn count_presses(input: &mut Input<'_>, counter: &SharedPressCounter) -> ! {
    loop {
        input.wait_for_falling_edge().await;
        Timer::after(BUTTON_DEBOUNCE).await;

        if input.is_high() {
            // Bounce
            continue;
        }

        counter.record_press();
        counter.set_held(true);

        input.wait_for_high().await;
        Timer::after(BUTTON_DEBOUNCE).await;
        counter.set_held(false);
    }
}
