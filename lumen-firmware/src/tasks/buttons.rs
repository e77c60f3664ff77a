//! Onboard button tasks
//!
//! One task per button counts debounced presses into a shared counter.
//! The controller drains the counters whenever it is ready for input.

use defmt::*;
use embassy_rp::gpio::Input;
use lumen_hal::SharedPressCounter;
use lumen_hal_rp2040::gpio::count_presses;

#[embassy_executor::task(pool_size = 2)]
pub async fn button_task(
    mut input: Input<'static>,
    counter: &'static SharedPressCounter,
    name: &'static str,
) {
    info!("Button {} task started", name);
    count_presses(&mut input, counter).await
}
