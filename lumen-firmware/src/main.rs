//! Lumen - Ambient-Light Monitor Brightness Controller
//!
//! Main firmware binary for RP2040 boards. Reads a photoresistor and the
//! monitor's power LED, and presses the monitor's own brightness buttons
//! through three opto-isolated output lines.
//!
//! Board wiring:
//! - GPIO26 (ADC0): light sensor divider
//! - GPIO27 (ADC1): power LED sense
//! - GPIO2/3/4: monitor Up / Down / Menu lines
//! - GPIO14/15: onboard buttons A (dimmer) / B (brighter), active-low

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::Delay;
use lumen_core::actuator::MonitorPanel;
use lumen_core::session::ButtonPair;
use lumen_core::Controller;
use lumen_hal::SharedPressCounter;
use lumen_hal_rp2040::adc::AdcSensors;
use lumen_hal_rp2040::flash::Rp2040FlashStorage;
use lumen_hal_rp2040::gpio::PanelLine;
use lumen_hal_rp2040::time::EmbassyClock;
use {defmt_rtt as _, panic_probe as _};

use crate::config::load_config;
use crate::feedback::ChannelFeedback;
use crate::store::BoardStore;

/// Embedded default configuration (compiled into firmware)
/// Edit lumen.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../lumen.toml");

mod channels;
mod config;
mod feedback;
mod store;
mod tasks;

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

/// Button A: brightness down
static BUTTON_A: SharedPressCounter = SharedPressCounter::new();
/// Button B: brightness up
static BUTTON_B: SharedPressCounter = SharedPressCounter::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Lumen firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Settings stored in flash win over the embedded file
    let mut flash = Rp2040FlashStorage::new(p.FLASH, p.DMA_CH0);
    let config = load_config(&mut flash, EMBEDDED_CONFIG).await;

    let store = if config.persist.enabled {
        info!("Curve persistence enabled");
        BoardStore::flash(flash)
    } else {
        BoardStore::memory()
    };

    // Pin assignments are board-specific
    let adc = Adc::new(p.ADC, Irqs, embassy_rp::adc::Config::default());
    let light = Channel::new_pin(p.PIN_26, Pull::None);
    let sense = Channel::new_pin(p.PIN_27, Pull::None);
    let sensors = AdcSensors::new(adc, light, sense);

    let panel = MonitorPanel::new(
        PanelLine::new(Output::new(p.PIN_2, Level::Low)),
        PanelLine::new(Output::new(p.PIN_3, Level::Low)),
        PanelLine::new(Output::new(p.PIN_4, Level::Low)),
        config.panel,
    );

    let button_a = Input::new(p.PIN_14, Pull::Up);
    let button_b = Input::new(p.PIN_15, Pull::Up);
    let buttons = ButtonPair::new(&BUTTON_A, &BUTTON_B);

    let controller = Controller::new(
        panel,
        Delay,
        EmbassyClock,
        sensors,
        buttons,
        ChannelFeedback,
        store,
        config,
    );
    info!("Controller initialized");

    // Spawn tasks
    spawner
        .spawn(tasks::button_task(button_a, &BUTTON_A, "A"))
        .unwrap();
    spawner
        .spawn(tasks::button_task(button_b, &BUTTON_B, "B"))
        .unwrap();
    spawner.spawn(tasks::feedback_task()).unwrap();
    spawner.spawn(tasks::controller_task(controller)).unwrap();

    info!("All tasks spawned, firmware running");
}
