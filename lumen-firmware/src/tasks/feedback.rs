//! Feedback output task
//!
//! Shows what the controller reports. On this board the output is the
//! debug log; a display driver would consume the same events.

use defmt::*;

use crate::channels::FEEDBACK_CHANNEL;
use crate::feedback::FeedbackEvent;

#[embassy_executor::task]
pub async fn feedback_task() {
    loop {
        match FEEDBACK_CHANNEL.receive().await {
            FeedbackEvent::Level(level) => info!("Brightness: {}", level),
            FeedbackEvent::Text(text) => info!("{}", text.as_str()),
        }
    }
}
