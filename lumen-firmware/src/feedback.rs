//! User feedback
//!
//! The controller's feedback calls are turned into events and handed to
//! [`crate::tasks::feedback_task`], so a slow output never stalls a
//! button sequence.

use defmt::*;
use heapless::String;
use lumen_core::traits::Feedback;

use crate::channels::FEEDBACK_CHANNEL;

/// Longest status message kept; longer ones are truncated
pub const MAX_TEXT_LEN: usize = 24;

/// One piece of feedback
#[derive(Debug, Clone)]
pub enum FeedbackEvent {
    Level(u8),
    Text(String<MAX_TEXT_LEN>),
}

/// [`Feedback`] implementation that posts to [`FEEDBACK_CHANNEL`]
pub struct ChannelFeedback;

impl ChannelFeedback {
    fn post(&self, event: FeedbackEvent) {
        if FEEDBACK_CHANNEL.try_send(event).is_err() {
            trace!("Feedback channel full, event dropped");
        }
    }
}

impl Feedback for ChannelFeedback {
    fn show_level(&mut self, level: u8) {
        self.post(FeedbackEvent::Level(level));
    }

    fn show_text(&mut self, text: &str) {
        let mut message = String::new();
        for c in text.chars() {
            if message.push(c).is_err() {
                break;
            }
        }
        self.post(FeedbackEvent::Text(message));
    }
}
