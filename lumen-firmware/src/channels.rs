//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::feedback::FeedbackEvent;

/// Channel capacity for feedback events
const FEEDBACK_CHANNEL_SIZE: usize = 8;

/// Feedback from the controller to the feedback task
///
/// The controller never waits on this channel; events are dropped when
/// it is full.
pub static FEEDBACK_CHANNEL: Channel<
    CriticalSectionRawMutex,
    FeedbackEvent,
    FEEDBACK_CHANNEL_SIZE,
> = Channel::new();
