//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels or the
//! shared press counters.

mod buttons;
mod controller;
mod feedback;

pub use buttons::button_task;
pub use controller::controller_task;
pub use feedback::feedback_task;
