//! Collaborator traits
//!
//! These traits define the interface between the control logic and the
//! parts of the board that are not plain pins: the sensors, the user
//! feedback surface and the curve storage.

pub mod feedback;
pub mod sensors;
pub mod store;

pub use feedback::Feedback;
pub use sensors::SensorBank;
pub use store::{CurveStore, NoStore, StoreError};
