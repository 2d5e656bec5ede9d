//! Platform abstraction layer
//!
//! Translates raw platform input (key names, device acceleration) into the
//! tilt vectors the simulation consumes. Event wiring stays with the host.

pub mod input;

pub use input::{Direction, TiltInput};
