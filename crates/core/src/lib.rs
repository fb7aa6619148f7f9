#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod rollover;
pub mod scoring;
pub mod status;
pub mod time;
pub mod timer;
pub mod undo;

pub use error::Error;
pub use time::Clock;
