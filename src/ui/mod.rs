//! Terminal-facing helpers: logging setup, step timing and progress bars

pub mod logger;
pub mod progress;
pub mod timer;
