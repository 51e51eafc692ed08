//! System-level modules
//!
//! Process-wide concerns that are not part of any lookup: logging setup.

pub mod logging;

pub use logging::init_logging;
