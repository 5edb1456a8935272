pub mod completion;
pub mod config;
pub mod core;
pub mod logging;

pub use crate::core::version;
