//! Configuration loading for the documentation viewer.
//!
//! All tunable settings live in `conf/viewer.toml`, grouped into tables
//! (`[source]`, `[page]`, `[typography]`, `[navigation]`, `[logging]`).
//! Missing or invalid entries fall back to defaults so the viewer still
//! renders something.

mod defaults;
mod io;
mod models;
mod tables;

pub use io::{load_config, parse_config, serialize_config};
pub use models::{LogLevel, ViewerConfig};
