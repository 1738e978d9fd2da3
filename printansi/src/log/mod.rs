// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Diagnostics go through [`tracing`], to stderr and optionally to a log file. Fatal
//! errors are rendered by [`miette`].

// Attach sources.
pub mod miette_setup;
pub mod rolling_file_appender_impl;
pub mod tracing_config;
pub mod tracing_init;

// Re-export.
pub use miette_setup::*;
pub use tracing_config::*;
pub use tracing_init::*;
