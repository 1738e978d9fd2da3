// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod config_string;
pub mod format_config;

// Re-export.
pub use config_string::*;
pub use format_config::*;
