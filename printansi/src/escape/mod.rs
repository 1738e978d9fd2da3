// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod ansi_c_escape;

// Re-export.
pub use ansi_c_escape::*;
