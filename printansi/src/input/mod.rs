// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod driver;
pub mod line_reader;

// Re-export.
pub use driver::*;
pub use line_reader::*;
