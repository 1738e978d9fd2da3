// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Turns raw items into output bytes: prefix, date stamp, quotes, escaped payload,
//! separator and suffix. See [`FormattingPipeline`].

// Attach sources.
pub mod date_stamp;
pub mod line_state;
pub mod pipeline;
pub mod quote_cycle;
pub mod record_sink;

// Re-export.
pub use date_stamp::*;
pub use line_state::*;
pub use pipeline::*;
pub use quote_cycle::*;
pub use record_sink::*;
