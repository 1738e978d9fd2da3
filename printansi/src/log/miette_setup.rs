// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! How a fatal error returned from `main() -> miette::Result<_>` is rendered to stderr.

use miette::MietteHandlerOpts;

/// The [`miette::ErrorHook`] is lazily evaluated, the handler is only built if an error
/// is actually reported. The terminal width is detected at that time.
pub fn setup_default_miette_global_report_handler() {
    miette::set_hook(Box::new(|_report| {
        Box::new(
            MietteHandlerOpts::new()
                .wrap_lines(true)
                .unicode(true)
                .context_lines(3)
                .tab_width(4)
                .break_words(true)
                .with_cause_chain()
                .build(),
        )
    }))
    // Only the first hook wins. Don't care if one was set before.
    .ok();
}
