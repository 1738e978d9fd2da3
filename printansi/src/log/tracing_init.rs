// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{TracingConfig, WriterConfig, rolling_file_appender_impl};
use miette::IntoDiagnostic;
use tracing_core::LevelFilter;
use tracing_subscriber::{Layer, layer::SubscriberExt, registry::LookupSpan,
                         util::SubscriberInitExt};

/// Avoid gnarly type annotations by using a macro to create the `fmt` layer.
#[macro_export]
macro_rules! create_fmt {
    () => {
        tracing_subscriber::fmt::layer()
            .compact()
            .without_time()
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
    };
}

/// Type alias for a boxed layer.
pub type DynLayer<S> = dyn Layer<S> + Send + Sync + 'static;

/// Installs the layers as the global default subscriber. Call once, at the start of
/// `main()`.
///
/// # Errors
///
/// Returns an error if the log file can't be set up, or if a global subscriber was
/// already installed.
pub fn try_initialize_logging_global(tracing_config: TracingConfig) -> miette::Result<()> {
    let layers = try_create_layers(tracing_config)?;
    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .into_diagnostic()
}

/// Returns the layers. This does not initialize the tracing system, see
/// [`try_initialize_logging_global()`].
///
/// # Errors
///
/// Returns an error if the log file can't be set up.
pub fn try_create_layers(
    tracing_config: TracingConfig,
) -> miette::Result<Vec<Box<DynLayer<tracing_subscriber::Registry>>>> {
    let level_filter = tracing_config.get_level_filter();
    let writer_config = tracing_config.get_writer_config();

    let mut return_it: Vec<Box<DynLayer<tracing_subscriber::Registry>>> = vec![];

    // Set the level filter globally, so that events that nobody wants are skipped early.
    return_it.push(Box::new(level_filter));
    return_it.push(create_display_layer(level_filter));
    if let Some(layer) = try_create_file_layer(level_filter, writer_config)? {
        return_it.push(layer);
    }

    Ok(return_it)
}

/// Display output always goes to stderr. Stdout may carry the formatted output.
pub fn create_display_layer<S>(level_filter: LevelFilter) -> Box<DynLayer<S>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    Box::new(
        create_fmt!()
            .with_ansi(true)
            .with_writer(std::io::stderr)
            .with_filter(level_filter),
    )
}

/// This erases the concrete type of the writer, and returns a boxed layer.
///
/// # Errors
///
/// Returns an error if the log file path is unusable.
pub fn try_create_file_layer<S>(
    level_filter: LevelFilter,
    writer_config: WriterConfig,
) -> miette::Result<Option<Box<DynLayer<S>>>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    Ok(match writer_config {
        WriterConfig::DisplayAndFile(tracing_log_file_path) => {
            let file = rolling_file_appender_impl::try_create(&tracing_log_file_path)?;
            Some(Box::new(
                create_fmt!()
                    .with_ansi(false)
                    .with_writer(file)
                    .with_filter(level_filter),
            ))
        }
        WriterConfig::Display => None,
    })
}
