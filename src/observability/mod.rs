//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! - **File export**: `/data/beerbar-otlp.json` inside the plugin sandbox
//! - **Rotation**: at 5 MB, keeping 3 timestamped backups
//! - **Format**: OTLP/JSON, one `resourceSpans` document per line
//! - **Level**: `trace_level` plugin option (`EnvFilter` syntax), default `info`
//!
//! # Modules
//!
//! - `init`: subscriber setup
//! - `tracer`: tracer provider with the file exporter
//! - `span_formatter`: OTLP JSON serialization
//! - `file_writer`: size-rotated writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, DEFAULT_TRACE_LEVEL, SERVICE_NAME, TRACE_FILE_NAME};
