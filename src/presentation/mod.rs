//! Presentation Layer
//!
//! This layer handles:
//! - Wiring the executor and sinks from configuration
//! - Output formatting (pretty/plain/JSON)
//! - Diagnostics setup (tracing)
//!
//! ## Structure
//!
//! - `factory` - Creates the executor and report sink
//! - `output` - Report sinks and host listing
//! - `logging` - tracing subscriber on stderr

pub mod factory;
pub mod logging;
pub mod output;

pub use factory::{create_executor, create_sink, effective_format};
pub use logging::init_logging;
pub use output::{JsonSink, TextSink};
