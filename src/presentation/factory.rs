//! Component Factory
//!
//! Wires infrastructure and output sinks from a loaded `Config`.

use std::io::Write;

use crate::config::Config;
use crate::domain::ports::ReportSink;
use crate::domain::value_objects::OutputFormat;
use crate::infrastructure::{SshExecutor, SshOptions};

use super::output::{color_enabled, JsonSink, TextSink};

/// Create the ssh executor described by the configuration
pub fn create_executor(config: &Config) -> SshExecutor {
    SshExecutor::new(SshOptions::from_config(config))
}

/// Effective output format: `--json` wins over the configured format
pub fn effective_format(config: &Config, json_flag: bool) -> OutputFormat {
    if json_flag {
        OutputFormat::Json
    } else {
        config.format
    }
}

/// Create the sink for `format`, writing to `out`
pub fn create_sink<'w, W: Write + 'w>(format: OutputFormat, out: W) -> Box<dyn ReportSink + 'w> {
    match format {
        OutputFormat::Json => Box::new(JsonSink::new(out)),
        OutputFormat::Pretty => Box::new(TextSink::new(out, color_enabled(format))),
        OutputFormat::Plain => Box::new(TextSink::new(out, false)),
    }
}
