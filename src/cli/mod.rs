//! JSON-in, JSON-out driver for the binary.
//!
//! Reads one JSON document, copies it through an [`HtmlSanitizer`] using the
//! configured policy, and writes the sanitized document back out. Keys are
//! kept as they are; every string value is sanitized.

use serde_json::Value;
use std::io::{Read, Write};

use crate::config::Config;
use crate::copier::GraphCopier;
use crate::error::AppError;
use crate::metrics::CopyReport;
use crate::sanitizer::HtmlSanitizer;

/// Sanitize the JSON document read from `reader` and write it to `writer`.
///
/// The output is followed by a newline and flushed.
///
/// # Errors
///
/// Returns [`AppError::Json`] if the input is not valid JSON,
/// [`AppError::Copy`] if the document exceeds the depth limit and
/// [`AppError::Io`] if reading or writing fails.
///
/// # Example
///
/// ```
/// use struct_sanitizer::cli::run_json;
/// use struct_sanitizer::config::Config;
///
/// let input = br#"{"bio": "<b>hi</b><script>x()</script>"}"#;
/// let mut output = Vec::new();
/// run_json(&Config::default(), &input[..], &mut output).unwrap();
/// assert_eq!(String::from_utf8(output).unwrap(), "{\"bio\":\"<b>hi</b>\"}\n");
/// ```
pub fn run_json<R: Read, W: Write>(
    config: &Config,
    reader: R,
    mut writer: W,
) -> Result<CopyReport, AppError> {
    let document: Value = serde_json::from_reader(reader)?;

    let copier = GraphCopier::with_options(HtmlSanitizer::new(config.policy), config.copy_options());
    let (copy, report) = copier.copy_with_report(&document)?;

    if config.pretty {
        serde_json::to_writer_pretty(&mut writer, &copy)?;
    } else {
        serde_json::to_writer(&mut writer, &copy)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::info!(
        policy = %config.policy,
        nodes = report.total_nodes(),
        strings = report.strings_transformed,
        changed = report.strings_changed,
        elapsed_us = report.elapsed_us,
        "document sanitized"
    );
    Ok(report)
}
