//! Preview and export holder.
//!
//! The editor converts its document on every (debounced) change and shows the
//! result as a preview; exporting writes that same string to a `.md` file.
//! [`Exporter`] keeps the last good Markdown between those two moments.
//!
//! Conversion does not fail by contract, but a buggy custom rule can still
//! panic. [`Exporter::refresh`] catches that, logs it, and keeps the previous
//! export so the editing session carries on with slightly stale output.
//!
//! ```ignore
//! let mut exporter = Exporter::default();
//! exporter.refresh(&doc);
//! exporter.write_to("document.md")?;
//! ```

use crate::error::FormatError;
use crate::formats::markdown::Converter;
use crate::ir::nodes::DocNode;
use log::warn;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

/// File name used when the caller does not pick one.
pub const DEFAULT_EXPORT_NAME: &str = "document.md";

/// Holds a converter and the last Markdown it produced.
#[derive(Debug, Default)]
pub struct Exporter {
    converter: Converter,
    last: Option<String>,
}

impl Exporter {
    pub fn new(converter: Converter) -> Self {
        Self {
            converter,
            last: None,
        }
    }

    pub fn converter(&self) -> &Converter {
        &self.converter
    }

    /// Converts `doc`, turning a panic inside a rule into
    /// [`FormatError::ConversionPanicked`]. Does not touch the held export.
    pub fn try_convert(&self, doc: &DocNode) -> Result<String, FormatError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.converter.convert(doc)))
            .map_err(|payload| FormatError::ConversionPanicked(panic_message(payload.as_ref())))
    }

    /// Re-converts `doc` and replaces the held export. If the conversion
    /// panics the previous export stays in place.
    ///
    /// Returns the export now held, which is empty if no conversion has
    /// succeeded yet.
    pub fn refresh(&mut self, doc: &DocNode) -> &str {
        match self.try_convert(doc) {
            Ok(markdown) => self.last = Some(markdown),
            Err(err) => warn!("keeping previous export: {err}"),
        }
        self.markdown().unwrap_or_default()
    }

    /// The last successful conversion, if any.
    pub fn markdown(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Writes the held export to `path`, byte for byte.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), FormatError> {
        let markdown = self.markdown().ok_or_else(|| {
            FormatError::SerializationError("nothing has been converted yet".to_string())
        })?;
        fs::write(path.as_ref(), markdown.as_bytes())?;
        Ok(())
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
