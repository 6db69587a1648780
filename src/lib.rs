//! Minimal PDF writer for plain text
//!
//! Renders a list of text lines onto a single page and writes a complete,
//! viewer-openable PDF 1.4 file: header, five indirect objects (catalog, page
//! tree, page, content stream, font), a cross-reference table and a trailer.
//!
//! ```no_run
//! pdf_lines::create_pdf("notes.pdf", &["first line", "second line"])?;
//! # Ok::<(), pdf_lines::PDFWriteError>(())
//! ```

use std::path::Path;
use log::debug;

mod error;
mod writer;
pub mod pdf;

pub use error::{PDFWriteError, PDFWriteResult};
use pdf::Value;

/// How literal string delimiters in input lines are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapePolicy {
    /// Backslash-escape `(`, `)` and `\`
    #[default]
    Escape,
    /// Fail with [`PDFWriteError::InvalidLine`]
    Reject,
}

/// Page size in points; the origin is always the lower left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaBox {
    pub width: f64,
    pub height: f64,
}

impl MediaBox {
    /// US Letter, 612 x 792
    pub const LETTER: MediaBox = MediaBox { width: 612.0, height: 792.0 };

    pub(crate) fn to_value(self) -> Value {
        Value::Array(vec![
            Value::from(0i64),
            Value::from(0i64),
            Value::from(self.width),
            Value::from(self.height),
        ])
    }
}

/// Text layout settings
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Page size
    pub media_box: MediaBox,
    /// Resource name the content stream selects the font by
    pub font_name: String,
    /// Standard Type1 font
    pub base_font: String,
    /// Font size in points
    pub font_size: f64,
    /// Baseline of the first line
    pub start_x: f64,
    pub start_y: f64,
    /// Vertical distance between consecutive lines
    pub line_spacing: f64,
    /// Delimiter handling
    pub escape_policy: EscapePolicy,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            media_box: MediaBox::LETTER,
            font_name: "F1".to_string(),
            base_font: "Helvetica".to_string(),
            font_size: 24.0,
            start_x: 100.0,
            start_y: 750.0,
            line_spacing: 30.0,
            escape_policy: EscapePolicy::Escape,
        }
    }
}

impl LayoutOptions {
    pub fn with_media_box(mut self, width: f64, height: f64) -> Self {
        self.media_box = MediaBox { width, height };
        self
    }

    pub fn with_font(mut self, font_name: impl Into<String>, base_font: impl Into<String>) -> Self {
        self.font_name = font_name.into();
        self.base_font = base_font.into();
        self
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_start(mut self, x: f64, y: f64) -> Self {
        self.start_x = x;
        self.start_y = y;
        self
    }

    pub fn with_line_spacing(mut self, line_spacing: f64) -> Self {
        self.line_spacing = line_spacing;
        self
    }

    pub fn with_escape_policy(mut self, escape_policy: EscapePolicy) -> Self {
        self.escape_policy = escape_policy;
        self
    }

    /// Check that every setting produces valid PDF syntax
    pub fn validate(&self) -> PDFWriteResult<()> {
        let positive = [
            ("media box width", self.media_box.width),
            ("media box height", self.media_box.height),
            ("font size", self.font_size),
            ("line spacing", self.line_spacing),
        ];
        for (what, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(PDFWriteError::invalid_layout(format!("{} must be positive, got {}", what, value)));
            }
        }

        for (what, value) in [("start x", self.start_x), ("start y", self.start_y)] {
            if !value.is_finite() {
                return Err(PDFWriteError::invalid_layout(format!("{} must be finite, got {}", what, value)));
            }
        }

        for (what, name) in [("font name", &self.font_name), ("base font", &self.base_font)] {
            if !is_valid_name(name) {
                return Err(PDFWriteError::invalid_layout(format!("{} {:?} is not a valid name", what, name)));
            }
        }

        Ok(())
    }
}

/// Regular characters only, so the name needs no `#` escapes
fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(pdf::is_regular_name_byte)
}

/// Single page text PDF writer
#[derive(Debug, Clone, Default)]
pub struct PDFTextWriter {
    options: LayoutOptions,
}

impl PDFTextWriter {
    /// Create writer with the default layout
    pub fn new() -> Self {
        Self::default()
    }

    /// Create writer with custom layout
    pub fn with_options(options: LayoutOptions) -> PDFWriteResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Layout in use
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Encode `lines` into the bytes of a complete PDF file
    ///
    /// The result depends only on `lines` and the layout, so encoding the
    /// same input twice yields identical bytes.
    pub fn encode<S: AsRef<str>>(&self, lines: &[S]) -> PDFWriteResult<Vec<u8>> {
        let doc = pdf::build_text_page(lines, &self.options)?;
        let bytes = doc.assemble()?;
        debug!("Encoded {} lines into {} bytes", lines.len(), bytes.len());
        Ok(bytes)
    }

    /// Encode `lines` and replace `path` with the result
    pub fn write_file<P: AsRef<Path>, S: AsRef<str>>(&self, path: P, lines: &[S]) -> PDFWriteResult<()> {
        let bytes = self.encode(lines)?;
        writer::write_atomic(path.as_ref(), &bytes)
    }
}

/// Write `lines` to a one page PDF at `path` using the default layout
pub fn create_pdf<P: AsRef<Path>, S: AsRef<str>>(path: P, lines: &[S]) -> PDFWriteResult<()> {
    PDFTextWriter::new().write_file(path, lines)
}
