//! Single text page layout

use log::trace;
use crate::error::PDFWriteResult;
use crate::LayoutOptions;
use super::{Content, Dictionary, Document, PDFSerialize, Stream, Value};

/// Build a one page document showing `lines` top to bottom
///
/// Objects are registered as catalog, page tree, page, content stream and
/// font, so they are numbered 1 to 5 in that order. `options` is validated
/// before anything is built.
pub fn build_text_page<S: AsRef<str>>(lines: &[S], options: &LayoutOptions) -> PDFWriteResult<Document> {
    options.validate()?;

    let mut doc = Document::new();
    let catalog = doc.reserve();
    let pages = doc.reserve();
    let page = doc.reserve();
    let contents = doc.reserve();
    let font = doc.reserve();

    doc.insert(catalog, Dictionary::new()
        .with("Type", Value::name("Catalog"))
        .with("Pages", pages))?;

    doc.insert(pages, Dictionary::new()
        .with("Type", Value::name("Pages"))
        .with("Kids", vec![Value::from(page)])
        .with("Count", 1i64))?;

    let fonts = Dictionary::new().with(&options.font_name, font);
    doc.insert(page, Dictionary::new()
        .with("Type", Value::name("Page"))
        .with("Parent", pages)
        .with("MediaBox", options.media_box.to_value())
        .with("Contents", contents)
        .with("Resources", Dictionary::new().with("Font", fonts)))?;

    let content = Content::text_lines(lines, options)?;
    let data = content.to_bytes()?;
    trace!("Content stream is {} bytes", data.len());
    doc.insert(contents, Stream::new(data))?;

    doc.insert(font, Dictionary::new()
        .with("Type", Value::name("Font"))
        .with("Subtype", Value::name("Type1"))
        .with("BaseFont", Value::name(options.base_font.clone())))?;

    doc.set_root(catalog);
    Ok(doc)
}
