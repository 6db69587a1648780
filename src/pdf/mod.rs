//! PDF object model and file assembly

mod content;
mod dict;
mod document;
mod object;
mod page;
mod stream;
mod xref;

pub use content::{Content, Operation};
pub use dict::{Dictionary, Value};
pub use document::{Document, PDF_HEADER};
pub use object::{ObjectId, ObjectType, PDFObject};
pub(crate) use object::is_regular_name_byte;
pub use page::build_text_page;
pub use stream::Stream;
pub use xref::{XRefEntry, XRefTable, MAX_OFFSET};

use std::io;

/// Byte serialization shared by every PDF building block
pub trait PDFSerialize {
    /// Append the serialized form to `output`
    fn write_to(&self, output: &mut Vec<u8>) -> io::Result<()>;

    /// Serialize into a fresh buffer
    fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut output = Vec::new();
        self.write_to(&mut output)?;
        Ok(output)
    }
}
