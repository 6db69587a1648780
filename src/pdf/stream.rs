//! PDF stream object implementation

use std::io;
use log::trace;
use super::{Dictionary, PDFSerialize};

/// PDF stream object
///
/// `/Length` is always derived from the payload when the stream is written,
/// so it cannot drift from the bytes that end up between the markers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stream {
    /// Raw stream data
    data: Vec<u8>,
}

impl Stream {
    /// Create new stream object
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl PDFSerialize for Stream {
    fn write_to(&self, output: &mut Vec<u8>) -> io::Result<()> {
        trace!("Writing stream of {} bytes", self.data.len());
        Dictionary::new()
            .with("Length", self.data.len() as i64)
            .write_to(output)?;
        output.extend_from_slice(b"\nstream\n");
        output.extend_from_slice(&self.data);
        output.extend_from_slice(b"\nendstream");
        Ok(())
    }
}
