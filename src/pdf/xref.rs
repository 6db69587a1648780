//! PDF cross-reference table implementation

use std::io::{self, Write};
use log::trace;
use crate::error::{PDFWriteError, PDFWriteResult};
use super::PDFSerialize;

/// Largest offset a 10 digit entry can hold
pub const MAX_OFFSET: u64 = 9_999_999_999;

/// Generation of the free list head (object 0)
const FREE_HEAD_GENERATION: u16 = 65535;

/// One row of the cross-reference table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XRefEntry {
    /// Byte offset from the start of the file (0 for the free head)
    pub offset: u64,
    /// Generation number
    pub generation: u16,
    /// `n` when true, `f` otherwise
    pub in_use: bool,
}

impl XRefEntry {
    fn free_head() -> Self {
        Self {
            offset: 0,
            generation: FREE_HEAD_GENERATION,
            in_use: false,
        }
    }

    fn in_use(offset: u64) -> Self {
        Self {
            offset,
            generation: 0,
            in_use: true,
        }
    }
}

/// PDF cross-reference table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XRefTable {
    entries: Vec<XRefEntry>,
    start_offset: u64,
}

impl XRefTable {
    /// Build the table from the header length and the serialized length of
    /// every object, in object number order.
    ///
    /// Object 1 starts right after the header; each following object starts
    /// where the previous one ended. The table itself starts after the last
    /// object.
    pub fn from_object_lengths(header_len: u64, lengths: &[u64]) -> PDFWriteResult<Self> {
        let mut entries = Vec::with_capacity(lengths.len() + 1);
        entries.push(XRefEntry::free_head());

        let mut offset = header_len;
        for &length in lengths {
            if offset > MAX_OFFSET {
                return Err(PDFWriteError::OffsetOverflow(offset));
            }
            trace!("Object {} at offset {}", entries.len(), offset);
            entries.push(XRefEntry::in_use(offset));
            offset += length;
        }

        Ok(Self {
            entries,
            start_offset: offset,
        })
    }

    /// Get xref table entries, including the free head
    pub fn entries(&self) -> &[XRefEntry] {
        &self.entries
    }

    /// Number of entries, including the free head (the trailer `/Size`)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Byte position of the `xref` keyword
    pub fn start_offset(&self) -> u64 {
        self.start_offset
    }
}

impl PDFSerialize for XRefTable {
    fn write_to(&self, output: &mut Vec<u8>) -> io::Result<()> {
        write!(output, "xref\n0 {}\n", self.entries.len())?;
        for entry in &self.entries {
            let kind = if entry.in_use { 'n' } else { 'f' };
            write!(output, "{:010} {:05} {} \n", entry.offset, entry.generation, kind)?;
        }
        Ok(())
    }
}

#[cfg(test)]
impl XRefTable {
    /// Parse a single-subsection table, starting at the `xref` keyword
    fn parse(data: &[u8]) -> PDFWriteResult<Vec<XRefEntry>> {
        let malformed = |msg: &str| PDFWriteError::IoError(io::Error::new(io::ErrorKind::InvalidData, msg.to_string()));
        let text = std::str::from_utf8(data).map_err(|_| malformed("Invalid xref encoding"))?;
        let mut lines = text.split('\n');

        if lines.next() != Some("xref") {
            return Err(malformed("Missing xref marker"));
        }

        let header = lines.next().ok_or_else(|| malformed("Missing xref subsection"))?;
        let parts: Vec<&str> = header.split_whitespace().collect();
        if parts.len() != 2 || parts[0] != "0" {
            return Err(malformed("Invalid xref subsection"));
        }
        let count = parts[1].parse::<usize>().map_err(|_| malformed("Invalid xref count"))?;

        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            let entry = lines.next().ok_or_else(|| malformed("Truncated xref"))?;
            if entry.len() != 19 {
                return Err(malformed("Invalid xref entry length"));
            }

            let offset = entry[0..10].parse::<u64>().map_err(|_| malformed("Invalid xref offset"))?;
            let generation = entry[11..16].parse::<u16>().map_err(|_| malformed("Invalid xref generation"))?;
            let in_use = match &entry[17..18] {
                "n" => true,
                "f" => false,
                _ => return Err(malformed("Invalid xref entry type")),
            };
            entries.push(XRefEntry { offset, generation, in_use });
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_log::test;

    #[test]
    fn test_running_offsets() {
        let table = XRefTable::from_object_lengths(9, &[10, 20, 5]).unwrap();
        let offsets: Vec<u64> = table.entries().iter().map(|e| e.offset).collect();

        assert_eq!(offsets, vec![0, 9, 19, 39]);
        assert_eq!(table.start_offset(), 44);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_table_text() {
        let table = XRefTable::from_object_lengths(9, &[12, 234]).unwrap();
        let text = String::from_utf8(table.to_bytes().unwrap()).unwrap();

        assert_eq!(
            text,
            "xref\n0 3\n\
             0000000000 65535 f \n\
             0000000009 00000 n \n\
             0000000021 00000 n \n"
        );
    }

    #[test]
    fn test_entries_are_twenty_bytes() {
        let table = XRefTable::from_object_lengths(9, &[1, 2, 3]).unwrap();
        let bytes = table.to_bytes().unwrap();
        let body = &bytes[b"xref\n0 4\n".len()..];

        assert_eq!(body.len(), 4 * 20);
    }

    #[test]
    fn test_no_objects() {
        let table = XRefTable::from_object_lengths(9, &[]).unwrap();
        assert_eq!(table.entries(), &[XRefEntry::free_head()]);
        assert_eq!(table.start_offset(), 9);
    }

    #[test]
    fn test_offset_overflow() {
        let result = XRefTable::from_object_lengths(9, &[MAX_OFFSET, 1]);
        assert!(matches!(result, Err(PDFWriteError::OffsetOverflow(o)) if o == MAX_OFFSET + 9));
    }

    #[test]
    fn test_write_then_parse() {
        let table = XRefTable::from_object_lengths(15, &[40, 51, 170]).unwrap();
        let bytes = table.to_bytes().unwrap();

        let parsed = XRefTable::parse(&bytes).unwrap();
        assert_eq!(parsed, table.entries());
    }

    #[test]
    fn test_invalid_xref() {
        let invalid_data = b"xref\n0 2\ninvalid entry\n0000000234 00000 n \n";
        assert!(XRefTable::parse(invalid_data).is_err());
    }
}
