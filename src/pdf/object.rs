//! PDF indirect objects and their serialization

use std::fmt;
use std::io::{self, Write};
use log::trace;
use super::{Dictionary, PDFSerialize, Stream, Value};

/// Identifier of an indirect object
///
/// Numbers are handed out by [`super::Document`] in registration order,
/// starting at 1. The generation is always 0 since documents are written once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
    /// Object number
    pub number: u32,
    /// Generation number
    pub generation: u16,
}

impl ObjectId {
    /// Create identifier with generation 0
    pub fn new(number: u32) -> Self {
        Self { number, generation: 0 }
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} R", self.number, self.generation)
    }
}

/// Body of an indirect object
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectType {
    /// Dictionary object
    Dictionary(Dictionary),
    /// Stream object (dictionary plus raw payload)
    Stream(Stream),
    /// Any other direct value
    Value(Value),
}

impl ObjectType {
    /// Every object id this body refers to
    pub fn references(&self) -> Vec<ObjectId> {
        let mut refs = Vec::new();
        match self {
            ObjectType::Dictionary(d) => d.collect_references(&mut refs),
            ObjectType::Stream(_) => {}
            ObjectType::Value(v) => v.collect_references(&mut refs),
        }
        refs
    }
}

impl From<Dictionary> for ObjectType {
    fn from(dict: Dictionary) -> Self {
        ObjectType::Dictionary(dict)
    }
}

impl From<Stream> for ObjectType {
    fn from(stream: Stream) -> Self {
        ObjectType::Stream(stream)
    }
}

impl From<Value> for ObjectType {
    fn from(value: Value) -> Self {
        ObjectType::Value(value)
    }
}

/// PDF indirect object
#[derive(Debug, Clone, PartialEq)]
pub struct PDFObject {
    /// Object identifier
    pub id: ObjectId,
    /// Object body
    pub object_type: ObjectType,
}

impl PDFObject {
    /// Create new PDF object
    pub fn new(id: ObjectId, object_type: ObjectType) -> Self {
        Self { id, object_type }
    }
}

impl PDFSerialize for PDFObject {
    fn write_to(&self, output: &mut Vec<u8>) -> io::Result<()> {
        trace!("Writing object {} {}", self.id.number, self.id.generation);
        write!(output, "{} {} obj\n", self.id.number, self.id.generation)?;

        match &self.object_type {
            ObjectType::Dictionary(d) => d.write_to(output)?,
            ObjectType::Stream(s) => s.write_to(output)?,
            ObjectType::Value(v) => v.write_to(output)?,
        }

        output.extend_from_slice(b"\nendobj\n");
        Ok(())
    }
}

/// Write bytes as a literal string, escaping delimiters and line breaks
pub fn write_literal_string(output: &mut Vec<u8>, bytes: &[u8]) {
    output.push(b'(');
    for &byte in bytes {
        match byte {
            b'(' | b')' | b'\\' => {
                output.push(b'\\');
                output.push(byte);
            }
            b'\n' => output.extend_from_slice(b"\\n"),
            b'\r' => output.extend_from_slice(b"\\r"),
            b'\t' => output.extend_from_slice(b"\\t"),
            0x08 => output.extend_from_slice(b"\\b"),
            0x0c => output.extend_from_slice(b"\\f"),
            _ => output.push(byte),
        }
    }
    output.push(b')');
}

/// Write a name object, `#xx`-escaping bytes outside the regular range
pub fn write_name(output: &mut Vec<u8>, name: &str) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    output.push(b'/');
    for &byte in name.as_bytes() {
        if is_regular_name_byte(byte) {
            output.push(byte);
        } else {
            output.extend_from_slice(&[b'#', HEX[(byte >> 4) as usize], HEX[(byte & 0x0f) as usize]]);
        }
    }
}

/// Printable ASCII that is neither a delimiter nor `#`
pub(crate) fn is_regular_name_byte(byte: u8) -> bool {
    (0x21..=0x7e).contains(&byte) && !b"()<>[]{}/%#".contains(&byte)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn literal(bytes: &[u8]) -> String {
        let mut out = Vec::new();
        write_literal_string(&mut out, bytes);
        String::from_utf8(out).unwrap()
    }

    #[test_log::test]
    fn test_dictionary_object() {
        let dict = Dictionary::new()
            .with("Type", Value::name("Catalog"))
            .with("Pages", ObjectId::new(2));
        let obj = PDFObject::new(ObjectId::new(1), dict.into());

        assert_eq!(
            String::from_utf8(obj.to_bytes().unwrap()).unwrap(),
            "1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n"
        );
    }

    #[test_log::test]
    fn test_value_object() {
        let obj = PDFObject::new(ObjectId::new(7), Value::Number(42.0).into());
        assert_eq!(obj.to_bytes().unwrap(), b"7 0 obj\n42\nendobj\n");
    }

    #[test_log::test]
    fn test_object_references() {
        let dict = Dictionary::new()
            .with("Parent", ObjectId::new(2))
            .with("Kids", Value::Array(vec![ObjectId::new(3).into(), ObjectId::new(4).into()]));
        let refs = ObjectType::from(dict).references();
        assert_eq!(refs, vec![ObjectId::new(2), ObjectId::new(3), ObjectId::new(4)]);
    }

    #[test_log::test]
    fn test_reference_display() {
        assert_eq!(ObjectId::new(5).to_string(), "5 0 R");
    }

    #[rstest]
    #[case(b"Hello", "(Hello)")]
    #[case(b"", "()")]
    #[case(b"a(b)c", "(a\\(b\\)c)")]
    #[case(b"C:\\dir", "(C:\\\\dir)")]
    #[case(b"one\ntwo\r", "(one\\ntwo\\r)")]
    #[case(b"tab\there", "(tab\\there)")]
    fn test_literal_escaping(#[case] input: &[u8], #[case] expected: &str) {
        assert_eq!(literal(input), expected);
    }

    #[rstest]
    #[case("Helvetica", "/Helvetica")]
    #[case("F1", "/F1")]
    #[case("Cat alog)", "/Cat#20alog#29")]
    #[case("A#B", "/A#23B")]
    #[case("a/b<c>", "/a#2Fb#3Cc#3E")]
    #[case("tab\t", "/tab#09")]
    #[case("\u{e9}", "/#C3#A9")]
    fn test_name_escaping(#[case] input: &str, #[case] expected: &str) {
        let mut out = Vec::new();
        write_name(&mut out, input);
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }
}
