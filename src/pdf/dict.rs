//! PDF dictionary and direct value implementation

use std::io::{self, Write};
use indexmap::IndexMap;
use super::object::write_name;
use super::{ObjectId, PDFSerialize};

/// PDF dictionary object
///
/// Entries are written in insertion order so that the same dictionary always
/// serializes to the same bytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: IndexMap<String, Value>,
}

/// Direct value types
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Name(String),
    Reference(ObjectId),
    Array(Vec<Value>),
    Dictionary(Box<Dictionary>),
    Null,
}

impl Value {
    /// Create name value
    pub fn name(name: impl Into<String>) -> Self {
        Value::Name(name.into())
    }

    pub(crate) fn collect_references(&self, refs: &mut Vec<ObjectId>) {
        match self {
            Value::Reference(id) => refs.push(*id),
            Value::Array(items) => items.iter().for_each(|item| item.collect_references(refs)),
            Value::Dictionary(dict) => dict.collect_references(refs),
            _ => {}
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<ObjectId> for Value {
    fn from(id: ObjectId) -> Self {
        Value::Reference(id)
    }
}

impl From<Dictionary> for Value {
    fn from(dict: Dictionary) -> Self {
        Value::Dictionary(Box::new(dict))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl PDFSerialize for Value {
    fn write_to(&self, output: &mut Vec<u8>) -> io::Result<()> {
        match self {
            Value::Number(n) => write!(output, "{}", n)?,
            Value::Name(n) => write_name(output, n),
            Value::Reference(id) => write!(output, "{}", id)?,
            Value::Array(arr) => {
                output.push(b'[');
                for (i, item) in arr.iter().enumerate() {
                    if i > 0 {
                        output.push(b' ');
                    }
                    item.write_to(output)?;
                }
                output.push(b']');
            }
            Value::Dictionary(dict) => dict.write_to(output)?,
            Value::Null => output.extend_from_slice(b"null"),
        }
        Ok(())
    }
}

impl Dictionary {
    /// Create new dictionary
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Builder-style set
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Get value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Get name value
    pub fn get_name(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(Value::Name(n)) => Some(n),
            _ => None,
        }
    }

    /// Get reference value
    pub fn get_reference(&self, key: &str) -> Option<ObjectId> {
        match self.get(key) {
            Some(Value::Reference(id)) => Some(*id),
            _ => None,
        }
    }

    /// Set value, keeping the position of an existing key
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.entries.insert(key.to_string(), value.into());
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn collect_references(&self, refs: &mut Vec<ObjectId>) {
        for value in self.entries.values() {
            value.collect_references(refs);
        }
    }
}

impl PDFSerialize for Dictionary {
    fn write_to(&self, output: &mut Vec<u8>) -> io::Result<()> {
        output.extend_from_slice(b"<<");
        for (key, value) in &self.entries {
            output.push(b' ');
            write_name(output, key);
            output.push(b' ');
            value.write_to(output)?;
        }
        output.extend_from_slice(b" >>");
        Ok(())
    }
}
