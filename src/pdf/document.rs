//! Document arena and byte-level assembly

use std::collections::HashSet;
use std::io::Write;
use log::{debug, trace};
use crate::error::{PDFWriteError, PDFWriteResult};
use super::{Dictionary, ObjectId, ObjectType, PDFObject, PDFSerialize, XRefTable};

/// File header
pub const PDF_HEADER: &[u8] = b"%PDF-1.4\n";
/// End of file marker
const PDF_EOF_MARKER: &[u8] = b"%%EOF\n";

/// In-memory PDF document
///
/// Objects live in an arena indexed by object number. Ids are assigned at
/// registration time, either up front with [`Document::reserve`] (so other
/// objects can refer to them before they exist) or on [`Document::add`].
#[derive(Debug, Default)]
pub struct Document {
    /// Slot `i` holds object number `i + 1`
    objects: Vec<Option<PDFObject>>,
    root: Option<ObjectId>,
}

impl Document {
    /// Create empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the next object id without writing the object yet
    pub fn reserve(&mut self) -> ObjectId {
        self.objects.push(None);
        ObjectId::new(self.objects.len() as u32)
    }

    /// Fill a reserved id
    pub fn insert(&mut self, id: ObjectId, object: impl Into<ObjectType>) -> PDFWriteResult<()> {
        let slot = id
            .number
            .checked_sub(1)
            .and_then(|index| self.objects.get_mut(index as usize))
            .ok_or(PDFWriteError::UnresolvedObject(id.number))?;

        if slot.is_some() {
            return Err(PDFWriteError::DuplicateObject(id.number));
        }

        trace!("Registered object {}", id.number);
        *slot = Some(PDFObject::new(id, object.into()));
        Ok(())
    }

    /// Register an object under the next free id
    pub fn add(&mut self, object: impl Into<ObjectType>) -> PDFWriteResult<ObjectId> {
        let id = self.reserve();
        self.insert(id, object)?;
        Ok(id)
    }

    /// Set the document catalog referenced from the trailer
    pub fn set_root(&mut self, root: ObjectId) {
        self.root = Some(root);
    }

    /// Look up an object
    pub fn get(&self, id: ObjectId) -> Option<&PDFObject> {
        let index = id.number.checked_sub(1)? as usize;
        self.objects.get(index)?.as_ref()
    }

    /// Number of registered ids
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Serialize header, objects, cross-reference table and trailer
    ///
    /// Each object is rendered into its own buffer and measured before it is
    /// appended, and the xref offsets are computed from those measurements in
    /// the same order the objects are appended.
    pub fn assemble(&self) -> PDFWriteResult<Vec<u8>> {
        let root = self.root.ok_or(PDFWriteError::MissingRoot)?;
        let objects = self.resolved_objects()?;
        self.check_references(root, &objects)?;

        let mut output = PDF_HEADER.to_vec();
        let mut lengths = Vec::with_capacity(objects.len());
        for object in &objects {
            let bytes = object.to_bytes()?;
            lengths.push(bytes.len() as u64);
            output.extend_from_slice(&bytes);
        }

        let xref = XRefTable::from_object_lengths(PDF_HEADER.len() as u64, &lengths)?;
        debug_assert_eq!(xref.start_offset(), output.len() as u64);
        xref.write_to(&mut output)?;

        let trailer = Dictionary::new()
            .with("Size", xref.len() as i64)
            .with("Root", root);
        output.extend_from_slice(b"trailer\n");
        trailer.write_to(&mut output)?;
        write!(output, "\nstartxref\n{}\n", xref.start_offset())?;
        output.extend_from_slice(PDF_EOF_MARKER);

        debug!("Assembled {} objects into {} bytes", objects.len(), output.len());
        Ok(output)
    }

    fn resolved_objects(&self) -> PDFWriteResult<Vec<&PDFObject>> {
        self.objects
            .iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.as_ref()
                    .ok_or(PDFWriteError::UnresolvedObject(index as u32 + 1))
            })
            .collect()
    }

    fn check_references(&self, root: ObjectId, objects: &[&PDFObject]) -> PDFWriteResult<()> {
        let known: HashSet<ObjectId> = objects.iter().map(|o| o.id).collect();

        if !known.contains(&root) {
            return Err(PDFWriteError::DanglingReference { from: 0, to: root.number });
        }

        for object in objects {
            if let Some(missing) = object
                .object_type
                .references()
                .into_iter()
                .find(|id| !known.contains(id))
            {
                return Err(PDFWriteError::DanglingReference {
                    from: object.id.number,
                    to: missing.number,
                });
            }
        }
        Ok(())
    }
}
