//! Page content stream operators

use std::io::{self, Write};
use log::{trace, warn};
use crate::error::{PDFWriteError, PDFWriteResult};
use crate::{EscapePolicy, LayoutOptions};
use super::object::{write_literal_string, write_name};
use super::PDFSerialize;

/// Characters that delimit or escape a literal string
const LITERAL_DELIMITERS: [char; 3] = ['(', ')', '\\'];

/// Text operators used on a page
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// `BT`
    BeginText,
    /// `/<name> <size> Tf`
    SetFont { name: String, size: f64 },
    /// `<tx> <ty> Td`
    MoveText { tx: f64, ty: f64 },
    /// `(<text>) Tj`
    ShowText(Vec<u8>),
    /// `ET`
    EndText,
}

impl PDFSerialize for Operation {
    fn write_to(&self, output: &mut Vec<u8>) -> io::Result<()> {
        match self {
            Operation::BeginText => output.extend_from_slice(b"BT"),
            Operation::SetFont { name, size } => {
                write_name(output, name);
                write!(output, " {} Tf", size)?;
            }
            Operation::MoveText { tx, ty } => write!(output, "{} {} Td", tx, ty)?,
            Operation::ShowText(text) => {
                write_literal_string(output, text);
                output.extend_from_slice(b" Tj");
            }
            Operation::EndText => output.extend_from_slice(b"ET"),
        }
        Ok(())
    }
}

/// Sequence of content stream operations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Content {
    operations: Vec<Operation>,
}

impl Content {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation
    pub fn push(&mut self, operation: Operation) {
        self.operations.push(operation);
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Lay out lines top to bottom: one show operation per line, each
    /// followed by a move down of `line_spacing`.
    pub fn text_lines<S: AsRef<str>>(lines: &[S], options: &LayoutOptions) -> PDFWriteResult<Self> {
        let mut content = Self::new();
        content.push(Operation::BeginText);
        content.push(Operation::SetFont {
            name: options.font_name.clone(),
            size: options.font_size,
        });
        content.push(Operation::MoveText {
            tx: options.start_x,
            ty: options.start_y,
        });

        for (index, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            check_line(index, line, options.escape_policy)?;
            content.push(Operation::ShowText(line.as_bytes().to_vec()));
            content.push(Operation::MoveText {
                tx: 0.0,
                ty: -options.line_spacing,
            });
        }

        content.push(Operation::EndText);
        trace!("Laid out {} lines in {} operations", lines.len(), content.operations.len());
        Ok(content)
    }
}

impl PDFSerialize for Content {
    fn write_to(&self, output: &mut Vec<u8>) -> io::Result<()> {
        for (i, operation) in self.operations.iter().enumerate() {
            if i > 0 {
                output.push(b' ');
            }
            operation.write_to(output)?;
        }
        Ok(())
    }
}

fn check_line(index: usize, line: &str, policy: EscapePolicy) -> PDFWriteResult<()> {
    let Some(character) = line.chars().find(|c| LITERAL_DELIMITERS.contains(c)) else {
        return Ok(());
    };

    match policy {
        EscapePolicy::Escape => {
            warn!("Line {} contains {:?}, escaping", index, character);
            Ok(())
        }
        EscapePolicy::Reject => Err(PDFWriteError::InvalidLine { index, character }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_log::test;

    fn render(lines: &[&str], options: &LayoutOptions) -> String {
        let content = Content::text_lines(lines, options).unwrap();
        String::from_utf8(content.to_bytes().unwrap()).unwrap()
    }

    #[test]
    fn test_default_layout() {
        assert_eq!(
            render(&["line1", "line2"], &LayoutOptions::default()),
            "BT /F1 24 Tf 100 750 Td (line1) Tj 0 -30 Td (line2) Tj 0 -30 Td ET"
        );
    }

    #[test]
    fn test_no_lines() {
        assert_eq!(render(&[], &LayoutOptions::default()), "BT /F1 24 Tf 100 750 Td ET");
    }

    #[test]
    fn test_custom_layout() {
        let options = LayoutOptions::default()
            .with_font_size(10.5)
            .with_start(72.0, 720.0)
            .with_line_spacing(12.0);

        assert_eq!(
            render(&["a"], &options),
            "BT /F1 10.5 Tf 72 720 Td (a) Tj 0 -12 Td ET"
        );
    }

    #[test]
    fn test_delimiters_escaped() {
        assert_eq!(
            render(&["f(x) = \\y"], &LayoutOptions::default()),
            "BT /F1 24 Tf 100 750 Td (f\\(x\\) = \\\\y) Tj 0 -30 Td ET"
        );
    }

    #[test]
    fn test_delimiters_rejected() {
        let options = LayoutOptions::default().with_escape_policy(EscapePolicy::Reject);
        let err = Content::text_lines(&["fine", "not (fine)"], &options).unwrap_err();

        assert!(matches!(err, PDFWriteError::InvalidLine { index: 1, character: '(' }));
    }

    #[test]
    fn test_reject_allows_plain_lines() {
        let options = LayoutOptions::default().with_escape_policy(EscapePolicy::Reject);
        let content = Content::text_lines(&["plain", "text"], &options).unwrap();

        assert_eq!(content.operations().len(), 3 + 2 * 2 + 1);
    }
}
