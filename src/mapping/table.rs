use std::{fmt, io};

use serde::Serialize;

/// One row of the renaming table.
///
/// Rows render tab-separated. Member rows put the descriptor before the name:
///
/// ```text
/// CLASS   <src>   <dst>
/// FIELD   <owner> <desc> <name> <dst>
/// METHOD  <owner> <desc> <name> <dst>
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MappingRow {
    /// A class rename
    Class {
        /// Source name
        src: String,
        /// Destination name
        dst: String,
    },
    /// A field rename
    Field {
        /// Source name of the owner class
        owner: String,
        /// Source descriptor
        desc: String,
        /// Source name
        name: String,
        /// Destination name
        dst: String,
    },
    /// A method rename
    Method {
        /// Source name of the owner class
        owner: String,
        /// Source descriptor
        desc: String,
        /// Source name
        name: String,
        /// Destination name
        dst: String,
    },
}

impl fmt::Display for MappingRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingRow::Class { src, dst } => write!(f, "CLASS\t{src}\t{dst}"),
            MappingRow::Field {
                owner,
                desc,
                name,
                dst,
            } => write!(f, "FIELD\t{owner}\t{desc}\t{name}\t{dst}"),
            MappingRow::Method {
                owner,
                desc,
                name,
                dst,
            } => write!(f, "METHOD\t{owner}\t{desc}\t{name}\t{dst}"),
        }
    }
}

/// The renaming table produced by applying a softmap document.
///
/// Rows are ordered: classes, then fields, then methods, each sorted by their source key. The
/// [`Display`](fmt::Display) form is the table file format, one row per line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MappingTable {
    rows: Vec<MappingRow>,
}

impl MappingTable {
    pub(crate) fn new(rows: Vec<MappingRow>) -> Self {
        Self { rows }
    }

    /// All rows, in output order.
    #[must_use]
    pub fn rows(&self) -> &[MappingRow] {
        &self.rows
    }

    /// Iterates over all rows.
    pub fn iter(&self) -> std::slice::Iter<'_, MappingRow> {
        self.rows.iter()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if nothing was renamed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns true if the table holds `row`.
    #[must_use]
    pub fn contains(&self, row: &MappingRow) -> bool {
        self.rows.contains(row)
    }

    /// Writes the table in its text format.
    ///
    /// # Errors
    ///
    /// Returns any error of the underlying writer.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        for row in &self.rows {
            writeln!(writer, "{row}")?;
        }
        writer.flush()
    }
}

impl fmt::Display for MappingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a MappingTable {
    type Item = &'a MappingRow;
    type IntoIter = std::slice::Iter<'a, MappingRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
