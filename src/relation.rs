use crate::column::Column;
use crate::value::Value;

/// The minimal relational capability set: ordered named columns plus a row
/// count.
///
/// Both the type-stable [Table](crate::Table) and the untyped [DynTable]
/// boundary value implement it; operators that do not care which kind they
/// are handed are written against this trait.
pub trait Relation {
    /// Number of columns.
    fn ncol(&self) -> usize;

    /// Number of rows. Zero columns means zero rows.
    fn nrow(&self) -> usize;

    /// Name of the column at `pos`, if in range.
    fn name_at(&self, pos: usize) -> Option<&str>;

    /// The column at `pos`, if in range.
    fn column_at(&self, pos: usize) -> Option<&Column>;

    /// Column names in schema order.
    fn names(&self) -> Vec<&str> {
        (0..self.ncol()).filter_map(|i| self.name_at(i)).collect()
    }

    /// All cells of row `row`, in schema order.
    /// Returns `None` if the row is out of range.
    fn row_at(&self, row: usize) -> Option<Vec<Value>> {
        if row >= self.nrow() {
            return None;
        }
        (0..self.ncol())
            .map(|i| self.column_at(i).and_then(|c| c.value_at(row)))
            .collect()
    }
}

/// The untyped boundary relation.
///
/// Named columns with no shape binding: duplicate names are representable
/// and no invariant is enforced beyond what the columns themselves carry.
/// This is the value exchanged with callers that do not speak type-stable
/// tables, and the result type of a mixed-kind concatenation.
#[derive(Debug, Clone, Default)]
pub struct DynTable {
    names: Vec<String>,
    columns: Vec<Column>,
}

impl DynTable {
    /// Wraps the given names and columns, positionally paired.
    pub fn new(names: Vec<String>, columns: Vec<Column>) -> Self {
        Self { names, columns }
    }

    /// Appends a named column at the end.
    pub fn push_column(&mut self, name: impl Into<String>, column: Column) {
        self.names.push(name.into());
        self.columns.push(column);
    }
}

impl Relation for DynTable {
    fn ncol(&self) -> usize {
        self.columns.len()
    }

    fn nrow(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    fn name_at(&self, pos: usize) -> Option<&str> {
        self.names.get(pos).map(String::as_str)
    }

    fn column_at(&self, pos: usize) -> Option<&Column> {
        self.columns.get(pos)
    }
}
