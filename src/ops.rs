use std::cmp::Ordering;

use tracing::debug;

use crate::column::Column;
use crate::error::{Error, Result};
use crate::relation::{DynTable, Relation};
use crate::table::Table;

/// Right-hand side of a [select]/[transform] assignment: a ready column, or
/// an expression computed from the whole input table.
pub enum ColumnExpr {
    Col(Column),
    Computed(Box<dyn Fn(&Table) -> Result<Column>>),
}

impl ColumnExpr {
    /// Wraps a computation over the input table.
    pub fn computed(f: impl Fn(&Table) -> Result<Column> + 'static) -> Self {
        Self::Computed(Box::new(f))
    }

    fn eval(self, table: &Table) -> Result<Column> {
        match self {
            Self::Col(column) => Ok(column),
            Self::Computed(f) => f(table),
        }
    }
}

impl From<Column> for ColumnExpr {
    fn from(column: Column) -> Self {
        Self::Col(column)
    }
}

/// Builds a new table whose columns are exactly the assignments, in order.
///
/// Columns of `table` that are not re-listed do not appear in the result.
/// Computed assignments all see the input table and are evaluated
/// sequentially in assignment order.
///
/// # Errors
/// - Schema kind on duplicate assignment names.
/// - Dimension kind if the produced columns disagree on length.
///
/// # Example
/// ```
/// use typetable::{select, Column, ColumnExpr, Table};
///
/// let table = Table::from_named_columns([
///     ("x", Column::from(vec![1i64, 2, 3])),
///     ("y", Column::from(vec![4i64, 5, 6])),
/// ])
/// .unwrap();
///
/// let picked = select(
///     &table,
///     vec![(
///         "z".into(),
///         ColumnExpr::computed(|t| Ok(t.column_by_name("x")?.clone())),
///     )],
/// )
/// .unwrap();
///
/// assert_eq!(picked.names(), vec!["z"]);
/// ```
pub fn select(table: &Table, assignments: Vec<(String, ColumnExpr)>) -> Result<Table> {
    let mut names = Vec::with_capacity(assignments.len());
    let mut columns = Vec::with_capacity(assignments.len());
    for (name, expr) in assignments {
        columns.push(expr.eval(table)?);
        names.push(name);
    }
    Table::from_columns(columns, names)
}

/// Keeps the original columns in original order, then applies the
/// assignments.
///
/// An assignment whose name matches an existing column replaces that column
/// in place; a new name is appended at the end. Computed assignments see
/// the *input* table, not intermediate results.
pub fn transform(table: &Table, assignments: Vec<(String, ColumnExpr)>) -> Result<Table> {
    let mut names: Vec<String> = table.names().iter().map(|s| s.to_string()).collect();
    let mut columns: Vec<Column> = table.columns().to_vec();
    for (name, expr) in assignments {
        let column = expr.eval(table)?;
        match names.iter().position(|n| *n == name) {
            Some(pos) => columns[pos] = column,
            None => {
                names.push(name);
                columns.push(column);
            }
        }
    }
    Table::from_columns(columns, names)
}

/// Reorders all rows by a stable sort over a derived key table.
///
/// `keys` computes a key table from the input; rows are compared
/// lexicographically by the key columns in schema order, ascending, and
/// ties keep their original relative order. The result reuses the input's
/// shape.
///
/// # Errors
/// - Order kind if the key table's row count differs from the input's.
pub fn order<F>(table: &Table, keys: F) -> Result<Table>
where
    F: FnOnce(&Table) -> Result<Table>,
{
    let key_table = keys(table)?;
    if key_table.nrow() != table.nrow() {
        return Err(Error::KeyRowCountMismatch {
            keys: key_table.nrow(),
            nrow: table.nrow(),
        });
    }

    let mut perm: Vec<usize> = (0..table.nrow()).collect();
    let key_cols = key_table.columns();
    perm.sort_by(|&a, &b| {
        for col in key_cols {
            let ord = col.cmp_rows(a, b);
            // if it's not equal no need to compare more
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });

    let columns = table.columns().iter().map(|c| c.take(&perm)).collect();
    Table::bind(table.shape_handle(), columns)
}

/// Horizontal concatenation of two type-stable tables.
///
/// Columns of `b` are placed after the columns of `a`. Name collisions are
/// uniquified deterministically: the first occurrence keeps its name, each
/// later one takes the smallest `{name}_{k}` (k >= 1) not yet in the
/// result.
///
/// # Errors
/// - Dimension kind unless both tables have the same row count.
pub fn hcat(a: &Table, b: &Table) -> Result<Table> {
    if a.nrow() != b.nrow() {
        return Err(Error::RowCountMismatch {
            left: a.nrow(),
            right: b.nrow(),
        });
    }

    let mut names: Vec<String> = a.names().iter().map(|s| s.to_string()).collect();
    let mut columns: Vec<Column> = a.columns().to_vec();
    for (name, column) in b.names().iter().zip(b.columns()) {
        names.push(uniquify(&names, name));
        columns.push(column.clone());
    }
    Table::from_columns(columns, names)
}

/// Horizontal concatenation at the untyped boundary.
///
/// Used when either operand is not a type-stable table: both are consumed
/// through the [Relation] capability set and the result is a [DynTable].
/// Same row-count rule and uniquification policy as [hcat]. A column with
/// no name gets `c{position}` before uniquification.
pub fn hcat_dyn(a: &dyn Relation, b: &dyn Relation) -> Result<DynTable> {
    if a.nrow() != b.nrow() {
        return Err(Error::RowCountMismatch {
            left: a.nrow(),
            right: b.nrow(),
        });
    }

    let mut out = DynTable::default();
    let mut names: Vec<String> = Vec::with_capacity(a.ncol() + b.ncol());
    for rel in [a, b] {
        for pos in 0..rel.ncol() {
            let name = rel
                .name_at(pos)
                .map(str::to_string)
                .unwrap_or_else(|| format!("c{pos}"));
            let column = rel.column_at(pos).cloned().ok_or(Error::ColumnOutOfRange {
                pos,
                ncol: rel.ncol(),
            })?;
            let unique = uniquify(&names, &name);
            names.push(unique.clone());
            out.push_column(unique, column);
        }
    }
    Ok(out)
}

fn uniquify(taken: &[String], name: &str) -> String {
    if !taken.iter().any(|n| n == name) {
        return name.to_string();
    }
    let mut k = 1;
    loop {
        let candidate = format!("{name}_{k}");
        if !taken.iter().any(|n| n == &candidate) {
            debug!(from = name, to = candidate.as_str(), "renamed colliding column");
            return candidate;
        }
        k += 1;
    }
}
