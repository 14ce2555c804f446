use std::sync::Arc;

use crate::column::Column;
use crate::data_type::DataType;
use crate::error::{Error, Result};
use crate::relation::{DynTable, Relation};
use crate::shape::{SchemaRegistry, Shape};
use crate::value::Value;

/// A type-stable table: columns bound to a resolved [Shape].
///
/// Invariants, established at construction and never broken afterwards:
/// the columns match the shape's fields one-to-one in order and element
/// type, all columns have equal length, and a table with zero columns has
/// zero rows. There is no in-place mutation surface; relational operators
/// produce new tables.
#[derive(Debug, Clone)]
pub struct Table {
    shape: Arc<Shape>,
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Builds a table from columns and matching names.
    ///
    /// # Errors
    /// - Schema kind if `columns` and `names` disagree in count or `names`
    ///   repeats an entry.
    /// - Dimension kind if the columns have unequal lengths.
    ///
    /// # Example
    /// ```
    /// use typetable::{Column, Table};
    ///
    /// let table = Table::from_columns(
    ///     vec![Column::from(vec![1i64, 2]), Column::from(vec!["a", "b"])],
    ///     vec!["id".into(), "name".into()],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(table.ncol(), 2);
    /// assert_eq!(table.nrow(), 2);
    /// ```
    pub fn from_columns(columns: Vec<Column>, names: Vec<String>) -> Result<Table> {
        let dtypes: Vec<DataType> = columns.iter().map(Column::dtype).collect();
        let shape = SchemaRegistry::global().resolve(&dtypes, &names, None)?;
        Self::bind(shape, columns)
    }

    /// Builds a table from columns with auto-generated names `c0..cN`.
    pub fn from_unnamed_columns(columns: Vec<Column>) -> Result<Table> {
        let names = (0..columns.len()).map(|i| format!("c{i}")).collect();
        Self::from_columns(columns, names)
    }

    /// Builds a table from (name, column) pairs; column order is the
    /// iteration order of `pairs`.
    ///
    /// # Example
    /// ```
    /// use typetable::{Column, Table};
    ///
    /// let table = Table::from_named_columns([
    ///     ("id", Column::from(vec![1i64, 2, 3])),
    ///     ("active", Column::from(vec![true, false, true])),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(table.names(), vec!["id", "active"]);
    /// ```
    pub fn from_named_columns<I, S>(pairs: I) -> Result<Table>
    where
        I: IntoIterator<Item = (S, Column)>,
        S: Into<String>,
    {
        let (names, columns): (Vec<String>, Vec<Column>) = pairs
            .into_iter()
            .map(|(name, column)| (name.into(), column))
            .unzip();
        Self::from_columns(columns, names)
    }

    /// Like [Table::from_columns], with a shape tag for diagnostics.
    /// The hint has no effect on shape identity.
    pub fn with_shape_hint(
        columns: Vec<Column>,
        names: Vec<String>,
        hint: &str,
    ) -> Result<Table> {
        let dtypes: Vec<DataType> = columns.iter().map(Column::dtype).collect();
        let shape = SchemaRegistry::global().resolve(&dtypes, &names, Some(hint))?;
        Self::bind(shape, columns)
    }

    /// Copies columns and names out of any relation.
    ///
    /// With `subset`, only the named columns are copied, in the order given.
    ///
    /// # Errors
    /// - Index kind if a subset name is not in `source`.
    /// - The construction errors of [Table::from_columns].
    pub fn from_relation(source: &dyn Relation, subset: Option<&[&str]>) -> Result<Table> {
        let positions: Vec<usize> = match subset {
            None => (0..source.ncol()).collect(),
            Some(wanted) => wanted
                .iter()
                .map(|&name| {
                    (0..source.ncol())
                        .find(|&i| source.name_at(i) == Some(name))
                        .ok_or_else(|| Error::UnknownColumn { name: name.into() })
                })
                .collect::<Result<_>>()?,
        };

        let mut names = Vec::with_capacity(positions.len());
        let mut columns = Vec::with_capacity(positions.len());
        for pos in positions {
            let name = source.name_at(pos).unwrap_or_default().to_string();
            let column = source.column_at(pos).cloned().ok_or(Error::ColumnOutOfRange {
                pos,
                ncol: source.ncol(),
            })?;
            names.push(name);
            columns.push(column);
        }
        Self::from_columns(columns, names)
    }

    /// Copies this table out to the untyped boundary representation,
    /// identical columns and names.
    pub fn to_relation(&self) -> DynTable {
        DynTable::new(
            self.names().iter().map(|s| s.to_string()).collect(),
            self.columns.clone(),
        )
    }

    /// Checks column lengths and binds columns to an already-resolved shape.
    /// The caller guarantees the shape was resolved from these columns'
    /// names and element types.
    pub(crate) fn bind(shape: Arc<Shape>, columns: Vec<Column>) -> Result<Table> {
        let row_count = columns.first().map(Column::len).unwrap_or(0);
        for (field, column) in shape.fields().iter().zip(&columns) {
            if column.len() != row_count {
                return Err(Error::ColumnLengthMismatch {
                    name: field.name.clone(),
                    len: column.len(),
                    expected: row_count,
                });
            }
        }
        Ok(Table {
            shape,
            columns,
            row_count,
        })
    }

    /// Number of columns.
    pub fn ncol(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    pub fn nrow(&self) -> usize {
        self.row_count
    }

    /// Returns true if the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// The shape this table is bound to.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Column names in schema order.
    pub fn names(&self) -> Vec<&str> {
        self.shape.names()
    }

    /// All cells of row `row` in schema order, or `None` if out of range.
    pub fn row(&self, row: usize) -> Option<Vec<Value>> {
        if row >= self.row_count {
            return None;
        }
        self.columns.iter().map(|c| c.value_at(row)).collect()
    }

    pub(crate) fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub(crate) fn shape_handle(&self) -> Arc<Shape> {
        Arc::clone(&self.shape)
    }
}

impl Relation for Table {
    fn ncol(&self) -> usize {
        self.columns.len()
    }

    fn nrow(&self) -> usize {
        self.row_count
    }

    fn name_at(&self, pos: usize) -> Option<&str> {
        self.shape.fields().get(pos).map(|f| f.name.as_str())
    }

    fn column_at(&self, pos: usize) -> Option<&Column> {
        self.columns.get(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn users() -> Table {
        Table::from_named_columns([
            ("id", Column::from(vec![1i64, 2, 3])),
            ("name", Column::from(vec!["Alice", "Bob", "Charlie"])),
            ("age", Column::from(vec![30i64, 17, 25])),
        ])
        .unwrap()
    }

    #[test]
    fn test_from_columns() {
        let table = users();

        assert_eq!(table.ncol(), 3);
        assert_eq!(table.nrow(), 3);
        assert_eq!(table.names(), vec!["id", "name", "age"]);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_count_mismatch() {
        let err = Table::from_columns(
            vec![Column::from(vec![1i64])],
            vec!["a".into(), "b".into()],
        )
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[test]
    fn test_duplicate_names() {
        let err = Table::from_columns(
            vec![Column::from(vec![1i64]), Column::from(vec![2i64])],
            vec!["id".into(), "id".into()],
        )
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[test]
    fn test_unequal_column_lengths() {
        let err = Table::from_columns(
            vec![Column::from(vec![1i64, 2]), Column::from(vec![1i64])],
            vec!["a".into(), "b".into()],
        )
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Dimension);
    }

    #[test]
    fn test_zero_columns_means_zero_rows() {
        let table = Table::from_columns(vec![], vec![]).unwrap();

        assert_eq!(table.ncol(), 0);
        assert_eq!(table.nrow(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_unnamed_columns_autogenerate() {
        let table = Table::from_unnamed_columns(vec![
            Column::from(vec![1i64]),
            Column::from(vec![0.5f64]),
        ])
        .unwrap();

        assert_eq!(table.names(), vec!["c0", "c1"]);
    }

    #[test]
    fn test_shape_hint_is_diagnostic_only() {
        let a = Table::with_shape_hint(
            vec![Column::from(vec![1i64])],
            vec!["hinted".into()],
            "my_table",
        )
        .unwrap();
        let b = Table::from_columns(vec![Column::from(vec![9i64])], vec!["hinted".into()])
            .unwrap();

        // both tables resolve to the same shape regardless of the hint
        assert!(Arc::ptr_eq(&a.shape_handle(), &b.shape_handle()));
    }

    #[test]
    fn test_row_pivot() {
        let table = users();

        assert_eq!(
            table.row(0),
            Some(vec![
                Value::Int(1),
                Value::Text("Alice".into()),
                Value::Int(30)
            ])
        );
        assert_eq!(table.row(3), None);
    }

    #[test]
    fn test_relation_round_trip() {
        let table = users();
        let rel = table.to_relation();
        let back = Table::from_relation(&rel, None).unwrap();

        assert_eq!(back.names(), table.names());
        assert_eq!(back.columns(), table.columns());
    }

    #[test]
    fn test_from_relation_subset() {
        let rel = users().to_relation();

        let table = Table::from_relation(&rel, Some(&["age", "id"])).unwrap();

        assert_eq!(table.names(), vec!["age", "id"]);
        assert_eq!(
            table.column_at(0).unwrap().as_ints(),
            Some(&[30i64, 17, 25][..])
        );

        let err = Table::from_relation(&rel, Some(&["missing"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Index);
    }

    #[test]
    fn test_from_relation_rejects_duplicate_source_names() {
        let mut rel = DynTable::default();
        rel.push_column("x", Column::from(vec![1i64]));
        rel.push_column("x", Column::from(vec![2i64]));

        let err = Table::from_relation(&rel, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
    }
}
