use std::ops::Range;

use bitvec::slice::BitSlice;

use crate::column::Column;
use crate::error::{Error, Result};
use crate::table::Table;

/// Selects one column, by name or by position.
#[derive(Debug, Clone, Copy)]
pub enum ColSelector<'a> {
    Name(&'a str),
    Position(usize),
}

/// Selects a set of rows.
#[derive(Debug, Clone)]
pub enum RowSelector<'a> {
    /// Every row; the wildcard.
    All,
    /// A contiguous half-open range of positions.
    Range(Range<usize>),
    /// Explicit positions, in the given order (repeats allowed).
    Positions(&'a [usize]),
    /// Keep the rows whose mask bit is set. The mask length must equal the
    /// table's row count.
    Mask(&'a BitSlice),
}

impl Table {
    fn resolve_col(&self, sel: ColSelector) -> Result<usize> {
        match sel {
            ColSelector::Name(name) => self
                .shape()
                .field_index(name)
                .ok_or_else(|| Error::UnknownColumn { name: name.into() }),
            ColSelector::Position(pos) => {
                if pos < self.ncol() {
                    Ok(pos)
                } else {
                    Err(Error::ColumnOutOfRange {
                        pos,
                        ncol: self.ncol(),
                    })
                }
            }
        }
    }

    /// Resolves a single selector to the raw typed column.
    ///
    /// Returns the [Column] itself, not a one-column table; callers can
    /// drop to the native typed slice from here.
    ///
    /// # Errors
    /// - Index kind on an unknown name or out-of-range position.
    pub fn column(&self, sel: ColSelector) -> Result<&Column> {
        let pos = self.resolve_col(sel)?;
        Ok(&self.columns()[pos])
    }

    /// Convenience form of [Table::column] for lookup by name.
    pub fn column_by_name(&self, name: &str) -> Result<&Column> {
        self.column(ColSelector::Name(name))
    }

    /// Projects an ordered subset of columns into a new table.
    ///
    /// The result's shape is freshly resolved, so selecting the same column
    /// twice fails (the projected schema would repeat a name). An empty
    /// selector list yields the zero-column table, which by definition has
    /// zero rows.
    ///
    /// # Errors
    /// - Index kind on an unknown name or out-of-range position.
    /// - Schema kind when selectors repeat a column.
    pub fn project(&self, sels: &[ColSelector]) -> Result<Table> {
        let positions = sels
            .iter()
            .map(|&sel| self.resolve_col(sel))
            .collect::<Result<Vec<_>>>()?;

        let names: Vec<String> = positions
            .iter()
            .map(|&pos| self.shape().fields()[pos].name.clone())
            .collect();
        let columns: Vec<Column> = positions
            .iter()
            .map(|&pos| self.columns()[pos].clone())
            .collect();
        Table::from_columns(columns, names)
    }

    /// Filters rows under the unchanged shape.
    ///
    /// Every column is filtered independently; the shape handle is reused,
    /// never re-resolved. [RowSelector::All] and a full-span range are the
    /// fast path: a plain copy.
    ///
    /// # Errors
    /// - Index kind if a mask length differs from the row count, a position
    ///   is out of `[0, nrow)`, or a range extends past the row count.
    ///
    /// # Example
    /// ```
    /// use typetable::{Column, RowSelector, Table};
    ///
    /// let table = Table::from_named_columns([
    ///     ("id", Column::from(vec![1i64, 2, 3])),
    /// ])
    /// .unwrap();
    ///
    /// let head = table.filter_rows(RowSelector::Range(0..2)).unwrap();
    /// assert_eq!(head.nrow(), 2);
    /// ```
    pub fn filter_rows(&self, rows: RowSelector) -> Result<Table> {
        match rows {
            RowSelector::All => Ok(self.clone()),
            RowSelector::Range(range) => {
                if range.start > range.end || range.end > self.nrow() {
                    return Err(Error::InvalidRowRange {
                        start: range.start,
                        end: range.end,
                        nrow: self.nrow(),
                    });
                }
                if range == (0..self.nrow()) {
                    return Ok(self.clone());
                }
                let columns = self
                    .columns()
                    .iter()
                    .map(|c| c.slice_range(range.clone()))
                    .collect();
                Table::bind(self.shape_handle(), columns)
            }
            RowSelector::Positions(positions) => {
                for &pos in positions {
                    if pos >= self.nrow() {
                        return Err(Error::RowOutOfRange {
                            pos,
                            nrow: self.nrow(),
                        });
                    }
                }
                let columns = self.columns().iter().map(|c| c.take(positions)).collect();
                Table::bind(self.shape_handle(), columns)
            }
            RowSelector::Mask(mask) => {
                if mask.len() != self.nrow() {
                    return Err(Error::MaskLengthMismatch {
                        mask: mask.len(),
                        nrow: self.nrow(),
                    });
                }
                let columns = self.columns().iter().map(|c| c.filter(mask)).collect();
                Table::bind(self.shape_handle(), columns)
            }
        }
    }

    /// Row filtering composed with column projection.
    ///
    /// Columns are projected first; the row selector is then resolved
    /// against the projection, whose row count equals this table's whenever
    /// any column survives. With an empty column selection the row selector
    /// is moot: the zero-column table has zero rows by definition.
    pub fn slice(&self, rows: RowSelector, cols: &[ColSelector]) -> Result<Table> {
        let projected = self.project(cols)?;
        if projected.ncol() == 0 {
            return Ok(projected);
        }
        projected.filter_rows(rows)
    }
}
