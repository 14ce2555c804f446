use thiserror::Error;

/// Coarse error categories for programmatic handling.
///
/// Every [Error] variant belongs to exactly one kind; the mapping is stable
/// across versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Mismatched column/name counts or duplicate names within one schema.
    Schema,
    /// Out-of-range row/column position, unknown column name, or a boolean
    /// mask whose length disagrees with the row count.
    Index,
    /// Row-count mismatch between operands, or columns of unequal length
    /// composed into one table.
    Dimension,
    /// Sort-key relation row count disagrees with the table's.
    Order,
}

/// Errors reported by constructors, indexing and relational operators.
///
/// All failures are synchronous and fail-fast: an operation either returns a
/// structurally valid table or one of these, never a partial result.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{columns} columns but {names} names")]
    CountMismatch { columns: usize, names: usize },

    #[error("duplicate column name {name:?}")]
    DuplicateName { name: String },

    #[error("unknown column {name:?}")]
    UnknownColumn { name: String },

    #[error("column position {pos} out of range, table has {ncol} columns")]
    ColumnOutOfRange { pos: usize, ncol: usize },

    #[error("row position {pos} out of range, table has {nrow} rows")]
    RowOutOfRange { pos: usize, nrow: usize },

    #[error("row range {start}..{end} invalid for table with {nrow} rows")]
    InvalidRowRange {
        start: usize,
        end: usize,
        nrow: usize,
    },

    #[error("mask has {mask} bits but table has {nrow} rows")]
    MaskLengthMismatch { mask: usize, nrow: usize },

    #[error("column {name:?} has {len} rows, expected {expected}")]
    ColumnLengthMismatch {
        name: String,
        len: usize,
        expected: usize,
    },

    #[error("row counts differ: {left} vs {right}")]
    RowCountMismatch { left: usize, right: usize },

    #[error("sort keys have {keys} rows but table has {nrow}")]
    KeyRowCountMismatch { keys: usize, nrow: usize },
}

impl Error {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CountMismatch { .. } | Self::DuplicateName { .. } => ErrorKind::Schema,
            Self::UnknownColumn { .. }
            | Self::ColumnOutOfRange { .. }
            | Self::RowOutOfRange { .. }
            | Self::InvalidRowRange { .. }
            | Self::MaskLengthMismatch { .. } => ErrorKind::Index,
            Self::ColumnLengthMismatch { .. } | Self::RowCountMismatch { .. } => {
                ErrorKind::Dimension
            }
            Self::KeyRowCountMismatch { .. } => ErrorKind::Order,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let schema = Error::CountMismatch {
            columns: 2,
            names: 3,
        };
        let index = Error::UnknownColumn {
            name: "age".into(),
        };
        let dimension = Error::RowCountMismatch { left: 2, right: 3 };
        let order = Error::KeyRowCountMismatch { keys: 1, nrow: 2 };

        assert_eq!(schema.kind(), ErrorKind::Schema);
        assert_eq!(index.kind(), ErrorKind::Index);
        assert_eq!(dimension.kind(), ErrorKind::Dimension);
        assert_eq!(order.kind(), ErrorKind::Order);
    }

    #[test]
    fn test_display_carries_context() {
        let err = Error::MaskLengthMismatch { mask: 2, nrow: 3 };
        let text = err.to_string();

        assert!(text.contains('2'));
        assert!(text.contains('3'));
    }
}
