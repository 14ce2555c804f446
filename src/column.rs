use std::cmp::Ordering;
use std::ops::Range;
use std::sync::Arc;

use bitvec::prelude::*;

use crate::data_type::DataType;
use crate::value::Value;

/// Row-selection bitmap: bit `i` set means row `i` is kept.
pub type Mask = BitVec;

/// A type-stable column.
///
/// Each variant wraps one contiguous vector of a single element type
/// (columnar storage). No element is ever boxed into a dynamic cell type on
/// the storage path; [Value] only appears at the per-row access boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Vector of 64-bit integers.
    Int(Vec<i64>),
    /// Vector of 64-bit floats.
    Float(Vec<f64>),
    /// Vector of thread-safe atomic reference-counted strings.
    Text(Vec<Arc<str>>),
    /// Compact bit-vector for boolean values.
    Bool(BitVec),
}

impl Column {
    /// The logical element type of this column.
    pub fn dtype(&self) -> DataType {
        match self {
            Self::Int(_) => DataType::Int,
            Self::Float(_) => DataType::Float,
            Self::Text(_) => DataType::Text,
            Self::Bool(_) => DataType::Bool,
        }
    }

    /// Returns the number of rows stored in the column.
    pub fn len(&self) -> usize {
        match self {
            Self::Int(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Text(v) => v.len(),
            Self::Bool(v) => v.len(),
        }
    }

    /// Returns true if there is no row in the column, else false.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Retrieves the value at the specified row index.
    ///
    /// Returns `Some(Value)` if the index is valid, or `None` if it is out
    /// of bounds.
    pub fn value_at(&self, row: usize) -> Option<Value> {
        if row >= self.len() {
            return None;
        }
        match self {
            Self::Int(v) => Some(Value::Int(v[row])),
            Self::Float(v) => Some(Value::Float(v[row])),
            Self::Text(v) => Some(Value::Text(Arc::clone(&v[row]))),
            Self::Bool(v) => Some(Value::Bool(v[row])),
        }
    }

    /// Returns the underlying integer slice if this is an [Column::Int].
    pub fn as_ints(&self) -> Option<&[i64]> {
        match self {
            Self::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the underlying float slice if this is a [Column::Float].
    pub fn as_floats(&self) -> Option<&[f64]> {
        match self {
            Self::Float(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the underlying string slice if this is a [Column::Text].
    pub fn as_texts(&self) -> Option<&[Arc<str>]> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the underlying bit-slice if this is a [Column::Bool].
    pub fn as_bools(&self) -> Option<&BitSlice> {
        match self {
            Self::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// Builds a mask marking the rows equal to `probe`.
    ///
    /// Returns `None` when the probe's type does not match the column's
    /// element type. Float equality uses an epsilon comparison.
    pub fn eq_value(&self, probe: &Value) -> Option<Mask> {
        match (self, probe) {
            (Self::Int(v), Value::Int(p)) => Some(v.iter().map(|x| x == p).collect()),
            (Self::Float(v), Value::Float(p)) => {
                Some(v.iter().map(|x| (x - p).abs() < f64::EPSILON).collect())
            }
            (Self::Text(v), Value::Text(p)) => Some(v.iter().map(|x| x == p).collect()),
            (Self::Bool(v), Value::Bool(p)) => {
                Some(v.iter().by_vals().map(|x| x == *p).collect())
            }
            _ => None,
        }
    }

    /// Builds a mask marking the rows strictly less than `probe`.
    ///
    /// Supported for integer and float columns; `None` otherwise.
    pub fn lt_value(&self, probe: &Value) -> Option<Mask> {
        match (self, probe) {
            (Self::Int(v), Value::Int(p)) => Some(v.iter().map(|x| x < p).collect()),
            (Self::Float(v), Value::Float(p)) => Some(v.iter().map(|x| x < p).collect()),
            _ => None,
        }
    }

    /// Builds a mask marking the rows strictly greater than `probe`.
    ///
    /// Supported for integer and float columns; `None` otherwise.
    pub fn gt_value(&self, probe: &Value) -> Option<Mask> {
        match (self, probe) {
            (Self::Int(v), Value::Int(p)) => Some(v.iter().map(|x| x > p).collect()),
            (Self::Float(v), Value::Float(p)) => Some(v.iter().map(|x| x > p).collect()),
            _ => None,
        }
    }

    /// Total order between rows `a` and `b` of this column.
    /// Floats compare by their IEEE total order.
    pub(crate) fn cmp_rows(&self, a: usize, b: usize) -> Ordering {
        match self {
            Self::Int(v) => v[a].cmp(&v[b]),
            Self::Float(v) => v[a].total_cmp(&v[b]),
            Self::Text(v) => v[a].cmp(&v[b]),
            Self::Bool(v) => v[a].cmp(&v[b]),
        }
    }

    /// New column holding the given rows, in the given order.
    /// Positions must have been validated by the caller.
    pub(crate) fn take(&self, rows: &[usize]) -> Column {
        match self {
            Self::Int(v) => Self::Int(rows.iter().map(|&i| v[i]).collect()),
            Self::Float(v) => Self::Float(rows.iter().map(|&i| v[i]).collect()),
            Self::Text(v) => Self::Text(rows.iter().map(|&i| Arc::clone(&v[i])).collect()),
            Self::Bool(v) => Self::Bool(rows.iter().map(|&i| v[i]).collect()),
        }
    }

    /// New column holding the rows whose mask bit is set.
    /// The mask length must equal the column length; validated by the caller.
    pub(crate) fn filter(&self, mask: &BitSlice) -> Column {
        match self {
            Self::Int(v) => Self::Int(mask.iter_ones().map(|i| v[i]).collect()),
            Self::Float(v) => Self::Float(mask.iter_ones().map(|i| v[i]).collect()),
            Self::Text(v) => Self::Text(mask.iter_ones().map(|i| Arc::clone(&v[i])).collect()),
            Self::Bool(v) => Self::Bool(mask.iter_ones().map(|i| v[i]).collect()),
        }
    }

    /// New column holding the contiguous row range.
    /// The range must be in bounds; validated by the caller.
    pub(crate) fn slice_range(&self, range: Range<usize>) -> Column {
        match self {
            Self::Int(v) => Self::Int(v[range].to_vec()),
            Self::Float(v) => Self::Float(v[range].to_vec()),
            Self::Text(v) => Self::Text(v[range].to_vec()),
            Self::Bool(v) => Self::Bool(v[range].to_bitvec()),
        }
    }
}

impl From<Vec<i64>> for Column {
    fn from(v: Vec<i64>) -> Self {
        Self::Int(v)
    }
}

impl From<Vec<f64>> for Column {
    fn from(v: Vec<f64>) -> Self {
        Self::Float(v)
    }
}

impl From<Vec<bool>> for Column {
    fn from(v: Vec<bool>) -> Self {
        Self::Bool(v.into_iter().collect())
    }
}

impl From<Vec<Arc<str>>> for Column {
    fn from(v: Vec<Arc<str>>) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<String>> for Column {
    fn from(v: Vec<String>) -> Self {
        Self::Text(v.into_iter().map(|s| Arc::from(s.as_str())).collect())
    }
}

impl From<Vec<&str>> for Column {
    fn from(v: Vec<&str>) -> Self {
        Self::Text(v.into_iter().map(Arc::from).collect())
    }
}
