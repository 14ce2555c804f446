pub mod column;
pub mod data_type;
pub mod error;
pub mod index;
pub mod ops;
pub mod relation;
pub mod shape;
pub mod table;
pub mod value;

pub use column::{Column, Mask};
pub use data_type::DataType;
pub use error::{Error, ErrorKind, Result};
pub use index::{ColSelector, RowSelector};
pub use ops::{ColumnExpr, hcat, hcat_dyn, order, select, transform};
pub use relation::{DynTable, Relation};
pub use shape::{FieldDef, SchemaRegistry, Shape};
pub use table::Table;
pub use value::Value;
