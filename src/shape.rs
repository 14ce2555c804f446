use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tracing::trace;

use crate::data_type::DataType;
use crate::error::{Error, Result};

/// One (name, element type) slot of a shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDef {
    pub name: String,
    pub dtype: DataType,
}

/// The ordered (name, type) signature a table is bound to.
///
/// Immutable once created and shared between tables as `Arc<Shape>`. Two
/// shapes with identical field sequences are interchangeable; the registry
/// hands out one allocation for all of them. The `tag` only shows up in
/// diagnostics and never participates in equality.
#[derive(Debug)]
pub struct Shape {
    tag: String,
    fields: Vec<FieldDef>,
}

impl Shape {
    /// Diagnostic tag, either the caller's hint or an auto-generated one.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The ordered field definitions.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Number of columns this shape describes.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the shape has no columns.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Column names in schema order.
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Position of the column named `name`, if present.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

static GLOBAL: Lazy<SchemaRegistry> = Lazy::new(SchemaRegistry::new);

/// Deduplicating cache of shapes.
///
/// Resolving the same (name, type) signature twice yields the same
/// `Arc<Shape>`. This is an optimization, not a correctness requirement:
/// a fresh shape per table would behave identically.
///
/// The process-wide default registry lives behind [SchemaRegistry::global]
/// from first use until process exit; table constructors go through it.
/// Isolated registries can be created with [SchemaRegistry::new] where a
/// private lifecycle is wanted (e.g. tests).
pub struct SchemaRegistry {
    shapes: Mutex<HashMap<Vec<FieldDef>, Arc<Shape>>>,
    next_tag: AtomicU64,
}

impl SchemaRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self {
            shapes: Mutex::new(HashMap::new()),
            next_tag: AtomicU64::new(0),
        }
    }

    /// The process-wide default registry.
    pub fn global() -> &'static SchemaRegistry {
        &GLOBAL
    }

    /// Resolves a column-type/name signature to a shape, creating one on
    /// first sight and reusing it afterwards.
    ///
    /// `hint` tags a newly created shape for diagnostics; it carries no
    /// semantic weight, and a reused shape keeps the tag it was created
    /// with.
    ///
    /// # Errors
    /// - [ErrorKind::Schema](crate::ErrorKind::Schema) if `dtypes` and
    ///   `names` have different lengths or `names` contains a duplicate.
    pub fn resolve(
        &self,
        dtypes: &[DataType],
        names: &[String],
        hint: Option<&str>,
    ) -> Result<Arc<Shape>> {
        if dtypes.len() != names.len() {
            return Err(Error::CountMismatch {
                columns: dtypes.len(),
                names: names.len(),
            });
        }
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(Error::DuplicateName { name: name.clone() });
            }
        }

        let fields: Vec<FieldDef> = names
            .iter()
            .zip(dtypes)
            .map(|(name, dtype)| FieldDef {
                name: name.clone(),
                dtype: *dtype,
            })
            .collect();

        let mut shapes = self.shapes.lock();
        if let Some(shape) = shapes.get(&fields) {
            trace!(tag = shape.tag(), "reusing shape");
            return Ok(Arc::clone(shape));
        }

        let tag = match hint {
            Some(h) => h.to_string(),
            None => format!("shape{}", self.next_tag.fetch_add(1, Ordering::Relaxed)),
        };
        let shape = Arc::new(Shape {
            tag,
            fields: fields.clone(),
        });
        trace!(tag = shape.tag(), ncol = shape.len(), "created shape");
        shapes.insert(fields, Arc::clone(&shape));
        Ok(shape)
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_creates_shape() {
        let registry = SchemaRegistry::new();

        let shape = registry
            .resolve(
                &[DataType::Int, DataType::Text],
                &names(&["id", "name"]),
                None,
            )
            .unwrap();

        assert_eq!(shape.len(), 2);
        assert_eq!(shape.names(), vec!["id", "name"]);
        assert_eq!(shape.field_index("name"), Some(1));
        assert_eq!(shape.field_index("missing"), None);
    }

    #[test]
    fn test_resolve_deduplicates() {
        let registry = SchemaRegistry::new();
        let sig = names(&["id", "name"]);

        let first = registry
            .resolve(&[DataType::Int, DataType::Text], &sig, None)
            .unwrap();
        let second = registry
            .resolve(&[DataType::Int, DataType::Text], &sig, Some("ignored"))
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        // the reused shape keeps its original tag
        assert_eq!(second.tag(), first.tag());
    }

    #[test]
    fn test_distinct_signatures_get_distinct_shapes() {
        let registry = SchemaRegistry::new();

        let a = registry
            .resolve(&[DataType::Int], &names(&["id"]), None)
            .unwrap();
        let b = registry
            .resolve(&[DataType::Float], &names(&["id"]), None)
            .unwrap();
        let c = registry
            .resolve(&[DataType::Int], &names(&["key"]), None)
            .unwrap();

        assert!(!Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_ne!(a.tag(), b.tag());
    }

    #[test]
    fn test_hint_tags_new_shape() {
        let registry = SchemaRegistry::new();

        let shape = registry
            .resolve(&[DataType::Int], &names(&["id"]), Some("users"))
            .unwrap();

        assert_eq!(shape.tag(), "users");
    }

    #[test]
    fn test_count_mismatch() {
        let registry = SchemaRegistry::new();

        let err = registry
            .resolve(&[DataType::Int, DataType::Int], &names(&["id"]), None)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[test]
    fn test_duplicate_name() {
        let registry = SchemaRegistry::new();

        let err = registry
            .resolve(
                &[DataType::Int, DataType::Int],
                &names(&["id", "id"]),
                None,
            )
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[test]
    fn test_empty_signature() {
        let registry = SchemaRegistry::new();

        let shape = registry.resolve(&[], &[], None).unwrap();

        assert!(shape.is_empty());
        assert_eq!(shape.names(), Vec::<&str>::new());
    }
}
