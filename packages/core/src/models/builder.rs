//! Entity Builder
//!
//! Fluent construction of a [`DoEntity`]. Errors raised by individual puts are
//! held back and the first one is returned from [`DoEntityBuilder::build`],
//! which consumes the builder.
//!
//! # Examples
//!
//! ```rust
//! use dataobject_core::models::DoEntity;
//!
//! let entity = DoEntity::builder()
//!     .put("id", "foo")
//!     .put_if("note", "", |v| v.as_str().is_some_and(|s| !s.is_empty()))
//!     .put_list("tags", vec!["a", "b"])
//!     .build()?;
//!
//! assert!(entity.has("id"));
//! assert!(!entity.has("note"));
//! assert_eq!(entity.get_list("tags")?.len(), 2);
//! # Ok::<(), dataobject_core::models::DataObjectError>(())
//! ```

use crate::models::error::Result;
use crate::models::{DataObjectError, DoEntity, Value};

/// Builder for [`DoEntity`]
#[derive(Debug, Default)]
pub struct DoEntityBuilder {
    entity: DoEntity,
    error: Option<DataObjectError>,
}

impl DoEntityBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn apply<F>(mut self, put: F) -> Self
    where
        F: FnOnce(&mut DoEntity) -> Result<()>,
    {
        if self.error.is_none() {
            if let Err(err) = put(&mut self.entity) {
                self.error = Some(err);
            }
        }
        self
    }

    pub fn put(self, name: &str, value: impl Into<Value>) -> Self {
        self.apply(|entity| entity.put(name, value))
    }

    pub fn put_if<P>(self, name: &str, value: impl Into<Value>, predicate: P) -> Self
    where
        P: FnOnce(&Value) -> bool,
    {
        self.apply(|entity| entity.put_if(name, value, predicate))
    }

    pub fn put_list<T: Into<Value>>(self, name: &str, items: Vec<T>) -> Self {
        self.apply(|entity| entity.put_list(name, items))
    }

    /// Put a list, `None` stores an empty list
    pub fn put_list_opt<T: Into<Value>>(self, name: &str, items: Option<Vec<T>>) -> Self {
        self.apply(|entity| entity.put_list(name, items))
    }

    pub fn put_list_if<T, P>(self, name: &str, items: Vec<T>, predicate: P) -> Self
    where
        T: Into<Value>,
        P: FnOnce(&[Value]) -> bool,
    {
        self.apply(|entity| entity.put_list_if(name, items, predicate))
    }

    /// Finish the entity, reporting the first failed put
    pub fn build(self) -> Result<DoEntity> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.entity),
        }
    }
}
