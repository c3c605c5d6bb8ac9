//! Data Object Helper
//!
//! Convenience accessors for entity attributes plus cloning and string
//! rendering through a [`DataObjectMapper`].
//!
//! # Examples
//!
//! ```rust
//! # use dataobject_core::models::DoEntity;
//! # use dataobject_core::services::{DataObjectHelper, DataObjectInventory, JsonDataObjectMapper};
//! # use std::sync::Arc;
//! let helper = DataObjectHelper::new(JsonDataObjectMapper::new(Arc::new(DataObjectInventory::new())));
//!
//! let mut entity = DoEntity::new();
//! entity.put("count", 3)?;
//!
//! assert_eq!(helper.get_integer_attribute(&entity, "count")?, Some(3));
//! assert_eq!(helper.to_string(Some(&entity))?, r#"{"count":3}"#);
//! assert_eq!(helper.to_string(None)?, "null");
//! assert_eq!(helper.clone(Some(&entity))?, Some(entity));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::models::{DataObjectError, DoEntity, Locale};
use crate::services::{DataObjectMapper, MapperError};
use chrono::NaiveDateTime;
use num_bigint::BigInt;
use uuid::Uuid;

/// Attribute accessors and mapper-backed utilities for entities
#[derive(Debug)]
pub struct DataObjectHelper<M> {
    mapper: M,
}

impl<M: DataObjectMapper> DataObjectHelper<M> {
    pub fn new(mapper: M) -> Self {
        Self { mapper }
    }

    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    pub fn get_integer_attribute(
        &self,
        entity: &DoEntity,
        name: &str,
    ) -> Result<Option<i64>, DataObjectError> {
        entity.get_integer(name)
    }

    pub fn get_double_attribute(
        &self,
        entity: &DoEntity,
        name: &str,
    ) -> Result<Option<f64>, DataObjectError> {
        entity.get_double(name)
    }

    pub fn get_big_integer_attribute(
        &self,
        entity: &DoEntity,
        name: &str,
    ) -> Result<Option<BigInt>, DataObjectError> {
        entity.get_big_integer(name)
    }

    /// Date attribute; text is parsed with the default date pattern
    pub fn get_date_attribute(
        &self,
        entity: &DoEntity,
        name: &str,
    ) -> Result<Option<NaiveDateTime>, DataObjectError> {
        entity.get_date(name)
    }

    pub fn get_uuid_attribute(
        &self,
        entity: &DoEntity,
        name: &str,
    ) -> Result<Option<Uuid>, DataObjectError> {
        entity.get_uuid(name)
    }

    pub fn get_locale_attribute(
        &self,
        entity: &DoEntity,
        name: &str,
    ) -> Result<Option<Locale>, DataObjectError> {
        entity.get_locale(name)
    }

    pub fn get_entity_attribute<'a>(
        &self,
        entity: &'a DoEntity,
        name: &str,
    ) -> Result<Option<&'a DoEntity>, DataObjectError> {
        entity.get_entity(name)
    }

    /// Deep copy by writing and reading through the mapper
    pub fn clone(&self, entity: Option<&DoEntity>) -> Result<Option<DoEntity>, MapperError> {
        let Some(entity) = entity else {
            return Ok(None);
        };
        let text = self.mapper.write_value(entity)?;
        self.mapper.read_value(&text).map(Some)
    }

    /// Serialized form of an entity, `"null"` when absent
    pub fn to_string(&self, entity: Option<&DoEntity>) -> Result<String, MapperError> {
        match entity {
            Some(entity) => self.mapper.write_value(entity),
            None => Ok("null".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::format::parse_default_date;
    use std::cell::RefCell;

    /// Mapper recording its calls and answering with a canned entity
    struct RecordingMapper {
        calls: RefCell<Vec<String>>,
        answer: DoEntity,
    }

    impl RecordingMapper {
        fn new(answer: DoEntity) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                answer,
            }
        }
    }

    impl DataObjectMapper for RecordingMapper {
        fn write_value(&self, entity: &DoEntity) -> Result<String, MapperError> {
            self.calls.borrow_mut().push(format!("write:{}", entity.len()));
            Ok("serialized".to_string())
        }

        fn read_value(&self, text: &str) -> Result<DoEntity, MapperError> {
            self.calls.borrow_mut().push(format!("read:{}", text));
            Ok(self.answer.clone())
        }
    }

    fn sample() -> DoEntity {
        let mut entity = DoEntity::new();
        entity.put("id", "foo").unwrap();
        entity
    }

    #[test]
    fn test_clone_writes_then_reads() {
        let helper = DataObjectHelper::new(RecordingMapper::new(sample()));
        let mut source = DoEntity::new();
        source.put("a", 1).unwrap();
        source.put("b", 2).unwrap();

        let cloned = helper.clone(Some(&source)).unwrap();
        assert_eq!(cloned, Some(sample()));
        assert_eq!(
            *helper.mapper().calls.borrow(),
            vec!["write:2".to_string(), "read:serialized".to_string()]
        );
    }

    #[test]
    fn test_clone_none_skips_mapper() {
        let helper = DataObjectHelper::new(RecordingMapper::new(sample()));
        assert_eq!(helper.clone(None).unwrap(), None);
        assert!(helper.mapper().calls.borrow().is_empty());
    }

    #[test]
    fn test_to_string() {
        let helper = DataObjectHelper::new(RecordingMapper::new(sample()));
        assert_eq!(helper.to_string(None).unwrap(), "null");
        assert_eq!(helper.to_string(Some(&sample())).unwrap(), "serialized");
        assert_eq!(helper.mapper().calls.borrow().len(), 1);
    }

    #[test]
    fn test_attribute_accessors() {
        let helper = DataObjectHelper::new(RecordingMapper::new(DoEntity::new()));
        let date = parse_default_date("2017-11-30 17:29:12.583").unwrap();
        let id = Uuid::new_v4();
        let mut entity = DoEntity::new();
        entity.put("int", 42).unwrap();
        entity.put("double", 1.5).unwrap();
        entity.put("big", BigInt::from(7)).unwrap();
        entity.put("date", "2017-11-30 17:29:12.583").unwrap();
        entity.put("id", id.to_string()).unwrap();
        entity.put("locale", "de-CH").unwrap();
        entity.put("child", sample()).unwrap();

        assert_eq!(helper.get_integer_attribute(&entity, "int"), Ok(Some(42)));
        assert_eq!(helper.get_double_attribute(&entity, "double"), Ok(Some(1.5)));
        assert_eq!(helper.get_double_attribute(&entity, "int"), Ok(Some(42.0)));
        assert_eq!(
            helper.get_big_integer_attribute(&entity, "big"),
            Ok(Some(BigInt::from(7)))
        );
        assert_eq!(helper.get_date_attribute(&entity, "date"), Ok(Some(date)));
        assert_eq!(helper.get_uuid_attribute(&entity, "id"), Ok(Some(id)));
        assert_eq!(
            helper
                .get_locale_attribute(&entity, "locale")
                .unwrap()
                .map(|l| l.to_string()),
            Some("de-CH".to_string())
        );
        assert_eq!(
            helper.get_entity_attribute(&entity, "child"),
            Ok(Some(&sample()))
        );
        assert_eq!(helper.get_integer_attribute(&entity, "missing"), Ok(None));
        assert!(helper.get_integer_attribute(&entity, "locale").is_err());
    }
}
