use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::schema::{IndexedField, IndexedValue, Schema, SortedField};

/// Unique document identifier
pub type DocumentId = u64;

/// A row as seen by the reference matcher
///
/// Holds the encodings mappers produce for each column value: searchable
/// fields for matching and doc values for sorting.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub fields: Vec<IndexedField>,
    pub doc_values: Vec<SortedField>,
}

impl Document {
    pub fn new(id: DocumentId) -> Self {
        Self {
            id,
            fields: Vec::new(),
            doc_values: Vec::new(),
        }
    }

    /// Encode one column value through the field's mapper
    ///
    /// A `null` value adds nothing.
    pub fn add_value(&mut self, schema: &Schema, field: &str, raw: &Value) -> Result<&mut Self> {
        self.add_values(schema, field, std::slice::from_ref(raw))
    }

    /// Encode every value of a multi-valued column
    pub fn add_values(&mut self, schema: &Schema, field: &str, raw: &[Value]) -> Result<&mut Self> {
        let mapper = schema.resolve(field)?;
        let is_multi_valued = raw.len() > 1;

        for value in raw {
            let Some(value) = mapper.coerce(field, value)? else {
                continue;
            };
            if mapper.indexed {
                self.fields.push(mapper.indexed_field(field, &value)?);
            }
            if mapper.sorted {
                self.doc_values
                    .push(mapper.sorted_field(field, &value, is_multi_valued)?);
            }
        }
        Ok(self)
    }

    /// Encode a bitemporal record interval
    pub fn add_bitemporal(
        &mut self,
        schema: &Schema,
        field: &str,
        tt_from: Option<&Value>,
        tt_to: Option<&Value>,
        vt_from: Option<&Value>,
        vt_to: Option<&Value>,
    ) -> Result<&mut Self> {
        let mapper = schema.resolve(field)?;
        let interval = mapper.interval(field, tt_from, tt_to, vt_from, vt_to)?;
        self.fields
            .push(IndexedField::new(field, IndexedValue::BiTemporal(interval)));
        Ok(self)
    }

    /// Indexed values of a field
    pub fn fields<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a IndexedValue> + 'a {
        self.fields
            .iter()
            .filter(move |f| f.name == name)
            .map(|f| &f.value)
    }

    /// Doc values of a field
    pub fn doc_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a SortedField> + 'a {
        self.doc_values.iter().filter(move |f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DocValue, DocValuesType, Mapper, NumericValue};
    use serde_json::json;

    fn schema() -> Schema {
        Schema::builder()
            .mapper(Mapper::long("age").with_sorted(true))
            .mapper(Mapper::string("tags").with_sorted(true))
            .mapper(Mapper::bitemporal("period"))
            .mapper(Mapper::double("score").with_indexed(false).with_sorted(true))
            .build()
            .unwrap()
    }

    #[test]
    fn test_add_value() {
        let schema = schema();
        let mut doc = Document::new(1);
        doc.add_value(&schema, "age", &json!("42")).unwrap();

        let values: Vec<_> = doc.fields("age").collect();
        assert_eq!(values, vec![&IndexedValue::Numeric(NumericValue::Long(42))]);
        let sorted: Vec<_> = doc.doc_values("age").collect();
        assert_eq!(sorted[0].value, DocValue::Numeric(42));
    }

    #[test]
    fn test_null_value_adds_nothing() {
        let schema = schema();
        let mut doc = Document::new(1);
        doc.add_value(&schema, "age", &Value::Null).unwrap();
        assert!(doc.fields.is_empty());
        assert!(doc.doc_values.is_empty());
    }

    #[test]
    fn test_multi_valued() {
        let schema = schema();
        let mut doc = Document::new(1);
        doc.add_values(&schema, "tags", &[json!("a"), json!("b")])
            .unwrap();
        assert_eq!(doc.fields("tags").count(), 2);
        assert!(doc
            .doc_values("tags")
            .all(|f| f.doc_values_type == DocValuesType::SortedSet));
    }

    #[test]
    fn test_not_indexed_only_sorted() {
        let schema = schema();
        let mut doc = Document::new(1);
        doc.add_value(&schema, "score", &json!(1.5)).unwrap();
        assert_eq!(doc.fields("score").count(), 0);
        assert_eq!(doc.doc_values("score").count(), 1);
    }

    #[test]
    fn test_add_bitemporal() {
        let schema = schema();
        let mut doc = Document::new(1);
        doc.add_bitemporal(&schema, "period", Some(&json!(1)), None, None, Some(&json!(9)))
            .unwrap();
        assert!(matches!(
            doc.fields("period").next(),
            Some(IndexedValue::BiTemporal(_))
        ));
    }

    #[test]
    fn test_unknown_field() {
        let schema = schema();
        let mut doc = Document::new(1);
        assert!(doc.add_value(&schema, "missing", &json!(1)).is_err());
    }
}
