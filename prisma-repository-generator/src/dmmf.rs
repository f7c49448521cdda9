//! Data Model Meta Format (DMMF)
//!
//! The subset of Prisma's parsed schema description that repository
//! generation reads. The host compiler produces it; the generator never
//! modifies it.

use crate::error::GeneratorError;
use serde::Deserialize;

/// A parsed DMMF document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// The data model section
    pub datamodel: Datamodel,
}

/// Models and enums of a schema
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Datamodel {
    /// Models in schema order
    #[serde(default)]
    pub models: Vec<Model>,

    /// Enums in schema order
    #[serde(default)]
    pub enums: Vec<DatamodelEnum>,
}

/// A schema model (database table)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Model name as written in the schema
    pub name: String,

    /// Mapped table name (`@@map`)
    #[serde(default)]
    pub db_name: Option<String>,

    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<Field>,

    /// Compound primary key (`@@id`)
    #[serde(default)]
    pub primary_key: Option<PrimaryKey>,

    /// Compound unique constraints (`@@unique`)
    #[serde(default)]
    pub unique_fields: Vec<Vec<String>>,
}

/// A compound primary key
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryKey {
    /// Optional key name
    #[serde(default)]
    pub name: Option<String>,

    /// Fields making up the key
    #[serde(default)]
    pub fields: Vec<String>,
}

/// A model field
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Field name
    pub name: String,

    /// Field kind
    #[serde(default)]
    pub kind: FieldKind,

    /// Declared type (`String`, `Int`, or a related model name)
    #[serde(rename = "type")]
    pub field_type: String,

    /// Part of the primary key (`@id`)
    #[serde(default)]
    pub is_id: bool,

    /// List field (`Post[]`)
    #[serde(default)]
    pub is_list: bool,

    /// Non-optional field
    #[serde(default)]
    pub is_required: bool,

    /// Has a `@default(..)`
    #[serde(default)]
    pub has_default_value: bool,

    /// Auto-updated timestamp (`@updatedAt`)
    #[serde(default)]
    pub is_updated_at: bool,

    /// Relation designation, present on relation fields only
    #[serde(default)]
    pub relation_name: Option<String>,
}

/// Field kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Scalar,
    Object,
    Enum,
    Unsupported,
}

/// An enum definition
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatamodelEnum {
    /// Enum name
    pub name: String,

    /// Variants
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

/// An enum variant
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    /// Variant name
    pub name: String,

    /// Mapped database value (`@map`)
    #[serde(default)]
    pub db_name: Option<String>,
}

impl Document {
    /// Decode a DMMF document from JSON
    pub fn from_json(value: serde_json::Value) -> Result<Self, GeneratorError> {
        serde_json::from_value(value).map_err(|e| GeneratorError::SchemaExtraction(e.to_string()))
    }
}

impl Model {
    /// The first field flagged as identifier
    pub fn id_field(&self) -> Option<&Field> {
        self.fields.iter().find(|f| f.is_id)
    }

    /// Fields that reference another model, in declaration order
    pub fn relation_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_relation())
    }

    /// Fields the database fills in on create (defaults and `@updatedAt`)
    pub fn defaulted_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields
            .iter()
            .filter(|f| f.has_default_value || f.is_updated_at)
    }
}

impl Field {
    /// Whether this field carries a non-empty relation designation
    pub fn is_relation(&self) -> bool {
        self.relation_name.as_deref().is_some_and(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_model_fields() {
        let doc = Document::from_json(json!({
            "datamodel": {
                "models": [{
                    "name": "Post",
                    "dbName": null,
                    "fields": [
                        { "name": "id", "kind": "scalar", "type": "Int", "isId": true, "hasDefaultValue": true },
                        { "name": "title", "kind": "scalar", "type": "String", "isRequired": true },
                        { "name": "author", "kind": "object", "type": "Author", "relationName": "PostToAuthor" }
                    ],
                    "primaryKey": null,
                    "uniqueFields": []
                }],
                "enums": [],
                "types": []
            },
            "schema": {},
            "mappings": {}
        }))
        .unwrap();

        let model = &doc.datamodel.models[0];
        assert_eq!(model.name, "Post");
        assert_eq!(model.fields.len(), 3);
        assert_eq!(model.id_field().map(|f| f.name.as_str()), Some("id"));
        assert_eq!(model.fields[2].kind, FieldKind::Object);
        assert_eq!(model.fields[2].field_type, "Author");

        let relations: Vec<_> = model.relation_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(relations, vec!["author"]);

        let defaulted: Vec<_> = model.defaulted_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(defaulted, vec!["id"]);
    }

    #[test]
    fn test_empty_relation_name_is_not_a_relation() {
        let field = Field {
            name: "tag".to_string(),
            field_type: "String".to_string(),
            relation_name: Some(String::new()),
            ..Default::default()
        };
        assert!(!field.is_relation());
    }

    #[test]
    fn test_malformed_document_is_schema_error() {
        let err = Document::from_json(json!({ "datamodel": { "models": [{ "fields": [] }] } }))
            .unwrap_err();
        assert!(matches!(err, GeneratorError::SchemaExtraction(_)));
    }
}
