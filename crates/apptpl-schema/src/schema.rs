//! # Schema Definition
//!
//! Static description of the shape of an application template document.
//!
//! A [`SchemaNode`] is a type tag plus, for objects, the declared fields and,
//! for arrays, the element shape. Objects are open: keys not declared in the
//! schema are tolerated by the structural validator.
//!
//! The canonical definition is built once by [`application_template_schema`]
//! and handed to [`crate::TemplateValidator`]; nothing mutates it after
//! construction.

use serde_json::{json, Map, Value};

/// JSON Schema dialect used by [`SchemaNode::to_json_schema`].
pub const JSON_SCHEMA_DRAFT: &str = "https://json-schema.org/draft/2020-12/schema";

/// Shape of a value in a template document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    /// A mapping. Fields are checked in declaration order.
    Object(Vec<Field>),
    /// A sequence whose elements all match the inner node.
    Array(Box<SchemaNode>),
    String,
    Boolean,
    /// Integer or floating-point number.
    Number,
}

/// A named member of an object node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub required: bool,
    pub node: SchemaNode,
}

impl Field {
    /// A field that must be present in its parent object.
    pub fn required(name: &'static str, node: SchemaNode) -> Self {
        Self {
            name,
            required: true,
            node,
        }
    }

    /// A field that is type-checked only when present.
    pub fn optional(name: &'static str, node: SchemaNode) -> Self {
        Self {
            name,
            required: false,
            node,
        }
    }
}

impl SchemaNode {
    pub fn object(fields: Vec<Field>) -> Self {
        Self::Object(fields)
    }

    pub fn array_of(element: SchemaNode) -> Self {
        Self::Array(Box::new(element))
    }

    /// The type tag as used in error messages and JSON Schema output.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Object(_) => "object",
            Self::Array(_) => "array",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Number => "number",
        }
    }

    /// Look up a declared field of an object node.
    pub fn field(&self, name: &str) -> Option<&Field> {
        match self {
            Self::Object(fields) => fields.iter().find(|f| f.name == name),
            _ => None,
        }
    }

    /// Render this node as a standalone JSON Schema document.
    ///
    /// Objects keep `additionalProperties` unset, so the exported schema is
    /// as permissive about unknown keys as the native validator.
    pub fn to_json_schema(&self) -> Value {
        let mut root = Map::new();
        root.insert("$schema".to_string(), json!(JSON_SCHEMA_DRAFT));
        root.insert("title".to_string(), json!("Application template"));
        root.extend(self.json_schema_fragment());
        Value::Object(root)
    }

    fn json_schema_fragment(&self) -> Map<String, Value> {
        let mut obj = Map::new();
        obj.insert("type".to_string(), json!(self.type_name()));
        match self {
            Self::Object(fields) => {
                let mut properties = Map::new();
                let mut required = Vec::new();
                for field in fields {
                    properties.insert(
                        field.name.to_string(),
                        Value::Object(field.node.json_schema_fragment()),
                    );
                    if field.required {
                        required.push(json!(field.name));
                    }
                }
                obj.insert("properties".to_string(), Value::Object(properties));
                if !required.is_empty() {
                    obj.insert("required".to_string(), Value::Array(required));
                }
            }
            Self::Array(element) => {
                obj.insert(
                    "items".to_string(),
                    Value::Object(element.json_schema_fragment()),
                );
            }
            Self::String | Self::Boolean | Self::Number => {}
        }
        obj
    }
}

/// Build the canonical application template schema.
pub fn application_template_schema() -> SchemaNode {
    use SchemaNode::{Boolean as Bool, String as Str};

    let location = SchemaNode::object(vec![
        Field::optional("provider", Str),
        Field::optional("region", Str),
    ]);

    let namespace = SchemaNode::object(vec![
        Field::required("id", Str),
        Field::optional("location", location),
    ]);

    let tag = SchemaNode::object(vec![
        Field::required("key", Str),
        Field::optional("value", Str),
    ]);

    let action = SchemaNode::object(vec![
        Field::required("id", Str),
        Field::optional("name", Str),
    ]);

    let variable_option = SchemaNode::object(vec![
        Field::required("name", Str),
        Field::optional("type", Str),
        Field::optional("options", SchemaNode::array_of(Str)),
        Field::optional("editable", Bool),
        Field::optional("description", Str),
    ]);

    let application_template = SchemaNode::object(vec![
        Field::required("id", Str),
        Field::required("name", Str),
        Field::optional("summary", Str),
        Field::optional("description", Str),
        Field::optional("readme_template", Str),
        Field::optional("readme_markdown_template", Str),
        Field::optional("labels", SchemaNode::array_of(Str)),
        Field::optional("workspace_details", SchemaNode::object(Vec::new())),
        Field::optional("tags", SchemaNode::array_of(tag)),
        Field::optional("actions", SchemaNode::array_of(action)),
        Field::optional("variable_options", SchemaNode::array_of(variable_option)),
        Field::optional("out_of_sync", Bool),
        Field::optional("module_source", Str),
        Field::optional("tf_execution_mode", Str),
        Field::optional("tf_agent_pool_id", Str),
        Field::optional("module_id", Str),
    ]);

    SchemaNode::object(vec![
        Field::required("namespace", namespace),
        Field::required("application_template", application_template),
        Field::optional("use_module_readme", Bool),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_requires_namespace_and_template() {
        let schema = application_template_schema();
        let required: Vec<&str> = match &schema {
            SchemaNode::Object(fields) => fields
                .iter()
                .filter(|f| f.required)
                .map(|f| f.name)
                .collect(),
            other => panic!("root must be an object, got {}", other.type_name()),
        };
        assert_eq!(required, vec!["namespace", "application_template"]);
    }

    #[test]
    fn template_requires_id_and_name() {
        let schema = application_template_schema();
        let template = &schema.field("application_template").unwrap().node;
        assert!(template.field("id").unwrap().required);
        assert!(template.field("name").unwrap().required);
        assert!(!template.field("module_source").unwrap().required);
    }

    #[test]
    fn tags_are_key_value_objects() {
        let schema = application_template_schema();
        let template = &schema.field("application_template").unwrap().node;
        match &template.field("tags").unwrap().node {
            SchemaNode::Array(element) => {
                assert!(element.field("key").unwrap().required);
                assert!(!element.field("value").unwrap().required);
            }
            other => panic!("tags must be an array, got {}", other.type_name()),
        }
    }

    #[test]
    fn field_lookup_on_scalar_is_none() {
        assert!(SchemaNode::String.field("anything").is_none());
    }

    #[test]
    fn json_schema_export_shape() {
        let exported = application_template_schema().to_json_schema();
        assert_eq!(exported["$schema"], JSON_SCHEMA_DRAFT);
        assert_eq!(exported["type"], "object");
        assert_eq!(
            exported["required"],
            json!(["namespace", "application_template"])
        );
        assert_eq!(
            exported["properties"]["namespace"]["required"],
            json!(["id"])
        );
        assert_eq!(
            exported["properties"]["application_template"]["properties"]["labels"],
            json!({"type": "array", "items": {"type": "string"}})
        );
        assert!(exported.get("additionalProperties").is_none());
    }

    #[test]
    fn optional_only_object_has_no_required_list() {
        let node = SchemaNode::object(vec![Field::optional("region", SchemaNode::String)]);
        let exported = node.to_json_schema();
        assert!(exported.get("required").is_none());
    }

    #[test]
    fn scalar_root_export_is_bare_type() {
        let exported = SchemaNode::Number.to_json_schema();
        assert_eq!(exported["type"], "number");
        assert_eq!(exported["title"], "Application template");
    }
}
