//! Translation between Terraform values and NetBox request/response fields
//!
//! [`PlanReader`] turns a planned state into request field values, resolving
//! references on the way. [`StateBuilder`] maps an API object back into state
//! and keeps references in whatever form (ID, slug or name) the user wrote.

use serde_json::{Map, Value};
use std::collections::HashMap;
use tfplug::schema::Schema;
use tfplug::types::{AttributePath, Diagnostic, Dynamic, DynamicValue};

use crate::api::common::CommonFields;
use crate::api::{Choice, Client, Endpoint, NestedRef, NestedTag};
use crate::{custom_fields, lookup, tags};

/// State value for a reference attribute
///
/// Keeps the current value when it still names the same object, otherwise
/// records the numeric ID.
pub fn reference_to_state(current: &Dynamic, api: Option<&NestedRef>) -> Dynamic {
    let Some(api) = api else {
        return Dynamic::Null;
    };
    let Some(current) = current.as_str() else {
        return Dynamic::String(api.id.to_string());
    };

    let same_object = current == api.id.to_string()
        || [api.slug.as_deref(), api.name.as_deref(), Some(api.display.as_str())]
            .into_iter()
            .flatten()
            .filter(|candidate| !candidate.is_empty())
            .any(|candidate| candidate.eq_ignore_ascii_case(current));

    if same_object {
        Dynamic::String(current.to_string())
    } else {
        Dynamic::String(api.id.to_string())
    }
}

/// State value for a set of references
///
/// Each related object keeps the current element naming it, others are
/// recorded by ID. An unset attribute with nothing related stays null.
pub fn references_to_state(current: &Dynamic, api: &[NestedRef]) -> Dynamic {
    let current = current.as_list().unwrap_or_default();
    if api.is_empty() && current.is_empty() {
        return Dynamic::Null;
    }
    let elements = api
        .iter()
        .map(|related| {
            current
                .iter()
                .find(|element| reference_to_state(element, Some(related)) == **element)
                .cloned()
                .unwrap_or_else(|| Dynamic::String(related.id.to_string()))
        })
        .collect();
    Dynamic::List(elements)
}

/// Empty strings from the API are stored as null
pub fn optional_string_to_state(api: Option<&str>) -> Dynamic {
    match api {
        Some(s) if !s.is_empty() => Dynamic::String(s.to_string()),
        _ => Dynamic::Null,
    }
}

/// Builds a state object from an API response
pub struct StateBuilder<'a> {
    current: &'a DynamicValue,
    values: HashMap<String, Dynamic>,
}

impl<'a> StateBuilder<'a> {
    /// `current` is the prior state or plan; null during import
    pub fn new(current: &'a DynamicValue) -> Self {
        Self {
            current,
            values: HashMap::new(),
        }
    }

    pub fn current(&self, name: &str) -> Dynamic {
        self.current.get_value(&AttributePath::new(name))
    }

    pub fn set(&mut self, name: &str, value: impl Into<Dynamic>) -> &mut Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    pub fn string(&mut self, name: &str, value: &str) -> &mut Self {
        self.set(name, value)
    }

    pub fn optional_string(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        self.set(name, optional_string_to_state(value))
    }

    pub fn reference(&mut self, name: &str, api: Option<&NestedRef>) -> &mut Self {
        let value = reference_to_state(&self.current(name), api);
        self.set(name, value)
    }

    pub fn references(&mut self, name: &str, api: &[NestedRef]) -> &mut Self {
        let value = references_to_state(&self.current(name), api);
        self.set(name, value)
    }

    pub fn choice(&mut self, name: &str, api: Option<&Choice>) -> &mut Self {
        self.optional_string(name, api.map(|c| c.value.as_str()))
    }

    pub fn integer(&mut self, name: &str, value: Option<i64>) -> &mut Self {
        self.set(name, value)
    }

    pub fn number(&mut self, name: &str, value: Option<f64>) -> &mut Self {
        self.set(name, value)
    }

    pub fn bool(&mut self, name: &str, value: Option<bool>) -> &mut Self {
        self.set(name, value)
    }

    pub fn tags(&mut self, api: &[NestedTag]) -> &mut Self {
        let value = tags::tags_to_state(&self.current("tags"), api);
        self.set("tags", value)
    }

    pub fn custom_fields(&mut self, api: &Map<String, Value>) -> &mut Self {
        let value = custom_fields::custom_fields_to_state(&self.current("custom_fields"), api);
        self.set("custom_fields", value)
    }

    /// Finishes the object; schema attributes never set are null
    pub fn build(mut self, schema: &Schema) -> DynamicValue {
        for attr in &schema.block.attributes {
            self.values
                .entry(attr.name.clone())
                .or_insert(Dynamic::Null);
        }
        DynamicValue::new(Dynamic::Map(self.values))
    }
}

/// Reads planned values into request fields
pub struct PlanReader<'a> {
    client: &'a Client,
    plan: &'a DynamicValue,
    prior: Option<&'a DynamicValue>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> PlanReader<'a> {
    /// `prior` is the current state on update, `None` on create
    pub fn new(client: &'a Client, plan: &'a DynamicValue, prior: Option<&'a DynamicValue>) -> Self {
        Self {
            client,
            plan,
            prior,
            diagnostics: Vec::new(),
        }
    }

    pub fn client(&self) -> &Client {
        self.client
    }

    pub fn value(&self, name: &str) -> Dynamic {
        self.plan.get_value(&AttributePath::new(name))
    }

    /// Null and unknown are sent as `""` so removed values are cleared
    pub fn string(&self, name: &str) -> String {
        self.value(name).as_str().unwrap_or_default().to_string()
    }

    /// Null and unknown are sent as JSON null
    pub fn optional_string(&self, name: &str) -> Option<String> {
        self.value(name).as_str().map(str::to_string)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.value(name).as_number()
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        self.number(name).map(|n| n as i64)
    }

    pub fn bool_or(&self, name: &str, default: bool) -> bool {
        self.value(name).as_bool().unwrap_or(default)
    }

    pub fn error(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Resolves an optional reference to the object ID
    pub async fn reference(&mut self, name: &str, endpoint: &Endpoint) -> Option<i64> {
        let value = self.optional_string(name)?;
        match lookup::lookup(self.client, endpoint, &value).await {
            Ok(found) => Some(found.id),
            Err(diag) => {
                self.diagnostics
                    .push(diag.with_attribute(AttributePath::new(name)));
                None
            }
        }
    }

    /// Resolves every element of a set of references
    pub async fn references(&mut self, name: &str, endpoint: &Endpoint) -> Vec<i64> {
        let values: Vec<String> = self
            .value(name)
            .as_list()
            .unwrap_or_default()
            .iter()
            .filter_map(|element| element.as_str().map(str::to_string))
            .collect();
        let mut ids = Vec::with_capacity(values.len());
        for value in values {
            match lookup::lookup(self.client, endpoint, &value).await {
                Ok(found) => ids.push(found.id),
                Err(diag) => self
                    .diagnostics
                    .push(diag.with_attribute(AttributePath::new(name))),
            }
        }
        ids
    }

    /// Resolves a required reference; a failure is recorded and yields 0
    pub async fn required_reference(&mut self, name: &str, endpoint: &Endpoint) -> i64 {
        if self.optional_string(name).is_none() {
            self.diagnostics.push(
                Diagnostic::error(
                    format!("Missing {}", endpoint.kind),
                    format!("The {} attribute must reference an existing {}", name, endpoint.kind.to_lowercase()),
                )
                .with_attribute(AttributePath::new(name)),
            );
            return 0;
        }
        self.reference(name, endpoint).await.unwrap_or_default()
    }

    /// Description, comments, tags and custom fields
    pub async fn common(&mut self, comments: bool, tagged: bool) -> CommonFields {
        let mut fields = CommonFields {
            description: self.string("description"),
            comments: comments.then(|| self.string("comments")),
            ..CommonFields::default()
        };
        if !tagged {
            return fields;
        }

        match tags::tags_to_request(self.client, &self.value("tags")).await {
            Ok(tags) => fields.tags = Some(tags),
            Err(diags) => self.diagnostics.extend(diags),
        }

        let plan_fields = self.value("custom_fields");
        fields.custom_fields = match self.prior {
            None => custom_fields::for_create(&plan_fields),
            Some(prior) => Some(custom_fields::for_update(
                &plan_fields,
                &prior.get_value(&AttributePath::new("custom_fields")),
            )),
        };
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfplug::schema::{AttributeBuilder, AttributeType, SchemaBuilder};

    fn tenant_ref() -> NestedRef {
        NestedRef::new(5, "Acme Corp", Some("acme-corp"))
    }

    #[test]
    fn reference_null_from_api_is_null() {
        assert_eq!(
            reference_to_state(&Dynamic::from("acme-corp"), None),
            Dynamic::Null
        );
    }

    #[test]
    fn reference_without_current_uses_id() {
        let api = tenant_ref();
        assert_eq!(reference_to_state(&Dynamic::Null, Some(&api)), Dynamic::from("5"));
        assert_eq!(reference_to_state(&Dynamic::Unknown, Some(&api)), Dynamic::from("5"));
    }

    #[test]
    fn reference_keeps_user_format() {
        let api = tenant_ref();
        for current in ["5", "acme-corp", "ACME-CORP", "Acme Corp", "acme corp"] {
            assert_eq!(
                reference_to_state(&Dynamic::from(current), Some(&api)),
                Dynamic::from(current),
                "{} should be preserved",
                current
            );
        }
    }

    #[test]
    fn reference_changed_outside_terraform_uses_id() {
        let api = tenant_ref();
        assert_eq!(
            reference_to_state(&Dynamic::from("other-tenant"), Some(&api)),
            Dynamic::from("5")
        );
    }

    #[test]
    fn references_keep_user_format_per_element() {
        let api = vec![tenant_ref(), NestedRef::new(8, "Globex", Some("globex"))];
        let current = Dynamic::List(vec![Dynamic::from("acme-corp"), Dynamic::from("8")]);
        assert_eq!(
            references_to_state(&current, &api),
            Dynamic::List(vec![Dynamic::from("acme-corp"), Dynamic::from("8")])
        );

        let current = Dynamic::List(vec![Dynamic::from("initech")]);
        assert_eq!(
            references_to_state(&current, &api),
            Dynamic::List(vec![Dynamic::from("5"), Dynamic::from("8")])
        );
        assert_eq!(references_to_state(&Dynamic::Null, &[]), Dynamic::Null);
        assert_eq!(
            references_to_state(&Dynamic::List(vec![Dynamic::from("x")]), &[]),
            Dynamic::List(vec![])
        );
    }

    #[test]
    fn empty_strings_become_null() {
        assert_eq!(optional_string_to_state(Some("")), Dynamic::Null);
        assert_eq!(optional_string_to_state(None), Dynamic::Null);
        assert_eq!(optional_string_to_state(Some("x")), Dynamic::from("x"));
    }

    #[test]
    fn builder_fills_unset_attributes() {
        let schema = SchemaBuilder::new()
            .attribute(AttributeBuilder::new("id", AttributeType::String).computed().build())
            .attribute(AttributeBuilder::new("tenant", AttributeType::String).optional().build())
            .attribute(AttributeBuilder::new("facility", AttributeType::String).optional().build())
            .build();
        let mut current = DynamicValue::object();
        current
            .set_string(&AttributePath::new("tenant"), "acme-corp".to_string())
            .unwrap();

        let mut builder = StateBuilder::new(&current);
        builder
            .string("id", "10")
            .reference("tenant", Some(&tenant_ref()));
        let state = builder.build(&schema);

        assert_eq!(state.get_string(&AttributePath::new("id")).unwrap(), "10");
        assert_eq!(state.get_string(&AttributePath::new("tenant")).unwrap(), "acme-corp");
        assert!(state.get_value(&AttributePath::new("facility")).is_null());
    }

    #[test]
    fn plan_reader_defaults() {
        let client = crate::api::test_helpers::create_test_client("http://127.0.0.1:1");
        let mut plan = DynamicValue::object();
        plan.set_string(&AttributePath::new("facility"), "DC1".to_string())
            .unwrap();
        plan.set_value(&AttributePath::new("color"), Dynamic::Unknown)
            .unwrap();
        plan.set_number(&AttributePath::new("u_height"), 42.0).unwrap();

        let reader = PlanReader::new(&client, &plan, None);
        assert_eq!(reader.string("facility"), "DC1");
        assert_eq!(reader.string("description"), "");
        assert_eq!(reader.optional_string("color"), None);
        assert_eq!(reader.integer("u_height"), Some(42));
        assert!(reader.bool_or("is_pool", true));
    }
}
