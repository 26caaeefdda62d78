//! Mapping of API failures onto Terraform diagnostics

use std::collections::BTreeMap;
use std::fmt::Write;
use thiserror::Error;
use tfplug::types::{AttributePath, Diagnostic};

use crate::api::{ApiError, ApiQueryParams, Client, Endpoint, NestedRef, Paginated};

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("ID cannot be empty")]
    Empty,
    #[error("invalid ID {0:?}: must be an integer")]
    Invalid(String),
}

/// Parses a Terraform `id` or import ID into a NetBox object ID
pub fn parse_id(value: &str) -> Result<i64, IdError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(IdError::Empty);
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| IdError::Invalid(value.to_string()))
}

/// The response body is reported once, after the HTTP status
pub fn format_api_error(operation: &str, err: &ApiError) -> String {
    match (err.status(), err.body()) {
        (Some(status), Some(body)) => format!(
            "Could not {}, unexpected error: HTTP {}. Response body: {}",
            operation, status, body
        ),
        _ => format!("Could not {}, unexpected error: {}", operation, err),
    }
}

/// Field errors of a 400 response that rejected a create as a duplicate
pub fn duplicate_fields(err: &ApiError) -> Option<&BTreeMap<String, Vec<String>>> {
    if err.status() != Some(400) {
        return None;
    }
    let fields = err.field_errors()?;
    let is_duplicate = fields.values().flatten().any(|message| {
        let lower = message.to_lowercase();
        lower.contains("already exists")
            || lower.contains("must be unique")
            || (lower.contains("with this") && lower.contains("exists"))
    });
    is_duplicate.then_some(fields)
}

/// Describes an object that blocked a create and how to adopt it
pub struct DuplicateObject<'a> {
    pub type_name: &'a str,
    pub endpoint: &'a Endpoint,
    /// Attribute holding the natural key, e.g. `slug`
    pub key_attribute: &'a str,
    pub key_value: &'a str,
}

impl DuplicateObject<'_> {
    /// Looks up the existing object by its natural key
    pub async fn find_existing(&self, client: &Client) -> Option<i64> {
        if self.key_value.is_empty() {
            return None;
        }
        let params = ApiQueryParams::new().add(self.key_attribute, self.key_value);
        match client.list::<NestedRef>(self.endpoint, &params).await {
            Ok(Paginated { results, .. }) if results.len() == 1 => Some(results[0].id),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!("duplicate lookup for {} failed: {}", self.type_name, e);
                None
            }
        }
    }

    pub fn diagnostic(
        &self,
        fields: &BTreeMap<String, Vec<String>>,
        existing_id: Option<i64>,
        base_url: &str,
    ) -> Diagnostic {
        let address = format!("{}.{}", self.type_name, resource_label(self.key_value));
        let mut detail =
            String::from("A resource with the same unique identifier(s) already exists in NetBox.\n\n");
        detail.push_str("Conflicting fields:\n");
        for (field, messages) in fields {
            for message in messages {
                let _ = writeln!(detail, "  - {}: {}", field, message);
            }
        }
        detail.push('\n');

        match existing_id {
            Some(id) => {
                detail.push_str("To import the existing resource into Terraform state, run:\n\n");
                let _ = writeln!(detail, "  terraform import {} {}\n", address, id);
                detail.push_str("Or add an import block to your configuration:\n\n");
                let _ = writeln!(
                    detail,
                    "  import {{\n    to = {}\n    id = \"{}\"\n  }}",
                    address, id
                );
            }
            None => {
                let _ = writeln!(
                    detail,
                    "To import the existing resource, find it in NetBox by {} \"{}\",",
                    self.key_attribute, self.key_value
                );
                detail.push_str("get its ID, and then run:\n\n");
                let _ = writeln!(detail, "  terraform import {} <ID>\n", address);
                detail.push_str("Or use the NetBox API to find the ID:\n\n");
                let _ = writeln!(
                    detail,
                    "  curl -H \"Authorization: Token $NETBOX_API_TOKEN\" \\\n       \"{}{}?{}={}\"",
                    base_url,
                    self.endpoint.path(),
                    self.key_attribute,
                    urlencoding::encode(self.key_value)
                );
            }
        }

        Diagnostic::error(format!("Duplicate {}", self.type_name), detail)
            .with_attribute(AttributePath::new(self.key_attribute))
    }
}

/// Terraform resource name suggested in import hints
fn resource_label(key_value: &str) -> String {
    let label: String = key_value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    match label.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => label,
        _ => format!("this_{}", label),
    }
}
