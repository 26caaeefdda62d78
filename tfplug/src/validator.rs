//! Built-in attribute validators
//!
//! Validators only see known, non-null values; the framework skips null and
//! unknown configuration before calling them.

use crate::schema::{Validator, ValidatorRequest, ValidatorResponse};
use crate::types::{AttributePath, Diagnostic, Dynamic, DynamicValue};

pub struct StringLengthValidator {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl StringLengthValidator {
    pub fn between(min: usize, max: usize) -> Box<dyn Validator> {
        Box::new(Self {
            min: Some(min),
            max: Some(max),
        })
    }

    pub fn at_most(max: usize) -> Box<dyn Validator> {
        Box::new(Self {
            min: None,
            max: Some(max),
        })
    }
}

impl Validator for StringLengthValidator {
    fn description(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("string length must be between {} and {}", min, max),
            (Some(min), None) => format!("string length must be at least {}", min),
            (None, Some(max)) => format!("string length must be at most {}", max),
            (None, None) => "string of any length".to_string(),
        }
    }

    fn validate(&self, request: ValidatorRequest) -> ValidatorResponse {
        let mut response = ValidatorResponse::default();
        let Some(s) = request.config_value.value.as_str() else {
            return response;
        };

        let len = s.chars().count();
        let too_short = self.min.is_some_and(|min| len < min);
        let too_long = self.max.is_some_and(|max| len > max);
        if too_short || too_long {
            response.diagnostics.push(
                Diagnostic::error(
                    "Invalid Attribute Value Length",
                    format!(
                        "Attribute {} {}, got: {}",
                        request.path,
                        self.description(),
                        len
                    ),
                )
                .with_attribute(request.path),
            );
        }
        response
    }
}

pub struct StringPatternValidator {
    pub pattern: regex::Regex,
    pub message: String,
}

impl StringPatternValidator {
    pub fn create(pattern: regex::Regex, message: impl Into<String>) -> Box<dyn Validator> {
        Box::new(Self {
            pattern,
            message: message.into(),
        })
    }
}

impl Validator for StringPatternValidator {
    fn description(&self) -> String {
        self.message.clone()
    }

    fn validate(&self, request: ValidatorRequest) -> ValidatorResponse {
        let mut response = ValidatorResponse::default();
        if let Some(s) = request.config_value.value.as_str() {
            if !self.pattern.is_match(s) {
                response.diagnostics.push(
                    Diagnostic::error(
                        "Invalid Attribute Value Match",
                        format!("Attribute {} {}, got: {}", request.path, self.message, s),
                    )
                    .with_attribute(request.path),
                );
            }
        }
        response
    }
}

/// Accepts only one of a fixed set of strings
pub struct OneOfValidator {
    pub values: Vec<String>,
}

impl OneOfValidator {
    pub fn create(values: &[&str]) -> Box<dyn Validator> {
        Box::new(Self {
            values: values.iter().map(|v| v.to_string()).collect(),
        })
    }
}

impl Validator for OneOfValidator {
    fn description(&self) -> String {
        let quoted: Vec<String> = self.values.iter().map(|v| format!("\"{}\"", v)).collect();
        format!("value must be one of: [{}]", quoted.join(" "))
    }

    fn validate(&self, request: ValidatorRequest) -> ValidatorResponse {
        let mut response = ValidatorResponse::default();
        if let Some(s) = request.config_value.value.as_str() {
            if !self.values.iter().any(|v| v == s) {
                response.diagnostics.push(
                    Diagnostic::error(
                        "Invalid Attribute Value Match",
                        format!(
                            "Attribute {} {}, got: \"{}\"",
                            request.path,
                            self.description(),
                            s
                        ),
                    )
                    .with_attribute(request.path),
                );
            }
        }
        response
    }
}

pub struct NumberRangeValidator {
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Reject values with a fractional part
    pub integer: bool,
}

impl NumberRangeValidator {
    pub fn int_between(min: i64, max: i64) -> Box<dyn Validator> {
        Box::new(Self {
            min: Some(min as f64),
            max: Some(max as f64),
            integer: true,
        })
    }

    pub fn int_at_least(min: i64) -> Box<dyn Validator> {
        Box::new(Self {
            min: Some(min as f64),
            max: None,
            integer: true,
        })
    }
}

impl Validator for NumberRangeValidator {
    fn description(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("value must be between {} and {}", min, max),
            (Some(min), None) => format!("value must be at least {}", min),
            (None, Some(max)) => format!("value must be at most {}", max),
            (None, None) => "any number".to_string(),
        }
    }

    fn validate(&self, request: ValidatorRequest) -> ValidatorResponse {
        let mut response = ValidatorResponse::default();
        let Some(n) = request.config_value.value.as_number() else {
            return response;
        };

        if self.integer && n.fract() != 0.0 {
            response.diagnostics.push(
                Diagnostic::error(
                    "Invalid Attribute Value",
                    format!("Attribute {} must be a whole number, got: {}", request.path, n),
                )
                .with_attribute(request.path.clone()),
            );
        }

        let below = self.min.is_some_and(|min| n < min);
        let above = self.max.is_some_and(|max| n > max);
        if below || above {
            response.diagnostics.push(
                Diagnostic::error(
                    "Invalid Attribute Value",
                    format!("Attribute {} {}, got: {}", request.path, self.description(), n),
                )
                .with_attribute(request.path),
            );
        }
        response
    }
}

/// Runs field validators against every element of a list/set of objects
pub struct ObjectFieldsValidator {
    pub fields: Vec<(String, Box<dyn Validator>)>,
}

impl ObjectFieldsValidator {
    pub fn create(fields: Vec<(&str, Box<dyn Validator>)>) -> Box<dyn Validator> {
        Box::new(Self {
            fields: fields
                .into_iter()
                .map(|(name, validator)| (name.to_string(), validator))
                .collect(),
        })
    }
}

impl Validator for ObjectFieldsValidator {
    fn description(&self) -> String {
        let names: Vec<&str> = self.fields.iter().map(|(n, _)| n.as_str()).collect();
        format!("validates element fields: {}", names.join(", "))
    }

    fn validate(&self, request: ValidatorRequest) -> ValidatorResponse {
        let mut response = ValidatorResponse::default();
        let Some(elements) = request.config_value.value.as_list() else {
            return response;
        };

        for (idx, element) in elements.iter().enumerate() {
            let Dynamic::Map(fields) = element else {
                continue;
            };
            for (name, validator) in &self.fields {
                let Some(value) = fields.get(name).filter(|v| v.is_known()) else {
                    continue;
                };
                let path: AttributePath = request.path.clone().index(idx as i64).attribute(name);
                let field_response = validator.validate(ValidatorRequest {
                    config_value: DynamicValue::new(value.clone()),
                    path,
                });
                response.diagnostics.extend(field_response.diagnostics);
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn run(validator: &dyn Validator, value: Dynamic) -> Vec<Diagnostic> {
        validator
            .validate(ValidatorRequest {
                config_value: DynamicValue::new(value),
                path: AttributePath::new("slug"),
            })
            .diagnostics
    }

    #[test]
    fn string_length_counts_characters() {
        let validator = StringLengthValidator::between(1, 3);
        assert!(run(validator.as_ref(), Dynamic::from("äöü")).is_empty());
        assert_eq!(run(validator.as_ref(), Dynamic::from("")).len(), 1);
        assert_eq!(run(validator.as_ref(), Dynamic::from("abcd")).len(), 1);
    }

    #[test]
    fn pattern_validator_reports_attribute() {
        let validator = StringPatternValidator::create(
            regex::Regex::new("^[a-z]+$").unwrap(),
            "must contain only lowercase letters",
        );
        let diags = run(validator.as_ref(), Dynamic::from("Edge"));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].attribute, Some(AttributePath::new("slug")));
        assert!(diags[0].detail.contains("Edge"));
    }

    #[test]
    fn one_of_rejects_unlisted_value() {
        let validator = OneOfValidator::create(&["active", "planned"]);
        assert!(run(validator.as_ref(), Dynamic::from("active")).is_empty());
        let diags = run(validator.as_ref(), Dynamic::from("retired"));
        assert!(diags[0].detail.contains("\"active\" \"planned\""));
    }

    #[test]
    fn number_range_rejects_fractions_and_bounds() {
        let validator = NumberRangeValidator::int_between(1, 4094);
        assert!(run(validator.as_ref(), Dynamic::from(100i64)).is_empty());
        assert_eq!(run(validator.as_ref(), Dynamic::from(0i64)).len(), 1);
        assert_eq!(run(validator.as_ref(), Dynamic::from(1.5)).len(), 1);
    }

    #[test]
    fn object_fields_validator_indexes_elements() {
        let validator = ObjectFieldsValidator::create(vec![(
            "name",
            StringLengthValidator::between(1, 5),
        )]);
        let element = |name: &str| {
            Dynamic::Map(HashMap::from([("name".to_string(), Dynamic::from(name))]))
        };

        let diags = validator
            .validate(ValidatorRequest {
                config_value: DynamicValue::new(Dynamic::List(vec![
                    element("ok"),
                    element("much_too_long"),
                ])),
                path: AttributePath::new("custom_fields"),
            })
            .diagnostics;

        assert_eq!(diags.len(), 1);
        assert_eq!(
            diags[0].attribute.as_ref().map(|p| p.to_string()),
            Some("custom_fields[1].name".to_string())
        );
    }
}
