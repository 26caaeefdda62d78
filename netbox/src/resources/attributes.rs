//! Schema attribute builders shared by the resource definitions

use regex::Regex;
use std::sync::LazyLock;
use tfplug::defaults::StaticDefault;
use tfplug::plan_modifier::UseStateForUnknown;
use tfplug::schema::{Attribute, AttributeBuilder, AttributeType};
use tfplug::validator::{
    NumberRangeValidator, OneOfValidator, StringLengthValidator, StringPatternValidator,
};

static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("valid slug pattern"));
static COLOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{6}$").expect("valid color pattern"));

pub fn id() -> Attribute {
    AttributeBuilder::new("id", AttributeType::String)
        .description("The NetBox ID of this object")
        .computed()
        .plan_modifier(UseStateForUnknown::create())
        .build()
}

pub fn name(description: &str) -> Attribute {
    bounded_name("name", description, 100)
}

pub fn bounded_name(attr: &str, description: &str, max: usize) -> Attribute {
    AttributeBuilder::new(attr, AttributeType::String)
        .description(description)
        .required()
        .validator(StringLengthValidator::between(1, max))
        .build()
}

pub fn slug(description: &str) -> Attribute {
    AttributeBuilder::new("slug", AttributeType::String)
        .description(description)
        .required()
        .validator(StringLengthValidator::between(1, 100))
        .validator(StringPatternValidator::create(
            SLUG_PATTERN.clone(),
            "must contain only letters, numbers, hyphens and underscores",
        ))
        .build()
}

pub fn description() -> Attribute {
    AttributeBuilder::new("description", AttributeType::String)
        .description("A short description of this object")
        .optional()
        .validator(StringLengthValidator::at_most(200))
        .build()
}

pub fn comments() -> Attribute {
    AttributeBuilder::new("comments", AttributeType::String)
        .description("Free-form comments, Markdown is supported")
        .optional()
        .build()
}

/// Reference to another object by ID, slug or name
pub fn reference(attr: &str, description: &str) -> Attribute {
    AttributeBuilder::new(attr, AttributeType::String)
        .description(format!("{} (ID, slug or name)", description))
        .optional()
        .build()
}

/// Set of references, each by ID, slug or name
pub fn references(attr: &str, description: &str) -> Attribute {
    AttributeBuilder::new(attr, AttributeType::Set(Box::new(AttributeType::String)))
        .description(format!("{} (IDs, slugs or names)", description))
        .optional()
        .build()
}

pub fn required_reference(attr: &str, description: &str) -> Attribute {
    AttributeBuilder::new(attr, AttributeType::String)
        .description(format!("{} (ID, slug or name)", description))
        .required()
        .build()
}

pub fn required_text(attr: &str, description: &str) -> Attribute {
    AttributeBuilder::new(attr, AttributeType::String)
        .description(description)
        .required()
        .validator(StringLengthValidator::between(1, 255))
        .build()
}

pub fn text(attr: &str, description: &str) -> Attribute {
    AttributeBuilder::new(attr, AttributeType::String)
        .description(description)
        .optional()
        .build()
}

pub fn bounded_text(attr: &str, description: &str, max: usize) -> Attribute {
    AttributeBuilder::new(attr, AttributeType::String)
        .description(description)
        .optional()
        .validator(StringLengthValidator::at_most(max))
        .build()
}

/// Status with NetBox's `active` default
pub fn status(choices: &[&str]) -> Attribute {
    status_with_default(choices, "active")
}

pub fn status_with_default(choices: &[&str], default: &str) -> Attribute {
    AttributeBuilder::new("status", AttributeType::String)
        .description(format!("Operational status, one of: {}", choices.join(", ")))
        .optional()
        .computed()
        .default(StaticDefault::string(default))
        .validator(OneOfValidator::create(choices))
        .build()
}

pub fn choice(attr: &str, description: &str, choices: &[&str]) -> Attribute {
    AttributeBuilder::new(attr, AttributeType::String)
        .description(format!("{}, one of: {}", description, choices.join(", ")))
        .optional()
        .validator(OneOfValidator::create(choices))
        .build()
}

pub fn color() -> Attribute {
    AttributeBuilder::new("color", AttributeType::String)
        .description("RGB color in hexadecimal, e.g. `aa1409`")
        .optional()
        .computed()
        .validator(StringPatternValidator::create(
            COLOR_PATTERN.clone(),
            "must be a 6 digit hexadecimal color",
        ))
        .build()
}

pub fn flag(attr: &str, description: &str, default: bool) -> Attribute {
    AttributeBuilder::new(attr, AttributeType::Bool)
        .description(description)
        .optional()
        .computed()
        .default(StaticDefault::bool(default))
        .build()
}

pub fn integer(attr: &str, description: &str, min: i64, max: i64) -> Attribute {
    AttributeBuilder::new(attr, AttributeType::Number)
        .description(description)
        .optional()
        .validator(NumberRangeValidator::int_between(min, max))
        .build()
}

pub fn required_integer(attr: &str, description: &str, min: i64, max: i64) -> Attribute {
    AttributeBuilder::new(attr, AttributeType::Number)
        .description(description)
        .required()
        .validator(NumberRangeValidator::int_between(min, max))
        .build()
}

pub fn integer_with_default(attr: &str, description: &str, min: i64, max: i64, default: i64) -> Attribute {
    AttributeBuilder::new(attr, AttributeType::Number)
        .description(description)
        .optional()
        .computed()
        .default(StaticDefault::number(default as f64))
        .validator(NumberRangeValidator::int_between(min, max))
        .build()
}

pub fn number(attr: &str, description: &str) -> Attribute {
    AttributeBuilder::new(attr, AttributeType::Number)
        .description(description)
        .optional()
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfplug::schema::ValidatorRequest;
    use tfplug::types::{AttributePath, Dynamic, DynamicValue};

    fn errors(attr: &Attribute, value: &str) -> usize {
        attr.validators
            .iter()
            .map(|v| {
                v.validate(ValidatorRequest {
                    config_value: DynamicValue::new(Dynamic::from(value)),
                    path: AttributePath::new(&attr.name),
                })
                .diagnostics
                .len()
            })
            .sum()
    }

    #[test]
    fn slug_validation() {
        let attr = slug("Slug");
        assert_eq!(errors(&attr, "edge-router_01"), 0);
        assert_eq!(errors(&attr, "has space"), 1);
        assert_eq!(errors(&attr, ""), 2);
        assert_eq!(errors(&attr, &"a".repeat(101)), 1);
    }

    #[test]
    fn status_defaults_to_active() {
        let attr = status(&["active", "planned"]);
        assert!(attr.optional && attr.computed);
        assert!(attr.default.is_some());
        assert_eq!(errors(&attr, "planned"), 0);
        assert_eq!(errors(&attr, "broken"), 1);
    }

    #[test]
    fn status_default_can_be_overridden() {
        let attr = status_with_default(&["connected", "planned"], "connected");
        assert!(attr.optional && attr.computed);
        assert_eq!(errors(&attr, "connected"), 0);
        assert_eq!(errors(&attr, "active"), 1);
    }

    #[test]
    fn color_must_be_hex() {
        let attr = color();
        assert_eq!(errors(&attr, "aa1409"), 0);
        assert_eq!(errors(&attr, "red"), 1);
    }
}
