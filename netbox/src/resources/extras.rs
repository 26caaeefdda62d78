//! Tag resource

use async_trait::async_trait;
use tfplug::schema::Attribute;

use super::attributes;
use super::NetBoxObject;
use crate::api::common::CommonFields;
use crate::api::extras::{self as api, TAGS};
use crate::api::Endpoint;
use crate::state::{PlanReader, StateBuilder};

pub struct Tag;

#[async_trait]
impl NetBoxObject for Tag {
    type Model = api::Tag;
    type Request = api::TagRequest;

    const TYPE_NAME: &'static str = "netbox_tag";
    const ENDPOINT: Endpoint = TAGS;
    const DESCRIPTION: &'static str = "Manages a tag that can be applied to other objects";
    const HAS_COMMENTS: bool = false;
    const TAGGED: bool = false;

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::name("Name of the tag"),
            attributes::slug("URL-friendly unique identifier"),
            attributes::color(),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::TagRequest {
            name: plan.string("name"),
            slug: plan.string("slug"),
            color: plan.optional_string("color"),
            description: common.description,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .string("name", &model.name)
            .string("slug", &model.slug)
            .optional_string("color", model.color.as_deref());
    }
}

#[cfg(test)]
#[path = "./extras_test.rs"]
mod extras_test;
