//! Tag lookup

use super::{NetBoxQuery, Output, Outputs};
use crate::api::extras::{self as api, TAGS};
use crate::api::Endpoint;

pub struct Tag;

impl NetBoxQuery for Tag {
    type Model = api::Tag;

    const TYPE_NAME: &'static str = "netbox_tag";
    const ENDPOINT: Endpoint = TAGS;
    const DESCRIPTION: &'static str = "Looks up a tag by ID, slug or name";
    const FILTERS: &'static [&'static str] = &["slug", "name"];
    const HAS_COMMENTS: bool = false;
    const TAGGED: bool = false;

    fn outputs() -> Outputs {
        Outputs::new()
            .string("name", "Name of the tag")
            .string("slug", "URL-friendly unique identifier")
            .string("color", "RGB color in hexadecimal")
            .number("tagged_items", "Number of objects carrying the tag")
    }

    fn state(model: &Self::Model, output: &mut Output) {
        output
            .string("name", &model.name)
            .string("slug", &model.slug)
            .optional_string("color", model.color.as_deref())
            .integer("tagged_items", model.tagged_items);
    }
}
