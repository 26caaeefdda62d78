//! The `tags` attribute: a set of tag slugs

use tfplug::schema::{Attribute, AttributeBuilder, AttributeType};
use tfplug::types::{AttributePath, Diagnostic, Dynamic};

use crate::api::common::TagRef;
use crate::api::extras::TAGS;
use crate::api::{ApiQueryParams, Client, NestedTag};
use crate::errors::format_api_error;

pub fn tags_attribute() -> Attribute {
    AttributeBuilder::new("tags", AttributeType::Set(Box::new(AttributeType::String)))
        .description("Slugs of the tags assigned to this object")
        .optional()
        .build()
}

/// Resolves planned tag slugs into request references
///
/// Null or empty sends an empty list so tags removed from the configuration
/// are cleared.
pub async fn tags_to_request(
    client: &Client,
    value: &Dynamic,
) -> Result<Vec<TagRef>, Vec<Diagnostic>> {
    let slugs: Vec<&str> = value
        .as_list()
        .unwrap_or_default()
        .iter()
        .filter_map(Dynamic::as_str)
        .collect();

    let mut tags = Vec::with_capacity(slugs.len());
    let mut diagnostics = Vec::new();
    for slug in slugs {
        let params = ApiQueryParams::new().add("slug", slug);
        match client.list::<NestedTag>(&TAGS, &params).await {
            Ok(page) => match page.results.into_iter().next() {
                Some(tag) => tags.push(TagRef {
                    name: tag.name,
                    slug: tag.slug,
                }),
                None => diagnostics.push(
                    Diagnostic::error("Tag Not Found", format!("No tag found with slug: {}", slug))
                        .with_attribute(AttributePath::new("tags")),
                ),
            },
            Err(e) => diagnostics.push(
                Diagnostic::error(
                    "Tag Lookup Failed",
                    format_api_error(&format!("look up tag {}", slug), &e),
                )
                .with_attribute(AttributePath::new("tags")),
            ),
        }
    }

    if diagnostics.is_empty() {
        Ok(tags)
    } else {
        Err(diagnostics)
    }
}

/// State value for tags returned by the API
pub fn tags_to_state(current: &Dynamic, api: &[NestedTag]) -> Dynamic {
    if api.is_empty() && current.is_null() {
        return Dynamic::Null;
    }
    Dynamic::List(tag_slugs(api).into_iter().map(Dynamic::String).collect())
}

pub fn tag_slugs(api: &[NestedTag]) -> Vec<String> {
    let mut slugs: Vec<String> = api.iter().map(|t| t.slug.clone()).collect();
    slugs.sort();
    slugs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_helpers::create_test_client;
    use mockito::{Matcher, Server};

    fn nested(id: i64, slug: &str) -> NestedTag {
        NestedTag {
            id,
            name: slug.to_uppercase(),
            slug: slug.to_string(),
            color: None,
        }
    }

    #[test]
    fn null_state_without_api_tags_stays_null() {
        assert_eq!(tags_to_state(&Dynamic::Null, &[]), Dynamic::Null);
        assert_eq!(
            tags_to_state(&Dynamic::List(vec![]), &[]),
            Dynamic::List(vec![])
        );
    }

    #[test]
    fn api_tags_become_sorted_slugs() {
        let state = tags_to_state(&Dynamic::Null, &[nested(2, "prod"), nested(1, "edge")]);
        assert_eq!(
            state,
            Dynamic::List(vec![Dynamic::from("edge"), Dynamic::from("prod")])
        );
    }

    #[tokio::test]
    async fn null_plan_sends_empty_list() {
        let client = create_test_client("http://127.0.0.1:1");
        let tags = tags_to_request(&client, &Dynamic::Null).await.unwrap();
        assert!(tags.is_empty());
    }

    #[tokio::test]
    async fn slugs_resolve_to_name_and_slug() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/extras/tags/")
            .match_query(Matcher::UrlEncoded("slug".into(), "prod".into()))
            .with_status(200)
            .with_body(
                r#"{"count": 1, "next": null, "previous": null,
                    "results": [{"id": 4, "name": "Production", "slug": "prod", "color": "ff0000"}]}"#,
            )
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let tags = tags_to_request(&client, &Dynamic::List(vec![Dynamic::from("prod")]))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(
            tags,
            vec![TagRef {
                name: "Production".to_string(),
                slug: "prod".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn unknown_slug_is_an_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/extras/tags/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"count": 0, "next": null, "previous": null, "results": []}"#)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let diags = tags_to_request(&client, &Dynamic::List(vec![Dynamic::from("ghost")]))
            .await
            .unwrap_err();

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].summary, "Tag Not Found");
        assert_eq!(diags[0].detail, "No tag found with slug: ghost");
        assert_eq!(diags[0].attribute, Some(AttributePath::new("tags")));
    }
}
