//! Resolution of user supplied references (ID, slug or name) to NetBox objects

use tfplug::types::Diagnostic;

use crate::api::{ApiQueryParams, Client, Endpoint, NestedRef};
use crate::errors::format_api_error;

/// Resolves `value` against `endpoint`
///
/// A positive integer is fetched by ID. Anything else is matched by slug
/// first (when the collection has slugs) and then by the collection's name
/// field.
pub async fn lookup(
    client: &Client,
    endpoint: &Endpoint,
    value: &str,
) -> Result<NestedRef, Diagnostic> {
    let value = value.trim();
    let kind = endpoint.kind;

    if let Some(id) = value.parse::<i64>().ok().filter(|id| *id > 0) {
        tracing::debug!("looking up {} by ID {}", kind, id);
        return match client.retrieve::<NestedRef>(endpoint, id).await {
            Ok(found) => Ok(found),
            Err(e) if e.is_not_found() => Err(not_found(endpoint, value)),
            Err(e) => Err(Diagnostic::error(
                format!("{} Lookup Failed", kind),
                format_api_error(&format!("look up {} {}", kind.to_lowercase(), value), &e),
            )),
        };
    }

    let filters = if endpoint.slugged {
        vec!["slug", endpoint.name_field]
    } else {
        vec![endpoint.name_field]
    };

    for filter in &filters {
        tracing::debug!("looking up {} by {} {:?}", kind, filter, value);
        let params = ApiQueryParams::new().add(*filter, value);
        let page = client
            .list::<NestedRef>(endpoint, &params)
            .await
            .map_err(|e| {
                Diagnostic::error(
                    format!("{} Lookup Failed", kind),
                    format_api_error(&format!("look up {} {}", kind.to_lowercase(), value), &e),
                )
            })?;

        match page.results.len() {
            0 => continue,
            1 => return Ok(page.results.into_iter().next().unwrap_or_default()),
            n => {
                return Err(Diagnostic::error(
                    format!("Multiple {} Found", plural(kind)),
                    format!(
                        "Found {} {} with {}: {}. Use the numeric ID to pick one.",
                        n,
                        plural(&kind.to_lowercase()),
                        filter,
                        value
                    ),
                ))
            }
        }
    }

    Err(not_found(endpoint, value))
}

fn not_found(endpoint: &Endpoint, value: &str) -> Diagnostic {
    Diagnostic::error(
        format!("{} Not Found", endpoint.kind),
        format!(
            "No {} found with ID, slug, or name: {}",
            endpoint.kind.to_lowercase(),
            value
        ),
    )
}

pub(crate) fn plural(kind: &str) -> String {
    if kind.ends_with('s') || kind.ends_with('x') {
        format!("{}es", kind)
    } else {
        format!("{}s", kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_helpers::create_test_client;
    use crate::api::tenancy::TENANTS;
    use crate::api::dcim::{DEVICES, DEVICE_TYPES};
    use mockito::{Matcher, Server};

    const EMPTY_PAGE: &str = r#"{"count": 0, "next": null, "previous": null, "results": []}"#;

    #[tokio::test]
    async fn numeric_value_is_fetched_by_id() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/tenancy/tenants/7/")
            .with_status(200)
            .with_body(r#"{"id": 7, "display": "Acme", "name": "Acme", "slug": "acme"}"#)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let found = lookup(&client, &TENANTS, "7").await.unwrap();

        mock.assert_async().await;
        assert_eq!(found.id, 7);
    }

    #[tokio::test]
    async fn slug_is_tried_before_name() {
        let mut server = Server::new_async().await;
        let by_slug = server
            .mock("GET", "/api/tenancy/tenants/")
            .match_query(Matcher::UrlEncoded("slug".into(), "Acme Corp".into()))
            .with_status(200)
            .with_body(EMPTY_PAGE)
            .create_async()
            .await;
        let by_name = server
            .mock("GET", "/api/tenancy/tenants/")
            .match_query(Matcher::UrlEncoded("name".into(), "Acme Corp".into()))
            .with_status(200)
            .with_body(
                r#"{"count": 1, "next": null, "previous": null,
                    "results": [{"id": 3, "display": "Acme Corp", "name": "Acme Corp", "slug": "acme-corp"}]}"#,
            )
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let found = lookup(&client, &TENANTS, "Acme Corp").await.unwrap();

        by_slug.assert_async().await;
        by_name.assert_async().await;
        assert_eq!(found.slug.as_deref(), Some("acme-corp"));
    }

    #[tokio::test]
    async fn unslugged_collections_use_name_only() {
        let mut server = Server::new_async().await;
        let by_name = server
            .mock("GET", "/api/dcim/devices/")
            .match_query(Matcher::UrlEncoded("name".into(), "edge-01".into()))
            .with_status(200)
            .with_body(
                r#"{"count": 1, "next": null, "previous": null,
                    "results": [{"id": 11, "display": "edge-01", "name": "edge-01"}]}"#,
            )
            .expect(1)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let found = lookup(&client, &DEVICES, "edge-01").await.unwrap();

        by_name.assert_async().await;
        assert_eq!(found.id, 11);
    }

    #[tokio::test]
    async fn device_types_fall_back_to_model() {
        let mut server = Server::new_async().await;
        let by_slug = server
            .mock("GET", "/api/dcim/device-types/")
            .match_query(Matcher::UrlEncoded("slug".into(), "C9300-48P".into()))
            .with_status(200)
            .with_body(EMPTY_PAGE)
            .create_async()
            .await;
        let by_model = server
            .mock("GET", "/api/dcim/device-types/")
            .match_query(Matcher::UrlEncoded("model".into(), "C9300-48P".into()))
            .with_status(200)
            .with_body(
                r#"{"count": 1, "next": null, "previous": null,
                    "results": [{"id": 5, "display": "C9300-48P", "slug": "c9300-48p"}]}"#,
            )
            .create_async()
            .await;
        let by_name = server
            .mock("GET", "/api/dcim/device-types/")
            .match_query(Matcher::UrlEncoded("name".into(), "C9300-48P".into()))
            .with_status(200)
            .with_body(EMPTY_PAGE)
            .expect(0)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let found = lookup(&client, &DEVICE_TYPES, "C9300-48P").await.unwrap();

        by_slug.assert_async().await;
        by_model.assert_async().await;
        by_name.assert_async().await;
        assert_eq!(found.id, 5);
        assert_eq!(found.slug.as_deref(), Some("c9300-48p"));
    }

    #[tokio::test]
    async fn missing_object_reports_not_found() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/tenancy/tenants/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(EMPTY_PAGE)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let diag = lookup(&client, &TENANTS, "ghost").await.unwrap_err();

        assert_eq!(diag.summary, "Tenant Not Found");
        assert_eq!(diag.detail, "No tenant found with ID, slug, or name: ghost");
    }

    #[tokio::test]
    async fn unknown_id_reports_not_found() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/tenancy/tenants/99/")
            .with_status(404)
            .with_body(r#"{"detail": "Not found."}"#)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let diag = lookup(&client, &TENANTS, "99").await.unwrap_err();
        assert_eq!(diag.summary, "Tenant Not Found");
    }

    #[tokio::test]
    async fn ambiguous_name_is_rejected() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/dcim/devices/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"count": 2, "next": null, "previous": null, "results": [
                    {"id": 1, "display": "sw", "name": "sw"},
                    {"id": 2, "display": "sw", "name": "sw"}]}"#,
            )
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let diag = lookup(&client, &DEVICES, "sw").await.unwrap_err();
        assert_eq!(diag.summary, "Multiple Devices Found");
    }

    #[test]
    fn pluralizes_kinds() {
        assert_eq!(plural("Tenant"), "Tenants");
        assert_eq!(plural("Prefix"), "Prefixes");
        assert_eq!(plural("IP Address"), "IP Addresses");
    }
}
