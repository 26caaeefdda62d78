mod common;

use common::{object, page, resource, TOKEN};
use mockito::{Matcher, Server};
use serde_json::json;
use tfplug::resource::{
    CreateResourceRequest, DeleteResourceRequest, ReadResourceRequest, UpdateResourceRequest,
};
use tfplug::types::{AttributePath, ClientCapabilities, Dynamic, DynamicValue};
use tfplug::Context;

const SITE_BODY: &str = r#"{
    "id": 10,
    "display": "Amsterdam 1",
    "name": "Amsterdam 1",
    "slug": "ams1",
    "status": {"value": "active", "label": "Active"},
    "region": null,
    "group": null,
    "tenant": {"id": 7, "display": "Acme", "name": "Acme", "slug": "acme"},
    "facility": "AMS-01",
    "time_zone": "Europe/Amsterdam",
    "physical_address": "",
    "shipping_address": "",
    "latitude": 52.37,
    "longitude": 4.89,
    "description": "Primary datacenter",
    "comments": "",
    "tags": [{"id": 3, "name": "Production", "slug": "prod"}],
    "custom_fields": {}
}"#;

fn path(name: &str) -> AttributePath {
    AttributePath::new(name)
}

fn site_plan() -> DynamicValue {
    object(&[
        ("id", Dynamic::Unknown),
        ("name", Dynamic::from("Amsterdam 1")),
        ("slug", Dynamic::from("ams1")),
        ("status", Dynamic::from("active")),
        ("tenant", Dynamic::from("acme")),
        ("facility", Dynamic::from("AMS-01")),
        ("time_zone", Dynamic::from("Europe/Amsterdam")),
        ("latitude", Dynamic::Number(52.37)),
        ("longitude", Dynamic::Number(4.89)),
        ("description", Dynamic::from("Primary datacenter")),
        ("tags", Dynamic::List(vec![Dynamic::from("prod")])),
    ])
}

async fn mock_lookups(server: &mut Server) -> (mockito::Mock, mockito::Mock) {
    let tenant = server
        .mock("GET", "/api/tenancy/tenants/")
        .match_query(Matcher::UrlEncoded("slug".into(), "acme".into()))
        .with_status(200)
        .with_body(page(r#"{"id": 7, "display": "Acme", "name": "Acme", "slug": "acme"}"#))
        .create_async()
        .await;
    let tag = server
        .mock("GET", "/api/extras/tags/")
        .match_query(Matcher::UrlEncoded("slug".into(), "prod".into()))
        .with_status(200)
        .with_body(page(r#"{"id": 3, "name": "Production", "slug": "prod"}"#))
        .create_async()
        .await;
    (tenant, tag)
}

#[tokio::test]
async fn site_lifecycle() {
    let mut server = Server::new_async().await;
    let (tenant, tag) = mock_lookups(&mut server).await;
    let create = server
        .mock("POST", "/api/dcim/sites/")
        .match_header("authorization", format!("Token {}", TOKEN).as_str())
        .match_body(Matcher::PartialJson(json!({
            "name": "Amsterdam 1",
            "slug": "ams1",
            "status": "active",
            "tenant": 7,
            "facility": "AMS-01",
            "latitude": 52.37,
            "tags": [{"name": "Production", "slug": "prod"}],
        })))
        .with_status(201)
        .with_body(SITE_BODY)
        .create_async()
        .await;
    let get = server
        .mock("GET", "/api/dcim/sites/10/")
        .with_status(200)
        .with_body(SITE_BODY)
        .create_async()
        .await;

    let site = resource(&server.url(), "netbox_site").await;

    let created = site
        .create(
            Context::new(),
            CreateResourceRequest {
                type_name: "netbox_site".to_string(),
                planned_state: site_plan(),
                config: site_plan(),
                planned_private: vec![],
                provider_meta: None,
            },
        )
        .await;
    tenant.assert_async().await;
    tag.assert_async().await;
    create.assert_async().await;
    assert!(created.diagnostics.is_empty(), "{:?}", created.diagnostics);
    let state = created.new_state;
    assert_eq!(state.get_string(&path("id")).unwrap(), "10");
    assert_eq!(state.get_string(&path("tenant")).unwrap(), "acme");
    assert_eq!(
        state.get_list(&path("tags")).unwrap(),
        vec![Dynamic::from("prod")]
    );

    let read = site
        .read(
            Context::new(),
            ReadResourceRequest {
                type_name: "netbox_site".to_string(),
                current_state: state.clone(),
                private: vec![],
                provider_meta: None,
                client_capabilities: ClientCapabilities::default(),
            },
        )
        .await;
    get.assert_async().await;
    assert!(read.diagnostics.is_empty());
    let refreshed = read.new_state.unwrap();
    assert_eq!(refreshed.get_string(&path("facility")).unwrap(), "AMS-01");
    assert_eq!(refreshed.get_number(&path("latitude")).unwrap(), 52.37);

    let mut plan = refreshed.clone();
    plan.set_string(&path("description"), "Decommissioning".to_string())
        .unwrap();
    let put = server
        .mock("PUT", "/api/dcim/sites/10/")
        .match_body(Matcher::PartialJson(json!({
            "slug": "ams1",
            "description": "Decommissioning",
            "tenant": 7,
        })))
        .with_status(200)
        .with_body(SITE_BODY.replace("Primary datacenter", "Decommissioning"))
        .create_async()
        .await;
    let updated = site
        .update(
            Context::new(),
            UpdateResourceRequest {
                type_name: "netbox_site".to_string(),
                prior_state: refreshed.clone(),
                planned_state: plan.clone(),
                config: plan,
                planned_private: vec![],
                provider_meta: None,
            },
        )
        .await;
    put.assert_async().await;
    assert!(updated.diagnostics.is_empty(), "{:?}", updated.diagnostics);
    assert_eq!(
        updated.new_state.get_string(&path("description")).unwrap(),
        "Decommissioning"
    );

    let delete = server
        .mock("DELETE", "/api/dcim/sites/10/")
        .with_status(204)
        .create_async()
        .await;
    let deleted = site
        .delete(
            Context::new(),
            DeleteResourceRequest {
                type_name: "netbox_site".to_string(),
                prior_state: updated.new_state,
                planned_private: vec![],
                provider_meta: None,
            },
        )
        .await;
    delete.assert_async().await;
    assert!(deleted.diagnostics.is_empty());
}

#[tokio::test]
async fn unknown_tag_blocks_create() {
    let mut server = Server::new_async().await;
    let _tenant = server
        .mock("GET", "/api/tenancy/tenants/")
        .match_query(Matcher::UrlEncoded("slug".into(), "acme".into()))
        .with_status(200)
        .with_body(page(r#"{"id": 7, "display": "Acme", "name": "Acme", "slug": "acme"}"#))
        .create_async()
        .await;
    let _tag = server
        .mock("GET", "/api/extras/tags/")
        .match_query(Matcher::UrlEncoded("slug".into(), "prod".into()))
        .with_status(200)
        .with_body(r#"{"count": 0, "next": null, "previous": null, "results": []}"#)
        .create_async()
        .await;
    let create = server
        .mock("POST", "/api/dcim/sites/")
        .expect(0)
        .create_async()
        .await;

    let site = resource(&server.url(), "netbox_site").await;
    let response = site
        .create(
            Context::new(),
            CreateResourceRequest {
                type_name: "netbox_site".to_string(),
                planned_state: site_plan(),
                config: site_plan(),
                planned_private: vec![],
                provider_meta: None,
            },
        )
        .await;

    create.assert_async().await;
    assert!(response.new_state.is_null());
    let diag = &response.diagnostics[0];
    assert_eq!(diag.summary, "Tag Not Found");
    assert_eq!(diag.attribute, Some(path("tags")));
}

#[tokio::test]
async fn site_removed_outside_terraform_drops_from_state() {
    let mut server = Server::new_async().await;
    let _get = server
        .mock("GET", "/api/dcim/sites/10/")
        .with_status(404)
        .with_body(r#"{"detail": "Not found."}"#)
        .create_async()
        .await;

    let site = resource(&server.url(), "netbox_site").await;
    let mut state = site_plan();
    state.set_string(&path("id"), "10".to_string()).unwrap();
    let response = site
        .read(
            Context::new(),
            ReadResourceRequest {
                type_name: "netbox_site".to_string(),
                current_state: state,
                private: vec![],
                provider_meta: None,
                client_capabilities: ClientCapabilities::default(),
            },
        )
        .await;

    assert!(response.diagnostics.is_empty());
    assert!(response.new_state.is_none());
}

#[tokio::test]
async fn duplicate_site_points_at_import() {
    let mut server = Server::new_async().await;
    let _lookups = mock_lookups(&mut server).await;
    let _create = server
        .mock("POST", "/api/dcim/sites/")
        .with_status(400)
        .with_body(r#"{"slug": ["site with this slug already exists."]}"#)
        .create_async()
        .await;
    let existing = server
        .mock("GET", "/api/dcim/sites/")
        .match_query(Matcher::UrlEncoded("slug".into(), "ams1".into()))
        .with_status(200)
        .with_body(page(r#"{"id": 10, "display": "Amsterdam 1", "name": "Amsterdam 1", "slug": "ams1"}"#))
        .create_async()
        .await;

    let site = resource(&server.url(), "netbox_site").await;
    let response = site
        .create(
            Context::new(),
            CreateResourceRequest {
                type_name: "netbox_site".to_string(),
                planned_state: site_plan(),
                config: site_plan(),
                planned_private: vec![],
                provider_meta: None,
            },
        )
        .await;

    existing.assert_async().await;
    let diag = &response.diagnostics[0];
    assert_eq!(diag.summary, "Duplicate netbox_site");
    assert!(diag.detail.contains("terraform import netbox_site."));
    assert!(diag.detail.contains(" 10"));
}
