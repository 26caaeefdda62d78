mod common;

use common::{data_source, object, page};
use mockito::{Matcher, Server};
use tfplug::data_source::{ReadDataSourceRequest, ReadDataSourceResponse};
use tfplug::types::{AttributePath, ClientCapabilities, Dynamic, DynamicValue};
use tfplug::Context;

fn path(name: &str) -> AttributePath {
    AttributePath::new(name)
}

async fn read(url: &str, type_name: &str, config: DynamicValue) -> ReadDataSourceResponse {
    data_source(url, type_name)
        .await
        .read(
            Context::new(),
            ReadDataSourceRequest {
                type_name: type_name.to_string(),
                config,
                provider_meta: None,
                client_capabilities: ClientCapabilities::default(),
            },
        )
        .await
}

#[tokio::test]
async fn site_by_slug() {
    let mut server = Server::new_async().await;
    let sites = server
        .mock("GET", "/api/dcim/sites/")
        .match_query(Matcher::UrlEncoded("slug".into(), "ams1".into()))
        .with_status(200)
        .with_body(page(
            r#"{
                "id": 10,
                "display": "Amsterdam 1",
                "name": "Amsterdam 1",
                "slug": "ams1",
                "status": {"value": "active", "label": "Active"},
                "region": {"id": 4, "display": "Netherlands", "name": "Netherlands", "slug": "nl"},
                "group": null,
                "tenant": null,
                "facility": "AMS-01",
                "time_zone": "Europe/Amsterdam",
                "latitude": 52.37,
                "longitude": null,
                "description": "",
                "comments": "",
                "tags": [{"id": 3, "name": "Production", "slug": "prod"}],
                "custom_fields": {"rack_count": 12}
            }"#,
        ))
        .create_async()
        .await;

    let response = read(
        &server.url(),
        "netbox_site",
        object(&[("slug", Dynamic::from("ams1"))]),
    )
    .await;

    sites.assert_async().await;
    assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
    let state = response.state;
    assert_eq!(state.get_string(&path("id")).unwrap(), "10");
    assert_eq!(state.get_string(&path("name")).unwrap(), "Amsterdam 1");
    assert_eq!(state.get_string(&path("status")).unwrap(), "active");
    assert_eq!(state.get_string(&path("region")).unwrap(), "Netherlands");
    assert_eq!(state.get_number(&path("region_id")).unwrap(), 4.0);
    assert!(state.get_value(&path("tenant")).is_null());
    assert!(state.get_value(&path("longitude")).is_null());
    assert_eq!(state.get_list(&path("tags")).unwrap(), vec![Dynamic::from("prod")]);
}

#[tokio::test]
async fn vlan_by_vid() {
    let mut server = Server::new_async().await;
    let vlans = server
        .mock("GET", "/api/ipam/vlans/")
        .match_query(Matcher::UrlEncoded("vid".into(), "100".into()))
        .with_status(200)
        .with_body(page(
            r#"{
                "id": 21,
                "display": "servers (100)",
                "vid": 100,
                "name": "servers",
                "site": null,
                "group": null,
                "tenant": null,
                "status": {"value": "active", "label": "Active"},
                "role": null,
                "description": "",
                "comments": "",
                "tags": [],
                "custom_fields": {}
            }"#,
        ))
        .create_async()
        .await;

    let response = read(
        &server.url(),
        "netbox_vlan",
        object(&[("vid", Dynamic::Number(100.0))]),
    )
    .await;

    vlans.assert_async().await;
    assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
    assert_eq!(response.state.get_string(&path("name")).unwrap(), "servers");
    assert_eq!(response.state.get_number(&path("vid")).unwrap(), 100.0);
}

#[tokio::test]
async fn ambiguous_device_name() {
    let mut server = Server::new_async().await;
    let _devices = server
        .mock("GET", "/api/dcim/devices/")
        .match_query(Matcher::UrlEncoded("name".into(), "edge".into()))
        .with_status(200)
        .with_body(
            r#"{"count": 2, "next": null, "previous": null, "results": [
                {"id": 1, "display": "edge", "name": "edge", "device_type": {"id": 1, "display": "MX204"}, "role": {"id": 1, "display": "Edge", "name": "Edge", "slug": "edge"}, "site": {"id": 10, "display": "Amsterdam 1", "name": "Amsterdam 1", "slug": "ams1"}},
                {"id": 2, "display": "edge", "name": "edge", "device_type": {"id": 1, "display": "MX204"}, "role": {"id": 1, "display": "Edge", "name": "Edge", "slug": "edge"}, "site": {"id": 10, "display": "Amsterdam 1", "name": "Amsterdam 1", "slug": "ams1"}}
            ]}"#,
        )
        .create_async()
        .await;

    let response = read(
        &server.url(),
        "netbox_device",
        object(&[("name", Dynamic::from("edge"))]),
    )
    .await;

    assert_eq!(response.diagnostics[0].summary, "Multiple Devices Found");
}

#[tokio::test]
async fn missing_identifier() {
    let server = Server::new_async().await;
    let response = read(&server.url(), "netbox_tag", object(&[])).await;
    assert_eq!(response.diagnostics[0].summary, "Missing Tag Identifier");
}
