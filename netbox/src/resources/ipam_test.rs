#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::api::test_helpers::create_test_client;
    use crate::resources::NetBoxResource;
    use mockito::{Matcher, Server};
    use std::any::Any;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tfplug::context::Context;
    use tfplug::resource::{
        ConfigureResourceRequest, CreateResourceRequest, Resource, ResourceWithConfigure,
    };
    use tfplug::schema::ValidatorRequest;
    use tfplug::types::{AttributePath, Dynamic, DynamicValue};

    fn path(name: &str) -> AttributePath {
        AttributePath::new(name)
    }

    fn object(values: &[(&str, Dynamic)]) -> DynamicValue {
        DynamicValue::new(Dynamic::Map(
            values
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<HashMap<_, _>>(),
        ))
    }

    fn validate(attr: &tfplug::schema::Attribute, value: Dynamic) -> usize {
        attr.validators
            .iter()
            .map(|v| {
                v.validate(ValidatorRequest {
                    config_value: DynamicValue::new(value.clone()),
                    path: AttributePath::new(&attr.name),
                })
                .diagnostics
                .len()
            })
            .sum()
    }

    #[test]
    fn vlan_id_range() {
        let schema = NetBoxResource::<Vlan>::schema();
        let vid = schema.attribute("vid").unwrap();
        assert_eq!(validate(vid, Dynamic::Number(100.0)), 0);
        assert_eq!(validate(vid, Dynamic::Number(0.0)), 1);
        assert_eq!(validate(vid, Dynamic::Number(4095.0)), 1);
    }

    #[test]
    fn asn_natural_key_is_numeric() {
        let plan = object(&[("asn", Dynamic::Number(65001.0))]);
        assert_eq!(NetBoxResource::<Asn>::natural_key(&plan), "65001");

        let plan = object(&[("prefix", Dynamic::from("10.0.0.0/8"))]);
        assert_eq!(NetBoxResource::<Prefix>::natural_key(&plan), "10.0.0.0/8");
    }

    #[test]
    fn ip_address_state_uses_choice_values() {
        let model: crate::api::ipam::IpAddress = serde_json::from_str(
            r#"{
                "id": 101,
                "display": "10.0.0.1/32",
                "address": "10.0.0.1/32",
                "vrf": {"id": 3, "display": "prod", "name": "prod"},
                "tenant": null,
                "status": {"value": "active", "label": "Active"},
                "role": {"value": "loopback", "label": "Loopback"},
                "dns_name": "router.example.com",
                "description": "Router loopback",
                "comments": "",
                "tags": [],
                "custom_fields": {}
            }"#,
        )
        .unwrap();

        let plan = object(&[("vrf", Dynamic::from("PROD"))]);
        let state = NetBoxResource::<IpAddress>::to_state(&model, &plan);
        assert_eq!(state.get_string(&path("status")).unwrap(), "active");
        assert_eq!(state.get_string(&path("role")).unwrap(), "loopback");
        assert_eq!(state.get_string(&path("vrf")).unwrap(), "PROD");
        assert_eq!(state.get_string(&path("description")).unwrap(), "Router loopback");
        assert!(state.get_value(&path("tenant")).is_null());
        assert!(state.get_value(&path("comments")).is_null());
    }

    #[tokio::test]
    async fn duplicate_asn_is_found_by_number() {
        let mut server = Server::new_async().await;
        let _rir = server
            .mock("GET", "/api/ipam/rirs/1/")
            .with_status(200)
            .with_body(r#"{"id": 1, "display": "RFC 6996", "name": "RFC 6996", "slug": "rfc-6996"}"#)
            .create_async()
            .await;
        let _create = server
            .mock("POST", "/api/ipam/asns/")
            .with_status(400)
            .with_body(r#"{"asn": ["ASN with this ASN already exists."]}"#)
            .create_async()
            .await;
        let existing = server
            .mock("GET", "/api/ipam/asns/")
            .match_query(Matcher::UrlEncoded("asn".into(), "65001".into()))
            .with_status(200)
            .with_body(
                r#"{"count": 1, "next": null, "previous": null,
                    "results": [{"id": 12, "display": "AS65001"}]}"#,
            )
            .create_async()
            .await;

        let mut resource = NetBoxResource::<Asn>::new();
        resource
            .configure(
                Context::new(),
                ConfigureResourceRequest {
                    provider_data: Some(Arc::new(crate::NetBoxProviderData::new(
                        create_test_client(&server.url()),
                    )) as Arc<dyn Any + Send + Sync>),
                },
            )
            .await;

        let plan = object(&[
            ("id", Dynamic::Unknown),
            ("asn", Dynamic::Number(65001.0)),
            ("rir", Dynamic::from("1")),
        ]);
        let response = resource
            .create(
                Context::new(),
                CreateResourceRequest {
                    type_name: "netbox_asn".to_string(),
                    planned_state: plan.clone(),
                    config: plan,
                    planned_private: vec![],
                    provider_meta: None,
                },
            )
            .await;

        existing.assert_async().await;
        let diag = &response.diagnostics[0];
        assert_eq!(diag.summary, "Duplicate netbox_asn");
        assert_eq!(diag.attribute, Some(path("asn")));
        assert!(diag.detail.contains("terraform import netbox_asn.this_65001 12"));
    }

    #[tokio::test]
    async fn prefix_request_sends_flags() {
        let mut server = Server::new_async().await;
        let vrf = server
            .mock("GET", "/api/ipam/vrfs/")
            .match_query(Matcher::UrlEncoded("name".into(), "prod".into()))
            .with_status(200)
            .with_body(
                r#"{"count": 1, "next": null, "previous": null,
                    "results": [{"id": 3, "display": "prod", "name": "prod"}]}"#,
            )
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let plan = object(&[
            ("prefix", Dynamic::from("10.0.0.0/16")),
            ("vrf", Dynamic::from("prod")),
            ("status", Dynamic::from("container")),
            ("is_pool", Dynamic::Bool(true)),
        ]);

        let request = NetBoxResource::<Prefix>::build_request(&client, &plan, None)
            .await
            .unwrap();
        vrf.assert_async().await;

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["prefix"], "10.0.0.0/16");
        assert_eq!(body["vrf"], 3);
        assert_eq!(body["status"], "container");
        assert_eq!(body["is_pool"], true);
        assert_eq!(body["mark_utilized"], false);
    }

    #[test]
    fn ip_range_size_is_computed_only() {
        let schema = NetBoxResource::<IpRange>::schema();
        let size = schema.attribute("size").unwrap();
        assert!(size.computed);
        assert!(!size.optional && !size.required);
        assert!(schema.attribute("start_address").unwrap().required);
    }

    #[tokio::test]
    async fn ip_range_role_resolves_by_slug() {
        let mut server = Server::new_async().await;
        let role = server
            .mock("GET", "/api/ipam/roles/")
            .match_query(Matcher::UrlEncoded("slug".into(), "dhcp".into()))
            .with_status(200)
            .with_body(
                r#"{"count": 1, "next": null, "previous": null,
                    "results": [{"id": 6, "display": "DHCP", "name": "DHCP", "slug": "dhcp"}]}"#,
            )
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let plan = object(&[
            ("start_address", Dynamic::from("10.0.0.10/24")),
            ("end_address", Dynamic::from("10.0.0.50/24")),
            ("size", Dynamic::Unknown),
            ("status", Dynamic::from("active")),
            ("role", Dynamic::from("dhcp")),
        ]);

        let request = NetBoxResource::<IpRange>::build_request(&client, &plan, None)
            .await
            .unwrap();
        role.assert_async().await;
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["role"], 6);
        assert_eq!(body["vrf"], serde_json::Value::Null);
        assert_eq!(body["mark_utilized"], false);
        assert!(body.get("size").is_none());

        let model: crate::api::ipam::IpRange = serde_json::from_str(
            r#"{
                "id": 2,
                "display": "10.0.0.10-50/24",
                "start_address": "10.0.0.10/24",
                "end_address": "10.0.0.50/24",
                "size": 41,
                "status": {"value": "active", "label": "Active"},
                "role": {"id": 6, "display": "DHCP", "name": "DHCP", "slug": "dhcp"},
                "mark_utilized": false,
                "tags": [],
                "custom_fields": {}
            }"#,
        )
        .unwrap();
        let state = NetBoxResource::<IpRange>::to_state(&model, &plan);
        assert_eq!(state.get_number(&path("size")).unwrap(), 41.0);
        assert_eq!(state.get_string(&path("role")).unwrap(), "dhcp");
        assert!(state.get_value(&path("vrf")).is_null());
    }
}
