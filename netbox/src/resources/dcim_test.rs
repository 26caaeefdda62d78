#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::api::test_helpers::create_test_client;
    use crate::resources::NetBoxResource;
    use mockito::{Matcher, Server};
    use std::collections::HashMap;
    use tfplug::types::Dynamic;

    fn path(name: &str) -> AttributePath {
        AttributePath::new(name)
    }

    fn config(values: &[(&str, Dynamic)]) -> DynamicValue {
        DynamicValue::new(Dynamic::Map(
            values
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<HashMap<_, _>>(),
        ))
    }

    #[test]
    fn device_position_requires_rack() {
        let diagnostics = Device::validate(&config(&[
            ("name", Dynamic::from("edge-01")),
            ("position", Dynamic::Number(10.0)),
            ("face", Dynamic::from("front")),
        ]));
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].summary, "Missing Rack");
        assert_eq!(diagnostics[0].attribute, Some(path("position")));
        assert_eq!(diagnostics[1].attribute, Some(path("face")));

        let diagnostics = Device::validate(&config(&[
            ("rack", Dynamic::from("R1")),
            ("position", Dynamic::Number(10.0)),
            ("face", Dynamic::from("front")),
        ]));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn unknown_position_is_not_checked() {
        let diagnostics = Device::validate(&config(&[
            ("position", Dynamic::Unknown),
            ("face", Dynamic::Null),
        ]));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn site_status_defaults_to_active() {
        let schema = NetBoxResource::<Site>::schema();
        let status = schema.attribute("status").unwrap();
        assert!(status.optional && status.computed);
        assert!(status.default.is_some());
    }

    #[test]
    fn device_type_state_keeps_manufacturer_slug() {
        let model: crate::api::dcim::DeviceType = serde_json::from_str(
            r#"{
                "id": 14,
                "display": "MX204",
                "manufacturer": {"id": 2, "display": "Juniper", "name": "Juniper", "slug": "juniper"},
                "model": "MX204",
                "slug": "mx204",
                "part_number": "",
                "u_height": 1.0,
                "is_full_depth": true,
                "description": "",
                "comments": "",
                "tags": [],
                "custom_fields": {}
            }"#,
        )
        .unwrap();

        let plan = config(&[("manufacturer", Dynamic::from("juniper"))]);
        let state = NetBoxResource::<DeviceType>::to_state(&model, &plan);
        assert_eq!(state.get_string(&path("manufacturer")).unwrap(), "juniper");
        assert_eq!(state.get_number(&path("u_height")).unwrap(), 1.0);
        assert!(state.get_bool(&path("is_full_depth")).unwrap());
        assert!(state.get_value(&path("part_number")).is_null());

        let imported = NetBoxResource::<DeviceType>::to_state(&model, &DynamicValue::null());
        assert_eq!(imported.get_string(&path("manufacturer")).unwrap(), "2");
    }

    #[tokio::test]
    async fn device_request_resolves_every_reference() {
        let mut server = Server::new_async().await;
        let nested = |id: i64, name: &str, slug: &str| {
            format!(
                r#"{{"count": 1, "next": null, "previous": null,
                    "results": [{{"id": {id}, "display": "{name}", "name": "{name}", "slug": "{slug}"}}]}}"#
            )
        };
        let _device_type = server
            .mock("GET", "/api/dcim/device-types/14/")
            .with_status(200)
            .with_body(r#"{"id": 14, "display": "MX204", "slug": "mx204"}"#)
            .create_async()
            .await;
        let _role = server
            .mock("GET", "/api/dcim/device-roles/")
            .match_query(Matcher::UrlEncoded("slug".into(), "router".into()))
            .with_status(200)
            .with_body(nested(4, "Router", "router"))
            .create_async()
            .await;
        let _site = server
            .mock("GET", "/api/dcim/sites/")
            .match_query(Matcher::UrlEncoded("slug".into(), "ams1".into()))
            .with_status(200)
            .with_body(nested(1, "AMS1", "ams1"))
            .create_async()
            .await;
        let rack = server
            .mock("GET", "/api/dcim/racks/")
            .match_query(Matcher::UrlEncoded("name".into(), "R1".into()))
            .with_status(200)
            .with_body(r#"{"count": 1, "next": null, "previous": null,
                "results": [{"id": 30, "display": "R1", "name": "R1"}]}"#)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let plan = config(&[
            ("name", Dynamic::from("edge-01")),
            ("device_type", Dynamic::from("14")),
            ("role", Dynamic::from("router")),
            ("site", Dynamic::from("ams1")),
            ("rack", Dynamic::from("R1")),
            ("status", Dynamic::from("active")),
            ("position", Dynamic::Number(10.0)),
            ("face", Dynamic::from("front")),
        ]);

        let request = NetBoxResource::<Device>::build_request(&client, &plan, None)
            .await
            .unwrap();
        rack.assert_async().await;

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["device_type"], 14);
        assert_eq!(body["role"], 4);
        assert_eq!(body["site"], 1);
        assert_eq!(body["rack"], 30);
        assert_eq!(body["location"], serde_json::Value::Null);
        assert_eq!(body["position"], 10.0);
        assert_eq!(body["face"], "front");
    }

    #[tokio::test]
    async fn device_request_reports_missing_required_references() {
        let server = Server::new_async().await;
        let client = create_test_client(&server.url());
        let plan = config(&[("name", Dynamic::from("edge-01"))]);

        let diagnostics = NetBoxResource::<Device>::build_request(&client, &plan, None)
            .await
            .err()
            .unwrap();
        let summaries: Vec<&str> = diagnostics.iter().map(|d| d.summary.as_str()).collect();
        assert_eq!(
            summaries,
            vec!["Missing Device Type", "Missing Device Role", "Missing Site"]
        );
    }

    fn termination(object_type: &str, object_id: f64) -> Dynamic {
        Dynamic::Map(HashMap::from([
            ("object_type".to_string(), Dynamic::from(object_type)),
            ("object_id".to_string(), Dynamic::Number(object_id)),
        ]))
    }

    #[test]
    fn module_type_weight_needs_a_unit() {
        let diagnostics = ModuleType::validate(&config(&[
            ("model", Dynamic::from("SFP-10G-LR")),
            ("weight", Dynamic::Number(0.02)),
        ]));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].summary, "Missing Unit");
        assert_eq!(diagnostics[0].attribute, Some(path("weight_unit")));

        let diagnostics = ModuleType::validate(&config(&[
            ("weight", Dynamic::Number(0.02)),
            ("weight_unit", Dynamic::from("kg")),
        ]));
        assert!(diagnostics.is_empty());
        assert!(ModuleType::validate(&config(&[("weight", Dynamic::Unknown)])).is_empty());
    }

    #[tokio::test]
    async fn module_request_resolves_type_by_model() {
        let mut server = Server::new_async().await;
        let _device = server
            .mock("GET", "/api/dcim/devices/7/")
            .with_status(200)
            .with_body(r#"{"id": 7, "display": "edge-01", "name": "edge-01"}"#)
            .create_async()
            .await;
        let _bay = server
            .mock("GET", "/api/dcim/module-bays/12/")
            .with_status(200)
            .with_body(r#"{"id": 12, "display": "Slot 1", "name": "Slot 1"}"#)
            .create_async()
            .await;
        let module_type = server
            .mock("GET", "/api/dcim/module-types/")
            .match_query(Matcher::UrlEncoded("model".into(), "SFP-10G-LR".into()))
            .with_status(200)
            .with_body(
                r#"{"count": 1, "next": null, "previous": null,
                    "results": [{"id": 3, "display": "SFP-10G-LR"}]}"#,
            )
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let plan = config(&[
            ("device", Dynamic::from("7")),
            ("module_bay", Dynamic::from("12")),
            ("module_type", Dynamic::from("SFP-10G-LR")),
            ("status", Dynamic::from("active")),
            ("serial", Dynamic::from("FNS1234")),
        ]);

        let request = NetBoxResource::<Module>::build_request(&client, &plan, None)
            .await
            .unwrap();
        module_type.assert_async().await;
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["device"], 7);
        assert_eq!(body["module_bay"], 12);
        assert_eq!(body["module_type"], 3);
        assert_eq!(body["serial"], "FNS1234");
        assert_eq!(body["asset_tag"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn interface_type_is_sent_as_type() {
        let mut server = Server::new_async().await;
        let _device = server
            .mock("GET", "/api/dcim/devices/7/")
            .with_status(200)
            .with_body(r#"{"id": 7, "display": "edge-01", "name": "edge-01"}"#)
            .create_async()
            .await;
        let lag = server
            .mock("GET", "/api/dcim/interfaces/")
            .match_query(Matcher::UrlEncoded("name".into(), "ae0".into()))
            .with_status(200)
            .with_body(
                r#"{"count": 1, "next": null, "previous": null,
                    "results": [{"id": 40, "display": "ae0", "name": "ae0"}]}"#,
            )
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let plan = config(&[
            ("device", Dynamic::from("7")),
            ("name", Dynamic::from("et-0/0/1")),
            ("type", Dynamic::from("100gbase-x-qsfp28")),
            ("lag", Dynamic::from("ae0")),
            ("mtu", Dynamic::Number(9216.0)),
        ]);

        let request = NetBoxResource::<Interface>::build_request(&client, &plan, None)
            .await
            .unwrap();
        lag.assert_async().await;
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["type"], "100gbase-x-qsfp28");
        assert_eq!(body["lag"], 40);
        assert_eq!(body["mtu"], 9216);
        assert_eq!(body["enabled"], true);
        assert_eq!(body["mgmt_only"], false);
        assert!(body.get("interface_type").is_none());
        assert!(body.get("comments").is_none());
    }

    #[test]
    fn interface_state_reads_type_value() {
        let model: crate::api::dcim::Interface = serde_json::from_str(
            r#"{
                "id": 41,
                "display": "et-0/0/1",
                "device": {"id": 7, "display": "edge-01", "name": "edge-01"},
                "name": "et-0/0/1",
                "label": "",
                "type": {"value": "100gbase-x-qsfp28", "label": "QSFP28 (100GE)"},
                "enabled": true,
                "lag": {"id": 40, "display": "ae0", "name": "ae0"},
                "mtu": 9216,
                "mode": null,
                "tags": [],
                "custom_fields": {}
            }"#,
        )
        .unwrap();
        let current = config(&[
            ("device", Dynamic::from("edge-01")),
            ("lag", Dynamic::from("ae0")),
        ]);

        let state = NetBoxResource::<Interface>::to_state(&model, &current);
        assert_eq!(state.get_string(&path("type")).unwrap(), "100gbase-x-qsfp28");
        assert_eq!(state.get_string(&path("device")).unwrap(), "edge-01");
        assert_eq!(state.get_string(&path("lag")).unwrap(), "ae0");
        assert_eq!(state.get_number(&path("mtu")).unwrap(), 9216.0);
        assert!(state.get_value(&path("label")).is_null());
        assert!(state.get_value(&path("mode")).is_null());
    }

    #[tokio::test]
    async fn cable_request_carries_both_ends() {
        let client = create_test_client("http://127.0.0.1:1");
        let plan = config(&[
            (
                "a_terminations",
                Dynamic::List(vec![termination("dcim.interface", 41.0)]),
            ),
            (
                "b_terminations",
                Dynamic::List(vec![
                    termination("dcim.interface", 52.0),
                    termination("dcim.frontport", 7.0),
                ]),
            ),
            ("type", Dynamic::from("smf")),
            ("status", Dynamic::from("connected")),
        ]);

        let request = NetBoxResource::<Cable>::build_request(&client, &plan, None)
            .await
            .unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body["a_terminations"],
            serde_json::json!([{"object_type": "dcim.interface", "object_id": 41}])
        );
        assert_eq!(body["b_terminations"][1]["object_type"], "dcim.frontport");
        assert_eq!(body["type"], "smf");
        assert_eq!(body["status"], "connected");
    }

    #[tokio::test]
    async fn cable_termination_needs_type_and_id() {
        let client = create_test_client("http://127.0.0.1:1");
        let plan = config(&[
            (
                "a_terminations",
                Dynamic::List(vec![Dynamic::Map(HashMap::from([(
                    "object_id".to_string(),
                    Dynamic::Number(41.0),
                )]))]),
            ),
            (
                "b_terminations",
                Dynamic::List(vec![termination("dcim.interface", 52.0)]),
            ),
        ]);

        let diagnostics = NetBoxResource::<Cable>::build_request(&client, &plan, None)
            .await
            .err()
            .unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].summary, "Invalid Cable Termination");
        assert_eq!(diagnostics[0].attribute, Some(path("a_terminations")));
    }

    #[test]
    fn cable_validation() {
        let diagnostics = Cable::validate(&config(&[
            ("a_terminations", Dynamic::List(vec![])),
            (
                "b_terminations",
                Dynamic::List(vec![termination("dcim.interface", 52.0)]),
            ),
            ("length", Dynamic::Number(3.0)),
        ]));
        let summaries: Vec<&str> = diagnostics.iter().map(|d| d.summary.as_str()).collect();
        assert_eq!(summaries, vec!["Missing Unit", "Missing Cable Termination"]);
        assert_eq!(diagnostics[1].attribute, Some(path("a_terminations")));

        let schema = NetBoxResource::<Cable>::schema();
        let status = schema.attribute("status").unwrap();
        assert!(status.optional && status.computed);
    }

    #[test]
    fn cable_state_lists_terminations() {
        let model: crate::api::dcim::Cable = serde_json::from_str(
            r##"{
                "id": 8,
                "display": "#8",
                "a_terminations": [{"object_type": "dcim.interface", "object_id": 41, "object": {"id": 41}}],
                "b_terminations": [{"object_type": "circuits.circuittermination", "object_id": 3}],
                "type": "",
                "status": {"value": "connected", "label": "Connected"},
                "label": "",
                "color": "",
                "length": null,
                "length_unit": null,
                "tags": [],
                "custom_fields": {}
            }"##,
        )
        .unwrap();

        let state = NetBoxResource::<Cable>::to_state(&model, &DynamicValue::null());
        let a = state.get_list(&path("a_terminations")).unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(
            a[0],
            Dynamic::Map(HashMap::from([
                ("object_type".to_string(), Dynamic::from("dcim.interface")),
                ("object_id".to_string(), Dynamic::Number(41.0)),
            ]))
        );
        assert!(state.get_value(&path("type")).is_null());
        assert!(state.get_value(&path("label")).is_null());
        assert_eq!(state.get_string(&path("status")).unwrap(), "connected");
    }
}
