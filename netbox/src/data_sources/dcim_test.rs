#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::api::test_helpers::create_test_client;
    use crate::data_sources::NetBoxDataSource;
    use mockito::{Matcher, Server};
    use std::collections::HashMap;
    use tfplug::types::{AttributePath, Dynamic, DynamicValue};

    fn config(values: &[(&str, Dynamic)]) -> DynamicValue {
        DynamicValue::new(Dynamic::Map(
            values
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<HashMap<_, _>>(),
        ))
    }

    const INTERFACE: &str = r#"{
        "id": 77,
        "display": "xe-0/0/1",
        "device": {"id": 11, "display": "edge-01", "name": "edge-01"},
        "name": "xe-0/0/1",
        "label": "",
        "type": {"value": "10gbase-x-sfpp", "label": "SFP+ (10GE)"},
        "enabled": true,
        "lag": {"id": 70, "display": "ae0", "name": "ae0"},
        "mtu": 9216,
        "speed": 10000000,
        "duplex": null,
        "mgmt_only": false,
        "mode": {"value": "access", "label": "Access"},
        "mark_connected": false,
        "tags": [],
        "custom_fields": {}
    }"#;

    #[tokio::test]
    async fn interface_name_is_scoped_to_its_device() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/dcim/interfaces/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("name".into(), "xe-0/0/1".into()),
                Matcher::UrlEncoded("device_id".into(), "11".into()),
            ]))
            .with_status(200)
            .with_body(format!(
                r#"{{"count": 1, "next": null, "previous": null, "results": [{}]}}"#,
                INTERFACE
            ))
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let config = config(&[
            ("name", Dynamic::from("xe-0/0/1")),
            ("device_id", Dynamic::Number(11.0)),
        ]);
        let selector = NetBoxDataSource::<Interface>::selector(&config).unwrap();
        let scope = NetBoxDataSource::<Interface>::scope(&config);
        let model = NetBoxDataSource::<Interface>::find(&client, &selector, &scope)
            .await
            .unwrap();
        mock.assert_async().await;

        let state = NetBoxDataSource::<Interface>::to_state(&model);
        let get = |name: &str| state.get_value(&AttributePath::new(name));
        assert_eq!(get("device"), Dynamic::from("edge-01"));
        assert_eq!(get("type"), Dynamic::from("10gbase-x-sfpp"));
        assert_eq!(get("lag"), Dynamic::from("ae0"));
        assert_eq!(get("lag_id"), Dynamic::Number(70.0));
        assert_eq!(get("mtu"), Dynamic::Number(9216.0));
        assert!(get("label").is_null());
        assert!(get("duplex").is_null());
    }

    #[tokio::test]
    async fn same_interface_name_on_many_devices_is_ambiguous() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/dcim/interfaces/")
            .match_query(Matcher::UrlEncoded("name".into(), "eth0".into()))
            .with_status(200)
            .with_body(
                r#"{"count": 2, "next": null, "previous": null, "results": [
                    {"id": 1, "name": "eth0", "device": {"id": 1}, "type": {"value": "virtual", "label": "Virtual"}},
                    {"id": 2, "name": "eth0", "device": {"id": 2}, "type": {"value": "virtual", "label": "Virtual"}}
                ]}"#,
            )
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let config = config(&[("name", Dynamic::from("eth0"))]);
        let selector = NetBoxDataSource::<Interface>::selector(&config).unwrap();
        let diag = NetBoxDataSource::<Interface>::find(&client, &selector, &[])
            .await
            .unwrap_err();
        assert_eq!(diag.summary, "Multiple Interfaces Found");
        assert_eq!(
            diag.detail,
            "Found 2 interfaces with name: eth0. Use id to select one."
        );
    }

    #[tokio::test]
    async fn cable_exposes_both_ends() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/dcim/cables/5/")
            .with_status(200)
            .with_body(
                r##"{
                    "id": 5,
                    "display": "#5",
                    "a_terminations": [{"object_type": "dcim.interface", "object_id": 77, "object": {"id": 77}}],
                    "b_terminations": [{"object_type": "circuits.circuittermination", "object_id": 40}],
                    "type": "smf-os2",
                    "status": {"value": "connected", "label": "Connected"},
                    "label": "XC-991",
                    "color": "",
                    "length": 12.5,
                    "length_unit": {"value": "m", "label": "Meters"},
                    "tags": [],
                    "custom_fields": {}
                }"##,
            )
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let selector = NetBoxDataSource::<Cable>::selector(&config(&[("id", Dynamic::from("5"))])).unwrap();
        let model = NetBoxDataSource::<Cable>::find(&client, &selector, &[])
            .await
            .unwrap();

        let state = NetBoxDataSource::<Cable>::to_state(&model);
        let get = |name: &str| state.get_value(&AttributePath::new(name));
        assert_eq!(
            get("a_terminations"),
            Dynamic::List(vec![Dynamic::Map(HashMap::from([
                ("object_type".to_string(), Dynamic::from("dcim.interface")),
                ("object_id".to_string(), Dynamic::Number(77.0)),
            ]))])
        );
        assert_eq!(get("type"), Dynamic::from("smf-os2"));
        assert_eq!(get("length_unit"), Dynamic::from("m"));
        assert!(get("color").is_null());
        assert!(get("tenant_id").is_null());
    }

    #[test]
    fn module_type_lookup_is_by_model() {
        let schema = NetBoxDataSource::<ModuleType>::schema();
        assert!(schema.attribute("model").unwrap().optional);
        assert!(schema.attribute("manufacturer_id").unwrap().optional);
        assert!(!schema.attribute("manufacturer").unwrap().optional);

        let diag = NetBoxDataSource::<ModuleType>::selector(&config(&[])).unwrap_err();
        assert_eq!(diag.detail, "One of id, model must be specified");
    }

    #[tokio::test]
    async fn module_bay_is_found_by_device_name() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/dcim/module-bays/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("name".into(), "Slot 1".into()),
                Matcher::UrlEncoded("device".into(), "edge-01".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{"count": 1, "next": null, "previous": null, "results": [{
                    "id": 12,
                    "display": "Slot 1",
                    "device": {"id": 11, "display": "edge-01", "name": "edge-01"},
                    "name": "Slot 1",
                    "label": "",
                    "position": "1",
                    "tags": [],
                    "custom_fields": {}
                }]}"#,
            )
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let config = config(&[
            ("name", Dynamic::from("Slot 1")),
            ("device", Dynamic::from("edge-01")),
        ]);
        let selector = NetBoxDataSource::<ModuleBay>::selector(&config).unwrap();
        let scope = NetBoxDataSource::<ModuleBay>::scope(&config);
        let model = NetBoxDataSource::<ModuleBay>::find(&client, &selector, &scope)
            .await
            .unwrap();
        mock.assert_async().await;

        let state = NetBoxDataSource::<ModuleBay>::to_state(&model);
        let get = |name: &str| state.get_value(&AttributePath::new(name));
        assert_eq!(get("id"), Dynamic::from("12"));
        assert_eq!(get("device_id"), Dynamic::Number(11.0));
        assert_eq!(get("position"), Dynamic::from("1"));
        assert!(get("label").is_null());
    }
}
