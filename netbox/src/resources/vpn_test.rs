#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::api::test_helpers::create_test_client;
    use crate::resources::NetBoxResource;
    use std::collections::HashMap;
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

    #[tokio::test]
    async fn tunnel_request_carries_id_and_encapsulation() {
        let client = create_test_client("http://127.0.0.1:1");
        let plan = object(&[
            ("name", Dynamic::from("ams-fra")),
            ("status", Dynamic::from("active")),
            ("encapsulation", Dynamic::from("wireguard")),
            ("tunnel_id", Dynamic::Number(4_000_000_000.0)),
        ]);

        let request = NetBoxResource::<Tunnel>::build_request(&client, &plan, None)
            .await
            .unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["encapsulation"], "wireguard");
        assert_eq!(body["tunnel_id"], 4_000_000_000u64);
        assert_eq!(body["group"], serde_json::Value::Null);
        assert_eq!(body["tags"], serde_json::json!([]));
    }

    #[test]
    fn tunnel_state_reads_choice_values() {
        let model: crate::api::vpn::Tunnel = serde_json::from_str(
            r#"{
                "id": 9,
                "display": "ams-fra",
                "name": "ams-fra",
                "status": {"value": "planned", "label": "Planned"},
                "group": null,
                "encapsulation": {"value": "ipsec-tunnel", "label": "IPsec - Tunnel"},
                "tenant": null,
                "tunnel_id": 100,
                "description": "",
                "comments": "",
                "tags": [],
                "custom_fields": {}
            }"#,
        )
        .unwrap();

        let state = NetBoxResource::<Tunnel>::to_state(&model, &DynamicValue::null());
        assert_eq!(state.get_string(&path("encapsulation")).unwrap(), "ipsec-tunnel");
        assert_eq!(state.get_string(&path("status")).unwrap(), "planned");
        assert_eq!(state.get_number(&path("tunnel_id")).unwrap(), 100.0);
        assert!(state.get_value(&path("group")).is_null());
    }

    #[test]
    fn tunnel_id_and_encapsulation_are_validated() {
        let schema = NetBoxResource::<Tunnel>::schema();
        let errors = |name: &str, value: Dynamic| -> usize {
            let attr = schema.attribute(name).unwrap();
            attr.validators
                .iter()
                .map(|v| {
                    v.validate(ValidatorRequest {
                        config_value: DynamicValue::new(value.clone()),
                        path: path(name),
                    })
                    .diagnostics
                    .len()
                })
                .sum()
        };
        assert_eq!(errors("tunnel_id", Dynamic::Number(4_294_967_295.0)), 0);
        assert_eq!(errors("tunnel_id", Dynamic::Number(-1.0)), 1);
        assert_eq!(errors("encapsulation", Dynamic::from("gre")), 0);
        assert_eq!(errors("encapsulation", Dynamic::from("mpls")), 1);
    }
}
