#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::api::test_helpers::create_test_client;
    use crate::resources::NetBoxResource;
    use mockito::{Matcher, Server};
    use std::collections::HashMap;
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

    fn wlan(psk: &str) -> crate::api::wireless::WirelessLan {
        serde_json::from_str(&format!(
            r#"{{
                "id": 21,
                "display": "corp",
                "ssid": "corp",
                "status": {{"value": "active", "label": "Active"}},
                "vlan": {{"id": 100, "display": "users", "name": "users"}},
                "auth_type": {{"value": "wpa-personal", "label": "WPA Personal (PSK)"}},
                "auth_cipher": {{"value": "aes", "label": "AES"}},
                "auth_psk": "{}",
                "tags": [],
                "custom_fields": {{}}
            }}"#,
            psk
        ))
        .unwrap()
    }

    #[test]
    fn pre_shared_key_is_sensitive() {
        let schema = NetBoxResource::<WirelessLan>::schema();
        let psk = schema.attribute("auth_psk").unwrap();
        assert!(psk.sensitive && psk.optional);
        assert!(!schema.attribute("ssid").unwrap().sensitive);
    }

    #[tokio::test]
    async fn pre_shared_key_round_trips() {
        let mut server = Server::new_async().await;
        let vlan = server
            .mock("GET", "/api/ipam/vlans/")
            .match_query(Matcher::UrlEncoded("name".into(), "users".into()))
            .with_status(200)
            .with_body(
                r#"{"count": 1, "next": null, "previous": null,
                    "results": [{"id": 100, "display": "users", "name": "users"}]}"#,
            )
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let plan = object(&[
            ("ssid", Dynamic::from("corp")),
            ("status", Dynamic::from("active")),
            ("vlan", Dynamic::from("users")),
            ("auth_type", Dynamic::from("wpa-personal")),
            ("auth_psk", Dynamic::from("correct horse")),
        ]);

        let request = NetBoxResource::<WirelessLan>::build_request(&client, &plan, None)
            .await
            .unwrap();
        vlan.assert_async().await;
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["vlan"], 100);
        assert_eq!(body["auth_psk"], "correct horse");
        assert_eq!(body["auth_cipher"], "");

        let state = NetBoxResource::<WirelessLan>::to_state(&wlan("correct horse"), &plan);
        assert_eq!(state.get_string(&path("auth_psk")).unwrap(), "correct horse");
        assert_eq!(state.get_string(&path("vlan")).unwrap(), "users");
        assert_eq!(state.get_string(&path("auth_cipher")).unwrap(), "aes");
    }

    #[test]
    fn cleared_key_reads_back_as_null() {
        let current = object(&[("vlan", Dynamic::from("100"))]);
        let state = NetBoxResource::<WirelessLan>::to_state(&wlan(""), &current);
        assert!(state.get_value(&path("auth_psk")).is_null());
        assert_eq!(state.get_string(&path("vlan")).unwrap(), "100");
    }
}
