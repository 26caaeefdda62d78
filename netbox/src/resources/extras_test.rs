#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::api::test_helpers::create_test_client;
    use crate::resources::NetBoxResource;
    use std::collections::HashMap;
    use tfplug::types::{AttributePath, Dynamic, DynamicValue};

    fn object(values: &[(&str, Dynamic)]) -> DynamicValue {
        DynamicValue::new(Dynamic::Map(
            values
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<HashMap<_, _>>(),
        ))
    }

    fn tag(color: &str) -> crate::api::extras::Tag {
        serde_json::from_str(&format!(
            r#"{{"id": 4, "display": "Production", "name": "Production", "slug": "prod",
                "color": "{}", "description": "", "tagged_items": 12}}"#,
            color
        ))
        .unwrap()
    }

    #[test]
    fn color_is_optional_and_computed() {
        let schema = NetBoxResource::<Tag>::schema();
        let color = schema.attribute("color").unwrap();
        assert!(color.optional && color.computed);
        assert!(schema.attribute("tags").is_none());
        assert!(schema.attribute("custom_fields").is_none());
        assert!(schema.attribute("comments").is_none());
    }

    #[tokio::test]
    async fn unknown_color_is_left_to_netbox() {
        let client = create_test_client("http://127.0.0.1:1");
        let plan = object(&[
            ("name", Dynamic::from("Production")),
            ("slug", Dynamic::from("prod")),
            ("color", Dynamic::Unknown),
        ]);

        let request = NetBoxResource::<Tag>::build_request(&client, &plan, None)
            .await
            .unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("color").is_none());
        assert!(body.get("tags").is_none());
        assert!(body.get("comments").is_none());

        let state = NetBoxResource::<Tag>::to_state(&tag("9e9e9e"), &plan);
        assert_eq!(
            state.get_string(&AttributePath::new("color")).unwrap(),
            "9e9e9e"
        );
    }

    #[tokio::test]
    async fn configured_color_is_sent() {
        let client = create_test_client("http://127.0.0.1:1");
        let plan = object(&[
            ("name", Dynamic::from("Production")),
            ("slug", Dynamic::from("prod")),
            ("color", Dynamic::from("ff0000")),
        ]);
        let request = NetBoxResource::<Tag>::build_request(&client, &plan, None)
            .await
            .unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["color"], "ff0000");
        assert_eq!(body["description"], "");
    }
}
