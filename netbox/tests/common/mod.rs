//! Shared helpers for driving the provider against a mock NetBox

#![allow(dead_code)]

use netbox::NetBoxProvider;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use tfplug::data_source::{ConfigureDataSourceRequest, DataSourceWithConfigure};
use tfplug::provider::{ConfigureProviderRequest, Provider};
use tfplug::resource::{ConfigureResourceRequest, ResourceWithConfigure};
use tfplug::types::{ClientCapabilities, Dynamic, DynamicValue};
use tfplug::Context;

pub const TOKEN: &str = "0123456789abcdef";

pub fn object(values: &[(&str, Dynamic)]) -> DynamicValue {
    DynamicValue::new(Dynamic::Map(
        values
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect::<HashMap<_, _>>(),
    ))
}

pub fn page(results: &str) -> String {
    format!(
        r#"{{"count": 1, "next": null, "previous": null, "results": [{}]}}"#,
        results
    )
}

/// Configures the provider against `url` and returns its provider data
pub async fn configure_provider(url: &str) -> (NetBoxProvider, Arc<dyn Any + Send + Sync>) {
    let mut provider = NetBoxProvider::new();
    let response = provider
        .configure(
            Context::new(),
            ConfigureProviderRequest {
                terraform_version: "1.9.0".to_string(),
                config: object(&[
                    ("server_url", Dynamic::from(url)),
                    ("api_token", Dynamic::from(TOKEN)),
                    ("insecure", Dynamic::Bool(true)),
                ]),
                client_capabilities: ClientCapabilities::default(),
            },
        )
        .await;
    assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
    let data = response.provider_data.expect("provider data");
    (provider, data)
}

pub async fn resource(url: &str, type_name: &str) -> Box<dyn ResourceWithConfigure> {
    let (provider, data) = configure_provider(url).await;
    let factories = provider.resources();
    let mut resource = factories.get(type_name).expect("registered resource")();
    let response = resource
        .configure(
            Context::new(),
            ConfigureResourceRequest {
                provider_data: Some(data),
            },
        )
        .await;
    assert!(response.diagnostics.is_empty());
    resource
}

pub async fn data_source(url: &str, type_name: &str) -> Box<dyn DataSourceWithConfigure> {
    let (provider, data) = configure_provider(url).await;
    let factories = provider.data_sources();
    let mut data_source = factories.get(type_name).expect("registered data source")();
    let response = data_source
        .configure(
            Context::new(),
            ConfigureDataSourceRequest {
                provider_data: Some(data),
            },
        )
        .await;
    assert!(response.diagnostics.is_empty());
    data_source
}
