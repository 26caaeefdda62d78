//! Terraform provider for NetBox
//!
//! Manages NetBox objects through the REST API and exposes lookup data
//! sources. The provider is configured with a server URL and an API token,
//! either in the provider block or through `NETBOX_*` environment variables.

pub mod api;
pub mod custom_fields;
pub mod data_sources;
pub mod errors;
pub mod lookup;
pub mod provider_data;
pub mod resources;
pub mod state;
pub mod tags;

pub use provider_data::NetBoxProviderData;

use async_trait::async_trait;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use tfplug::context::Context;
use tfplug::provider::{
    ConfigureProviderRequest, ConfigureProviderResponse, DataSourceFactory, Provider,
    ProviderMetaSchemaRequest, ProviderMetaSchemaResponse, ProviderMetadataRequest,
    ProviderMetadataResponse, ProviderSchemaRequest, ProviderSchemaResponse, ResourceFactory,
    StopProviderRequest, StopProviderResponse, ValidateProviderConfigRequest,
    ValidateProviderConfigResponse,
};
use tfplug::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfplug::types::{AttributePath, Diagnostic, Dynamic, DynamicValue, ServerCapabilities};

use crate::api::{ApiError, Client};

pub const SERVER_URL_ENV: &str = "NETBOX_SERVER_URL";
pub const API_TOKEN_ENV: &str = "NETBOX_API_TOKEN";
pub const INSECURE_ENV: &str = "NETBOX_INSECURE";

#[derive(Default)]
pub struct NetBoxProvider {
    provider_data: Option<NetBoxProviderData>,
}

impl NetBoxProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schema() -> Schema {
        SchemaBuilder::new()
            .version(0)
            .description("Interact with NetBox, the network source of truth")
            .attribute(
                AttributeBuilder::new("server_url", AttributeType::String)
                    .description(format!(
                        "URL of the NetBox server, e.g. `https://netbox.example.com`. May also be set with {}",
                        SERVER_URL_ENV
                    ))
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("api_token", AttributeType::String)
                    .description(format!(
                        "API token used to authenticate. May also be set with {}",
                        API_TOKEN_ENV
                    ))
                    .optional()
                    .sensitive()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("insecure", AttributeType::Bool)
                    .description(format!(
                        "Skip TLS certificate verification. May also be set with {}",
                        INSECURE_ENV
                    ))
                    .optional()
                    .build(),
            )
            .build()
    }
}

/// Resolved provider configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub server_url: String,
    pub api_token: String,
    pub insecure: bool,
}

impl ProviderConfig {
    /// Reads the provider block, falling back to the environment
    pub fn from_config(config: &DynamicValue) -> Result<Self, Vec<Diagnostic>> {
        let mut diagnostics = vec![];

        let server_url = setting(
            config,
            "server_url",
            SERVER_URL_ENV,
            "Netbox Server URL",
            &mut diagnostics,
        );
        let api_token = setting(
            config,
            "api_token",
            API_TOKEN_ENV,
            "Netbox API Token",
            &mut diagnostics,
        );
        let insecure = match config.get_value(&AttributePath::new("insecure")) {
            Dynamic::Bool(value) => value,
            _ => std::env::var(INSECURE_ENV).is_ok_and(|v| v == "true"),
        };

        match (server_url, api_token) {
            (Some(server_url), Some(api_token)) if diagnostics.is_empty() => Ok(Self {
                server_url,
                api_token,
                insecure,
            }),
            _ => Err(diagnostics),
        }
    }
}

fn setting(
    config: &DynamicValue,
    attribute: &str,
    env: &str,
    label: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<String> {
    let path = AttributePath::new(attribute);
    match config.get_value(&path) {
        Dynamic::Unknown => {
            diagnostics.push(
                Diagnostic::error(
                    format!("Unknown {}", label),
                    format!(
                        "The provider cannot create the NetBox API client as there is an unknown \
                         configuration value for the {}. Either target apply the source of the \
                         value first, set the value statically in the configuration, or use the \
                         {} environment variable.",
                        label, env
                    ),
                )
                .with_attribute(path),
            );
            None
        }
        Dynamic::String(value) if !value.is_empty() => Some(value),
        _ => match std::env::var(env) {
            Ok(value) if !value.is_empty() => Some(value),
            _ => {
                diagnostics.push(
                    Diagnostic::error(
                        format!("Missing {}", label),
                        format!(
                            "The provider cannot create the NetBox API client as there is a \
                             missing or empty value for the {}. Set the {} value in the \
                             configuration or use the {} environment variable.",
                            label, attribute, env
                        ),
                    )
                    .with_attribute(path),
                );
                None
            }
        },
    }
}

/// Token shown in logs: the first four characters only
pub fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    if token.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}

#[async_trait]
impl Provider for NetBoxProvider {
    fn type_name(&self) -> &str {
        "netbox"
    }

    async fn metadata(
        &self,
        _ctx: Context,
        _request: ProviderMetadataRequest,
    ) -> ProviderMetadataResponse {
        ProviderMetadataResponse {
            type_name: "netbox".to_string(),
            server_capabilities: ServerCapabilities {
                plan_destroy: false,
                get_provider_schema_optional: false,
                move_resource_state: false,
            },
        }
    }

    async fn schema(&self, _ctx: Context, _request: ProviderSchemaRequest) -> ProviderSchemaResponse {
        ProviderSchemaResponse {
            schema: Self::schema(),
            diagnostics: vec![],
        }
    }

    async fn meta_schema(
        &self,
        _ctx: Context,
        _request: ProviderMetaSchemaRequest,
    ) -> ProviderMetaSchemaResponse {
        ProviderMetaSchemaResponse {
            schema: None,
            diagnostics: vec![],
        }
    }

    async fn configure(
        &mut self,
        _ctx: Context,
        request: ConfigureProviderRequest,
    ) -> ConfigureProviderResponse {
        let config = match ProviderConfig::from_config(&request.config) {
            Ok(config) => config,
            Err(diagnostics) => {
                return ConfigureProviderResponse {
                    diagnostics,
                    provider_data: None,
                }
            }
        };

        tracing::info!(
            "Configuring NetBox client for {} (token {}, insecure: {})",
            config.server_url,
            mask_token(&config.api_token),
            config.insecure
        );

        let client = match Client::new(&config.server_url, &config.api_token, config.insecure) {
            Ok(client) => client,
            Err(ApiError::InvalidUrl(detail)) => {
                return ConfigureProviderResponse {
                    diagnostics: vec![Diagnostic::error(
                        "Invalid Netbox Server URL",
                        format!("The server URL must be an http or https URL: {}", detail),
                    )
                    .with_attribute(AttributePath::new("server_url"))],
                    provider_data: None,
                }
            }
            Err(e) => {
                return ConfigureProviderResponse {
                    diagnostics: vec![Diagnostic::error(
                        "Unable to Create Netbox API Client",
                        e.to_string(),
                    )],
                    provider_data: None,
                }
            }
        };

        let provider_data = NetBoxProviderData::new(client);
        self.provider_data = Some(provider_data.clone());

        ConfigureProviderResponse {
            diagnostics: vec![],
            provider_data: Some(Arc::new(provider_data) as Arc<dyn Any + Send + Sync>),
        }
    }

    async fn validate(
        &self,
        _ctx: Context,
        request: ValidateProviderConfigRequest,
    ) -> ValidateProviderConfigResponse {
        let mut diagnostics = vec![];
        if let Some(url) = request
            .config
            .get_value(&AttributePath::new("server_url"))
            .as_str()
        {
            let valid = url::Url::parse(url)
                .map(|parsed| matches!(parsed.scheme(), "http" | "https"))
                .unwrap_or(false);
            if !valid {
                diagnostics.push(
                    Diagnostic::error(
                        "Invalid Netbox Server URL",
                        format!("The server URL must be an http or https URL, got {:?}", url),
                    )
                    .with_attribute(AttributePath::new("server_url")),
                );
            }
        }
        ValidateProviderConfigResponse { diagnostics }
    }

    async fn stop(&self, _ctx: Context, _request: StopProviderRequest) -> StopProviderResponse {
        tracing::debug!("NetBox provider stopping");
        StopProviderResponse { error: None }
    }

    fn resources(&self) -> HashMap<String, ResourceFactory> {
        resources::factories()
    }

    fn data_sources(&self) -> HashMap<String, DataSourceFactory> {
        data_sources::factories()
    }
}
