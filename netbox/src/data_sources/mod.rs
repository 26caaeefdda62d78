//! Lookup data sources
//!
//! Each data source finds exactly one object by `id` or by one of its
//! lookup attributes and exposes the whole object as computed attributes.
//! Scope attributes narrow a lookup, e.g. an interface name within a device.
//! References are flattened into a name attribute plus an `<name>_id`.

pub mod circuits;
pub mod dcim;
pub mod extras;
pub mod ipam;
pub mod tenancy;
pub mod virtualization;

use async_trait::async_trait;
use std::collections::HashMap;
use std::marker::PhantomData;
use tfplug::context::Context;
use tfplug::data_source::{
    ConfigureDataSourceRequest, ConfigureDataSourceResponse, DataSource,
    DataSourceSchemaRequest, DataSourceSchemaResponse, DataSourceWithConfigure,
    ReadDataSourceRequest, ReadDataSourceResponse,
};
use tfplug::provider::DataSourceFactory;
use tfplug::schema::{Attribute, AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfplug::types::{AttributePath, Diagnostic, Dynamic, DynamicValue};

use crate::api::{ApiError, ApiQueryParams, Choice, Client, Endpoint, NestedRef, NetBoxModel};
use crate::custom_fields::{custom_fields_data_source_attribute, custom_fields_from_api, to_dynamic};
use crate::errors::{format_api_error, parse_id};
use crate::lookup::plural;
use crate::state::optional_string_to_state;
use crate::tags::tag_slugs;
use crate::NetBoxProviderData;

/// A NetBox object type exposed as a lookup data source
pub trait NetBoxQuery: Send + Sync + 'static {
    type Model: NetBoxModel + 'static;

    const TYPE_NAME: &'static str;
    const ENDPOINT: Endpoint;
    const DESCRIPTION: &'static str;
    /// Lookup attributes tried after `id`, in order of precedence
    const FILTERS: &'static [&'static str];
    /// Optional inputs sent alongside a lookup attribute as query filters
    /// of the same name
    const SCOPE: &'static [&'static str] = &[];
    const HAS_COMMENTS: bool = true;
    const TAGGED: bool = true;

    /// Object attributes; those named in `FILTERS` become optional inputs
    fn outputs() -> Outputs;

    fn state(model: &Self::Model, output: &mut Output);
}

/// Builder for the computed attributes of a data source
#[derive(Default)]
pub struct Outputs {
    attributes: Vec<Attribute>,
}

impl Outputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn computed(mut self, name: &str, r#type: AttributeType, description: &str) -> Self {
        self.attributes.push(
            AttributeBuilder::new(name, r#type)
                .description(description)
                .computed()
                .build(),
        );
        self
    }

    pub fn string(self, name: &str, description: &str) -> Self {
        self.computed(name, AttributeType::String, description)
    }

    pub fn number(self, name: &str, description: &str) -> Self {
        self.computed(name, AttributeType::Number, description)
    }

    pub fn bool(self, name: &str, description: &str) -> Self {
        self.computed(name, AttributeType::Bool, description)
    }

    /// Adds `<name>` holding the related object's name and `<name>_id`
    pub fn reference(self, name: &str, description: &str) -> Self {
        let id_description = format!("ID of the {}", description.to_lowercase());
        self.string(name, description)
            .number(&format!("{}_id", name), &id_description)
    }

    pub fn build(self) -> Vec<Attribute> {
        self.attributes
    }
}

/// Collects the state values of a data source
#[derive(Default)]
pub struct Output {
    values: HashMap<String, Dynamic>,
}

impl Output {
    pub fn set(&mut self, name: &str, value: impl Into<Dynamic>) -> &mut Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    pub fn string(&mut self, name: &str, value: &str) -> &mut Self {
        self.set(name, value)
    }

    pub fn optional_string(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        self.set(name, optional_string_to_state(value))
    }

    pub fn choice(&mut self, name: &str, value: Option<&Choice>) -> &mut Self {
        self.optional_string(name, value.map(|c| c.value.as_str()))
    }

    pub fn integer(&mut self, name: &str, value: Option<i64>) -> &mut Self {
        self.set(name, value)
    }

    pub fn number(&mut self, name: &str, value: Option<f64>) -> &mut Self {
        self.set(name, value)
    }

    pub fn bool(&mut self, name: &str, value: Option<bool>) -> &mut Self {
        self.set(name, value)
    }

    pub fn reference(&mut self, name: &str, value: Option<&NestedRef>) -> &mut Self {
        let id_name = format!("{}_id", name);
        match value {
            Some(related) => self
                .set(name, related.label())
                .set(&id_name, related.id),
            None => self.set(name, Dynamic::Null).set(&id_name, Dynamic::Null),
        }
    }

    fn build(mut self, schema: &Schema) -> DynamicValue {
        for attr in &schema.block.attributes {
            self.values
                .entry(attr.name.clone())
                .or_insert(Dynamic::Null);
        }
        DynamicValue::new(Dynamic::Map(self.values))
    }
}

/// How the object was selected
#[derive(Debug, Clone, PartialEq)]
enum Selector {
    Id(i64),
    Filter(&'static str, String),
}

pub struct NetBoxDataSource<T: NetBoxQuery> {
    provider_data: Option<NetBoxProviderData>,
    _object: PhantomData<fn() -> T>,
}

impl<T: NetBoxQuery> Default for NetBoxDataSource<T> {
    fn default() -> Self {
        Self {
            provider_data: None,
            _object: PhantomData,
        }
    }
}

impl<T: NetBoxQuery> NetBoxDataSource<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schema() -> Schema {
        let mut attributes = vec![AttributeBuilder::new("id", AttributeType::String)
            .description(format!("ID of the {}", T::ENDPOINT.kind.to_lowercase()))
            .optional()
            .computed()
            .build()];
        for mut attr in T::outputs().build() {
            if T::FILTERS.contains(&attr.name.as_str()) || T::SCOPE.contains(&attr.name.as_str()) {
                attr.optional = true;
            }
            attributes.push(attr);
        }
        attributes.push(
            AttributeBuilder::new("description", AttributeType::String)
                .computed()
                .build(),
        );
        if T::HAS_COMMENTS {
            attributes.push(
                AttributeBuilder::new("comments", AttributeType::String)
                    .computed()
                    .build(),
            );
        }
        if T::TAGGED {
            attributes.push(
                AttributeBuilder::new("tags", AttributeType::List(Box::new(AttributeType::String)))
                    .description("Slugs of the tags assigned to the object")
                    .computed()
                    .build(),
            );
            attributes.push(custom_fields_data_source_attribute());
        }

        SchemaBuilder::new()
            .version(0)
            .description(T::DESCRIPTION)
            .attributes(attributes)
            .build()
    }

    fn client(&self) -> Result<&Client, Diagnostic> {
        self.provider_data
            .as_ref()
            .map(|data| data.client.as_ref())
            .ok_or_else(|| {
                Diagnostic::error(
                    "Provider not configured",
                    "Provider data was not properly configured",
                )
            })
    }

    fn selector(config: &DynamicValue) -> Result<Selector, Diagnostic> {
        let kind = T::ENDPOINT.kind;

        if let Some(raw) = config_text(&config.get_value(&AttributePath::new("id"))) {
            return parse_id(&raw).map(Selector::Id).map_err(|e| {
                Diagnostic::error(
                    format!("Invalid {} ID", kind),
                    format!("The id must be a number: {}", e),
                )
                .with_attribute(AttributePath::new("id"))
            });
        }

        for filter in T::FILTERS {
            if let Some(value) = config_text(&config.get_value(&AttributePath::new(filter))) {
                return Ok(Selector::Filter(*filter, value));
            }
        }

        let mut names = vec!["id"];
        names.extend(T::FILTERS);
        Err(Diagnostic::error(
            format!("Missing {} Identifier", kind),
            format!("One of {} must be specified", names.join(", ")),
        ))
    }

    /// Scope filters set in the config
    fn scope(config: &DynamicValue) -> Vec<(&'static str, String)> {
        T::SCOPE
            .iter()
            .filter_map(|name| {
                config_text(&config.get_value(&AttributePath::new(name))).map(|value| (*name, value))
            })
            .collect()
    }

    async fn find(
        client: &Client,
        selector: &Selector,
        scope: &[(&'static str, String)],
    ) -> Result<T::Model, Diagnostic> {
        let endpoint = T::ENDPOINT;
        let kind = endpoint.kind;
        let failed = |e: &ApiError| {
            Diagnostic::error(
                format!("Error reading {}", T::TYPE_NAME),
                format_api_error(&format!("read {}", kind.to_lowercase()), e),
            )
        };

        match selector {
            Selector::Id(id) => {
                tracing::debug!("Reading {} by ID {}", T::TYPE_NAME, id);
                client
                    .retrieve::<T::Model>(&endpoint, *id)
                    .await
                    .map_err(|e| {
                        if e.is_not_found() {
                            Diagnostic::error(
                                format!("{} Not Found", kind),
                                format!("No {} found with ID: {}", kind.to_lowercase(), id),
                            )
                        } else {
                            failed(&e)
                        }
                    })
            }
            Selector::Filter(filter, value) => {
                tracing::debug!("Reading {} by {} {:?} {:?}", T::TYPE_NAME, filter, value, scope);
                let params = scope
                    .iter()
                    .fold(ApiQueryParams::new().add(*filter, value), |params, (name, value)| {
                        params.add(*name, value)
                    });
                let criteria = std::iter::once((*filter, value.as_str()))
                    .chain(scope.iter().map(|(name, value)| (*name, value.as_str())))
                    .map(|(name, value)| format!("{}: {}", name, value))
                    .collect::<Vec<_>>()
                    .join(", ");
                let page = client
                    .list::<T::Model>(&endpoint, &params)
                    .await
                    .map_err(|e| failed(&e))?;
                let count = page.results.len();
                match page.results.into_iter().next() {
                    Some(model) if count == 1 => Ok(model),
                    Some(_) => Err(Diagnostic::error(
                        format!("Multiple {} Found", plural(kind)),
                        format!(
                            "Found {} {} with {}. Use id to select one.",
                            count,
                            plural(&kind.to_lowercase()),
                            criteria
                        ),
                    )),
                    None => Err(Diagnostic::error(
                        format!("{} Not Found", kind),
                        format!("No {} found with {}", kind.to_lowercase(), criteria),
                    )),
                }
            }
        }
    }

    pub fn to_state(model: &T::Model) -> DynamicValue {
        let mut output = Output::default();
        output
            .string("id", &model.id().to_string())
            .optional_string("description", model.description());
        if T::HAS_COMMENTS {
            output.optional_string("comments", model.comments());
        }
        if T::TAGGED {
            let tags: Vec<Dynamic> = tag_slugs(model.tags())
                .into_iter()
                .map(Dynamic::String)
                .collect();
            output
                .set("tags", Dynamic::List(tags))
                .set("custom_fields", to_dynamic(&custom_fields_from_api(model.custom_fields())));
        }
        T::state(model, &mut output);
        output.build(&Self::schema())
    }
}

/// Known, non-empty config value as lookup text
fn config_text(value: &Dynamic) -> Option<String> {
    match value {
        Dynamic::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Dynamic::Number(n) => Some((*n as i64).to_string()),
        _ => None,
    }
}

#[async_trait]
impl<T: NetBoxQuery> DataSource for NetBoxDataSource<T> {
    fn type_name(&self) -> &str {
        T::TYPE_NAME
    }

    async fn schema(
        &self,
        _ctx: Context,
        _request: DataSourceSchemaRequest,
    ) -> DataSourceSchemaResponse {
        DataSourceSchemaResponse {
            schema: Self::schema(),
            diagnostics: vec![],
        }
    }

    async fn read(&self, ctx: Context, request: ReadDataSourceRequest) -> ReadDataSourceResponse {
        let client = match self.client() {
            Ok(client) => client,
            Err(diag) => return ReadDataSourceResponse::failed(request.config, diag),
        };
        let selector = match Self::selector(&request.config) {
            Ok(selector) => selector,
            Err(diag) => return ReadDataSourceResponse::failed(request.config, diag),
        };

        let scope = Self::scope(&request.config);

        match ctx.run(Self::find(client, &selector, &scope)).await {
            None => ReadDataSourceResponse::failed(
                request.config,
                Diagnostic::error(
                    "Operation Cancelled",
                    format!("read of {} was cancelled", T::TYPE_NAME),
                ),
            ),
            Some(Err(diag)) => ReadDataSourceResponse::failed(request.config, diag),
            Some(Ok(model)) => {
                tracing::debug!("Found {} {}", T::TYPE_NAME, model.id());
                ReadDataSourceResponse::new(Self::to_state(&model))
            }
        }
    }
}

#[async_trait]
impl<T: NetBoxQuery> DataSourceWithConfigure for NetBoxDataSource<T> {
    async fn configure(
        &mut self,
        _ctx: Context,
        request: ConfigureDataSourceRequest,
    ) -> ConfigureDataSourceResponse {
        let mut diagnostics = vec![];

        if let Some(data) = request.provider_data {
            if let Some(provider_data) = data.downcast_ref::<NetBoxProviderData>() {
                self.provider_data = Some(provider_data.clone());
            } else {
                diagnostics.push(Diagnostic::error(
                    "Invalid provider data",
                    "Failed to extract NetBoxProviderData from provider data",
                ));
            }
        } else {
            diagnostics.push(Diagnostic::error(
                "No provider data",
                "No provider data was provided to the data source",
            ));
        }

        ConfigureDataSourceResponse { diagnostics }
    }
}

fn register<T: NetBoxQuery>(factories: &mut HashMap<String, DataSourceFactory>) {
    factories.insert(
        T::TYPE_NAME.to_string(),
        Box::new(|| Box::new(NetBoxDataSource::<T>::new()) as Box<dyn DataSourceWithConfigure>),
    );
}

/// Factories for every data source, keyed by type name
pub fn factories() -> HashMap<String, DataSourceFactory> {
    let mut factories = HashMap::new();

    register::<tenancy::TenantGroup>(&mut factories);
    register::<tenancy::Tenant>(&mut factories);
    register::<dcim::Site>(&mut factories);
    register::<dcim::Device>(&mut factories);
    register::<ipam::Prefix>(&mut factories);
    register::<ipam::Vlan>(&mut factories);
    register::<ipam::Vrf>(&mut factories);
    register::<extras::Tag>(&mut factories);
    register::<dcim::ModuleType>(&mut factories);
    register::<dcim::ModuleBay>(&mut factories);
    register::<dcim::Module>(&mut factories);
    register::<dcim::Interface>(&mut factories);
    register::<dcim::Cable>(&mut factories);
    register::<ipam::IpRange>(&mut factories);
    register::<virtualization::VmInterface>(&mut factories);
    register::<virtualization::VirtualDisk>(&mut factories);
    register::<circuits::CircuitTermination>(&mut factories);

    factories
}
