//! Managed resources
//!
//! Every NetBox object type implements [`NetBoxObject`], which describes its
//! endpoint, its own attributes and how they map onto the API. The shared
//! lifecycle (CRUD, import, duplicate hints, 404 handling) lives in
//! [`NetBoxResource`].

pub mod attributes;
pub mod circuits;
pub mod dcim;
pub mod extras;
pub mod ipam;
pub mod tenancy;
pub mod virtualization;
pub mod vpn;
pub mod wireless;

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::marker::PhantomData;
use tfplug::context::Context;
use tfplug::provider::ResourceFactory;
use tfplug::resource::{
    ConfigureResourceRequest, ConfigureResourceResponse, CreateResourceRequest,
    CreateResourceResponse, DeleteResourceRequest, DeleteResourceResponse,
    ImportResourceStateRequest, ImportResourceStateResponse, ImportedResource,
    ReadResourceRequest, ReadResourceResponse, Resource, ResourceSchemaRequest,
    ResourceSchemaResponse, ResourceWithConfigure, ResourceWithImportState,
    UpdateResourceRequest, UpdateResourceResponse, ValidateResourceConfigRequest,
    ValidateResourceConfigResponse,
};
use tfplug::schema::{Attribute, Schema, SchemaBuilder};
use tfplug::types::{has_errors, AttributePath, Diagnostic, Dynamic, DynamicValue};

use crate::api::common::CommonFields;
use crate::api::{ApiError, Client, Endpoint, NetBoxModel};
use crate::errors::{duplicate_fields, format_api_error, parse_id, DuplicateObject};
use crate::state::{PlanReader, StateBuilder};
use crate::{custom_fields, tags, NetBoxProviderData};

/// A NetBox object type managed as a Terraform resource
#[async_trait]
pub trait NetBoxObject: Send + Sync + 'static {
    type Model: NetBoxModel + 'static;
    type Request: Serialize + Send + Sync;

    /// Full resource type name, e.g. `netbox_tenant`
    const TYPE_NAME: &'static str;
    const ENDPOINT: Endpoint;
    const DESCRIPTION: &'static str;
    /// Attribute used to find an existing object after a duplicate error
    const NATURAL_KEY: &'static str = "slug";
    const HAS_COMMENTS: bool = true;
    const TAGGED: bool = true;

    /// Object specific attributes; `id`, `description`, `comments`, `tags`
    /// and `custom_fields` are added by [`NetBoxResource`]
    fn attributes() -> Vec<Attribute>;

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request;

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>);

    /// Cross-attribute checks run at plan time
    fn validate(_config: &DynamicValue) -> Vec<Diagnostic> {
        Vec::new()
    }
}

pub struct NetBoxResource<T: NetBoxObject> {
    provider_data: Option<NetBoxProviderData>,
    _object: PhantomData<fn() -> T>,
}

impl<T: NetBoxObject> Default for NetBoxResource<T> {
    fn default() -> Self {
        Self {
            provider_data: None,
            _object: PhantomData,
        }
    }
}

impl<T: NetBoxObject> NetBoxResource<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schema() -> Schema {
        let mut builder = SchemaBuilder::new()
            .version(0)
            .description(T::DESCRIPTION)
            .attribute(attributes::id())
            .attributes(T::attributes())
            .attribute(attributes::description());
        if T::HAS_COMMENTS {
            builder = builder.attribute(attributes::comments());
        }
        if T::TAGGED {
            builder = builder
                .attribute(tags::tags_attribute())
                .attribute(custom_fields::custom_fields_attribute());
        }
        builder.build()
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

    /// Maps an API object into state, keeping reference formats from `current`
    pub fn to_state(model: &T::Model, current: &DynamicValue) -> DynamicValue {
        let mut state = StateBuilder::new(current);
        state
            .string("id", &model.id().to_string())
            .optional_string("description", model.description());
        if T::HAS_COMMENTS {
            state.optional_string("comments", model.comments());
        }
        if T::TAGGED {
            state.tags(model.tags()).custom_fields(model.custom_fields());
        }
        T::state(model, &mut state);
        state.build(&Self::schema())
    }

    async fn build_request(
        client: &Client,
        plan: &DynamicValue,
        prior: Option<&DynamicValue>,
    ) -> Result<T::Request, Vec<Diagnostic>> {
        let mut reader = PlanReader::new(client, plan, prior);
        let common = reader.common(T::HAS_COMMENTS, T::TAGGED).await;
        let body = T::request(&mut reader, common).await;
        let diagnostics = reader.into_diagnostics();
        if has_errors(&diagnostics) {
            Err(diagnostics)
        } else {
            Ok(body)
        }
    }

    fn state_id(state: &DynamicValue) -> Result<i64, Diagnostic> {
        let raw = state
            .get_value(&AttributePath::new("id"))
            .as_str()
            .unwrap_or_default()
            .to_string();
        parse_id(&raw).map_err(|e| {
            Diagnostic::error(format!("Invalid {} ID", T::ENDPOINT.kind), e.to_string())
                .with_attribute(AttributePath::new("id"))
        })
    }

    fn natural_key(plan: &DynamicValue) -> String {
        match plan.get_value(&AttributePath::new(T::NATURAL_KEY)) {
            Dynamic::String(s) => s,
            Dynamic::Number(n) => (n as i64).to_string(),
            _ => String::new(),
        }
    }

    fn cancelled(operation: &str) -> Diagnostic {
        Diagnostic::error(
            "Operation Cancelled",
            format!("{} of {} was cancelled", operation, T::TYPE_NAME),
        )
    }

    /// `progressive` names the failed step in the summary, e.g. "reading"
    fn api_error(progressive: &str, verb: &str, err: &ApiError) -> Diagnostic {
        Diagnostic::error(
            format!("Error {} {}", progressive, T::TYPE_NAME),
            format_api_error(&format!("{} {}", verb, T::ENDPOINT.kind.to_lowercase()), err),
        )
    }

    async fn create_error(
        client: &Client,
        plan: &DynamicValue,
        err: &ApiError,
    ) -> Diagnostic {
        let Some(fields) = duplicate_fields(err) else {
            return Self::api_error("creating", "create", err);
        };
        let endpoint = T::ENDPOINT;
        let key_value = Self::natural_key(plan);
        let duplicate = DuplicateObject {
            type_name: T::TYPE_NAME,
            endpoint: &endpoint,
            key_attribute: T::NATURAL_KEY,
            key_value: &key_value,
        };
        let existing = duplicate.find_existing(client).await;
        duplicate.diagnostic(fields, existing, client.base_url())
    }
}

#[async_trait]
impl<T: NetBoxObject> Resource for NetBoxResource<T> {
    fn type_name(&self) -> &str {
        T::TYPE_NAME
    }

    async fn schema(
        &self,
        _ctx: Context,
        _request: ResourceSchemaRequest,
    ) -> ResourceSchemaResponse {
        ResourceSchemaResponse {
            schema: Self::schema(),
            diagnostics: vec![],
        }
    }

    async fn validate(
        &self,
        _ctx: Context,
        request: ValidateResourceConfigRequest,
    ) -> ValidateResourceConfigResponse {
        ValidateResourceConfigResponse {
            diagnostics: T::validate(&request.config),
        }
    }

    async fn create(&self, ctx: Context, request: CreateResourceRequest) -> CreateResourceResponse {
        let failed = |diagnostics| CreateResourceResponse {
            new_state: DynamicValue::null(),
            private: vec![],
            diagnostics,
        };

        let client = match self.client() {
            Ok(client) => client,
            Err(diag) => return failed(vec![diag]),
        };
        let body = match Self::build_request(client, &request.planned_state, None).await {
            Ok(body) => body,
            Err(diagnostics) => return failed(diagnostics),
        };

        let endpoint = T::ENDPOINT;
        tracing::info!("Creating {}", T::TYPE_NAME);
        match ctx.run(client.create::<T::Model, _>(&endpoint, &body)).await {
            None => failed(vec![Self::cancelled("create")]),
            Some(Err(e)) => failed(vec![Self::create_error(client, &request.planned_state, &e).await]),
            Some(Ok(model)) => {
                tracing::info!("Created {} with ID {}", T::TYPE_NAME, model.id());
                CreateResourceResponse {
                    new_state: Self::to_state(&model, &request.planned_state),
                    private: vec![],
                    diagnostics: vec![],
                }
            }
        }
    }

    async fn read(&self, ctx: Context, request: ReadResourceRequest) -> ReadResourceResponse {
        let failed = |current_state, private, diagnostics| ReadResourceResponse {
            new_state: Some(current_state),
            diagnostics,
            private,
            deferred: None,
        };

        let client = match self.client() {
            Ok(client) => client,
            Err(diag) => return failed(request.current_state, request.private, vec![diag]),
        };
        let id = match Self::state_id(&request.current_state) {
            Ok(id) => id,
            Err(diag) => return failed(request.current_state, request.private, vec![diag]),
        };

        let endpoint = T::ENDPOINT;
        tracing::debug!("Reading {} {}", T::TYPE_NAME, id);
        match ctx.run(client.retrieve::<T::Model>(&endpoint, id)).await {
            None => failed(
                request.current_state,
                request.private,
                vec![Self::cancelled("read")],
            ),
            Some(Err(e)) if e.is_not_found() => {
                tracing::warn!(
                    "{} {} not found, removing from state",
                    T::TYPE_NAME,
                    id
                );
                ReadResourceResponse {
                    new_state: None,
                    diagnostics: vec![],
                    private: request.private,
                    deferred: None,
                }
            }
            Some(Err(e)) => failed(
                request.current_state,
                request.private,
                vec![Self::api_error("reading", "read", &e)],
            ),
            Some(Ok(model)) => ReadResourceResponse {
                new_state: Some(Self::to_state(&model, &request.current_state)),
                diagnostics: vec![],
                private: request.private,
                deferred: None,
            },
        }
    }

    async fn update(&self, ctx: Context, request: UpdateResourceRequest) -> UpdateResourceResponse {
        let failed = |prior_state, diagnostics| UpdateResourceResponse {
            new_state: prior_state,
            private: vec![],
            diagnostics,
        };

        let client = match self.client() {
            Ok(client) => client,
            Err(diag) => return failed(request.prior_state, vec![diag]),
        };
        let id = match Self::state_id(&request.prior_state) {
            Ok(id) => id,
            Err(diag) => return failed(request.prior_state, vec![diag]),
        };
        let body = match Self::build_request(
            client,
            &request.planned_state,
            Some(&request.prior_state),
        )
        .await
        {
            Ok(body) => body,
            Err(diagnostics) => return failed(request.prior_state, diagnostics),
        };

        let endpoint = T::ENDPOINT;
        tracing::info!("Updating {} {}", T::TYPE_NAME, id);
        match ctx.run(client.update::<T::Model, _>(&endpoint, id, &body)).await {
            None => failed(request.prior_state, vec![Self::cancelled("update")]),
            Some(Err(e)) => failed(request.prior_state, vec![Self::api_error("updating", "update", &e)]),
            Some(Ok(model)) => UpdateResourceResponse {
                new_state: Self::to_state(&model, &request.planned_state),
                private: vec![],
                diagnostics: vec![],
            },
        }
    }

    async fn delete(&self, ctx: Context, request: DeleteResourceRequest) -> DeleteResourceResponse {
        let mut response = DeleteResourceResponse::default();

        let client = match self.client() {
            Ok(client) => client,
            Err(diag) => {
                response.diagnostics.push(diag);
                return response;
            }
        };
        let id = match Self::state_id(&request.prior_state) {
            Ok(id) => id,
            Err(diag) => {
                response.diagnostics.push(diag);
                return response;
            }
        };

        let endpoint = T::ENDPOINT;
        tracing::info!("Deleting {} {}", T::TYPE_NAME, id);
        match ctx.run(client.destroy(&endpoint, id)).await {
            None => response.diagnostics.push(Self::cancelled("delete")),
            Some(Ok(())) => {}
            Some(Err(e)) if e.is_not_found() => {
                tracing::debug!("{} {} already deleted", T::TYPE_NAME, id);
            }
            Some(Err(e)) => response.diagnostics.push(Self::api_error("deleting", "delete", &e)),
        }
        response
    }

    fn as_import_state(&self) -> Option<&dyn ResourceWithImportState> {
        Some(self)
    }
}

#[async_trait]
impl<T: NetBoxObject> ResourceWithConfigure for NetBoxResource<T> {
    async fn configure(
        &mut self,
        _ctx: Context,
        request: ConfigureResourceRequest,
    ) -> ConfigureResourceResponse {
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
                "No provider data was provided to the resource",
            ));
        }

        ConfigureResourceResponse { diagnostics }
    }
}

#[async_trait]
impl<T: NetBoxObject> ResourceWithImportState for NetBoxResource<T> {
    async fn import_state(
        &self,
        ctx: Context,
        request: ImportResourceStateRequest,
    ) -> ImportResourceStateResponse {
        let mut response = ImportResourceStateResponse::default();

        let client = match self.client() {
            Ok(client) => client,
            Err(diag) => {
                response.diagnostics.push(diag);
                return response;
            }
        };
        let id = match parse_id(&request.id) {
            Ok(id) => id,
            Err(e) => {
                response.diagnostics.push(Diagnostic::error(
                    "Invalid Import ID",
                    format!("Could not import {}: {}", T::TYPE_NAME, e),
                ));
                return response;
            }
        };

        let endpoint = T::ENDPOINT;
        tracing::info!("Importing {} {}", T::TYPE_NAME, id);
        match ctx.run(client.retrieve::<T::Model>(&endpoint, id)).await {
            None => response.diagnostics.push(Self::cancelled("import")),
            Some(Err(e)) => response.diagnostics.push(Self::api_error("importing", "import", &e)),
            Some(Ok(model)) => response.imported_resources.push(ImportedResource {
                type_name: request.type_name,
                state: Self::to_state(&model, &DynamicValue::null()),
                private: vec![],
            }),
        }
        response
    }
}

fn register<T: NetBoxObject>(factories: &mut HashMap<String, ResourceFactory>) {
    factories.insert(
        T::TYPE_NAME.to_string(),
        Box::new(|| Box::new(NetBoxResource::<T>::new()) as Box<dyn ResourceWithConfigure>),
    );
}

/// Factories for every managed resource, keyed by type name
pub fn factories() -> HashMap<String, ResourceFactory> {
    let mut factories = HashMap::new();

    register::<tenancy::TenantGroup>(&mut factories);
    register::<tenancy::Tenant>(&mut factories);
    register::<tenancy::ContactGroup>(&mut factories);
    register::<tenancy::ContactRole>(&mut factories);
    register::<tenancy::Contact>(&mut factories);

    register::<dcim::Region>(&mut factories);
    register::<dcim::SiteGroup>(&mut factories);
    register::<dcim::Site>(&mut factories);
    register::<dcim::Location>(&mut factories);
    register::<dcim::Manufacturer>(&mut factories);
    register::<dcim::Platform>(&mut factories);
    register::<dcim::DeviceRole>(&mut factories);
    register::<dcim::DeviceType>(&mut factories);
    register::<dcim::RackRole>(&mut factories);
    register::<dcim::Rack>(&mut factories);
    register::<dcim::Device>(&mut factories);
    register::<dcim::ModuleType>(&mut factories);
    register::<dcim::ModuleBay>(&mut factories);
    register::<dcim::Module>(&mut factories);
    register::<dcim::Interface>(&mut factories);
    register::<dcim::Cable>(&mut factories);

    register::<ipam::Rir>(&mut factories);
    register::<ipam::Asn>(&mut factories);
    register::<ipam::Aggregate>(&mut factories);
    register::<ipam::Vrf>(&mut factories);
    register::<ipam::Role>(&mut factories);
    register::<ipam::VlanGroup>(&mut factories);
    register::<ipam::Vlan>(&mut factories);
    register::<ipam::Prefix>(&mut factories);
    register::<ipam::IpRange>(&mut factories);
    register::<ipam::IpAddress>(&mut factories);

    register::<circuits::Provider>(&mut factories);
    register::<circuits::CircuitType>(&mut factories);
    register::<circuits::Circuit>(&mut factories);
    register::<circuits::CircuitTermination>(&mut factories);

    register::<virtualization::ClusterType>(&mut factories);
    register::<virtualization::ClusterGroup>(&mut factories);
    register::<virtualization::Cluster>(&mut factories);
    register::<virtualization::VirtualMachine>(&mut factories);
    register::<virtualization::VmInterface>(&mut factories);
    register::<virtualization::VirtualDisk>(&mut factories);

    register::<extras::Tag>(&mut factories);

    register::<vpn::TunnelGroup>(&mut factories);
    register::<vpn::Tunnel>(&mut factories);

    register::<wireless::WirelessLanGroup>(&mut factories);
    register::<wireless::WirelessLan>(&mut factories);

    factories
}
