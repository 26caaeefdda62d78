//! gRPC service implementation of the Terraform Plugin Protocol v6
//!
//! `GrpcProviderServer` adapts a [`Provider`] to the generated tonic service.
//! Resources and data sources are created from the provider's factories on
//! every RPC and configured with the provider data captured during
//! ConfigureProvider, so no resource instance outlives a single call.
//!
//! Besides dispatching, the service performs the work that
//! terraform-plugin-framework does on a provider's behalf: schema-driven
//! config validation, state upgrades, defaults, unknown marking for computed
//! attributes and attribute plan modifiers.

use crate::context::Context;
use crate::data_source::{
    ConfigureDataSourceRequest, DataSourceSchemaRequest, DataSourceWithConfigure,
    ReadDataSourceRequest, ValidateDataSourceConfigRequest,
};
use crate::error::{Result, TfplugError};
use crate::plan_modifier::values_equal;
use crate::proto;
use crate::provider::{
    ConfigureProviderRequest, DataSourceFactory, Provider, ProviderMetaSchemaRequest,
    ProviderMetadataRequest, ProviderSchemaRequest, ResourceFactory, StopProviderRequest,
    ValidateProviderConfigRequest,
};
use crate::resource::{
    ConfigureResourceRequest, CreateResourceRequest, DeleteResourceRequest,
    ImportResourceStateRequest, ModifyPlanRequest, ReadResourceRequest, ResourceSchemaRequest,
    ResourceWithConfigure, UpdateResourceRequest, ValidateResourceConfigRequest,
};
use crate::schema::{
    Attribute, AttributeType, Block, DefaultRequest, NestedBlock, NestingMode, PlanModifierRequest,
    Schema, StringKind, ValidatorRequest,
};
use crate::types::{
    has_errors, AttributePath, AttributePathStep, ClientCapabilities, Deferred, DeferredReason,
    Diagnostic, DiagnosticSeverity, Dynamic, DynamicValue, ServerCapabilities,
};
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::{Request, Response, Status};
use tracing::{debug, info, warn};

type ProviderData = Option<Arc<dyn Any + Send + Sync>>;

pub struct GrpcProviderServer<P: Provider> {
    provider: Arc<RwLock<P>>,
    provider_data: Arc<RwLock<ProviderData>>,
    resources: HashMap<String, ResourceFactory>,
    data_sources: HashMap<String, DataSourceFactory>,
    root: Context,
}

impl<P: Provider + 'static> GrpcProviderServer<P> {
    pub fn new(provider: P) -> Self {
        let resources = provider.resources();
        let data_sources = provider.data_sources();
        Self {
            provider: Arc::new(RwLock::new(provider)),
            provider_data: Arc::new(RwLock::new(None)),
            resources,
            data_sources,
            root: Context::new(),
        }
    }

    /// Context for a single RPC; cancelled when the provider is stopped
    fn context(&self) -> Context {
        self.root.child()
    }

    pub fn into_service(self) -> proto::ProviderServer<Self> {
        proto::ProviderServer::new(self)
    }

    #[allow(clippy::result_large_err)]
    fn new_resource(
        &self,
        type_name: &str,
    ) -> std::result::Result<Box<dyn ResourceWithConfigure>, Status> {
        self.resources
            .get(type_name)
            .map(|factory| factory())
            .ok_or_else(|| TfplugError::ResourceNotFound(type_name.to_string()).into())
    }

    #[allow(clippy::result_large_err)]
    fn new_data_source(
        &self,
        type_name: &str,
    ) -> std::result::Result<Box<dyn DataSourceWithConfigure>, Status> {
        self.data_sources
            .get(type_name)
            .map(|factory| factory())
            .ok_or_else(|| TfplugError::DataSourceNotFound(type_name.to_string()).into())
    }

    async fn configured_resource(
        &self,
        ctx: &Context,
        type_name: &str,
    ) -> std::result::Result<(Box<dyn ResourceWithConfigure>, Vec<Diagnostic>), Status> {
        let mut resource = self.new_resource(type_name)?;
        let provider_data = self.provider_data.read().await.clone();
        let response = resource
            .configure(ctx.clone(), ConfigureResourceRequest { provider_data })
            .await;
        Ok((resource, response.diagnostics))
    }

    async fn configured_data_source(
        &self,
        ctx: &Context,
        type_name: &str,
    ) -> std::result::Result<(Box<dyn DataSourceWithConfigure>, Vec<Diagnostic>), Status> {
        let mut data_source = self.new_data_source(type_name)?;
        let provider_data = self.provider_data.read().await.clone();
        let response = data_source
            .configure(ctx.clone(), ConfigureDataSourceRequest { provider_data })
            .await;
        Ok((data_source, response.diagnostics))
    }

    async fn resource_schema(
        &self,
        ctx: &Context,
        resource: &dyn ResourceWithConfigure,
    ) -> std::result::Result<Schema, Status> {
        let response = resource.schema(ctx.clone(), ResourceSchemaRequest).await;
        if has_errors(&response.diagnostics) {
            return Err(Status::internal(format!(
                "schema for {} has errors",
                resource.type_name()
            )));
        }
        Ok(response.schema)
    }
}

#[tonic::async_trait]
impl<P: Provider + 'static> proto::ProviderService for GrpcProviderServer<P> {
    async fn get_metadata(
        &self,
        _request: Request<proto::get_metadata::Request>,
    ) -> std::result::Result<Response<proto::get_metadata::Response>, Status> {
        let ctx = self.context();
        let provider = self.provider.read().await;
        let metadata = provider
            .metadata(ctx, ProviderMetadataRequest)
            .await;

        let mut resources: Vec<_> = self.resources.keys().cloned().collect();
        resources.sort();
        let mut data_sources: Vec<_> = self.data_sources.keys().cloned().collect();
        data_sources.sort();

        Ok(Response::new(proto::get_metadata::Response {
            server_capabilities: Some(server_capabilities_to_proto(
                &metadata.server_capabilities,
            )),
            diagnostics: vec![],
            data_sources: data_sources
                .into_iter()
                .map(|type_name| proto::get_metadata::DataSourceMetadata { type_name })
                .collect(),
            resources: resources
                .into_iter()
                .map(|type_name| proto::get_metadata::ResourceMetadata { type_name })
                .collect(),
        }))
    }

    async fn get_provider_schema(
        &self,
        _request: Request<proto::get_provider_schema::Request>,
    ) -> std::result::Result<Response<proto::get_provider_schema::Response>, Status> {
        let ctx = self.context();
        let provider = self.provider.read().await;

        let mut diagnostics = Vec::new();
        let provider_schema = provider.schema(ctx.clone(), ProviderSchemaRequest).await;
        diagnostics.extend(provider_schema.diagnostics);
        let meta_schema = provider
            .meta_schema(ctx.clone(), ProviderMetaSchemaRequest)
            .await;
        diagnostics.extend(meta_schema.diagnostics);
        let metadata = provider
            .metadata(ctx.clone(), ProviderMetadataRequest)
            .await;

        let mut resource_schemas = HashMap::new();
        for (type_name, factory) in &self.resources {
            let response = factory().schema(ctx.clone(), ResourceSchemaRequest).await;
            diagnostics.extend(response.diagnostics);
            resource_schemas.insert(type_name.clone(), schema_to_proto(&response.schema));
        }

        let mut data_source_schemas = HashMap::new();
        for (type_name, factory) in &self.data_sources {
            let response = factory().schema(ctx.clone(), DataSourceSchemaRequest).await;
            diagnostics.extend(response.diagnostics);
            data_source_schemas.insert(type_name.clone(), schema_to_proto(&response.schema));
        }

        debug!(
            resources = resource_schemas.len(),
            data_sources = data_source_schemas.len(),
            "GetProviderSchema"
        );

        Ok(Response::new(proto::get_provider_schema::Response {
            provider: Some(schema_to_proto(&provider_schema.schema)),
            resource_schemas,
            data_source_schemas,
            diagnostics: diagnostics_to_proto(diagnostics),
            provider_meta: meta_schema.schema.as_ref().map(schema_to_proto),
            server_capabilities: Some(server_capabilities_to_proto(
                &metadata.server_capabilities,
            )),
        }))
    }

    async fn validate_provider_config(
        &self,
        request: Request<proto::validate_provider_config::Request>,
    ) -> std::result::Result<Response<proto::validate_provider_config::Response>, Status> {
        let req = request.into_inner();
        let ctx = self.context();
        let config = decode_value(req.config)?;
        let provider = self.provider.read().await;

        let schema = provider.schema(ctx.clone(), ProviderSchemaRequest).await.schema;
        let mut diagnostics = validate_against_schema(&schema, &config);
        if !has_errors(&diagnostics) {
            let response = provider
                .validate(ctx, ValidateProviderConfigRequest { config })
                .await;
            diagnostics.extend(response.diagnostics);
        }

        Ok(Response::new(proto::validate_provider_config::Response {
            diagnostics: diagnostics_to_proto(diagnostics),
        }))
    }

    async fn validate_resource_config(
        &self,
        request: Request<proto::validate_resource_config::Request>,
    ) -> std::result::Result<Response<proto::validate_resource_config::Response>, Status> {
        let req = request.into_inner();
        let ctx = self.context();
        let config = decode_value(req.config)?;
        let resource = self.new_resource(&req.type_name)?;
        let schema = self.resource_schema(&ctx, resource.as_ref()).await?;

        let mut diagnostics = validate_against_schema(&schema, &config);
        if !has_errors(&diagnostics) {
            let response = resource
                .validate(
                    ctx,
                    ValidateResourceConfigRequest {
                        type_name: req.type_name,
                        config,
                        client_capabilities: client_capabilities_from_proto(
                            req.client_capabilities,
                        ),
                    },
                )
                .await;
            diagnostics.extend(response.diagnostics);
        }

        Ok(Response::new(proto::validate_resource_config::Response {
            diagnostics: diagnostics_to_proto(diagnostics),
        }))
    }

    async fn validate_data_resource_config(
        &self,
        request: Request<proto::validate_data_resource_config::Request>,
    ) -> std::result::Result<Response<proto::validate_data_resource_config::Response>, Status>
    {
        let req = request.into_inner();
        let ctx = self.context();
        let config = decode_value(req.config)?;
        let data_source = self.new_data_source(&req.type_name)?;
        let schema = data_source
            .schema(ctx.clone(), DataSourceSchemaRequest)
            .await
            .schema;

        let mut diagnostics = validate_against_schema(&schema, &config);
        if !has_errors(&diagnostics) {
            let response = data_source
                .validate(
                    ctx,
                    ValidateDataSourceConfigRequest {
                        type_name: req.type_name,
                        config,
                    },
                )
                .await;
            diagnostics.extend(response.diagnostics);
        }

        Ok(Response::new(proto::validate_data_resource_config::Response {
            diagnostics: diagnostics_to_proto(diagnostics),
        }))
    }

    async fn upgrade_resource_state(
        &self,
        request: Request<proto::upgrade_resource_state::Request>,
    ) -> std::result::Result<Response<proto::upgrade_resource_state::Response>, Status> {
        let req = request.into_inner();
        let ctx = self.context();
        let resource = self.new_resource(&req.type_name)?;
        let schema = self.resource_schema(&ctx, resource.as_ref()).await?;

        let raw = req.raw_state.unwrap_or_default();
        if raw.json.is_empty() {
            if raw.flatmap.is_empty() {
                return Ok(Response::new(proto::upgrade_resource_state::Response {
                    upgraded_state: Some(encode_value(&DynamicValue::null())?),
                    diagnostics: vec![],
                }));
            }
            let diagnostic = Diagnostic::error(
                "Unable to Upgrade Resource State",
                "This resource was stored in the legacy flatmap format, which is not supported.",
            );
            return Ok(Response::new(proto::upgrade_resource_state::Response {
                upgraded_state: None,
                diagnostics: diagnostics_to_proto(vec![diagnostic]),
            }));
        }

        let stored = DynamicValue::decode_json(&raw.json)?;
        let upgraded = upgrade_state(&schema, stored);
        debug!(
            type_name = %req.type_name,
            from_version = req.version,
            to_version = schema.version,
            "UpgradeResourceState"
        );

        Ok(Response::new(proto::upgrade_resource_state::Response {
            upgraded_state: Some(encode_value(&upgraded)?),
            diagnostics: vec![],
        }))
    }

    async fn configure_provider(
        &self,
        request: Request<proto::configure_provider::Request>,
    ) -> std::result::Result<Response<proto::configure_provider::Response>, Status> {
        let req = request.into_inner();
        let ctx = self.context();
        let config = decode_value(req.config)?;

        let mut provider = self.provider.write().await;
        let response = provider
            .configure(
                ctx,
                ConfigureProviderRequest {
                    terraform_version: req.terraform_version.clone(),
                    config,
                    client_capabilities: client_capabilities_from_proto(req.client_capabilities),
                },
            )
            .await;

        if !has_errors(&response.diagnostics) {
            *self.provider_data.write().await = response.provider_data;
            info!(terraform_version = %req.terraform_version, "provider configured");
        }

        Ok(Response::new(proto::configure_provider::Response {
            diagnostics: diagnostics_to_proto(response.diagnostics),
        }))
    }

    async fn read_resource(
        &self,
        request: Request<proto::read_resource::Request>,
    ) -> std::result::Result<Response<proto::read_resource::Response>, Status> {
        let req = request.into_inner();
        let ctx = self.context();
        let current_state = decode_value(req.current_state)?;
        let provider_meta = decode_optional_value(req.provider_meta)?;

        let (resource, mut diagnostics) = self.configured_resource(&ctx, &req.type_name).await?;
        if has_errors(&diagnostics) {
            return Ok(Response::new(proto::read_resource::Response {
                new_state: Some(encode_value(&current_state)?),
                diagnostics: diagnostics_to_proto(diagnostics),
                private: req.private,
                deferred: None,
            }));
        }

        let response = resource
            .read(
                ctx,
                ReadResourceRequest {
                    type_name: req.type_name.clone(),
                    current_state,
                    private: req.private,
                    provider_meta,
                    client_capabilities: client_capabilities_from_proto(req.client_capabilities),
                },
            )
            .await;
        diagnostics.extend(response.diagnostics);

        let new_state = match response.new_state {
            Some(state) => state,
            None => {
                debug!(type_name = %req.type_name, "resource no longer exists");
                DynamicValue::null()
            }
        };

        Ok(Response::new(proto::read_resource::Response {
            new_state: Some(encode_value(&new_state)?),
            diagnostics: diagnostics_to_proto(diagnostics),
            private: response.private,
            deferred: response.deferred.as_ref().map(deferred_to_proto),
        }))
    }

    async fn plan_resource_change(
        &self,
        request: Request<proto::plan_resource_change::Request>,
    ) -> std::result::Result<Response<proto::plan_resource_change::Response>, Status> {
        let req = request.into_inner();
        let ctx = self.context();
        let prior_state = decode_value(req.prior_state)?;
        let proposed = decode_value(req.proposed_new_state)?;
        let config = decode_value(req.config)?;
        let provider_meta = decode_optional_value(req.provider_meta)?;

        if proposed.is_null() {
            debug!(type_name = %req.type_name, "planning destroy");
            return Ok(Response::new(proto::plan_resource_change::Response {
                planned_state: Some(encode_value(&proposed)?),
                requires_replace: vec![],
                planned_private: req.prior_private,
                diagnostics: vec![],
                legacy_type_system: false,
                deferred: None,
            }));
        }

        let (resource, mut diagnostics) = self.configured_resource(&ctx, &req.type_name).await?;
        let schema = self.resource_schema(&ctx, resource.as_ref()).await?;

        let mut plan = plan_attributes(&schema, &prior_state, proposed, &config);
        diagnostics.append(&mut plan.diagnostics);
        let mut planned_private = req.prior_private.clone();

        if let Some(modifier) = resource.as_modify_plan() {
            if !has_errors(&diagnostics) {
                let response = modifier
                    .modify_plan(
                        ctx,
                        ModifyPlanRequest {
                            type_name: req.type_name.clone(),
                            config,
                            prior_state,
                            planned_state: plan.planned_state,
                            prior_private: req.prior_private,
                            provider_meta,
                        },
                    )
                    .await;
                plan.planned_state = response.planned_state;
                plan.requires_replace.extend(response.requires_replace);
                planned_private = response.planned_private;
                diagnostics.extend(response.diagnostics);
            }
        }

        plan.requires_replace.dedup();
        debug!(
            type_name = %req.type_name,
            requires_replace = plan.requires_replace.len(),
            "PlanResourceChange"
        );

        Ok(Response::new(proto::plan_resource_change::Response {
            planned_state: Some(encode_value(&plan.planned_state)?),
            requires_replace: plan.requires_replace.iter().map(path_to_proto).collect(),
            planned_private,
            diagnostics: diagnostics_to_proto(diagnostics),
            legacy_type_system: false,
            deferred: None,
        }))
    }

    async fn apply_resource_change(
        &self,
        request: Request<proto::apply_resource_change::Request>,
    ) -> std::result::Result<Response<proto::apply_resource_change::Response>, Status> {
        let req = request.into_inner();
        let ctx = self.context();
        let prior_state = decode_value(req.prior_state)?;
        let planned_state = decode_value(req.planned_state)?;
        let config = decode_value(req.config)?;
        let provider_meta = decode_optional_value(req.provider_meta)?;

        let (resource, mut diagnostics) = self.configured_resource(&ctx, &req.type_name).await?;
        if has_errors(&diagnostics) {
            return Ok(Response::new(proto::apply_resource_change::Response {
                new_state: Some(encode_value(&prior_state)?),
                private: req.planned_private,
                diagnostics: diagnostics_to_proto(diagnostics),
                legacy_type_system: false,
            }));
        }

        let (new_state, private) = match (prior_state.is_null(), planned_state.is_null()) {
            (true, false) => {
                info!(type_name = %req.type_name, "creating resource");
                let response = resource
                    .create(
                        ctx,
                        CreateResourceRequest {
                            type_name: req.type_name.clone(),
                            planned_state,
                            config,
                            planned_private: req.planned_private,
                            provider_meta,
                        },
                    )
                    .await;
                diagnostics.extend(response.diagnostics);
                // a failed create leaves null state unless the resource saved a partial object
                (response.new_state, response.private)
            }
            (false, true) => {
                info!(type_name = %req.type_name, "deleting resource");
                let response = resource
                    .delete(
                        ctx,
                        DeleteResourceRequest {
                            type_name: req.type_name.clone(),
                            prior_state: prior_state.clone(),
                            planned_private: req.planned_private.clone(),
                            provider_meta,
                        },
                    )
                    .await;
                let failed = has_errors(&response.diagnostics);
                diagnostics.extend(response.diagnostics);
                if failed {
                    (prior_state, req.planned_private)
                } else {
                    (DynamicValue::null(), Vec::new())
                }
            }
            (false, false) => {
                info!(type_name = %req.type_name, "updating resource");
                let response = resource
                    .update(
                        ctx,
                        UpdateResourceRequest {
                            type_name: req.type_name.clone(),
                            prior_state: prior_state.clone(),
                            planned_state,
                            config,
                            planned_private: req.planned_private.clone(),
                            provider_meta,
                        },
                    )
                    .await;
                let failed = has_errors(&response.diagnostics);
                diagnostics.extend(response.diagnostics);
                if failed {
                    (prior_state, req.planned_private)
                } else {
                    (response.new_state, response.private)
                }
            }
            (true, true) => (DynamicValue::null(), Vec::new()),
        };

        if has_errors(&diagnostics) {
            warn!(type_name = %req.type_name, "ApplyResourceChange returned errors");
        }

        Ok(Response::new(proto::apply_resource_change::Response {
            new_state: Some(encode_value(&new_state)?),
            private,
            diagnostics: diagnostics_to_proto(diagnostics),
            legacy_type_system: false,
        }))
    }

    async fn import_resource_state(
        &self,
        request: Request<proto::import_resource_state::Request>,
    ) -> std::result::Result<Response<proto::import_resource_state::Response>, Status> {
        let req = request.into_inner();
        let ctx = self.context();

        let (resource, mut diagnostics) = self.configured_resource(&ctx, &req.type_name).await?;
        let Some(importer) = resource.as_import_state() else {
            diagnostics.push(Diagnostic::error(
                "Resource Import Not Implemented",
                format!(
                    "This resource does not support import. Resource type: {}",
                    req.type_name
                ),
            ));
            return Ok(Response::new(proto::import_resource_state::Response {
                imported_resources: vec![],
                diagnostics: diagnostics_to_proto(diagnostics),
                deferred: None,
            }));
        };
        if has_errors(&diagnostics) {
            return Ok(Response::new(proto::import_resource_state::Response {
                imported_resources: vec![],
                diagnostics: diagnostics_to_proto(diagnostics),
                deferred: None,
            }));
        }

        info!(type_name = %req.type_name, id = %req.id, "importing resource");
        let response = importer
            .import_state(
                ctx,
                ImportResourceStateRequest {
                    type_name: req.type_name,
                    id: req.id,
                    client_capabilities: client_capabilities_from_proto(req.client_capabilities),
                },
            )
            .await;
        diagnostics.extend(response.diagnostics);

        let imported_resources = response
            .imported_resources
            .into_iter()
            .map(|imported| {
                Ok(proto::import_resource_state::ImportedResource {
                    type_name: imported.type_name,
                    state: Some(encode_value(&imported.state)?),
                    private: imported.private,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Response::new(proto::import_resource_state::Response {
            imported_resources,
            diagnostics: diagnostics_to_proto(diagnostics),
            deferred: response.deferred.as_ref().map(deferred_to_proto),
        }))
    }

    async fn read_data_source(
        &self,
        request: Request<proto::read_data_source::Request>,
    ) -> std::result::Result<Response<proto::read_data_source::Response>, Status> {
        let req = request.into_inner();
        let ctx = self.context();
        let config = decode_value(req.config)?;
        let provider_meta = decode_optional_value(req.provider_meta)?;

        let (data_source, mut diagnostics) =
            self.configured_data_source(&ctx, &req.type_name).await?;
        if has_errors(&diagnostics) {
            return Ok(Response::new(proto::read_data_source::Response {
                state: Some(encode_value(&config)?),
                diagnostics: diagnostics_to_proto(diagnostics),
                deferred: None,
            }));
        }

        debug!(type_name = %req.type_name, "ReadDataSource");
        let response = data_source
            .read(
                ctx,
                ReadDataSourceRequest {
                    type_name: req.type_name,
                    config,
                    provider_meta,
                    client_capabilities: client_capabilities_from_proto(req.client_capabilities),
                },
            )
            .await;
        diagnostics.extend(response.diagnostics);

        Ok(Response::new(proto::read_data_source::Response {
            state: Some(encode_value(&response.state)?),
            diagnostics: diagnostics_to_proto(diagnostics),
            deferred: response.deferred.as_ref().map(deferred_to_proto),
        }))
    }

    async fn stop_provider(
        &self,
        _request: Request<proto::stop_provider::Request>,
    ) -> std::result::Result<Response<proto::stop_provider::Response>, Status> {
        info!("stopping provider");
        let ctx = self.context();
        self.root.cancel();

        let provider = self.provider.read().await;
        let response = provider.stop(ctx, StopProviderRequest).await;

        Ok(Response::new(proto::stop_provider::Response {
            error: response.error.unwrap_or_default(),
        }))
    }
}

/// Outcome of the attribute-level planning steps
pub(crate) struct AttributePlan {
    pub planned_state: DynamicValue,
    pub requires_replace: Vec<AttributePath>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Defaults, unknown marking for computed attributes, then plan modifiers
pub(crate) fn plan_attributes(
    schema: &Schema,
    prior_state: &DynamicValue,
    proposed: DynamicValue,
    config: &DynamicValue,
) -> AttributePlan {
    let is_create = prior_state.is_null();
    let mut planned = proposed;
    let mut diagnostics = Vec::new();
    let mut requires_replace = Vec::new();

    for attr in &schema.block.attributes {
        let path = AttributePath::new(&attr.name);
        if let Some(default) = &attr.default {
            if config.get_value(&path).is_null() {
                let value = default
                    .default_value(DefaultRequest { path: path.clone() })
                    .value;
                set_or_report(&mut planned, &path, value.value, &mut diagnostics);
            }
        }
    }

    let changed = is_create
        || schema.block.attributes.iter().any(|attr| {
            let path = AttributePath::new(&attr.name);
            !values_equal(&planned.get_value(&path), &prior_state.get_value(&path))
        });

    if changed {
        for attr in &schema.block.attributes {
            let path = AttributePath::new(&attr.name);
            if attr.computed && attr.default.is_none() && config.get_value(&path).is_null() {
                set_or_report(&mut planned, &path, Dynamic::Unknown, &mut diagnostics);
            }
        }
    }

    for attr in &schema.block.attributes {
        let path = AttributePath::new(&attr.name);
        for modifier in &attr.plan_modifiers {
            let response = modifier.modify(PlanModifierRequest {
                config_value: DynamicValue::new(config.get_value(&path)),
                state_value: DynamicValue::new(prior_state.get_value(&path)),
                plan_value: DynamicValue::new(planned.get_value(&path)),
                path: path.clone(),
                is_create,
            });
            diagnostics.extend(response.diagnostics);
            set_or_report(&mut planned, &path, response.plan_value.value, &mut diagnostics);
            if response.requires_replace && !requires_replace.contains(&path) {
                requires_replace.push(path.clone());
            }
        }
    }

    AttributePlan {
        planned_state: planned,
        requires_replace,
        diagnostics,
    }
}

fn set_or_report(
    value: &mut DynamicValue,
    path: &AttributePath,
    new_value: Dynamic,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if let Err(e) = value.set_value(path, new_value) {
        diagnostics.push(
            Diagnostic::error("Error Planning Attribute", e.to_string()).with_attribute(path.clone()),
        );
    }
}

/// Schema-driven validation of a configuration object
///
/// Checks required attributes, undeclared attributes, value types and runs
/// each attribute's validators against known values. An unknown config
/// object (e.g. one depending on another resource) is skipped entirely.
pub fn validate_against_schema(schema: &Schema, config: &DynamicValue) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let values = match &config.value {
        Dynamic::Map(values) => values,
        Dynamic::Null | Dynamic::Unknown => return diagnostics,
        other => {
            diagnostics.push(Diagnostic::error(
                "Invalid Configuration",
                format!("Expected an object, got {}", other.type_name()),
            ));
            return diagnostics;
        }
    };

    for attr in &schema.block.attributes {
        let path = AttributePath::new(&attr.name);
        let value = values.get(&attr.name).unwrap_or(&Dynamic::Null);

        if attr.required && value.is_null() {
            diagnostics.push(
                Diagnostic::error(
                    "Missing required argument",
                    format!(
                        "The argument \"{}\" is required, but no definition was found.",
                        attr.name
                    ),
                )
                .with_attribute(path),
            );
            continue;
        }

        if value.is_null() {
            continue;
        }

        if attr.computed && !attr.optional && !attr.required {
            diagnostics.push(
                Diagnostic::error(
                    "Invalid Configuration for Read-Only Attribute",
                    format!(
                        "Cannot set value for attribute \"{}\" as it is computed by the provider.",
                        attr.name
                    ),
                )
                .with_attribute(path),
            );
            continue;
        }

        if !value_conforms(value, &attr.r#type) {
            diagnostics.push(
                Diagnostic::error(
                    "Incorrect attribute value type",
                    format!(
                        "Inappropriate value for attribute \"{}\": expected {}, got {}.",
                        attr.name,
                        type_label(&attr.r#type),
                        value.type_name()
                    ),
                )
                .with_attribute(path),
            );
            continue;
        }

        if value.is_known() {
            run_validators(attr, value, path, &mut diagnostics);
        }
    }

    let mut undeclared: Vec<_> = values
        .keys()
        .filter(|name| schema.attribute(name).is_none())
        .collect();
    undeclared.sort();
    for name in undeclared {
        diagnostics.push(
            Diagnostic::error(
                "Unsupported argument",
                format!("An argument named \"{}\" is not expected here.", name),
            )
            .with_attribute(AttributePath::new(name)),
        );
    }

    diagnostics
}

fn run_validators(
    attr: &Attribute,
    value: &Dynamic,
    path: AttributePath,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for validator in &attr.validators {
        let response = validator.validate(ValidatorRequest {
            config_value: DynamicValue::new(value.clone()),
            path: path.clone(),
        });
        diagnostics.extend(response.diagnostics);
    }
}

/// Null and unknown conform to every type
fn value_conforms(value: &Dynamic, expected: &AttributeType) -> bool {
    match (value, expected) {
        (Dynamic::Null | Dynamic::Unknown, _) => true,
        (Dynamic::String(_), AttributeType::String) => true,
        (Dynamic::Number(_), AttributeType::Number) => true,
        (Dynamic::Bool(_), AttributeType::Bool) => true,
        (Dynamic::List(items), AttributeType::List(elem) | AttributeType::Set(elem)) => {
            items.iter().all(|item| value_conforms(item, elem))
        }
        (Dynamic::Map(entries), AttributeType::Map(elem)) => {
            entries.values().all(|item| value_conforms(item, elem))
        }
        (Dynamic::Map(entries), AttributeType::Object(fields)) => {
            entries.keys().all(|key| fields.contains_key(key))
                && fields.iter().all(|(name, ty)| {
                    entries
                        .get(name)
                        .is_none_or(|item| value_conforms(item, ty))
                })
        }
        _ => false,
    }
}

fn type_label(ty: &AttributeType) -> String {
    match ty {
        AttributeType::String => "string".to_string(),
        AttributeType::Number => "number".to_string(),
        AttributeType::Bool => "bool".to_string(),
        AttributeType::List(elem) => format!("list of {}", type_label(elem)),
        AttributeType::Set(elem) => format!("set of {}", type_label(elem)),
        AttributeType::Map(elem) => format!("map of {}", type_label(elem)),
        AttributeType::Object(_) => "object".to_string(),
    }
}

/// Align stored JSON state with the current schema
///
/// Attributes no longer declared are dropped; newly declared ones are added
/// as null.
pub(crate) fn upgrade_state(schema: &Schema, stored: DynamicValue) -> DynamicValue {
    let mut stored = match stored.value {
        Dynamic::Map(values) => values,
        _ => HashMap::new(),
    };

    let upgraded = schema
        .block
        .attributes
        .iter()
        .map(|attr| {
            let value = stored.remove(&attr.name).unwrap_or(Dynamic::Null);
            (attr.name.clone(), value)
        })
        .collect();

    DynamicValue::new(Dynamic::Map(upgraded))
}

fn decode_value(value: Option<proto::DynamicValue>) -> Result<DynamicValue> {
    match value {
        Some(v) if !v.msgpack.is_empty() => DynamicValue::decode_msgpack(&v.msgpack),
        Some(v) if !v.json.is_empty() => DynamicValue::decode_json(&v.json),
        _ => Ok(DynamicValue::null()),
    }
}

fn decode_optional_value(value: Option<proto::DynamicValue>) -> Result<Option<DynamicValue>> {
    match value {
        Some(v) => decode_value(Some(v)).map(Some),
        None => Ok(None),
    }
}

fn encode_value(value: &DynamicValue) -> Result<proto::DynamicValue> {
    Ok(proto::DynamicValue {
        msgpack: value.encode_msgpack()?,
        json: vec![],
    })
}

fn string_kind_to_proto(kind: StringKind) -> i32 {
    match kind {
        StringKind::Plain => proto::StringKind::Plain as i32,
        StringKind::Markdown => proto::StringKind::Markdown as i32,
    }
}

fn schema_to_proto(schema: &Schema) -> proto::Schema {
    proto::Schema {
        version: schema.version,
        block: Some(block_to_proto(&schema.block)),
    }
}

fn block_to_proto(block: &Block) -> proto::schema::Block {
    proto::schema::Block {
        version: block.version,
        attributes: block.attributes.iter().map(attribute_to_proto).collect(),
        block_types: block.block_types.iter().map(nested_block_to_proto).collect(),
        description: block.description.clone(),
        description_kind: string_kind_to_proto(block.description_kind),
        deprecated: block.deprecated,
    }
}

fn attribute_to_proto(attr: &Attribute) -> proto::schema::Attribute {
    proto::schema::Attribute {
        name: attr.name.clone(),
        r#type: attr.r#type.to_bytes(),
        nested_type: None,
        description: attr.description.clone(),
        required: attr.required,
        optional: attr.optional,
        computed: attr.computed,
        sensitive: attr.sensitive,
        description_kind: proto::StringKind::Plain as i32,
        deprecated: attr.deprecated,
        write_only: false,
    }
}

fn nested_block_to_proto(nested: &NestedBlock) -> proto::schema::NestedBlock {
    use proto::schema::nested_block::NestingMode as Mode;

    let nesting = match nested.nesting {
        NestingMode::Invalid => Mode::Invalid,
        NestingMode::Single => Mode::Single,
        NestingMode::List => Mode::List,
        NestingMode::Set => Mode::Set,
        NestingMode::Map => Mode::Map,
        NestingMode::Group => Mode::Group,
    };

    proto::schema::NestedBlock {
        type_name: nested.type_name.clone(),
        block: Some(block_to_proto(&nested.block)),
        nesting: nesting as i32,
        min_items: nested.min_items,
        max_items: nested.max_items,
    }
}

fn path_to_proto(path: &AttributePath) -> proto::AttributePath {
    use proto::attribute_path::step::Selector;

    proto::AttributePath {
        steps: path
            .steps
            .iter()
            .map(|step| proto::attribute_path::Step {
                selector: Some(match step {
                    AttributePathStep::AttributeName(name) => Selector::AttributeName(name.clone()),
                    AttributePathStep::ElementKeyString(key) => {
                        Selector::ElementKeyString(key.clone())
                    }
                    AttributePathStep::ElementKeyInt(idx) => Selector::ElementKeyInt(*idx),
                }),
            })
            .collect(),
    }
}

fn diagnostics_to_proto(diagnostics: Vec<Diagnostic>) -> Vec<proto::Diagnostic> {
    use proto::diagnostic::Severity;

    diagnostics
        .into_iter()
        .map(|d| proto::Diagnostic {
            severity: match d.severity {
                DiagnosticSeverity::Invalid => Severity::Invalid as i32,
                DiagnosticSeverity::Error => Severity::Error as i32,
                DiagnosticSeverity::Warning => Severity::Warning as i32,
            },
            summary: d.summary,
            detail: d.detail,
            attribute: d.attribute.as_ref().map(path_to_proto),
        })
        .collect()
}

fn server_capabilities_to_proto(caps: &ServerCapabilities) -> proto::ServerCapabilities {
    proto::ServerCapabilities {
        plan_destroy: caps.plan_destroy,
        get_provider_schema_optional: caps.get_provider_schema_optional,
        move_resource_state: caps.move_resource_state,
    }
}

fn client_capabilities_from_proto(caps: Option<proto::ClientCapabilities>) -> ClientCapabilities {
    caps.map(|c| ClientCapabilities {
        deferral_allowed: c.deferral_allowed,
        write_only_attributes_allowed: c.write_only_attributes_allowed,
    })
    .unwrap_or_default()
}

fn deferred_to_proto(deferred: &Deferred) -> proto::Deferred {
    use proto::deferred::Reason;

    let reason = match deferred.reason {
        DeferredReason::Unknown => Reason::Unknown,
        DeferredReason::ResourceConfigUnknown => Reason::ResourceConfigUnknown,
        DeferredReason::ProviderConfigUnknown => Reason::ProviderConfigUnknown,
        DeferredReason::AbsentPrereq => Reason::AbsentPrereq,
    };
    proto::Deferred {
        reason: reason as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::StaticDefault;
    use crate::plan_modifier::{RequiresReplaceIfChanged, UseStateForUnknown};
    use crate::schema::{AttributeBuilder, SchemaBuilder};
    use crate::validator::StringLengthValidator;

    fn tenant_schema() -> Schema {
        SchemaBuilder::new()
            .attribute(
                AttributeBuilder::new("id", AttributeType::String)
                    .computed()
                    .plan_modifier(UseStateForUnknown::create())
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("name", AttributeType::String)
                    .required()
                    .validator(StringLengthValidator::between(1, 10))
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("slug", AttributeType::String)
                    .required()
                    .plan_modifier(RequiresReplaceIfChanged::create())
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("status", AttributeType::String)
                    .optional()
                    .computed()
                    .default(StaticDefault::string("active"))
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("tags", AttributeType::Set(Box::new(AttributeType::String)))
                    .optional()
                    .build(),
            )
            .build()
    }

    fn object(pairs: &[(&str, Dynamic)]) -> DynamicValue {
        DynamicValue::new(Dynamic::Map(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        ))
    }

    #[test]
    fn validation_reports_missing_required_and_unknown_attributes() {
        let config = object(&[("name", "edge".into()), ("colour", "red".into())]);

        let diags = validate_against_schema(&tenant_schema(), &config);
        let summaries: Vec<_> = diags.iter().map(|d| d.summary.as_str()).collect();

        assert!(summaries.contains(&"Missing required argument"));
        assert!(summaries.contains(&"Unsupported argument"));
        assert_eq!(diags.len(), 2);
    }

    #[test]
    fn validation_treats_unknown_as_present() {
        let config = object(&[("name", "edge".into()), ("slug", Dynamic::Unknown)]);
        assert!(validate_against_schema(&tenant_schema(), &config).is_empty());
    }

    #[test]
    fn validation_checks_types_and_runs_validators() {
        let config = object(&[
            ("name", "a-name-that-is-too-long".into()),
            ("slug", Dynamic::Number(3.0)),
        ]);

        let diags = validate_against_schema(&tenant_schema(), &config);
        let summaries: Vec<_> = diags.iter().map(|d| d.summary.as_str()).collect();

        assert!(summaries.contains(&"Invalid Attribute Value Length"));
        assert!(summaries.contains(&"Incorrect attribute value type"));
    }

    #[test]
    fn validation_rejects_setting_computed_only_attribute() {
        let config = object(&[
            ("id", "7".into()),
            ("name", "edge".into()),
            ("slug", "edge".into()),
        ]);

        let diags = validate_against_schema(&tenant_schema(), &config);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].summary, "Invalid Configuration for Read-Only Attribute");
    }

    #[test]
    fn create_plan_applies_defaults_and_marks_computed_unknown() {
        let config = object(&[("name", "edge".into()), ("slug", "edge".into())]);
        let proposed = object(&[
            ("id", Dynamic::Null),
            ("name", "edge".into()),
            ("slug", "edge".into()),
            ("status", Dynamic::Null),
            ("tags", Dynamic::Null),
        ]);

        let plan = plan_attributes(&tenant_schema(), &DynamicValue::null(), proposed, &config);

        assert!(plan.diagnostics.is_empty());
        assert!(plan.requires_replace.is_empty());
        let state = plan.planned_state;
        assert!(state.get_value(&AttributePath::new("id")).is_unknown());
        assert_eq!(state.get_string(&AttributePath::new("status")).unwrap(), "active");
        assert!(state.get_value(&AttributePath::new("tags")).is_null());
    }

    #[test]
    fn update_plan_keeps_id_and_flags_slug_replacement() {
        let prior = object(&[
            ("id", "12".into()),
            ("name", "edge".into()),
            ("slug", "edge".into()),
            ("status", "active".into()),
            ("tags", Dynamic::Null),
        ]);
        let config = object(&[("name", "edge".into()), ("slug", "core".into())]);
        let proposed = object(&[
            ("id", "12".into()),
            ("name", "edge".into()),
            ("slug", "core".into()),
            ("status", "active".into()),
            ("tags", Dynamic::Null),
        ]);

        let plan = plan_attributes(&tenant_schema(), &prior, proposed, &config);

        assert_eq!(plan.requires_replace, vec![AttributePath::new("slug")]);
        assert_eq!(
            plan.planned_state.get_string(&AttributePath::new("id")).unwrap(),
            "12"
        );
    }

    #[test]
    fn unchanged_plan_keeps_prior_values() {
        let prior = object(&[
            ("id", "12".into()),
            ("name", "edge".into()),
            ("slug", "edge".into()),
            ("status", "active".into()),
            ("tags", Dynamic::Null),
        ]);
        let config = object(&[("name", "edge".into()), ("slug", "edge".into())]);

        let plan = plan_attributes(&tenant_schema(), &prior, prior.clone(), &config);

        assert_eq!(plan.planned_state, prior);
        assert!(plan.requires_replace.is_empty());
    }

    #[test]
    fn upgrade_drops_removed_and_adds_missing_attributes() {
        let stored =
            DynamicValue::decode_json(br#"{"id":"3","name":"edge","slug":"edge","legacy":true}"#)
                .unwrap();

        let upgraded = upgrade_state(&tenant_schema(), stored);
        let map = upgraded.value.as_map().unwrap();

        assert!(!map.contains_key("legacy"));
        assert_eq!(map.get("status"), Some(&Dynamic::Null));
        assert_eq!(map.get("name"), Some(&Dynamic::String("edge".to_string())));
        assert_eq!(map.len(), 5);
    }

    #[test]
    fn decode_prefers_msgpack_and_treats_missing_as_null() {
        assert!(decode_value(None).unwrap().is_null());

        let value = object(&[("name", "edge".into())]);
        let encoded = encode_value(&value).unwrap();
        assert_eq!(decode_value(Some(encoded)).unwrap(), value);

        let json = proto::DynamicValue {
            msgpack: vec![],
            json: br#"{"name":"edge"}"#.to_vec(),
        };
        assert_eq!(decode_value(Some(json)).unwrap(), value);
    }

    #[test]
    fn object_type_conformance_rejects_undeclared_fields() {
        let ty = AttributeType::object([("name", AttributeType::String)]);
        let good = Dynamic::Map([("name".to_string(), Dynamic::from("x"))].into());
        let bad = Dynamic::Map([("nom".to_string(), Dynamic::from("x"))].into());

        assert!(value_conforms(&good, &ty));
        assert!(!value_conforms(&bad, &ty));
    }
}
