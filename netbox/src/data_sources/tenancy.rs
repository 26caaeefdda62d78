//! Tenancy lookups

use super::{NetBoxQuery, Output, Outputs};
use crate::api::tenancy::{self as api, TENANTS, TENANT_GROUPS};
use crate::api::Endpoint;

pub struct TenantGroup;

impl NetBoxQuery for TenantGroup {
    type Model = api::TenantGroup;

    const TYPE_NAME: &'static str = "netbox_tenant_group";
    const ENDPOINT: Endpoint = TENANT_GROUPS;
    const DESCRIPTION: &'static str = "Looks up a tenant group by ID, slug or name";
    const FILTERS: &'static [&'static str] = &["slug", "name"];
    const HAS_COMMENTS: bool = false;

    fn outputs() -> Outputs {
        Outputs::new()
            .string("name", "Name of the tenant group")
            .string("slug", "URL-friendly unique identifier")
            .reference("parent", "Parent tenant group")
            .number("tenant_count", "Number of tenants in the group")
    }

    fn state(model: &Self::Model, output: &mut Output) {
        output
            .string("name", &model.name)
            .string("slug", &model.slug)
            .reference("parent", model.parent.as_ref())
            .integer("tenant_count", model.tenant_count);
    }
}

pub struct Tenant;

impl NetBoxQuery for Tenant {
    type Model = api::Tenant;

    const TYPE_NAME: &'static str = "netbox_tenant";
    const ENDPOINT: Endpoint = TENANTS;
    const DESCRIPTION: &'static str = "Looks up a tenant by ID, slug or name";
    const FILTERS: &'static [&'static str] = &["slug", "name"];

    fn outputs() -> Outputs {
        Outputs::new()
            .string("name", "Name of the tenant")
            .string("slug", "URL-friendly unique identifier")
            .reference("group", "Tenant group")
    }

    fn state(model: &Self::Model, output: &mut Output) {
        output
            .string("name", &model.name)
            .string("slug", &model.slug)
            .reference("group", model.group.as_ref());
    }
}
