//! Tenancy resources: tenant groups, tenants and contacts

use async_trait::async_trait;
use tfplug::schema::Attribute;

use super::attributes;
use super::NetBoxObject;
use crate::api::common::CommonFields;
use crate::api::tenancy::{self as api, CONTACTS, CONTACT_GROUPS, CONTACT_ROLES, TENANTS, TENANT_GROUPS};
use crate::state::{PlanReader, StateBuilder};

pub struct TenantGroup;

#[async_trait]
impl NetBoxObject for TenantGroup {
    type Model = api::TenantGroup;
    type Request = api::TenantGroupRequest;

    const TYPE_NAME: &'static str = "netbox_tenant_group";
    const ENDPOINT: crate::api::Endpoint = TENANT_GROUPS;
    const DESCRIPTION: &'static str = "Manages a tenant group, a nestable container for tenants";
    const HAS_COMMENTS: bool = false;

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::name("Name of the tenant group"),
            attributes::slug("URL-friendly unique identifier"),
            attributes::reference("parent", "Parent tenant group"),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::TenantGroupRequest {
            name: plan.string("name"),
            slug: plan.string("slug"),
            parent: plan.reference("parent", &TENANT_GROUPS).await,
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .string("name", &model.name)
            .string("slug", &model.slug)
            .reference("parent", model.parent.as_ref());
    }
}

pub struct Tenant;

#[async_trait]
impl NetBoxObject for Tenant {
    type Model = api::Tenant;
    type Request = api::TenantRequest;

    const TYPE_NAME: &'static str = "netbox_tenant";
    const ENDPOINT: crate::api::Endpoint = TENANTS;
    const DESCRIPTION: &'static str =
        "Manages a tenant, the customer or department owning infrastructure objects";

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::name("Name of the tenant"),
            attributes::slug("URL-friendly unique identifier"),
            attributes::reference("group", "Tenant group"),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::TenantRequest {
            name: plan.string("name"),
            slug: plan.string("slug"),
            group: plan.reference("group", &TENANT_GROUPS).await,
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .string("name", &model.name)
            .string("slug", &model.slug)
            .reference("group", model.group.as_ref());
    }
}

pub struct ContactGroup;

#[async_trait]
impl NetBoxObject for ContactGroup {
    type Model = api::ContactGroup;
    type Request = api::ContactGroupRequest;

    const TYPE_NAME: &'static str = "netbox_contact_group";
    const ENDPOINT: crate::api::Endpoint = CONTACT_GROUPS;
    const DESCRIPTION: &'static str = "Manages a contact group";
    const HAS_COMMENTS: bool = false;

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::name("Name of the contact group"),
            attributes::slug("URL-friendly unique identifier"),
            attributes::reference("parent", "Parent contact group"),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::ContactGroupRequest {
            name: plan.string("name"),
            slug: plan.string("slug"),
            parent: plan.reference("parent", &CONTACT_GROUPS).await,
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .string("name", &model.name)
            .string("slug", &model.slug)
            .reference("parent", model.parent.as_ref());
    }
}

pub struct ContactRole;

#[async_trait]
impl NetBoxObject for ContactRole {
    type Model = api::ContactRole;
    type Request = api::ContactRoleRequest;

    const TYPE_NAME: &'static str = "netbox_contact_role";
    const ENDPOINT: crate::api::Endpoint = CONTACT_ROLES;
    const DESCRIPTION: &'static str = "Manages a contact role, e.g. billing or emergency";
    const HAS_COMMENTS: bool = false;

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::name("Name of the contact role"),
            attributes::slug("URL-friendly unique identifier"),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::ContactRoleRequest {
            name: plan.string("name"),
            slug: plan.string("slug"),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state.string("name", &model.name).string("slug", &model.slug);
    }
}

pub struct Contact;

#[async_trait]
impl NetBoxObject for Contact {
    type Model = api::Contact;
    type Request = api::ContactRequest;

    const TYPE_NAME: &'static str = "netbox_contact";
    const ENDPOINT: crate::api::Endpoint = CONTACTS;
    const DESCRIPTION: &'static str = "Manages a contact: a person or team reachable about objects";
    const NATURAL_KEY: &'static str = "name";

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::name("Full name of the contact"),
            attributes::reference("group", "Contact group"),
            attributes::bounded_text("title", "Job title", 100),
            attributes::bounded_text("phone", "Phone number", 50),
            attributes::bounded_text("email", "Email address", 254),
            attributes::bounded_text("address", "Postal address", 200),
            attributes::text("link", "URL of a related page"),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::ContactRequest {
            name: plan.string("name"),
            group: plan.reference("group", &CONTACT_GROUPS).await,
            title: plan.string("title"),
            phone: plan.string("phone"),
            email: plan.string("email"),
            address: plan.string("address"),
            link: plan.string("link"),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .string("name", &model.name)
            .reference("group", model.group.as_ref())
            .optional_string("title", model.title.as_deref())
            .optional_string("phone", model.phone.as_deref())
            .optional_string("email", model.email.as_deref())
            .optional_string("address", model.address.as_deref())
            .optional_string("link", model.link.as_deref());
    }
}

#[cfg(test)]
#[path = "./tenancy_test.rs"]
mod tenancy_test;
