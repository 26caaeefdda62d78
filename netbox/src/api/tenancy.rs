//! Tenancy models: tenants, tenant groups and contacts

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{netbox_model, nullable, CommonFields, Endpoint, NestedRef, NestedTag};

pub const TENANT_GROUPS: Endpoint = Endpoint::new("tenancy", "tenant-groups", "Tenant Group");
pub const TENANTS: Endpoint = Endpoint::new("tenancy", "tenants", "Tenant");
pub const CONTACT_GROUPS: Endpoint = Endpoint::new("tenancy", "contact-groups", "Contact Group");
pub const CONTACT_ROLES: Endpoint = Endpoint::new("tenancy", "contact-roles", "Contact Role");
pub const CONTACTS: Endpoint = Endpoint::new("tenancy", "contacts", "Contact").without_slug();

#[derive(Debug, Clone, Deserialize)]
pub struct TenantGroup {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub parent: Option<NestedRef>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub tags: Vec<NestedTag>,
    #[serde(default, deserialize_with = "nullable")]
    pub custom_fields: Map<String, Value>,
    #[serde(default)]
    pub tenant_count: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TenantGroupRequest {
    pub name: String,
    pub slug: String,
    pub parent: Option<i64>,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tenant {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub group: Option<NestedRef>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub tags: Vec<NestedTag>,
    #[serde(default, deserialize_with = "nullable")]
    pub custom_fields: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TenantRequest {
    pub name: String,
    pub slug: String,
    pub group: Option<i64>,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactGroup {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub parent: Option<NestedRef>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub tags: Vec<NestedTag>,
    #[serde(default, deserialize_with = "nullable")]
    pub custom_fields: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactGroupRequest {
    pub name: String,
    pub slug: String,
    pub parent: Option<i64>,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactRole {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub tags: Vec<NestedTag>,
    #[serde(default, deserialize_with = "nullable")]
    pub custom_fields: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactRoleRequest {
    pub name: String,
    pub slug: String,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Contact {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub name: String,
    #[serde(default)]
    pub group: Option<NestedRef>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub tags: Vec<NestedTag>,
    #[serde(default, deserialize_with = "nullable")]
    pub custom_fields: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactRequest {
    pub name: String,
    pub group: Option<i64>,
    pub title: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub link: String,
    #[serde(flatten)]
    pub common: CommonFields,
}

netbox_model!(TenantGroup, Tenant, ContactGroup, ContactRole, Contact);
