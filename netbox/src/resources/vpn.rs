//! VPN resources: tunnel groups and tunnels

use async_trait::async_trait;
use tfplug::schema::Attribute;

use super::attributes;
use super::NetBoxObject;
use crate::api::common::CommonFields;
use crate::api::tenancy::TENANTS;
use crate::api::vpn::{self as api, TUNNELS, TUNNEL_GROUPS};
use crate::api::Endpoint;
use crate::state::{PlanReader, StateBuilder};

const TUNNEL_STATUSES: &[&str] = &["planned", "active", "disabled"];
const ENCAPSULATIONS: &[&str] = &[
    "ipsec-transport",
    "ipsec-tunnel",
    "ip-ip",
    "gre",
    "wireguard",
    "openvpn",
    "l2tp",
    "pptp",
];

pub struct TunnelGroup;

#[async_trait]
impl NetBoxObject for TunnelGroup {
    type Model = api::TunnelGroup;
    type Request = api::TunnelGroupRequest;

    const TYPE_NAME: &'static str = "netbox_tunnel_group";
    const ENDPOINT: Endpoint = TUNNEL_GROUPS;
    const DESCRIPTION: &'static str = "Manages a tunnel group";
    const HAS_COMMENTS: bool = false;

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::name("Name of the tunnel group"),
            attributes::slug("URL-friendly unique identifier"),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::TunnelGroupRequest {
            name: plan.string("name"),
            slug: plan.string("slug"),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state.string("name", &model.name).string("slug", &model.slug);
    }
}

pub struct Tunnel;

#[async_trait]
impl NetBoxObject for Tunnel {
    type Model = api::Tunnel;
    type Request = api::TunnelRequest;

    const TYPE_NAME: &'static str = "netbox_tunnel";
    const ENDPOINT: Endpoint = TUNNELS;
    const DESCRIPTION: &'static str = "Manages a VPN tunnel";
    const NATURAL_KEY: &'static str = "name";

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::name("Name of the tunnel"),
            attributes::status(TUNNEL_STATUSES),
            attributes::reference("group", "Tunnel group"),
            attributes::choice("encapsulation", "Encapsulation protocol", ENCAPSULATIONS),
            attributes::reference("tenant", "Tenant owning the tunnel"),
            attributes::integer("tunnel_id", "Numeric tunnel identifier", 0, i64::from(u32::MAX)),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::TunnelRequest {
            name: plan.string("name"),
            status: plan.string("status"),
            group: plan.reference("group", &TUNNEL_GROUPS).await,
            encapsulation: plan.string("encapsulation"),
            tenant: plan.reference("tenant", &TENANTS).await,
            tunnel_id: plan.integer("tunnel_id"),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .string("name", &model.name)
            .choice("status", model.status.as_ref())
            .reference("group", model.group.as_ref())
            .choice("encapsulation", model.encapsulation.as_ref())
            .reference("tenant", model.tenant.as_ref())
            .integer("tunnel_id", model.tunnel_id);
    }
}

#[cfg(test)]
#[path = "./vpn_test.rs"]
mod vpn_test;
