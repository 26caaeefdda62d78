//! Wireless resources: wireless LAN groups and wireless LANs

use async_trait::async_trait;
use tfplug::schema::{Attribute, AttributeBuilder, AttributeType};
use tfplug::validator::StringLengthValidator;

use super::attributes;
use super::NetBoxObject;
use crate::api::common::CommonFields;
use crate::api::ipam::VLANS;
use crate::api::tenancy::TENANTS;
use crate::api::wireless::{self as api, WIRELESS_LANS, WIRELESS_LAN_GROUPS};
use crate::api::Endpoint;
use crate::state::{PlanReader, StateBuilder};

const WLAN_STATUSES: &[&str] = &["active", "reserved", "disabled", "deprecated"];
const AUTH_TYPES: &[&str] = &["open", "wep", "wpa-personal", "wpa-enterprise"];
const AUTH_CIPHERS: &[&str] = &["auto", "tkip", "aes"];

pub struct WirelessLanGroup;

#[async_trait]
impl NetBoxObject for WirelessLanGroup {
    type Model = api::WirelessLanGroup;
    type Request = api::WirelessLanGroupRequest;

    const TYPE_NAME: &'static str = "netbox_wireless_lan_group";
    const ENDPOINT: Endpoint = WIRELESS_LAN_GROUPS;
    const DESCRIPTION: &'static str = "Manages a wireless LAN group";
    const HAS_COMMENTS: bool = false;

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::name("Name of the wireless LAN group"),
            attributes::slug("URL-friendly unique identifier"),
            attributes::reference("parent", "Parent wireless LAN group"),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::WirelessLanGroupRequest {
            name: plan.string("name"),
            slug: plan.string("slug"),
            parent: plan.reference("parent", &WIRELESS_LAN_GROUPS).await,
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

pub struct WirelessLan;

#[async_trait]
impl NetBoxObject for WirelessLan {
    type Model = api::WirelessLan;
    type Request = api::WirelessLanRequest;

    const TYPE_NAME: &'static str = "netbox_wireless_lan";
    const ENDPOINT: Endpoint = WIRELESS_LANS;
    const DESCRIPTION: &'static str = "Manages a wireless LAN (SSID)";
    const NATURAL_KEY: &'static str = "ssid";

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::bounded_name("ssid", "Broadcast SSID", 32),
            attributes::reference("group", "Wireless LAN group"),
            attributes::status(WLAN_STATUSES),
            attributes::reference("vlan", "VLAN bridged to the wireless LAN"),
            attributes::reference("tenant", "Tenant owning the wireless LAN"),
            attributes::choice("auth_type", "Authentication type", AUTH_TYPES),
            attributes::choice("auth_cipher", "Authentication cipher", AUTH_CIPHERS),
            AttributeBuilder::new("auth_psk", AttributeType::String)
                .description("Pre-shared key")
                .optional()
                .sensitive()
                .validator(StringLengthValidator::at_most(64))
                .build(),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::WirelessLanRequest {
            ssid: plan.string("ssid"),
            group: plan.reference("group", &WIRELESS_LAN_GROUPS).await,
            status: plan.string("status"),
            vlan: plan.reference("vlan", &VLANS).await,
            tenant: plan.reference("tenant", &TENANTS).await,
            auth_type: plan.string("auth_type"),
            auth_cipher: plan.string("auth_cipher"),
            auth_psk: plan.string("auth_psk"),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .string("ssid", &model.ssid)
            .reference("group", model.group.as_ref())
            .choice("status", model.status.as_ref())
            .reference("vlan", model.vlan.as_ref())
            .reference("tenant", model.tenant.as_ref())
            .choice("auth_type", model.auth_type.as_ref())
            .choice("auth_cipher", model.auth_cipher.as_ref())
            .optional_string("auth_psk", model.auth_psk.as_deref());
    }
}

#[cfg(test)]
#[path = "./wireless_test.rs"]
mod wireless_test;
