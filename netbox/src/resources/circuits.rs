//! Circuit resources: providers, circuit types, circuits and their terminations

use async_trait::async_trait;
use tfplug::schema::{Attribute, AttributeBuilder, AttributeType};
use tfplug::types::{AttributePath, Diagnostic, DynamicValue};
use tfplug::validator::OneOfValidator;

use super::attributes;
use super::NetBoxObject;
use crate::api::circuits::{
    self as api, CIRCUITS, CIRCUIT_TERMINATIONS, CIRCUIT_TYPES, PROVIDERS, PROVIDER_NETWORKS,
};
use crate::api::dcim::SITES;
use crate::api::common::CommonFields;
use crate::api::tenancy::TENANTS;
use crate::api::Endpoint;
use crate::state::{PlanReader, StateBuilder};

const CIRCUIT_STATUSES: &[&str] = &[
    "planned",
    "provisioning",
    "active",
    "offline",
    "deprovisioning",
    "decommissioned",
];

pub struct Provider;

#[async_trait]
impl NetBoxObject for Provider {
    type Model = api::Provider;
    type Request = api::ProviderRequest;

    const TYPE_NAME: &'static str = "netbox_provider";
    const ENDPOINT: Endpoint = PROVIDERS;
    const DESCRIPTION: &'static str = "Manages a circuit provider, e.g. a carrier or ISP";

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::name("Name of the provider"),
            attributes::slug("URL-friendly unique identifier"),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::ProviderRequest {
            name: plan.string("name"),
            slug: plan.string("slug"),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state.string("name", &model.name).string("slug", &model.slug);
    }
}

pub struct CircuitType;

#[async_trait]
impl NetBoxObject for CircuitType {
    type Model = api::CircuitType;
    type Request = api::CircuitTypeRequest;

    const TYPE_NAME: &'static str = "netbox_circuit_type";
    const ENDPOINT: Endpoint = CIRCUIT_TYPES;
    const DESCRIPTION: &'static str = "Manages a circuit type, e.g. transit or MPLS";
    const HAS_COMMENTS: bool = false;

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::name("Name of the circuit type"),
            attributes::slug("URL-friendly unique identifier"),
            attributes::color(),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::CircuitTypeRequest {
            name: plan.string("name"),
            slug: plan.string("slug"),
            color: plan.optional_string("color"),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .string("name", &model.name)
            .string("slug", &model.slug)
            .optional_string("color", model.color.as_deref());
    }
}

pub struct Circuit;

#[async_trait]
impl NetBoxObject for Circuit {
    type Model = api::Circuit;
    type Request = api::CircuitRequest;

    const TYPE_NAME: &'static str = "netbox_circuit";
    const ENDPOINT: Endpoint = CIRCUITS;
    const DESCRIPTION: &'static str = "Manages a communications circuit from a provider";
    const NATURAL_KEY: &'static str = "cid";

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::bounded_name("cid", "Unique circuit ID", 100),
            attributes::required_reference("circuit_provider", "Provider of the circuit"),
            attributes::required_reference("type", "Circuit type"),
            attributes::status(CIRCUIT_STATUSES),
            attributes::reference("tenant", "Tenant owning the circuit"),
            attributes::text("install_date", "Installation date, `YYYY-MM-DD`"),
            attributes::text("termination_date", "Termination date, `YYYY-MM-DD`"),
            attributes::integer("commit_rate", "Committed rate in Kbps", 0, 2_147_483_647),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::CircuitRequest {
            cid: plan.string("cid"),
            provider: plan.required_reference("circuit_provider", &PROVIDERS).await,
            circuit_type: plan.required_reference("type", &CIRCUIT_TYPES).await,
            status: plan.string("status"),
            tenant: plan.reference("tenant", &TENANTS).await,
            install_date: plan.optional_string("install_date"),
            termination_date: plan.optional_string("termination_date"),
            commit_rate: plan.integer("commit_rate"),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .string("cid", &model.cid)
            .reference("circuit_provider", Some(&model.provider))
            .reference("type", Some(&model.circuit_type))
            .choice("status", model.status.as_ref())
            .reference("tenant", model.tenant.as_ref())
            .optional_string("install_date", model.install_date.as_deref())
            .optional_string("termination_date", model.termination_date.as_deref())
            .integer("commit_rate", model.commit_rate);
    }
}

const TERM_SIDES: &[&str] = &["A", "Z"];

pub struct CircuitTermination;

#[async_trait]
impl NetBoxObject for CircuitTermination {
    type Model = api::CircuitTermination;
    type Request = api::CircuitTerminationRequest;

    const TYPE_NAME: &'static str = "netbox_circuit_termination";
    const ENDPOINT: Endpoint = CIRCUIT_TERMINATIONS;
    const DESCRIPTION: &'static str =
        "Manages one end of a circuit, attached to a site or a provider network";
    const NATURAL_KEY: &'static str = "xconnect_id";
    const HAS_COMMENTS: bool = false;

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::required_reference("circuit", "Circuit being terminated"),
            AttributeBuilder::new("term_side", AttributeType::String)
                .description("Side of the circuit, `A` or `Z`")
                .required()
                .validator(OneOfValidator::create(TERM_SIDES))
                .build(),
            attributes::reference("site", "Site the circuit terminates at"),
            attributes::reference("provider_network", "Provider network the circuit terminates at"),
            attributes::integer("port_speed", "Physical circuit speed in Kbps", 0, 2_147_483_647),
            attributes::integer("upstream_speed", "Upstream speed in Kbps, if different from port speed", 0, 2_147_483_647),
            attributes::bounded_text("xconnect_id", "Cross-connect ID", 50),
            attributes::bounded_text("pp_info", "Patch panel ID and port numbers", 100),
            attributes::flag("mark_connected", "Treat the termination as connected without a cable", false),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::CircuitTerminationRequest {
            circuit: plan.required_reference("circuit", &CIRCUITS).await,
            term_side: plan.string("term_side"),
            site: plan.reference("site", &SITES).await,
            provider_network: plan.reference("provider_network", &PROVIDER_NETWORKS).await,
            port_speed: plan.integer("port_speed"),
            upstream_speed: plan.integer("upstream_speed"),
            xconnect_id: plan.string("xconnect_id"),
            pp_info: plan.string("pp_info"),
            mark_connected: plan.bool_or("mark_connected", false),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .reference("circuit", Some(&model.circuit))
            .string("term_side", &model.term_side)
            .reference("site", model.site.as_ref())
            .reference("provider_network", model.provider_network.as_ref())
            .integer("port_speed", model.port_speed)
            .integer("upstream_speed", model.upstream_speed)
            .optional_string("xconnect_id", model.xconnect_id.as_deref())
            .optional_string("pp_info", model.pp_info.as_deref())
            .bool("mark_connected", model.mark_connected);
    }

    fn validate(config: &DynamicValue) -> Vec<Diagnostic> {
        let site = config.get_value(&AttributePath::new("site"));
        let network = config.get_value(&AttributePath::new("provider_network"));
        if site.is_known() && network.is_known() {
            vec![Diagnostic::error(
                "Conflicting Termination Points",
                "Only one of site and provider_network can be set",
            )
            .with_attribute(AttributePath::new("provider_network"))]
        } else {
            vec![]
        }
    }
}

#[cfg(test)]
#[path = "./circuits_test.rs"]
mod circuits_test;
