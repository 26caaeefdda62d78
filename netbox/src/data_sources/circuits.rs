//! Circuit lookups: circuit terminations

use super::{NetBoxQuery, Output, Outputs};
use crate::api::circuits::{self as api, CIRCUIT_TERMINATIONS};
use crate::api::Endpoint;

pub struct CircuitTermination;

impl NetBoxQuery for CircuitTermination {
    type Model = api::CircuitTermination;

    const TYPE_NAME: &'static str = "netbox_circuit_termination";
    const ENDPOINT: Endpoint = CIRCUIT_TERMINATIONS;
    const DESCRIPTION: &'static str =
        "Looks up a circuit termination by ID, or by circuit and side";
    const FILTERS: &'static [&'static str] = &["circuit_id", "xconnect_id"];
    const SCOPE: &'static [&'static str] = &["term_side"];
    const HAS_COMMENTS: bool = false;

    fn outputs() -> Outputs {
        Outputs::new()
            .reference("circuit", "Circuit")
            .string("term_side", "Side of the circuit, `A` or `Z`")
            .reference("site", "Site")
            .reference("provider_network", "Provider network")
            .number("port_speed", "Physical circuit speed in Kbps")
            .number("upstream_speed", "Upstream speed in Kbps")
            .string("xconnect_id", "Cross-connect ID")
            .string("pp_info", "Patch panel ID and port numbers")
            .bool("mark_connected", "Treated as connected without a cable")
    }

    fn state(model: &Self::Model, output: &mut Output) {
        output
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
}
