/*!
Plain data produced by the description parser, before the navigation
indices (component D) are built over it.
*/

use crate::types::AllowedValueRange;
use std::collections::BTreeSet;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

/// One `<device>` element: the root device or an embedded device.
#[derive(Clone, Debug)]
pub struct RawDevice {
    pub device_type: String,
    pub friendly_name: String,
    pub manufacturer: String,
    pub manufacturer_url: Option<String>,
    pub model_description: Option<String>,
    pub model_name: String,
    pub model_number: Option<String>,
    pub model_url: Option<String>,
    pub serial_number: Option<String>,
    pub udn: String,
    pub upc: Option<String>,
    pub presentation_url: Option<String>,
    pub services: Vec<RawService>,
    pub device_list: Vec<RawDevice>,
}

/// One `<service>` stub from the root description, optionally completed
/// with its SCPD's actions/state variables.
#[derive(Clone, Debug)]
pub struct RawService {
    pub service_type: String,
    pub service_id: String,
    pub scpd_url: String,
    pub control_url: String,
    pub event_sub_url: String,
    pub actions: Vec<Action>,
    pub statevars: Vec<StateVariable>,
}

/// A callable operation on a service, with typed `in`/`out` argument lists.
#[derive(Clone, Debug)]
pub struct Action {
    pub name: String,
    pub args_in: Vec<(String, ArgDef)>,
    pub args_out: Vec<(String, ArgDef)>,
}

/// The resolved type signature of one action argument, cross-linked from
/// its `relatedStateVariable`.
#[derive(Clone, Debug)]
pub struct ArgDef {
    pub name: String,
    pub datatype: String,
    pub allowed_values: BTreeSet<String>,
    pub allowed_value_range: Option<AllowedValueRange>,
}

/// A named, typed value owned by a service.
#[derive(Clone, Debug)]
pub struct StateVariable {
    pub name: String,
    pub datatype: String,
    pub send_events: bool,
    pub default_value: Option<String>,
    pub allowed_values: BTreeSet<String>,
    pub allowed_value_range: Option<AllowedValueRange>,
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl RawService {
    pub fn statevar(&self, name: &str) -> Option<&StateVariable> {
        self.statevars.iter().find(|sv| sv.name == name)
    }

    /// Flattens the raw `<argumentList>`/`<stateVariable>` data fetched
    /// separately from SCPD parsing into the cross-linked `Action`/`ArgDef`
    /// shape used by the public API. A dangling `relatedStateVariable` is a
    /// parse error, surfaced here rather than at use-time.
    pub fn complete(
        service_type: String,
        service_id: String,
        scpd_url: String,
        control_url: String,
        event_sub_url: String,
        actions_raw: Vec<parse::RawAction>,
        statevars: Vec<StateVariable>,
    ) -> Result<RawService, crate::error::Error> {
        let mut actions = Vec::with_capacity(actions_raw.len());
        for raw in actions_raw {
            let mut args_in = Vec::new();
            let mut args_out = Vec::new();
            for arg in raw.arguments {
                let sv = statevars
                    .iter()
                    .find(|sv| sv.name == arg.related_state_variable)
                    .ok_or_else(|| {
                        crate::error::parse(
                            "action argument",
                            format!(
                                "relatedStateVariable `{}` does not resolve to a state variable",
                                arg.related_state_variable
                            ),
                        )
                    })?;
                let def = ArgDef {
                    name: arg.related_state_variable.clone(),
                    datatype: sv.datatype.clone(),
                    allowed_values: sv.allowed_values.clone(),
                    allowed_value_range: sv.allowed_value_range.clone(),
                };
                match arg.direction {
                    parse::RawDirection::In => args_in.push((arg.name, def)),
                    parse::RawDirection::Out => args_out.push((arg.name, def)),
                }
            }
            actions.push(Action {
                name: raw.name,
                args_in,
                args_out,
            });
        }

        Ok(RawService {
            service_type,
            service_id,
            scpd_url,
            control_url,
            event_sub_url,
            actions,
            statevars,
        })
    }
}

use super::parse;
