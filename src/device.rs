/*!
The device and service navigation API (component D): fetches a root
description and every service's SCPD, cross-links them into a navigable
tree, and dispatches action invocations over SOAP.

A [`Device`]'s `services` is a flat, root-first view over the whole
embedded-device tree, so a caller rarely needs to walk `device_list` by
hand. Both [`Device::service`] and [`Service::action`] resolve through a
lookup table built once at construction and never mutated afterwards.
*/

use crate::description::model::{RawDevice, RawService};
use crate::description::parse;
use crate::description::{Action, StateVariable};
use crate::error::{self, Error};
use crate::http_client;
use crate::policy::{CallOverrides, SessionPolicy};
use crate::soap;
use crate::types::{self, ArgValue};
use std::collections::HashMap;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

/// A parsed and fully resolved UPnP device: the root device description,
/// or one of its embedded devices.
#[derive(Clone, Debug)]
pub struct Device {
    pub location: String,
    pub url_base: String,
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
    /// Every service owned by this device or any of its descendants,
    /// root-first.
    pub services: Vec<Service>,
    pub device_list: Vec<Device>,
    service_index: HashMap<String, usize>,
}

/// One completed service: its SCPD has been fetched and its actions'
/// arguments cross-linked to their state variables.
#[derive(Clone, Debug)]
pub struct Service {
    pub service_type: String,
    pub service_id: String,
    pub scpd_url: String,
    pub control_url: String,
    pub event_sub_url: String,
    pub actions: Vec<Action>,
    pub statevars: Vec<StateVariable>,
    action_index: HashMap<String, usize>,
    policy: SessionPolicy,
}

// ------------------------------------------------------------------------------------------------
// Implementations -- Device
// ------------------------------------------------------------------------------------------------

impl Device {
    /// Fetch the root description at `location`, then every service's SCPD,
    /// and assemble the full device tree. `policy` is resolved against the
    /// library defaults once here and carried by every [`Service`] for
    /// later invocations.
    pub fn from_location(location: &str, policy: SessionPolicy) -> Result<Device, Error> {
        let resolved = policy.with_defaults();
        let root_xml = http_client::get(location, &resolved)?;
        let (url_base_elem, raw_device) = parse::parse_root_description(&root_xml)?;
        let url_base = match url_base_elem {
            Some(base) => base,
            None => default_url_base(location),
        };
        build_device(raw_device, location, &url_base, &resolved)
    }

    /// Look up a service by its full `serviceId`, by the segment after the
    /// last `:`, or by a sanitised form of either (non-identifier
    /// characters stripped). All three forms resolve to the same instance.
    pub fn service(&self, key: &str) -> Option<&Service> {
        self.service_index.get(key).map(|&i| &self.services[i])
    }
}

fn build_device(raw: RawDevice, location: &str, url_base: &str, policy: &SessionPolicy) -> Result<Device, Error> {
    let mut own_services = Vec::with_capacity(raw.services.len());
    for stub in raw.services {
        let completed = fetch_and_complete_service(stub, url_base, policy)?;
        own_services.push(Service::new(completed, policy.clone()));
    }

    let mut device_list = Vec::with_capacity(raw.device_list.len());
    for child in raw.device_list {
        device_list.push(build_device(child, location, url_base, policy)?);
    }

    let mut services = own_services;
    for child in &device_list {
        services.extend(child.services.iter().cloned());
    }
    let service_index = build_service_index(&services);

    Ok(Device {
        location: location.to_string(),
        url_base: url_base.to_string(),
        device_type: raw.device_type,
        friendly_name: raw.friendly_name,
        manufacturer: raw.manufacturer,
        manufacturer_url: raw.manufacturer_url,
        model_description: raw.model_description,
        model_name: raw.model_name,
        model_number: raw.model_number,
        model_url: raw.model_url,
        serial_number: raw.serial_number,
        udn: raw.udn,
        upc: raw.upc,
        presentation_url: raw.presentation_url,
        services,
        device_list,
        service_index,
    })
}

fn fetch_and_complete_service(stub: RawService, url_base: &str, policy: &SessionPolicy) -> Result<RawService, Error> {
    let scpd_url = resolve_url(url_base, &stub.scpd_url)?;
    let control_url = resolve_url(url_base, &stub.control_url)?;
    let event_sub_url = resolve_url(url_base, &stub.event_sub_url)?;

    let scpd_xml = http_client::get(&scpd_url, policy)?;
    let (actions_raw, statevars) = parse::parse_scpd(&scpd_xml)?;

    RawService::complete(stub.service_type, stub.service_id, scpd_url, control_url, event_sub_url, actions_raw, statevars)
}

fn default_url_base(location: &str) -> String {
    match location.rfind('/') {
        Some(idx) => location[..=idx].to_string(),
        None => location.to_string(),
    }
}

fn resolve_url(base: &str, reference: &str) -> Result<String, Error> {
    let base = reqwest::Url::parse(base).map_err(|e| error::parse("URLBase", e))?;
    base.join(reference).map(|u| u.to_string()).map_err(|e| error::parse("service URL", e))
}

fn build_service_index(services: &[Service]) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (i, service) in services.iter().enumerate() {
        index.entry(service.service_id.clone()).or_insert(i);
        if let Some(segment) = service.service_id.rsplit(':').next() {
            index.entry(segment.to_string()).or_insert(i);
        }
        index.entry(sanitize(&service.service_id)).or_insert(i);
    }
    index
}

fn sanitize(id: &str) -> String {
    id.chars().filter(|c| c.is_ascii_alphanumeric() || *c == '_').collect()
}

// ------------------------------------------------------------------------------------------------
// Implementations -- Service
// ------------------------------------------------------------------------------------------------

impl Service {
    fn new(raw: RawService, policy: SessionPolicy) -> Self {
        let action_index = raw.actions.iter().enumerate().map(|(i, a)| (a.name.clone(), i)).collect();
        Service {
            service_type: raw.service_type,
            service_id: raw.service_id,
            scpd_url: raw.scpd_url,
            control_url: raw.control_url,
            event_sub_url: raw.event_sub_url,
            actions: raw.actions,
            statevars: raw.statevars,
            action_index,
            policy,
        }
    }

    pub fn action(&self, name: &str) -> Option<&Action> {
        self.action_index.get(name).map(|&i| &self.actions[i])
    }

    /// Validate `inputs` against the action's declared `in` arguments,
    /// encode and invoke over SOAP, then decode the `out` arguments back
    /// into [`ArgValue`]s. No request is sent if validation fails.
    pub fn invoke(&self, action_name: &str, inputs: &HashMap<String, ArgValue>, overrides: Option<&CallOverrides>) -> Result<HashMap<String, ArgValue>, Error> {
        let action = self
            .action(action_name)
            .ok_or_else(|| error::validation(action_name, "not an action of this service"))?;

        let mut wire_args = Vec::with_capacity(action.args_in.len());
        for (name, def) in &action.args_in {
            let value = inputs
                .get(name)
                .ok_or_else(|| error::validation(name, "missing required argument"))?;
            types::validate(&def.datatype, value, &def.allowed_values, def.allowed_value_range.as_ref())?;
            wire_args.push((name.clone(), types::encode(&def.datatype, value)?));
        }
        for name in inputs.keys() {
            if !action.args_in.iter().any(|(n, _)| n == name) {
                return Err(error::validation(name, "not an argument of this action"));
            }
        }

        let resolved_policy = self.policy.resolve(overrides);
        let request = soap::ActionRequest {
            service_type: &self.service_type,
            action_name,
            args: wire_args,
        };
        let raw_outputs = soap::invoke(&self.control_url, &request, &resolved_policy)?;

        let mut outputs = HashMap::with_capacity(action.args_out.len());
        for (name, def) in &action.args_out {
            let wire = raw_outputs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str())
                .ok_or_else(|| error::parse(name, "missing expected output argument in SOAP response"))?;
            outputs.insert(name.clone(), types::decode(&def.datatype, wire)?);
        }
        Ok(outputs)
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------
