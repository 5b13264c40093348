/*!
Event-based parsing of the two UPnP XML schemas (component B): the root
device description and a service's SCPD. Namespace prefixes are ignored;
elements are matched by local name against the vocabulary in
[`crate::syntax`], walking the `quick_xml` event stream once and
projecting straight into the typed model — no intermediate DOM.
*/

use crate::description::model::{RawDevice, RawService, StateVariable};
use crate::error::{self, Error};
use crate::syntax::*;
use crate::types::AllowedValueRange;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::BTreeSet;
use std::io::BufRead;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct RawAction {
    pub name: String,
    pub arguments: Vec<RawArgument>,
}

#[derive(Clone, Debug)]
pub struct RawArgument {
    pub name: String,
    pub direction: RawDirection,
    pub related_state_variable: String,
}

#[derive(Clone, Copy, Debug)]
pub enum RawDirection {
    In,
    Out,
}

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

/// Parse a root device description document, returning the `<URLBase>`
/// text (if present) and the root `<device>`.
pub fn parse_root_description(xml: &str) -> Result<(Option<String>, RawDevice), Error> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut url_base = None;
    let mut device = None;

    loop {
        buf.clear();
        match reader.read_event(&mut buf).map_err(|e| error::xml_error("device description", e))? {
            Event::Start(e) => {
                let name = e.name().to_vec();
                let name = local_name(&name);
                if is(name, XML_ELEM_URL_BASE) {
                    url_base = Some(read_text(&mut reader, &mut buf)?);
                } else if is(name, XML_ELEM_DEVICE) {
                    device = Some(parse_device(&mut reader, &mut buf)?);
                } else {
                    skip_element(&mut reader, &mut buf)?;
                }
            }
            Event::Empty(_) => {}
            Event::Eof => break,
            _ => {}
        }
    }

    let device = device.ok_or_else(|| error::parse("device description", "missing <device> element"))?;
    Ok((url_base, device))
}

/// Parse a service's SCPD document into its raw action list and state
/// variable table. Cross-linking (and the dangling-`relatedStateVariable`
/// check) happens in [`RawService::complete`].
pub fn parse_scpd(xml: &str) -> Result<(Vec<RawAction>, Vec<StateVariable>), Error> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut actions = Vec::new();
    let mut statevars = Vec::new();

    loop {
        buf.clear();
        match reader.read_event(&mut buf).map_err(|e| error::xml_error("SCPD", e))? {
            Event::Start(e) => {
                let name = e.name().to_vec();
                let name = local_name(&name);
                if is(name, XML_ELEM_ACTION_LIST) {
                    actions = parse_action_list(&mut reader, &mut buf)?;
                } else if is(name, XML_ELEM_STATE_TABLE) {
                    statevars = parse_state_table(&mut reader, &mut buf)?;
                } else {
                    skip_element(&mut reader, &mut buf)?;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok((actions, statevars))
}

// ------------------------------------------------------------------------------------------------
// Private Functions -- root device description
// ------------------------------------------------------------------------------------------------

fn parse_device<B: BufRead>(reader: &mut Reader<B>, buf: &mut Vec<u8>) -> Result<RawDevice, Error> {
    let mut device_type = None;
    let mut friendly_name = None;
    let mut manufacturer = None;
    let mut manufacturer_url = None;
    let mut model_description = None;
    let mut model_name = None;
    let mut model_number = None;
    let mut model_url = None;
    let mut serial_number = None;
    let mut udn = None;
    let mut upc = None;
    let mut presentation_url = None;
    let mut services = Vec::new();
    let mut device_list = Vec::new();

    loop {
        buf.clear();
        match reader.read_event(buf).map_err(|e| error::xml_error("device", e))? {
            Event::Start(e) => {
                let elem = e.name().to_vec();
                let elem = local_name(&elem);
                if is(elem, XML_ELEM_DEVICE_TYPE) {
                    device_type = Some(read_text(reader, buf)?);
                } else if is(elem, XML_ELEM_FRIENDLY_NAME) {
                    friendly_name = Some(read_text(reader, buf)?);
                } else if is(elem, XML_ELEM_MANUFACTURER) {
                    manufacturer = Some(read_text(reader, buf)?);
                } else if is(elem, XML_ELEM_MANUFACTURER_URL) {
                    manufacturer_url = Some(read_text(reader, buf)?);
                } else if is(elem, XML_ELEM_MODEL_DESCR) {
                    model_description = Some(read_text(reader, buf)?);
                } else if is(elem, XML_ELEM_MODEL_NAME) {
                    model_name = Some(read_text(reader, buf)?);
                } else if is(elem, XML_ELEM_MODEL_NUMBER) {
                    model_number = Some(read_text(reader, buf)?);
                } else if is(elem, XML_ELEM_MODEL_URL) {
                    model_url = Some(read_text(reader, buf)?);
                } else if is(elem, XML_ELEM_SERIAL_NUMBER) {
                    serial_number = Some(read_text(reader, buf)?);
                } else if is(elem, XML_ELEM_UDN) {
                    udn = Some(read_text(reader, buf)?);
                } else if is(elem, XML_ELEM_UPC) {
                    upc = Some(read_text(reader, buf)?);
                } else if is(elem, XML_ELEM_PRESENTATION_URL) {
                    presentation_url = Some(read_text(reader, buf)?);
                } else if is(elem, XML_ELEM_SERVICE_LIST) {
                    services = parse_service_list(reader, buf)?;
                } else if is(elem, XML_ELEM_DEVICE_LIST) {
                    device_list = parse_device_list(reader, buf)?;
                } else {
                    // a nested <device> here would be malformed; ignore
                    // rather than fail, along with every other unknown
                    // element (robustness rule).
                    skip_element(reader, buf)?;
                }
            }
            Event::End(e) if is(local_name(&e.name().to_vec()), XML_ELEM_DEVICE) => break,
            Event::Eof => return Err(error::parse("device", "unexpected end of document")),
            _ => {}
        }
    }

    Ok(RawDevice {
        device_type: device_type.ok_or_else(|| error::parse("device", "missing deviceType"))?,
        friendly_name: friendly_name.ok_or_else(|| error::parse("device", "missing friendlyName"))?,
        manufacturer: manufacturer.ok_or_else(|| error::parse("device", "missing manufacturer"))?,
        manufacturer_url,
        model_description,
        model_name: model_name.ok_or_else(|| error::parse("device", "missing modelName"))?,
        model_number,
        model_url,
        serial_number,
        udn: udn.ok_or_else(|| error::parse("device", "missing UDN"))?,
        upc,
        presentation_url,
        services,
        device_list,
    })
}

fn parse_device_list<B: BufRead>(reader: &mut Reader<B>, buf: &mut Vec<u8>) -> Result<Vec<RawDevice>, Error> {
    let mut devices = Vec::new();
    loop {
        buf.clear();
        match reader.read_event(buf).map_err(|e| error::xml_error("deviceList", e))? {
            Event::Start(e) => {
                let name = e.name().to_vec();
                if is(local_name(&name), XML_ELEM_DEVICE) {
                    devices.push(parse_device(reader, buf)?);
                } else {
                    skip_element(reader, buf)?;
                }
            }
            Event::End(e) if is(local_name(&e.name().to_vec()), XML_ELEM_DEVICE_LIST) => break,
            Event::Eof => return Err(error::parse("deviceList", "unexpected end of document")),
            _ => {}
        }
    }
    Ok(devices)
}

fn parse_service_list<B: BufRead>(reader: &mut Reader<B>, buf: &mut Vec<u8>) -> Result<Vec<RawService>, Error> {
    let mut services = Vec::new();
    loop {
        buf.clear();
        match reader.read_event(buf).map_err(|e| error::xml_error("serviceList", e))? {
            Event::Start(e) => {
                let name = e.name().to_vec();
                if is(local_name(&name), XML_ELEM_SERVICE) {
                    services.push(parse_service_stub(reader, buf)?);
                } else {
                    skip_element(reader, buf)?;
                }
            }
            Event::End(e) if is(local_name(&e.name().to_vec()), XML_ELEM_SERVICE_LIST) => break,
            Event::Eof => return Err(error::parse("serviceList", "unexpected end of document")),
            _ => {}
        }
    }
    Ok(services)
}

fn parse_service_stub<B: BufRead>(reader: &mut Reader<B>, buf: &mut Vec<u8>) -> Result<RawService, Error> {
    let mut service_type = None;
    let mut service_id = None;
    let mut scpd_url = None;
    let mut control_url = None;
    let mut event_sub_url = None;

    loop {
        buf.clear();
        match reader.read_event(buf).map_err(|e| error::xml_error("service", e))? {
            Event::Start(e) => {
                let elem = e.name().to_vec();
                let elem = local_name(&elem);
                if is(elem, XML_ELEM_SERVICE_TYPE) {
                    service_type = Some(read_text(reader, buf)?);
                } else if is(elem, XML_ELEM_SERVICE_ID) {
                    service_id = Some(read_text(reader, buf)?);
                } else if is(elem, XML_ELEM_SERVICE_SCPD_URL) {
                    scpd_url = Some(read_text(reader, buf)?);
                } else if is(elem, XML_ELEM_SERVICE_CONTROL_URL) {
                    control_url = Some(read_text(reader, buf)?);
                } else if is(elem, XML_ELEM_SERVICE_EVENT_URL) {
                    event_sub_url = Some(read_text(reader, buf)?);
                } else {
                    skip_element(reader, buf)?;
                }
            }
            Event::End(e) if is(local_name(&e.name().to_vec()), XML_ELEM_SERVICE) => break,
            Event::Eof => return Err(error::parse("service", "unexpected end of document")),
            _ => {}
        }
    }

    Ok(RawService {
        service_type: service_type.ok_or_else(|| error::parse("service", "missing serviceType"))?,
        service_id: service_id.ok_or_else(|| error::parse("service", "missing serviceId"))?,
        scpd_url: scpd_url.ok_or_else(|| error::parse("service", "missing SCPDURL"))?,
        control_url: control_url.ok_or_else(|| error::parse("service", "missing controlURL"))?,
        event_sub_url: event_sub_url.ok_or_else(|| error::parse("service", "missing eventSubURL"))?,
        actions: Vec::new(),
        statevars: Vec::new(),
    })
}

// ------------------------------------------------------------------------------------------------
// Private Functions -- SCPD
// ------------------------------------------------------------------------------------------------

fn parse_action_list<B: BufRead>(reader: &mut Reader<B>, buf: &mut Vec<u8>) -> Result<Vec<RawAction>, Error> {
    let mut actions = Vec::new();
    loop {
        buf.clear();
        match reader.read_event(buf).map_err(|e| error::xml_error("actionList", e))? {
            Event::Start(e) => {
                let name = e.name().to_vec();
                if is(local_name(&name), XML_ELEM_ACTION) {
                    actions.push(parse_action(reader, buf)?);
                } else {
                    skip_element(reader, buf)?;
                }
            }
            Event::End(e) if is(local_name(&e.name().to_vec()), XML_ELEM_ACTION_LIST) => break,
            Event::Eof => return Err(error::parse("actionList", "unexpected end of document")),
            _ => {}
        }
    }
    Ok(actions)
}

fn parse_action<B: BufRead>(reader: &mut Reader<B>, buf: &mut Vec<u8>) -> Result<RawAction, Error> {
    let mut name = None;
    let mut arguments = Vec::new();

    loop {
        buf.clear();
        match reader.read_event(buf).map_err(|e| error::xml_error("action", e))? {
            Event::Start(e) => {
                let elem = e.name().to_vec();
                let elem = local_name(&elem);
                if is(elem, XML_ELEM_NAME) {
                    name = Some(read_text(reader, buf)?);
                } else if is(elem, XML_ELEM_ARGUMENT_LIST) {
                    arguments = parse_argument_list(reader, buf)?;
                } else {
                    skip_element(reader, buf)?;
                }
            }
            Event::End(e) if is(local_name(&e.name().to_vec()), XML_ELEM_ACTION) => break,
            Event::Eof => return Err(error::parse("action", "unexpected end of document")),
            _ => {}
        }
    }

    Ok(RawAction {
        name: name.ok_or_else(|| error::parse("action", "missing name"))?,
        arguments,
    })
}

fn parse_argument_list<B: BufRead>(reader: &mut Reader<B>, buf: &mut Vec<u8>) -> Result<Vec<RawArgument>, Error> {
    let mut arguments = Vec::new();
    loop {
        buf.clear();
        match reader.read_event(buf).map_err(|e| error::xml_error("argumentList", e))? {
            Event::Start(e) => {
                let name = e.name().to_vec();
                if is(local_name(&name), XML_ELEM_ARGUMENT) {
                    arguments.push(parse_argument(reader, buf)?);
                } else {
                    skip_element(reader, buf)?;
                }
            }
            Event::End(e) if is(local_name(&e.name().to_vec()), XML_ELEM_ARGUMENT_LIST) => break,
            Event::Eof => return Err(error::parse("argumentList", "unexpected end of document")),
            _ => {}
        }
    }
    Ok(arguments)
}

fn parse_argument<B: BufRead>(reader: &mut Reader<B>, buf: &mut Vec<u8>) -> Result<RawArgument, Error> {
    let mut name = None;
    let mut direction = None;
    let mut related_state_variable = None;

    loop {
        buf.clear();
        match reader.read_event(buf).map_err(|e| error::xml_error("argument", e))? {
            Event::Start(e) => {
                let elem = e.name().to_vec();
                let elem = local_name(&elem);
                if is(elem, XML_ELEM_NAME) {
                    name = Some(read_text(reader, buf)?);
                } else if is(elem, XML_ELEM_DIRECTION) {
                    let text = read_text(reader, buf)?;
                    direction = Some(match text.as_str() {
                        "in" => RawDirection::In,
                        "out" => RawDirection::Out,
                        other => return Err(error::parse("argument direction", format!("`{}` is neither `in` nor `out`", other))),
                    });
                } else if is(elem, XML_ELEM_REL_STATE_VARIABLE) {
                    related_state_variable = Some(read_text(reader, buf)?);
                } else {
                    // covers <retval/> and any other unknown child
                    skip_element(reader, buf)?;
                }
            }
            Event::End(e) if is(local_name(&e.name().to_vec()), XML_ELEM_ARGUMENT) => break,
            Event::Eof => return Err(error::parse("argument", "unexpected end of document")),
            _ => {}
        }
    }

    Ok(RawArgument {
        name: name.ok_or_else(|| error::parse("argument", "missing name"))?,
        direction: direction.ok_or_else(|| error::parse("argument", "missing direction"))?,
        related_state_variable: related_state_variable.ok_or_else(|| error::parse("argument", "missing relatedStateVariable"))?,
    })
}

fn parse_state_table<B: BufRead>(reader: &mut Reader<B>, buf: &mut Vec<u8>) -> Result<Vec<StateVariable>, Error> {
    let mut vars = Vec::new();
    loop {
        buf.clear();
        match reader.read_event(buf).map_err(|e| error::xml_error("serviceStateTable", e))? {
            Event::Start(e) => {
                let name = e.name().to_vec();
                if is(local_name(&name), XML_ELEM_STATE_VARIABLE) {
                    let send_events = attr_send_events(&e);
                    vars.push(parse_state_variable(reader, buf, send_events)?);
                } else {
                    skip_element(reader, buf)?;
                }
            }
            Event::End(e) if is(local_name(&e.name().to_vec()), XML_ELEM_STATE_TABLE) => break,
            Event::Eof => return Err(error::parse("serviceStateTable", "unexpected end of document")),
            _ => {}
        }
    }
    Ok(vars)
}

fn attr_send_events(start: &quick_xml::events::BytesStart<'_>) -> bool {
    for attr in start.attributes().flatten() {
        if is(local_name(attr.key), XML_ATTR_SEND_EVENTS) {
            return attr.value.as_ref() != b"no";
        }
    }
    true
}

fn parse_state_variable<B: BufRead>(reader: &mut Reader<B>, buf: &mut Vec<u8>, send_events: bool) -> Result<StateVariable, Error> {
    let mut name = None;
    let mut datatype = None;
    let mut default_value = None;
    let mut allowed_values = BTreeSet::new();
    let mut allowed_value_range = None;

    loop {
        buf.clear();
        match reader.read_event(buf).map_err(|e| error::xml_error("stateVariable", e))? {
            Event::Start(e) => {
                let elem = e.name().to_vec();
                let elem = local_name(&elem);
                if is(elem, XML_ELEM_NAME) {
                    name = Some(read_text(reader, buf)?);
                } else if is(elem, XML_ELEM_DATA_TYPE) {
                    datatype = Some(read_text(reader, buf)?);
                } else if is(elem, XML_ELEM_DEFAULT_VALUE) {
                    default_value = Some(read_text(reader, buf)?);
                } else if is(elem, XML_ELEM_ALLOWED_LIST) {
                    allowed_values = parse_allowed_value_list(reader, buf)?;
                } else if is(elem, XML_ELEM_ALLOWED_RANGE) {
                    allowed_value_range = Some(parse_allowed_value_range(reader, buf)?);
                } else {
                    skip_element(reader, buf)?;
                }
            }
            Event::End(e) if is(local_name(&e.name().to_vec()), XML_ELEM_STATE_VARIABLE) => break,
            Event::Eof => return Err(error::parse("stateVariable", "unexpected end of document")),
            _ => {}
        }
    }

    Ok(StateVariable {
        name: name.ok_or_else(|| error::parse("stateVariable", "missing name"))?,
        datatype: datatype.ok_or_else(|| error::parse("stateVariable", "missing dataType"))?,
        send_events,
        default_value,
        allowed_values,
        allowed_value_range,
    })
}

fn parse_allowed_value_list<B: BufRead>(reader: &mut Reader<B>, buf: &mut Vec<u8>) -> Result<BTreeSet<String>, Error> {
    let mut values = BTreeSet::new();
    loop {
        buf.clear();
        match reader.read_event(buf).map_err(|e| error::xml_error("allowedValueList", e))? {
            Event::Start(e) => {
                let name = e.name().to_vec();
                if is(local_name(&name), XML_ELEM_ALLOWED_VALUE) {
                    values.insert(read_text(reader, buf)?);
                } else {
                    skip_element(reader, buf)?;
                }
            }
            Event::End(e) if is(local_name(&e.name().to_vec()), XML_ELEM_ALLOWED_LIST) => break,
            Event::Eof => return Err(error::parse("allowedValueList", "unexpected end of document")),
            _ => {}
        }
    }
    Ok(values)
}

fn parse_allowed_value_range<B: BufRead>(reader: &mut Reader<B>, buf: &mut Vec<u8>) -> Result<AllowedValueRange, Error> {
    let mut minimum = None;
    let mut maximum = None;
    let mut step = None;

    loop {
        buf.clear();
        match reader.read_event(buf).map_err(|e| error::xml_error("allowedValueRange", e))? {
            Event::Start(e) => {
                let elem = e.name().to_vec();
                let elem = local_name(&elem);
                if is(elem, XML_ELEM_MINIMUM) {
                    minimum = Some(read_text(reader, buf)?);
                } else if is(elem, XML_ELEM_MAXIMUM) {
                    maximum = Some(read_text(reader, buf)?);
                } else if is(elem, XML_ELEM_STEP) {
                    step = Some(read_text(reader, buf)?);
                } else {
                    skip_element(reader, buf)?;
                }
            }
            Event::End(e) if is(local_name(&e.name().to_vec()), XML_ELEM_ALLOWED_RANGE) => break,
            Event::Eof => return Err(error::parse("allowedValueRange", "unexpected end of document")),
            _ => {}
        }
    }

    Ok(AllowedValueRange {
        minimum: minimum.ok_or_else(|| error::parse("allowedValueRange", "missing minimum"))?,
        maximum: maximum.ok_or_else(|| error::parse("allowedValueRange", "missing maximum"))?,
        step,
    })
}

// ------------------------------------------------------------------------------------------------
// Private Functions -- shared plumbing
// ------------------------------------------------------------------------------------------------

fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().rposition(|&b| b == b':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

fn is(name: &[u8], elem: &str) -> bool {
    name == elem.as_bytes()
}

fn read_text<B: BufRead>(reader: &mut Reader<B>, buf: &mut Vec<u8>) -> Result<String, Error> {
    let mut text = String::new();
    loop {
        buf.clear();
        match reader.read_event(buf).map_err(|e| error::xml_error("text content", e))? {
            Event::Text(e) => {
                text.push_str(&e.unescape_and_decode(reader).map_err(|e| error::xml_error("text content", e))?);
            }
            Event::CData(e) => text.push_str(&String::from_utf8_lossy(&e)),
            Event::End(_) => break,
            Event::Eof => return Err(error::parse("text content", "unexpected end of document")),
            _ => {}
        }
    }
    Ok(text)
}

fn skip_element<B: BufRead>(reader: &mut Reader<B>, buf: &mut Vec<u8>) -> Result<(), Error> {
    let mut depth = 1;
    loop {
        buf.clear();
        match reader.read_event(buf).map_err(|e| error::xml_error("unknown element", e))? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Event::Eof => return Err(error::parse("unknown element", "unexpected end of document")),
            _ => {}
        }
    }
    Ok(())
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const IGD_ROOT: &str = r#"<?xml version="1.0"?>
<root xmlns="urn:schemas-upnp-org:device-1-0">
  <specVersion><major>1</major><minor>0</minor></specVersion>
  <device>
    <deviceType>urn:schemas-upnp-org:device:InternetGatewayDevice:1</deviceType>
    <friendlyName>Router</friendlyName>
    <manufacturer>ACME</manufacturer>
    <modelName>Router 3000</modelName>
    <UDN>uuid:A</UDN>
    <serviceList>
      <service>
        <serviceType>urn:schemas-upnp-org:service:Layer3Forwarding:1</serviceType>
        <serviceId>urn:upnp-org:serviceId:Layer3Forwarding1</serviceId>
        <SCPDURL>/L3F.xml</SCPDURL>
        <controlURL>/ctl/L3F</controlURL>
        <eventSubURL>/evt/L3F</eventSubURL>
      </service>
      <service>
        <serviceType>urn:schemas-upnp-org:service:WANCommonInterfaceConfig:1</serviceType>
        <serviceId>urn:upnp-org:serviceId:WANCommonIFC1</serviceId>
        <SCPDURL>/WANCIC.xml</SCPDURL>
        <controlURL>/ctl/WANCIC</controlURL>
        <eventSubURL>/evt/WANCIC</eventSubURL>
      </service>
      <service>
        <serviceType>urn:schemas-upnp-org:service:WANIPConnection:1</serviceType>
        <serviceId>urn:upnp-org:serviceId:WANIPConn1</serviceId>
        <SCPDURL>/WANIPConn.xml</SCPDURL>
        <controlURL>/ctl/WANIPConn</controlURL>
        <eventSubURL>/evt/WANIPConn</eventSubURL>
      </service>
    </serviceList>
  </device>
</root>"#;

    #[test]
    fn parses_igd_root_three_services() {
        let (_url_base, device) = parse_root_description(IGD_ROOT).unwrap();
        assert_eq!(device.services.len(), 3);
        assert_eq!(device.services[0].service_id, "urn:upnp-org:serviceId:Layer3Forwarding1");
        assert_eq!(device.services[2].service_id, "urn:upnp-org:serviceId:WANIPConn1");
    }

    const WAN_IP_CONN_SCPD: &str = r#"<?xml version="1.0"?>
<scpd xmlns="urn:schemas-upnp-org:service-1-0">
  <actionList>
    <action>
      <name>AddPortMapping</name>
      <argumentList>
        <argument><name>NewRemoteHost</name><direction>in</direction><relatedStateVariable>RemoteHost</relatedStateVariable></argument>
        <argument><name>NewExternalPort</name><direction>in</direction><relatedStateVariable>ExternalPort</relatedStateVariable></argument>
        <argument><name>NewProtocol</name><direction>in</direction><relatedStateVariable>Protocol</relatedStateVariable></argument>
      </argumentList>
    </action>
  </actionList>
  <serviceStateTable>
    <stateVariable sendEvents="no">
      <name>RemoteHost</name>
      <dataType>string</dataType>
    </stateVariable>
    <stateVariable sendEvents="no">
      <name>ExternalPort</name>
      <dataType>ui2</dataType>
    </stateVariable>
    <stateVariable sendEvents="no">
      <name>Protocol</name>
      <dataType>string</dataType>
      <allowedValueList>
        <allowedValue>TCP</allowedValue>
        <allowedValue>UDP</allowedValue>
      </allowedValueList>
    </stateVariable>
  </serviceStateTable>
</scpd>"#;

    #[test]
    fn parses_scpd_action_and_statevars() {
        let (actions, statevars) = parse_scpd(WAN_IP_CONN_SCPD).unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].name, "AddPortMapping");
        assert_eq!(actions[0].arguments.len(), 3);
        assert_eq!(statevars.len(), 3);
        let protocol = statevars.iter().find(|v| v.name == "Protocol").unwrap();
        assert!(protocol.allowed_values.contains("TCP"));
        assert!(protocol.allowed_values.contains("UDP"));
    }
}
