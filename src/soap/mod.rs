/*!
SOAP 1.1 action invocation (component C):

```text
POST path of control URL HTTP/1.1
HOST: host of control URL:port of control URL
CONTENT-TYPE: text/xml; charset="utf-8"
SOAPACTION: "serviceType#actionName"

<?xml version="1.0"?>
<s:Envelope
   xmlns:s="http://schemas.xmlsoap.org/soap/envelope/"
   s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/">
   <s:Body>
      <u:actionName xmlns:u="serviceType">
         <argumentName>in arg value</argumentName>
      </u:actionName>
   </s:Body>
</s:Envelope>
```

This module only frames and parses the envelope; argument encoding/decoding
and schema validation belong to the type codec and the device object model.
*/

use crate::error::{self, Error};
use crate::http_client;
use crate::policy::SessionPolicy;
use crate::syntax::{SOAP_FAULT_CODE_CLIENT, SOAP_NS_ENCODING, SOAP_NS_ENVELOPE};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::BufRead;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

/// One action invocation, with `in` arguments already wire-encoded in
/// declared order.
#[derive(Clone, Debug)]
pub struct ActionRequest<'a> {
    pub service_type: &'a str,
    pub action_name: &'a str,
    pub args: Vec<(String, String)>,
}

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

/// POST the action to `control_url`, returning the response's `out`
/// arguments as wire-encoded `(name, value)` pairs in document order.
/// A SOAP fault or non-2xx HTTP status surfaces as an [`Error`].
pub fn invoke(control_url: &str, request: &ActionRequest<'_>, policy: &SessionPolicy) -> Result<Vec<(String, String)>, Error> {
    let envelope = build_envelope(request)?;
    let soap_action = format!("\"{}#{}\"", request.service_type, request.action_name);

    let (status, reason, body) = http_client::post(control_url, envelope, "text/xml; charset=\"utf-8\"", &soap_action, policy)?;

    if (200..300).contains(&status) {
        parse_action_response(&body, request.action_name)
    } else if let Some(fault) = parse_fault(&body) {
        Err(fault)
    } else {
        Err(Error::Http {
            status,
            reason,
            body: if body.is_empty() { None } else { Some(body) },
        })
    }
}

// ------------------------------------------------------------------------------------------------
// Private Functions -- envelope construction
// ------------------------------------------------------------------------------------------------

fn build_envelope(request: &ActionRequest<'_>) -> Result<String, Error> {
    let mut writer = Writer::new(Vec::new());
    let w = &mut writer;

    write_event(w, Event::Decl(BytesDecl::new(b"1.0", None, None)))?;

    let mut envelope = BytesStart::borrowed_name(b"s:Envelope");
    envelope.push_attribute(("xmlns:s", SOAP_NS_ENVELOPE));
    envelope.push_attribute(("s:encodingStyle", SOAP_NS_ENCODING));
    write_event(w, Event::Start(envelope))?;

    write_event(w, Event::Start(BytesStart::borrowed_name(b"s:Body")))?;

    let action_tag = format!("u:{}", request.action_name);
    let mut action_start = BytesStart::borrowed_name(action_tag.as_bytes());
    action_start.push_attribute(("xmlns:u", request.service_type));
    write_event(w, Event::Start(action_start))?;

    for (name, value) in &request.args {
        write_event(w, Event::Start(BytesStart::borrowed_name(name.as_bytes())))?;
        write_event(w, Event::Text(BytesText::from_plain(value.as_bytes())))?;
        write_event(w, Event::End(BytesEnd::borrowed(name.as_bytes())))?;
    }

    write_event(w, Event::End(BytesEnd::borrowed(action_tag.as_bytes())))?;
    write_event(w, Event::End(BytesEnd::borrowed(b"s:Body")))?;
    write_event(w, Event::End(BytesEnd::borrowed(b"s:Envelope")))?;

    String::from_utf8(writer.into_inner()).map_err(|e| error::parse("SOAP envelope", e.utf8_error()))
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), Error> {
    writer.write_event(event).map(|_| ()).map_err(|e| error::xml_error("SOAP envelope", e))
}

// ------------------------------------------------------------------------------------------------
// Private Functions -- response parsing
// ------------------------------------------------------------------------------------------------

fn parse_action_response(xml: &str, action_name: &str) -> Result<Vec<(String, String)>, Error> {
    let wanted = format!("{}Response", action_name);
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_event(&mut buf).map_err(|e| error::xml_error("SOAP response", e))? {
            Event::Start(e) => {
                let name = e.name().to_vec();
                if local_name(&name) == wanted.as_bytes() {
                    return read_child_values(&mut reader, &mut buf);
                }
            }
            Event::Eof => {
                return Err(error::parse(
                    "SOAP response",
                    format!("no `{}` element in response envelope", wanted),
                ))
            }
            _ => {}
        }
    }
}

fn read_child_values<B: BufRead>(reader: &mut Reader<B>, buf: &mut Vec<u8>) -> Result<Vec<(String, String)>, Error> {
    let mut values = Vec::new();
    let mut depth = 1;

    loop {
        buf.clear();
        match reader.read_event(buf).map_err(|e| error::xml_error("SOAP response", e))? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(local_name(&e.name().to_vec())).to_string();
                let text = read_text(reader, buf)?;
                values.push((name, text));
            }
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Event::Eof => return Err(error::parse("SOAP response", "unexpected end of document")),
            _ => {}
        }
    }
    Ok(values)
}

fn parse_fault(xml: &str) -> Option<Error> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_event(&mut buf).ok()? {
            Event::Start(e) => {
                let name = e.name().to_vec();
                if local_name(&name) == b"Fault" {
                    return read_fault_body(&mut reader, &mut buf).ok();
                }
            }
            Event::Eof => return None,
            _ => {}
        }
    }
}

fn read_fault_body<B: BufRead>(reader: &mut Reader<B>, buf: &mut Vec<u8>) -> Result<Error, Error> {
    let mut fault_code = String::new();
    let mut fault_string = String::new();
    let mut upnp_error_code = None;
    let mut upnp_error_description = None;

    loop {
        buf.clear();
        match reader.read_event(buf).map_err(|e| error::xml_error("SOAP fault", e))? {
            Event::Start(e) => {
                let name = e.name().to_vec();
                match local_name(&name) {
                    b"faultcode" => fault_code = read_text(reader, buf)?,
                    b"faultstring" => fault_string = read_text(reader, buf)?,
                    b"errorCode" => upnp_error_code = read_text(reader, buf)?.parse().ok(),
                    b"errorDescription" => upnp_error_description = Some(read_text(reader, buf)?),
                    _ => {}
                }
            }
            Event::End(e) if local_name(&e.name().to_vec()) == b"Fault" => break,
            Event::Eof => return Err(error::parse("SOAP fault", "unexpected end of document")),
            _ => {}
        }
    }

    Ok(Error::SoapFault {
        fault_code,
        fault_string,
        upnp_error_code,
        upnp_error_description,
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

fn read_text<B: BufRead>(reader: &mut Reader<B>, buf: &mut Vec<u8>) -> Result<String, Error> {
    let mut text = String::new();
    loop {
        buf.clear();
        match reader.read_event(buf).map_err(|e| error::xml_error("SOAP text content", e))? {
            Event::Text(e) => text.push_str(&e.unescape_and_decode(reader).map_err(|e| error::xml_error("SOAP text content", e))?),
            Event::CData(e) => text.push_str(&String::from_utf8_lossy(&e)),
            Event::End(_) => break,
            Event::Eof => return Err(error::parse("SOAP text content", "unexpected end of document")),
            _ => {}
        }
    }
    Ok(text)
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_envelope_with_ordered_arguments() {
        let request = ActionRequest {
            service_type: "urn:schemas-upnp-org:service:WANIPConnection:1",
            action_name: "AddPortMapping",
            args: vec![("NewRemoteHost".to_string(), "0.0.0.0".to_string()), ("NewExternalPort".to_string(), "12345".to_string())],
        };
        let xml = build_envelope(&request).unwrap();
        let host_pos = xml.find("NewRemoteHost").unwrap();
        let port_pos = xml.find("NewExternalPort").unwrap();
        assert!(host_pos < port_pos);
        assert!(xml.contains("u:AddPortMapping"));
        assert!(xml.contains(SOAP_NS_ENVELOPE));
    }

    #[test]
    fn parses_action_response_values() {
        let xml = r#"<?xml version="1.0"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body>
    <u:AddPortMappingResponse xmlns:u="urn:schemas-upnp-org:service:WANIPConnection:1">
    </u:AddPortMappingResponse>
  </s:Body>
</s:Envelope>"#;
        let values = parse_action_response(xml, "AddPortMapping").unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn parses_soap_fault_with_upnp_error() {
        let xml = r#"<?xml version="1.0"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body>
    <s:Fault>
      <faultcode>s:Client</faultcode>
      <faultstring>UPnPError</faultstring>
      <detail>
        <UPnPError xmlns="urn:schemas-upnp-org:control-1-0">
          <errorCode>718</errorCode>
          <errorDescription>ConflictInMappingEntry</errorDescription>
        </UPnPError>
      </detail>
    </s:Fault>
  </s:Body>
</s:Envelope>"#;
        match parse_fault(xml).unwrap() {
            Error::SoapFault {
                fault_code,
                fault_string,
                upnp_error_code,
                upnp_error_description,
            } => {
                assert_eq!(fault_code, SOAP_FAULT_CODE_CLIENT);
                assert_eq!(fault_string, "UPnPError");
                assert_eq!(upnp_error_code, Some(718));
                assert_eq!(upnp_error_description.as_deref(), Some("ConflictInMappingEntry"));
            }
            other => panic!("expected SoapFault, got {:?}", other),
        }
    }
}
