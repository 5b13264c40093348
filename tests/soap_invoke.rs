//! End-to-end coverage over a loopback HTTP server: description + SCPD
//! fetch, a happy-path action invocation, a SOAP fault surfaced from a
//! non-2xx response, and the "validation never reaches the wire" rule.

use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use upnp_client::device::Device;
use upnp_client::policy::SessionPolicy;
use upnp_client::types::ArgValue;

const ROOT_XML: &str = r#"<?xml version="1.0"?>
<root xmlns="urn:schemas-upnp-org:device-1-0">
  <device>
    <deviceType>urn:schemas-upnp-org:device:InternetGatewayDevice:1</deviceType>
    <friendlyName>Test Router</friendlyName>
    <manufacturer>ACME</manufacturer>
    <modelName>Router 3000</modelName>
    <UDN>uuid:test-router</UDN>
    <serviceList>
      <service>
        <serviceType>urn:schemas-upnp-org:service:Layer3Forwarding:1</serviceType>
        <serviceId>urn:upnp-org:serviceId:L3Forwarding1</serviceId>
        <SCPDURL>/l3f.xml</SCPDURL>
        <controlURL>/ctl/l3f</controlURL>
        <eventSubURL>/evt/l3f</eventSubURL>
      </service>
      <service>
        <serviceType>urn:schemas-upnp-org:service:WANCommonInterfaceConfig:1</serviceType>
        <serviceId>urn:upnp-org:serviceId:WANCommonIFC1</serviceId>
        <SCPDURL>/wancic.xml</SCPDURL>
        <controlURL>/ctl/wancic</controlURL>
        <eventSubURL>/evt/wancic</eventSubURL>
      </service>
      <service>
        <serviceType>urn:schemas-upnp-org:service:WANIPConnection:1</serviceType>
        <serviceId>urn:upnp-org:serviceId:WANIPConn1</serviceId>
        <SCPDURL>/wanipconn.xml</SCPDURL>
        <controlURL>/ctl/wanipconn</controlURL>
        <eventSubURL>/evt/wanipconn</eventSubURL>
      </service>
    </serviceList>
  </device>
</root>"#;

const EMPTY_SCPD: &str = r#"<?xml version="1.0"?>
<scpd xmlns="urn:schemas-upnp-org:service-1-0">
  <actionList></actionList>
  <serviceStateTable></serviceStateTable>
</scpd>"#;

const WAN_IP_CONN_SCPD: &str = r#"<?xml version="1.0"?>
<scpd xmlns="urn:schemas-upnp-org:service-1-0">
  <actionList>
    <action>
      <name>AddPortMapping</name>
      <argumentList>
        <argument><name>NewRemoteHost</name><direction>in</direction><relatedStateVariable>RemoteHost</relatedStateVariable></argument>
        <argument><name>NewExternalPort</name><direction>in</direction><relatedStateVariable>ExternalPort</relatedStateVariable></argument>
        <argument><name>NewProtocol</name><direction>in</direction><relatedStateVariable>Protocol</relatedStateVariable></argument>
        <argument><name>NewInternalPort</name><direction>in</direction><relatedStateVariable>InternalPort</relatedStateVariable></argument>
        <argument><name>NewInternalClient</name><direction>in</direction><relatedStateVariable>InternalClient</relatedStateVariable></argument>
        <argument><name>NewEnabled</name><direction>in</direction><relatedStateVariable>Enabled</relatedStateVariable></argument>
        <argument><name>NewPortMappingDescription</name><direction>in</direction><relatedStateVariable>Description</relatedStateVariable></argument>
        <argument><name>NewLeaseDuration</name><direction>in</direction><relatedStateVariable>LeaseDuration</relatedStateVariable></argument>
      </argumentList>
    </action>
  </actionList>
  <serviceStateTable>
    <stateVariable sendEvents="no"><name>RemoteHost</name><dataType>string</dataType></stateVariable>
    <stateVariable sendEvents="no"><name>ExternalPort</name><dataType>ui2</dataType></stateVariable>
    <stateVariable sendEvents="no">
      <name>Protocol</name>
      <dataType>string</dataType>
      <allowedValueList><allowedValue>TCP</allowedValue><allowedValue>UDP</allowedValue></allowedValueList>
    </stateVariable>
    <stateVariable sendEvents="no"><name>InternalPort</name><dataType>ui2</dataType></stateVariable>
    <stateVariable sendEvents="no"><name>InternalClient</name><dataType>string</dataType></stateVariable>
    <stateVariable sendEvents="no"><name>Enabled</name><dataType>boolean</dataType></stateVariable>
    <stateVariable sendEvents="no"><name>Description</name><dataType>string</dataType></stateVariable>
    <stateVariable sendEvents="no"><name>LeaseDuration</name><dataType>ui4</dataType></stateVariable>
  </serviceStateTable>
</scpd>"#;

/// Spawns a loopback server that answers the fixed description/SCPD set
/// above plus whatever `control` callback produces for POSTs to
/// `/ctl/wanipconn`. Runs for a bounded number of requests so the
/// background thread doesn't outlive the test.
fn spawn_server(control: impl Fn(&str) -> (u16, String) + Send + 'static) -> String {
    let server = Arc::new(tiny_http::Server::http("127.0.0.1:0").unwrap());
    let addr = server.server_addr().to_string();

    std::thread::spawn(move || {
        for _ in 0..16 {
            let request = match server.recv_timeout(Duration::from_secs(2)) {
                Ok(Some(r)) => r,
                _ => break,
            };
            let url = request.url().to_string();
            match url.as_str() {
                "/desc.xml" => respond_xml(request, ROOT_XML.to_string(), 200),
                "/l3f.xml" | "/wancic.xml" => respond_xml(request, EMPTY_SCPD.to_string(), 200),
                "/wanipconn.xml" => respond_xml(request, WAN_IP_CONN_SCPD.to_string(), 200),
                "/ctl/wanipconn" => {
                    let mut request = request;
                    let mut body = String::new();
                    request.as_reader().read_to_string(&mut body).unwrap();
                    let (status, xml) = control(&body);
                    respond_xml(request, xml, status);
                }
                _ => {
                    let response = tiny_http::Response::from_string("not found").with_status_code(404);
                    let _ = request.respond(response);
                }
            }
        }
    });

    addr
}

fn respond_xml(request: tiny_http::Request, xml: String, status: u16) {
    let response = tiny_http::Response::from_string(xml)
        .with_status_code(status)
        .with_header("Content-Type: text/xml; charset=\"utf-8\"".parse::<tiny_http::Header>().unwrap());
    let _ = request.respond(response);
}

#[test]
fn device_from_location_resolves_three_services_and_argsdef_in_order() {
    let addr = spawn_server(|_| (200, soap_envelope("AddPortMapping", &[])));
    let location = format!("http://{}/desc.xml", addr);

    let device = Device::from_location(&location, SessionPolicy::default()).unwrap();
    assert_eq!(device.services.len(), 3);

    let service = device.service("WANIPConn1").expect("lookup by last serviceId segment");
    let action = service.action("AddPortMapping").unwrap();
    assert_eq!(action.args_in.len(), 8);
    assert_eq!(action.args_in[0].0, "NewRemoteHost");
    assert_eq!(action.args_in[7].0, "NewLeaseDuration");
    assert_eq!(action.args_in[2].1.allowed_values, ["TCP", "UDP"].iter().map(|s| s.to_string()).collect());
    assert_eq!(action.args_in[1].1.datatype, "ui2");
}

#[test]
fn invoke_happy_path_round_trips_the_action() {
    let addr = spawn_server(|body| {
        assert!(body.contains("u:AddPortMapping"));
        assert!(body.contains("NewExternalPort"));
        (200, soap_envelope("AddPortMapping", &[]))
    });
    let location = format!("http://{}/desc.xml", addr);
    let device = Device::from_location(&location, SessionPolicy::default()).unwrap();
    let service = device.service("WANIPConn1").unwrap();

    let mut inputs = HashMap::new();
    inputs.insert("NewRemoteHost".to_string(), ArgValue::Text(String::new()));
    inputs.insert("NewExternalPort".to_string(), ArgValue::UInt(12345));
    inputs.insert("NewProtocol".to_string(), ArgValue::Text("TCP".to_string()));
    inputs.insert("NewInternalPort".to_string(), ArgValue::UInt(12345));
    inputs.insert("NewInternalClient".to_string(), ArgValue::Text("192.168.1.2".to_string()));
    inputs.insert("NewEnabled".to_string(), ArgValue::Bool(true));
    inputs.insert("NewPortMappingDescription".to_string(), ArgValue::Text("test".to_string()));
    inputs.insert("NewLeaseDuration".to_string(), ArgValue::UInt(0));

    let outputs = service.invoke("AddPortMapping", &inputs, None).unwrap();
    assert!(outputs.is_empty());
}

#[test]
fn invoke_surfaces_soap_fault_from_500_response() {
    let addr = spawn_server(|_| {
        let fault = r#"<?xml version="1.0"?>
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
        (500, fault.to_string())
    });
    let location = format!("http://{}/desc.xml", addr);
    let device = Device::from_location(&location, SessionPolicy::default()).unwrap();
    let service = device.service("WANIPConn1").unwrap();

    let mut inputs = HashMap::new();
    inputs.insert("NewRemoteHost".to_string(), ArgValue::Text(String::new()));
    inputs.insert("NewExternalPort".to_string(), ArgValue::UInt(12345));
    inputs.insert("NewProtocol".to_string(), ArgValue::Text("TCP".to_string()));
    inputs.insert("NewInternalPort".to_string(), ArgValue::UInt(12345));
    inputs.insert("NewInternalClient".to_string(), ArgValue::Text("192.168.1.2".to_string()));
    inputs.insert("NewEnabled".to_string(), ArgValue::Bool(true));
    inputs.insert("NewPortMappingDescription".to_string(), ArgValue::Text("test".to_string()));
    inputs.insert("NewLeaseDuration".to_string(), ArgValue::UInt(0));

    let err = service.invoke("AddPortMapping", &inputs, None).unwrap_err();
    match err {
        upnp_client::Error::SoapFault {
            upnp_error_code,
            upnp_error_description,
            ..
        } => {
            assert_eq!(upnp_error_code, Some(718));
            assert_eq!(upnp_error_description.as_deref(), Some("ConflictInMappingEntry"));
        }
        other => panic!("expected a SOAP fault, got {:?}", other),
    }
}

#[test]
fn invoke_validation_failure_never_sends_a_request() {
    let addr = spawn_server(|_| panic!("the control endpoint must not be reached"));
    let location = format!("http://{}/desc.xml", addr);
    let device = Device::from_location(&location, SessionPolicy::default()).unwrap();
    let service = device.service("WANIPConn1").unwrap();

    let mut inputs = HashMap::new();
    inputs.insert("NewRemoteHost".to_string(), ArgValue::Text(String::new()));
    inputs.insert("NewExternalPort".to_string(), ArgValue::UInt(12345));
    inputs.insert("NewProtocol".to_string(), ArgValue::Text("ICMP".to_string()));
    inputs.insert("NewInternalPort".to_string(), ArgValue::UInt(12345));
    inputs.insert("NewInternalClient".to_string(), ArgValue::Text("192.168.1.2".to_string()));
    inputs.insert("NewEnabled".to_string(), ArgValue::Bool(true));
    inputs.insert("NewPortMappingDescription".to_string(), ArgValue::Text("test".to_string()));
    inputs.insert("NewLeaseDuration".to_string(), ArgValue::UInt(0));

    let err = service.invoke("AddPortMapping", &inputs, None).unwrap_err();
    assert!(matches!(err, upnp_client::Error::Validation { .. }));
}

fn soap_envelope(action_name: &str, out_args: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (name, value) in out_args {
        body.push_str(&format!("<{name}>{value}</{name}>"));
    }
    format!(
        r#"<?xml version="1.0"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body>
    <u:{action_name}Response xmlns:u="urn:schemas-upnp-org:service:WANIPConnection:1">{body}</u:{action_name}Response>
  </s:Body>
</s:Envelope>"#
    )
}
