/*!
Wire-format constants: SSDP multicast address and headers, description/SCPD
XML element names, and SOAP namespaces.
*/

// ------------------------------------------------------------------------------------------------
// Public Values -- Network
// ------------------------------------------------------------------------------------------------

/**
Multicast channel and port reserved for SSDP by IANA. `239.255.255.250:1900`.
*/
pub const MULTICAST_ADDRESS: &str = "239.255.255.250:1900";

pub const DEFAULT_MULTICAST_TTL: u32 = 2;

// ------------------------------------------------------------------------------------------------
// Public Values -- HTTP (core)
// ------------------------------------------------------------------------------------------------

pub const HTTP_PROTOCOL_NAME: &str = "HTTP";

pub const HTTP_PROTOCOL_VERSION: &str = "1.1";

pub const HTTP_MATCH_ANY_RESOURCE: &str = "*";

pub const HTTP_HEADER_SEP: &str = ":";

pub const HTTP_HEADER_LINE_SEP: &str = "\r\n";

// ------------------------------------------------------------------------------------------------
// Public Values -- SSDP headers
// ------------------------------------------------------------------------------------------------

/// Required by the HTTP extension framework. Must be `"ssdp:discover"`.
pub const HTTP_HEADER_MAN: &str = "MAN";

pub const HTTP_EXTENSION: &str = "\"ssdp:discover\"";

/// `M-SEARCH` method name.
pub const HTTP_METHOD_SEARCH: &str = "M-SEARCH";

/// Field value contains multicast address and port reserved for SSDP, e.g. `239.255.255.250:1900`.
pub const HTTP_HEADER_HOST: &str = "HOST";

/// A URL to the UPnP description of the root device.
pub const HTTP_HEADER_LOCATION: &str = "LOCATION";

/// Maximum wait time in seconds, should be between 1 and 120 inclusive.
pub const HTTP_HEADER_MX: &str = "MX";

/// Search Target: the value the control point is searching for.
pub const HTTP_HEADER_ST: &str = "ST";

/// Cache control directive, e.g. `max-age=1800`.
pub const HTTP_HEADER_CACHE_CONTROL: &str = "CACHE-CONTROL";

/// Unique Service Name; identifies a unique instance of a device or service.
pub const HTTP_HEADER_USN: &str = "USN";

/// Product tokens identifying the OS, UPnP version and product.
pub const HTTP_HEADER_SERVER: &str = "SERVER";

pub const HTTP_HEADER_USER_AGENT: &str = "USER-AGENT";

pub const HTTP_HEADER_DATE: &str = "DATE";

pub const HTTP_HEADER_EXT: &str = "EXT";

// ------------------------------------------------------------------------------------------------
// Public Values -- XML (description / SCPD)
// ------------------------------------------------------------------------------------------------

pub const XML_NS_DEVICE: &str = "urn:schemas-upnp-org:device-1-0";
pub const XML_NS_SERVICE: &str = "urn:schemas-upnp-org:service-1-0";

pub const XML_ATTR_SEND_EVENTS: &str = "sendEvents";

pub const XML_ELEM_ROOT: &str = "root";
pub const XML_ELEM_SPEC_VERSION: &str = "specVersion";
pub const XML_ELEM_MAJOR: &str = "major";
pub const XML_ELEM_MINOR: &str = "minor";
pub const XML_ELEM_URL_BASE: &str = "URLBase";
pub const XML_ELEM_DEVICE: &str = "device";
pub const XML_ELEM_DEVICE_LIST: &str = "deviceList";
pub const XML_ELEM_DEVICE_TYPE: &str = "deviceType";
pub const XML_ELEM_FRIENDLY_NAME: &str = "friendlyName";
pub const XML_ELEM_MANUFACTURER: &str = "manufacturer";
pub const XML_ELEM_MANUFACTURER_URL: &str = "manufacturerURL";
pub const XML_ELEM_MODEL_DESCR: &str = "modelDescription";
pub const XML_ELEM_MODEL_NAME: &str = "modelName";
pub const XML_ELEM_MODEL_NUMBER: &str = "modelNumber";
pub const XML_ELEM_MODEL_URL: &str = "modelURL";
pub const XML_ELEM_SERIAL_NUMBER: &str = "serialNumber";
pub const XML_ELEM_UDN: &str = "UDN";
pub const XML_ELEM_UPC: &str = "UPC";
pub const XML_ELEM_PRESENTATION_URL: &str = "presentationURL";
pub const XML_ELEM_SERVICE_LIST: &str = "serviceList";
pub const XML_ELEM_SERVICE: &str = "service";
pub const XML_ELEM_SERVICE_TYPE: &str = "serviceType";
pub const XML_ELEM_SERVICE_ID: &str = "serviceId";
pub const XML_ELEM_SERVICE_SCPD_URL: &str = "SCPDURL";
pub const XML_ELEM_SERVICE_CONTROL_URL: &str = "controlURL";
pub const XML_ELEM_SERVICE_EVENT_URL: &str = "eventSubURL";

pub const XML_ELEM_SCPD: &str = "scpd";
pub const XML_ELEM_ACTION_LIST: &str = "actionList";
pub const XML_ELEM_ACTION: &str = "action";
pub const XML_ELEM_ARGUMENT_LIST: &str = "argumentList";
pub const XML_ELEM_ARGUMENT: &str = "argument";
pub const XML_ELEM_NAME: &str = "name";
pub const XML_ELEM_DIRECTION: &str = "direction";
pub const XML_ELEM_RETVAL: &str = "retval";
pub const XML_ELEM_REL_STATE_VARIABLE: &str = "relatedStateVariable";
pub const XML_ELEM_STATE_TABLE: &str = "serviceStateTable";
pub const XML_ELEM_STATE_VARIABLE: &str = "stateVariable";
pub const XML_ELEM_DATA_TYPE: &str = "dataType";
pub const XML_ELEM_DEFAULT_VALUE: &str = "defaultValue";
pub const XML_ELEM_ALLOWED_LIST: &str = "allowedValueList";
pub const XML_ELEM_ALLOWED_VALUE: &str = "allowedValue";
pub const XML_ELEM_ALLOWED_RANGE: &str = "allowedValueRange";
pub const XML_ELEM_MINIMUM: &str = "minimum";
pub const XML_ELEM_MAXIMUM: &str = "maximum";
pub const XML_ELEM_STEP: &str = "step";

// ------------------------------------------------------------------------------------------------
// Public Values -- SOAP
// ------------------------------------------------------------------------------------------------

pub const SOAP_NS_ENVELOPE: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const SOAP_NS_ENCODING: &str = "http://schemas.xmlsoap.org/soap/encoding/";

pub const SOAP_HTTP_HEADER_ACTION: &str = "SOAPACTION";

pub const SOAP_FAULT_CODE_CLIENT: &str = "s:Client";
