/*!
Parses a raw SSDP multicast-response datagram into a status code and a
case-insensitive header map.
*/

use crate::error::{self, Error};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::str::FromStr;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct Response {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl Response {
    pub fn parse(datagram: &[u8]) -> Result<Response, Error> {
        let text = std::str::from_utf8(datagram).map_err(|e| error::parse("SSDP response", e))?;
        let mut lines = text.split("\r\n");

        let status_line = lines
            .next()
            .ok_or_else(|| error::parse("SSDP response", "empty datagram"))?;
        let status_code = decode_status_line(status_line)?;

        let mut headers = HashMap::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let (name, value) = decode_header(line)?;
            headers.insert(name, value);
        }

        Ok(Response { status_code, headers })
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_uppercase()).map(String::as_str)
    }
}

// ------------------------------------------------------------------------------------------------
// Private Functions
// ------------------------------------------------------------------------------------------------

lazy_static! {
    static ref STATUS_LINE: Regex = Regex::new(r"^HTTP/[\d.]+ (\d+) .*$").unwrap();
    static ref HEADER_LINE: Regex = Regex::new(r"^([a-zA-Z0-9\-_.]+)\s*:\s*(.*)$").unwrap();
}

fn decode_status_line(line: &str) -> Result<u16, Error> {
    STATUS_LINE
        .captures(line)
        .and_then(|c| c.get(1))
        .and_then(|m| u16::from_str(m.as_str()).ok())
        .ok_or_else(|| error::parse("SSDP response status line", format!("`{}` is not a valid status line", line)))
}

fn decode_header(line: &str) -> Result<(String, String), Error> {
    HEADER_LINE
        .captures(line)
        .map(|c| (c[1].to_ascii_uppercase(), c[2].trim().to_string()))
        .ok_or_else(|| error::parse("SSDP response header", format!("`{}` is not a valid header line", line)))
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const DATAGRAM: &[u8] = b"HTTP/1.1 200 OK\r\nCACHE-CONTROL: max-age=1800\r\nST: upnp:rootdevice\r\nUSN: uuid:A::upnp:rootdevice\r\nLOCATION: http://10.0.0.1:80/desc.xml\r\nSERVER: Linux/5.0 UPnP/1.1 test/1\r\nDATE: Mon, 01 Jan 2024 00:00:00 GMT\r\nEXT:\r\n\r\n";

    #[test]
    fn parses_status_and_headers() {
        let response = Response::parse(DATAGRAM).unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.header("usn"), Some("uuid:A::upnp:rootdevice"));
        assert_eq!(response.header("location"), Some("http://10.0.0.1:80/desc.xml"));
    }

    #[test]
    fn rejects_malformed_status_line() {
        assert!(Response::parse(b"NOTICE * HTTP/1.1\r\n\r\n").is_err());
    }
}
