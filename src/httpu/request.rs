/*!
Builds the wire text of an `M-SEARCH` request.
*/

use crate::syntax::{HTTP_HEADER_LINE_SEP, HTTP_HEADER_SEP, HTTP_MATCH_ANY_RESOURCE, HTTP_PROTOCOL_NAME, HTTP_PROTOCOL_VERSION};

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct Request {
    method: String,
    headers: Vec<(String, String)>,
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl Request {
    pub fn new<S: Into<String>>(method: S) -> Self {
        Request {
            method: method.into(),
            headers: Vec::new(),
        }
    }

    pub fn header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    fn request_line(&self) -> String {
        format!(
            "{} {} {}/{}{}",
            self.method, HTTP_MATCH_ANY_RESOURCE, HTTP_PROTOCOL_NAME, HTTP_PROTOCOL_VERSION, HTTP_HEADER_LINE_SEP
        )
    }

    fn all_headers(&self) -> String {
        self.headers
            .iter()
            .map(|(k, v)| format!("{}{} {}{}", k, HTTP_HEADER_SEP, v, HTTP_HEADER_LINE_SEP))
            .collect::<String>()
    }
}

impl From<&Request> for String {
    fn from(rq: &Request) -> Self {
        format!("{}{}{}", rq.request_line(), rq.all_headers(), HTTP_HEADER_LINE_SEP)
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_request_is_well_formed() {
        let request = Request::new("M-SEARCH")
            .header("HOST", "239.255.255.250:1900")
            .header("MAN", "\"ssdp:discover\"")
            .header("MX", "3")
            .header("ST", "ssdp:all");
        let text: String = (&request).into();
        assert!(text.starts_with("M-SEARCH * HTTP/1.1\r\n"));
        assert!(text.contains("MX: 3\r\n"));
        assert!(text.ends_with("\r\n\r\n"));
    }
}
