/*!
Thin wrapper over `reqwest::blocking` applying a resolved [`SessionPolicy`]
uniformly to GET (root/SCPD description fetch) and POST (SOAP invocation)
requests.
*/

use crate::error::Error;
use crate::policy::SessionPolicy;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::str::FromStr;

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

pub fn get(url: &str, policy: &SessionPolicy) -> Result<String, Error> {
    trace!("http_client::get - url: {}", url);
    let client = build_client(policy)?;
    let request = apply_policy(client.get(url), policy);
    let response = request.send().map_err(|e| to_error(e, policy))?;
    into_text(response, policy)
}

/// Returns `(status, reason phrase, body)` so a non-2xx/non-fault response
/// can be reported with the same detail as the GET path.
pub fn post(
    url: &str,
    body: String,
    content_type: &str,
    soap_action: &str,
    policy: &SessionPolicy,
) -> Result<(u16, String, String), Error> {
    trace!("http_client::post - url: {}", url);
    let client = build_client(policy)?;
    let request = apply_policy(client.post(url), policy)
        .header(reqwest::header::CONTENT_TYPE, content_type)
        .header(crate::syntax::SOAP_HTTP_HEADER_ACTION, soap_action)
        .body(body);
    let response = request.send().map_err(|e| to_error(e, policy))?;
    let status = response.status();
    let reason = status.canonical_reason().unwrap_or("").to_string();
    let body = response.text().map_err(|e| to_error(e, policy))?;
    Ok((status.as_u16(), reason, body))
}

// ------------------------------------------------------------------------------------------------
// Private Functions
// ------------------------------------------------------------------------------------------------

fn build_client(policy: &SessionPolicy) -> Result<Client, Error> {
    let mut builder = Client::builder();
    if let Some(timeout) = policy.timeout {
        builder = builder.timeout(timeout);
    }
    if policy.allow_self_signed_ssl.unwrap_or(false) {
        builder = builder.danger_accept_invalid_certs(true);
    }
    if let Some((cert_path, key_path)) = &policy.cert {
        let identity = build_identity(cert_path, key_path)?;
        builder = builder.identity(identity);
    }
    builder.build().map_err(Into::into)
}

fn build_identity(cert_path: &str, key_path: &str) -> Result<reqwest::Identity, Error> {
    let mut pem = std::fs::read(cert_path)?;
    let mut key = std::fs::read(key_path)?;
    pem.append(&mut key);
    reqwest::Identity::from_pem(&pem).map_err(Into::into)
}

fn apply_policy(mut request: RequestBuilder, policy: &SessionPolicy) -> RequestBuilder {
    if let Some(auth) = &policy.http_auth {
        request = request.header(reqwest::header::AUTHORIZATION, auth);
    }
    if let Some(headers) = &policy.http_headers {
        let mut map = HeaderMap::new();
        for (k, v) in headers {
            if let (Ok(name), Ok(value)) = (HeaderName::from_str(k), HeaderValue::from_str(v)) {
                map.insert(name, value);
            }
        }
        request = request.headers(map);
    }
    request
}

fn into_text(response: Response, policy: &SessionPolicy) -> Result<String, Error> {
    let status = response.status();
    let text = response.text().map_err(|e| to_error(e, policy))?;
    if !status.is_success() {
        return Err(Error::Http {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
            body: Some(text),
        });
    }
    Ok(text)
}

/// A deadline exceeded on `policy`'s timeout is reported as [`Error::Timeout`]
/// rather than folded into the generic transport-error variant.
fn to_error(e: reqwest::Error, policy: &SessionPolicy) -> Error {
    if e.is_timeout() {
        Error::Timeout(policy.timeout.unwrap_or_default())
    } else {
        e.into()
    }
}
