/*!
Common error type for the crate, plus free constructor functions for the
variants that take more than a couple of fields.
*/

use std::fmt::Display;
use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

///
/// Errors returned by every fallible operation in this crate.
///
#[derive(Debug, Error)]
pub enum Error {
    /// A value failed type-codec or policy validation before any network I/O was attempted.
    #[error("validation failed for `{name}`: {reason}")]
    Validation { name: String, reason: String },

    /// SSDP, description or SOAP XML could not be parsed into the expected shape.
    #[error("failed to parse {what}: {reason}")]
    Parse { what: String, reason: String },

    /// The underlying socket or HTTP transport failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A discovery search or HTTP request exceeded its configured timeout.
    #[error("operation timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The remote device returned a non-2xx HTTP status.
    #[error("HTTP request failed with status {status} {reason}")]
    Http {
        status: u16,
        reason: String,
        body: Option<String>,
    },

    /// The remote service returned a SOAP fault.
    #[error("SOAP fault {fault_code}: {fault_string}{}", upnp_error_code.map(|c| format!(" (UPnPError {})", c)).unwrap_or_default())]
    SoapFault {
        fault_code: String,
        fault_string: String,
        upnp_error_code: Option<u32>,
        upnp_error_description: Option<String>,
    },

    /// Discovery produced no usable result (no responses, or a malformed response set).
    #[error("discovery failed: {0}")]
    Discovery(String),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

pub fn validation<S1, S2>(name: S1, reason: S2) -> Error
where
    S1: Into<String>,
    S2: Display,
{
    Error::Validation {
        name: name.into(),
        reason: reason.to_string(),
    }
}

pub fn parse<S1, S2>(what: S1, reason: S2) -> Error
where
    S1: Into<String>,
    S2: Display,
{
    Error::Parse {
        what: what.into(),
        reason: reason.to_string(),
    }
}

pub fn xml_error(what: &str, e: quick_xml::Error) -> Error {
    parse(what, e)
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Transport(TransportError::Io(e))
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(TransportError::Http(e))
    }
}
