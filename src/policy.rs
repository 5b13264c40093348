/*!
Session policy (component F): HTTP auth, headers, timeout, TLS trust and
client-cert settings, applied uniformly to the root description fetch, the
SCPD fetch and every SOAP POST.

Three layers, shallowest wins: a per-call override, then a device-level
policy, then the library default. An explicit `None` at the per-call layer
suppresses a device-level value rather than falling through to it — see
[`SessionPolicy::resolve`].
*/

use std::collections::HashMap;
use std::time::Duration;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

/// `(cert_path, key_path)` for TLS client-certificate authentication.
pub type ClientCert = (String, String);

/// Per-device or per-call settings. Every field is optional; `None` means
/// "not specified at this layer", not "explicitly cleared" — clearing a
/// device-level value from a call is done with [`Override::Clear`].
#[derive(Clone, Debug, Default)]
pub struct SessionPolicy {
    pub http_auth: Option<String>,
    pub http_headers: Option<HashMap<String, String>>,
    pub timeout: Option<Duration>,
    pub allow_self_signed_ssl: Option<bool>,
    pub cert: Option<ClientCert>,
    pub ssdp_in_port: Option<u16>,
}

/// A per-call field override: either inherit from the device-level policy
/// (the default when a per-call policy simply omits the field), explicitly
/// clear it, or set a new value.
#[derive(Clone, Debug)]
pub enum Override<T> {
    Inherit,
    Clear,
    Set(T),
}

impl<T> Default for Override<T> {
    fn default() -> Self {
        Override::Inherit
    }
}

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_MX_SECS: u32 = 3;

/// The library's built-in defaults: 30s timeout, no auth, no extra headers,
/// no self-signed TLS, no client cert, ephemeral SSDP port.
pub fn library_defaults() -> SessionPolicy {
    SessionPolicy {
        http_auth: None,
        http_headers: None,
        timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        allow_self_signed_ssl: Some(false),
        cert: None,
        ssdp_in_port: None,
    }
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl SessionPolicy {
    /// Resolve this device-level policy against the library defaults,
    /// filling in any field this policy leaves unset.
    pub fn with_defaults(&self) -> SessionPolicy {
        let defaults = library_defaults();
        SessionPolicy {
            http_auth: self.http_auth.clone().or(defaults.http_auth),
            http_headers: self.http_headers.clone().or(defaults.http_headers),
            timeout: self.timeout.or(defaults.timeout),
            allow_self_signed_ssl: self.allow_self_signed_ssl.or(defaults.allow_self_signed_ssl),
            cert: self.cert.clone().or(defaults.cert),
            ssdp_in_port: self.ssdp_in_port.or(defaults.ssdp_in_port),
        }
    }

    /// Apply a per-call override on top of this (already-defaulted)
    /// device-level policy. `overrides` is `None` when the caller supplies
    /// nothing at all; when `Some`, its individual fields may still
    /// `Inherit` from `self`.
    pub fn resolve(&self, overrides: Option<&CallOverrides>) -> SessionPolicy {
        match overrides {
            None => self.clone(),
            Some(o) => SessionPolicy {
                http_auth: apply(&self.http_auth, &o.http_auth),
                http_headers: apply(&self.http_headers, &o.http_headers),
                timeout: apply(&self.timeout, &o.timeout),
                allow_self_signed_ssl: apply(&self.allow_self_signed_ssl, &o.allow_self_signed_ssl),
                cert: apply(&self.cert, &o.cert),
                ssdp_in_port: apply(&self.ssdp_in_port, &o.ssdp_in_port),
            },
        }
    }
}

fn apply<T: Clone>(device_level: &Option<T>, call_level: &Override<T>) -> Option<T> {
    match call_level {
        Override::Inherit => device_level.clone(),
        Override::Clear => None,
        Override::Set(v) => Some(v.clone()),
    }
}

/// A per-call set of [`Override`]s, one per [`SessionPolicy`] field.
#[derive(Clone, Debug, Default)]
pub struct CallOverrides {
    pub http_auth: Override<String>,
    pub http_headers: Override<HashMap<String, String>>,
    pub timeout: Override<Duration>,
    pub allow_self_signed_ssl: Override<bool>,
    pub cert: Override<ClientCert>,
    pub ssdp_in_port: Override<u16>,
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------
