/*!
Per-interface IPv4 address enumeration, used to open one SSDP socket per
routable local interface rather than binding a single socket to `0.0.0.0`.
*/

use pnet::datalink;
use pnet::ipnetwork::IpNetwork;
use std::net::Ipv4Addr;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

/// One local network interface with a routable IPv4 address.
#[derive(Clone, Debug)]
pub struct Interface {
    pub name: String,
    pub address: Ipv4Addr,
}

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

/// All local interfaces carrying a non-loopback, non-unspecified IPv4
/// address. An interface with more than one such address contributes one
/// entry per address.
pub fn ipv4_interfaces() -> Vec<Interface> {
    datalink::interfaces()
        .into_iter()
        .flat_map(|ni| {
            let name = ni.name.clone();
            ni.ips
                .into_iter()
                .filter_map(move |ip| match ip {
                    IpNetwork::V4(v4) if !v4.ip().is_loopback() && !v4.ip().is_unspecified() => {
                        Some(Interface {
                            name: name.clone(),
                            address: v4.ip(),
                        })
                    }
                    _ => None,
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_and_unspecified_are_excluded() {
        // exercised indirectly; this just documents the filter's intent
        // since the actual interface set is host-dependent.
        let interfaces = ipv4_interfaces();
        assert!(interfaces.iter().all(|i| !i.address.is_loopback()));
        assert!(interfaces.iter().all(|i| !i.address.is_unspecified()));
    }
}
