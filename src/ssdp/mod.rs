/*!
SSDP discovery (component E): one UDP socket per routable local IPv4
interface, an `M-SEARCH` sent from each, and a deadline-bounded receive
loop that de-duplicates responses by `USN`.
*/

use crate::device::Device;
use crate::error::{self, Error};
use crate::httpu::{Request, Response as WireResponse};
use crate::policy::{self, SessionPolicy};
use crate::syntax::*;
use crate::utils::interface::{self, Interface};
use crate::utils::user_agent;
use socket2::{Domain, Protocol, Socket, Type};
use std::collections::{HashMap, HashSet};
use std::net::{SocketAddrV4, UdpSocket};
use std::str::FromStr;
use std::time::{Duration, Instant};

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct DiscoverOptions {
    pub timeout: Duration,
    pub mx: u32,
    pub search_target: String,
    pub ssdp_in_port: Option<u16>,
}

impl Default for DiscoverOptions {
    fn default() -> Self {
        DiscoverOptions {
            timeout: Duration::from_secs(u64::from(policy::DEFAULT_MX_SECS) + 1),
            mx: policy::DEFAULT_MX_SECS,
            search_target: "ssdp:all".to_string(),
            ssdp_in_port: None,
        }
    }
}

/// One discovered device announcement. `usn` is the de-duplication key;
/// `location` may be upgraded to a full [`Device`] with [`into_device`](SsdpResponse::into_device).
#[derive(Clone, Debug)]
pub struct SsdpResponse {
    pub location: String,
    pub server: String,
    pub search_target: String,
    pub usn: String,
    pub max_age: Option<Duration>,
    pub host: Option<String>,
    pub ext: Option<String>,
    pub other_headers: HashMap<String, String>,
}

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

/// Multicast `M-SEARCH` on every routable local interface and collect
/// unique responses until `options.timeout` elapses.
pub fn discover(options: DiscoverOptions) -> Result<Vec<SsdpResponse>, Error> {
    if options.mx as u128 > options.timeout.as_secs() as u128 {
        return Err(error::validation("mx", "must not exceed the discovery timeout"));
    }

    let interfaces = interface::ipv4_interfaces();
    if interfaces.is_empty() {
        return Err(Error::Discovery("no usable network interfaces".to_string()));
    }

    let mut sockets = Vec::new();
    for iface in &interfaces {
        match open_socket(iface, options.ssdp_in_port) {
            Ok(socket) => sockets.push(socket),
            Err(e) => warn!("discover - skipping interface {}: {}", iface.name, e),
        }
    }
    if sockets.is_empty() {
        return Err(Error::Discovery("no interface could open a discovery socket".to_string()));
    }

    let request = search_request(&options);
    let message: String = (&request).into();
    let destination: SocketAddrV4 = SocketAddrV4::from_str(MULTICAST_ADDRESS).expect("MULTICAST_ADDRESS is well-formed");
    for socket in &sockets {
        socket.send_to(message.as_bytes(), destination)?;
    }

    let responses = receive_until_deadline(&sockets, options.timeout);
    Ok(dedup_by_usn(responses))
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl SsdpResponse {
    /// Fetch and parse the device description at `location` (the
    /// "optional upgrade" path from a lightweight discovery result to a
    /// full navigable [`Device`]).
    pub fn into_device(self, policy: SessionPolicy) -> Result<Device, Error> {
        Device::from_location(&self.location, policy)
    }
}

// ------------------------------------------------------------------------------------------------
// Private Functions
// ------------------------------------------------------------------------------------------------

fn open_socket(iface: &Interface, port: Option<u16>) -> Result<UdpSocket, Error> {
    let bind_addr = SocketAddrV4::new(iface.address, port.unwrap_or(0));
    let raw = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
    raw.set_reuse_address(true)?;
    raw.bind(&std::net::SocketAddr::V4(bind_addr).into())?;

    raw.set_multicast_if_v4(&iface.address)?;

    let socket: UdpSocket = raw.into();
    socket.set_multicast_ttl_v4(DEFAULT_MULTICAST_TTL)?;
    Ok(socket)
}

fn search_request(options: &DiscoverOptions) -> Request {
    Request::new(HTTP_METHOD_SEARCH)
        .header(HTTP_HEADER_HOST, MULTICAST_ADDRESS)
        .header(HTTP_HEADER_MAN, HTTP_EXTENSION)
        .header(HTTP_HEADER_MX, options.mx.to_string())
        .header(HTTP_HEADER_ST, options.search_target.as_str())
        .header(HTTP_HEADER_USER_AGENT, user_agent::make())
}

fn receive_until_deadline(sockets: &[UdpSocket], timeout: Duration) -> Vec<SsdpResponse> {
    let deadline = Instant::now() + timeout;
    let mut responses = Vec::new();
    let mut buf = [0u8; 1500];

    while Instant::now() < deadline {
        for socket in sockets {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            let slice = remaining.min(Duration::from_millis(200));
            if socket.set_read_timeout(Some(slice)).is_err() {
                continue;
            }
            match socket.recv_from(&mut buf) {
                Ok((received, _from)) => {
                    if let Some(response) = parse_response(&buf[..received]) {
                        responses.push(response);
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock || e.kind() == std::io::ErrorKind::TimedOut => {}
                Err(e) => warn!("discover - socket read failed: {}", e),
            }
        }
    }
    responses
}

fn parse_response(datagram: &[u8]) -> Option<SsdpResponse> {
    let wire = match WireResponse::parse(datagram) {
        Ok(wire) => wire,
        Err(e) => {
            debug!("discover - dropping unparseable datagram: {}", e);
            return None;
        }
    };
    if wire.status_code != 200 {
        return None;
    }

    let location = wire.header(HTTP_HEADER_LOCATION)?.to_string();
    let usn = wire.header(HTTP_HEADER_USN)?.to_string();
    let server = wire.header(HTTP_HEADER_SERVER).unwrap_or("").to_string();
    let search_target = wire.header(HTTP_HEADER_ST).unwrap_or("").to_string();
    let max_age = wire.header(HTTP_HEADER_CACHE_CONTROL).and_then(parse_max_age);
    let host = wire.header(HTTP_HEADER_HOST).map(str::to_string);
    let ext = wire.header(HTTP_HEADER_EXT).map(str::to_string);

    let consumed: HashSet<&str> = [
        HTTP_HEADER_LOCATION,
        HTTP_HEADER_USN,
        HTTP_HEADER_SERVER,
        HTTP_HEADER_ST,
        HTTP_HEADER_CACHE_CONTROL,
        HTTP_HEADER_HOST,
        HTTP_HEADER_EXT,
    ]
    .iter()
    .copied()
    .collect();
    let other_headers = wire
        .headers
        .iter()
        .filter(|(k, _)| !consumed.contains(k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    Some(SsdpResponse {
        location,
        server,
        search_target,
        usn,
        max_age,
        host,
        ext,
        other_headers,
    })
}

fn parse_max_age(cache_control: &str) -> Option<Duration> {
    cache_control
        .split(',')
        .find_map(|part| part.trim().strip_prefix("max-age="))
        .and_then(|secs| secs.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

fn dedup_by_usn(responses: Vec<SsdpResponse>) -> Vec<SsdpResponse> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for response in responses {
        if seen.insert(response.usn.clone()) {
            unique.push(response);
        }
    }
    unique
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------
