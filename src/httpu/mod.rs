/*!
HTTP-over-UDP framing (HTTPMU) for SSDP: the `M-SEARCH` request line and an
incoming multicast datagram's status line/headers, independent of the
socket plumbing in [`crate::ssdp`].
*/

mod request;
mod response;

pub use request::Request;
pub use response::Response;
