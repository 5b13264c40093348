/*!

A client-side library for the UPnP device architecture: discovery over
SSDP, device and service description over HTTP, and action invocation
over SOAP.

More information:

* [UPnP Device Architecture 1.0](http://www.upnp.org/specs/arch/UPnP-arch-DeviceArchitecture-v1.0.pdf)

*/

#![warn(
    missing_debug_implementations,
    unused_extern_crates,
    rust_2018_idioms
)]

#[macro_use]
extern crate tracing;

pub mod error;
pub mod syntax;
pub mod types;
pub mod policy;
mod http_client;
pub mod description;
pub mod soap;
mod httpu;
pub mod ssdp;
pub mod device;
mod utils;

pub use crate::device::{Device, Service};
pub use crate::error::Error;
pub use crate::policy::SessionPolicy;
