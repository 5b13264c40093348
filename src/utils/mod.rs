/*!
Small platform-facing helpers shared by the SSDP engine and HTTP client.
*/

pub mod interface;
pub mod user_agent;
