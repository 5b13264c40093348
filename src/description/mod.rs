/*!
The device and service description model (component B): types produced by
parsing a UPnP root device description and its services' SCPDs.
*/

pub mod model;
pub mod parse;

pub use model::{Action, ArgDef, RawDevice, RawService, StateVariable};
