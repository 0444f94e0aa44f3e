//! Core type definitions.

mod port;

pub use port::{parse_port_list, Port, PortError};
