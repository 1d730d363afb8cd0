//! Infrastructure: port traits and concrete adapters.

pub mod clock;
pub mod http;
pub mod identity;
pub mod ports;
