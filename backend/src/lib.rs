//! Skills and recommendations backend.
//!
//! Hexagonal layout: the `domain` module owns the entities, services, and
//! ports; `inbound` adapts HTTP onto the driving ports; `outbound` implements
//! the driven ports over PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use middleware::trace::{Trace, TraceId};
