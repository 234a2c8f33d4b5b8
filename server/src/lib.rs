//! Hostel registry service.
//!
//! [`store::HostelStore`] owns every record behind a single mutex and derives
//! each record's id from its name (`"I"` followed by the decimal FNV-1a hash).
//! [`server::ServerNode`] exposes the store as a JSON REST API on `/hostels`.

pub mod error;
pub mod hostel;
pub mod server;
pub mod store;
pub mod util;
