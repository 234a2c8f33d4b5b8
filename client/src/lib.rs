//! Client side of the hostelites service: the [`client_api::HostelApi`] trait, its
//! HTTP implementation and the command parser shared by the shell.

pub mod client_api;
pub mod command;
pub mod hostel_client;
