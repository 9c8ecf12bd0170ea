//! Presentation layer of the Smart Services Portal.
//!
//! Sign-in flow, chat assistant presenter, and the service location
//! catalog. The `portal` binary wires these to a terminal.

pub mod auth;
pub mod chat;
pub mod dotenv;
pub mod locations;
