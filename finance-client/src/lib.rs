//! Client side of the finance service: the costing surfaces, the store they
//! share and the HTTP gateway to finance-api.

pub mod api;
pub mod cli;
pub mod config;
pub mod gateway;
pub mod login;
pub mod models;
pub mod notice;
pub mod session_store;
pub mod store;
pub mod surfaces;

#[cfg(test)]
mod testing;
