//! Hoops Web
//!
//! CRUD front-end for the basketball domain. Every entity (teams, players,
//! coaches, positions) gets the same generic controller, backed by a
//! repository that proxies to the remote basketball API.
//!
//! Architecture:
//! - Configuration: remote API address, bind address, outbound timeout
//! - API: generic CRUD controller, per-request cancellation, health check
//! - Reporting: injected collaborator notified of every failed action

pub mod api;
pub mod config;
pub mod report;
