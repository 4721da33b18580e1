//! Hoops Core
//!
//! Core types shared by the Hoops front-end, client and CLI.
//!
//! This crate contains:
//! - Domain types: the basketball records (Team, Player, Coach, Position)
//! - Entity: the per-entity descriptor every generic component is built on

pub mod domain;
pub mod entity;

pub use entity::{Entity, FieldError};
