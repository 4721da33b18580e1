//! Core domain types
//!
//! Plain records mirrored from the remote basketball API. Identifiers are
//! assigned by the remote service; a record that was never stored has id `0`.

pub mod coach;
pub mod player;
pub mod position;
pub mod team;

pub use coach::Coach;
pub use player::Player;
pub use position::Position;
pub use team::Team;

/// Serde predicate used to omit unassigned identifiers from request bodies
pub(crate) fn is_unassigned(id: &i32) -> bool {
    *id == 0
}
