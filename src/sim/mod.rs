//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied dt, no wall clocks
//! - Seeded RNG only, owned by the session
//! - Stable iteration order (by entity id)
//! - No rendering or platform dependencies

pub mod body;
pub mod field;
pub mod state;
pub mod tick;

pub use body::Body;
pub use field::FieldSpawner;
pub use state::{
    DrawEntity, DrawKind, Entity, EntityId, GameEvent, Kind, Snapshot, Tier, World,
};
pub use tick::{TickInput, tick};
