//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (solids in stored order)
//! - Input read by value, never written
//! - No rendering or platform dependencies

pub mod body;
pub mod clock;
pub mod collision;
pub mod frame;
pub mod game;
pub mod input;
pub mod state;
pub mod systems;
pub mod tick;

pub use body::{Aabb, Body, Player};
pub use clock::FixedTimestep;
pub use collision::{Contact, Resolution, overlaps, resolve_solids};
pub use frame::{BodyView, Frame, FrameSink, build_frame, interpolate};
pub use game::{FrameReport, Game};
pub use input::{InputState, Intent};
pub use state::{Camera, Snapshot, World};
pub use systems::{Pipeline, Stage, StepContext};
pub use tick::{TickOutcome, tick};
