//! Deterministic simulation module
//!
//! All visualization state lives here. This module must stay pure and
//! deterministic:
//! - All motion derives from the session clock and fixed velocities
//! - Seeded RNG only
//! - Stable iteration order (by arc index)
//! - No rendering or platform dependencies

pub mod arc;
pub mod frame;
pub mod impact;
pub mod kinematics;
pub mod layout;
pub mod population;

pub use arc::{Arc, EntranceState, Glow, RadiusState};
pub use frame::{FrameReport, ImpactEvent, advance};
pub use impact::{ImpactZone, check_impact};
pub use layout::Layout;
pub use population::Population;
