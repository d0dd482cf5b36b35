//! Core game module containing the simulation, configuration, shared components,
//! resources, events, and constants.

mod components;
mod config;
mod constants;
mod error;
mod events;
mod resources;
mod state;

pub use components::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use events::*;
pub use resources::*;
pub use state::*;
