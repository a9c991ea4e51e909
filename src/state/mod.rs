//! Persistent state.
//!
//! Only user settings survive between runs; everything else is computed
//! fresh on each request.

pub mod settings;

pub use settings::Settings;
