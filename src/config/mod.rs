//! Configuration: the per-vault salt and the session timers.

pub mod settings;

pub use settings::Settings;
