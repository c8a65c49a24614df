//! Configuration loaded from `.lockup.toml`.

pub mod settings;

pub use settings::Settings;
