//! Configuration for reflectguard. TOML-based, no CLI layer.

pub mod checker_config;

pub use checker_config::CheckerConfig;
