/// Seed data loading from seed.toml
pub mod seed;

/// Runtime settings from environment variables
pub mod settings;
