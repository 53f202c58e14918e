//! Configuration loading, CLI merging, and resolution into run settings.
mod apply;
mod loader;
mod resolve;
pub mod types;

#[cfg(test)]
mod tests;

pub use apply::apply_config;
pub use loader::load_config;
pub use resolve::resolve_settings;
pub use types::LoadSettings;

pub(crate) use loader::DEFAULT_CONFIG_FILES;

#[cfg(test)]
pub(crate) use loader::load_config_file;
