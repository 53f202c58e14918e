mod app;
mod config;
mod http;
mod interface;
mod load;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use http::HttpError;
pub use interface::InterfaceError;
pub use load::LoadError;
pub use validation::ValidationError;
