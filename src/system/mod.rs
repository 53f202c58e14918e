pub mod interfaces;
pub mod logger;
pub mod shutdown_handlers;
