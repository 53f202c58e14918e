use thiserror::Error;

#[derive(Debug, Error)]
pub enum InterfaceError {
    #[error("Failed to enumerate network interfaces: {source}")]
    Enumerate {
        #[source]
        source: std::io::Error,
    },
    #[cfg(not(unix))]
    #[error("Network interface enumeration is not supported on this platform.")]
    Unsupported,
    #[error("No active network interfaces were found.")]
    NoneAvailable,
}
