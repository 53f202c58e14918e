use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[cfg(not(any(target_os = "android", target_os = "fuchsia", target_os = "linux")))]
    #[error("Interface '{interface}' has no usable address to bind.")]
    InterfaceAddressMissing { interface: String },
}
