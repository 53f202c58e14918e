use reqwest::Client;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::HttpError;
use crate::load::FetchTarget;

/// Builds a single-use client bound to the target's interface.
///
/// Connect and read phases each get `target.timeout`. Idle pooling is off so
/// no connection outlives the fetch that opened it.
pub(super) fn build_client(target: &FetchTarget) -> Result<Client, HttpError> {
    let mut builder = Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .connect_timeout(target.timeout)
        .read_timeout(target.timeout)
        .pool_max_idle_per_host(0);

    if let Some(name) = target.interface.as_deref() {
        #[cfg(any(target_os = "android", target_os = "fuchsia", target_os = "linux"))]
        {
            builder = builder.interface(name);
        }
        #[cfg(all(
            unix,
            not(any(target_os = "android", target_os = "fuchsia", target_os = "linux"))
        ))]
        {
            let addr = crate::system::interfaces::interface_address(name)
                .ok()
                .flatten()
                .ok_or_else(|| HttpError::InterfaceAddressMissing {
                    interface: name.to_owned(),
                })?;
            builder = builder.local_address(addr);
        }
        #[cfg(not(unix))]
        {
            return Err(HttpError::InterfaceAddressMissing {
                interface: name.to_owned(),
            });
        }
    }

    builder
        .build()
        .map_err(|err| HttpError::BuildClientFailed { source: err })
}
