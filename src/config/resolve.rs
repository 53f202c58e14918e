use crate::args::{WblgArgs, parsers::parse_target_url};
use crate::error::{AppError, AppResult, ValidationError};

use super::types::LoadSettings;

/// Validates merged arguments against the interfaces available on this host.
///
/// Nothing is dispatched until this succeeds, so a bad interface, URL or
/// count never produces a partial run.
///
/// # Errors
///
/// Returns a validation error for an unknown or missing interface and for a
/// missing or malformed URL.
pub fn resolve_settings(args: &WblgArgs, available: &[String]) -> AppResult<LoadSettings> {
    let interface = match args.interface.as_deref() {
        Some(name) if available.iter().any(|candidate| candidate == name) => name.to_owned(),
        Some(name) => {
            return Err(AppError::validation(ValidationError::UnknownInterface {
                interface: name.to_owned(),
                available: available.join("\n"),
            }));
        }
        None => return Err(AppError::validation(ValidationError::MissingInterface)),
    };

    let raw_url = args
        .url
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| AppError::validation(ValidationError::MissingUrl))?;
    let url = parse_target_url(raw_url)?;

    Ok(LoadSettings {
        url,
        interface,
        iterations: args.iterations,
        timeout: args.timeout,
        print_worker_stats: args.worker_stats,
        quantum: args.quantum,
        output_format: args.output_format,
    })
}
