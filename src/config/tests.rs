use super::{
    apply_config, load_config_file, resolve_settings,
    types::{ConfigFile, DurationValue},
};
use clap::{CommandFactory, FromArgMatches};
use std::time::Duration;
use tempfile::tempdir;

use crate::args::{OutputFormat, WblgArgs};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

fn parse_with_matches(argv: &[&str]) -> AppResult<(WblgArgs, clap::ArgMatches)> {
    let matches = WblgArgs::command().try_get_matches_from(argv)?;
    let args = WblgArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

fn interfaces() -> Vec<String> {
    vec!["lo".to_owned(), "eth0".to_owned()]
}

#[test]
fn parse_toml_config() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("wblg.toml");
    let content = r#"
url = "http://localhost:3000"
interface = "eth0"
iterations = 500
timeout = "2s"
worker_stats = true
quantum = 100
"#;
    std::fs::write(&path, content)?;

    let config = load_config_file(&path)?;
    if config.url.as_deref() != Some("http://localhost:3000") {
        return Err(AppError::config("Unexpected url"));
    }
    if config.interface.as_deref() != Some("eth0") {
        return Err(AppError::config("Unexpected interface"));
    }
    if config.iterations != Some(500) {
        return Err(AppError::config("Unexpected iterations"));
    }
    if !matches!(config.timeout, Some(DurationValue::Text(ref text)) if text == "2s") {
        return Err(AppError::config("Unexpected timeout"));
    }
    if config.worker_stats != Some(true) || config.quantum != Some(100) {
        return Err(AppError::config("Unexpected worker settings"));
    }
    Ok(())
}

#[test]
fn parse_json_config_with_alias() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("wblg.json");
    let content = r#"{
  "url": "https://example.com",
  "timeout": 7,
  "print_worker_stats": true,
  "output_format": "json"
}"#;
    std::fs::write(&path, content)?;

    let config = load_config_file(&path)?;
    if !matches!(config.timeout, Some(DurationValue::Seconds(7))) {
        return Err(AppError::config("Unexpected timeout"));
    }
    if config.worker_stats != Some(true) {
        return Err(AppError::config("Expected print_worker_stats alias"));
    }
    if config.output_format != Some(OutputFormat::Json) {
        return Err(AppError::config("Unexpected output_format"));
    }
    Ok(())
}

#[test]
fn unsupported_extension_is_rejected() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("wblg.yaml");
    std::fs::write(&path, "url: http://localhost")?;

    match load_config_file(&path) {
        Err(AppError::Config(ConfigError::UnsupportedExtension { ext })) if ext == "yaml" => Ok(()),
        Err(err) => Err(AppError::config(format!("Unexpected error: {}", err))),
        Ok(_) => Err(AppError::config("Expected yaml config to fail")),
    }
}

#[test]
fn config_fills_unset_cli_values() -> AppResult<()> {
    let (mut args, matches) = parse_with_matches(&["wblg"])?;
    let config = ConfigFile {
        url: Some("http://localhost:3000".to_owned()),
        interface: Some("lo".to_owned()),
        iterations: Some(42),
        timeout: Some(DurationValue::Text("1500ms".to_owned())),
        worker_stats: Some(true),
        quantum: Some(10),
        output_format: Some(OutputFormat::Json),
        no_color: Some(true),
    };

    apply_config(&mut args, &matches, &config)?;

    let checks = [
        (
            args.url.as_deref() == Some("http://localhost:3000"),
            "Unexpected url",
        ),
        (args.interface.as_deref() == Some("lo"), "Unexpected interface"),
        (args.iterations.get() == 42, "Unexpected iterations"),
        (
            args.timeout == Duration::from_millis(1500),
            "Unexpected timeout",
        ),
        (args.worker_stats, "Expected worker_stats"),
        (args.quantum.get() == 10, "Unexpected quantum"),
        (
            matches!(args.output_format, OutputFormat::Json),
            "Unexpected output_format",
        ),
        (args.no_color, "Expected no_color"),
    ];
    for (ok, message) in checks {
        if !ok {
            return Err(AppError::config(message));
        }
    }
    Ok(())
}

#[test]
fn cli_values_override_config() -> AppResult<()> {
    let (mut args, matches) =
        parse_with_matches(&["wblg", "http://cli.example", "-i", "eth0", "-n", "3"])?;
    let config = ConfigFile {
        url: Some("http://config.example".to_owned()),
        interface: Some("lo".to_owned()),
        iterations: Some(99),
        ..ConfigFile::default()
    };

    apply_config(&mut args, &matches, &config)?;

    if args.url.as_deref() != Some("http://cli.example") {
        return Err(AppError::config("CLI url should win"));
    }
    if args.interface.as_deref() != Some("eth0") {
        return Err(AppError::config("CLI interface should win"));
    }
    if args.iterations.get() != 3 {
        return Err(AppError::config("CLI iterations should win"));
    }
    Ok(())
}

#[test]
fn config_rejects_zero_iterations() -> AppResult<()> {
    let (mut args, matches) = parse_with_matches(&["wblg"])?;
    let config = ConfigFile {
        iterations: Some(0),
        ..ConfigFile::default()
    };

    match apply_config(&mut args, &matches, &config) {
        Err(AppError::Config(ConfigError::FieldMustBePositive { field, .. }))
            if field == "iterations" =>
        {
            Ok(())
        }
        Err(err) => Err(AppError::config(format!("Unexpected error: {}", err))),
        Ok(()) => Err(AppError::config("Expected zero iterations to fail")),
    }
}

#[test]
fn resolve_accepts_listed_interface() -> AppResult<()> {
    let (args, _) = parse_with_matches(&["wblg", "http://localhost/x", "-i", "eth0", "-n", "7"])?;
    let settings = resolve_settings(&args, &interfaces())?;

    if settings.interface != "eth0" {
        return Err(AppError::validation("Unexpected interface"));
    }
    if settings.url.as_str() != "http://localhost/x" {
        return Err(AppError::validation("Unexpected url"));
    }
    if settings.iterations.get() != 7 || settings.quantum.get() != 250 {
        return Err(AppError::validation("Unexpected counts"));
    }
    Ok(())
}

#[test]
fn resolve_rejects_unknown_interface() -> AppResult<()> {
    let (args, _) = parse_with_matches(&["wblg", "http://localhost", "-i", "wlan9"])?;
    match resolve_settings(&args, &interfaces()) {
        Err(AppError::Validation(ValidationError::UnknownInterface {
            interface,
            available,
        })) if interface == "wlan9" && available == "lo\neth0" => Ok(()),
        Err(err) => Err(AppError::validation(format!("Unexpected error: {}", err))),
        Ok(_) => Err(AppError::validation("Expected unknown interface to fail")),
    }
}

#[test]
fn resolve_requires_interface() -> AppResult<()> {
    let (args, _) = parse_with_matches(&["wblg", "http://localhost"])?;
    if !matches!(
        resolve_settings(&args, &interfaces()),
        Err(AppError::Validation(ValidationError::MissingInterface))
    ) {
        return Err(AppError::validation("Expected MissingInterface"));
    }
    Ok(())
}

#[test]
fn resolve_requires_valid_url() -> AppResult<()> {
    let (missing, _) = parse_with_matches(&["wblg", "-i", "lo"])?;
    if !matches!(
        resolve_settings(&missing, &interfaces()),
        Err(AppError::Validation(ValidationError::MissingUrl))
    ) {
        return Err(AppError::validation("Expected MissingUrl"));
    }

    let (malformed, _) = parse_with_matches(&["wblg", "not-a-url", "-i", "lo"])?;
    if !matches!(
        resolve_settings(&malformed, &interfaces()),
        Err(AppError::Validation(ValidationError::InvalidUrl { .. }))
    ) {
        return Err(AppError::validation("Expected InvalidUrl"));
    }
    Ok(())
}
