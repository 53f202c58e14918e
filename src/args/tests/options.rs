use super::*;

#[test]
fn parse_args_short_flags() -> AppResult<()> {
    let args = parse_test_args([
        "wblg",
        "https://example.com/page",
        "-i",
        "eth0",
        "-n",
        "260",
        "-t",
        "3",
        "-w",
    ])?;

    if args.interface.as_deref() != Some("eth0") {
        return Err(AppError::validation("Unexpected interface"));
    }
    if args.iterations.get() != 260 {
        return Err(AppError::validation("Unexpected iterations"));
    }
    if args.timeout != Duration::from_secs(3) {
        return Err(AppError::validation("Unexpected timeout"));
    }
    if !args.worker_stats {
        return Err(AppError::validation("Expected worker_stats"));
    }
    Ok(())
}

#[test]
fn parse_args_long_flags() -> AppResult<()> {
    let args = parse_test_args([
        "wblg",
        "--interface",
        "wlan0",
        "--iterations",
        "5",
        "--timeout",
        "750ms",
        "--worker-stats",
        "--quantum",
        "2",
        "--output-format",
        "json",
        "http://localhost:8080",
    ])?;

    if args.url.as_deref() != Some("http://localhost:8080") {
        return Err(AppError::validation("Unexpected url"));
    }
    if args.timeout != Duration::from_millis(750) {
        return Err(AppError::validation("Unexpected timeout"));
    }
    if args.quantum.get() != 2 {
        return Err(AppError::validation("Unexpected quantum"));
    }
    if !matches!(args.output_format, OutputFormat::Json) {
        return Err(AppError::validation("Expected OutputFormat::Json"));
    }
    Ok(())
}

#[test]
fn parse_args_rejects_non_numeric_iterations() -> AppResult<()> {
    if parse_test_args(["wblg", "http://localhost", "-n", "ten"]).is_ok() {
        return Err(AppError::validation("Expected non-numeric iterations to fail"));
    }
    Ok(())
}

#[test]
fn parse_args_rejects_zero_iterations() -> AppResult<()> {
    if parse_test_args(["wblg", "http://localhost", "-n", "0"]).is_ok() {
        return Err(AppError::validation("Expected zero iterations to fail"));
    }
    Ok(())
}

#[test]
fn parse_args_rejects_zero_quantum() -> AppResult<()> {
    if parse_test_args(["wblg", "http://localhost", "--quantum", "0"]).is_ok() {
        return Err(AppError::validation("Expected zero quantum to fail"));
    }
    Ok(())
}

#[test]
fn parse_args_rejects_bad_timeout() -> AppResult<()> {
    for value in ["abc", "0", "5x"] {
        if parse_test_args(["wblg", "http://localhost", "-t", value]).is_ok() {
            return Err(AppError::validation(format!(
                "Expected timeout '{}' to fail",
                value
            )));
        }
    }
    Ok(())
}
