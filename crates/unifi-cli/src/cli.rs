//! Command-line client for the UniFi Site Manager API.

use std::io::{self, Write};

use clap::Parser;
use clap::error::ErrorKind;
use reqwest::Url;
use tracing::{debug, warn};
use unifi_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging};

use crate::client::{ApiKeyCredential, AppContext, CliError, CliResult, EXIT_FAILURE, dispatch};
use crate::commands::Renderer;
use crate::commands::devices::handle_device_listing;
use crate::commands::sites::handle_site_listing;
use crate::output::{Diagnostics, render_operations};
use crate::registry::{Registry, is_supported_interval};

const DEFAULT_API_URL: &str = "https://api.ui.com";
const DEFAULT_INTERVAL: &str = "5m";
const DEBUG_LOG_FILTER: &str = "warn,unifi_cli=debug";

#[derive(Parser)]
#[command(
    name = "unifi-cli",
    version,
    about = "A simple UniFi Site Manager API client"
)]
pub(crate) struct Cli {
    #[arg(long, help = "Enable debug mode")]
    pub(crate) debug: bool,
    #[arg(long, help = "Specify action to perform (e.g., GetDevices, GetSites)")]
    pub(crate) action: Option<String>,
    #[arg(
        long,
        default_value = DEFAULT_INTERVAL,
        help = "Specify time interval for API requests (e.g., 5m, 1h)"
    )]
    pub(crate) interval: String,
    #[arg(
        long,
        env = "UNIFI_KEY",
        hide_env_values = true,
        help = "API key sent as X-API-Key"
    )]
    pub(crate) api_key: Option<String>,
    #[arg(
        long,
        env = "UNIFI_API_URL",
        value_parser = parse_url,
        default_value = DEFAULT_API_URL,
        help = "Base URL of the Site Manager API"
    )]
    pub(crate) api_url: Url,
    #[arg(
        long,
        env = "UNIFI_LOG_FORMAT",
        default_value = "pretty",
        help = "Diagnostic log format on stderr (pretty or json)"
    )]
    pub(crate) log_format: LogFormat,
}

/// Parses CLI arguments, executes the requested action, and prints the
/// failure diagnostic if there is one. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return report_parse_error(&err),
    };
    install_logging(&cli);

    let mut stdout = io::stdout();
    let result = execute_builtin(cli, &mut stdout).await;

    let (exit_code, outcome) = match result {
        Ok(()) => (0, "ok"),
        Err(err) => {
            let _ = writeln!(stdout, "{}", err.display_message());
            (err.exit_code(), "error")
        }
    };
    debug!(exit_code, outcome, "command finished");
    let _ = stdout.flush();
    exit_code
}

async fn execute_builtin<W: Write + Send>(cli: Cli, out: &mut W) -> CliResult<()> {
    let registry = Registry::builtin()?;
    execute(cli, &registry, out).await
}

/// Validate the invocation, issue the request, and render the response.
pub(crate) async fn execute<W: Write + Send>(
    cli: Cli,
    registry: &Registry,
    out: &mut W,
) -> CliResult<()> {
    let diagnostics = Diagnostics::new(cli.debug);

    let action = cli.action.ok_or_else(|| {
        CliError::config("No action specified. Use --action to specify an action.")
    })?;
    let api_key = ApiKeyCredential::from_input(cli.api_key)?;

    diagnostics.note(out, format_args!("Action: {action}"))?;
    if diagnostics.enabled() {
        render_operations(&registry.sorted_by_name(), &cli.api_url, out)?;
    }

    if !is_supported_interval(&cli.interval) {
        return Err(CliError::config(
            "Invalid interval specified. Use --interval to specify a valid interval (default = 5m), either 5m or 1h.",
        ));
    }
    // Neither endpoint takes a time window; the interval is only validated.
    debug!(interval = %cli.interval, "interval accepted");

    if !registry.contains(&action) {
        return Err(CliError::config(format!(
            "Invalid action specified: {action}. Use --action to specify a valid action."
        )));
    }
    diagnostics.note(out, format_args!("Valid action specified: {action}"))?;

    let (position, operation) = registry
        .find(&action)
        .ok_or_else(|| CliError::config(format!("Action {action} not found in registry")))?;
    diagnostics.note(out, format_args!("{action} is at position: {position}"))?;

    let ctx = AppContext::new(cli.api_url, api_key, diagnostics)?;
    let outcome = dispatch(&ctx, operation).await;
    if !outcome.success {
        warn!(action = operation.name, status = ?outcome.status, "API call failed");
        return Err(CliError::Request {
            action: operation.name.to_string(),
        });
    }

    match Renderer::for_action(&action) {
        Some(Renderer::Devices) => handle_device_listing(&outcome.body, ctx.diagnostics, out),
        Some(Renderer::Sites) => handle_site_listing(&outcome.body, ctx.diagnostics, out),
        None => Err(CliError::UnknownAction(action)),
    }
}

/// Help and version requests succeed; every other parse error prints one
/// line on stdout and exits 1.
fn report_parse_error(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            0
        }
        _ => {
            let mut stdout = io::stdout();
            let _ = writeln!(stdout, "{}", parse_error_line(err));
            let _ = stdout.flush();
            EXIT_FAILURE
        }
    }
}

/// First line of clap's rendering without the `error:` label.
fn parse_error_line(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}

fn install_logging(cli: &Cli) {
    let level = if cli.debug {
        DEBUG_LOG_FILTER
    } else {
        DEFAULT_LOG_LEVEL
    };
    let config = LoggingConfig {
        level,
        format: cli.log_format,
    };
    if let Err(err) = init_logging(&config) {
        eprintln!("warning: {err:#}");
    }
}

fn parse_url(input: &str) -> Result<Url, String> {
    input
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))
}
