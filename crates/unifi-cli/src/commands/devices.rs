use std::io::Write;

use anyhow::anyhow;
use tracing::debug;
use unifi_api_models::DeviceListResponse;

use crate::client::{CliError, CliResult};
use crate::output::{Diagnostics, render_device_table};

/// Decode a `/v1/devices` body, print the device count and the device table.
///
/// Nothing but the debug echo is written when the body does not decode.
pub(crate) fn handle_device_listing<W: Write>(
    body: &str,
    diagnostics: Diagnostics,
    out: &mut W,
) -> CliResult<()> {
    diagnostics.note(out, format_args!("Printing results for GetDevices...{body}__"))?;

    let listing = serde_json::from_str::<DeviceListResponse>(body).map_err(CliError::decode)?;
    let total = listing.total_devices();
    debug!(
        hosts = listing.data.len(),
        devices = total,
        trace_id = %listing.trace_id,
        status = listing.http_status_code,
        "decoded device listing"
    );

    writeln!(out, "Devices count: {total}")?;

    if diagnostics.enabled() {
        writeln!(out)?;
        for host in &listing.data {
            let devices = serde_json::to_string_pretty(&host.devices).map_err(|err| {
                CliError::decode(anyhow!("failed to format devices for {}: {err}", host.host_id))
            })?;
            writeln!(out, "{devices}")?;
        }
        writeln!(out)?;
    }

    render_device_table(&listing, out)?;
    Ok(())
}
