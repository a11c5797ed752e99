//! Output renderers and formatting helpers for CLI commands.

use std::fmt::Display;
use std::io::{self, Write};

use chrono::{DateTime, FixedOffset, SecondsFormat};
use reqwest::Url;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use unifi_api_models::{Device, DeviceListResponse};

use crate::registry::OperationDescriptor;

/// Verbose output enabled by `--debug`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Diagnostics {
    enabled: bool,
}

impl Diagnostics {
    pub(crate) const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub(crate) const fn enabled(self) -> bool {
        self.enabled
    }

    /// Writes one line when diagnostics are enabled.
    pub(crate) fn note<W: Write>(self, out: &mut W, message: impl Display) -> io::Result<()> {
        if self.enabled {
            writeln!(out, "{message}")?;
        }
        Ok(())
    }
}

#[derive(Tabled)]
pub(crate) struct DeviceRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Firmware")]
    firmware: String,
    #[tabled(rename = "Managed")]
    managed: bool,
    #[tabled(rename = "Startup Time")]
    startup_time: String,
}

impl DeviceRow {
    fn new(index: usize, device: &Device) -> Self {
        Self {
            index,
            mac: device.mac.clone(),
            name: device.name.clone(),
            model: device.model.clone(),
            ip: device.ip.clone(),
            status: device.status.clone(),
            version: device.version.clone(),
            firmware: device.firmware_status.clone(),
            managed: device.is_managed,
            startup_time: format_timestamp(device.startup_time),
        }
    }
}

/// One row per device in encounter order, indexed from 1.
pub(crate) fn device_rows(listing: &DeviceListResponse) -> Vec<DeviceRow> {
    listing
        .devices()
        .enumerate()
        .map(|(position, device)| DeviceRow::new(position + 1, device))
        .collect()
}

pub(crate) fn render_device_table<W: Write>(
    listing: &DeviceListResponse,
    out: &mut W,
) -> io::Result<()> {
    let table = Table::new(device_rows(listing))
        .with(Style::blank())
        .to_string();
    writeln!(out, "{table}")
}

#[derive(Tabled)]
struct OperationRow {
    #[tabled(rename = "Action")]
    name: &'static str,
    #[tabled(rename = "URL")]
    url: String,
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Description")]
    description: &'static str,
}

/// Registry dump printed in debug mode.
pub(crate) fn render_operations<W: Write>(
    operations: &[&OperationDescriptor],
    base_url: &Url,
    out: &mut W,
) -> io::Result<()> {
    let rows = operations.iter().map(|operation| OperationRow {
        name: operation.name,
        url: operation
            .url(base_url)
            .map_or_else(|_| operation.path.to_string(), |url| url.to_string()),
        method: operation.method.to_string(),
        description: operation.description,
    });
    let table = Table::new(rows).with(Style::blank()).to_string();
    writeln!(out, "{table}")
}

/// RFC 3339 with second precision; UTC renders as `Z`.
#[must_use]
pub(crate) fn format_timestamp(timestamp: Option<DateTime<FixedOffset>>) -> String {
    timestamp.map_or_else(
        || "-".to_string(),
        |value| value.to_rfc3339_opts(SecondsFormat::Secs, true),
    )
}
