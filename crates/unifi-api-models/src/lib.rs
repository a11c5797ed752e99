#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Response DTOs for the UniFi Site Manager API (`https://api.ui.com`).
//!
//! The shapes mirror the JSON the service returns. Decoding is tolerant of
//! missing and `null` fields (they fall back to empty values) but strict
//! about types, so a string where a boolean belongs is still a decode error.
use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// Envelope returned by `GET /v1/devices`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceListResponse {
    /// Devices grouped by the host that manages them.
    #[serde(deserialize_with = "null_as_default")]
    pub data: Vec<HostDevices>,
    /// Status code echoed by the API inside the body.
    #[serde(deserialize_with = "null_as_default")]
    pub http_status_code: u16,
    /// Server-side trace identifier for support requests.
    #[serde(deserialize_with = "null_as_default")]
    pub trace_id: String,
}

impl DeviceListResponse {
    /// Total number of devices across every host group.
    #[must_use]
    pub fn total_devices(&self) -> usize {
        self.data.iter().map(|host| host.devices.len()).sum()
    }

    /// Iterate devices in encounter order: host-group order, then device order.
    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.data.iter().flat_map(|host| host.devices.iter())
    }
}

/// Devices reported by a single managing host.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct HostDevices {
    /// Identifier of the managing host.
    #[serde(deserialize_with = "null_as_default")]
    pub host_id: String,
    /// Display name of the managing host.
    #[serde(deserialize_with = "null_as_default")]
    pub host_name: String,
    /// Devices adopted by this host.
    #[serde(deserialize_with = "null_as_default")]
    pub devices: Vec<Device>,
    /// When the host last refreshed its device list.
    pub updated_at: Option<DateTime<FixedOffset>>,
}

/// One managed network device.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Device {
    /// Device identifier.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Hardware address.
    #[serde(deserialize_with = "null_as_default")]
    pub mac: String,
    /// User-assigned name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Marketing model name.
    #[serde(deserialize_with = "null_as_default")]
    pub model: String,
    /// Short model code.
    #[serde(deserialize_with = "null_as_default")]
    pub shortname: String,
    /// Management IP address.
    #[serde(deserialize_with = "null_as_default")]
    pub ip: String,
    /// Product line (e.g. `network`, `protect`).
    #[serde(deserialize_with = "null_as_default")]
    pub product_line: String,
    /// Connection state (e.g. `online`, `offline`).
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    /// Running firmware version.
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    /// Firmware state (e.g. `upToDate`, `updateAvailable`).
    #[serde(deserialize_with = "null_as_default")]
    pub firmware_status: String,
    /// Pending update marker; its shape varies between firmware generations.
    pub update_available: LooseValue,
    /// Whether the device is a console (gateway/controller).
    #[serde(deserialize_with = "null_as_default")]
    pub is_console: bool,
    /// Whether the device is managed by the host.
    #[serde(deserialize_with = "null_as_default")]
    pub is_managed: bool,
    /// Last boot time.
    pub startup_time: Option<DateTime<FixedOffset>>,
    /// When the device was adopted.
    pub adoption_time: Option<DateTime<FixedOffset>>,
    /// Free-form note; its shape is not documented.
    pub note: LooseValue,
    /// Icon metadata from the UniFi device database.
    #[serde(deserialize_with = "null_as_default")]
    pub uidb: Uidb,
}

/// Icon metadata attached to a device.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Uidb {
    /// Device database GUID.
    #[serde(deserialize_with = "null_as_default")]
    pub guid: String,
    /// Icon identifier.
    #[serde(deserialize_with = "null_as_default")]
    pub icon_id: String,
    /// Device database entry identifier.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Icon image hashes.
    #[serde(deserialize_with = "null_as_default")]
    pub images: UidbImages,
}

/// Icon image variants.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UidbImages {
    /// Standard icon.
    #[serde(deserialize_with = "null_as_default")]
    pub default: String,
    /// Icon without padding.
    #[serde(deserialize_with = "null_as_default")]
    pub nopadding: String,
    /// Icon used in topology views.
    #[serde(deserialize_with = "null_as_default")]
    pub topology: String,
}

/// JSON value of unknown shape.
///
/// Absent fields decode to [`LooseValue::Null`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LooseValue {
    /// JSON `null` or a missing field.
    #[default]
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number.
    Number(Number),
    /// JSON string.
    Text(String),
    /// Arrays and objects, kept verbatim.
    Other(Value),
}

/// Decodes JSON `null` as the field's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl LooseValue {
    /// Returns `true` when the value is `null` or was absent.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl Display for LooseValue {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(value) => write!(formatter, "{value}"),
            Self::Number(value) => write!(formatter, "{value}"),
            Self::Text(value) => formatter.write_str(value),
            Self::Other(value) => write!(formatter, "{value}"),
        }
    }
}
