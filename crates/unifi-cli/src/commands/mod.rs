//! Response handlers grouped by endpoint.

pub(crate) mod devices;
pub(crate) mod sites;

/// Response handler selected for a validated action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Renderer {
    Devices,
    Sites,
}

impl Renderer {
    /// `None` when the action has no handler, even if the registry knows it.
    pub(crate) fn for_action(action: &str) -> Option<Self> {
        match action.to_lowercase().as_str() {
            "getdevices" => Some(Self::Devices),
            "getsites" => Some(Self::Sites),
            _ => None,
        }
    }
}
