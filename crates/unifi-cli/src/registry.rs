//! Static catalogue of supported API operations and the input validators.

use reqwest::{Method, Url};
use thiserror::Error;

/// Intervals accepted by `--interval`.
pub(crate) const SUPPORTED_INTERVALS: [&str; 2] = ["5m", "1h"];

/// Describes one callable endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OperationDescriptor {
    pub(crate) name: &'static str,
    pub(crate) path: &'static str,
    pub(crate) method: Method,
    pub(crate) description: &'static str,
}

impl OperationDescriptor {
    pub(crate) const fn get(
        name: &'static str,
        path: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            path,
            method: Method::GET,
            description,
        }
    }

    /// Absolute endpoint URL for the given API base. The path is relative,
    /// so a base with a path prefix (a proxy mount) keeps it.
    pub(crate) fn url(&self, base: &Url) -> Result<Url, url::ParseError> {
        if base.path().ends_with('/') {
            return base.join(self.path);
        }
        let mut directory = base.clone();
        let prefix = format!("{}/", base.path());
        directory.set_path(&prefix);
        directory.join(self.path)
    }

    fn matches(&self, action: &str) -> bool {
        self.name.to_lowercase() == action.to_lowercase()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum RegistryError {
    #[error("operation '{name}' is registered more than once")]
    DuplicateName { name: &'static str },
}

/// Immutable list of operations; names are unique ignoring case.
#[derive(Debug, Clone)]
pub(crate) struct Registry {
    operations: Vec<OperationDescriptor>,
}

impl Registry {
    pub(crate) fn new(operations: Vec<OperationDescriptor>) -> Result<Self, RegistryError> {
        for (index, operation) in operations.iter().enumerate() {
            if operations[..index]
                .iter()
                .any(|earlier| earlier.matches(operation.name))
            {
                return Err(RegistryError::DuplicateName {
                    name: operation.name,
                });
            }
        }
        Ok(Self { operations })
    }

    pub(crate) fn builtin() -> Result<Self, RegistryError> {
        Self::new(vec![
            OperationDescriptor::get(
                "GetDevices",
                "v1/devices",
                "Fetches devices from the Unifi API",
            ),
            OperationDescriptor::get("GetSites", "v1/sites", "Fetches sites from the Unifi API"),
        ])
    }

    /// Returns `true` when `action` names exactly one registered operation.
    pub(crate) fn contains(&self, action: &str) -> bool {
        self.find(action).is_some()
    }

    /// Position and descriptor of the operation named `action`.
    pub(crate) fn find(&self, action: &str) -> Option<(usize, &OperationDescriptor)> {
        self.operations
            .iter()
            .enumerate()
            .find(|(_, operation)| operation.matches(action))
    }

    /// Operations ordered by name; the registry itself keeps its order.
    pub(crate) fn sorted_by_name(&self) -> Vec<&OperationDescriptor> {
        let mut sorted: Vec<&OperationDescriptor> = self.operations.iter().collect();
        sorted.sort_by(|left, right| left.name.cmp(right.name));
        sorted
    }
}

/// Returns `true` for the interval values the API understands.
pub(crate) fn is_supported_interval(interval: &str) -> bool {
    SUPPORTED_INTERVALS
        .iter()
        .any(|supported| *supported == interval)
}
