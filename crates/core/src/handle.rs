//! Organization handle: the textual key jobs are addressed by.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Stable textual identifier of a company (e.g. `"c1"`, `"jackson-sons"`).
///
/// A job is addressed by the handle of the company that owns it, so at most
/// one job per handle is reachable through read/update/delete.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CompanyHandle(String);

impl CompanyHandle {
    pub fn new(handle: impl Into<String>) -> Result<Self, DomainError> {
        let handle = handle.into();
        if handle.trim().is_empty() {
            return Err(DomainError::validation("companyHandle must not be empty"));
        }
        Ok(Self(handle))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for CompanyHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CompanyHandle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CompanyHandle {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CompanyHandle> for String {
    fn from(value: CompanyHandle) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_handle_is_rejected() {
        assert!(CompanyHandle::new("").is_err());
        assert!(CompanyHandle::new("   ").is_err());
    }

    #[test]
    fn handle_round_trips_through_json_as_plain_string() {
        let handle: CompanyHandle = "c1".parse().unwrap();
        assert_eq!(serde_json::to_value(&handle).unwrap(), serde_json::json!("c1"));

        let back: CompanyHandle = serde_json::from_value(serde_json::json!("c1")).unwrap();
        assert_eq!(back, handle);
        assert!(serde_json::from_value::<CompanyHandle>(serde_json::json!("")).is_err());
    }
}
