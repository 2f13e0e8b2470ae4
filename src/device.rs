//! Target device profile

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Device tag for touch-first targets without a keyboard
pub const MOBILE: &str = "mobile";

/// Set of device tags the UI targets. Empty means desktop/keyboard-capable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceProfile(BTreeSet<String>);

impl DeviceProfile {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(tags.into_iter().map(|t| t.as_ref().to_lowercase()).collect())
    }

    pub fn desktop() -> Self {
        Self::default()
    }

    pub fn mobile() -> Self {
        Self::new([MOBILE])
    }

    /// Whether the profile carries a device tag (case-insensitive)
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(&tag.to_lowercase())
    }

    /// Whether any of the given tags is in the profile
    pub fn contains_any(&self, tags: &[String]) -> bool {
        tags.iter().any(|t| self.contains(t))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_contains() {
        let profile = DeviceProfile::new(["Mobile", "tv"]);
        assert!(profile.contains("mobile"));
        assert!(profile.contains("TV"));
        assert!(!profile.contains("desktop"));
        assert!(profile.contains_any(&["watch".to_string(), "tv".to_string()]));
    }

    #[test]
    fn test_desktop_is_empty() {
        assert!(DeviceProfile::desktop().is_empty());
        assert!(!DeviceProfile::mobile().is_empty());
    }

    #[test]
    fn test_yaml_roundtrip_shape() {
        let profile: DeviceProfile = serde_yaml::from_str("[mobile]").unwrap();
        assert_eq!(profile, DeviceProfile::mobile());
    }
}
