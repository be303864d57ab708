//! Shopify API version definitions and the process-wide version registry.
//!
//! This module provides the [`ApiVersion`] value type and the registry of
//! versions this client understands. Sessions name a version by token; the
//! token is resolved against the registry when the session is built.
//!
//! Registry mutation ([`ApiVersion::define_version`],
//! [`ApiVersion::clear_defined_versions`]) belongs to setup and teardown.
//! Define versions before request traffic starts.

use crate::error::ConfigError;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{OnceLock, PoisonError, RwLock};

/// Name of the always-known development version.
pub const UNSTABLE: &str = "unstable";

/// Quarterly releases this build of the client knows about, oldest first.
const KNOWN_RELEASES: &[&str] = &[
    "2024-01", "2024-04", "2024-07", "2024-10", "2025-01", "2025-04", "2025-07", "2025-10",
];

/// Releases older than this are registered as unsupported.
const MINIMUM_SUPPORTED: u32 = 2025_01;

/// A Shopify API version.
///
/// Shopify releases new API versions quarterly. A version is either a dated
/// release (`YYYY-MM`) or the `unstable` development version.
///
/// # Example
///
/// ```rust
/// use shopify_session::ApiVersion;
///
/// let version = ApiVersion::release("2019-04").unwrap();
/// assert_eq!(version.name(), "2019-04");
/// assert_eq!(
///     version.api_path("https://shop1.myshopify.com"),
///     "https://shop1.myshopify.com/admin/api/2019-04"
/// );
///
/// assert!(ApiVersion::unstable() > version);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiVersion {
    name: String,
    numeric: u32,
    supported: bool,
}

impl ApiVersion {
    /// Creates a dated release version from a `YYYY-MM` string.
    ///
    /// Releases are marked supported; use [`with_supported`](Self::with_supported)
    /// to register one that is past its support window.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiVersion`] if the name is not `YYYY-MM`.
    pub fn release(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into().trim().to_lowercase();
        let numeric = Self::parse_release(&name)
            .ok_or_else(|| ConfigError::InvalidApiVersion {
                version: name.clone(),
            })?;

        Ok(Self {
            name,
            numeric,
            supported: true,
        })
    }

    /// Returns the `unstable` development version.
    #[must_use]
    pub fn unstable() -> Self {
        Self {
            name: UNSTABLE.to_string(),
            numeric: u32::MAX,
            supported: true,
        }
    }

    /// Returns this version with its supported flag replaced.
    #[must_use]
    pub const fn with_supported(mut self, supported: bool) -> Self {
        self.supported = supported;
        self
    }

    /// Returns the version token (e.g. `2019-04` or `unstable`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the numeric form used for ordering (`201904` for `2019-04`).
    #[must_use]
    pub const fn numeric_version(&self) -> u32 {
        self.numeric
    }

    /// Returns `true` if this version is within Shopify's support window.
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        self.supported
    }

    /// Returns `true` for dated releases and `false` for `unstable`.
    #[must_use]
    pub const fn is_stable(&self) -> bool {
        self.numeric != u32::MAX
    }

    /// Builds the versioned admin API root for a site.
    #[must_use]
    pub fn api_path(&self, site: &str) -> String {
        format!("{}/admin/api/{}", site.trim_end_matches('/'), self.name)
    }

    fn parse_release(s: &str) -> Option<u32> {
        let (year, month) = s.split_once('-')?;

        if year.len() != 4 || month.len() != 2 {
            return None;
        }
        if !year.chars().all(|c| c.is_ascii_digit()) || !month.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let year: u32 = year.parse().ok()?;
        let month: u32 = month.parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }

        Some(year * 100 + month)
    }
}

// Registry

fn registry() -> &'static RwLock<BTreeMap<String, ApiVersion>> {
    static REGISTRY: OnceLock<RwLock<BTreeMap<String, ApiVersion>>> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(BTreeMap::new()))
}

impl ApiVersion {
    /// Registers every version this client build understands, plus `unstable`.
    ///
    /// Safe to call more than once.
    pub fn define_known_versions() {
        Self::define_version(Self::unstable());

        for name in KNOWN_RELEASES {
            if let Ok(release) = Self::release(*name) {
                let supported = release.numeric >= MINIMUM_SUPPORTED;
                Self::define_version(release.with_supported(supported));
            }
        }
    }

    /// Registers a single version, replacing any version with the same name.
    pub fn define_version(version: Self) {
        tracing::debug!(
            "Defining API version {} (supported: {})",
            version.name,
            version.supported
        );

        registry()
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(version.name.clone(), version);
    }

    /// Removes every defined version.
    ///
    /// `unstable` remains resolvable afterwards.
    pub fn clear_defined_versions() {
        registry()
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Resolves a version token against the registry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::VersionNotFound`] if the token has not been
    /// defined.
    ///
    /// # Example
    ///
    /// ```rust
    /// use shopify_session::ApiVersion;
    ///
    /// ApiVersion::define_known_versions();
    /// let version = ApiVersion::resolve("2025-10").unwrap();
    /// assert!(version.is_supported());
    /// assert!(ApiVersion::resolve("unstable").is_ok());
    /// ```
    pub fn resolve(token: &str) -> Result<Self, ConfigError> {
        let token = token.trim().to_lowercase();

        let found = registry()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&token)
            .cloned();

        match found {
            Some(version) => Ok(version),
            None if token == UNSTABLE => Ok(Self::unstable()),
            None => Err(ConfigError::VersionNotFound { version: token }),
        }
    }

    /// Returns all defined versions, oldest first.
    #[must_use]
    pub fn defined_versions() -> Vec<Self> {
        let mut versions: Vec<Self> = registry()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        versions.sort();
        versions
    }

    /// Returns the newest defined release that is still supported.
    #[must_use]
    pub fn latest_supported() -> Option<Self> {
        Self::defined_versions()
            .into_iter()
            .filter(|v| v.is_stable() && v.is_supported())
            .max()
    }
}

impl PartialOrd for ApiVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ApiVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.numeric
            .cmp(&other.numeric)
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Parses the token format only. Use [`ApiVersion::resolve`] to look a
/// token up in the registry.
impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(UNSTABLE) {
            return Ok(Self::unstable());
        }
        Self::release(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_parses_valid_names() {
        let version = ApiVersion::release("2019-04").unwrap();
        assert_eq!(version.name(), "2019-04");
        assert_eq!(version.numeric_version(), 201_904);
        assert!(version.is_stable());
        assert!(version.is_supported());
    }

    #[test]
    fn test_release_rejects_invalid_names() {
        assert!(ApiVersion::release("invalid").is_err());
        assert!(ApiVersion::release("2024").is_err());
        assert!(ApiVersion::release("2024-1").is_err());
        assert!(ApiVersion::release("2024-13").is_err());
        assert!(ApiVersion::release("2024-00").is_err());
        assert!(ApiVersion::release("24-01").is_err());
    }

    #[test]
    fn test_unstable_is_not_stable() {
        let unstable = ApiVersion::unstable();
        assert_eq!(unstable.name(), "unstable");
        assert!(!unstable.is_stable());
    }

    #[test]
    fn test_with_supported_overrides_flag() {
        let version = ApiVersion::release("2019-04").unwrap().with_supported(false);
        assert!(!version.is_supported());
    }

    #[test]
    fn test_api_path() {
        let version = ApiVersion::release("2019-04").unwrap();
        assert_eq!(
            version.api_path("https://shop2.myshopify.com"),
            "https://shop2.myshopify.com/admin/api/2019-04"
        );
        assert_eq!(
            ApiVersion::unstable().api_path("https://shop1.myshopify.com/"),
            "https://shop1.myshopify.com/admin/api/unstable"
        );
    }

    #[test]
    fn test_version_ordering() {
        let v2019 = ApiVersion::release("2019-04").unwrap();
        let v2024 = ApiVersion::release("2024-10").unwrap();
        let v2025 = ApiVersion::release("2025-01").unwrap();

        assert!(v2019 < v2024);
        assert!(v2024 < v2025);
        assert!(v2025 < ApiVersion::unstable());
    }

    #[test]
    fn test_from_str_parses_format_only() {
        assert_eq!(
            "UNSTABLE".parse::<ApiVersion>().unwrap(),
            ApiVersion::unstable()
        );
        assert_eq!(
            " 2030-07 ".parse::<ApiVersion>().unwrap().name(),
            "2030-07"
        );
        assert!("next".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ApiVersion::unstable().to_string(), "unstable");
        assert_eq!(
            ApiVersion::release("2025-10").unwrap().to_string(),
            "2025-10"
        );
    }

    #[test]
    fn test_known_versions_resolve_after_definition() {
        ApiVersion::define_known_versions();

        let latest = ApiVersion::resolve("2025-10").unwrap();
        assert!(latest.is_supported());

        let old = ApiVersion::resolve("2024-01").unwrap();
        assert!(!old.is_supported());

        assert!(ApiVersion::latest_supported().is_some());
    }

    #[test]
    fn test_unknown_version_fails_to_resolve() {
        ApiVersion::define_known_versions();

        let result = ApiVersion::resolve("1999-01");
        assert!(matches!(
            result,
            Err(ConfigError::VersionNotFound { version }) if version == "1999-01"
        ));
    }

    #[test]
    fn test_unstable_always_resolves() {
        assert_eq!(ApiVersion::resolve("unstable").unwrap(), ApiVersion::unstable());
    }
}
