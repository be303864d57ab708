//! Integration tests for the process-wide API version registry.
//!
//! Every test here mutates the shared registry, so each one holds
//! `REGISTRY_LOCK` for its whole body.

use std::sync::{Mutex, MutexGuard, PoisonError};

use shopify_session::{ApiVersion, ConfigError, Session};

static REGISTRY_LOCK: Mutex<()> = Mutex::new(());

fn lock_registry() -> MutexGuard<'static, ()> {
    REGISTRY_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

#[test]
fn test_clear_defined_versions_makes_releases_unresolvable() {
    let _guard = lock_registry();
    ApiVersion::define_known_versions();
    assert!(ApiVersion::resolve("2025-10").is_ok());

    ApiVersion::clear_defined_versions();

    assert!(matches!(
        ApiVersion::resolve("2025-10"),
        Err(ConfigError::VersionNotFound { version }) if version == "2025-10"
    ));
    assert!(ApiVersion::defined_versions().is_empty());
    assert!(ApiVersion::latest_supported().is_none());
}

#[test]
fn test_unstable_survives_clear() {
    let _guard = lock_registry();
    ApiVersion::clear_defined_versions();

    let version = ApiVersion::resolve("unstable").unwrap();

    assert_eq!(version, ApiVersion::unstable());
    assert!(!version.is_stable());
}

#[test]
fn test_session_with_undefined_version_fails() {
    let _guard = lock_registry();
    ApiVersion::clear_defined_versions();

    let result = Session::new("shop1.myshopify.com", "2019-04", "token1");
    assert!(matches!(result, Err(ConfigError::VersionNotFound { .. })));

    ApiVersion::define_version(ApiVersion::release("2019-04").unwrap());
    let session = Session::new("shop1.myshopify.com", "2019-04", "token1").unwrap();
    assert_eq!(session.api_version().name(), "2019-04");
}

#[test]
fn test_define_known_versions_marks_old_releases_unsupported() {
    let _guard = lock_registry();
    ApiVersion::clear_defined_versions();
    ApiVersion::define_known_versions();

    assert!(!ApiVersion::resolve("2024-10").unwrap().is_supported());
    assert!(ApiVersion::resolve("2025-01").unwrap().is_supported());
    assert_eq!(
        ApiVersion::latest_supported().map(|v| v.name().to_string()),
        Some("2025-10".to_string())
    );
}

#[test]
fn test_defined_versions_are_sorted_oldest_first() {
    let _guard = lock_registry();
    ApiVersion::clear_defined_versions();
    ApiVersion::define_version(ApiVersion::release("2025-04").unwrap());
    ApiVersion::define_version(ApiVersion::unstable());
    ApiVersion::define_version(ApiVersion::release("2024-07").unwrap());

    let names: Vec<String> = ApiVersion::defined_versions()
        .iter()
        .map(|v| v.name().to_string())
        .collect();

    assert_eq!(names, ["2024-07", "2025-04", "unstable"]);
}

#[test]
fn test_redefining_a_version_replaces_it() {
    let _guard = lock_registry();
    ApiVersion::clear_defined_versions();
    ApiVersion::define_version(ApiVersion::release("2025-04").unwrap());
    ApiVersion::define_version(ApiVersion::release("2025-04").unwrap().with_supported(false));

    assert_eq!(ApiVersion::defined_versions().len(), 1);
    assert!(!ApiVersion::resolve("2025-04").unwrap().is_supported());
}
