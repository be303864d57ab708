//! Per-thread and per-task activation of Shopify sessions.
//!
//! Every outgoing resource request is built from a [`ResourceContext`]: the
//! site, headers and API version of one tenant. [`ShopifyResource`] keeps one
//! such context per execution context, so concurrently running threads (or
//! tasks) can each act for a different shop without seeing each other's
//! site or token.
//!
//! # Layers
//!
//! - **Static defaults**: built once per process from a [`ShopifyConfig`]
//!   (`User-Agent`, `Accept`, configured extra headers). Never mutated after
//!   initialization.
//! - **Thread overlay**: a `thread_local!` slot written by
//!   [`ShopifyResource::activate_session`], [`ShopifyResource::set_site`] and
//!   [`ShopifyResource::set_headers`]; reset by
//!   [`ShopifyResource::clear_session`].
//! - **Task overlay**: inside [`ShopifyResource::scope`], the same operations
//!   act on a `task_local!` slot owned by the scoped future instead, which
//!   stays correct when a multi-threaded runtime moves the task between
//!   worker threads.
//!
//! # Example
//!
//! ```rust
//! use shopify_session::{ApiVersion, Session, ShopifyResource};
//!
//! ApiVersion::define_known_versions();
//! let session = Session::new("shop1.myshopify.com", "unstable", "token1").unwrap();
//!
//! ShopifyResource::activate_session(&session);
//! assert_eq!(
//!     ShopifyResource::site().as_deref(),
//!     Some("https://shop1.myshopify.com/admin/api/unstable")
//! );
//!
//! ShopifyResource::clear_session();
//! assert!(ShopifyResource::site().is_none());
//! assert!(ShopifyResource::headers().contains_key("User-Agent"));
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::sync::OnceLock;

use crate::auth::Session;
use crate::clients::{HttpError, HttpTransport, ShopifyConnection, Transport};
use crate::config::{ApiVersion, ShopifyConfig, SiteUrl};
use crate::error::ConfigError;
use crate::rest::ResourceError;

/// Header carrying the session's access token.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Header carrying Basic credentials taken from a site URL.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Process-wide defaults every context starts from.
#[derive(Debug)]
struct ResourceDefaults {
    config: ShopifyConfig,
    headers: HashMap<String, String>,
}

impl ResourceDefaults {
    fn from_config(config: ShopifyConfig) -> Self {
        let mut headers = config.default_headers().clone();
        headers
            .entry("Accept".to_string())
            .or_insert_with(|| "application/json".to_string());
        headers.insert("User-Agent".to_string(), config.user_agent());

        Self { config, headers }
    }
}

static DEFAULTS: OnceLock<ResourceDefaults> = OnceLock::new();

fn defaults() -> &'static ResourceDefaults {
    DEFAULTS.get_or_init(|| ResourceDefaults::from_config(ShopifyConfig::default()))
}

fn shared_transport() -> Result<HttpTransport, HttpError> {
    static TRANSPORT: OnceLock<HttpTransport> = OnceLock::new();

    if let Some(transport) = TRANSPORT.get() {
        return Ok(transport.clone());
    }
    let transport = HttpTransport::new(&defaults().config)?;
    Ok(TRANSPORT.get_or_init(|| transport).clone())
}

thread_local! {
    static THREAD_CONTEXT: RefCell<Option<ResourceContext>> = const { RefCell::new(None) };
}

tokio::task_local! {
    static TASK_CONTEXT: RefCell<Option<ResourceContext>>;
}

/// Runs `f` against the calling task's overlay if inside
/// [`ShopifyResource::scope`], otherwise against the calling thread's.
fn with_overlay<R>(f: impl FnOnce(&mut Option<ResourceContext>) -> R) -> R {
    if TASK_CONTEXT.try_with(|_| ()).is_ok() {
        TASK_CONTEXT.with(|cell| f(&mut cell.borrow_mut()))
    } else {
        THREAD_CONTEXT.with(|cell| f(&mut cell.borrow_mut()))
    }
}

/// The site, headers and API version requests are built from.
///
/// A context is a plain value: take a snapshot with
/// [`ShopifyResource::context`] or build one directly with
/// [`ResourceContext::for_session`] and pass it to resource operations.
///
/// # Invariants
///
/// - `headers` always contains the static defaults (`User-Agent`, `Accept`)
/// - an inactive context has no site, no version and no auth header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceContext {
    site: Option<String>,
    headers: HashMap<String, String>,
    version: Option<ApiVersion>,
}

impl ResourceContext {
    /// Returns the inactive context: static default headers only.
    #[must_use]
    pub fn inactive() -> Self {
        Self {
            site: None,
            headers: defaults().headers.clone(),
            version: None,
        }
    }

    /// Builds the context a session activates.
    ///
    /// The site is the session's versioned admin root and the access token
    /// is merged into the default headers.
    #[must_use]
    pub fn for_session(session: &Session) -> Self {
        let mut context = Self::inactive();
        context.site = Some(session.site());
        context
            .headers
            .insert(ACCESS_TOKEN_HEADER.to_string(), session.token().to_string());
        context.version = Some(session.api_version().clone());
        context
    }

    /// Returns the active site, if any.
    #[must_use]
    pub fn site(&self) -> Option<&str> {
        self.site.as_deref()
    }

    /// Returns the headers sent with every request from this context.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Returns a single header value.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Returns the active API version, if any.
    #[must_use]
    pub const fn version(&self) -> Option<&ApiVersion> {
        self.version.as_ref()
    }

    /// Returns `true` when a site is bound.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.site.is_some()
    }

    /// Opens a rate-limit-aware connection to the active site.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NoActiveSite`] if no site is bound, or
    /// [`ResourceError::Http`] if the HTTP client cannot be built.
    pub fn connection(&self) -> Result<ShopifyConnection, ResourceError> {
        self.connection_with(shared_transport()?)
    }

    /// Opens a connection to the active site over a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NoActiveSite`] if no site is bound.
    pub fn connection_with<T: Transport>(
        &self,
        transport: T,
    ) -> Result<ShopifyConnection<T>, ResourceError> {
        let site = self.site.as_deref().ok_or(ResourceError::NoActiveSite)?;
        let connection = ShopifyConnection::with_transport(site, transport);

        Ok(match defaults().config.max_retries() {
            Some(max_retries) => connection.max_retries(max_retries),
            None => connection,
        })
    }

    fn set_site(&mut self, site: &SiteUrl) {
        self.site = Some(site.as_str().to_string());
        self.version = None;

        match site.basic_auth() {
            Some(auth) => {
                self.headers.insert(AUTHORIZATION_HEADER.to_string(), auth);
            }
            None => {
                self.headers.remove(AUTHORIZATION_HEADER);
            }
        }
    }
}

/// Entry point for activating sessions on the calling thread or task.
///
/// All functions act only on the calling execution context. Reading from a
/// context that was never activated returns the inactive defaults; it is
/// not an error.
///
/// # Example
///
/// ```rust
/// use shopify_session::{ApiVersion, Session, ShopifyResource};
///
/// ApiVersion::define_known_versions();
/// let session = Session::new("shop1", "unstable", "token1").unwrap();
///
/// let worker = std::thread::spawn(move || {
///     ShopifyResource::activate_session(&session);
///     ShopifyResource::headers()["X-Shopify-Access-Token"].clone()
/// });
///
/// assert_eq!(worker.join().unwrap(), "token1");
/// // The spawning thread never activated anything.
/// assert!(!ShopifyResource::headers().contains_key("X-Shopify-Access-Token"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ShopifyResource;

impl ShopifyResource {
    /// Installs the process-wide defaults.
    ///
    /// Must run before the first session is activated or the first context
    /// is read; those lazily install `ShopifyConfig::default()`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DefaultsAlreadyInitialized`] if the defaults
    /// are already in place.
    pub fn init(config: ShopifyConfig) -> Result<(), ConfigError> {
        DEFAULTS
            .set(ResourceDefaults::from_config(config))
            .map_err(|_| ConfigError::DefaultsAlreadyInitialized)
    }

    /// Returns the process-wide configuration.
    #[must_use]
    pub fn config() -> &'static ShopifyConfig {
        &defaults().config
    }

    /// Returns the static default headers shared by every context.
    #[must_use]
    pub fn default_headers() -> &'static HashMap<String, String> {
        &defaults().headers
    }

    /// Binds `session` to the calling thread or task.
    ///
    /// Replaces any earlier binding completely, including headers added with
    /// [`set_headers`](Self::set_headers).
    pub fn activate_session(session: &Session) {
        tracing::debug!(
            "Activating session for {} (API version {})",
            session.shop(),
            session.api_version()
        );

        let context = ResourceContext::for_session(session);
        with_overlay(|slot| *slot = Some(context));
    }

    /// Returns the calling context to the inactive defaults.
    ///
    /// Safe to call when nothing is active.
    pub fn clear_session() {
        with_overlay(|slot| {
            if slot.take().is_some() {
                tracing::debug!("Cleared active session");
            }
        });
    }

    /// Binds a site URL directly, without a session.
    ///
    /// Credentials embedded as `user:password@` are removed from the stored
    /// site and sent as `Authorization: Basic base64(user:password)` instead.
    /// A URL without credentials drops any earlier Basic header. The API
    /// version is unset; the URL is used as given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSiteUrl`] if `url` cannot be parsed.
    pub fn set_site(url: &str) -> Result<(), ConfigError> {
        let site = SiteUrl::parse(url)?;
        tracing::debug!("Setting site to {}", site.as_str());

        with_overlay(|slot| {
            slot.get_or_insert_with(ResourceContext::inactive)
                .set_site(&site);
        });
        Ok(())
    }

    /// Merges headers into the calling context.
    ///
    /// Existing entries with the same name are overwritten; the defaults and
    /// any auth header stay in place.
    pub fn set_headers<I, K, V>(headers: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        with_overlay(|slot| {
            slot.get_or_insert_with(ResourceContext::inactive)
                .headers
                .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        });
    }

    /// Returns a snapshot of the calling context.
    #[must_use]
    pub fn context() -> ResourceContext {
        with_overlay(|slot| slot.clone()).unwrap_or_else(ResourceContext::inactive)
    }

    /// Returns the calling context's site, if any.
    #[must_use]
    pub fn site() -> Option<String> {
        with_overlay(|slot| slot.as_ref().and_then(|c| c.site.clone()))
    }

    /// Returns the calling context's headers.
    #[must_use]
    pub fn headers() -> HashMap<String, String> {
        with_overlay(|slot| slot.as_ref().map(|c| c.headers.clone()))
            .unwrap_or_else(|| defaults().headers.clone())
    }

    /// Returns the calling context's API version, if any.
    #[must_use]
    pub fn version() -> Option<ApiVersion> {
        with_overlay(|slot| slot.as_ref().and_then(|c| c.version.clone()))
    }

    /// Returns `true` when the calling context has a site bound.
    #[must_use]
    pub fn is_active() -> bool {
        with_overlay(|slot| slot.as_ref().is_some_and(ResourceContext::is_active))
    }

    /// Runs `future` with `session` bound to its own task-local context.
    ///
    /// Activation calls made inside the future affect only this scope; the
    /// thread's context is untouched. Use this on multi-threaded runtimes
    /// where a task may resume on a different worker thread after `.await`.
    pub fn scope<F: Future>(session: &Session, future: F) -> impl Future<Output = F::Output> {
        tracing::debug!(
            "Scoping session for {} (API version {})",
            session.shop(),
            session.api_version()
        );

        let context = ResourceContext::for_session(session);
        TASK_CONTEXT.scope(RefCell::new(Some(context)), future)
    }
}
