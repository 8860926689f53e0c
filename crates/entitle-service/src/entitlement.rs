use anyhow::Result;
use entitle_i18n::TranslationContext;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A string-keyed map of variant values, as decoded by the dispatch layer.
pub type OptionMap = Map<String, Value>;

/// Proxy settings decoded from a caller's proxy options map. Unknown keys are
/// ignored; missing keys mean "no proxy".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    pub proxy_hostname: Option<String>,
    pub proxy_port: Option<u16>,
    pub proxy_user: Option<String>,
    pub proxy_password: Option<String>,
    pub no_proxy: Option<String>,
}

impl ProxyConfig {
    pub fn from_options(options: &OptionMap) -> Self {
        serde_json::from_value(Value::Object(options.clone())).unwrap_or_else(|err| {
            tracing::warn!("ignoring malformed proxy options: {err}");
            Self::default()
        })
    }

    pub fn is_configured(&self) -> bool {
        self.proxy_hostname.is_some()
    }
}

/// Outcome of removing entitlements by pool ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalOutcome {
    pub removed_pools: Vec<String>,
    pub unremoved_pools: Vec<String>,
    pub removed_serials: Vec<String>,
}

/// Outcome of removing entitlements by serial numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialRemoval {
    pub removed_serials: Vec<String>,
    pub unremoved_serials: Vec<String>,
}

/// The entitlement business service the facade delegates to.
///
/// Implementations talk to the subscription backend (server connection built
/// from the proxy settings, or a local cache for status). Every call receives
/// the request's translation context so user-facing strings in reports come
/// back in the caller's language.
pub trait EntitlementBackend: Send + Sync {
    /// Entitlement status, optionally as of a future date. Works without a
    /// server connection.
    fn get_status(&self, ctx: &TranslationContext, on_date: Option<Date>) -> Result<Value>;

    /// Pools installed/available/consumed on this system, filtered by the
    /// caller's options.
    fn get_pools(
        &self,
        ctx: &TranslationContext,
        options: &OptionMap,
        on_date: Option<Date>,
        proxy: &ProxyConfig,
    ) -> Result<Value>;

    fn remove_all_entitlements(
        &self,
        ctx: &TranslationContext,
        proxy: &ProxyConfig,
    ) -> Result<Value>;

    fn remove_by_pool_ids(
        &self,
        ctx: &TranslationContext,
        pool_ids: &[String],
        proxy: &ProxyConfig,
    ) -> Result<RemovalOutcome>;

    fn remove_by_serials(
        &self,
        ctx: &TranslationContext,
        serials: &[String],
        proxy: &ProxyConfig,
    ) -> Result<SerialRemoval>;
}
