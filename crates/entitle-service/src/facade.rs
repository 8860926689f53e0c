use std::sync::Arc;

use entitle_i18n::LanguageResolver;
use serde::Serialize;
use serde_json::Value;

use crate::date::parse_on_date;
use crate::entitlement::{EntitlementBackend, OptionMap, ProxyConfig};
use crate::error::{ServiceError, ServiceResult};

/// The facade the dispatch layer routes entitlement calls to.
///
/// Arguments arrive as native values (the transport decodes them); each
/// operation validates its date argument, activates the caller's locale and
/// hands the resulting translation context to the backend, then serializes
/// the backend's answer to a JSON string.
pub struct EntitlementFacade {
    backend: Arc<dyn EntitlementBackend>,
    resolver: Arc<LanguageResolver>,
}

impl EntitlementFacade {
    pub fn new(backend: Arc<dyn EntitlementBackend>, resolver: Arc<LanguageResolver>) -> Self {
        Self { backend, resolver }
    }

    /// Entitlement status, optionally on a future date (`YYYY-MM-DD`, empty
    /// for "today"). The date is validated before any localization or
    /// backend work happens.
    pub fn get_status(&self, on_date: &str, locale: &str) -> ServiceResult<String> {
        let on_date = parse_on_date(on_date)?;
        let ctx = self.resolver.activate(locale);
        let status = self
            .backend
            .get_status(&ctx, on_date)
            .map_err(ServiceError::business)?;
        encode(&status)
    }

    /// Pools installed/available/consumed on this system. An `on_date` key
    /// inside the options map is validated like the status date.
    pub fn get_pools(
        &self,
        options: &OptionMap,
        proxy_options: &OptionMap,
        locale: &str,
    ) -> ServiceResult<String> {
        let ctx = self.resolver.activate(locale);
        let on_date =
            parse_on_date(options.get("on_date").and_then(Value::as_str).unwrap_or(""))?;
        let proxy = ProxyConfig::from_options(proxy_options);
        let pools = self
            .backend
            .get_pools(&ctx, options, on_date, &proxy)
            .map_err(ServiceError::business)?;
        encode(&pools)
    }

    pub fn remove_all_entitlements(
        &self,
        proxy_options: &OptionMap,
        locale: &str,
    ) -> ServiceResult<String> {
        let ctx = self.resolver.activate(locale);
        let proxy = ProxyConfig::from_options(proxy_options);
        let result = self
            .backend
            .remove_all_entitlements(&ctx, &proxy)
            .map_err(ServiceError::business)?;
        encode(&result)
    }

    /// Removes the entitlements attached from the given pools. The reply is
    /// the JSON list of serial numbers that were removed.
    pub fn remove_entitlements_by_pool_ids(
        &self,
        pool_ids: &[String],
        proxy_options: &OptionMap,
        locale: &str,
    ) -> ServiceResult<String> {
        let ctx = self.resolver.activate(locale);
        let proxy = ProxyConfig::from_options(proxy_options);
        let outcome = self
            .backend
            .remove_by_pool_ids(&ctx, pool_ids, &proxy)
            .map_err(ServiceError::business)?;
        encode(&outcome.removed_serials)
    }

    /// Removes the entitlements with the given serial numbers. The reply is
    /// the JSON list of serial numbers that were removed.
    pub fn remove_entitlements_by_serials(
        &self,
        serials: &[String],
        proxy_options: &OptionMap,
        locale: &str,
    ) -> ServiceResult<String> {
        let ctx = self.resolver.activate(locale);
        let proxy = ProxyConfig::from_options(proxy_options);
        let removal = self
            .backend
            .remove_by_serials(&ctx, serials, &proxy)
            .map_err(ServiceError::business)?;
        encode(&removal.removed_serials)
    }
}

fn encode<T: Serialize>(value: &T) -> ServiceResult<String> {
    serde_json::to_string(value).map_err(|err| ServiceError::business(err.into()))
}
