use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::catalog::{Catalog, CatalogStore};
use crate::context::TranslationContext;
use crate::loader::CatalogLoader;
use crate::system::{NullLocale, SystemLocale};
use crate::tag::LocaleTag;

/// The portable locale applied when no requested tag resolves.
const PORTABLE_LOCALE: &str = "C";

/// Resolves caller locale tags to catalogs and produces per-request
/// translation contexts.
///
/// Resolution order: alias table, catalog cache, loader, then exactly one
/// regional-variant fallback attempt (`de` → `de_DE`, `de_AT` → `de_DE`).
/// Every outcome of that chain is cached, so a given tag hits the loader at
/// most twice over the life of the process.
pub struct LanguageResolver {
    store: CatalogStore,
    loader: Box<dyn CatalogLoader>,
    system: Box<dyn SystemLocale>,
}

impl LanguageResolver {
    pub fn new(loader: impl CatalogLoader + 'static) -> Self {
        Self::with_system_locale(loader, NullLocale)
    }

    pub fn with_system_locale(
        loader: impl CatalogLoader + 'static,
        system: impl SystemLocale + 'static,
    ) -> Self {
        Self {
            store: CatalogStore::new(),
            loader: Box::new(loader),
            system: Box::new(system),
        }
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Resolves `tag` to a catalog, or `None` when the request must fall back
    /// to the passthrough catalog. Never touches the OS locale.
    pub fn resolve(&self, tag: &str) -> Option<(LocaleTag, Arc<dyn Catalog>)> {
        if tag.is_empty() {
            return None;
        }
        let mut tag: LocaleTag = match tag.parse() {
            Ok(tag) => tag,
            Err(err) => {
                info!("{err}");
                return None;
            }
        };

        // A previously discovered fallback answers the original tag directly.
        if let Some(resolved) = self.store.alias(&tag.catalog_key())
            && let Ok(aliased) = resolved.parse()
        {
            tag = aliased;
        }

        if let Some(catalog) = self.store.get(&tag.catalog_key()) {
            debug!("reusing catalog for {tag}");
            return Some((tag, catalog));
        }

        match self.loader.load(&tag) {
            Ok(catalog) => {
                debug!("using new catalog for {tag}");
                let catalog = self.store.insert(&tag.catalog_key(), catalog);
                Some((tag, catalog))
            }
            Err(err) => {
                info!("could not load catalog for {tag}: {err}");
                let variant = tag.home_region_variant()?;
                let requested = tag.catalog_key();
                let resolved = self.resolve_variant(&variant)?;
                self.store.record_alias(&requested, &variant.catalog_key());
                Some((variant, resolved))
            }
        }
    }

    /// The single regional-variant fallback attempt.
    fn resolve_variant(&self, variant: &LocaleTag) -> Option<Arc<dyn Catalog>> {
        if let Some(catalog) = self.store.get(&variant.catalog_key()) {
            debug!("reusing catalog for {variant}");
            return Some(catalog);
        }
        match self.loader.load(variant) {
            Ok(catalog) => {
                debug!("using new catalog for {variant}");
                Some(self.store.insert(&variant.catalog_key(), catalog))
            }
            Err(err) => {
                info!("could not load catalog for {variant} either: {err}");
                None
            }
        }
    }

    /// Resolves `tag`, applies the OS process locale (best effort) and
    /// returns the request's translation context.
    ///
    /// An unresolvable or empty tag yields the fallback context under the
    /// portable "C" locale; a request is never failed because its language is
    /// unavailable.
    pub fn activate(&self, tag: &str) -> TranslationContext {
        match self.resolve(tag) {
            Some((tag, catalog)) => {
                let locale = tag.os_locale();
                if let Err(err) = self.system.set_process_locale(&locale) {
                    warn!("{err}");
                }
                TranslationContext::new(catalog, tag)
            }
            None => {
                if let Err(err) = self.system.set_process_locale(PORTABLE_LOCALE) {
                    warn!("{err}");
                }
                TranslationContext::fallback()
            }
        }
    }
}
