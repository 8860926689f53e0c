use std::sync::Arc;

use crate::catalog::{Catalog, PassthroughCatalog};
use crate::tag::LocaleTag;

/// The translation bindings for a single request.
///
/// A context is a plain value handed to whatever formats user-facing strings
/// for that request. Each caller holds its own, so two concurrent requests
/// localized in different languages never observe each other's catalog. A
/// context always carries a working catalog; when no requested tag resolved
/// it holds the English passthrough and reports no tag.
#[derive(Clone)]
pub struct TranslationContext {
    catalog: Arc<dyn Catalog>,
    tag: Option<LocaleTag>,
}

impl TranslationContext {
    pub fn new(catalog: Arc<dyn Catalog>, tag: LocaleTag) -> Self {
        Self {
            catalog,
            tag: Some(tag),
        }
    }

    /// The fallback context: English passthrough, no tag, no OS locale.
    pub fn fallback() -> Self {
        Self {
            catalog: Arc::new(PassthroughCatalog),
            tag: None,
        }
    }

    /// The tag the request actually resolved to (after aliasing and regional
    /// fallback), or `None` for the fallback context.
    pub fn tag(&self) -> Option<&LocaleTag> {
        self.tag.as_ref()
    }

    pub fn is_fallback(&self) -> bool {
        self.tag.is_none()
    }

    pub fn catalog(&self) -> &Arc<dyn Catalog> {
        &self.catalog
    }

    pub fn translate(&self, msgid: &str) -> String {
        self.catalog.translate(msgid)
    }

    pub fn translate_plural(&self, singular: &str, plural: &str, n: u64) -> String {
        self.catalog.translate_plural(singular, plural, n)
    }
}

impl Default for TranslationContext {
    fn default() -> Self {
        Self::fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_passes_messages_through() {
        let ctx = TranslationContext::fallback();
        assert!(ctx.is_fallback());
        assert_eq!(ctx.tag(), None);
        assert_eq!(ctx.translate("No pools attached"), "No pools attached");
        assert_eq!(ctx.translate_plural("{count} pool", "{count} pools", 2), "{count} pools");
    }

    #[test]
    fn carries_the_resolved_tag() {
        let tag: LocaleTag = "de_DE".parse().unwrap();
        let ctx = TranslationContext::new(Arc::new(PassthroughCatalog), tag.clone());
        assert!(!ctx.is_fallback());
        assert_eq!(ctx.tag(), Some(&tag));
    }

    #[test]
    fn clones_share_the_catalog() {
        let ctx = TranslationContext::fallback();
        let copy = ctx.clone();
        assert!(Arc::ptr_eq(ctx.catalog(), copy.catalog()));
    }
}
