use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// A loaded translation resource bound to one locale tag.
///
/// Lookup never fails: a message with no translation comes back as the
/// requested `msgid` itself.
pub trait Catalog: Send + Sync {
    fn translate(&self, msgid: &str) -> String;
    fn translate_plural(&self, singular: &str, plural: &str, n: u64) -> String;
}

impl std::fmt::Debug for dyn Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Catalog")
    }
}

/// The identity catalog: English passthrough used when no requested tag
/// resolves or the tag is empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughCatalog;

impl Catalog for PassthroughCatalog {
    fn translate(&self, msgid: &str) -> String {
        msgid.to_owned()
    }

    fn translate_plural(&self, singular: &str, plural: &str, n: u64) -> String {
        if n == 1 {
            singular.to_owned()
        } else {
            plural.to_owned()
        }
    }
}

/// Process-wide catalog cache plus the alias table recording which tag ended
/// up serving a requested one (`de` → `de_DE`).
///
/// Entries live for the lifetime of the process. There is no eviction: the
/// set of loadable catalogs is bounded by what ships with the system, not by
/// caller input.
#[derive(Default)]
pub struct CatalogStore {
    catalogs: RwLock<FxHashMap<String, Arc<dyn Catalog>>>,
    aliases: RwLock<FxHashMap<String, String>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Arc<dyn Catalog>> {
        self.catalogs.read().get(key).cloned()
    }

    /// Inserts a catalog under `key` and returns the stored instance.
    ///
    /// First writer wins: when two requests race to load the same tag, the
    /// later one receives the catalog the earlier one stored. Catalogs for
    /// the same tag are equivalent, so the dropped duplicate is harmless.
    pub fn insert(&self, key: &str, catalog: Arc<dyn Catalog>) -> Arc<dyn Catalog> {
        self.catalogs
            .write()
            .entry(key.to_owned())
            .or_insert(catalog)
            .clone()
    }

    pub fn alias(&self, key: &str) -> Option<String> {
        self.aliases.read().get(key).cloned()
    }

    /// Records that `requested` is served by `resolved`. Existing entries are
    /// never overwritten.
    pub fn record_alias(&self, requested: &str, resolved: &str) {
        self.aliases
            .write()
            .entry(requested.to_owned())
            .or_insert_with(|| resolved.to_owned());
    }

    pub fn len(&self) -> usize {
        self.catalogs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.read().is_empty()
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Labeled(&'static str);

    impl Catalog for Labeled {
        fn translate(&self, msgid: &str) -> String {
            format!("{}:{}", self.0, msgid)
        }

        fn translate_plural(&self, singular: &str, plural: &str, n: u64) -> String {
            let msgid = if n == 1 { singular } else { plural };
            format!("{}:{}", self.0, msgid)
        }
    }

    #[test]
    fn passthrough_returns_msgid() {
        let catalog = PassthroughCatalog;
        assert_eq!(catalog.translate("Status unknown"), "Status unknown");
        assert_eq!(catalog.translate_plural("one pool", "many pools", 1), "one pool");
        assert_eq!(catalog.translate_plural("one pool", "many pools", 0), "many pools");
        assert_eq!(catalog.translate_plural("one pool", "many pools", 5), "many pools");
    }

    #[test]
    fn insert_is_first_writer_wins() {
        let store = CatalogStore::new();
        let first = store.insert("de_DE", Arc::new(Labeled("first")));
        let second = store.insert("de_DE", Arc::new(Labeled("second")));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.get("de_DE").unwrap().translate("x"), "first:x");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn aliases_are_never_overwritten() {
        let store = CatalogStore::new();
        store.record_alias("de", "de_DE");
        store.record_alias("de", "de_AT");
        assert_eq!(store.alias("de").as_deref(), Some("de_DE"));
        assert_eq!(store.alias_count(), 1);
    }

    #[test]
    fn missing_entries_are_none() {
        let store = CatalogStore::new();
        assert!(store.get("fr_FR").is_none());
        assert!(store.alias("fr").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn concurrent_inserts_do_not_corrupt_the_map() {
        let store = Arc::new(CatalogStore::new());
        std::thread::scope(|scope| {
            for _ in 0..8 {
                let store = Arc::clone(&store);
                scope.spawn(move || {
                    for _ in 0..100 {
                        store.insert("cs_CZ", Arc::new(Labeled("cs")));
                        store.record_alias("cs", "cs_CZ");
                    }
                });
            }
        });
        assert_eq!(store.len(), 1);
        assert_eq!(store.alias("cs").as_deref(), Some("cs_CZ"));
    }
}
