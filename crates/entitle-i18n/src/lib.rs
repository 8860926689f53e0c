#![doc = include_str!("../README.md")]

pub mod catalog;
pub mod context;
pub mod loader;
pub mod resolver;
pub mod system;
pub mod tag;

pub use catalog::{Catalog, CatalogStore, PassthroughCatalog};
pub use context::TranslationContext;
pub use loader::{
    CatalogLoader, CatalogNotFound, EmbeddedCatalogs, EmbeddedDomain, FluentCatalog,
    StaticCatalogs,
};
pub use resolver::LanguageResolver;
pub use system::{LocaleSetError, NullLocale, SystemLocale};
pub use tag::{LocaleTag, TagParseError};

pub use unic_langid::{LanguageIdentifier, langid};
