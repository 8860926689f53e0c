//! Catalog loading from Fluent resources.
//!
//! Loaders resolve an exact tag only; regional fallback and aliasing live in
//! the resolver. A load failure is always recoverable: the resolver absorbs
//! it and the request proceeds under the passthrough catalog.

use std::marker::PhantomData;
use std::sync::Arc;

use fluent_bundle::{FluentArgs, FluentBundle, FluentResource};
use rust_embed::RustEmbed;
use thiserror::Error;
use unic_langid::LanguageIdentifier;

use crate::catalog::Catalog;
use crate::tag::LocaleTag;

/// No translation resource exists for the tag. Internal to resolution; never
/// surfaced to callers.
#[derive(Debug, Clone, Error)]
#[error("no catalog for '{0}'")]
pub struct CatalogNotFound(pub String);

/// The external catalog-loading primitive: one attempt, exact tag only.
pub trait CatalogLoader: Send + Sync {
    fn load(&self, tag: &LocaleTag) -> Result<Arc<dyn Catalog>, CatalogNotFound>;
}

/// A [`Catalog`] backed by a parsed Fluent resource.
///
/// A bundle is rebuilt per lookup from the shared resource; catalogs stay
/// `Send + Sync` without holding the non-concurrent bundle across calls.
pub struct FluentCatalog {
    lang: LanguageIdentifier,
    resource: Arc<FluentResource>,
}

impl FluentCatalog {
    pub fn new(lang: LanguageIdentifier, resource: Arc<FluentResource>) -> Self {
        Self { lang, resource }
    }

    fn format(&self, id: &str, args: Option<&FluentArgs>) -> Option<String> {
        let mut bundle = FluentBundle::new(vec![self.lang.clone()]);
        if let Err(errors) = bundle.add_resource(self.resource.clone()) {
            tracing::error!("failed to add fluent resource for {}: {:?}", self.lang, errors);
            return None;
        }

        let message = bundle.get_message(id)?;
        let pattern = message.value()?;

        let mut errors = Vec::new();
        let value = bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            tracing::error!("fluent formatting errors for '{id}': {errors:?}");
            return None;
        }
        Some(value.into_owned())
    }
}

impl Catalog for FluentCatalog {
    fn translate(&self, msgid: &str) -> String {
        self.format(msgid, None)
            .unwrap_or_else(|| msgid.to_owned())
    }

    fn translate_plural(&self, singular: &str, plural: &str, n: u64) -> String {
        let id = if n == 1 { singular } else { plural };
        let mut args = FluentArgs::new();
        args.set("count", n);
        self.format(id, Some(&args))
            .unwrap_or_else(|| id.to_owned())
    }
}

fn parse_resource(
    tag: &LocaleTag,
    origin: &str,
    content: String,
) -> Result<Arc<FluentResource>, CatalogNotFound> {
    FluentResource::try_new(content)
        .map(Arc::new)
        .map_err(|(_, errors)| {
            tracing::error!("failed to parse fluent resource '{origin}': {errors:?}");
            CatalogNotFound(tag.to_string())
        })
}

/// Embedded translation assets for one domain, laid out as
/// `{lang}/{domain}.ftl` (for example `de-DE/entitle.ftl`).
pub trait EmbeddedDomain: RustEmbed + Send + Sync + 'static {
    fn domain() -> &'static str;
}

/// Loads catalogs from assets embedded in the binary.
pub struct EmbeddedCatalogs<T: EmbeddedDomain> {
    _assets: PhantomData<T>,
}

impl<T: EmbeddedDomain> EmbeddedCatalogs<T> {
    pub fn new() -> Self {
        Self {
            _assets: PhantomData,
        }
    }

    /// Every language shipping a `{domain}.ftl`, sorted by tag.
    pub fn discover_languages() -> Vec<LanguageIdentifier> {
        let file_name = format!("/{}.ftl", T::domain());
        let mut languages: Vec<LanguageIdentifier> = T::iter()
            .filter_map(|path| {
                path.strip_suffix(&file_name)
                    .and_then(|lang| lang.parse().ok())
            })
            .collect();
        languages.sort_by_key(|lang| lang.to_string());
        languages
    }
}

impl<T: EmbeddedDomain> Default for EmbeddedCatalogs<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: EmbeddedDomain> CatalogLoader for EmbeddedCatalogs<T> {
    fn load(&self, tag: &LocaleTag) -> Result<Arc<dyn Catalog>, CatalogNotFound> {
        let lang = tag
            .language_id()
            .ok_or_else(|| CatalogNotFound(tag.to_string()))?;
        let path = format!("{}/{}.ftl", lang, T::domain());
        let file = T::get(&path).ok_or_else(|| CatalogNotFound(tag.to_string()))?;
        let content = String::from_utf8(file.data.to_vec()).map_err(|err| {
            tracing::error!("invalid UTF-8 in embedded file '{path}': {err}");
            CatalogNotFound(tag.to_string())
        })?;
        let resource = parse_resource(tag, &path, content)?;
        Ok(Arc::new(FluentCatalog::new(lang, resource)))
    }
}

/// Loads catalogs from a static table of Fluent sources, matched by exact
/// language identifier.
pub struct StaticCatalogs {
    resources: &'static [(LanguageIdentifier, &'static str)],
}

impl StaticCatalogs {
    pub const fn new(resources: &'static [(LanguageIdentifier, &'static str)]) -> Self {
        Self { resources }
    }
}

impl CatalogLoader for StaticCatalogs {
    fn load(&self, tag: &LocaleTag) -> Result<Arc<dyn Catalog>, CatalogNotFound> {
        let lang = tag
            .language_id()
            .ok_or_else(|| CatalogNotFound(tag.to_string()))?;
        for (resource_lang, source) in self.resources {
            if *resource_lang == lang {
                let resource = parse_resource(tag, &lang.to_string(), (*source).to_owned())?;
                return Ok(Arc::new(FluentCatalog::new(lang, resource)));
            }
        }
        Err(CatalogNotFound(tag.to_string()))
    }
}
