use std::fmt;
use std::str::FromStr;

use unic_langid::LanguageIdentifier;

/// A caller-supplied locale tag such as `de`, `de_DE` or `de_DE.UTF-8`.
///
/// Tags are parsed purely structurally into language, optional region and
/// optional encoding suffix. They are not validated against ISO code lists;
/// an unknown language simply fails to resolve to a catalog later on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleTag {
    language: String,
    region: Option<String>,
    encoding: Option<String>,
}

/// The tag string could not be split into a language part.
#[derive(Debug, Clone, thiserror::Error)]
#[error("malformed locale tag '{0}'")]
pub struct TagParseError(pub String);

impl FromStr for LocaleTag {
    type Err = TagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, encoding) = match s.split_once('.') {
            Some((base, encoding)) => (base, Some(encoding.to_owned())),
            None => (s, None),
        };
        let (language, region) = match base.split_once('_') {
            Some((language, region)) if !region.is_empty() => {
                (language, Some(region.to_owned()))
            }
            Some((language, _)) => (language, None),
            None => (base, None),
        };
        if language.is_empty() {
            return Err(TagParseError(s.to_owned()));
        }
        Ok(Self {
            language: language.to_owned(),
            region,
            encoding,
        })
    }
}

impl LocaleTag {
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    /// The key a catalog for this tag is cached under: `language` or
    /// `language_REGION`, without the encoding suffix.
    pub fn catalog_key(&self) -> String {
        match &self.region {
            Some(region) => format!("{}_{}", self.language, region),
            None => self.language.clone(),
        }
    }

    /// The "home" regional variant tried when this tag itself has no catalog:
    /// `de` → `de_DE`, `de_AT` → `de_DE`. Returns `None` when the region
    /// already matches the language (`de_DE`), in which case no further
    /// fallback exists.
    ///
    /// Only the first two characters of the language and region are compared;
    /// tags with longer language subtags are not specially handled.
    pub fn home_region_variant(&self) -> Option<LocaleTag> {
        if let Some(region) = &self.region
            && prefix2(&self.language).eq_ignore_ascii_case(prefix2(region))
        {
            return None;
        }
        Some(Self {
            language: self.language.clone(),
            region: Some(self.language.to_ascii_uppercase()),
            encoding: self.encoding.clone(),
        })
    }

    /// The string handed to the OS locale primitive: region is synthesized
    /// when missing and a `.UTF-8` suffix is appended unless one (in any
    /// case) is already present.
    pub fn os_locale(&self) -> String {
        let mut locale = match &self.region {
            Some(region) => format!("{}_{}", self.language, region),
            None => format!("{}_{}", self.language, self.language.to_ascii_uppercase()),
        };
        if let Some(encoding) = &self.encoding {
            locale.push('.');
            locale.push_str(encoding);
        }
        if locale.to_ascii_uppercase().ends_with(".UTF-8") {
            locale
        } else {
            locale + ".UTF-8"
        }
    }

    /// The BCP 47 identifier for this tag, used by Fluent-backed loaders.
    /// `None` when the tag does not form a valid identifier.
    pub fn language_id(&self) -> Option<LanguageIdentifier> {
        self.catalog_key().replace('_', "-").parse().ok()
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.language)?;
        if let Some(region) = &self.region {
            write!(f, "_{region}")?;
        }
        if let Some(encoding) = &self.encoding {
            write!(f, ".{encoding}")?;
        }
        Ok(())
    }
}

fn prefix2(s: &str) -> &str {
    s.get(..2).unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("de", "de", None, None)]
    #[case("de_DE", "de", Some("DE"), None)]
    #[case("de_DE.UTF-8", "de", Some("DE"), Some("UTF-8"))]
    #[case("de_DE.utf-8", "de", Some("DE"), Some("utf-8"))]
    #[case("cs_CZ.ISO8859-2", "cs", Some("CZ"), Some("ISO8859-2"))]
    fn parses_structurally(
        #[case] input: &str,
        #[case] language: &str,
        #[case] region: Option<&str>,
        #[case] encoding: Option<&str>,
    ) {
        let tag: LocaleTag = input.parse().unwrap();
        assert_eq!(tag.language(), language);
        assert_eq!(tag.region(), region);
        assert_eq!(tag.encoding(), encoding);
        assert_eq!(tag.to_string(), input);
    }

    #[test]
    fn rejects_empty_language() {
        assert!("".parse::<LocaleTag>().is_err());
        assert!("_DE".parse::<LocaleTag>().is_err());
        assert!(".UTF-8".parse::<LocaleTag>().is_err());
    }

    #[test]
    fn trailing_underscore_means_no_region() {
        let tag: LocaleTag = "de_".parse().unwrap();
        assert_eq!(tag.region(), None);
        assert_eq!(tag.catalog_key(), "de");
    }

    #[rstest]
    #[case("de", "de")]
    #[case("de_DE", "de_DE")]
    #[case("de_DE.UTF-8", "de_DE")]
    fn catalog_key_drops_encoding(#[case] input: &str, #[case] key: &str) {
        let tag: LocaleTag = input.parse().unwrap();
        assert_eq!(tag.catalog_key(), key);
    }

    #[rstest]
    #[case("de", Some("de_DE"))]
    #[case("de_AT", Some("de_DE"))]
    #[case("de_LU", Some("de_DE"))]
    #[case("de_DE", None)]
    #[case("de_de", None)]
    fn home_region_variant_cases(#[case] input: &str, #[case] expected: Option<&str>) {
        let tag: LocaleTag = input.parse().unwrap();
        let variant = tag.home_region_variant().map(|v| v.catalog_key());
        assert_eq!(variant.as_deref(), expected);
    }

    #[test]
    fn home_region_variant_keeps_encoding() {
        let tag: LocaleTag = "de_AT.UTF-8".parse().unwrap();
        let variant = tag.home_region_variant().unwrap();
        assert_eq!(variant.to_string(), "de_DE.UTF-8");
    }

    #[rstest]
    #[case("de", "de_DE.UTF-8")]
    #[case("de_AT", "de_AT.UTF-8")]
    #[case("de_DE.UTF-8", "de_DE.UTF-8")]
    #[case("de_DE.utf-8", "de_DE.utf-8")]
    #[case("cs_CZ.ISO8859-2", "cs_CZ.ISO8859-2.UTF-8")]
    fn os_locale_normalization(#[case] input: &str, #[case] expected: &str) {
        let tag: LocaleTag = input.parse().unwrap();
        assert_eq!(tag.os_locale(), expected);
    }

    #[test]
    fn language_id_conversion() {
        let tag: LocaleTag = "de_DE.UTF-8".parse().unwrap();
        assert_eq!(tag.language_id(), Some(unic_langid::langid!("de-DE")));

        let odd: LocaleTag = "de_SOMEWHERE-ELSE".parse().unwrap();
        assert_eq!(odd.language_id(), None);
    }
}
