//! URL Resolver for MiniArc.
//!
//! Decides whether text typed into the search field is an absolute URL, a
//! bare domain or a search phrase, and produces the URL to load. Checks run
//! in that order. Whatever the branch, the result must parse as a URL with a
//! host or the input is rejected.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::types::errors::{NavigationError, SettingsError};
use crate::types::navigation::{NavigationTarget, TargetKind};
use crate::types::settings::{SearchSettings, QUERY_PLACEHOLDER};

/// One or more label characters, a dot, then a 2+ letter suffix.
static BARE_DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+\.[A-Za-z]{2,}$").expect("bare-domain pattern is valid")
});

/// Trait defining the URL resolution interface.
pub trait UrlResolverTrait {
    fn resolve(&self, input: &str) -> Result<NavigationTarget, NavigationError>;
    fn search_template(&self) -> &str;
}

/// Resolver configured with a search engine template.
#[derive(Debug, Clone)]
pub struct UrlResolver {
    template: String,
}

impl UrlResolver {
    /// Resolver using the default search engine.
    pub fn new() -> Self {
        Self {
            template: SearchSettings::default().template,
        }
    }

    /// Resolver using a custom search template containing `{query}`.
    pub fn with_template(template: &str) -> Result<Self, SettingsError> {
        validate_template(template)?;
        Ok(Self {
            template: template.to_string(),
        })
    }

    fn search_url(&self, phrase: &str) -> String {
        let encoded = urlencoding::encode(phrase.trim());
        self.template.replace(QUERY_PLACEHOLDER, &encoded)
    }
}

impl Default for UrlResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlResolverTrait for UrlResolver {
    fn resolve(&self, input: &str) -> Result<NavigationTarget, NavigationError> {
        let (url, kind) = if has_http_scheme(input) {
            (input.to_string(), TargetKind::Absolute)
        } else if BARE_DOMAIN.is_match(input) {
            (format!("https://{}", input), TargetKind::BareDomain)
        } else {
            (self.search_url(input), TargetKind::Search)
        };

        if !is_well_formed(&url) {
            return Err(NavigationError::InvalidInput(input.to_string()));
        }
        Ok(NavigationTarget { url, kind })
    }

    fn search_template(&self) -> &str {
        &self.template
    }
}

/// Resolves `input` with the default search engine.
pub fn resolve(input: &str) -> Result<NavigationTarget, NavigationError> {
    UrlResolver::new().resolve(input)
}

/// Checks that a search template has a query slot and yields a valid URL.
pub fn validate_template(template: &str) -> Result<(), SettingsError> {
    if !template.contains(QUERY_PLACEHOLDER) {
        return Err(SettingsError::InvalidValue(format!(
            "search template must contain {}: {}",
            QUERY_PLACEHOLDER, template
        )));
    }
    let sample = template.replace(QUERY_PLACEHOLDER, "test");
    if !is_well_formed(&sample) {
        return Err(SettingsError::InvalidValue(format!(
            "search template is not a valid URL: {}",
            template
        )));
    }
    Ok(())
}

fn has_http_scheme(input: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        input
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

fn is_well_formed(candidate: &str) -> bool {
    Url::parse(candidate).is_ok_and(|url| url.has_host())
}
