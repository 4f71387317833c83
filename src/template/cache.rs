//! Cache of parsed templates.

use alloc::collections::btree_map::Entry;
use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::template::error::Error;
use crate::template::UriTemplate;

/// Cache of parsed templates keyed by their source strings.
///
/// The cache is owned by the caller and grows until it is cleared.
///
/// # Examples
///
/// ```
/// use urikit::template::{Context, TemplateCache};
///
/// let mut cache = TemplateCache::new();
/// let mut context = Context::new();
/// context.insert("id", 42);
///
/// for _ in 0..3 {
///     let template = cache.get_or_parse("/items/{id}")?;
///     assert_eq!(template.expand(&context)?, "/items/42");
/// }
/// assert_eq!(cache.len(), 1);
/// # Ok::<_, urikit::template::Error>(())
/// ```
#[derive(Default, Debug, Clone)]
pub struct TemplateCache {
    /// Parsed templates.
    templates: BTreeMap<String, UriTemplate>,
}

impl TemplateCache {
    /// Creates an empty cache.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the parsed template, parsing and storing it on the first use.
    ///
    /// Templates that fail to parse are not stored.
    pub fn get_or_parse(&mut self, source: &str) -> Result<&UriTemplate, Error> {
        match self.templates.entry(source.into()) {
            Entry::Occupied(entry) => {
                tracing::trace!(source, "template cache hit");
                Ok(&*entry.into_mut())
            }
            Entry::Vacant(entry) => {
                tracing::trace!(source, "template cache miss");
                let template = UriTemplate::new(source)?;
                Ok(&*entry.insert(template))
            }
        }
    }

    /// Returns the cached template, if any.
    #[inline]
    #[must_use]
    pub fn get(&self, source: &str) -> Option<&UriTemplate> {
        self.templates.get(source)
    }

    /// Returns the number of cached templates.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns true if the cache is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Removes all cached templates.
    #[inline]
    pub fn clear(&mut self) {
        self.templates.clear();
    }
}
