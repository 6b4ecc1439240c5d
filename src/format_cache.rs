//! Memoization of parsed format strings.
//!
//! The free functions in the crate root parse their format on every call.
//! Callers that reuse a small set of formats can keep a [`FormatCache`] and
//! hand the shared [`Format`] to its methods instead.
//!
//! # Beispiel
//!
//! ```
//! use binpack::{FormatCache, Value};
//!
//! let mut cache = FormatCache::new();
//! let format = cache.get_or_parse("<I16 z").unwrap();
//! let bytes = format.pack(&[Value::Int(7), Value::from("a")]).unwrap();
//! assert_eq!(bytes, [7, 0, b'a', 0]);
//!
//! let again = cache.get_or_parse("<I16 z").unwrap();
//! assert!(std::sync::Arc::ptr_eq(&format, &again));
//! assert_eq!((cache.hits(), cache.misses()), (1, 1));
//! ```

use std::sync::Arc;

use crate::format::Format;
use crate::{FastHashMap, Result};

/// Parsed formats keyed by their source string.
///
/// Invalid format strings are not cached; every lookup of one fails again.
#[derive(Debug, Default)]
pub struct FormatCache {
    formats: FastHashMap<String, Arc<Format>>,
    hits: u64,
    misses: u64,
}

impl FormatCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached format for `format`, parsing it on first use.
    pub fn get_or_parse(&mut self, format: &str) -> Result<Arc<Format>> {
        if let Some(parsed) = self.formats.get(format) {
            self.hits += 1;
            log::trace!("format cache hit: {format:?}");
            return Ok(Arc::clone(parsed));
        }
        let parsed = Arc::new(Format::parse(format)?);
        self.misses += 1;
        log::trace!("format cache miss: {format:?} ({} operations)", parsed.operations().len());
        self.formats.insert(format.to_owned(), Arc::clone(&parsed));
        Ok(parsed)
    }

    /// Number of distinct cached formats.
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Drops all cached formats and resets the counters.
    pub fn clear(&mut self) {
        self.formats.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn same_string_same_arc() {
        let mut cache = FormatCache::new();
        let a = cache.get_or_parse("i16 z").unwrap();
        let b = cache.get_or_parse("i16 z").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn spelling_matters() {
        let mut cache = FormatCache::new();
        let a = cache.get_or_parse("i16z").unwrap();
        let b = cache.get_or_parse("i16 z").unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(*a, *b);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn errors_are_not_cached() {
        let mut cache = FormatCache::new();
        assert!(matches!(cache.get_or_parse("q").unwrap_err(), Error::UnknownOpcode { .. }));
        assert!(cache.is_empty());
        assert_eq!(cache.misses(), 0);
    }

    #[test]
    fn clear_resets() {
        let mut cache = FormatCache::new();
        cache.get_or_parse("b").unwrap();
        cache.get_or_parse("b").unwrap();
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!((cache.hits(), cache.misses()), (0, 0));
    }
}
