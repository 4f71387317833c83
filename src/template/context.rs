//! Template expansion context.

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::template::expand::escape;

/// Value of a template variable.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Undefined (i.e. null).
    #[default]
    Undefined,
    /// String value.
    String(String),
    /// List.
    List(Vec<String>),
    /// Associative array, in insertion order.
    Assoc(Vec<(String, String)>),
}

impl Value {
    /// Creates a list value.
    ///
    /// # Examples
    ///
    /// ```
    /// use urikit::template::Value;
    ///
    /// let value = Value::list(["red", "green"]);
    /// assert_eq!(value, Value::List(vec!["red".into(), "green".into()]));
    /// ```
    #[must_use]
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Creates an associative array value.
    #[must_use]
    pub fn assoc<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Assoc(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns true if the value is undefined for expansion.
    ///
    /// Empty lists and empty associative arrays are undefined.
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        match self {
            Self::Undefined => true,
            Self::String(_) => false,
            Self::List(list) => list.is_empty(),
            Self::Assoc(assoc) => assoc.is_empty(),
        }
    }

    /// Returns true if the value is a list or an associative array.
    #[inline]
    #[must_use]
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::List(_) | Self::Assoc(_))
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&String> for Value {
    #[inline]
    fn from(s: &String) -> Self {
        Self::String(s.clone())
    }
}

/// Implements `From<$ty> for Value` for types with `Display` impls.
macro_rules! impl_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(v: $ty) -> Self {
                    Self::String(v.to_string())
                }
            }
        )*
    };
}

impl_from_display!(char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<Vec<String>> for Value {
    #[inline]
    fn from(list: Vec<String>) -> Self {
        Self::List(list)
    }
}

impl From<Vec<&str>> for Value {
    #[inline]
    fn from(list: Vec<&str>) -> Self {
        Self::list(list)
    }
}

impl From<&[&str]> for Value {
    #[inline]
    fn from(list: &[&str]) -> Self {
        Self::list(list.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Value {
    #[inline]
    fn from(list: [&str; N]) -> Self {
        Self::list(list)
    }
}

impl From<Vec<(String, String)>> for Value {
    #[inline]
    fn from(assoc: Vec<(String, String)>) -> Self {
        Self::Assoc(assoc)
    }
}

impl From<Vec<(&str, &str)>> for Value {
    #[inline]
    fn from(assoc: Vec<(&str, &str)>) -> Self {
        Self::assoc(assoc)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Value {
    #[inline]
    fn from(assoc: [(&str, &str); N]) -> Self {
        Self::assoc(assoc)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Undefined, Into::into)
    }
}

/// Encoded form of a defined value.
#[derive(Debug)]
pub(super) enum Encoded {
    /// Encoded string.
    String(String),
    /// Encoded list items.
    List(Vec<String>),
    /// Encoded keys and values.
    Assoc(Vec<(String, String)>),
}

impl Encoded {
    /// Encodes the value, or returns `None` if the value is undefined.
    fn new(value: &Value, allow_reserved: bool) -> Option<Self> {
        if value.is_undefined() {
            return None;
        }
        Some(match value {
            Value::Undefined => return None,
            Value::String(s) => Self::String(escape(s, allow_reserved)),
            Value::List(list) => Self::List(
                list.iter()
                    .map(|item| escape(item, allow_reserved))
                    .collect(),
            ),
            Value::Assoc(assoc) => Self::Assoc(
                assoc
                    .iter()
                    .map(|(k, v)| (escape(k, allow_reserved), escape(v, allow_reserved)))
                    .collect(),
            ),
        })
    }
}

/// Template expansion context.
///
/// Values are encoded once per encoding mode and cached, so a name used in
/// several expressions is escaped only once. The cache is dropped for a name
/// when the name is inserted or removed.
///
/// A context is `Send`, so it can be moved to another thread. The cache is
/// filled through a shared reference, so a context is not `Sync`: clone it
/// to expand templates on several threads at once.
///
/// # Examples
///
/// ```
/// use urikit::template::{Context, UriTemplate};
///
/// let mut context = Context::new();
/// context.insert("user", "alice");
/// context.insert("tags", ["a b", "c"]);
///
/// let template = UriTemplate::new("/users/{user}{?tags}")?;
/// assert_eq!(template.expand(&context)?, "/users/alice?tags=a%20b,c");
/// # Ok::<_, urikit::template::Error>(())
/// ```
#[derive(Default, Debug, Clone)]
pub struct Context {
    /// Variables.
    variables: BTreeMap<String, Value>,
    /// Encoded values, indexed by whether reserved characters are allowed.
    cache: RefCell<[BTreeMap<String, Arc<Encoded>>; 2]>,
}

impl Context {
    /// Creates a new empty context.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a variable and returns the old value.
    ///
    /// Inserting [`Value::Undefined`] removes the variable.
    pub fn insert<K, V>(&mut self, name: K, value: V) -> Option<Value>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let name = name.into();
        self.invalidate(&name);
        match value.into() {
            Value::Undefined => self.variables.remove(&name),
            value => self.variables.insert(name, value),
        }
    }

    /// Removes a variable and returns its value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.invalidate(name);
        self.variables.remove(name)
    }

    /// Returns the value of the variable.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Returns true if the variable is set.
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Removes all variables.
    pub fn clear(&mut self) {
        self.variables.clear();
        self.cache.get_mut().iter_mut().for_each(BTreeMap::clear);
    }

    /// Returns the number of variables.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns true if no variables are set.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Returns an iterator of the variables.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Drops the cached encodings of the variable.
    fn invalidate(&mut self, name: &str) {
        for slot in self.cache.get_mut() {
            slot.remove(name);
        }
    }

    /// Returns the encoded value of a defined variable.
    pub(super) fn encoded(&self, name: &str, allow_reserved: bool) -> Option<Arc<Encoded>> {
        let value = self.variables.get(name)?;
        let mut cache = self.cache.borrow_mut();
        let slot = &mut cache[usize::from(allow_reserved)];
        if let Some(encoded) = slot.get(name) {
            tracing::trace!(name, allow_reserved, "encoded value cache hit");
            return Some(Arc::clone(encoded));
        }
        tracing::trace!(name, allow_reserved, "encoded value cache miss");
        let encoded = Arc::new(Encoded::new(value, allow_reserved)?);
        slot.insert(name.into(), Arc::clone(&encoded));
        Some(encoded)
    }

    /// Returns the number of cached encodings.
    #[cfg(test)]
    fn cached_len(&self) -> usize {
        self.cache.borrow().iter().map(BTreeMap::len).sum()
    }
}

impl<K, V> Extend<(K, V)> for Context
where
    K: Into<String>,
    V: Into<Value>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Context
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Self::new();
        context.extend(iter);
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() {
        assert_eq!(Value::from(42_u32), Value::String("42".into()));
        assert_eq!(Value::from(-1_i64), Value::String("-1".into()));
        assert_eq!(Value::from(None::<&str>), Value::Undefined);
        assert_eq!(Value::from(Some("x")), Value::String("x".into()));
        assert_eq!(
            Value::from([("a", "1")]),
            Value::Assoc(vec![("a".into(), "1".into())])
        );
        assert!(Value::from(Vec::<String>::new()).is_undefined());
        assert!(!Value::from("").is_undefined());
    }

    #[test]
    fn context_is_send() {
        fn assert_send<T: Send>(_: &T) {}
        let mut context = Context::new();
        context.insert("x", "1");
        assert!(context.encoded("x", false).is_some());
        assert_send(&context);
    }

    #[test]
    fn insert_undefined_removes() {
        let mut context = Context::new();
        context.insert("a", "1");
        assert_eq!(context.insert("a", Value::Undefined), Some(Value::from("1")));
        assert!(!context.contains("a"));
        assert!(context.is_empty());
    }

    #[test]
    fn cache_is_invalidated() {
        let mut context: Context = [("a", "x y"), ("b", "z")].into_iter().collect();
        let encoded = |context: &Context, name| match context.encoded(name, false).as_deref() {
            Some(Encoded::String(s)) => s.clone(),
            other => panic!("unexpected encoding: {other:?}"),
        };

        assert_eq!(encoded(&context, "a"), "x%20y");
        assert_eq!(encoded(&context, "b"), "z");
        assert!(context.encoded("b", true).is_some());
        assert_eq!(context.cached_len(), 3);

        context.insert("a", "w");
        assert_eq!(context.cached_len(), 2);
        assert_eq!(encoded(&context, "a"), "w");

        context.remove("b");
        assert_eq!(context.cached_len(), 1);
        assert!(context.encoded("b", false).is_none());

        context.clear();
        assert_eq!(context.cached_len(), 0);
    }

    #[test]
    fn empty_composites_are_not_encoded() {
        let mut context = Context::new();
        context.insert("list", Vec::<String>::new());
        assert!(context.contains("list"));
        assert!(context.encoded("list", false).is_none());
    }
}
