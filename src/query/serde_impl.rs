//! Serde support for decoded queries.
//!
//! A [`QueryMap`] is a map of names to values. [`QueryValue::Null`] is
//! `none`, a list is a sequence of optional strings, and
//! [`QueryValue::Absent`] entries are not serialized.

use core::fmt;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{QueryMap, QueryValue};

impl Serialize for QueryValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Absent | Self::Null => serializer.serialize_none(),
            Self::Single(v) => serializer.serialize_str(v),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&item.as_deref())?;
                }
                seq.end()
            }
        }
    }
}

/// Visitor for [`QueryValue`].
#[derive(Debug, Clone, Copy)]
struct QueryValueVisitor;

impl<'de> Visitor<'de> for QueryValueVisitor {
    type Value = QueryValue;

    #[inline]
    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a query parameter value")
    }

    #[inline]
    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(QueryValue::Null)
    }

    #[inline]
    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(QueryValue::Null)
    }

    #[inline]
    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    #[inline]
    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(QueryValue::Single(v.into()))
    }

    #[inline]
    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(QueryValue::Single(v))
    }

    #[inline]
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(QueryValue::Single(v.to_string()))
    }

    #[inline]
    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(QueryValue::Single(v.to_string()))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Option<String>>()? {
            items.push(item);
        }
        Ok(QueryValue::List(items))
    }
}

impl<'de> Deserialize<'de> for QueryValue {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(QueryValueVisitor)
    }
}

impl Serialize for QueryMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = self.iter().filter(|(_, v)| !v.is_absent()).count();
        let mut map = serializer.serialize_map(Some(len))?;
        for (name, value) in self.iter().filter(|(_, v)| !v.is_absent()) {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Visitor for [`QueryMap`].
#[derive(Debug, Clone, Copy)]
struct QueryMapVisitor;

impl<'de> Visitor<'de> for QueryMapVisitor {
    type Value = QueryMap;

    #[inline]
    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of query parameters")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = QueryMap::new();
        while let Some((name, value)) = access.next_entry::<String, QueryValue>()? {
            map.insert(name, value);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for QueryMap {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(QueryMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_test::{assert_ser_tokens, assert_tokens, Token};

    #[test]
    fn map_tokens() {
        let mut map = QueryMap::new();
        map.insert("a", "1");
        map.insert("n", QueryValue::Null);
        map.insert("l", QueryValue::List(alloc::vec![Some("x".into()), None]));
        assert_tokens(
            &map,
            &[
                Token::Map { len: Some(3) },
                Token::Str("a"),
                Token::Str("1"),
                Token::Str("n"),
                Token::None,
                Token::Str("l"),
                Token::Seq { len: Some(2) },
                Token::Some,
                Token::Str("x"),
                Token::None,
                Token::SeqEnd,
                Token::MapEnd,
            ],
        );
    }

    #[test]
    fn absent_entries_are_skipped() {
        let mut map = QueryMap::new();
        map.insert("gone", QueryValue::Absent);
        map.insert("a", "1");
        assert_ser_tokens(
            &map,
            &[
                Token::Map { len: Some(1) },
                Token::Str("a"),
                Token::Str("1"),
                Token::MapEnd,
            ],
        );
    }
}
