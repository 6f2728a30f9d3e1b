// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The closed set of element kinds.

use crate::symbol::{KEYWORD_PREFIX, SYMBOL_SEPARATOR};

/// Namespace of the type names, as used for `:db/valueType`.
pub const TYPE_NAMESPACE: &str = "db.type";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementType {
    Nil,
    Boolean,
    String,
    Character,
    Symbol,
    Keyword,
    /// 64 bits wide, two's complement.
    Integer,
    /// IEEE 754 double precision.
    Float,
    Instant,
    Uuid,
    Grouping,
    Vector,
    Map,
    Set,
    // Reserved, no element exists for these (yet).
    BigInt,
    BigDec,
    Double,
    Ref,
    Uri,
    Bytes,
}

pub const ALL_ELEMENT_TYPES: [ElementType; 20] = [
    ElementType::Nil,
    ElementType::Boolean,
    ElementType::String,
    ElementType::Character,
    ElementType::Symbol,
    ElementType::Keyword,
    ElementType::Integer,
    ElementType::Float,
    ElementType::Instant,
    ElementType::Uuid,
    ElementType::Grouping,
    ElementType::Vector,
    ElementType::Map,
    ElementType::Set,
    ElementType::BigInt,
    ElementType::BigDec,
    ElementType::Double,
    ElementType::Ref,
    ElementType::Uri,
    ElementType::Bytes,
];

impl ElementType {
    /// The local part of the type name, e.g. "long" for `Integer`.
    pub fn local_name(self) -> &'static str {
        match self {
            ElementType::Nil => "nil",
            ElementType::Boolean => "boolean",
            ElementType::String => "string",
            ElementType::Character => "character",
            ElementType::Symbol => "symbol",
            ElementType::Keyword => "keyword",
            ElementType::Integer => "long",
            ElementType::Float => "float",
            ElementType::Instant => "instant",
            ElementType::Uuid => "uuid",
            ElementType::Grouping => "group",
            ElementType::Vector => "vector",
            ElementType::Map => "map",
            ElementType::Set => "set",
            ElementType::BigInt => "bigint",
            ElementType::BigDec => "bigdec",
            ElementType::Double => "double",
            ElementType::Ref => "ref",
            ElementType::Uri => "uri",
            ElementType::Bytes => "bytes",
        }
    }

    /// The full name, e.g. ":db.type/long".
    pub fn name(self) -> String {
        format!("{}{}{}{}",
                KEYWORD_PREFIX, TYPE_NAMESPACE, SYMBOL_SEPARATOR,
                self.local_name())
    }

    pub fn is_collection(self) -> bool {
        matches!(self,
                 ElementType::Grouping
                 | ElementType::Vector
                 | ElementType::Map
                 | ElementType::Set)
    }

    /// Whether elements of this kind can be constructed at all.
    pub fn is_reserved(self) -> bool {
        matches!(self,
                 ElementType::BigInt
                 | ElementType::BigDec
                 | ElementType::Double
                 | ElementType::Ref
                 | ElementType::Uri
                 | ElementType::Bytes)
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        f.write_str(KEYWORD_PREFIX)?;
        f.write_str(TYPE_NAMESPACE)?;
        f.write_str(SYMBOL_SEPARATOR)?;
        f.write_str(self.local_name())
    }
}

/// Accepts both the full name (":db.type/long") and the local part
/// ("long").
impl TryFrom<&str> for ElementType {
    type Error = ();
    fn try_from(s: &str) -> Result<ElementType, Self::Error> {
        let local = s.strip_prefix(KEYWORD_PREFIX)
            .and_then(|s| s.strip_prefix(TYPE_NAMESPACE))
            .and_then(|s| s.strip_prefix(SYMBOL_SEPARATOR))
            .unwrap_or(s);
        ALL_ELEMENT_TYPES.iter()
            .copied()
            .find(|t| t.local_name() == local)
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert_eq!(ElementType::Integer.name(), ":db.type/long");
        assert_eq!(ElementType::String.to_string(), ":db.type/string");
        assert_eq!(ElementType::Grouping.name(), ":db.type/group");
    }

    #[test]
    fn names_parse_back() {
        for t in ALL_ELEMENT_TYPES {
            assert_eq!(ElementType::try_from(t.name().as_str()), Ok(t));
            assert_eq!(ElementType::try_from(t.local_name()), Ok(t));
        }
        assert_eq!(ElementType::try_from(":db.type/widget"), Err(()));
    }

    #[test]
    fn collections() {
        let collections: Vec<_> = ALL_ELEMENT_TYPES.iter()
            .filter(|t| t.is_collection())
            .collect();
        assert_eq!(collections.len(), 4);
        assert!(!ElementType::Keyword.is_collection());
        assert!(ElementType::Bytes.is_reserved());
        assert!(!ElementType::Uuid.is_reserved());
    }
}
