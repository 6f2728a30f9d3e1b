// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Database schema definitions, written as
//!
//! ```text
//! (def my/foo [{:db/id #db/id [:db.part/db], :db/ident :test, ...}])
//! ```
//!
//! Attributes are kept as the map elements they serialize to; the
//! accessors read their fields back out of that map.

use crate::collection::{new_group, new_map, new_vector};
use crate::error::{new_error, Error, Result};
use crate::number::Number;
use crate::pair::Pairs;
use crate::symbol::{KEYWORD_PREFIX, NAMESPACE_SEPARATOR, SYMBOL_SEPARATOR};
use crate::types::ElementType;
use crate::value::{Atom, CollectionBuilder, Element, Serializer};
use kstring::KString;
use tracing::debug;

pub const RESERVED_DB_NAMESPACE: &str = ":db";

pub const ID_ATTRIBUTE: &str = ":db/id";
pub const IDENT_ATTRIBUTE: &str = ":db/ident";
pub const VALUE_TYPE_ATTRIBUTE: &str = ":db/valueType";
pub const CARDINALITY_ATTRIBUTE: &str = ":db/cardinality";
pub const DOC_ATTRIBUTE: &str = ":db/doc";
pub const INDEX_ATTRIBUTE: &str = ":db/index";
pub const FULLTEXT_ATTRIBUTE: &str = ":db/fulltext";
pub const IS_COMPONENT_ATTRIBUTE: &str = ":db/isComponent";
pub const NO_HISTORY_ATTRIBUTE: &str = ":db/noHistory";
pub const TX_INSTANT_ATTRIBUTE: &str = ":db/txInstant";
pub const UNIQUE_ATTRIBUTE: &str = ":db/unique";

/// The reserved attributes, and whether a schema may set them.
/// `:db/cardinality` is settable in principle but not supported.
pub const RESERVED_ATTRIBUTES: [(&str, bool); 11] = [
    (ID_ATTRIBUTE, false),
    (IDENT_ATTRIBUTE, false),
    (VALUE_TYPE_ATTRIBUTE, false),
    (CARDINALITY_ATTRIBUTE, false),
    (TX_INSTANT_ATTRIBUTE, true),
    (DOC_ATTRIBUTE, true),
    (INDEX_ATTRIBUTE, true),
    (FULLTEXT_ATTRIBUTE, true),
    (IS_COMPONENT_ATTRIBUTE, true),
    (NO_HISTORY_ATTRIBUTE, true),
    (UNIQUE_ATTRIBUTE, true),
];

/// `None` if `name` is not reserved, otherwise whether it is
/// settable.
pub fn reserved_attribute(name: &str) -> Option<bool> {
    RESERVED_ATTRIBUTES.iter()
        .find(|(n, _)| *n == name)
        .map(|(_, settable)| *settable)
}

pub const DB_PARTITION: &str = "db.part/db";
pub const INSTALL_OPERATION: &str = "db.install/_attribute";
pub const ID_TAG: &str = "db/id";
pub const DEF_SYMBOL: &str = "def";

pub const UNKNOWN_CARDINALITY: &str = "Encountered an unknown cardinality";

const CARDINALITY_NAMESPACE: &str = "cardinality";
const UNIQUE_NAMESPACE: &str = "unique";

/// `:db.<namespace>/<local>`
fn reserved_name(namespace: &str, local: &str) -> String {
    format!("{}{}{}{}{}",
            RESERVED_DB_NAMESPACE, NAMESPACE_SEPARATOR, namespace,
            SYMBOL_SEPARATOR, local)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    One,
    Many,
}

impl Cardinality {
    pub fn local_name(self) -> &'static str {
        match self {
            Cardinality::One => "one",
            Cardinality::Many => "many",
        }
    }

    /// E.g. `:db.cardinality/one`.
    pub fn name(self) -> String {
        reserved_name(CARDINALITY_NAMESPACE, self.local_name())
    }
}

impl std::fmt::Display for Cardinality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

/// Parse a cardinality keyword, e.g. `:db.cardinality/one`.
pub fn check_cardinality(name: &str) -> Result<Cardinality> {
    [Cardinality::One, Cardinality::Many].into_iter()
        .find(|c| c.name() == name)
        .ok_or_else(|| new_error(UNKNOWN_CARDINALITY, vec![]))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Uniqueness {
    /// Only one entity can have a given value; asserting a duplicate
    /// value for a different entity id fails.
    Value,
    /// Like `Value`, but a transaction asserting an existing value
    /// upserts into that entity.
    Identity,
}

impl Uniqueness {
    pub fn local_name(self) -> &'static str {
        match self {
            Uniqueness::Value => "value",
            Uniqueness::Identity => "identity",
        }
    }

    pub fn name(self) -> String {
        reserved_name(UNIQUE_NAMESPACE, self.local_name())
    }
}

fn keyword(text: &str) -> Result<Element> {
    Element::keyword(&[text])
}

fn keyword_text(element: &Element) -> Option<String> {
    match element.atom()? {
        Atom::Keyword(s) => Some(format!("{}{}", KEYWORD_PREFIX, s)),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    map: Element,
}

impl Attribute {
    pub fn new(
        name: &str,
        element_type: ElementType,
        cardinality: Cardinality,
        doc: Option<&str>,
    ) -> Result<Attribute> {
        let mut pairs = Pairs::new();
        pairs.append(keyword(ID_ATTRIBUTE)?,
                     new_vector(vec![keyword(DB_PARTITION)?]).with_tag(ID_TAG)?);
        pairs.append(keyword(IDENT_ATTRIBUTE)?, keyword(name)?);
        pairs.append(keyword(VALUE_TYPE_ATTRIBUTE)?, keyword(&element_type.name())?);
        pairs.append(keyword(CARDINALITY_ATTRIBUTE)?, keyword(&cardinality.name())?);
        if let Some(doc) = doc {
            pairs.append(keyword(DOC_ATTRIBUTE)?, Element::string(doc));
        }
        Ok(Attribute { map: new_map(pairs.into_raw())? })
    }

    /// Replace the partition placeholder by a concrete id, written as
    /// `#db/id 123`.
    pub fn set_id(&mut self, id: i64) -> Result<()> {
        let value = Element::integer(id).with_tag(ID_TAG)?;
        self.map.append(vec![keyword(ID_ATTRIBUTE)?, value])
    }

    pub fn with_id(mut self, id: i64) -> Result<Attribute> {
        self.set_id(id)?;
        Ok(self)
    }

    /// The concrete id, if one was set.
    pub fn id(&self) -> Option<i64> {
        match self.map.get(ID_ATTRIBUTE).ok()?.atom()? {
            Atom::Number(Number::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    /// The ident without its leading `:`.
    pub fn name(&self) -> Option<String> {
        let ident = self.map.get(IDENT_ATTRIBUTE).ok()?;
        match ident.atom()? {
            Atom::Keyword(s) => Some(s.to_string()),
            _ => None,
        }
    }

    pub fn element_type(&self) -> Option<ElementType> {
        let text = keyword_text(self.map.get(VALUE_TYPE_ATTRIBUTE).ok()?)?;
        ElementType::try_from(text.as_str()).ok()
    }

    pub fn cardinality(&self) -> Option<Cardinality> {
        let text = keyword_text(self.map.get(CARDINALITY_ATTRIBUTE).ok()?)?;
        check_cardinality(&text).ok()
    }

    pub fn document(&self) -> Option<&str> {
        match self.map.get(DOC_ATTRIBUTE).ok()?.atom()? {
            Atom::String(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl CollectionBuilder for Attribute {
    fn build_collection(&self) -> Result<Element> {
        Ok(self.map.clone())
    }
}

impl Serializer for Attribute {
    fn serialize(&self) -> Result<String> {
        self.map.serialize()
    }
}

#[derive(Debug, Clone)]
pub struct Schema {
    name: KString,
    attributes: Vec<Attribute>,
}

impl Schema {
    /// `name` must be a valid symbol, e.g. `my/foo`.
    pub fn new(name: &str) -> Result<Schema> {
        Element::symbol(&[name])?;
        Ok(Schema { name: KString::from_ref(name), attributes: Vec::new() })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn add_attribute(
        &mut self,
        name: &str,
        element_type: ElementType,
        cardinality: Cardinality,
        doc: Option<&str>,
    ) -> Result<&Attribute> {
        let attribute = Attribute::new(name, element_type, cardinality, doc)?;
        debug!(schema = %self.name, attribute = name, %element_type, "added attribute");
        self.attributes.push(attribute);
        self.attributes.last().ok_or(Error::NoValue)
    }
}

impl CollectionBuilder for Schema {
    fn build_collection(&self) -> Result<Element> {
        let mut attributes = Vec::with_capacity(self.attributes.len());
        for attribute in &self.attributes {
            let mut map = attribute.build_collection()?;
            map.append(vec![keyword(INSTALL_OPERATION)?, keyword(DB_PARTITION)?])?;
            attributes.push(map);
        }
        Ok(new_group(vec![
            Element::symbol(&[DEF_SYMBOL])?,
            Element::symbol(&[self.name.as_str()])?,
            new_vector(attributes),
        ]))
    }
}

impl Serializer for Schema {
    fn serialize(&self) -> Result<String> {
        self.build_collection()?.serialize()
    }
}
