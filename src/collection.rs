// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Groupings `()`, vectors `[]` and sets `#{}` hold an ordered,
//! heterogeneous sequence of elements; maps `{}` associate keys with
//! values. Both shapes share the [CollectionElement](CollectionElement)
//! interface and the same serialization walk.

use crate::error::{Error, Result};
use crate::pair::Pair;
use crate::settings::{Format, EDN_FORMAT};
use crate::value::{Atom, Element};
use crate::types::ElementType;
use indexmap::IndexMap;
use kstring::KString;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Grouping,
    Vector,
    Set,
    Map,
}

impl CollectionKind {
    pub fn opening(self) -> &'static str {
        match self {
            CollectionKind::Grouping => "(",
            CollectionKind::Vector => "[",
            CollectionKind::Set => "#{",
            CollectionKind::Map => "{",
        }
    }
    pub fn closing(self) -> &'static str {
        match self {
            CollectionKind::Grouping => ")",
            CollectionKind::Vector => "]",
            CollectionKind::Set | CollectionKind::Map => "}",
        }
    }
    /// Whether entries are rendered as `key value`.
    pub fn has_keys(self) -> bool {
        self == CollectionKind::Map
    }
    pub fn element_type(self) -> ElementType {
        match self {
            CollectionKind::Grouping => ElementType::Grouping,
            CollectionKind::Vector => ElementType::Vector,
            CollectionKind::Set => ElementType::Set,
            CollectionKind::Map => ElementType::Map,
        }
    }
}

/// What to look up in a collection: a position, a map key text, or an
/// element standing for its serialization.
#[derive(Debug, Clone, Copy)]
pub enum Key<'t> {
    Index(i64),
    Text(&'t str),
    Element(&'t Element),
}

impl<'t> From<i64> for Key<'t> {
    fn from(i: i64) -> Key<'t> { Key::Index(i) }
}

impl<'t> From<i32> for Key<'t> {
    fn from(i: i32) -> Key<'t> { Key::Index(i.into()) }
}

impl<'t> From<usize> for Key<'t> {
    fn from(i: usize) -> Key<'t> {
        Key::Index(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

impl<'t> From<&'t str> for Key<'t> {
    fn from(s: &'t str) -> Key<'t> { Key::Text(s) }
}

impl<'t> From<&'t Element> for Key<'t> {
    fn from(e: &'t Element) -> Key<'t> { Key::Element(e) }
}

/// The text a key is stored under in a map: the raw text of a string,
/// the serialization of anything else.
pub fn map_key(key: &Element) -> Result<KString> {
    match key.atom() {
        Some(Atom::String(s)) => Ok(s.clone()),
        _ => Ok(KString::from_string(key.serialize_with(&EDN_FORMAT)?)),
    }
}

pub trait CollectionElement {
    fn kind(&self) -> CollectionKind;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visit every child in order, with its position (as an integer
    /// element) or its map key. The first error returned by
    /// `iterator` ends the walk and is passed on.
    fn iterate_children<F>(&self, iterator: F) -> Result<()>
    where F: FnMut(&Element, &Element) -> Result<()>;

    /// Add children at the end. Maps take alternating keys and values.
    fn append(&mut self, children: Vec<Element>) -> Result<()>;

    fn get(&self, key: Key<'_>) -> Result<&Element>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    kind: CollectionKind,
    items: Vec<Element>,
}

impl Sequence {
    pub fn items(&self) -> &[Element] {
        &self.items
    }
}

impl CollectionElement for Sequence {
    fn kind(&self) -> CollectionKind {
        self.kind
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn iterate_children<F>(&self, mut iterator: F) -> Result<()>
    where F: FnMut(&Element, &Element) -> Result<()>
    {
        for (i, child) in self.items.iter().enumerate() {
            let index = Element::integer(i as i64);
            iterator(&index, child)?;
        }
        Ok(())
    }

    fn append(&mut self, children: Vec<Element>) -> Result<()> {
        self.items.extend(children);
        Ok(())
    }

    fn get(&self, key: Key<'_>) -> Result<&Element> {
        let index = match key {
            Key::Index(i) => i,
            Key::Text(s) => s.parse().map_err(|_| Error::NoValue)?,
            Key::Element(e) => e.serialize()?.parse().map_err(|_| Error::NoValue)?,
        };
        usize::try_from(index).ok()
            .and_then(|i| self.items.get(i))
            .ok_or(Error::NoValue)
    }
}

/// Entries are stored under their key's text (see [map_key](map_key))
/// in first-insertion order, and keep the key element itself for
/// iteration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map {
    entries: IndexMap<KString, (Element, Element)>,
}

impl Map {
    pub fn entries(&self) -> impl Iterator<Item = (&Element, &Element)> {
        self.entries.values().map(|(k, v)| (k, v))
    }

    fn insert(&mut self, key: Element, value: Element) -> Result<()> {
        let text = map_key(&key)?;
        if let Some((old, _)) = self.entries.insert(text, (key, value)) {
            trace!(key = %old, "map entry overwritten");
        }
        Ok(())
    }
}

impl CollectionElement for Map {
    fn kind(&self) -> CollectionKind {
        CollectionKind::Map
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn iterate_children<F>(&self, mut iterator: F) -> Result<()>
    where F: FnMut(&Element, &Element) -> Result<()>
    {
        for (key, value) in self.entries.values() {
            iterator(key, value)?;
        }
        Ok(())
    }

    fn append(&mut self, children: Vec<Element>) -> Result<()> {
        if children.len() % 2 != 0 {
            return Err(Error::InvalidInput)
        }
        let mut children = children.into_iter();
        while let (Some(key), Some(value)) = (children.next(), children.next()) {
            self.insert(key, value)?;
        }
        Ok(())
    }

    fn get(&self, key: Key<'_>) -> Result<&Element> {
        let text = match key {
            Key::Index(i) => KString::from_string(i.to_string()),
            Key::Text(s) => KString::from_ref(s),
            // unlike `append`, strings are not unwrapped here
            Key::Element(e) => KString::from_string(e.serialize()?),
        };
        self.entries.get(&text)
            .map(|(_, v)| v)
            .ok_or(Error::NoValue)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Collection {
    Sequence(Sequence),
    Map(Map),
}

impl Collection {
    /// Appends the text to `out`, walking the children with
    /// [iterate_children](CollectionElement::iterate_children).
    pub fn write_to(&self, out: &mut String, format: &Format) -> Result<()> {
        let kind = self.kind();
        let separator = if kind.has_keys() {
            format.map_entry_separator
        } else {
            format.sequence_separator
        };
        out.push_str(kind.opening());
        let mut first = true;
        self.iterate_children(|key, child| {
            if first {
                first = false;
            } else {
                out.push_str(separator);
            }
            if kind.has_keys() {
                key.write_to(out, format)?;
                out.push_str(format.map_key_value_separator);
            }
            child.write_to(out, format)
        })?;
        out.push_str(kind.closing());
        Ok(())
    }
}

impl CollectionElement for Collection {
    fn kind(&self) -> CollectionKind {
        match self {
            Collection::Sequence(s) => s.kind(),
            Collection::Map(m) => m.kind(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Collection::Sequence(s) => s.len(),
            Collection::Map(m) => m.len(),
        }
    }

    fn iterate_children<F>(&self, iterator: F) -> Result<()>
    where F: FnMut(&Element, &Element) -> Result<()>
    {
        match self {
            Collection::Sequence(s) => s.iterate_children(iterator),
            Collection::Map(m) => m.iterate_children(iterator),
        }
    }

    fn append(&mut self, children: Vec<Element>) -> Result<()> {
        match self {
            Collection::Sequence(s) => s.append(children),
            Collection::Map(m) => m.append(children),
        }
    }

    fn get(&self, key: Key<'_>) -> Result<&Element> {
        match self {
            Collection::Sequence(s) => s.get(key),
            Collection::Map(m) => m.get(key),
        }
    }
}

fn sequence(kind: CollectionKind, children: Vec<Element>) -> Element {
    Collection::Sequence(Sequence { kind, items: children }).into()
}

/// `(a b c)`
pub fn new_group(children: Vec<Element>) -> Element {
    sequence(CollectionKind::Grouping, children)
}

/// `[a b c]`
pub fn new_vector(children: Vec<Element>) -> Element {
    sequence(CollectionKind::Vector, children)
}

/// `#{a b c}`
pub fn new_set(children: Vec<Element>) -> Element {
    sequence(CollectionKind::Set, children)
}

/// `{k1 v1, k2 v2}`. Fails with `DuplicateKey` if two of the pairs
/// have equal keys.
pub fn new_map(pairs: Vec<Pair>) -> Result<Element> {
    for (i, pair) in pairs.iter().enumerate() {
        if pairs[..i].iter().any(|p| p.key().equals(pair.key())) {
            return Err(Error::DuplicateKey)
        }
    }
    let mut map = Map::default();
    for pair in pairs {
        let (key, value) = pair.into_parts();
        map.insert(key, value)?;
    }
    Ok(Collection::Map(map).into())
}
