// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Runtime data types representing an EDN element.

//! Whereas [Atom](Atom) does not include collections,
//! [Value](Value) adds them (see [collection](../collection/index.html)).
//! An [Element](Element) is a value with an optional tag; it is what
//! gets serialized.

use crate::collection::{Collection, CollectionElement, Key};
use crate::error::{Error, Result};
use crate::number::Number;
use crate::settings::{Format, EDN_FORMAT};
use crate::symbol::{Symbol, KEYWORD_PREFIX, TAG_PREFIX};
use crate::types::ElementType;
use chrono::{DateTime, FixedOffset, SecondsFormat};
use kstring::KString;
use std::fmt::{Display, Write};
use uuid::Uuid;

pub const NIL_LITERAL: &str = "nil";

pub const CHARACTER_PREFIX: &str = "\\";

pub const INSTANT_TAG: &str = "inst";

pub const UUID_TAG: &str = "uuid";

/// Converts the entity into its EDN text.
pub trait Serializer {
    fn serialize(&self) -> Result<String>;
}

/// Something that can be turned into an element.
pub trait Builder {
    fn build(&self) -> Result<Element>;
}

/// Something that can be turned into a collection element.
pub trait CollectionBuilder {
    fn build_collection(&self) -> Result<Element>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    Nil,
    Bool(bool),
    Char(char),
    String(KString),
    Number(Number),
    Instant(DateTime<FixedOffset>),
    Uuid(Uuid),
    Symbol(Symbol),
    Keyword(Symbol), // stored without the leading ':'
}

impl Atom {
    pub fn element_type(&self) -> ElementType {
        match self {
            Atom::Nil => ElementType::Nil,
            Atom::Bool(_) => ElementType::Boolean,
            Atom::Char(_) => ElementType::Character,
            Atom::String(_) => ElementType::String,
            Atom::Number(Number::Integer(_)) => ElementType::Integer,
            Atom::Number(Number::Float(_)) => ElementType::Float,
            Atom::Instant(_) => ElementType::Instant,
            Atom::Uuid(_) => ElementType::Uuid,
            Atom::Symbol(_) => ElementType::Symbol,
            Atom::Keyword(_) => ElementType::Keyword,
        }
    }
}

/// Characters written as `\uXXXX` inside strings: control
/// characters, whitespace other than the plain space, and the
/// invisible formatting characters.
fn needs_escape(c: char) -> bool {
    c.is_control()
        || (c.is_whitespace() && c != ' ')
        || matches!(c,
                    '\u{ad}'
                    | '\u{200b}'..='\u{200f}'
                    | '\u{202a}'..='\u{202e}'
                    | '\u{2060}'..='\u{2064}'
                    | '\u{feff}')
}

fn fmt_string(f: &mut std::fmt::Formatter<'_>, s: &str)
              -> std::fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' | '\\' => {
                f.write_char('\\')?;
                f.write_char(c)?
            }
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\x08' => f.write_str("\\b")?,
            '\x0C' => f.write_str("\\f")?,
            c if needs_escape(c) => f.write_fmt(format_args!("\\u{:04x}", c as u32))?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

pub fn char2name(c: char) -> Option<&'static str> {
    match c {
        '\n' => Some("newline"),
        '\r' => Some("return"),
        ' ' => Some("space"),
        '\t' => Some("tab"),
        _ => None
    }
}

fn fmt_char(f: &mut std::fmt::Formatter<'_>, c: char)
            -> std::fmt::Result {
    f.write_str(CHARACTER_PREFIX)?;
    if let Some(name) = char2name(c) {
        f.write_str(name)
    } else if c.is_ascii_graphic() {
        f.write_char(c)
    } else if (c as u32) <= 0xFFFF {
        f.write_fmt(format_args!("u{:04x}", c as u32))
    } else {
        f.write_fmt(format_args!("U{:08x}", c as u32))
    }
}

impl std::fmt::Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> std::fmt::Result {
        match self {
            Atom::Nil => f.write_str(NIL_LITERAL),
            Atom::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Atom::Char(c) => fmt_char(f, *c),
            Atom::String(s) => fmt_string(f, s),
            Atom::Number(n) => n.fmt(f),
            Atom::Instant(t) =>
                f.write_str(&t.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Atom::Uuid(u) => u.hyphenated().fmt(f),
            Atom::Symbol(s) => s.fmt(f),
            Atom::Keyword(s) => {
                f.write_str(KEYWORD_PREFIX)?;
                s.fmt(f)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Atom(Atom),
    Collection(Collection),
}

impl Value {
    pub fn element_type(&self) -> ElementType {
        match self {
            Value::Atom(a) => a.element_type(),
            Value::Collection(c) => c.kind().element_type(),
        }
    }
}

/// A value with an optional tag. Two elements are equal iff they are
/// of the same type, carry the same tag and hold equal values.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: Option<KString>,
    value: Value,
}

impl From<Atom> for Element {
    fn from(a: Atom) -> Element {
        Element { tag: None, value: Value::Atom(a) }
    }
}

impl From<Collection> for Element {
    fn from(c: Collection) -> Element {
        Element { tag: None, value: Value::Collection(c) }
    }
}

/// Check a tag and return it without any leading `#`. Tags are
/// symbols starting with an alphabetic character.
pub fn check_tag(tag: &str) -> Result<&str> {
    let tag = tag.strip_prefix(TAG_PREFIX).unwrap_or(tag);
    if tag.is_empty() {
        return Ok(tag)
    }
    if !tag.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return Err(Error::InvalidSymbol)
    }
    Symbol::parse(&[tag])?;
    Ok(tag)
}

impl Element {
    pub fn nil() -> Element {
        Atom::Nil.into()
    }

    pub fn boolean(b: bool) -> Element {
        Atom::Bool(b).into()
    }

    pub fn string(s: &str) -> Element {
        Atom::String(KString::from_ref(s)).into()
    }

    pub fn character(c: char) -> Element {
        Atom::Char(c).into()
    }

    pub fn integer(n: i64) -> Element {
        Atom::Number(Number::Integer(n)).into()
    }

    pub fn float(x: f64) -> Element {
        Atom::Number(Number::Float(x)).into()
    }

    /// Tagged `inst`.
    pub fn instant(t: impl Into<DateTime<FixedOffset>>) -> Element {
        Element {
            tag: Some(KString::from_static(INSTANT_TAG)),
            value: Value::Atom(Atom::Instant(t.into())),
        }
    }

    /// Tagged `uuid`.
    pub fn uuid(u: Uuid) -> Element {
        Element {
            tag: Some(KString::from_static(UUID_TAG)),
            value: Value::Atom(Atom::Uuid(u)),
        }
    }

    /// See [Symbol::parse](../symbol/struct.Symbol.html#method.parse).
    pub fn symbol(parts: &[&str]) -> Result<Element> {
        Ok(Atom::Symbol(Symbol::parse(parts)?).into())
    }

    /// See [Symbol::parse_keyword](../symbol/struct.Symbol.html#method.parse_keyword).
    pub fn keyword(parts: &[&str]) -> Result<Element> {
        Ok(Atom::Keyword(Symbol::parse_keyword(parts)?).into())
    }

    pub fn element_type(&self) -> ElementType {
        self.value.element_type()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn atom(&self) -> Option<&Atom> {
        match &self.value {
            Value::Atom(a) => Some(a),
            Value::Collection(_) => None,
        }
    }

    /// The prefix and name of symbols and keywords.
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self.atom()? {
            Atom::Symbol(s) | Atom::Keyword(s) => Some(s),
            _ => None,
        }
    }

    /// Written before a symbol: ":" for keywords, "" for symbols and
    /// everything else.
    pub fn modifier(&self) -> &'static str {
        match self.atom() {
            Some(Atom::Keyword(_)) => KEYWORD_PREFIX,
            _ => "",
        }
    }

    pub fn as_collection(&self) -> Option<&Collection> {
        match &self.value {
            Value::Collection(c) => Some(c),
            Value::Atom(_) => None,
        }
    }

    pub fn as_collection_mut(&mut self) -> Option<&mut Collection> {
        match &mut self.value {
            Value::Collection(c) => Some(c),
            Value::Atom(_) => None,
        }
    }

    pub fn has_tag(&self) -> bool {
        self.tag.is_some()
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Set the tag, or unset it if `tag` is empty. A leading `#` is
    /// dropped.
    pub fn set_tag(&mut self, tag: &str) -> Result<()> {
        let tag = check_tag(tag)?;
        self.tag = if tag.is_empty() {
            None
        } else {
            Some(KString::from_ref(tag))
        };
        Ok(())
    }

    pub fn with_tag(mut self, tag: &str) -> Result<Element> {
        self.set_tag(tag)?;
        Ok(self)
    }

    pub fn equals(&self, other: &Element) -> bool {
        self == other
    }

    pub fn serialize(&self) -> Result<String> {
        self.serialize_with(&EDN_FORMAT)
    }

    pub fn serialize_with(&self, format: &Format) -> Result<String> {
        let mut out = String::new();
        self.write_to(&mut out, format)?;
        Ok(out)
    }

    /// Appends the text to `out`. On error, `out` holds partial
    /// output.
    pub fn write_to(&self, out: &mut String, format: &Format) -> Result<()> {
        if let Some(tag) = &self.tag {
            out.push_str(TAG_PREFIX);
            out.push_str(tag);
            out.push(' ');
        }
        match &self.value {
            Value::Atom(a) => write!(out, "{}", a)?,
            Value::Collection(c) => c.write_to(out, format)?,
        }
        Ok(())
    }

    // Forwarding to the collection; non-collections have no
    // children.

    pub fn len(&self) -> usize {
        self.as_collection().map_or(0, |c| c.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn append(&mut self, children: Vec<Element>) -> Result<()> {
        self.as_collection_mut()
            .ok_or(Error::InvalidElement)?
            .append(children)
    }

    pub fn get<'k>(&self, key: impl Into<Key<'k>>) -> Result<&Element> {
        self.as_collection()
            .ok_or(Error::InvalidElement)?
            .get(key.into())
    }

    pub fn iterate_children<F>(&self, iterator: F) -> Result<()>
    where F: FnMut(&Element, &Element) -> Result<()>
    {
        self.as_collection()
            .ok_or(Error::InvalidElement)?
            .iterate_children(iterator)
    }
}

impl Serializer for Element {
    fn serialize(&self) -> Result<String> {
        Element::serialize(self)
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> std::fmt::Result {
        let s = self.serialize().map_err(|_| std::fmt::Error)?;
        f.write_str(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn characters() {
        let cases = [
            ('a', "\\a"),
            ('\n', "\\newline"),
            ('\r', "\\return"),
            (' ', "\\space"),
            ('\t', "\\tab"),
            ('⌘', "\\u2318"),
            ('\\', "\\\\"),
            ('"', "\\\""),
            ('\x07', "\\u0007"),
            ('\x7f', "\\u007f"),
            ('\u{2028}', "\\u2028"),
            ('😀', "\\U0001f600"),
        ];
        for (c, expected) in cases {
            assert_eq!(Element::character(c).serialize().unwrap(), expected, "{c:?}");
        }
    }

    #[test]
    fn strings() {
        assert_eq!(Element::string("plain").serialize().unwrap(), "\"plain\"");
        assert_eq!(Element::string("a \"q\" \\ b").serialize().unwrap(),
                   "\"a \\\"q\\\" \\\\ b\"");
        assert_eq!(Element::string("l1\nl2\t\r").serialize().unwrap(),
                   "\"l1\\nl2\\t\\r\"");
        assert_eq!(Element::string("\x01é").serialize().unwrap(), "\"\\u0001é\"");
        assert_eq!(Element::string("\x07a\x7f").serialize().unwrap(), "\"\\u0007a\\u007f\"");
        assert_eq!(Element::string("").serialize().unwrap(), "\"\"");
    }

    #[test]
    fn invisible_string_characters() {
        assert_eq!(Element::string("a\u{2028}b").serialize().unwrap(), "\"a\\u2028b\"");
        assert_eq!(Element::string("soft\u{ad}hyphen").serialize().unwrap(),
                   "\"soft\\u00adhyphen\"");
        assert_eq!(Element::string("nb\u{a0}sp").serialize().unwrap(), "\"nb\\u00a0sp\"");
        assert_eq!(Element::string("\u{feff}").serialize().unwrap(), "\"\\ufeff\"");
        assert_eq!(Element::string("a b é ⌘").serialize().unwrap(), "\"a b é ⌘\"");
    }

    #[test]
    fn tags_are_checked() {
        let mut e = Element::integer(1);
        e.set_tag("#db/id").unwrap();
        assert_eq!(e.tag(), Some("db/id"));
        assert!(matches!(e.set_tag("1abc"), Err(Error::InvalidSymbol)));
        assert!(matches!(e.set_tag("+abc"), Err(Error::InvalidSymbol)));
        assert!(matches!(e.set_tag("a b"), Err(Error::InvalidSymbol)));
        assert_eq!(e.tag(), Some("db/id"));
        e.set_tag("").unwrap();
        assert!(!e.has_tag());
    }

    #[test]
    fn modifiers() {
        assert_eq!(Element::keyword(&["a"]).unwrap().modifier(), ":");
        assert_eq!(Element::symbol(&["a"]).unwrap().modifier(), "");
        assert_eq!(Element::nil().modifier(), "");
    }
}
