// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Building elements from host values.
//!
//! A [Registry](Registry) maps element types to factories. The free
//! function [new_element](new_element) uses a process-wide default
//! registry holding the built-in factories, which is built once on
//! first use and never changes afterwards. Callers wanting additional
//! factories build their own registry with `Registry::default()` and
//! [add_factory](Registry::add_factory) before handing it out.

use crate::error::{append_error, arg, new_error, Error, Result};
use crate::symbol::KEYWORD_PREFIX;
use crate::types::ElementType;
use crate::value::{Element, NIL_LITERAL};
use chrono::{DateTime, FixedOffset, Utc};
use kstring::KString;
use lazy_static::lazy_static;
use std::collections::HashMap;
use tracing::{debug, warn};
use uuid::Uuid;

/// The host values `new_element` understands.
#[derive(Debug, Clone)]
pub enum Input {
    /// Stereotypes the following value.
    Type(ElementType),
    Nil,
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Char(char),
    Str(KString),
    Instant(DateTime<FixedOffset>),
    Uuid(Uuid),
    /// Passed through unchanged.
    Element(Element),
}

impl From<ElementType> for Input {
    fn from(t: ElementType) -> Input { Input::Type(t) }
}
impl From<bool> for Input {
    fn from(b: bool) -> Input { Input::Bool(b) }
}
impl From<i32> for Input {
    fn from(n: i32) -> Input { Input::Int32(n) }
}
impl From<i64> for Input {
    fn from(n: i64) -> Input { Input::Int64(n) }
}
impl From<f32> for Input {
    fn from(x: f32) -> Input { Input::Float32(x) }
}
impl From<f64> for Input {
    fn from(x: f64) -> Input { Input::Float64(x) }
}
impl From<char> for Input {
    fn from(c: char) -> Input { Input::Char(c) }
}
impl From<&str> for Input {
    fn from(s: &str) -> Input { Input::Str(KString::from_ref(s)) }
}
impl From<String> for Input {
    fn from(s: String) -> Input { Input::Str(KString::from_string(s)) }
}
impl From<DateTime<FixedOffset>> for Input {
    fn from(t: DateTime<FixedOffset>) -> Input { Input::Instant(t) }
}
impl From<DateTime<Utc>> for Input {
    fn from(t: DateTime<Utc>) -> Input { Input::Instant(t.into()) }
}
impl From<Uuid> for Input {
    fn from(u: Uuid) -> Input { Input::Uuid(u) }
}
impl From<Element> for Input {
    fn from(e: Element) -> Input { Input::Element(e) }
}

impl Input {
    /// The element type this value is built as when not stereotyped.
    pub fn inferred_type(&self) -> Option<ElementType> {
        match self {
            Input::Type(_) => None,
            Input::Nil => Some(ElementType::Nil),
            Input::Bool(_) => Some(ElementType::Boolean),
            Input::Int32(_) | Input::Int64(_) => Some(ElementType::Integer),
            Input::Float32(_) | Input::Float64(_) => Some(ElementType::Float),
            Input::Char(_) => Some(ElementType::Character),
            Input::Str(s) => Some(
                if s.as_str() == NIL_LITERAL {
                    ElementType::Nil
                } else if s.starts_with(KEYWORD_PREFIX) {
                    ElementType::Keyword
                } else {
                    ElementType::String
                }),
            Input::Instant(_) => Some(ElementType::Instant),
            Input::Uuid(_) => Some(ElementType::Uuid),
            Input::Element(e) => Some(e.element_type()),
        }
    }
}

pub type Factory = fn(Input) -> Result<Element>;

fn nil_factory(input: Input) -> Result<Element> {
    match input {
        Input::Nil => Ok(Element::nil()),
        Input::Str(s) if s.as_str() == NIL_LITERAL => Ok(Element::nil()),
        _ => Err(Error::InvalidInput),
    }
}

fn boolean_factory(input: Input) -> Result<Element> {
    match input {
        Input::Bool(b) => Ok(Element::boolean(b)),
        _ => Err(Error::InvalidInput),
    }
}

fn string_factory(input: Input) -> Result<Element> {
    match input {
        Input::Str(s) => Ok(Element::string(&s)),
        _ => Err(Error::InvalidInput),
    }
}

fn character_factory(input: Input) -> Result<Element> {
    match input {
        Input::Char(c) => Ok(Element::character(c)),
        _ => Err(Error::InvalidInput),
    }
}

fn symbol_factory(input: Input) -> Result<Element> {
    match input {
        Input::Str(s) => Element::symbol(&[s.as_str()]),
        _ => Err(Error::InvalidInput),
    }
}

fn keyword_factory(input: Input) -> Result<Element> {
    match input {
        Input::Str(s) => Element::keyword(&[s.as_str()]),
        _ => Err(Error::InvalidInput),
    }
}

fn integer_factory(input: Input) -> Result<Element> {
    match input {
        Input::Int32(n) => Ok(Element::integer(n.into())),
        Input::Int64(n) => Ok(Element::integer(n)),
        _ => Err(Error::InvalidInput),
    }
}

fn float_factory(input: Input) -> Result<Element> {
    match input {
        Input::Float32(x) => Ok(Element::float(x.into())),
        Input::Float64(x) => Ok(Element::float(x)),
        _ => Err(Error::InvalidInput),
    }
}

fn instant_factory(input: Input) -> Result<Element> {
    match input {
        Input::Instant(t) => Ok(Element::instant(t)),
        _ => Err(Error::InvalidInput),
    }
}

fn uuid_factory(input: Input) -> Result<Element> {
    match input {
        Input::Uuid(u) => Ok(Element::uuid(u)),
        _ => Err(Error::InvalidInput),
    }
}

const BUILTIN_FACTORIES: [(ElementType, Factory); 10] = [
    (ElementType::Nil, nil_factory),
    (ElementType::Boolean, boolean_factory),
    (ElementType::String, string_factory),
    (ElementType::Character, character_factory),
    (ElementType::Symbol, symbol_factory),
    (ElementType::Keyword, keyword_factory),
    (ElementType::Integer, integer_factory),
    (ElementType::Float, float_factory),
    (ElementType::Instant, instant_factory),
    (ElementType::Uuid, uuid_factory),
];

fn unknown_type(t: Option<ElementType>) -> Error {
    let name = t.map(ElementType::name).unwrap_or_default();
    append_error(vec![
        Some(Error::InvalidElement),
        Some(new_error("Unknown type {}", vec![arg(name)])),
    ]).unwrap_or(Error::InvalidElement)
}

#[derive(Debug, Clone)]
pub struct Registry {
    factories: HashMap<ElementType, Factory>,
}

lazy_static! {
    static ref DEFAULT_REGISTRY: Registry = Registry::default();
}

/// Holds the factories for all built-in element types.
impl Default for Registry {
    fn default() -> Registry {
        let factories: HashMap<ElementType, Factory> =
            BUILTIN_FACTORIES.iter().copied().collect();
        debug!(types = factories.len(), "built element type registry");
        Registry { factories }
    }
}

impl Registry {
    /// A registry without any factories.
    pub fn new() -> Registry {
        Registry { factories: HashMap::new() }
    }

    /// The shared registry used by [new_element](new_element).
    pub fn global() -> &'static Registry {
        &DEFAULT_REGISTRY
    }

    /// Register `factory` for `element_type`; each type can only be
    /// registered once.
    pub fn add_factory(&mut self, element_type: ElementType, factory: Factory)
                       -> Result<()> {
        if self.factories.contains_key(&element_type) {
            warn!(%element_type, "factory already registered");
            return Err(Error::InvalidFactory)
        }
        debug!(%element_type, "registered factory");
        self.factories.insert(element_type, factory);
        Ok(())
    }

    pub fn factory(&self, element_type: ElementType) -> Option<Factory> {
        self.factories.get(&element_type).copied()
    }

    pub fn has_factory(&self, element_type: ElementType) -> bool {
        self.factories.contains_key(&element_type)
    }

    /// Run the factory of `element_type` on `input`.
    pub fn build(&self, element_type: ElementType, input: Input) -> Result<Element> {
        match self.factory(element_type) {
            Some(factory) => factory(input),
            None => Err(unknown_type(Some(element_type))),
        }
    }

    /// Build an element from zero to two values:
    ///
    /// * nothing gives nil,
    /// * a single [Element](Input::Element) is returned as is,
    /// * a single value has its type inferred,
    /// * a non-collection [Type](Input::Type) followed by a value
    ///   builds the value as that type.
    ///
    /// Anything else is an `InvalidElement`.
    pub fn new_element(&self, values: Vec<Input>) -> Result<Element> {
        let mut values = values.into_iter();
        match (values.next(), values.next(), values.next()) {
            (None, _, _) => Ok(Element::nil()),
            (Some(Input::Element(e)), None, _) => Ok(e),
            (Some(Input::Type(t)), None, _) => Err(unknown_type(Some(t))),
            (Some(value), None, _) => {
                let t = value.inferred_type();
                match t {
                    Some(t) => self.build(t, value),
                    None => Err(unknown_type(t)),
                }
            }
            (Some(Input::Type(t)), Some(value), None) if !t.is_collection() =>
                self.build(t, value),
            _ => Err(Error::InvalidElement),
        }
    }
}

/// [Registry::new_element](Registry::new_element) on the default
/// registry.
pub fn new_element(values: Vec<Input>) -> Result<Element> {
    Registry::global().new_element(values)
}
