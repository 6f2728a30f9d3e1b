// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Key/value pairs, the input for building maps.

use crate::error::{Error, Result};
use crate::registry::{new_element, Input};
use crate::value::Element;

#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    key: Element,
    value: Element,
}

impl Pair {
    pub fn new(key: Element, value: Element) -> Pair {
        Pair { key, value }
    }

    /// Build both sides with [new_element](../registry/fn.new_element.html);
    /// a missing side is an `InvalidPair`.
    pub fn from_inputs(key: Option<Input>, value: Option<Input>) -> Result<Pair> {
        match (key, value) {
            (Some(key), Some(value)) => Ok(Pair {
                key: new_element(vec![key])?,
                value: new_element(vec![value])?,
            }),
            _ => Err(Error::InvalidPair),
        }
    }

    pub fn key(&self) -> &Element {
        &self.key
    }

    pub fn value(&self) -> &Element {
        &self.value
    }

    pub fn into_parts(self) -> (Element, Element) {
        (self.key, self.value)
    }
}

/// An append-only list of pairs.
#[derive(Debug, Clone, Default)]
pub struct Pairs {
    data: Vec<Pair>,
}

impl Pairs {
    pub fn new() -> Pairs {
        Pairs::default()
    }

    pub fn append(&mut self, key: Element, value: Element) {
        self.data.push(Pair::new(key, value))
    }

    pub fn raw(&self) -> &[Pair] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<Pair> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
