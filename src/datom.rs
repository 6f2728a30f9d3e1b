// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A datom is an atomic fact: entity, attribute, value, transaction
//! and whether the fact was added or retracted. It is written as
//! `#datom [17592186045422 63 "The Goonies" 13194139534317 true]`.

use crate::collection::new_vector;
use crate::error::Result;
use crate::registry::{new_element, Input};
use crate::value::{Builder, Element, Serializer};

pub const DATOM_TAG: &str = "datom";

/// A transaction timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct T(pub i64);

#[derive(Debug, Clone)]
pub struct Datom {
    entity_id: i64,
    attribute_id: i64,
    value: Input,
    transaction: T,
    added: bool,
}

impl Datom {
    /// The value is only turned into an element when the datom is
    /// built, so an unsupported value shows up as an error there.
    pub fn new(
        entity_id: i64,
        attribute_id: i64,
        value: impl Into<Input>,
        transaction: T,
        added: bool,
    ) -> Datom {
        Datom {
            entity_id,
            attribute_id,
            value: value.into(),
            transaction,
            added,
        }
    }

    pub fn entity_id(&self) -> i64 { self.entity_id }
    pub fn attribute_id(&self) -> i64 { self.attribute_id }
    pub fn value(&self) -> &Input { &self.value }
    pub fn transaction(&self) -> T { self.transaction }
    pub fn added(&self) -> bool { self.added }
}

impl Builder for Datom {
    fn build(&self) -> Result<Element> {
        let value = new_element(vec![self.value.clone()])?;
        new_vector(vec![
            Element::integer(self.entity_id),
            Element::integer(self.attribute_id),
            value,
            Element::integer(self.transaction.0),
            Element::boolean(self.added),
        ]).with_tag(DATOM_TAG)
    }
}

impl Serializer for Datom {
    fn serialize(&self) -> Result<String> {
        self.build()?.serialize()
    }
}
