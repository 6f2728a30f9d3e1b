// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! An in-memory element model for EDN (extensible data notation) and
//! a serializer producing its text, with the following goals:
//!
//! * Build elements bottom-up: scalars via the constructors on
//!   `value::Element` or by type inference from host values with
//!   `registry::new_element`, collections via the functions in
//!   `collection`, then optionally attach a tag.
//!
//! * Exact output: every element kind renders to one fixed textual
//!   form, so that generated text can be compared verbatim.
//!
//! * Errors are values: constructing, tagging, looking up and
//!   serializing return `error::Result`, and several independent
//!   failures can be collected into one `error::CumulativeError`.
//!
//! * On top of that, the `datom` and `schema` modules write database
//!   facts and schema definitions in the Datomic dialect.
//!
//! There is no reader; this is write-only.

pub mod collection;
pub mod datom;
pub mod error;
pub mod number;
pub mod pair;
pub mod registry;
pub mod schema;
pub mod settings;
pub mod symbol;
pub mod types;
pub mod value;
pub mod write;
