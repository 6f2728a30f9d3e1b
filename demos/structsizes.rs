// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Not an example, but a program to show the struct sizes for
//! possible optimization.

use edn_elements::{collection::{Collection, CollectionKind, Key, Map, Sequence}, datom::Datom, error::{CumulativeError, Error, FormatError}, number::Number, pair::Pair, registry::{Input, Registry}, schema::Attribute, settings::Format, symbol::Symbol, types::ElementType, value::{Atom, Element, Value}};
use chrono::{DateTime, FixedOffset};
use kstring::KString;
use uuid::Uuid;

fn pr(ctx: &str, nam: &str, siz: usize) {
    println!("{siz}\t{ctx}\t{nam}")
}

const FQTY : bool = false;

macro_rules! ctx {
    ( $ctx:expr ) => {
        macro_rules! p {
            ( $t:ty ) => {
                let typename =
                    if FQTY {
                        std::any::type_name::<$t>()
                    } else {
                        stringify!($t)
                    };
                pr($ctx, typename, std::mem::size_of::<$t>())
            }
        }
    }
}

fn main() {
    {
        ctx!("settings");
        p!{Format};
        p!{ElementType};
    }

    {
        ctx!("value");
        p!{KString};
        p!{Number};
        p!{DateTime<FixedOffset>};
        p!{Uuid};
        p!{Symbol};
        p!{Atom};
        p!{Value};
        p!{Element};
        p!{Option<KString>};
    }

    {
        ctx!("collection");
        p!{CollectionKind};
        p!{Key<'static>};
        p!{Sequence};
        p!{Map};
        p!{Collection};
        p!{Pair};
    }

    {
        ctx!("error");
        p!{Error};
        p!{FormatError};
        p!{CumulativeError};
        p!{Result<Element, Error>};
        p!{Result<&'static Element, Error>};
        p!{Result<String, Error>};
    }

    {
        ctx!("registry");
        p!{Input};
        p!{Registry};
        p!{Datom};
        p!{Attribute};
    }
}
