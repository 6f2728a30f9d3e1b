// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Writing sequences of top-level elements, separated by blank lines.

use crate::error::Error;
use crate::settings::EDN_FORMAT;
use crate::value::Element;
use std::fs::File;
use std::io::{ErrorKind, Write};
use std::path::Path;

fn invalid_data(e: Error) -> std::io::Error {
    std::io::Error::new(ErrorKind::InvalidData, e)
}

pub fn write_all<'t>(
    out: impl Write,
    elements: impl IntoIterator<Item = &'t Element>
) -> Result<(), std::io::Error> {
    let mut out = out; // for `File`
    let mut seen_item = false;
    for e in elements.into_iter() {
        let text = e.serialize().map_err(invalid_data)?;
        write!(out, "{}{}\n", if seen_item {"\n"} else {""}, text)?;
        seen_item = true;
    }
    out.flush()
}

pub fn write_file<'t>(path: &Path, elements: impl IntoIterator<Item = &'t Element>)
                      -> Result<(), std::io::Error> {
    write_all(File::create(path)?, elements)
}

/// Like [write_all](write_all), into a string.
pub fn to_string<'t>(elements: impl IntoIterator<Item = &'t Element>)
                     -> Result<String, Error> {
    let mut out = String::new();
    let mut seen_item = false;
    for e in elements.into_iter() {
        if seen_item {
            out.push('\n');
        }
        e.write_to(&mut out, &EDN_FORMAT)?;
        out.push('\n');
        seen_item = true;
    }
    Ok(out)
}
