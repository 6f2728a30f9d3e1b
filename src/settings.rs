// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Settings for writing (serializing) collections.

#[derive(Debug, PartialEq, Eq)]
pub struct Format {
    /// Between the items of groupings, vectors and sets.
    pub sequence_separator: &'static str,
    /// Between the entries of maps.
    pub map_entry_separator: &'static str,
    /// Between a map key and its value.
    pub map_key_value_separator: &'static str,
}

/// `{:a 1, :b 2}`
pub const EDN_FORMAT : Format = Format {
    sequence_separator: " ",
    map_entry_separator: ", ",
    map_key_value_separator: " ",
};

/// `{:a 1 :b 2}`
pub const COMPACT_FORMAT : Format = Format {
    sequence_separator: " ",
    map_entry_separator: " ",
    map_key_value_separator: " ",
};
