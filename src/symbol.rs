// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The lexical grammar of symbols and keywords.
//!
//! Symbols begin with a non-numeric character and can contain
//! alphanumeric characters and `. * + ! - _ ? $ % & = < >`. If `-`,
//! `+` or `.` are the first character, the second character (if any)
//! must be non-numeric. Additionally, `:` and `#` are allowed as
//! constituent characters in symbols other than as the first
//! character. `/` separates the prefix (namespace) from the name and
//! may appear at most once, except that `/` on its own is a symbol.
//!
//! Keywords follow the rules of symbols, but are written with a
//! leading `:`. `:/` and `:/anything` are not legal keywords, nor is
//! anything starting with `::`.

use crate::error::{Error, Result};
use kstring::KString;
use lazy_static::lazy_static;
use regex::Regex;

/// Separates the prefix from the name.
pub const SYMBOL_SEPARATOR: &str = "/";

/// Separates the segments of a hierarchical namespace (not to be
/// confused with `SYMBOL_SEPARATOR`).
pub const NAMESPACE_SEPARATOR: &str = ".";

pub const KEYWORD_PREFIX: &str = ":";

pub const TAG_PREFIX: &str = "#";

// Characters that can modify a numeric.
const NUMERIC_MODIFIERS: &str = r"\.|\+|-";

// Characters, other than alphanumerics and numeric modifiers, that
// can start a symbol.
const LEGAL_FIRST: &str = r"\*|!|_|\?|\$|%|&|=|<|>";

// Only allowed after the first character.
const SPECIAL: &str = ":|#";

lazy_static! {
    static ref SYMBOL_REGEX: Regex = {
        let pattern = format!(
            "^(({nm})|(((({nm})({lf}|[[:alpha:]]))|({lf}|[[:alpha:]]))+({nm}|{lf}|{sp}|[[:alnum:]])*))$",
            nm = NUMERIC_MODIFIERS,
            lf = LEGAL_FIRST,
            sp = SPECIAL);
        Regex::new(&pattern).expect("symbol grammar is a valid regex")
    };
}

/// Whether `s` is a valid prefix or name (without any `/`).
pub fn is_symbol_part(s: &str) -> bool {
    SYMBOL_REGEX.is_match(s)
}

/// A validated (prefix, name) pair, shared by symbols and keywords.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    prefix: Option<KString>,
    name: KString,
}

impl Symbol {
    /// Parse a symbol from one part ("name" or "prefix/name") or two
    /// parts (prefix, name).
    pub fn parse(parts: &[&str]) -> Result<Symbol> {
        match parts {
            [whole] => {
                let whole = *whole;
                if whole == SYMBOL_SEPARATOR {
                    Ok(Symbol::unchecked(None, whole))
                } else if whole.contains(SYMBOL_SEPARATOR) {
                    let mut pieces = whole.split(SYMBOL_SEPARATOR);
                    match (pieces.next(), pieces.next(), pieces.next()) {
                        (Some(prefix), Some(name), None) =>
                            Symbol::parse_prefixed(prefix, name),
                        _ => Err(Error::InvalidSymbol),
                    }
                } else if is_symbol_part(whole) {
                    Ok(Symbol::unchecked(None, whole))
                } else {
                    Err(Error::InvalidSymbol)
                }
            }
            [prefix, name] => Symbol::parse_prefixed(prefix, name),
            _ => Err(Error::InvalidSymbol),
        }
    }

    fn parse_prefixed(prefix: &str, name: &str) -> Result<Symbol> {
        // (empty strings never match the grammar)
        if is_symbol_part(prefix) && is_symbol_part(name) {
            Ok(Symbol::unchecked(Some(prefix), name))
        } else {
            Err(Error::InvalidSymbol)
        }
    }

    /// Parse a keyword, with or without its leading `:`. The result
    /// does not keep the colon.
    pub fn parse_keyword(parts: &[&str]) -> Result<Symbol> {
        let (first, rest) = parts.split_first().ok_or(Error::InvalidKeyword)?;
        let first: &str = first;
        let first = first.strip_prefix(KEYWORD_PREFIX).unwrap_or(first);
        if first.starts_with(SYMBOL_SEPARATOR) {
            return Err(Error::InvalidKeyword)
        }
        let mut stripped: Vec<&str> = Vec::with_capacity(parts.len());
        stripped.push(first);
        stripped.extend_from_slice(rest);
        Symbol::parse(&stripped).map_err(|e| match e {
            Error::InvalidSymbol => Error::InvalidKeyword,
            e => e,
        })
    }

    fn unchecked(prefix: Option<&str>, name: &str) -> Symbol {
        Symbol {
            prefix: prefix.map(KString::from_ref),
            name: KString::from_ref(name),
        }
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> std::result::Result<(), std::fmt::Error> {
        if let Some(prefix) = &self.prefix {
            f.write_str(prefix)?;
            f.write_str(SYMBOL_SEPARATOR)?;
        }
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grammar_parts() {
        for s in ["a", "good1", ".", "+", "-", "*", ">1good", "+good",
                  ".good", "fine:good", "fine#good", "a.b.c", "<=>"] {
            assert!(is_symbol_part(s), "{s:?} should match");
        }
        for s in ["", "1", "1bad", ":bad", "#bad", "+1bad", ".1", "++",
                  "a b", "é", "a/b"] {
            assert!(!is_symbol_part(s), "{s:?} should not match");
        }
    }

    #[test]
    fn split_on_separator() {
        let s = Symbol::parse(&["namespace/foobar"]).unwrap();
        assert_eq!(s.prefix(), Some("namespace"));
        assert_eq!(s.name(), "foobar");
        assert_eq!(s, Symbol::parse(&["namespace", "foobar"]).unwrap());
        assert_eq!(s.to_string(), "namespace/foobar");
    }

    #[test]
    fn lone_separator() {
        let s = Symbol::parse(&["/"]).unwrap();
        assert_eq!(s.prefix(), None);
        assert_eq!(s.name(), "/");
        assert!(Symbol::parse_keyword(&["/"]).is_err());
    }

    #[test]
    fn part_counts() {
        assert!(matches!(Symbol::parse(&[]), Err(Error::InvalidSymbol)));
        assert!(matches!(Symbol::parse(&["a", "b", "c"]), Err(Error::InvalidSymbol)));
        assert!(matches!(Symbol::parse(&["", "b"]), Err(Error::InvalidSymbol)));
        assert!(matches!(Symbol::parse_keyword(&[]), Err(Error::InvalidKeyword)));
    }

    #[test]
    fn keyword_strips_one_colon() {
        let k = Symbol::parse_keyword(&[":db.part/db"]).unwrap();
        assert_eq!(k.prefix(), Some("db.part"));
        assert_eq!(k.name(), "db");
        let k = Symbol::parse_keyword(&[":namespace", "foobar"]).unwrap();
        assert_eq!(k.prefix(), Some("namespace"));
        assert!(matches!(Symbol::parse_keyword(&["::a"]), Err(Error::InvalidKeyword)));
        assert!(matches!(Symbol::parse_keyword(&[":/a"]), Err(Error::InvalidKeyword)));
    }
}
