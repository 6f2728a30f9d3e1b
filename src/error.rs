// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors for building and serializing elements.
//!
//! Besides the fixed kinds, there are three shapes of free-form
//! errors: a plain message, a message template formatted only when
//! displayed ([FormatError](FormatError)), and an accumulation of
//! several errors ([CumulativeError](CumulativeError)), see
//! [append_error](append_error).

use kstring::KString;
use std::fmt::{Debug, Display, Formatter, Write};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("Invalid Element")]
    InvalidElement,
    #[error("Invalid input")]
    InvalidInput,
    #[error("Invalid factory")]
    InvalidFactory,
    #[error("Invalid Symbol")]
    InvalidSymbol,
    #[error("Invalid keyword")]
    InvalidKeyword,
    #[error("Invalid pair")]
    InvalidPair,
    #[error("Duplicate key found")]
    DuplicateKey,
    #[error("No value found")]
    NoValue,
    #[error("{0}")]
    Message(KString),
    #[error("{0}")]
    Format(FormatError),
    #[error("{0}")]
    Cumulative(CumulativeError),
    #[error("formatting failed")]
    Fmt(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// An argument captured by a [FormatError](FormatError).
pub type FormatArg = Arc<dyn Display + Send + Sync>;

/// Capture a value for a [FormatError](FormatError).
pub fn arg(value: impl Display + Send + Sync + 'static) -> FormatArg {
    Arc::new(value)
}

/// A message template whose `{}` placeholders are only filled in when
/// the error is displayed. Surplus placeholders are left as they are,
/// surplus arguments are ignored.
#[derive(Clone)]
pub struct FormatError {
    message: KString,
    items: Vec<FormatArg>,
}

impl FormatError {
    pub fn new(message: &str, items: Vec<FormatArg>) -> FormatError {
        FormatError { message: KString::from_ref(message), items }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut items = self.items.iter();
        let mut rest: &str = &self.message;
        while let Some(i) = rest.find("{}") {
            f.write_str(&rest[..i])?;
            match items.next() {
                Some(item) => Display::fmt(item, f)?,
                None => f.write_str("{}")?,
            }
            rest = &rest[i + 2..];
        }
        f.write_str(rest)
    }
}

impl Debug for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatError")
            .field("message", &self.message)
            .field("items", &self.items.len())
            .finish()
    }
}

/// A flat list of errors.
#[derive(Debug, Clone, Default)]
pub struct CumulativeError {
    items: Vec<Error>,
}

impl CumulativeError {
    pub fn new() -> CumulativeError {
        CumulativeError::default()
    }

    /// Appends the errors, splicing in the contents of any cumulative
    /// error instead of nesting it.
    pub fn append(&mut self, errors: impl IntoIterator<Item = Error>) {
        for e in errors {
            match e {
                Error::Cumulative(c) => self.append(c.items),
                e => self.items.push(e),
            }
        }
    }

    pub fn errors(&self) -> &[Error] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Display for CumulativeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, part) in self.items.iter().enumerate() {
            f.write_fmt(format_args!("{}: {}", index, part))?;
            f.write_char('\n')?;
        }
        Ok(())
    }
}

/// A plain message if there are no `contents`, otherwise a
/// [FormatError](FormatError) over them.
pub fn new_error(message: &str, contents: Vec<FormatArg>) -> Error {
    if contents.is_empty() {
        Error::Message(KString::from_ref(message))
    } else {
        Error::Format(FormatError::new(message, contents))
    }
}

/// Collapse the given errors: `None` if there are none, the error
/// itself if there is exactly one, a flattened
/// [CumulativeError](CumulativeError) otherwise.
pub fn append_error(errors: impl IntoIterator<Item = Option<Error>>) -> Option<Error> {
    let mut present: Vec<Error> = errors.into_iter().flatten().collect();
    match present.len() {
        0 => None,
        1 => present.pop(),
        _ => {
            let mut cumulative = CumulativeError::new();
            cumulative.append(present);
            Some(Error::Cumulative(cumulative))
        }
    }
}
