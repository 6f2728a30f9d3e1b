// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    // Arbitrary precision (bigint, bigdec) is not supported.
    Float(f64),
}

/// Scientific notation with the shortest mantissa that reads back as
/// the same `f64`, an uppercase `E` and a signed exponent of at least
/// two digits: `1.234567E+04`, `1E+00`, `-5E-324`.
///
/// EDN has no literal for the non-finite values other than its
/// symbolic values, which are used instead: `##NaN`, `##Inf`,
/// `##-Inf`.
pub fn write_float(f: &mut impl Write, x: f64) -> std::fmt::Result {
    if x.is_nan() {
        return f.write_str("##NaN")
    }
    if x.is_infinite() {
        return f.write_str(if x > 0. { "##Inf" } else { "##-Inf" })
    }
    // `{:E}` is already shortest round-trip, but writes `1.5E3`
    let s = format!("{:E}", x);
    let (mantissa, exponent) = s.split_once('E').unwrap_or((s.as_str(), "0"));
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    f.write_str(mantissa)?;
    f.write_char('E')?;
    f.write_char(sign)?;
    if digits.len() < 2 {
        f.write_char('0')?;
    }
    f.write_str(digits)
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self {
            Number::Integer(n) => f.write_fmt(format_args!("{}", n)),
            Number::Float(x) => write_float(f, *x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float(x: f64) -> String {
        Number::Float(x).to_string()
    }

    #[test]
    fn floats() {
        assert_eq!(float(12345.67), "1.234567E+04");
        assert_eq!(float(1.0), "1E+00");
        assert_eq!(float(0.0), "0E+00");
        assert_eq!(float(-0.0), "-0E+00");
        assert_eq!(float(-2.5e-7), "-2.5E-07");
        assert_eq!(float(1e100), "1E+100");
        assert_eq!(float(0.1), "1E-01");
        assert_eq!(float(f64::MAX), "1.7976931348623157E+308");
    }

    #[test]
    fn non_finite_floats() {
        assert_eq!(float(f64::NAN), "##NaN");
        assert_eq!(float(f64::INFINITY), "##Inf");
        assert_eq!(float(f64::NEG_INFINITY), "##-Inf");
    }

    #[test]
    fn integers() {
        assert_eq!(Number::Integer(12345).to_string(), "12345");
        assert_eq!(Number::Integer(-7).to_string(), "-7");
        assert_eq!(Number::Integer(i64::MIN).to_string(), "-9223372036854775808");
    }
}
