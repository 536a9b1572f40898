//! The canonical amount codec (C1): a signed fixed-point decimal scaled by 10^8.

use crate::error::{Error, ErrorKind};

const SCALE: i64 = 100_000_000;
/// The magnitude of `i64::MIN`, expressed as a `u128` since it has no positive `i64`
/// representation.
const MIN_MAGNITUDE: u128 = 1u128 << 63;

/// A signed fixed-point amount at 10^-8 precision, backed by a scaled `i64`.
///
/// The representable range equals that of a 64-bit signed integer: `format` is lossless
/// for every value, and `parse` accepts the full range (see [`Amount::parse`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    /// Scale factor between the integer representation and one whole unit.
    pub const SCALE: i64 = SCALE;

    /// Wraps an already-scaled integer value.
    pub fn from_scaled(value: i64) -> Self {
        Amount(value)
    }

    /// Returns the underlying scaled integer value.
    pub fn to_scaled(self) -> i64 {
        self.0
    }

    /// True iff the amount is strictly greater than zero, the validity precondition
    /// every secret and public claim code requires of its amount field.
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Parses a plain (unquoted) amount string.
    ///
    /// This is the strict, default entry point: any `"` character anywhere in `s` is an
    /// immediate [`ErrorKind::InvalidArgument`]. Use [`Amount::parse_permissive`] when a
    /// caller needs to tolerate legacy quoted input (the claim-code codec does, since the
    /// amount sub-field of a claim code is parsed by this component but may have been
    /// produced by a permissive writer).
    ///
    /// Returns the parsed amount and whether the input was *noncanonical* — syntactically
    /// valid but not equal to what [`Amount::format`] would produce for the same value
    /// (e.g. `"1.10000000"` parses to the same value as `"1.1"` but is flagged
    /// noncanonical). Noncanonical is a distinguishing flag, not an error.
    pub fn parse(s: &str) -> Result<(Self, bool), Error> {
        if s.contains('"') {
            return Err(ErrorKind::InvalidArgument.into());
        }
        parse_inner(s)
    }

    /// Parses an amount string that may be symmetrically wrapped in double quotes,
    /// flagging quoting as noncanonical rather than rejecting it. See
    /// [`Amount::parse`] for the strict counterpart.
    pub fn parse_permissive(s: &str) -> Result<(Self, bool), Error> {
        let quoted = s.starts_with('"') || s.ends_with('"');
        let inner = if quoted {
            if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
                &s[1..s.len() - 1]
            } else {
                // A lone/asymmetric quote.
                return Err(ErrorKind::InvalidArgument.into());
            }
        } else {
            s
        };
        let (amount, noncanonical) = parse_inner(inner)?;
        Ok((amount, noncanonical || quoted))
    }

    /// Formats this amount as its canonical decimal string.
    ///
    /// Emits `-` iff negative, the integer quotient by `10^8`, and (iff the remainder is
    /// nonzero) a `.` followed by up to eight fractional digits with trailing zeros
    /// stripped. `parse(format(a))` always returns `(a, false)`.
    pub fn format(self) -> String {
        let (negative, magnitude) = if self.0 < 0 {
            let magnitude = if self.0 == i64::MIN {
                MIN_MAGNITUDE
            } else {
                (-self.0) as u128
            };
            (true, magnitude)
        } else {
            (false, self.0 as u128)
        };

        let int_part = magnitude / (SCALE as u128);
        let frac_part = magnitude % (SCALE as u128);

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(&int_part.to_string());
        if frac_part != 0 {
            let frac_str = format!("{:08}", frac_part);
            let trimmed = frac_str.trim_end_matches('0');
            out.push('.');
            out.push_str(trimmed);
        }
        out
    }
}

/// Parses `inner` (sign plus digits plus optional fraction, no surrounding quotes) and
/// determines canonicality by comparing against what `format` would produce for the
/// parsed value. This single comparison naturally subsumes every individual
/// noncanonical rule spec'd for this component (leading zeros, a bare trailing `.`,
/// trailing zeros in the fraction, and negative zero), since all of them are exactly the
/// inputs for which the formatter would not reproduce the original string.
fn parse_inner(inner: &str) -> Result<(Amount, bool), Error> {
    if inner.is_empty() {
        return Err(ErrorKind::InvalidArgument.into());
    }

    let (negative, rest) = match inner.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, inner),
    };
    if rest.is_empty() {
        // A lone "-".
        return Err(ErrorKind::InvalidArgument.into());
    }

    let (int_str, frac_str) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    if int_str.is_empty() || !int_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ErrorKind::InvalidArgument.into());
    }
    let int_magnitude: u128 = int_str
        .parse()
        .map_err(|_| Error::from(ErrorKind::Overflow))?;

    let frac_magnitude: u128 = match frac_str {
        None => 0,
        Some(f) => {
            if !f.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ErrorKind::InvalidArgument.into());
            }
            if f.len() <= 8 {
                let padded = format!("{f:0<8}");
                padded.parse().expect("8 ascii digits fit in u128")
            } else {
                let (significant, extra) = f.split_at(8);
                if extra.bytes().any(|b| b != b'0') {
                    return Err(ErrorKind::InvalidArgument.into());
                }
                significant.parse().expect("8 ascii digits fit in u128")
            }
        }
    };

    let magnitude = int_magnitude
        .checked_mul(SCALE as u128)
        .and_then(|v| v.checked_add(frac_magnitude))
        .ok_or_else(|| Error::from(ErrorKind::Overflow))?;

    let bound = if negative {
        MIN_MAGNITUDE
    } else {
        i64::MAX as u128
    };
    if magnitude > bound {
        return Err(ErrorKind::Overflow.into());
    }

    let scaled = if negative {
        if magnitude == MIN_MAGNITUDE {
            i64::MIN
        } else {
            -(magnitude as i64)
        }
    } else {
        magnitude as i64
    };
    let amount = Amount(scaled);

    let noncanonical = amount.format() != inner;
    Ok((amount, noncanonical))
}
