// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! Runtime printf-style template rendering.
//!
//! Templates follow the usual `printf` conventions:
//!
//! ```text
//! %[index$|<][flags][width][.precision]conversion
//! ```
//!
//! | Conversion | Accepts                  | Output                                     |
//! |------------|--------------------------|--------------------------------------------|
//! | `s` `S`    | anything                 | `Display` rendering (`S` upper-cases it)   |
//! | `d`        | integers                 | decimal                                    |
//! | `x` `X`    | integers                 | hexadecimal (two's complement, source width) |
//! | `o`        | integers                 | octal (two's complement, source width)       |
//! | `f`        | floats                   | fixed point, precision defaults to 6       |
//! | `e` `E`    | floats                   | scientific, `1.500000e+02`                 |
//! | `c`        | chars, integer codepoints| the character                              |
//! | `b` `B`    | anything                 | the boolean, `true` for non-booleans       |
//! | `%`        | nothing                  | a literal `%`                              |
//! | `n`        | nothing                  | a newline                                  |
//!
//! Flags are `-` (left justify), `0` (zero pad), `+` and space (sign), and `#`
//! (`0x`/`0` prefix for `x`/`o`). `2$` selects the second argument without moving
//! the ordinary argument cursor, `<` reuses the previous argument. Unused
//! arguments are ignored.
//!
//! Argument conversion is guarded: a `Display` or `Debug` implementation that
//! returns [`fmt::Error`] or panics surfaces as [`FormatError::Argument`] instead
//! of unwinding into the caller.

use core::any::Any;
use core::fmt::{self, Write as _};
use std::panic::{self, AssertUnwindSafe};

/// A single template argument.
///
/// Integers, floats, `char`, `bool` and strings convert with [`From`]; anything
/// else implementing [`Display`](fmt::Display) or [`Debug`](fmt::Debug) can be
/// wrapped with [`Arg::display`] or [`Arg::debug`].
#[derive(Clone, Copy)]
pub enum Arg<'a> {
    /// A signed integer and the bit width of its source type.
    Signed(i64, u32),
    /// An unsigned integer and the bit width of its source type.
    Unsigned(u64, u32),
    Float(f64),
    Char(char),
    Bool(bool),
    Str(&'a str),
    Display {
        value: &'a dyn fmt::Display,
        type_name: &'static str,
    },
    Debug {
        value: &'a dyn fmt::Debug,
        type_name: &'static str,
    },
}

impl<'a> Arg<'a> {
    /// Wraps a value rendered through its `Display` implementation.
    pub fn display<T: fmt::Display>(value: &'a T) -> Self {
        Arg::Display {
            value,
            type_name: core::any::type_name::<T>(),
        }
    }

    /// Wraps a value rendered through its `Debug` implementation.
    pub fn debug<T: fmt::Debug>(value: &'a T) -> Self {
        Arg::Debug {
            value,
            type_name: core::any::type_name::<T>(),
        }
    }

    /// Name of the argument's type, as reported in conversion errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Arg::Signed(_, bits) => match bits {
                8 => "i8",
                16 => "i16",
                32 => "i32",
                _ => "i64",
            },
            Arg::Unsigned(_, bits) => match bits {
                8 => "u8",
                16 => "u16",
                32 => "u32",
                _ => "u64",
            },
            Arg::Float(_) => "f64",
            Arg::Char(_) => "char",
            Arg::Bool(_) => "bool",
            Arg::Str(_) => "&str",
            Arg::Display { type_name, .. } | Arg::Debug { type_name, .. } => *type_name,
        }
    }

    /// Plain `%s` rendering of the argument.
    ///
    /// # Errors
    ///
    /// Fails when a wrapped `Display`/`Debug` implementation reports an error or
    /// panics.
    pub fn to_text(&self) -> Result<String, ArgFailure> {
        match *self {
            Arg::Signed(v, _) => Ok(v.to_string()),
            Arg::Unsigned(v, _) => Ok(v.to_string()),
            // `Debug` keeps the fraction of whole numbers: `1.0`, not `1`
            Arg::Float(v) => Ok(format!("{v:?}")),
            Arg::Char(c) => Ok(c.to_string()),
            Arg::Bool(b) => Ok(b.to_string()),
            Arg::Str(s) => Ok(s.to_owned()),
            Arg::Display { value, .. } => guarded(|buf| write!(buf, "{value}")),
            Arg::Debug { value, .. } => guarded(|buf| write!(buf, "{value:?}")),
        }
    }
}

impl fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Signed(v, bits) => f.debug_tuple("Signed").field(v).field(bits).finish(),
            Arg::Unsigned(v, bits) => f.debug_tuple("Unsigned").field(v).field(bits).finish(),
            Arg::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Arg::Char(v) => f.debug_tuple("Char").field(v).finish(),
            Arg::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Arg::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Arg::Display { type_name, .. } => f.debug_tuple("Display").field(type_name).finish(),
            Arg::Debug { type_name, .. } => f.debug_tuple("Debug").field(type_name).finish(),
        }
    }
}

macro_rules! impl_from_integer {
    ($variant:ident, $wide:ty: $($t:ty),+) => {
        $(
            impl From<$t> for Arg<'_> {
                fn from(v: $t) -> Self {
                    Arg::$variant(<$wide>::from(v), <$t>::BITS)
                }
            }

            impl From<&$t> for Arg<'_> {
                fn from(v: &$t) -> Self {
                    Arg::from(*v)
                }
            }
        )+
    };
}

impl_from_integer!(Signed, i64: i8, i16, i32, i64);
impl_from_integer!(Unsigned, u64: u8, u16, u32, u64);

macro_rules! impl_from_float {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Arg<'_> {
                fn from(v: $t) -> Self {
                    Arg::Float(f64::from(v))
                }
            }

            impl From<&$t> for Arg<'_> {
                fn from(v: &$t) -> Self {
                    Arg::Float(f64::from(*v))
                }
            }
        )+
    };
}

impl_from_float!(f32, f64);

impl From<isize> for Arg<'_> {
    fn from(v: isize) -> Self {
        // isize is at most 64 bits on every supported target
        Arg::Signed(v as i64, isize::BITS)
    }
}

impl From<usize> for Arg<'_> {
    fn from(v: usize) -> Self {
        Arg::Unsigned(v as u64, usize::BITS)
    }
}

impl From<&isize> for Arg<'_> {
    fn from(v: &isize) -> Self {
        Arg::from(*v)
    }
}

impl From<&usize> for Arg<'_> {
    fn from(v: &usize) -> Self {
        Arg::from(*v)
    }
}

impl From<char> for Arg<'_> {
    fn from(v: char) -> Self {
        Arg::Char(v)
    }
}

impl From<&char> for Arg<'_> {
    fn from(v: &char) -> Self {
        Arg::Char(*v)
    }
}

impl From<bool> for Arg<'_> {
    fn from(v: bool) -> Self {
        Arg::Bool(v)
    }
}

impl From<&bool> for Arg<'_> {
    fn from(v: &bool) -> Self {
        Arg::Bool(*v)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(v: &'a str) -> Self {
        Arg::Str(v)
    }
}

impl<'a, 'b> From<&'a &'b str> for Arg<'a> {
    fn from(v: &'a &'b str) -> Self {
        Arg::Str(v)
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    fn from(v: &'a String) -> Self {
        Arg::Str(v.as_str())
    }
}

/// Why an argument's string conversion failed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgFailure {
    /// The formatting trait implementation returned [`fmt::Error`].
    #[error("an error occurred when formatting an argument")]
    Error,
    /// The formatting trait implementation panicked with a message.
    #[error("panicked: {0}")]
    Panic(String),
    /// The formatting trait implementation panicked with a non-string payload.
    #[error("???")]
    OpaquePanic,
}

/// Why a template could not be rendered.
#[non_exhaustive]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("unknown conversion '{0}'")]
    UnknownConversion(char),
    #[error("template ends inside a format specifier")]
    Incomplete,
    #[error("missing argument for format specifier '{specifier}'")]
    MissingArgument { specifier: String },
    #[error("invalid argument index in format specifier '{specifier}'")]
    BadIndex { specifier: String },
    #[error("numeric field too large in format specifier '{specifier}'")]
    Overflow { specifier: String },
    #[error("conversion '{conversion}' cannot format a value of type {arg_type}")]
    IllegalConversion {
        conversion: char,
        arg_type: &'static str,
    },
    #[error("flag '{flag}' is not applicable to conversion '{conversion}'")]
    FlagMismatch { flag: char, conversion: char },
    #[error("format specifier '{specifier}' needs a width")]
    MissingWidth { specifier: String },
    #[error("width is not applicable to conversion '{conversion}'")]
    IllegalWidth { conversion: char },
    #[error("precision is not applicable to conversion '{conversion}'")]
    IllegalPrecision { conversion: char },
    #[error("invalid code point {0}")]
    InvalidCodePoint(i128),
    /// Argument `index` (1-based) failed its string conversion.
    #[error("argument {index}: {failure}")]
    Argument { index: usize, failure: ArgFailure },
}

/// Renders `template` with `args`.
///
/// # Errors
///
/// Returns a [`FormatError`] describing the first problem found in the template
/// or in an argument conversion. Nothing is partially returned.
pub fn format(template: &str, args: &[Arg<'_>]) -> Result<String, FormatError> {
    let pieces = parse_template(template)?;

    let mut out = String::with_capacity(template.len() + 8 * args.len());
    let mut next = 0;
    let mut previous: Option<usize> = None;

    for piece in &pieces {
        let spec = match piece {
            Piece::Text(text) => {
                out.push_str(text);
                continue;
            }
            Piece::Spec(spec) => spec,
        };
        match spec.conversion {
            '%' => pad(&mut out, "%", spec.width, spec.flags.left),
            'n' => out.push('\n'),
            _ => {
                let index = match spec.index {
                    Index::Ordinary => {
                        next += 1;
                        next - 1
                    }
                    Index::Explicit(0) => return Err(spec.bad_index()),
                    Index::Explicit(n) => n - 1,
                    Index::Previous => previous.ok_or_else(|| spec.bad_index())?,
                };
                let arg = args.get(index).ok_or_else(|| FormatError::MissingArgument {
                    specifier: spec.text.to_owned(),
                })?;
                previous = Some(index);
                spec.render(arg, index + 1, &mut out)?;
            }
        }
    }

    Ok(out)
}

enum Piece<'t> {
    Text(&'t str),
    Spec(Spec<'t>),
}

/// Splits `template` into literal text and validated specifiers, so template
/// errors are reported before any argument is converted.
fn parse_template(template: &str) -> Result<Vec<Piece<'_>>, FormatError> {
    let mut pieces = Vec::new();
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        if pos > 0 {
            pieces.push(Piece::Text(&rest[..pos]));
        }
        let spec = Spec::parse(&rest[pos..])?;
        rest = &rest[pos + spec.text.len()..];
        pieces.push(Piece::Spec(spec));
    }
    if !rest.is_empty() {
        pieces.push(Piece::Text(rest));
    }
    Ok(pieces)
}

/// Renders `args` as a comma-separated list, for diagnostics.
///
/// Each argument is rendered as with `%s`. An argument whose conversion fails is
/// rendered as `fmt():<failure>`.
pub fn render_args(args: &[Arg<'_>]) -> String {
    args.iter()
        .map(|arg| match arg.to_text() {
            Ok(text) => text,
            Err(failure) => format!("fmt():{failure}"),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn guarded(
    write: impl FnOnce(&mut String) -> fmt::Result,
) -> Result<String, ArgFailure> {
    let mut buf = String::new();
    match panic::catch_unwind(AssertUnwindSafe(|| write(&mut buf))) {
        Ok(Ok(())) => Ok(buf),
        Ok(Err(fmt::Error)) => Err(ArgFailure::Error),
        Err(payload) => Err(panic_failure(payload.as_ref())),
    }
}

fn panic_failure(payload: &(dyn Any + Send)) -> ArgFailure {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        ArgFailure::Panic((*msg).to_owned())
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        ArgFailure::Panic(msg.clone())
    } else {
        ArgFailure::OpaquePanic
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Index {
    Ordinary,
    Explicit(usize),
    Previous,
}

#[derive(Debug, Default, Clone, Copy)]
struct Flags {
    left: bool,
    zero: bool,
    plus: bool,
    space: bool,
    alternate: bool,
}

impl Flags {
    /// The first flag set, in the order they are checked.
    fn first(&self) -> Option<char> {
        [
            (self.left, '-'),
            (self.alternate, '#'),
            (self.plus, '+'),
            (self.space, ' '),
            (self.zero, '0'),
        ]
        .into_iter()
        .find_map(|(set, flag)| set.then_some(flag))
    }
}

#[derive(Debug)]
struct Spec<'t> {
    /// The specifier as written, `%` and conversion included.
    text: &'t str,
    index: Index,
    flags: Flags,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: char,
}

impl<'t> Spec<'t> {
    /// Parses the specifier at the start of `s`, which begins with `%`.
    fn parse(s: &'t str) -> Result<Self, FormatError> {
        let bytes = s.as_bytes();
        let mut i = 1;

        let mut index = Index::Ordinary;
        if bytes.get(i) == Some(&b'<') {
            index = Index::Previous;
            i += 1;
        } else {
            let digits = count_digits(&bytes[i..]);
            if digits > 0 && bytes.get(i + digits) == Some(&b'$') {
                index = Index::Explicit(number(s, i, digits)?);
                i += digits + 1;
            }
        }

        let mut flags = Flags::default();
        while let Some(b) = bytes.get(i) {
            match b {
                b'-' => flags.left = true,
                b'0' => flags.zero = true,
                b'+' => flags.plus = true,
                b' ' => flags.space = true,
                b'#' => flags.alternate = true,
                _ => break,
            }
            i += 1;
        }

        let digits = count_digits(&bytes[i..]);
        let width = if digits > 0 {
            Some(number(s, i, digits)?)
        } else {
            None
        };
        i += digits;

        let mut precision = None;
        if bytes.get(i) == Some(&b'.') {
            i += 1;
            let digits = count_digits(&bytes[i..]);
            if digits == 0 {
                return Err(if i == bytes.len() {
                    FormatError::Incomplete
                } else {
                    FormatError::UnknownConversion('.')
                });
            }
            precision = Some(number(s, i, digits)?);
            i += digits;
        }

        let conversion = s[i..].chars().next().ok_or(FormatError::Incomplete)?;
        i += conversion.len_utf8();

        let spec = Spec {
            text: &s[..i],
            index,
            flags,
            width,
            precision,
            conversion,
        };
        spec.validate()?;
        Ok(spec)
    }

    fn validate(&self) -> Result<(), FormatError> {
        let c = self.conversion;
        let (numeric, signed, radix) = match c {
            's' | 'S' | 'c' | 'b' | 'B' | '%' | 'n' => (false, false, false),
            'd' | 'f' | 'e' | 'E' => (true, true, false),
            'x' | 'X' | 'o' => (true, false, true),
            other => return Err(FormatError::UnknownConversion(other)),
        };

        let mismatch = |flag| Err(FormatError::FlagMismatch { flag, conversion: c });
        if c == 'n' {
            if self.width.is_some() {
                return Err(FormatError::IllegalWidth { conversion: c });
            }
            if let Some(flag) = self.flags.first() {
                return mismatch(flag);
            }
        }
        if (self.flags.left || self.flags.zero) && self.width.is_none() {
            return Err(FormatError::MissingWidth {
                specifier: self.text.to_owned(),
            });
        }
        if self.flags.zero && (!numeric || self.flags.left) {
            return mismatch('0');
        }
        if self.flags.plus && !signed {
            return mismatch('+');
        }
        if self.flags.space && (!signed || self.flags.plus) {
            return mismatch(' ');
        }
        if self.flags.alternate && !radix {
            return mismatch('#');
        }
        if self.precision.is_some() && matches!(c, 'd' | 'x' | 'X' | 'o' | 'c' | '%' | 'n') {
            return Err(FormatError::IllegalPrecision { conversion: c });
        }
        Ok(())
    }

    fn bad_index(&self) -> FormatError {
        FormatError::BadIndex {
            specifier: self.text.to_owned(),
        }
    }

    fn illegal(&self, arg: &Arg<'_>) -> FormatError {
        FormatError::IllegalConversion {
            conversion: self.conversion,
            arg_type: arg.type_name(),
        }
    }

    /// Renders `arg` (1-based `position`) into `out`.
    fn render(&self, arg: &Arg<'_>, position: usize, out: &mut String) -> Result<(), FormatError> {
        match self.conversion {
            's' | 'S' => {
                let text = arg.to_text().map_err(|failure| FormatError::Argument {
                    index: position,
                    failure,
                })?;
                self.pad_text(out, &text);
            }
            'b' | 'B' => {
                let text = match arg {
                    Arg::Bool(b) => b.to_string(),
                    _ => "true".to_owned(),
                };
                self.pad_text(out, &text);
            }
            'c' => {
                let c = match *arg {
                    Arg::Char(c) => c,
                    Arg::Signed(v, _) => code_point(i128::from(v))?,
                    Arg::Unsigned(v, _) => code_point(i128::from(v))?,
                    _ => return Err(self.illegal(arg)),
                };
                pad(out, c.encode_utf8(&mut [0; 4]), self.width, self.flags.left);
            }
            'd' => {
                let (negative, digits) = match *arg {
                    Arg::Signed(v, _) => (v < 0, v.unsigned_abs().to_string()),
                    Arg::Unsigned(v, _) => (false, v.to_string()),
                    _ => return Err(self.illegal(arg)),
                };
                self.pad_number(out, self.sign(negative), "", &digits);
            }
            'x' | 'X' | 'o' => {
                let bits = match *arg {
                    Arg::Signed(v, bits) => twos_complement(v, bits),
                    Arg::Unsigned(v, _) => v,
                    _ => return Err(self.illegal(arg)),
                };
                let digits = if self.conversion == 'o' {
                    format!("{bits:o}")
                } else {
                    format!("{bits:x}")
                };
                let prefix = match (self.flags.alternate, self.conversion) {
                    (false, _) => "",
                    (true, 'o') => "0",
                    (true, _) => "0x",
                };
                if self.conversion == 'X' {
                    let mut upper = String::new();
                    self.pad_number(&mut upper, "", prefix, &digits);
                    out.push_str(&upper.to_uppercase());
                } else {
                    self.pad_number(out, "", prefix, &digits);
                }
            }
            'f' | 'e' | 'E' => {
                let Arg::Float(v) = *arg else {
                    return Err(self.illegal(arg));
                };
                let precision = self.precision.unwrap_or(6);
                let digits = match self.conversion {
                    'f' => format!("{:.*}", precision, v.abs()),
                    'e' => scientific(v.abs(), precision),
                    _ => scientific(v.abs(), precision).to_uppercase(),
                };
                let sign = self.sign(v.is_sign_negative() && !v.is_nan());
                if v.is_finite() {
                    self.pad_number(out, sign, "", &digits);
                } else {
                    pad(out, &format!("{sign}{digits}"), self.width, self.flags.left);
                }
            }
            other => return Err(FormatError::UnknownConversion(other)),
        }
        Ok(())
    }

    fn sign(&self, negative: bool) -> &'static str {
        if negative {
            "-"
        } else if self.flags.plus {
            "+"
        } else if self.flags.space {
            " "
        } else {
            ""
        }
    }

    fn pad_text(&self, out: &mut String, text: &str) {
        let truncated = match self.precision {
            Some(p) => text.char_indices().nth(p).map_or(text, |(end, _)| &text[..end]),
            None => text,
        };
        if self.conversion.is_ascii_uppercase() {
            pad(out, &truncated.to_uppercase(), self.width, self.flags.left);
        } else {
            pad(out, truncated, self.width, self.flags.left);
        }
    }

    fn pad_number(&self, out: &mut String, sign: &str, prefix: &str, digits: &str) {
        match self.width {
            Some(width) if self.flags.zero => {
                let len = sign.len() + prefix.len() + digits.len();
                out.push_str(sign);
                out.push_str(prefix);
                out.extend(core::iter::repeat_n('0', width.saturating_sub(len)));
                out.push_str(digits);
            }
            _ => pad(out, &format!("{sign}{prefix}{digits}"), self.width, self.flags.left),
        }
    }
}

/// Widths and precisions above this are rejected rather than allocated.
const MAX_FIELD: usize = u16::MAX as usize;

fn number(s: &str, start: usize, digits: usize) -> Result<usize, FormatError> {
    s[start..start + digits]
        .parse::<usize>()
        .ok()
        .filter(|n| *n <= MAX_FIELD)
        .ok_or_else(|| FormatError::Overflow {
            specifier: s[..start + digits].to_owned(),
        })
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// The bit pattern of `v` as an integer `bits` wide.
fn twos_complement(v: i64, bits: u32) -> u64 {
    (v as u64) & (u64::MAX >> (64 - bits))
}

fn code_point(v: i128) -> Result<char, FormatError> {
    u32::try_from(v)
        .ok()
        .and_then(char::from_u32)
        .ok_or(FormatError::InvalidCodePoint(v))
}

/// `1.500000e+02`: mantissa with `precision` decimals and a signed exponent of at
/// least two digits.
fn scientific(v: f64, precision: usize) -> String {
    let rendered = format!("{v:.precision$e}");
    match rendered.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, exp) = match exp.strip_prefix('-') {
                Some(abs) => ('-', abs),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{exp:0>2}")
        }
        None => rendered,
    }
}

fn pad(out: &mut String, text: &str, width: Option<usize>, left: bool) {
    let fill = width.map_or(0, |w| w.saturating_sub(text.chars().count()));
    if left {
        out.push_str(text);
        out.extend(core::iter::repeat_n(' ', fill));
    } else {
        out.extend(core::iter::repeat_n(' ', fill));
        out.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl fmt::Display for Failing {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    struct Exploding;

    impl fmt::Display for Exploding {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            panic!("I was doomed to fail...")
        }
    }

    struct ExplodingWithFuse;

    impl fmt::Display for ExplodingWithFuse {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            std::panic::panic_any(42_u8)
        }
    }

    fn render(template: &str, args: &[Arg<'_>]) -> String {
        format(template, args).unwrap()
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(render("no specifiers here", &[]), "no specifiers here");
        assert_eq!(render("", &[Arg::from(1)]), "");
    }

    #[test]
    fn strings_and_display() {
        let name = String::from("world");
        assert_eq!(render("Hello %s", &[Arg::from(1234)]), "Hello 1234");
        assert_eq!(render("Hello %s!", &[Arg::from(&name)]), "Hello world!");
        assert_eq!(render("%S", &[Arg::from("shout")]), "SHOUT");
        assert_eq!(render("[%8s]", &[Arg::from("right")]), "[   right]");
        assert_eq!(render("[%-8s]", &[Arg::from("left")]), "[left    ]");
        assert_eq!(render("%.3s", &[Arg::from("truncated")]), "tru");

        let level = crate::Level::Warn;
        assert_eq!(render("level=%s", &[Arg::display(&level)]), "level=WARN");
        assert_eq!(render("%s", &[Arg::debug(&Some(3))]), "Some(3)");
    }

    #[test]
    fn integers() {
        assert_eq!(render("%d", &[Arg::from(-42_i32)]), "-42");
        assert_eq!(render("%d", &[Arg::from(u64::MAX)]), "18446744073709551615");
        assert_eq!(render("%d", &[Arg::from(i64::MIN)]), "-9223372036854775808");
        assert_eq!(render("%+d", &[Arg::from(7_u8)]), "+7");
        assert_eq!(render("% d", &[Arg::from(7_u8)]), " 7");
        assert_eq!(render("%05d", &[Arg::from(-42)]), "-0042");
        assert_eq!(render("%5d|", &[Arg::from(42)]), "   42|");
        assert_eq!(render("%-5d|", &[Arg::from(42)]), "42   |");
        assert_eq!(render("%x", &[Arg::from(255)]), "ff");
        assert_eq!(render("%X", &[Arg::from(255)]), "FF");
        assert_eq!(render("%#x", &[Arg::from(255)]), "0xff");
        assert_eq!(render("%#X", &[Arg::from(255)]), "0XFF");
        assert_eq!(render("%#06x", &[Arg::from(255)]), "0x00ff");
        assert_eq!(render("%x", &[Arg::from(-1_i64)]), "ffffffffffffffff");
        assert_eq!(render("%x", &[Arg::from(-1_i32)]), "ffffffff");
        assert_eq!(render("%x", &[Arg::from(-1_i16)]), "ffff");
        assert_eq!(render("%X", &[Arg::from(&-1_i8)]), "FF");
        assert_eq!(render("%o", &[Arg::from(-1_i8)]), "377");
        assert_eq!(render("%#x", &[Arg::from(-2_isize)]), format!("{:#x}", -2_isize));
        assert_eq!(render("%o %#o", &[Arg::from(8), Arg::from(8)]), "10 010");
        assert_eq!(render("%d", &[Arg::from(&usize::MAX)]), usize::MAX.to_string());
    }

    #[test]
    fn floats() {
        assert_eq!(render("%f", &[Arg::from(1.5)]), "1.500000");
        assert_eq!(render("%.2f", &[Arg::from(1.23456)]), "1.23");
        assert_eq!(render("%08.3f", &[Arg::from(-2.5_f32)]), "-002.500");
        assert_eq!(render("%+.1f", &[Arg::from(2.0)]), "+2.0");
        assert_eq!(render("%e", &[Arg::from(150.0)]), "1.500000e+02");
        assert_eq!(render("%.2E", &[Arg::from(0.000123)]), "1.23E-04");
        assert_eq!(render("%s %s", &[Arg::from(1.0), Arg::from(-2.5_f32)]), "1.0 -2.5");
        assert_eq!(render("%6f|", &[Arg::from(f64::NAN)]), "   NaN|");
    }

    #[test]
    fn chars_booleans_and_literals() {
        assert_eq!(render("%c%c", &[Arg::from('o'), Arg::from(107)]), "ok");
        assert_eq!(render("%b %b %B", &[Arg::from(false), Arg::from("x"), Arg::from(true)]), "false true TRUE");
        assert_eq!(render("100%%", &[]), "100%");
        assert_eq!(render("a%nb", &[]), "a\nb");
    }

    #[test]
    fn argument_indices() {
        let args = [Arg::from("a"), Arg::from("b"), Arg::from("c")];
        assert_eq!(render("%3$s %1$s %2$s", &args), "c a b");
        assert_eq!(render("%2$s %s %s", &args), "b a b");
        assert_eq!(render("%s %<s %s", &args), "a a b");
        assert_eq!(render("%s", &args), "a");
    }

    #[test]
    fn bad_templates() {
        assert_eq!(
            format("Foo %q", &[Arg::from("bar")]),
            Err(FormatError::UnknownConversion('q'))
        );
        assert_eq!(format("trailing %", &[]), Err(FormatError::Incomplete));
        assert_eq!(format("trailing %-5", &[]), Err(FormatError::Incomplete));
        assert_eq!(
            format("Foo %s %s", &[Arg::from("bar")]),
            Err(FormatError::MissingArgument {
                specifier: "%s".to_owned()
            })
        );
        assert_eq!(
            format("%0$s", &[Arg::from("bar")]),
            Err(FormatError::BadIndex {
                specifier: "%0$s".to_owned()
            })
        );
        assert_eq!(
            format("%<s", &[Arg::from("bar")]),
            Err(FormatError::BadIndex {
                specifier: "%<s".to_owned()
            })
        );
        assert_eq!(
            format("%-s", &[Arg::from("bar")]),
            Err(FormatError::MissingWidth {
                specifier: "%-s".to_owned()
            })
        );
        assert_eq!(
            format("%05s", &[Arg::from("bar")]),
            Err(FormatError::FlagMismatch {
                flag: '0',
                conversion: 's'
            })
        );
        assert_eq!(
            format("%.2d", &[Arg::from(1)]),
            Err(FormatError::IllegalPrecision { conversion: 'd' })
        );
        assert!(matches!(
            format("%99999999999s", &[Arg::from(1)]),
            Err(FormatError::Overflow { .. })
        ));
        assert_eq!(
            format("%c", &[Arg::from(-1)]),
            Err(FormatError::InvalidCodePoint(-1))
        );
        assert_eq!(format("trailing %.", &[]), Err(FormatError::Incomplete));
        assert_eq!(format("%.s", &[]), Err(FormatError::UnknownConversion('.')));
    }

    #[test]
    fn newline_takes_no_modifiers() {
        assert_eq!(
            format("%5n|", &[]),
            Err(FormatError::IllegalWidth { conversion: 'n' })
        );
        assert_eq!(
            format("%-n", &[]),
            Err(FormatError::FlagMismatch {
                flag: '-',
                conversion: 'n'
            })
        );
        assert_eq!(
            format("%.1n", &[]),
            Err(FormatError::IllegalPrecision { conversion: 'n' })
        );
        assert_eq!(
            format("%.1%", &[]),
            Err(FormatError::IllegalPrecision { conversion: '%' })
        );
        assert_eq!(render("[%-3%]", &[]), "[%  ]");
    }

    #[test]
    fn template_errors_win_over_argument_failures() {
        assert_eq!(
            format("Hello %s %q", &[Arg::display(&Failing)]),
            Err(FormatError::UnknownConversion('q'))
        );
        assert_eq!(
            format("%s then %", &[Arg::display(&Exploding)]),
            Err(FormatError::Incomplete)
        );
    }

    #[test]
    fn conversion_mismatch_names_the_type() {
        let err = format("Foo %d", &[Arg::from("bar")]).unwrap_err();
        assert_eq!(err.to_string(), "conversion 'd' cannot format a value of type &str");

        let err = format("%f", &[Arg::from(1)]).unwrap_err();
        assert_eq!(
            err,
            FormatError::IllegalConversion {
                conversion: 'f',
                arg_type: "i32"
            }
        );

        let err = format("%c", &[Arg::from(&true)]).unwrap_err();
        assert_eq!(err.to_string(), "conversion 'c' cannot format a value of type bool");
        let err = format("%f", &[Arg::from(7_u16)]).unwrap_err();
        assert_eq!(err.to_string(), "conversion 'f' cannot format a value of type u16");
    }

    #[test]
    fn failing_display_is_contained() {
        let err = format("Hello %s", &[Arg::display(&Failing)]).unwrap_err();
        assert_eq!(
            err,
            FormatError::Argument {
                index: 1,
                failure: ArgFailure::Error
            }
        );

        let err = format("Hello %s %s", &[Arg::from("bar"), Arg::display(&Exploding)]).unwrap_err();
        assert_eq!(err.to_string(), "argument 2: panicked: I was doomed to fail...");

        let err = format("Hello %s", &[Arg::display(&ExplodingWithFuse)]).unwrap_err();
        assert_eq!(err.to_string(), "argument 1: ???");
    }

    #[test]
    fn non_string_conversions_skip_display() {
        // %b never calls Display, so a failing implementation is harmless
        assert_eq!(render("%b", &[Arg::display(&Failing)]), "true");
    }

    #[test]
    fn render_args_marks_failures() {
        let args = [
            Arg::from("bar"),
            Arg::from(1234),
            Arg::display(&Failing),
            Arg::display(&Exploding),
            Arg::display(&ExplodingWithFuse),
        ];
        assert_eq!(
            render_args(&args),
            "bar, 1234, fmt():an error occurred when formatting an argument, \
             fmt():panicked: I was doomed to fail..., fmt():???"
        );
        assert_eq!(render_args(&[]), "");
    }
}
