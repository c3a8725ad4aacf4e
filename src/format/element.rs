//! Printer-parser elements.
//!
//! A formatter is a tree of [`Element`]s. Each element knows how to append
//! its part of a value to an output buffer and how to consume the same part
//! from input text, recording what it read into the parse context.

use super::builder::FormatterBuilder;
use super::context::{Mismatch, ParseContext, ParseStep};
use super::locale::{FormatStyle, Locale, LocaleProvider, TextStyle};
use crate::calendar::offset::write_offset;
use crate::calendar::{Calendrical, Field, TimeZone, ZoneOffset};
use crate::common::math::floor_mod;
use crate::common::{Error, Result};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Sign handling for numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignStyle {
    /// Sign printed only for negative values; a parsed `+` is rejected
    Normal,
    /// Never print a sign; parsing rejects any sign
    Never,
    /// Always print a sign
    Always,
    /// Negative values are unprintable; parsing rejects any sign
    NotNegative,
    /// Print `+` when the value needs more digits than the minimum width
    ExceedsPad,
}

impl SignStyle {
    fn accepts(self, positive: bool) -> bool {
        match self {
            Self::Normal => !positive,
            Self::Always | Self::ExceedsPad => true,
            Self::Never | Self::NotNegative => false,
        }
    }
}

impl fmt::Display for SignStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Values available to the elements while printing.
pub(crate) struct PrintContext<'a> {
    pub value: &'a dyn Calendrical,
    pub locale: &'a Locale,
    pub provider: &'a dyn LocaleProvider,
    pub localized: Option<&'a LocalizedPatterns>,
}

impl PrintContext<'_> {
    fn field(&self, field: Field) -> Result<i64> {
        self.value
            .get(field)
            .ok_or(Error::UnsupportedField { field: field.name() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Element {
    Char(char),
    Literal(Box<str>),
    Number {
        field: Field,
        min_width: u8,
        max_width: u8,
        sign: SignStyle,
    },
    /// Last `width` digits of a value, parsed relative to `base`
    Reduced {
        field: Field,
        width: u8,
        base: i64,
    },
    /// Decimal fraction of the field range, led by `.` when `point` is set
    Fraction {
        field: Field,
        min_width: u8,
        max_width: u8,
        point: bool,
    },
    Text {
        field: Field,
        style: TextStyle,
    },
    Offset {
        no_offset: Box<str>,
        colon: bool,
        seconds: bool,
    },
    ZoneId,
    CaseSensitive(bool),
    Localized {
        date: Option<FormatStyle>,
        time: Option<FormatStyle>,
    },
    Composite(Composite),
}

/// An ordered run of elements, optionally forming an optional section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Composite {
    elements: Arc<[Element]>,
    optional: bool,
}

impl Composite {
    pub fn new(elements: Vec<Element>, optional: bool) -> Self {
        Self {
            elements: elements.into(),
            optional,
        }
    }

    /// Share the elements under a different optionality.
    pub fn with_optional(&self, optional: bool) -> Self {
        Self {
            elements: Arc::clone(&self.elements),
            optional,
        }
    }

    fn collect_styles(&self, styles: &mut SmallVec<[StylePair; 2]>) {
        for element in self.elements.iter() {
            match element {
                Element::Localized { date, time } if !styles.contains(&(*date, *time)) => {
                    styles.push((*date, *time));
                },
                Element::Composite(inner) => inner.collect_styles(styles),
                _ => {},
            }
        }
    }

    // Optional sections print like any other; a missing field still fails.
    pub fn print(&self, ctx: &PrintContext<'_>, out: &mut String) -> Result<()> {
        self.elements.iter().try_for_each(|e| e.print(ctx, out))
    }

    pub fn parse(&self, ctx: &mut ParseContext<'_>, text: &str, pos: usize) -> ParseStep {
        if !self.optional {
            return self.elements.iter().try_fold(pos, |at, e| e.parse(ctx, text, at));
        }
        let checkpoint = ctx.checkpoint();
        let mut at = pos;
        for element in self.elements.iter() {
            match element.parse(ctx, text, at) {
                Ok(next) => at = next,
                Err(mismatch) => {
                    trace!(
                        index = mismatch.index,
                        expected = %mismatch.expected,
                        "optional section skipped"
                    );
                    ctx.rollback(checkpoint);
                    return Ok(pos);
                },
            }
        }
        ctx.end_section(&checkpoint);
        Ok(at)
    }
}

impl fmt::Display for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            f.write_str("[")?;
        }
        for element in self.elements.iter() {
            write!(f, "{element}")?;
        }
        if self.optional {
            f.write_str("]")?;
        }
        Ok(())
    }
}

impl Element {
    pub fn print(&self, ctx: &PrintContext<'_>, out: &mut String) -> Result<()> {
        match self {
            Self::Char(c) => out.push(*c),
            Self::Literal(s) => out.push_str(s),
            Self::Number {
                field,
                min_width,
                max_width,
                sign,
            } => print_number(out, *field, ctx.field(*field)?, *min_width, *max_width, *sign)?,
            Self::Reduced { field, width, base: _ } => {
                let value = ctx.field(*field)?;
                let reduced = floor_mod(value, 10i64.pow(*width as u32));
                print_number(out, *field, reduced, *width, *width, SignStyle::NotNegative)?;
            },
            Self::Fraction {
                field,
                min_width,
                max_width,
                point,
            } => print_fraction(out, *field, ctx.field(*field)?, *min_width, *max_width, *point)?,
            Self::Text { field, style } => {
                let value = ctx.field(*field)?;
                match ctx.provider.text(ctx.locale, *field, value, *style) {
                    Some(text) => out.push_str(&text),
                    None => print_number(out, *field, value, 1, 19, SignStyle::Normal)?,
                }
            },
            Self::Offset {
                no_offset,
                colon,
                seconds,
            } => {
                let offset = ctx.value.get_offset().ok_or(Error::UnsupportedField {
                    field: Field::OffsetSeconds.name(),
                })?;
                if offset == ZoneOffset::UTC {
                    out.push_str(no_offset);
                } else {
                    write_offset(out, offset, *colon, *seconds);
                }
            },
            Self::ZoneId => {
                let zone = ctx
                    .value
                    .get_zone()
                    .ok_or(Error::UnsupportedField { field: "ZoneId" })?;
                out.push_str(&zone.id());
            },
            Self::CaseSensitive(_) => {},
            Self::Localized { date, time } => {
                match ctx.localized.and_then(|patterns| patterns.get(*date, *time)) {
                    Some(compiled) => compiled.print(ctx, out)?,
                    None => localized(ctx.provider, ctx.locale, *date, *time)?.print(ctx, out)?,
                }
            },
            Self::Composite(composite) => composite.print(ctx, out)?,
        }
        Ok(())
    }

    pub fn parse(&self, ctx: &mut ParseContext<'_>, text: &str, pos: usize) -> ParseStep {
        match self {
            Self::Char(c) => match text.get(pos..).and_then(|rest| rest.chars().next()) {
                Some(actual) if ctx.chars_match(actual, *c) => Ok(pos + actual.len_utf8()),
                _ => Err(Mismatch::new(pos, self)),
            },
            Self::Literal(s) => ctx.match_str(text, pos, s).ok_or_else(|| Mismatch::new(pos, self)),
            Self::Number {
                field,
                min_width,
                max_width,
                sign,
            } => {
                let (end, value) = parse_number(text, pos, *min_width, *max_width, *sign)
                    .ok_or_else(|| Mismatch::new(pos, self))?;
                ctx.set_field(*field, value, pos)?;
                Ok(end)
            },
            Self::Reduced { field, width, base } => {
                let (end, parsed) = parse_number(text, pos, *width, *width, SignStyle::NotNegative)
                    .ok_or_else(|| Mismatch::new(pos, self))?;
                let range = 10i64.pow(*width as u32);
                let mut value = base - floor_mod(*base, range) + parsed;
                if value < *base {
                    value += range;
                }
                ctx.set_field(*field, value, pos)?;
                Ok(end)
            },
            Self::Fraction {
                field,
                min_width,
                max_width,
                point,
            } => parse_fraction(ctx, text, pos, *field, *min_width, *max_width, *point)
                .map_err(|index| Mismatch::new(index, self)),
            Self::Text { field, style } => {
                parse_text(ctx, text, pos, *field, *style).ok_or_else(|| Mismatch::new(pos, self))?
            },
            Self::Offset {
                no_offset,
                colon,
                seconds,
            } => {
                if no_offset.is_empty() {
                    if !text[pos..].starts_with(['+', '-']) {
                        ctx.set_offset(ZoneOffset::UTC, pos)?;
                        return Ok(pos);
                    }
                } else if let Some(end) = ctx.match_str(text, pos, no_offset) {
                    ctx.set_offset(ZoneOffset::UTC, pos)?;
                    return Ok(end);
                }
                let (end, offset) = parse_offset(text, pos, *colon, *seconds)
                    .map_err(|index| Mismatch::new(index, self))?;
                ctx.set_offset(offset, pos)?;
                Ok(end)
            },
            Self::ZoneId => {
                let rest = &text[pos..];
                let len = rest
                    .find(|c: char| !(c.is_ascii_alphanumeric() || "~/._+-:".contains(c)))
                    .unwrap_or(rest.len());
                let zone = match TimeZone::of(&rest[..len]) {
                    Ok(zone) if len > 0 => zone,
                    _ => return Err(Mismatch::new(pos, self)),
                };
                ctx.set_zone(zone, pos)?;
                Ok(pos + len)
            },
            Self::CaseSensitive(sensitive) => {
                ctx.case_sensitive = *sensitive;
                Ok(pos)
            },
            Self::Localized { date, time } => {
                let patterns = ctx.localized;
                match patterns.and_then(|patterns| patterns.get(*date, *time)) {
                    Some(compiled) => compiled.parse(ctx, text, pos),
                    None => localized(ctx.provider, ctx.locale, *date, *time)
                        .map_err(|e| Mismatch::new(pos, e))?
                        .parse(ctx, text, pos),
                }
            },
            Self::Composite(composite) => composite.parse(ctx, text, pos),
        }
    }
}

/// Compile the locale's pattern for a date and/or time style.
fn localized(
    provider: &dyn LocaleProvider,
    locale: &Locale,
    date: Option<FormatStyle>,
    time: Option<FormatStyle>,
) -> Result<Composite> {
    let pattern = provider
        .localized_pattern(locale, date, time)
        .ok_or(Error::Precondition("a localized formatter needs a date or time style"))?;
    FormatterBuilder::new().append_pattern(&pattern).build()
}

type StylePair = (Option<FormatStyle>, Option<FormatStyle>);

/// The localized patterns of one element tree, compiled for a locale and
/// provider.
#[derive(Debug, Clone, Default)]
pub(crate) struct LocalizedPatterns {
    compiled: Arc<[(StylePair, Composite)]>,
}

impl LocalizedPatterns {
    pub fn compile(composite: &Composite, locale: &Locale, provider: &dyn LocaleProvider) -> Self {
        let mut styles = SmallVec::new();
        composite.collect_styles(&mut styles);
        let compiled: Vec<_> = styles
            .into_iter()
            .filter_map(|(date, time)| {
                let pattern = localized(provider, locale, date, time).ok()?;
                Some(((date, time), pattern))
            })
            .collect();
        if !compiled.is_empty() {
            trace!(%locale, patterns = compiled.len(), "localized patterns compiled");
        }
        Self {
            compiled: compiled.into(),
        }
    }

    pub fn get(&self, date: Option<FormatStyle>, time: Option<FormatStyle>) -> Option<&Composite> {
        self.compiled
            .iter()
            .find(|(styles, _)| *styles == (date, time))
            .map(|(_, pattern)| pattern)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.compiled.len()
    }
}

fn print_number(
    out: &mut String,
    field: Field,
    value: i64,
    min_width: u8,
    max_width: u8,
    sign: SignStyle,
) -> Result<()> {
    let magnitude = value.unsigned_abs();
    let mut buf = itoa::Buffer::new();
    let digits = buf.format(magnitude);
    if digits.len() > max_width as usize {
        return Err(Error::Unprintable {
            field: field.name(),
            value,
            reason: "value exceeds the maximum width",
        });
    }
    if value >= 0 {
        match sign {
            SignStyle::Always => out.push('+'),
            SignStyle::ExceedsPad if digits.len() > min_width as usize => out.push('+'),
            _ => {},
        }
    } else {
        match sign {
            SignStyle::Normal | SignStyle::Always | SignStyle::ExceedsPad => out.push('-'),
            SignStyle::NotNegative => {
                return Err(Error::Unprintable {
                    field: field.name(),
                    value,
                    reason: "value is negative",
                });
            },
            SignStyle::Never => {},
        }
    }
    for _ in digits.len()..min_width as usize {
        out.push('0');
    }
    out.push_str(digits);
    Ok(())
}

/// Returns the end index and value, or `None` when the text does not match.
fn parse_number(
    text: &str,
    pos: usize,
    min_width: u8,
    max_width: u8,
    sign: SignStyle,
) -> Option<(usize, i64)> {
    let bytes = text.as_bytes();
    let (mut negative, mut positive) = (false, false);
    let mut at = pos;
    match *bytes.get(at)? {
        b'+' if sign.accepts(true) => positive = true,
        b'-' if sign.accepts(false) => negative = true,
        b'+' | b'-' => return None,
        _ if sign == SignStyle::Always => return None,
        _ => {},
    }
    if positive || negative {
        at += 1;
    }
    let start = at;
    let max_end = bytes.len().min(start + max_width as usize);
    let mut total: i64 = 0;
    while at < max_end && bytes[at].is_ascii_digit() {
        total = total.checked_mul(10)?.checked_add((bytes[at] - b'0') as i64)?;
        at += 1;
    }
    let width = at - start;
    if width < min_width as usize {
        return None;
    }
    if negative {
        if total == 0 {
            return None;
        }
        total = -total;
    } else if sign == SignStyle::ExceedsPad && (width > min_width as usize) != positive {
        return None;
    }
    Some((at, total))
}

fn print_fraction(
    out: &mut String,
    field: Field,
    value: i64,
    min_width: u8,
    max_width: u8,
    point: bool,
) -> Result<()> {
    let (min, max) = field.range();
    if !(min..=max).contains(&value) {
        return Err(Error::Unprintable {
            field: field.name(),
            value,
            reason: "value is outside the field range",
        });
    }
    if value == min {
        if min_width > 0 {
            if point {
                out.push('.');
            }
            (0..min_width).for_each(|_| out.push('0'));
        }
        return Ok(());
    }
    // nine digits of the fraction of the field range, floored
    let scaled = (value - min) as i128 * 1_000_000_000 / (max - min + 1) as i128;
    let digits = format!("{scaled:09}");
    let exact = digits.trim_end_matches('0').len();
    let scale = exact.clamp(min_width as usize, max_width as usize);
    if point {
        out.push('.');
    }
    out.push_str(&digits[..scale.min(9)]);
    (9..scale).for_each(|_| out.push('0'));
    Ok(())
}

/// On failure returns the index at which a digit was expected.
fn parse_fraction(
    ctx: &mut ParseContext<'_>,
    text: &str,
    pos: usize,
    field: Field,
    min_width: u8,
    max_width: u8,
    point: bool,
) -> std::result::Result<usize, usize> {
    let bytes = text.as_bytes();
    if point && bytes.get(pos) != Some(&b'.') {
        return if min_width > 0 { Err(pos) } else { Ok(pos) };
    }
    let start = pos + usize::from(point);
    let max_end = bytes.len().min(start + max_width as usize);
    let mut at = start;
    let mut total: i64 = 0;
    while at < max_end && bytes[at].is_ascii_digit() {
        total = total * 10 + (bytes[at] - b'0') as i64;
        at += 1;
    }
    let count = at - start;
    if count < min_width as usize {
        return Err(at);
    }
    if count == 0 {
        return Ok(pos);
    }
    let (min, max) = field.range();
    let value = min as i128 + total as i128 * (max - min + 1) as i128 / 10i128.pow(count as u32);
    ctx.set_field(field, value as i64, pos).map_err(|m| m.index)?;
    Ok(at)
}

/// Longest text match among the field's values; falls back to digits when
/// the locale has no text for the field.
fn parse_text(
    ctx: &mut ParseContext<'_>,
    text: &str,
    pos: usize,
    field: Field,
    style: TextStyle,
) -> Option<ParseStep> {
    let (min, max) = field.range();
    let mut best: Option<(usize, i64)> = None;
    let mut has_text = false;
    if max - min < 100 {
        for value in min..=max {
            let Some(candidate) = ctx.provider.text(ctx.locale, field, value, style) else {
                continue;
            };
            has_text = true;
            if let Some(end) = ctx.match_str(text, pos, &candidate)
                && best.is_none_or(|(longest, _)| end > longest)
            {
                best = Some((end, value));
            }
        }
    }
    let (end, value) = match best {
        Some(found) => found,
        None if !has_text => parse_number(text, pos, 1, 19, SignStyle::Normal)?,
        None => return None,
    };
    Some(ctx.set_field(field, value, pos).map(|_| end))
}

/// `±hh[:]mm` with optional `[:]ss`; on failure returns the failing index.
fn parse_offset(
    text: &str,
    pos: usize,
    colon: bool,
    seconds: bool,
) -> std::result::Result<(usize, ZoneOffset), usize> {
    let bytes = text.as_bytes();
    let sign = match bytes.get(pos) {
        Some(b'+') => 1,
        Some(b'-') => -1,
        _ => return Err(pos),
    };
    let mut at = pos + 1;
    let hours = two_digits(bytes, at).ok_or(at)?;
    at += 2;
    if colon {
        if bytes.get(at) != Some(&b':') {
            return Err(at);
        }
        at += 1;
    }
    let minutes = two_digits(bytes, at).ok_or(at)?;
    at += 2;
    let mut secs = 0;
    if seconds {
        let skip = usize::from(colon);
        if (!colon || bytes.get(at) == Some(&b':'))
            && let Some(s) = two_digits(bytes, at + skip)
        {
            secs = s;
            at += skip + 2;
        }
    }
    let offset = ZoneOffset::of_hms(sign * hours, sign * minutes, sign * secs).map_err(|_| pos)?;
    Ok((at, offset))
}

fn two_digits(bytes: &[u8], at: usize) -> Option<i32> {
    match bytes.get(at..at + 2)? {
        [a, b] if a.is_ascii_digit() && b.is_ascii_digit() => {
            Some(((a - b'0') * 10 + (b - b'0')) as i32)
        },
        _ => None,
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char('\'') => f.write_str("''"),
            Self::Char(c) => write!(f, "'{c}'"),
            Self::Literal(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Self::Number {
                field,
                min_width: 1,
                max_width: 19,
                sign: SignStyle::Normal,
            } => write!(f, "Value({field})"),
            Self::Number {
                field,
                min_width,
                max_width,
                sign: SignStyle::NotNegative,
            } if min_width == max_width => write!(f, "Value({field},{min_width})"),
            Self::Number {
                field,
                min_width,
                max_width,
                sign,
            } => write!(f, "Value({field},{min_width},{max_width},{sign})"),
            Self::Reduced { field, width, base } => {
                write!(f, "ReducedValue({field},{width},{base})")
            },
            Self::Fraction {
                field,
                min_width,
                max_width,
                point: true,
            } => write!(f, "Fraction({field},{min_width},{max_width})"),
            Self::Fraction {
                field,
                min_width,
                max_width,
                point: false,
            } => write!(f, "Fraction({field},{min_width},{max_width},false)"),
            Self::Text {
                field,
                style: TextStyle::Full,
            } => write!(f, "Text({field})"),
            Self::Text { field, style } => write!(f, "Text({field},{style:?})"),
            Self::Offset {
                no_offset,
                colon,
                seconds,
            } => write!(f, "Offset('{no_offset}',{colon},{seconds})"),
            Self::ZoneId => f.write_str("ZoneId()"),
            Self::CaseSensitive(sensitive) => write!(f, "ParseCaseSensitive({sensitive})"),
            Self::Localized { date, time } => {
                let style =
                    |s: &Option<FormatStyle>| s.map(|s| format!("{s:?}")).unwrap_or_default();
                write!(f, "Localized({},{})", style(date), style(time))
            },
            Self::Composite(composite) => write!(f, "{composite}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::locale::BuiltinLocales;

    fn number(min_width: u8, max_width: u8, sign: SignStyle) -> Element {
        Element::Number {
            field: Field::Year,
            min_width,
            max_width,
            sign,
        }
    }

    fn print(element: &Element, value: i64) -> Result<String> {
        let date = chrono::NaiveDate::from_ymd_opt(value as i32, 1, 1).unwrap();
        let ctx = PrintContext {
            value: &date,
            locale: &Locale::ENGLISH,
            provider: &BuiltinLocales,
            localized: None,
        };
        let mut out = String::new();
        element.print(&ctx, &mut out).map(|_| out)
    }

    fn parse(element: &Element, text: &str) -> std::result::Result<(usize, Option<i64>), usize> {
        let locale = Locale::ENGLISH;
        let mut ctx = ParseContext::new(&locale, &BuiltinLocales);
        element
            .parse(&mut ctx, text, 0)
            .map(|end| (end, ctx.parsed.get(Field::Year)))
            .map_err(|m| m.index)
    }

    #[test]
    fn number_signs_on_print() {
        let exceeds = number(4, 10, SignStyle::ExceedsPad);
        assert_eq!(print(&exceeds, 2007).unwrap(), "2007");
        assert_eq!(print(&exceeds, 12345).unwrap(), "+12345");
        assert_eq!(print(&exceeds, -1).unwrap(), "-0001");
        assert_eq!(print(&number(1, 19, SignStyle::Always), 7).unwrap(), "+7");
        assert_eq!(print(&number(2, 19, SignStyle::Never), -7).unwrap(), "07");
        assert!(matches!(
            print(&number(4, 4, SignStyle::NotNegative), -1),
            Err(Error::Unprintable { value: -1, .. })
        ));
        assert!(matches!(
            print(&number(4, 4, SignStyle::NotNegative), 12345),
            Err(Error::Unprintable { value: 12345, .. })
        ));
    }

    #[test]
    fn number_signs_on_parse() {
        let exceeds = number(4, 10, SignStyle::ExceedsPad);
        assert_eq!(parse(&exceeds, "2007"), Ok((4, Some(2007))));
        assert_eq!(parse(&exceeds, "+12345"), Ok((6, Some(12345))));
        assert_eq!(parse(&exceeds, "-0001"), Ok((5, Some(-1))));
        assert_eq!(parse(&exceeds, "+2007"), Err(0));
        assert_eq!(parse(&exceeds, "12345"), Err(0));
        assert_eq!(parse(&exceeds, "207"), Err(0));
        assert_eq!(parse(&exceeds, "-0000"), Err(0));

        let normal = number(1, 19, SignStyle::Normal);
        assert_eq!(parse(&normal, "-42x"), Ok((3, Some(-42))));
        assert_eq!(parse(&normal, "+42"), Err(0));
        assert_eq!(parse(&normal, "99999999999999999999"), Err(0));
        assert_eq!(parse(&number(4, 4, SignStyle::NotNegative), "+123"), Err(0));
        assert_eq!(parse(&number(2, 2, SignStyle::NotNegative), "123"), Ok((2, Some(12))));
    }

    #[test]
    fn reduced_year() {
        let reduced = Element::Reduced {
            field: Field::Year,
            width: 2,
            base: 2000,
        };
        assert_eq!(print(&reduced, 2007).unwrap(), "07");
        assert_eq!(print(&reduced, 1999).unwrap(), "99");
        assert_eq!(parse(&reduced, "07"), Ok((2, Some(2007))));
        assert_eq!(parse(&reduced, "99"), Ok((2, Some(2099))));
        assert_eq!(parse(&reduced, "7"), Err(0));
    }

    #[test]
    fn fraction_widths() {
        let mut out = String::new();
        print_fraction(&mut out, Field::NanoOfSecond, 500_000_000, 0, 9, true).unwrap();
        assert_eq!(out, ".5");
        out.clear();
        print_fraction(&mut out, Field::NanoOfSecond, 123_456_789, 0, 3, true).unwrap();
        assert_eq!(out, ".123");
        out.clear();
        print_fraction(&mut out, Field::NanoOfSecond, 0, 0, 9, true).unwrap();
        assert_eq!(out, "");
        out.clear();
        print_fraction(&mut out, Field::NanoOfSecond, 0, 3, 9, true).unwrap();
        assert_eq!(out, ".000");
        out.clear();
        print_fraction(&mut out, Field::NanoOfSecond, 1_000, 6, 9, true).unwrap();
        assert_eq!(out, ".000001");
        out.clear();
        print_fraction(&mut out, Field::NanoOfSecond, 250_000_000, 3, 3, false).unwrap();
        assert_eq!(out, "250");

        let locale = Locale::ENGLISH;
        let mut ctx = ParseContext::new(&locale, &BuiltinLocales);
        assert_eq!(parse_fraction(&mut ctx, ".25Z", 0, Field::NanoOfSecond, 0, 9, true), Ok(3));
        assert_eq!(ctx.parsed.get(Field::NanoOfSecond), Some(250_000_000));
        let mut ctx = ParseContext::new(&locale, &BuiltinLocales);
        assert_eq!(parse_fraction(&mut ctx, "Z", 0, Field::NanoOfSecond, 0, 9, true), Ok(0));
        assert_eq!(parse_fraction(&mut ctx, ".Z", 0, Field::NanoOfSecond, 0, 9, true), Ok(0));
        assert_eq!(parse_fraction(&mut ctx, ".1", 0, Field::NanoOfSecond, 3, 9, true), Err(2));
        assert_eq!(ctx.parsed.get(Field::NanoOfSecond), None);
        assert_eq!(parse_fraction(&mut ctx, "050", 0, Field::NanoOfSecond, 3, 3, false), Ok(3));
        assert_eq!(ctx.parsed.get(Field::NanoOfSecond), Some(50_000_000));
    }

    #[test]
    fn offsets() {
        let plus_one = ZoneOffset::of_hours(1).unwrap();
        assert_eq!(parse_offset("+01:00", 0, true, true), Ok((6, plus_one)));
        assert_eq!(
            parse_offset("-0130", 0, false, false),
            Ok((5, ZoneOffset::of_hours_minutes(-1, -30).unwrap()))
        );
        assert_eq!(
            parse_offset("+01:02:03", 0, true, true),
            Ok((9, ZoneOffset::of_hms(1, 2, 3).unwrap()))
        );
        assert_eq!(parse_offset("+01:02:03", 0, true, false).map(|(end, _)| end), Ok(6));
        assert_eq!(parse_offset("+0100", 0, true, true), Err(3));
        assert_eq!(parse_offset("+19:00", 0, true, true), Err(0));
        assert_eq!(parse_offset("01:00", 0, true, true), Err(0));
    }

    #[test]
    fn optional_section_rolls_back() {
        let section = Composite::new(
            vec![
                Element::Char(':'),
                number(2, 2, SignStyle::NotNegative),
                Element::Char('!'),
            ],
            true,
        );
        let locale = Locale::ENGLISH;
        let mut ctx = ParseContext::new(&locale, &BuiltinLocales);
        assert_eq!(section.parse(&mut ctx, ":20?", 0), Ok(0));
        assert_eq!(ctx.parsed.get(Field::Year), None);
        assert_eq!(section.parse(&mut ctx, ":20!", 0), Ok(4));
        assert_eq!(ctx.parsed.get(Field::Year), Some(20));
    }

    #[test]
    fn descriptions() {
        assert_eq!(number(1, 19, SignStyle::Normal).to_string(), "Value(Year)");
        assert_eq!(number(2, 2, SignStyle::NotNegative).to_string(), "Value(Year,2)");
        assert_eq!(number(4, 10, SignStyle::ExceedsPad).to_string(), "Value(Year,4,10,ExceedsPad)");
        assert_eq!(Element::Char('T').to_string(), "'T'");
        assert_eq!(
            Composite::new(vec![Element::Char(':'), Element::ZoneId], true).to_string(),
            "[':'ZoneId()]"
        );
    }
}
