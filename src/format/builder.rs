//! Incremental construction of formatters.

use super::element::{Composite, Element, SignStyle};
use super::formatter::Formatter;
use super::locale::{FormatStyle, Locale, TextStyle};
use super::pattern;
use crate::calendar::Field;
use crate::common::{Error, Result};

/// Builds a [`Formatter`] element by element.
///
/// Appends never fail on the spot. The first invalid argument is recorded
/// and reported by [`to_formatter`](Self::to_formatter), which keeps long
/// chains readable:
///
/// ```rust
/// use calendrical::calendar::Field;
/// use calendrical::format::{FormatterBuilder, SignStyle};
///
/// let formatter = FormatterBuilder::new()
///     .append_value_with(Field::Year, 4, 10, SignStyle::ExceedsPad)
///     .append_literal("-")
///     .append_value_fixed(Field::MonthOfYear, 2)
///     .optional_start()
///     .append_literal("-")
///     .append_value_fixed(Field::DayOfMonth, 2)
///     .to_formatter()?;
///
/// let date = chrono::NaiveDate::from_ymd_opt(2007, 12, 3).unwrap();
/// assert_eq!(formatter.print(&date)?, "2007-12-03");
/// # Ok::<(), calendrical::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct FormatterBuilder {
    root: Vec<Element>,
    /// Open optional sections, innermost last
    sections: Vec<Vec<Element>>,
    error: Option<Error>,
}

impl FormatterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn active(&mut self) -> &mut Vec<Element> {
        match self.sections.last_mut() {
            Some(section) => section,
            None => &mut self.root,
        }
    }

    fn push(&mut self, element: Element) -> &mut Self {
        self.active().push(element);
        self
    }

    pub(crate) fn fail(&mut self, error: Error) -> &mut Self {
        if self.error.is_none() {
            self.error = Some(error);
        }
        self
    }

    /// Parse the rest of the formatter case-sensitively (the default).
    pub fn parse_case_sensitive(&mut self) -> &mut Self {
        self.push(Element::CaseSensitive(true))
    }

    /// Parse the rest of the formatter ignoring case.
    pub fn parse_case_insensitive(&mut self) -> &mut Self {
        self.push(Element::CaseSensitive(false))
    }

    /// Append a field value with no padding, printing a sign only when
    /// negative.
    pub fn append_value(&mut self, field: Field) -> &mut Self {
        self.push(Element::Number {
            field,
            min_width: 1,
            max_width: 19,
            sign: SignStyle::Normal,
        })
    }

    /// Append a non-negative field value zero-padded to exactly `width`
    /// digits.
    pub fn append_value_fixed(&mut self, field: Field, width: u8) -> &mut Self {
        if !(1..=19).contains(&width) {
            return self.fail(Error::Precondition("the width must be from 1 to 19"));
        }
        self.push(Element::Number {
            field,
            min_width: width,
            max_width: width,
            sign: SignStyle::NotNegative,
        })
    }

    /// Append a field value with explicit width bounds and sign handling.
    ///
    /// Printing pads to `min_width` and fails beyond `max_width`; parsing
    /// consumes up to `max_width` digits.
    pub fn append_value_with(
        &mut self,
        field: Field,
        min_width: u8,
        max_width: u8,
        sign: SignStyle,
    ) -> &mut Self {
        if !(1..=19).contains(&min_width) {
            return self.fail(Error::Precondition("the minimum width must be from 1 to 19"));
        }
        if !(min_width..=19).contains(&max_width) {
            return self.fail(Error::Precondition(
                "the maximum width must be from the minimum width to 19",
            ));
        }
        self.push(Element::Number {
            field,
            min_width,
            max_width,
            sign,
        })
    }

    /// Append the last `width` digits of a value. Parsing maps them into the
    /// range starting at `base`, so `yy` with base 2000 reads `07` as 2007.
    pub fn append_value_reduced(&mut self, field: Field, width: u8, base: i64) -> &mut Self {
        if !(1..=9).contains(&width) {
            return self.fail(Error::Precondition("the reduced width must be from 1 to 9"));
        }
        self.push(Element::Reduced { field, width, base })
    }

    /// Append a decimal fraction of the field, including the leading `.`.
    ///
    /// Printing emits at least `min_width` and at most `max_width` digits,
    /// dropping trailing zeros in between. A zero value with `min_width` 0
    /// prints nothing.
    pub fn append_fraction(&mut self, field: Field, min_width: u8, max_width: u8) -> &mut Self {
        if min_width > 9 || max_width == 0 || max_width > 9 || min_width > max_width {
            return self.fail(Error::Precondition(
                "fraction widths must satisfy 0 <= min <= max <= 9 with max >= 1",
            ));
        }
        self.push(Element::Fraction {
            field,
            min_width,
            max_width,
            point: true,
        })
    }

    /// Fraction digits without the decimal point, as written by `S` pattern
    /// letters.
    pub(crate) fn append_fraction_digits(&mut self, field: Field, width: u8) -> &mut Self {
        self.push(Element::Fraction {
            field,
            min_width: width,
            max_width: width,
            point: false,
        })
    }

    /// Append the locale text of a field, such as a month name.
    pub fn append_text(&mut self, field: Field, style: TextStyle) -> &mut Self {
        self.push(Element::Text { field, style })
    }

    /// Append the offset id: `Z` for UTC, otherwise `+hh:mm` or `+hh:mm:ss`.
    pub fn append_offset_id(&mut self) -> &mut Self {
        self.append_offset("Z", true, true)
    }

    /// Append an offset, printing `no_offset_text` for UTC.
    pub fn append_offset(
        &mut self,
        no_offset_text: &str,
        include_colon: bool,
        allow_seconds: bool,
    ) -> &mut Self {
        self.push(Element::Offset {
            no_offset: no_offset_text.into(),
            colon: include_colon,
            seconds: allow_seconds,
        })
    }

    pub fn append_zone_id(&mut self) -> &mut Self {
        self.push(Element::ZoneId)
    }

    /// Append a style resolved against the formatter's locale when used.
    pub fn append_localized(
        &mut self,
        date_style: Option<FormatStyle>,
        time_style: Option<FormatStyle>,
    ) -> &mut Self {
        if date_style.is_none() && time_style.is_none() {
            return self.fail(Error::Precondition(
                "a localized formatter needs a date or time style",
            ));
        }
        self.push(Element::Localized {
            date: date_style,
            time: time_style,
        })
    }

    /// Append literal text; an empty string appends nothing.
    pub fn append_literal(&mut self, literal: &str) -> &mut Self {
        let mut chars = literal.chars();
        match (chars.next(), chars.next()) {
            (None, _) => self,
            (Some(c), None) => self.push(Element::Char(c)),
            _ => self.push(Element::Literal(literal.into())),
        }
    }

    pub fn append_char(&mut self, literal: char) -> &mut Self {
        self.push(Element::Char(literal))
    }

    /// Append all elements of another formatter.
    pub fn append(&mut self, formatter: &Formatter) -> &mut Self {
        self.push(Element::Composite(formatter.composite().with_optional(false)))
    }

    /// Append another formatter as an optional section.
    pub fn append_optional(&mut self, formatter: &Formatter) -> &mut Self {
        self.push(Element::Composite(formatter.composite().with_optional(true)))
    }

    /// Append elements from a pattern such as `yyyy-MM-dd'T'HH:mm`.
    ///
    /// See the [module documentation](super) for the pattern letters.
    pub fn append_pattern(&mut self, pattern: &str) -> &mut Self {
        if let Err(error) = pattern::compile(self, pattern) {
            self.fail(error);
        }
        self
    }

    /// Open an optional section; sections nest.
    pub fn optional_start(&mut self) -> &mut Self {
        self.sections.push(Vec::new());
        self
    }

    /// Close the innermost optional section.
    pub fn optional_end(&mut self) -> &mut Self {
        match self.sections.pop() {
            Some(section) if section.is_empty() => self,
            Some(section) => self.push(Element::Composite(Composite::new(section, true))),
            None => self.fail(Error::Precondition(
                "optional_end must follow a matching optional_start",
            )),
        }
    }

    /// Number of optional sections still open.
    pub fn open_sections(&self) -> usize {
        self.sections.len()
    }

    /// Close any open sections and return the elements, or the first
    /// recorded error. The builder is left empty.
    pub(crate) fn build(&mut self) -> Result<Composite> {
        while !self.sections.is_empty() {
            self.optional_end();
        }
        let root = std::mem::take(&mut self.root);
        match self.error.take() {
            Some(error) => Err(error),
            None => Ok(Composite::new(root, false)),
        }
    }

    /// Finish with the default locale.
    pub fn to_formatter(&mut self) -> Result<Formatter> {
        self.to_formatter_with_locale(Locale::default())
    }

    pub fn to_formatter_with_locale(&mut self, locale: Locale) -> Result<Formatter> {
        Ok(Formatter::new(self.build()?, locale))
    }
}
