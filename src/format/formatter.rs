//! Immutable, locale-bound formatters.

use super::context::{FromParsed, ParseContext, Parsed};
use super::element::{Composite, LocalizedPatterns, PrintContext};
use super::locale::{BuiltinLocales, Locale, LocaleProvider};
use crate::calendar::Calendrical;
use crate::common::{Error, ParseError, Result};
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

static BUILTIN_LOCALES: Lazy<Arc<dyn LocaleProvider>> = Lazy::new(|| Arc::new(BuiltinLocales));

/// Prints values to text and parses text back into values.
///
/// A formatter is immutable and cheap to clone; [`with_locale`](Self::with_locale)
/// and [`with_provider`](Self::with_provider) return adjusted copies that
/// share the element tree. Localized styles are compiled to patterns when
/// the formatter is created and again whenever its locale or provider changes.
///
/// ```rust
/// use calendrical::format::formatters;
/// use calendrical::OffsetDateTime;
///
/// let formatter = formatters::rfc_1123();
/// let odt: OffsetDateTime = formatter.parse("Mon, 03 Dec 2007 10:15:30 +0100")?;
/// assert_eq!(odt.to_string(), "2007-12-03T10:15:30+01:00");
/// assert_eq!(formatter.print(&odt)?, "Mon, 03 Dec 2007 10:15:30 +0100");
/// # Ok::<(), calendrical::Error>(())
/// ```
#[derive(Clone)]
pub struct Formatter {
    composite: Composite,
    locale: Locale,
    provider: Arc<dyn LocaleProvider>,
    localized: LocalizedPatterns,
}

impl Formatter {
    pub(crate) fn new(composite: Composite, locale: Locale) -> Self {
        Self::bind(composite, locale, Arc::clone(&BUILTIN_LOCALES))
    }

    fn bind(composite: Composite, locale: Locale, provider: Arc<dyn LocaleProvider>) -> Self {
        let localized = LocalizedPatterns::compile(&composite, &locale, provider.as_ref());
        Self {
            composite,
            locale,
            provider,
            localized,
        }
    }

    pub(crate) fn composite(&self) -> &Composite {
        &self.composite
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn with_locale(&self, locale: Locale) -> Self {
        Self::bind(self.composite.clone(), locale, Arc::clone(&self.provider))
    }

    /// Use `provider` for field text and localized patterns.
    pub fn with_provider(&self, provider: Arc<dyn LocaleProvider>) -> Self {
        Self::bind(self.composite.clone(), self.locale.clone(), provider)
    }

    pub fn print<C: Calendrical + ?Sized>(&self, value: &C) -> Result<String> {
        let mut out = String::new();
        self.print_to(value, &mut out)?;
        Ok(out)
    }

    /// Print into `out`. Nothing is written when printing fails.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedField`] when the value cannot supply a field,
    /// [`Error::Unprintable`] when a value does not fit its element, and
    /// [`Error::Print`] when `out` fails.
    pub fn print_to<C, W>(&self, value: &C, out: &mut W) -> Result<()>
    where
        C: Calendrical + ?Sized,
        W: fmt::Write + ?Sized,
    {
        let ctx = PrintContext {
            value: &value,
            locale: &self.locale,
            provider: self.provider.as_ref(),
            localized: Some(&self.localized),
        };
        let mut buf = String::new();
        self.composite.print(&ctx, &mut buf)?;
        out.write_str(&buf).map_err(Error::Print)
    }

    /// Parse the whole of `text` and resolve it into `T`.
    pub fn parse<T: FromParsed>(&self, text: &str) -> Result<T> {
        T::from_parsed(&self.parse_unresolved(text)?)
    }

    /// Parse the whole of `text` without resolving the fields.
    pub fn parse_unresolved(&self, text: &str) -> Result<Parsed> {
        let (parsed, end) = self.parse_partial(text, 0)?;
        if end < text.len() {
            trace!(index = end, "unparsed text found");
            return Err(ParseError::new(text, end, "unparsed text found").into());
        }
        Ok(parsed)
    }

    /// Parse from byte index `start`, returning the fields and the index
    /// after the last character consumed. Trailing text is left alone.
    pub fn parse_partial(&self, text: &str, start: usize) -> Result<(Parsed, usize)> {
        if !text.is_char_boundary(start) {
            return Err(Error::Precondition(
                "the start index must be a character boundary within the text",
            ));
        }
        let mut ctx = ParseContext::new(&self.locale, self.provider.as_ref())
            .with_localized(&self.localized);
        match self.composite.parse(&mut ctx, text, start) {
            Ok(end) => Ok((ctx.parsed, end)),
            Err(mismatch) => {
                trace!(index = mismatch.index, expected = %mismatch.expected, "parse failed");
                let reason = format!("expected {}", mismatch.expected);
                Err(ParseError::new(text, mismatch.index, reason).into())
            },
        }
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formatter")
            .field("elements", &format_args!("{}", self.composite))
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

/// The element description, as used in parse errors.
impl fmt::Display for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.composite)
    }
}
