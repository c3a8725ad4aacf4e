//! Locales and the text/pattern data behind localized formatting.
//!
//! The built-in table covers a handful of CLDR locales: month and weekday
//! names, AM/PM markers, and the full/long/medium/short date, time and
//! date-time glue patterns. Callers needing more plug in their own
//! [`LocaleProvider`].

use crate::calendar::Field;
use phf::phf_map;
use std::borrow::Cow;
use std::fmt;

/// A BCP 47 style language tag such as `en-US`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(Cow<'static, str>);

impl Locale {
    pub const ENGLISH: Locale = Locale(Cow::Borrowed("en"));
    pub const US: Locale = Locale(Cow::Borrowed("en-US"));
    pub const UK: Locale = Locale(Cow::Borrowed("en-GB"));
    pub const GERMAN: Locale = Locale(Cow::Borrowed("de"));
    pub const FRENCH: Locale = Locale(Cow::Borrowed("fr"));
    pub const SPANISH: Locale = Locale(Cow::Borrowed("es"));
    pub const JAPANESE: Locale = Locale(Cow::Borrowed("ja"));

    /// Create a locale from a tag; `_` separators are normalised to `-`.
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        let tag = tag.into();
        if tag.contains('_') {
            Self(Cow::Owned(tag.replace('_', "-")))
        } else {
            Self(tag)
        }
    }

    pub fn tag(&self) -> &str {
        &self.0
    }

    /// The primary language subtag.
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::ENGLISH
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Length of a localized date or time style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatStyle {
    Full,
    Long,
    Medium,
    Short,
}

impl FormatStyle {
    fn index(self) -> usize {
        match self {
            Self::Full => 0,
            Self::Long => 1,
            Self::Medium => 2,
            Self::Short => 3,
        }
    }
}

/// Length of field text such as month names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextStyle {
    /// `December`, `Monday`
    Full,
    /// `Dec`, `Mon`
    Short,
}

/// Source of localized field text and style patterns.
///
/// Patterns use the letters understood by
/// [`FormatterBuilder::append_pattern`](super::FormatterBuilder::append_pattern).
pub trait LocaleProvider: Send + Sync + fmt::Debug {
    /// Text for a field value, or `None` when the field has no text form.
    fn text(
        &self,
        locale: &Locale,
        field: Field,
        value: i64,
        style: TextStyle,
    ) -> Option<Cow<'static, str>>;

    fn date_pattern(&self, locale: &Locale, style: FormatStyle) -> Cow<'static, str>;

    fn time_pattern(&self, locale: &Locale, style: FormatStyle) -> Cow<'static, str>;

    /// Pattern joining a date (`{1}`) and a time (`{0}`).
    fn date_time_pattern(&self, locale: &Locale, style: FormatStyle) -> Cow<'static, str>;

    /// The complete pattern for a date style, a time style, or both.
    ///
    /// When both are given the date style selects the glue pattern.
    fn localized_pattern(
        &self,
        locale: &Locale,
        date_style: Option<FormatStyle>,
        time_style: Option<FormatStyle>,
    ) -> Option<String> {
        match (date_style, time_style) {
            (Some(date), Some(time)) => Some(
                self.date_time_pattern(locale, date)
                    .replace("{1}", &self.date_pattern(locale, date))
                    .replace("{0}", &self.time_pattern(locale, time)),
            ),
            (Some(date), None) => Some(self.date_pattern(locale, date).into_owned()),
            (None, Some(time)) => Some(self.time_pattern(locale, time).into_owned()),
            (None, None) => None,
        }
    }
}

/// Field text and patterns for one locale.
#[derive(Debug)]
pub struct LocaleData {
    pub months: [&'static str; 12],
    pub months_short: [&'static str; 12],
    /// Monday first
    pub weekdays: [&'static str; 7],
    pub weekdays_short: [&'static str; 7],
    pub am_pm: [&'static str; 2],
    /// Full, long, medium, short
    pub date_patterns: [&'static str; 4],
    pub time_patterns: [&'static str; 4],
    pub date_time_patterns: [&'static str; 4],
}

impl LocaleData {
    pub fn text(&self, field: Field, value: i64, style: TextStyle) -> Option<&'static str> {
        let index = usize::try_from(value).ok()?;
        let short = style == TextStyle::Short;
        match field {
            Field::MonthOfYear => {
                let names = if short { &self.months_short } else { &self.months };
                names.get(index.checked_sub(1)?).copied()
            },
            Field::DayOfWeek => {
                let names = if short { &self.weekdays_short } else { &self.weekdays };
                names.get(index.checked_sub(1)?).copied()
            },
            Field::AmPmOfDay => self.am_pm.get(index).copied(),
            _ => None,
        }
    }
}

static EN: LocaleData = LocaleData {
    months: [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ],
    months_short: [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
    weekdays: [
        "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
    ],
    weekdays_short: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
    am_pm: ["AM", "PM"],
    date_patterns: ["EEEE, MMMM d, y", "MMMM d, y", "MMM d, y", "M/d/yy"],
    time_patterns: ["h:mm:ss a z", "h:mm:ss a ZZZ", "h:mm:ss a", "h:mm a"],
    date_time_patterns: ["{1} 'at' {0}", "{1} 'at' {0}", "{1}, {0}", "{1}, {0}"],
};

static EN_GB: LocaleData = LocaleData {
    am_pm: ["am", "pm"],
    date_patterns: ["EEEE, d MMMM y", "d MMMM y", "d MMM y", "dd/MM/y"],
    time_patterns: ["HH:mm:ss z", "HH:mm:ss ZZZ", "HH:mm:ss", "HH:mm"],
    ..EN
};

static DE: LocaleData = LocaleData {
    months: [
        "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September",
        "Oktober", "November", "Dezember",
    ],
    months_short: [
        "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.", "Nov.",
        "Dez.",
    ],
    weekdays: [
        "Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag", "Sonntag",
    ],
    weekdays_short: ["Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa.", "So."],
    am_pm: ["AM", "PM"],
    date_patterns: ["EEEE, d. MMMM y", "d. MMMM y", "dd.MM.y", "dd.MM.yy"],
    time_patterns: ["HH:mm:ss z", "HH:mm:ss ZZZ", "HH:mm:ss", "HH:mm"],
    date_time_patterns: ["{1} 'um' {0}", "{1} 'um' {0}", "{1}, {0}", "{1}, {0}"],
};

static FR: LocaleData = LocaleData {
    months: [
        "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
        "octobre", "novembre", "décembre",
    ],
    months_short: [
        "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
        "déc.",
    ],
    weekdays: [
        "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
    ],
    weekdays_short: ["lun.", "mar.", "mer.", "jeu.", "ven.", "sam.", "dim."],
    am_pm: ["AM", "PM"],
    date_patterns: ["EEEE d MMMM y", "d MMMM y", "d MMM y", "dd/MM/y"],
    time_patterns: ["HH:mm:ss z", "HH:mm:ss ZZZ", "HH:mm:ss", "HH:mm"],
    date_time_patterns: ["{1} 'à' {0}", "{1} 'à' {0}", "{1} {0}", "{1} {0}"],
};

static ES: LocaleData = LocaleData {
    months: [
        "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre",
        "octubre", "noviembre", "diciembre",
    ],
    months_short: [
        "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
    ],
    weekdays: [
        "lunes", "martes", "miércoles", "jueves", "viernes", "sábado", "domingo",
    ],
    weekdays_short: ["lun", "mar", "mié", "jue", "vie", "sáb", "dom"],
    am_pm: ["a. m.", "p. m."],
    date_patterns: [
        "EEEE, d 'de' MMMM 'de' y",
        "d 'de' MMMM 'de' y",
        "d MMM y",
        "d/M/yy",
    ],
    time_patterns: ["H:mm:ss z", "H:mm:ss ZZZ", "H:mm:ss", "H:mm"],
    date_time_patterns: ["{1}, {0}", "{1}, {0}", "{1}, {0}", "{1}, {0}"],
};

static JA: LocaleData = LocaleData {
    months: [
        "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
    ],
    months_short: [
        "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
    ],
    weekdays: [
        "月曜日", "火曜日", "水曜日", "木曜日", "金曜日", "土曜日", "日曜日",
    ],
    weekdays_short: ["月", "火", "水", "木", "金", "土", "日"],
    am_pm: ["午前", "午後"],
    date_patterns: ["y年M月d日EEEE", "y年M月d日", "y/MM/dd", "y/MM/dd"],
    time_patterns: ["H時mm分ss秒 z", "H:mm:ss ZZZ", "H:mm:ss", "H:mm"],
    date_time_patterns: ["{1} {0}", "{1} {0}", "{1} {0}", "{1} {0}"],
};

static LOCALES: phf::Map<&'static str, &'static LocaleData> = phf_map! {
    "en" => &EN,
    "en-US" => &EN,
    "en-GB" => &EN_GB,
    "de" => &DE,
    "fr" => &FR,
    "es" => &ES,
    "ja" => &JA,
};

/// The built-in locale table.
///
/// Lookup tries the full tag, then its language, then falls back to English.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinLocales;

impl BuiltinLocales {
    pub fn data(locale: &Locale) -> &'static LocaleData {
        LOCALES
            .get(locale.tag())
            .or_else(|| LOCALES.get(locale.language()))
            .copied()
            .unwrap_or(&EN)
    }

    /// Whether the table has data for the tag or its language.
    pub fn supports(locale: &Locale) -> bool {
        LOCALES.contains_key(locale.tag()) || LOCALES.contains_key(locale.language())
    }
}

impl LocaleProvider for BuiltinLocales {
    fn text(
        &self,
        locale: &Locale,
        field: Field,
        value: i64,
        style: TextStyle,
    ) -> Option<Cow<'static, str>> {
        Self::data(locale).text(field, value, style).map(Cow::Borrowed)
    }

    fn date_pattern(&self, locale: &Locale, style: FormatStyle) -> Cow<'static, str> {
        Cow::Borrowed(Self::data(locale).date_patterns[style.index()])
    }

    fn time_pattern(&self, locale: &Locale, style: FormatStyle) -> Cow<'static, str> {
        Cow::Borrowed(Self::data(locale).time_patterns[style.index()])
    }

    fn date_time_pattern(&self, locale: &Locale, style: FormatStyle) -> Cow<'static, str> {
        Cow::Borrowed(Self::data(locale).date_time_patterns[style.index()])
    }
}
