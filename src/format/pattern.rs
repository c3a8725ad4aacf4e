//! Compilation of pattern strings into builder calls.

use super::builder::FormatterBuilder;
use super::element::SignStyle;
use super::locale::TextStyle;
use crate::calendar::Field;
use crate::common::{Error, Result};

/// Century base used by two-letter years.
const REDUCED_YEAR_BASE: i64 = 2000;

fn invalid(pattern: &str, reason: impl Into<String>) -> Error {
    Error::InvalidPattern {
        pattern: pattern.to_string(),
        reason: reason.into(),
    }
}

pub(crate) fn compile(builder: &mut FormatterBuilder, pattern: &str) -> Result<()> {
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            'A'..='Z' | 'a'..='z' => {
                let mut count = 1;
                while chars.next_if_eq(&c).is_some() {
                    count += 1;
                }
                letter(builder, pattern, c, count)?;
            },
            '\'' => {
                let mut literal = String::new();
                loop {
                    match chars.next() {
                        Some('\'') if chars.next_if_eq(&'\'').is_some() => literal.push('\''),
                        Some('\'') => break,
                        Some(other) => literal.push(other),
                        None => return Err(invalid(pattern, "unterminated quoted literal")),
                    }
                }
                if literal.is_empty() {
                    // '' outside a literal is a quote character
                    builder.append_char('\'');
                } else {
                    builder.append_literal(&literal);
                }
            },
            '[' => {
                builder.optional_start();
            },
            ']' => {
                if builder.open_sections() == 0 {
                    return Err(invalid(pattern, "']' without a matching '['"));
                }
                builder.optional_end();
            },
            other => {
                builder.append_char(other);
            },
        }
    }
    Ok(())
}

fn letter(builder: &mut FormatterBuilder, pattern: &str, c: char, count: usize) -> Result<()> {
    let too_many = || {
        let letters = c.to_string().repeat(count);
        invalid(pattern, format!("too many pattern letters: {letters}"))
    };
    let numeric = |builder: &mut FormatterBuilder, field: Field, max: usize| -> Result<()> {
        match count {
            1 => builder.append_value(field),
            n if n <= max => builder.append_value_fixed(field, n as u8),
            _ => return Err(too_many()),
        };
        Ok(())
    };
    match c {
        'y' | 'Y' => {
            let field = if c == 'y' { Field::Year } else { Field::WeekBasedYear };
            match count {
                1 => builder.append_value(field),
                2 => builder.append_value_reduced(field, 2, REDUCED_YEAR_BASE),
                3 => builder.append_value_with(field, 3, 10, SignStyle::Normal),
                n if n <= 10 => {
                    builder.append_value_with(field, n as u8, 10, SignStyle::ExceedsPad)
                },
                _ => return Err(too_many()),
            };
        },
        'M' => match count {
            1 | 2 => numeric(builder, Field::MonthOfYear, 2)?,
            3 => {
                builder.append_text(Field::MonthOfYear, TextStyle::Short);
            },
            4 => {
                builder.append_text(Field::MonthOfYear, TextStyle::Full);
            },
            _ => return Err(too_many()),
        },
        'E' => match count {
            1..=3 => {
                builder.append_text(Field::DayOfWeek, TextStyle::Short);
            },
            4 => {
                builder.append_text(Field::DayOfWeek, TextStyle::Full);
            },
            _ => return Err(too_many()),
        },
        'a' => {
            if count > 1 {
                return Err(too_many());
            }
            builder.append_text(Field::AmPmOfDay, TextStyle::Short);
        },
        'D' => numeric(builder, Field::DayOfYear, 3)?,
        'd' => numeric(builder, Field::DayOfMonth, 2)?,
        'w' => numeric(builder, Field::WeekOfWeekBasedYear, 2)?,
        'e' => numeric(builder, Field::DayOfWeek, 1)?,
        'H' => numeric(builder, Field::HourOfDay, 2)?,
        'k' => numeric(builder, Field::ClockHourOfDay, 2)?,
        'K' => numeric(builder, Field::HourOfAmPm, 2)?,
        'h' => numeric(builder, Field::ClockHourOfAmPm, 2)?,
        'm' => numeric(builder, Field::MinuteOfHour, 2)?,
        's' => numeric(builder, Field::SecondOfMinute, 2)?,
        'n' => numeric(builder, Field::NanoOfSecond, 9)?,
        'S' => {
            if count > 9 {
                return Err(too_many());
            }
            builder.append_fraction_digits(Field::NanoOfSecond, count as u8);
        },
        'Z' => {
            match count {
                1 => builder.append_offset("Z", false, false),
                2 => builder.append_offset("Z", true, false),
                _ => builder.append_offset_id(),
            };
        },
        'z' => {
            builder.append_zone_id();
        },
        _ => return Err(invalid(pattern, format!("unknown pattern letter '{c}'"))),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::calendar::{OffsetDateTime, ZoneOffset};
    use crate::common::Error;
    use crate::format::FormatterBuilder;

    fn describe(pattern: &str) -> String {
        FormatterBuilder::new()
            .append_pattern(pattern)
            .to_formatter()
            .unwrap()
            .to_string()
    }

    fn reason(pattern: &str) -> String {
        match FormatterBuilder::new().append_pattern(pattern).to_formatter() {
            Err(Error::InvalidPattern { reason, .. }) => reason,
            other => panic!("expected an invalid pattern, got {other:?}"),
        }
    }

    #[test]
    fn letters() {
        assert_eq!(
            describe("yyyy-MM-dd"),
            "Value(Year,4,10,ExceedsPad)'-'Value(MonthOfYear,2)'-'Value(DayOfMonth,2)"
        );
        assert_eq!(describe("yy"), "ReducedValue(Year,2,2000)");
        assert_eq!(
            describe("EEE, d MMM"),
            "Text(DayOfWeek,Short)','' 'Value(DayOfMonth)' 'Text(MonthOfYear,Short)"
        );
        assert_eq!(
            describe("HH:mm:ss.SSS"),
            concat!(
                "Value(HourOfDay,2)':'Value(MinuteOfHour,2)':'Value(SecondOfMinute,2)",
                "'.'Fraction(NanoOfSecond,3,3,false)"
            )
        );
        assert_eq!(describe("ZZZz"), "Offset('Z',true,true)ZoneId()");
    }

    #[test]
    fn quotes_and_sections() {
        assert_eq!(describe("'at' h"), "'at'' 'Value(ClockHourOfAmPm)");
        assert_eq!(describe("''h''"), "''Value(ClockHourOfAmPm)''");
        assert_eq!(describe("'o''clock'"), "'o''clock'");
        assert_eq!(describe("HH[:mm]"), "Value(HourOfDay,2)[':'Value(MinuteOfHour,2)]");
        assert_eq!(describe("HH[:mm"), "Value(HourOfDay,2)[':'Value(MinuteOfHour,2)]");
    }

    #[test]
    fn rejects_bad_patterns() {
        assert_eq!(reason("yyyy-MMMMM"), "too many pattern letters: MMMMM");
        assert_eq!(reason("HHH"), "too many pattern letters: HHH");
        assert_eq!(reason("q"), "unknown pattern letter 'q'");
        assert_eq!(reason("HH]"), "']' without a matching '['");
        assert_eq!(reason("'abc"), "unterminated quoted literal");
    }

    #[test]
    fn pattern_formatter_round_trips() {
        let formatter = FormatterBuilder::new()
            .append_pattern("EEEE d MMMM yyyy HH:mm:ss.SSS ZZ")
            .to_formatter()
            .unwrap();
        let offset = ZoneOffset::of_hours(-5).unwrap();
        let odt = OffsetDateTime::of(2007, 12, 3, 10, 15, 30, 250_000_000, offset).unwrap();
        let text = formatter.print(&odt).unwrap();
        assert_eq!(text, "Monday 3 December 2007 10:15:30.250 -05:00");
        assert_eq!(formatter.parse::<OffsetDateTime>(&text).unwrap(), odt);
    }
}
