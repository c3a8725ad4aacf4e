use crate::calendar::{
    Field, OffsetDate, OffsetDateTime, OffsetTime, TimeZone, ZoneOffset, ZonedDateTime,
};
use crate::common::Error;
use crate::format::{Parsed, formatters};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

fn hours(h: i32) -> ZoneOffset {
    ZoneOffset::of_hours(h).expect("valid offset")
}

fn sample() -> OffsetDateTime {
    OffsetDateTime::of(2007, 12, 3, 10, 15, 30, 0, hours(1)).expect("valid date-time")
}

fn parse_index(result: Result<impl std::fmt::Debug, Error>) -> usize {
    match result {
        Err(Error::Parse(err)) => err.index(),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn offset_date_time_fields() {
    let text = "2007-12-03T10:15:30+01:00";
    let parsed: Parsed = formatters::iso_offset_date_time()
        .parse_unresolved(text)
        .expect("parse");
    assert_eq!(parsed.get(Field::Year), Some(2007));
    assert_eq!(parsed.get(Field::MonthOfYear), Some(12));
    assert_eq!(parsed.get(Field::DayOfMonth), Some(3));
    assert_eq!(parsed.get(Field::HourOfDay), Some(10));
    assert_eq!(parsed.get(Field::MinuteOfHour), Some(15));
    assert_eq!(parsed.get(Field::SecondOfMinute), Some(30));
    assert_eq!(parsed.get(Field::NanoOfSecond), None);
    assert_eq!(parsed.offset(), Some(hours(1)));

    let odt: OffsetDateTime = formatters::iso_offset_date_time().parse(text).expect("resolve");
    assert_eq!(odt, sample());
    assert_eq!(formatters::iso_offset_date_time().print(&odt).expect("print"), text);
}

#[test]
fn case_insensitive_iso_letters() {
    let odt: OffsetDateTime = formatters::iso_offset_date_time()
        .parse("2007-12-03t10:15:30z")
        .expect("lower-case letters");
    assert_eq!(odt.offset(), ZoneOffset::UTC);
    assert_eq!(odt.to_string(), "2007-12-03T10:15:30Z");
}

#[test]
fn local_time_precision() {
    let f = formatters::iso_local_time();
    let time = |h, m, s, n| NaiveTime::from_hms_nano_opt(h, m, s, n).expect("valid time");
    assert_eq!(f.print(&time(10, 15, 0, 0)).expect("print"), "10:15:00");
    assert_eq!(f.print(&time(10, 15, 30, 500_000_000)).expect("print"), "10:15:30.5");
    assert_eq!(f.print(&time(10, 15, 30, 123_456_789)).expect("print"), "10:15:30.123456789");
    assert_eq!(f.print(&time(10, 15, 30, 1_000)).expect("print"), "10:15:30.000001");

    assert_eq!(f.parse::<NaiveTime>("10:15").expect("parse"), time(10, 15, 0, 0));
    assert_eq!(f.parse::<NaiveTime>("10:15:30.12").expect("parse"), time(10, 15, 30, 120_000_000));
    assert_eq!(parse_index(f.parse::<NaiveTime>("10:15:30.1234567891")), 18);
    assert_eq!(parse_index(f.parse::<NaiveTime>("1:15")), 0);
}

#[test]
fn wide_and_negative_years() {
    let f = formatters::iso_local_date();
    let date = |y| NaiveDate::from_ymd_opt(y, 1, 2).expect("valid date");
    assert_eq!(f.print(&date(-1)).expect("print"), "-0001-01-02");
    assert_eq!(f.print(&date(0)).expect("print"), "0000-01-02");
    assert_eq!(f.print(&date(12345)).expect("print"), "+12345-01-02");
    assert_eq!(f.parse::<NaiveDate>("+12345-01-02").expect("parse"), date(12345));
    assert_eq!(f.parse::<NaiveDate>("-0001-01-02").expect("parse"), date(-1));
    assert_eq!(parse_index(f.parse::<NaiveDate>("12345-01-02")), 0);
    assert_eq!(parse_index(f.parse::<NaiveDate>("+2007-01-02")), 0);
}

#[test]
fn out_of_range_fields_fail_resolution() {
    let err = formatters::iso_local_date()
        .parse::<NaiveDate>("2007-13-01")
        .unwrap_err();
    assert!(matches!(
        err,
        Error::FieldOutOfRange {
            field: Field::MonthOfYear,
            value: 13,
            ..
        }
    ));
    let err = formatters::iso_local_date()
        .parse::<NaiveDate>("2007-02-30")
        .unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidForContext {
            field: Field::DayOfMonth,
            ..
        }
    ));
}

#[test]
fn ordinal_and_week_dates() {
    let odt = sample();
    assert_eq!(
        formatters::iso_ordinal_date().print(&odt).expect("print"),
        "2007-337+01:00[UTC+01:00]"
    );
    assert_eq!(
        formatters::iso_week_date().print(&odt).expect("print"),
        "2007-W49-1+01:00[UTC+01:00]"
    );
    let expected = NaiveDate::from_ymd_opt(2007, 12, 3).expect("valid date");
    let ordinal: NaiveDate = formatters::iso_ordinal_date().parse("2007-337").expect("parse");
    assert_eq!(ordinal, expected);
    let week: NaiveDate = formatters::iso_week_date().parse("2007-w49-1").expect("parse");
    assert_eq!(week, expected);
    // week 1 of 2008 starts in 2007
    assert_eq!(
        formatters::iso_week_date().parse::<NaiveDate>("2008-W01-1").expect("parse"),
        NaiveDate::from_ymd_opt(2007, 12, 31).expect("valid date")
    );
    assert!(formatters::iso_ordinal_date().parse::<NaiveDate>("2007-366").is_err());
}

#[test]
fn basic_iso_date() {
    let f = formatters::basic_iso_date();
    let expected = NaiveDate::from_ymd_opt(2007, 12, 3).expect("valid date");
    assert_eq!(f.parse::<NaiveDate>("20071203").expect("parse"), expected);
    let parsed = f.parse_unresolved("20071203+0100").expect("parse");
    assert_eq!(parsed.offset(), Some(hours(1)));
    assert_eq!(f.print(&sample()).expect("print"), "20071203+0100[UTC+01:00]");
    assert_eq!(
        f.print(&sample().with_offset_same_local(ZoneOffset::UTC)).expect("print"),
        "20071203Z[UTC]"
    );
    assert_eq!(parse_index(f.parse::<NaiveDate>("+123450101")), 0);
    assert!(matches!(
        f.print(&NaiveDate::from_ymd_opt(12345, 1, 1).expect("valid date")),
        Err(Error::Unprintable { value: 12345, .. })
    ));
}

#[test]
fn rfc_1123() {
    let f = formatters::rfc_1123();
    let odt =
        OffsetDateTime::of(2008, 6, 3, 11, 5, 30, 0, ZoneOffset::UTC).expect("valid date-time");
    assert_eq!(f.print(&odt).expect("print"), "Tue, 03 Jun 2008 11:05:30 Z");
    assert_eq!(f.print(&sample()).expect("print"), "Mon, 03 Dec 2007 10:15:30 +0100");

    let parsed: OffsetDateTime = f.parse("Mon, 03 Dec 2007 10:15:30 +0100").expect("parse");
    assert_eq!(parsed, sample());
    assert!(matches!(
        f.parse::<OffsetDateTime>("Tue, 03 Dec 2007 10:15:30 +0100"),
        Err(Error::InvalidForContext {
            field: Field::DayOfWeek,
            ..
        })
    ));
    assert_eq!(parse_index(f.parse::<OffsetDateTime>("mon, 03 Dec 2007 10:15:30 +0100")), 0);
    assert_eq!(parse_index(f.parse::<OffsetDateTime>("Mon, 03 Dec 12007 10:15:30 +0100")), 16);
}

#[test]
fn offset_and_zone_are_optional_in_date_time() {
    let f = formatters::iso_date_time();
    let local: NaiveDateTime = f.parse("2007-12-03T10:15:30").expect("parse");
    assert_eq!(local, sample().local_date_time());
    assert_eq!(
        f.parse::<OffsetDateTime>("2007-12-03T10:15:30"),
        Err(Error::UnsupportedField { field: "OffsetSeconds" })
    );
    assert_eq!(f.parse::<OffsetDateTime>("2007-12-03T10:15:30+01:00").expect("parse"), sample());
    let zoned: ZonedDateTime = f.parse("2007-12-03T10:15:30+01:00[UTC+01:00]").expect("parse");
    assert_eq!(zoned.zone(), TimeZone::fixed(hours(1)));
}

#[test]
fn zoned_requires_zone() {
    let f = formatters::iso_zoned_date_time();
    let zoned = sample().at_zone_same_instant(TimeZone::fixed(hours(1))).expect("attach");
    let text = f.print(&zoned).expect("print");
    assert_eq!(text, "2007-12-03T10:15:30+01:00[UTC+01:00]");
    assert_eq!(f.parse::<ZonedDateTime>(&text).expect("parse"), zoned);
    assert_eq!(parse_index(f.parse::<ZonedDateTime>("2007-12-03T10:15:30+01:00")), 25);
}

#[test]
fn printing_never_omits_fields() {
    let date = NaiveDate::from_ymd_opt(2007, 12, 3).expect("valid date");
    assert_eq!(
        formatters::iso_date().print(&date),
        Err(Error::UnsupportedField { field: "OffsetSeconds" })
    );
    assert_eq!(formatters::iso_local_date().print(&date).expect("print"), "2007-12-03");
    assert_eq!(
        formatters::iso_offset_time().print(&sample()).expect("print"),
        "10:15:30+01:00"
    );
    assert_eq!(
        formatters::iso_offset_date().print(&sample()).expect("print"),
        "2007-12-03+01:00"
    );
}

#[test]
fn date_and_time_forms_parse_to_offset_halves() {
    let odt = sample();
    let date = odt.to_offset_date();
    let time = odt.to_offset_time();
    let cases = [
        (formatters::iso_offset_date(), "2007-12-03+01:00"),
        (formatters::iso_date(), "2007-12-03+01:00[UTC+01:00]"),
        (formatters::iso_ordinal_date(), "2007-337+01:00[UTC+01:00]"),
        (formatters::iso_week_date(), "2007-W49-1+01:00[UTC+01:00]"),
        (formatters::basic_iso_date(), "20071203+0100[UTC+01:00]"),
    ];
    for (formatter, expected) in cases {
        assert_eq!(formatter.print(&date).expect("print"), expected);
        assert_eq!(formatter.parse::<OffsetDate>(expected).expect("parse"), date, "{expected}");
    }
    for (formatter, expected) in [
        (formatters::iso_offset_time(), "10:15:30+01:00"),
        (formatters::iso_time(), "10:15:30+01:00[UTC+01:00]"),
    ] {
        assert_eq!(formatter.print(&time).expect("print"), expected);
        assert_eq!(formatter.parse::<OffsetTime>(expected).expect("parse"), time, "{expected}");
    }

    // the halves do not carry the other half's fields
    assert_eq!(
        formatters::iso_offset_date().parse::<OffsetDateTime>("2007-12-03+01:00"),
        Err(Error::UnsupportedField { field: "HourOfDay" })
    );
    assert_eq!(
        formatters::iso_time().parse::<OffsetTime>("10:15:30"),
        Err(Error::UnsupportedField { field: "OffsetSeconds" })
    );
}

#[cfg(feature = "tzdb")]
#[test]
fn region_zones() {
    let paris = TimeZone::of("Europe/Paris").expect("known zone");
    let text = "2007-12-03T10:15:30+01:00[Europe/Paris]";
    let zoned: ZonedDateTime = formatters::iso_zoned_date_time().parse(text).expect("parse");
    assert_eq!(zoned.zone(), paris);
    assert_eq!(zoned.offset_date_time(), sample());
    assert_eq!(formatters::iso_date_time().print(&zoned).expect("print"), text);
    assert_eq!(zoned.to_string(), text);

    // summer time is +02:00 in Paris
    assert!(matches!(
        formatters::iso_zoned_date_time()
            .parse::<ZonedDateTime>("2007-07-03T10:15:30+01:00[Europe/Paris]"),
        Err(Error::ZoneResolution(_))
    ));
    assert!(formatters::iso_zoned_date_time()
        .parse::<ZonedDateTime>("2007-12-03T10:15:30+01:00[Mars/Olympus]")
        .is_err());
}
