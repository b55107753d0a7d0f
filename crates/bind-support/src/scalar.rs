//! XML Schema simple types and their lexical forms.
//!
//! Parsing follows the XSD whitespace rules: `string` content is taken
//! verbatim, every other type is whitespace-collapsed before conversion.
//! Writing always produces the canonical form listed in the crate docs, so a
//! value written and read back compares equal: decimals keep their scale and
//! times are rendered in UTC with as many fractional digits as they carry.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeDelta, TimeZone, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

/// A leaf text value could not be read as its declared simple type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid xsd:{kind} literal {text:?}: {reason}")]
pub struct LexicalError {
    pub kind: ScalarKind,
    pub text: String,
    pub reason: String,
}

impl LexicalError {
    fn new(kind: ScalarKind, text: &str, reason: impl fmt::Display) -> Self {
        LexicalError {
            kind,
            text: text.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Binary content carried as `xsd:base64Binary`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Base64Binary(pub Vec<u8>);

impl From<Vec<u8>> for Base64Binary {
    fn from(bytes: Vec<u8>) -> Self {
        Base64Binary(bytes)
    }
}

impl AsRef<[u8]> for Base64Binary {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// The simple types the binding engine converts natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Int,
    Long,
    Double,
    Decimal,
    Boolean,
    Date,
    Time,
    DateTime,
    Base64Binary,
}

impl ScalarKind {
    /// Maps a type name in the XSD namespace to the scalar used to hold it.
    ///
    /// Restricted string and integer types share the representation of their
    /// primitive base.
    pub fn from_xsd_name(name: &str) -> Option<Self> {
        let kind = match name {
            "string" | "normalizedString" | "token" | "anyURI" | "language" | "Name"
            | "NCName" | "ID" | "IDREF" | "QName" => ScalarKind::String,
            "int" | "short" | "byte" | "unsignedShort" | "unsignedByte" => ScalarKind::Int,
            "long" | "integer" | "unsignedInt" | "nonNegativeInteger" | "positiveInteger" => {
                ScalarKind::Long
            }
            "double" | "float" => ScalarKind::Double,
            "decimal" => ScalarKind::Decimal,
            "boolean" => ScalarKind::Boolean,
            "date" => ScalarKind::Date,
            "time" => ScalarKind::Time,
            "dateTime" => ScalarKind::DateTime,
            "base64Binary" => ScalarKind::Base64Binary,
            _ => return None,
        };
        Some(kind)
    }

    /// The canonical XSD type name for this kind.
    pub fn xsd_name(&self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Int => "int",
            ScalarKind::Long => "long",
            ScalarKind::Double => "double",
            ScalarKind::Decimal => "decimal",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Date => "date",
            ScalarKind::Time => "time",
            ScalarKind::DateTime => "dateTime",
            ScalarKind::Base64Binary => "base64Binary",
        }
    }

    /// Converts leaf text into a value of this kind.
    pub fn parse(self, text: &str) -> Result<Scalar, LexicalError> {
        let collapsed = text.trim();
        let err = |reason: &dyn fmt::Display| LexicalError::new(self, text, reason);

        match self {
            ScalarKind::String => Ok(Scalar::String(text.to_string())),
            ScalarKind::Int => collapsed
                .parse::<i32>()
                .map(Scalar::Int)
                .map_err(|e| err(&e)),
            ScalarKind::Long => collapsed
                .parse::<i64>()
                .map(Scalar::Long)
                .map_err(|e| err(&e)),
            ScalarKind::Double => parse_double(collapsed)
                .map(Scalar::Double)
                .ok_or_else(|| err(&"not a double literal")),
            ScalarKind::Decimal => {
                if collapsed.is_empty()
                    || !collapsed
                        .chars()
                        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-'))
                {
                    return Err(err(&"not a decimal literal"));
                }
                Decimal::from_str(collapsed)
                    .map(Scalar::Decimal)
                    .map_err(|e| err(&e))
            }
            ScalarKind::Boolean => match collapsed {
                "true" | "1" => Ok(Scalar::Boolean(true)),
                "false" | "0" => Ok(Scalar::Boolean(false)),
                _ => Err(err(&"expected true, false, 1 or 0")),
            },
            ScalarKind::Date => parse_date(collapsed)
                .map(Scalar::Date)
                .map_err(|reason| err(&reason)),
            ScalarKind::Time => parse_time(collapsed)
                .map(Scalar::Time)
                .map_err(|reason| err(&reason)),
            ScalarKind::DateTime => parse_date_time(collapsed)
                .map(Scalar::DateTime)
                .map_err(|e| err(&e)),
            ScalarKind::Base64Binary => {
                let compact: String = collapsed.chars().filter(|c| !c.is_whitespace()).collect();
                STANDARD
                    .decode(compact.as_bytes())
                    .map(|bytes| Scalar::Base64Binary(Base64Binary(bytes)))
                    .map_err(|e| err(&e))
            }
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.xsd_name())
    }
}

/// An owned decoded leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Int(i32),
    Long(i64),
    Double(f64),
    Decimal(Decimal),
    Boolean(bool),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(DateTime<Utc>),
    Base64Binary(Base64Binary),
}

impl Scalar {
    pub fn kind(&self) -> ScalarKind {
        self.as_scalar_ref().kind()
    }

    pub fn as_scalar_ref(&self) -> ScalarRef<'_> {
        match self {
            Scalar::String(s) => ScalarRef::String(s),
            Scalar::Int(v) => ScalarRef::Int(*v),
            Scalar::Long(v) => ScalarRef::Long(*v),
            Scalar::Double(v) => ScalarRef::Double(*v),
            Scalar::Decimal(v) => ScalarRef::Decimal(*v),
            Scalar::Boolean(v) => ScalarRef::Boolean(*v),
            Scalar::Date(v) => ScalarRef::Date(*v),
            Scalar::Time(v) => ScalarRef::Time(*v),
            Scalar::DateTime(v) => ScalarRef::DateTime(*v),
            Scalar::Base64Binary(v) => ScalarRef::Base64Binary(&v.0),
        }
    }

    pub fn to_lexical(&self) -> Cow<'_, str> {
        self.as_scalar_ref().to_lexical()
    }
}

/// A borrowed leaf value, used on the write path so slots are not cloned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarRef<'a> {
    String(&'a str),
    Int(i32),
    Long(i64),
    Double(f64),
    Decimal(Decimal),
    Boolean(bool),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(DateTime<Utc>),
    Base64Binary(&'a [u8]),
}

impl<'a> ScalarRef<'a> {
    pub fn kind(&self) -> ScalarKind {
        match self {
            ScalarRef::String(_) => ScalarKind::String,
            ScalarRef::Int(_) => ScalarKind::Int,
            ScalarRef::Long(_) => ScalarKind::Long,
            ScalarRef::Double(_) => ScalarKind::Double,
            ScalarRef::Decimal(_) => ScalarKind::Decimal,
            ScalarRef::Boolean(_) => ScalarKind::Boolean,
            ScalarRef::Date(_) => ScalarKind::Date,
            ScalarRef::Time(_) => ScalarKind::Time,
            ScalarRef::DateTime(_) => ScalarKind::DateTime,
            ScalarRef::Base64Binary(_) => ScalarKind::Base64Binary,
        }
    }

    /// Renders the canonical lexical form.
    pub fn to_lexical(&self) -> Cow<'a, str> {
        match *self {
            ScalarRef::String(s) => Cow::Borrowed(s),
            ScalarRef::Int(v) => Cow::Owned(v.to_string()),
            ScalarRef::Long(v) => Cow::Owned(v.to_string()),
            ScalarRef::Double(v) => Cow::Owned(format_double(v)),
            ScalarRef::Decimal(v) => Cow::Owned(v.to_string()),
            ScalarRef::Boolean(v) => Cow::Borrowed(if v { "true" } else { "false" }),
            ScalarRef::Date(v) => Cow::Owned(v.format("%Y-%m-%d").to_string()),
            ScalarRef::Time(v) => Cow::Owned(v.format("%H:%M:%S%.fZ").to_string()),
            ScalarRef::DateTime(v) => Cow::Owned(v.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            ScalarRef::Base64Binary(bytes) => Cow::Owned(STANDARD.encode(bytes)),
        }
    }
}

fn parse_double(text: &str) -> Option<f64> {
    match text {
        "INF" | "+INF" => return Some(f64::INFINITY),
        "-INF" => return Some(f64::NEG_INFINITY),
        "NaN" => return Some(f64::NAN),
        _ => {}
    }
    // Rust accepts "inf"/"nan" spellings that XSD does not.
    if text
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return None;
    }
    text.parse::<f64>().ok()
}

fn format_double(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "INF" } else { "-INF" }.to_string()
    } else {
        value.to_string()
    }
}

/// Splits a trailing `Z` or `+hh:mm`/`-hh:mm` suffix found at or after `min_len`.
fn split_timezone(text: &str, min_len: usize) -> (&str, Option<&str>) {
    if let Some(core) = text.strip_suffix('Z') {
        return (core, Some("Z"));
    }
    if let Some(idx) = text.get(min_len..).and_then(|tail| tail.rfind(['+', '-'])) {
        let idx = idx + min_len;
        return (&text[..idx], Some(&text[idx..]));
    }
    (text, None)
}

fn parse_offset_seconds(offset: &str) -> Result<i64, String> {
    if offset == "Z" {
        return Ok(0);
    }
    let (sign, rest) = if let Some(rest) = offset.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = offset.strip_prefix('-') {
        (-1, rest)
    } else {
        return Err(format!("invalid timezone {offset:?}"));
    };
    let (hours, minutes) = rest
        .split_once(':')
        .ok_or_else(|| format!("invalid timezone {offset:?}"))?;
    let hours: i64 = hours.parse().map_err(|_| format!("invalid timezone {offset:?}"))?;
    let minutes: i64 = minutes
        .parse()
        .map_err(|_| format!("invalid timezone {offset:?}"))?;
    if hours > 14 || minutes > 59 {
        return Err(format!("timezone {offset:?} out of range"));
    }
    Ok(sign * (hours * 3600 + minutes * 60))
}

fn parse_date(text: &str) -> Result<NaiveDate, String> {
    let (core, zone) = split_timezone(text, 10);
    if let Some(zone) = zone {
        parse_offset_seconds(zone)?;
    }
    NaiveDate::parse_from_str(core, "%Y-%m-%d").map_err(|e| e.to_string())
}

fn parse_time(text: &str) -> Result<NaiveTime, String> {
    let (core, zone) = split_timezone(text, 8);
    let time = NaiveTime::parse_from_str(core, "%H:%M:%S%.f").map_err(|e| e.to_string())?;
    match zone {
        Some(zone) => {
            let offset = parse_offset_seconds(zone)?;
            Ok(time - TimeDelta::seconds(offset))
        }
        None => Ok(time),
    }
}

fn parse_date_time(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(text) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        // No timezone designator: the value is taken as UTC.
        Err(_) => NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| Utc.from_utc_datetime(&naive)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_decimal_keeps_scale() {
        let value = ScalarKind::Decimal.parse("12.50").unwrap();
        assert_eq!(value, Scalar::Decimal(Decimal::new(1250, 2)));
        assert_eq!(value.to_lexical(), "12.50");
        assert_eq!(ScalarRef::Decimal(dec!(-10.5)).to_lexical(), "-10.5");
    }

    #[test]
    fn test_decimal_rejects_exponent() {
        let err = ScalarKind::Decimal.parse("1e5").unwrap_err();
        assert_eq!(err.kind, ScalarKind::Decimal);
        assert_eq!(err.text, "1e5");
    }

    #[test]
    fn test_string_keeps_whitespace() {
        let value = ScalarKind::String.parse("  padded ").unwrap();
        assert_eq!(value, Scalar::String("  padded ".to_string()));
    }

    #[test]
    fn test_integers_are_collapsed() {
        assert_eq!(ScalarKind::Int.parse(" 42\n").unwrap(), Scalar::Int(42));
        assert_eq!(ScalarKind::Long.parse("-9000000000").unwrap(), Scalar::Long(-9_000_000_000));
        assert!(ScalarKind::Int.parse("4.2").is_err());
        assert!(ScalarKind::Int.parse("9999999999").is_err());
    }

    #[test]
    fn test_boolean_forms() {
        assert_eq!(ScalarKind::Boolean.parse("true").unwrap(), Scalar::Boolean(true));
        assert_eq!(ScalarKind::Boolean.parse("0").unwrap(), Scalar::Boolean(false));
        assert!(ScalarKind::Boolean.parse("TRUE").is_err());
        assert_eq!(ScalarRef::Boolean(false).to_lexical(), "false");
    }

    #[test]
    fn test_double_special_values() {
        assert_eq!(ScalarKind::Double.parse("INF").unwrap(), Scalar::Double(f64::INFINITY));
        assert_eq!(ScalarRef::Double(f64::NEG_INFINITY).to_lexical(), "-INF");
        assert_eq!(ScalarRef::Double(f64::NAN).to_lexical(), "NaN");
        assert!(ScalarKind::Double.parse("inf").is_err());
        assert_eq!(ScalarKind::Double.parse("1.5E2").unwrap(), Scalar::Double(150.0));
    }

    #[test]
    fn test_date_forms() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(ScalarKind::Date.parse("2024-01-15").unwrap(), Scalar::Date(date));
        assert_eq!(ScalarKind::Date.parse("2024-01-15Z").unwrap(), Scalar::Date(date));
        assert_eq!(ScalarKind::Date.parse("2024-01-15-05:00").unwrap(), Scalar::Date(date));
        assert_eq!(ScalarRef::Date(date).to_lexical(), "2024-01-15");
        assert!(ScalarKind::Date.parse("2024-13-01").is_err());
    }

    #[test]
    fn test_time_forms() {
        let time = NaiveTime::from_hms_milli_opt(10, 30, 0, 0).unwrap();
        assert_eq!(ScalarKind::Time.parse("10:30:00.000Z").unwrap(), Scalar::Time(time));
        assert_eq!(ScalarKind::Time.parse("10:30:00").unwrap(), Scalar::Time(time));
        assert_eq!(ScalarKind::Time.parse("12:30:00+02:00").unwrap(), Scalar::Time(time));
        assert_eq!(ScalarRef::Time(time).to_lexical(), "10:30:00Z");
    }

    #[test]
    fn test_sub_millisecond_precision_is_written() {
        let time = NaiveTime::from_hms_micro_opt(10, 30, 0, 123_456).unwrap();
        let text = ScalarRef::Time(time).to_lexical();
        assert_eq!(text, "10:30:00.123456Z");
        assert_eq!(ScalarKind::Time.parse(&text).unwrap(), Scalar::Time(time));

        let moment = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
            + TimeDelta::microseconds(123_456);
        let text = ScalarRef::DateTime(moment).to_lexical();
        assert_eq!(text, "2024-01-15T10:30:00.123456Z");
        assert_eq!(ScalarKind::DateTime.parse(&text).unwrap(), Scalar::DateTime(moment));
    }

    #[test]
    fn test_non_ascii_date_and_time_text() {
        let err = ScalarKind::Date.parse("2024-01-1\u{e9}").unwrap_err();
        assert_eq!(err.kind, ScalarKind::Date);
        assert_eq!(err.text, "2024-01-1\u{e9}");
        assert!(ScalarKind::Date.parse("2024-01-15\u{e9}").is_err());
        assert!(ScalarKind::Time.parse("10:30:0\u{e9}").is_err());
        assert!(ScalarKind::Time.parse("10:30:00\u{e9}").is_err());
        assert!(ScalarKind::Time.parse("10:30:00+\u{e9}").is_err());
    }

    #[test]
    fn test_date_timezone_is_validated() {
        assert!(ScalarKind::Date.parse("2024-01-15-xx").is_err());
        assert!(ScalarKind::Date.parse("2024-01-15+99:99").is_err());
        assert!(ScalarKind::Date.parse("2024-01-15+05").is_err());
        assert!(ScalarKind::Date.parse("2024-01-15+14:00").is_ok());
    }

    #[test]
    fn test_date_time_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(
            ScalarKind::DateTime.parse("2024-01-15T10:30:00.000Z").unwrap(),
            Scalar::DateTime(expected)
        );
        assert_eq!(
            ScalarKind::DateTime.parse("2024-01-15T12:30:00+02:00").unwrap(),
            Scalar::DateTime(expected)
        );
        assert_eq!(
            ScalarKind::DateTime.parse("2024-01-15T10:30:00").unwrap(),
            Scalar::DateTime(expected)
        );
        assert_eq!(
            ScalarRef::DateTime(expected).to_lexical(),
            "2024-01-15T10:30:00Z"
        );
    }

    #[test]
    fn test_base64_round_trip() {
        let value = ScalarKind::Base64Binary.parse("aGVs\nbG8=").unwrap();
        assert_eq!(value, Scalar::Base64Binary(Base64Binary(b"hello".to_vec())));
        assert_eq!(value.to_lexical(), "aGVsbG8=");
    }

    #[test]
    fn test_xsd_name_mapping() {
        assert_eq!(ScalarKind::from_xsd_name("dateTime"), Some(ScalarKind::DateTime));
        assert_eq!(ScalarKind::from_xsd_name("anyURI"), Some(ScalarKind::String));
        assert_eq!(ScalarKind::from_xsd_name("anyType"), None);
        assert_eq!(ScalarKind::Base64Binary.to_string(), "base64Binary");
    }

    #[test]
    fn test_error_message() {
        let err = ScalarKind::Int.parse("abc").unwrap_err();
        assert!(err.to_string().starts_with("invalid xsd:int literal \"abc\""));
    }
}
