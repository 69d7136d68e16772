pub mod categories;
pub mod expenses;
pub mod incomes;

use crate::TallyApiError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{self, Display};

pub const SUCCESS_CODE: &str = "200";

/// Envelope fields every backend response carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    #[serde(deserialize_with = "string_or_number")]
    pub returncode: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl Status {
    pub fn ok() -> Self {
        Self {
            returncode: SUCCESS_CODE.to_string(),
            message: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.returncode == SUCCESS_CODE
    }

    pub fn check(&self) -> Result<(), TallyApiError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(TallyApiError::rejected(
                self.returncode.clone(),
                self.message.as_deref(),
            ))
        }
    }
}

pub trait Envelope {
    fn status(&self) -> &Status;
}

/// Status-only response used by delete endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(flatten)]
    pub status: Status,
}

crate::macros::envelope!(StatusResponse);

/// Opaque record identifier. The backend emits both numbers and strings; both
/// are normalized to a string here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&Id> for Id {
    fn from(value: &Id) -> Self {
        value.clone()
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        string_or_number(deserializer).map(Id)
    }
}

/// Money in whole cents.
///
/// The backend speaks plain JSON decimals (`12.5`); conversion rounds to the
/// nearest cent so repeated edits never accumulate float error.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub fn from_major(value: f64) -> Self {
        Self((value * 100.0).round() as i64)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Parse user input such as `"12"`, `"12.5"` or `".75"`.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed == "." {
            return None;
        }
        let value: f64 = trimmed.parse().ok()?;
        value.is_finite().then(|| Self::from_major(value))
    }

    /// Share of `total` in percent, `0.0` when the total is zero.
    pub fn percent_of(&self, total: Amount) -> f64 {
        if total.is_zero() {
            0.0
        } else {
            self.0 as f64 / total.0 as f64 * 100.0
        }
    }
}

impl From<i64> for Amount {
    fn from(cents: i64) -> Self {
        Self(cents)
    }
}

impl From<Amount> for i64 {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl std::ops::Add for Amount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::ops::Sub for Amount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl std::ops::SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self(0), |acc, x| acc + x)
    }
}

impl<'a> std::iter::Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.fold(Self(0), |acc, x| acc + *x)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AmountVisitor;

        impl Visitor<'_> for AmountVisitor {
            type Value = Amount;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a decimal amount as number or string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
                v.checked_mul(100)
                    .map(Amount)
                    .ok_or_else(|| E::custom("amount out of range"))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
                i64::try_from(v)
                    .ok()
                    .and_then(|v| v.checked_mul(100))
                    .map(Amount)
                    .ok_or_else(|| E::custom("amount out of range"))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
                Ok(Amount::from_major(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
                Amount::parse(v).ok_or_else(|| E::custom(format!("invalid amount '{}'", v)))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Amount, E> {
                Ok(Amount::ZERO)
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}

/// Breakdown quantity: digits with an optional unit suffix (`"2"`, `"3kg"`).
/// Informational only, never multiplied into totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Quantity(String);

impl Quantity {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Empty, or one or more digits followed by letters only.
    pub fn is_valid_input(input: &str) -> bool {
        let digits = input.chars().take_while(|c| c.is_ascii_digit()).count();
        if input.is_empty() {
            return true;
        }
        digits > 0 && input[digits..].chars().all(|c| c.is_ascii_alphabetic())
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self("1".to_string())
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        string_or_number(deserializer).map(Quantity)
    }
}

/// Date filter mode of the expense list request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateType {
    #[default]
    All,
    Custom,
}

pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrNumber;

    impl Visitor<'_> for StringOrNumber {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string or a number")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(StringOrNumber)
}

pub(crate) fn vec_or_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a plain `YYYY-MM-DD` date or a datetime, keeping the calendar date
/// as written.
pub(crate) fn lenient_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientDate;

    impl Visitor<'_> for LenientDate {
        type Value = NaiveDate;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a date or RFC 3339 datetime")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<NaiveDate, E> {
            let v = v.trim();
            NaiveDate::parse_from_str(v, "%Y-%m-%d")
                .ok()
                .or_else(|| DateTime::parse_from_rfc3339(v).ok().map(|dt| dt.date_naive()))
                .or_else(|| {
                    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                        .iter()
                        .find_map(|fmt| NaiveDateTime::parse_from_str(v, fmt).ok())
                        .map(|dt| dt.date())
                })
                .ok_or_else(|| E::custom(format!("invalid date '{}'", v)))
        }
    }

    deserializer.deserialize_str(LenientDate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_accepts_numbers_and_strings() {
        let ids: Vec<Id> = serde_json::from_str(r#"[7, "abc", "12"]"#).unwrap();
        assert_eq!(ids, vec![Id::new("7"), Id::new("abc"), Id::new("12")]);
        assert_eq!(serde_json::to_string(&Id::new("7")).unwrap(), r#""7""#);
    }

    #[test]
    fn test_amount_rounds_to_cents() {
        assert_eq!(Amount::parse("10.005"), Some(Amount::from_cents(1001)));
        assert_eq!(Amount::parse(".5"), Some(Amount::from_cents(50)));
        assert_eq!(Amount::parse(""), None);
        assert_eq!(Amount::parse("abc"), None);
        assert_eq!(Amount::from_major(0.1) + Amount::from_major(0.2), Amount::from_cents(30));
    }

    #[test]
    fn test_amount_wire_format() {
        let amounts: Vec<Amount> = serde_json::from_str(r#"[12, 12.5, "3.25", null]"#).unwrap();
        assert_eq!(
            amounts,
            vec![
                Amount::from_cents(1200),
                Amount::from_cents(1250),
                Amount::from_cents(325),
                Amount::ZERO
            ]
        );
        assert_eq!(serde_json::to_string(&Amount::from_cents(1250)).unwrap(), "12.5");
    }

    #[test]
    fn test_amount_rejects_out_of_range_integers() {
        let err = serde_json::from_str::<Amount>(&u64::MAX.to_string()).unwrap_err();
        assert!(err.to_string().contains("amount out of range"));
        let err = serde_json::from_str::<Amount>(&i64::MAX.to_string()).unwrap_err();
        assert!(err.to_string().contains("amount out of range"));
        let err = serde_json::from_str::<Amount>(&i64::MIN.to_string()).unwrap_err();
        assert!(err.to_string().contains("amount out of range"));
    }

    #[test]
    fn test_lenient_date_formats() {
        #[derive(Deserialize)]
        struct Dated {
            #[serde(deserialize_with = "lenient_date")]
            date: NaiveDate,
        }

        let expected = NaiveDate::from_ymd_opt(2025, 4, 15).unwrap();
        for raw in [
            "2025-04-15",
            "2025-04-15T00:00:00.000Z",
            "2025-04-15T18:30:00+02:00",
            "2025-04-15T09:12:44",
            "2025-04-15 09:12:44.120",
        ] {
            let json = format!(r#"{{"date": "{}"}}"#, raw);
            let parsed: Dated = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed.date, expected, "{}", raw);
        }
        assert!(serde_json::from_str::<Dated>(r#"{"date": "15/04/2025"}"#).is_err());
    }

    #[test]
    fn test_amount_display() {
        assert_eq!(Amount::from_cents(123456).to_string(), "1234.56");
        assert_eq!(Amount::from_cents(-5).to_string(), "-0.05");
    }

    #[test]
    fn test_percent_of_zero_total() {
        assert_eq!(Amount::from_cents(100).percent_of(Amount::ZERO), 0.0);
        assert_eq!(Amount::from_cents(25).percent_of(Amount::from_cents(100)), 25.0);
    }

    #[test]
    fn test_quantity_input() {
        assert!(Quantity::is_valid_input(""));
        assert!(Quantity::is_valid_input("2"));
        assert!(Quantity::is_valid_input("3kg"));
        assert!(!Quantity::is_valid_input("kg"));
        assert!(!Quantity::is_valid_input("3k2"));
        let q: Quantity = serde_json::from_str("4").unwrap();
        assert_eq!(q.as_str(), "4");
    }

    #[test]
    fn test_status_check() {
        let status: Status = serde_json::from_str(r#"{"returncode": 200}"#).unwrap();
        assert!(status.check().is_ok());

        let status: Status =
            serde_json::from_str(r#"{"returncode": "400", "message": "Bad input"}"#).unwrap();
        let err = status.check().unwrap_err();
        assert_eq!(err.to_string(), "Bad input");
    }
}
