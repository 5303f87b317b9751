//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing service prices as floats:                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    Every amount is rounded ONCE, when the price is captured from the   │
//! │    form (half-up, 2 decimals). After that, sums and products are exact │
//! │    integer arithmetic and never need re-rounding.                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use farol_core::money::Money;
//!
//! let price = Money::parse("120,00").unwrap();
//! let parts = Money::from_cents(2500) * 4u32;
//! assert_eq!((price + parts).to_string(), "R$ 220,00");
//! ```
//!
//! ## Wire Format
//! Internally `Money` serializes as centavos. The backend speaks decimal
//! numbers in reais (and returns them as strings), so API payloads use the
//! [`reais`] serde adapter instead.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in centavos (1/100 of a real).
///
/// ## Design Decisions
/// - **i64 (signed)**: a final total may go negative when the discount
///   exceeds the subtotal, and that value must be representable
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Saturating arithmetic**: amounts are bounded by [`MAX_CENTS`] when
///   read, and sums or products never wrap or panic
///
/// ## Where Money is Used
/// ```text
/// ServiceLine.price ──────────────────────┐
///                                         ├──► OrderTotals.subtotal
/// PartLine.unit_price × quantity ─────────┘            │
///                                                      ▼
///                               subtotal − discount = final_total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

/// Largest amount accepted from forms or the backend: one trillion reais.
pub const MAX_CENTS: i64 = 100_000_000_000_000;

/// Why an amount could not be read.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    #[error("valor vazio")]
    Empty,

    #[error("valor não numérico: {0}")]
    Invalid(String),

    #[error("valor fora do intervalo suportado")]
    Overflow,

    #[error("valor não finito")]
    NotFinite,
}

impl Money {
    /// Creates a Money value from centavos.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a decimal amount typed into a form, rounding half-up to
    /// 2 decimal places.
    ///
    /// ## Accepted Shapes
    /// - `"120"`, `"120.5"`, `"120,50"`
    /// - Brazilian grouping: `"1.234,56"`, `"R$ 1.234,56"`
    /// - Leading minus sign: `"-5,50"`
    ///
    /// With a comma present, the comma is the decimal separator and dots
    /// are grouping. Without a comma, a single dot is the decimal
    /// separator and several dots are grouping.
    ///
    /// ```rust
    /// use farol_core::money::Money;
    ///
    /// assert_eq!(Money::parse("1.234,56").unwrap().cents(), 123456);
    /// assert_eq!(Money::parse("10.005").unwrap().cents(), 1001);
    /// assert!(Money::parse("abc").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Money, MoneyParseError> {
        let mut text = input.trim();
        if text.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let negative = text.starts_with('-');
        if negative {
            text = text[1..].trim_start();
        }
        if let Some(rest) = text.strip_prefix("R$") {
            text = rest.trim_start();
        }

        let (int_part, frac_part) = split_decimal(text);
        let invalid = || MoneyParseError::Invalid(input.trim().to_string());

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let mut cents: i64 = 0;
        for digit in int_part.bytes() {
            cents = cents
                .checked_mul(10)
                .and_then(|c| c.checked_add(i64::from(digit - b'0')))
                .ok_or(MoneyParseError::Overflow)?;
        }
        cents = cents.checked_mul(100).ok_or(MoneyParseError::Overflow)?;

        let frac = frac_part.as_bytes();
        let tenths = frac.first().map_or(0, |d| i64::from(d - b'0'));
        let hundredths = frac.get(1).map_or(0, |d| i64::from(d - b'0'));
        cents += tenths * 10 + hundredths;

        // Half-up on the third decimal
        if frac.get(2).is_some_and(|d| *d >= b'5') {
            cents = cents.checked_add(1).ok_or(MoneyParseError::Overflow)?;
        }

        if cents > MAX_CENTS {
            return Err(MoneyParseError::Overflow);
        }

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Converts a JSON number in reais, rounding half-up to 2 decimals.
    ///
    /// Rounds on the shortest decimal text of the float, so `1.005`
    /// becomes `1.01` instead of falling to `1.00` on its binary value.
    pub fn from_f64(value: f64) -> Result<Money, MoneyParseError> {
        if !value.is_finite() {
            return Err(MoneyParseError::NotFinite);
        }
        Money::parse(&value.to_string())
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole reais portion (truncated toward zero).
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavos portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// The value in reais as a float, for JSON payloads only.
    #[inline]
    pub fn to_reais_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a line quantity.
    ///
    /// ```rust
    /// use farol_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(2500);
    /// assert_eq!(unit_price.multiply_quantity(4).cents(), 10000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

/// Splits `text` into integer and fractional digits following the
/// separator rules documented on [`Money::parse`]. Grouping dots are
/// dropped from the integer part.
fn split_decimal(text: &str) -> (String, String) {
    if let Some((int, frac)) = text.split_once(',') {
        return (int.replace('.', ""), frac.to_string());
    }
    match text.matches('.').count() {
        1 => {
            let (int, frac) = text.split_once('.').unwrap_or((text, ""));
            (int.to_string(), frac.to_string())
        }
        0 => (text.to_string(), String::new()),
        _ => (text.replace('.', ""), String::new()),
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Brazilian currency format: `R$ 1.234,56`, `-R$ 5,50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let whole = self.reais().unsigned_abs().to_string();

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        write!(f, "{}R$ {},{:02}", sign, grouped, self.cents_part())
    }
}

impl std::str::FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by a line quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Serde Adapter: Reais on the Wire
// =============================================================================

/// Serializes [`Money`] as a decimal number of reais and reads it back from
/// either a number (`135.5`) or a numeric string (`"135.50"`).
///
/// ```rust,ignore
/// #[derive(Serialize, Deserialize)]
/// struct ServicePayload {
///     #[serde(with = "farol_core::money::reais")]
///     price: Money,
/// }
/// ```
pub mod reais {
    use super::Money;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
    }

    impl RawAmount {
        fn into_money(self) -> Result<Money, super::MoneyParseError> {
            match self {
                RawAmount::Number(value) => Money::from_f64(value),
                RawAmount::Text(text) => Money::parse(&text),
            }
        }
    }

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_reais_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        RawAmount::deserialize(deserializer)?
            .into_money()
            .map_err(D::Error::custom)
    }

    /// Same as the parent module for `Option<Money>` fields.
    pub mod option {
        use super::{Money, RawAmount};
        use serde::de::Error as _;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            money: &Option<Money>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match money {
                Some(m) => serializer.serialize_some(&m.to_reais_f64()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Money>, D::Error> {
            Option::<RawAmount>::deserialize(deserializer)?
                .map(RawAmount::into_money)
                .transpose()
                .map_err(D::Error::custom)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
