//! # Fiscal Document Module
//!
//! Validation of Brazilian taxpayer identifiers carried on client records:
//! CPF (individuals, 11 digits) and CNPJ (companies, 14 digits).
//!
//! ## Two-Phase Validation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "529.982.247-25"                                                       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  normalize_digits()      strip everything that is not 0-9             │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  "52998224725"                                                          │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  check_digits()          length → kind, degenerate check, checksum     │
//! │        │                                                                │
//! │        ├── Err(InvalidFormat)      wrong length                        │
//! │        ├── Err(DegenerateInput)    "00000000000", "11111111111", ...   │
//! │        ├── Err(InvalidCheckDigit)  checksum mismatch                   │
//! │        └── Ok(TaxpayerKind::Cpf)                                        │
//! │                                                                         │
//! │  TaxpayerId::parse() composes both phases.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error collapses into one form message, "CPF ou CNPJ inválido"
//! (see [`crate::ValidationError::InvalidTaxpayerId`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ts_rs::TS;

/// Digits in a CPF.
pub const CPF_LEN: usize = 11;

/// Digits in a CNPJ.
pub const CNPJ_LEN: usize = 14;

// =============================================================================
// Types
// =============================================================================

/// Which document a digit string is, decided by its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaxpayerKind {
    /// Cadastro de Pessoas Físicas, 11 digits.
    Cpf,
    /// Cadastro Nacional da Pessoa Jurídica, 14 digits.
    Cnpj,
}

impl TaxpayerKind {
    /// Classifies a normalized digit string by length.
    pub fn from_len(len: usize) -> Option<Self> {
        match len {
            CPF_LEN => Some(TaxpayerKind::Cpf),
            CNPJ_LEN => Some(TaxpayerKind::Cnpj),
            _ => None,
        }
    }

    /// Number of digits for this kind.
    pub const fn len(&self) -> usize {
        match self {
            TaxpayerKind::Cpf => CPF_LEN,
            TaxpayerKind::Cnpj => CNPJ_LEN,
        }
    }
}

impl fmt::Display for TaxpayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxpayerKind::Cpf => f.write_str("CPF"),
            TaxpayerKind::Cnpj => f.write_str("CNPJ"),
        }
    }
}

/// Why a taxpayer id was rejected. Internal only: users see a single
/// message regardless of the variant.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TaxpayerIdError {
    /// Digit count is neither 11 nor 14.
    #[error("expected 11 or 14 digits, got {digits}")]
    InvalidFormat { digits: usize },

    /// Every digit is the same. Such strings satisfy the checksum
    /// arithmetic but are never issued.
    #[error("all digits are identical")]
    DegenerateInput,

    /// Length is right but a check digit does not match.
    #[error("{kind} check digit mismatch")]
    InvalidCheckDigit { kind: TaxpayerKind },
}

/// A validated CPF or CNPJ, stored digits-only.
///
/// ## Invariants
/// - `digits` holds exactly `kind.len()` ASCII digits
/// - not all digits are equal
/// - both check digits match
///
/// Serializes as the bare digit string, which is also what the backend
/// stores in `cpfCnpj`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaxpayerId {
    kind: TaxpayerKind,
    digits: String,
}

// =============================================================================
// Phase 1: Normalization
// =============================================================================

/// Strips every character that is not a decimal digit.
///
/// ```rust
/// use farol_core::fiscal::normalize_digits;
///
/// assert_eq!(normalize_digits("11.222.333/0001-81"), "11222333000181");
/// ```
pub fn normalize_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

// =============================================================================
// Phase 2: Check Digits
// =============================================================================

/// Maps a weighted sum to its check digit: 0 when the remainder mod 11 is
/// below 2, otherwise 11 minus the remainder.
fn mod11_digit(sum: u32) -> u8 {
    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        (11 - remainder) as u8
    }
}

/// One CPF check digit over `prefix`, weighted from `prefix.len() + 1`
/// down to 2.
fn cpf_digit(prefix: &[u8]) -> u8 {
    let top = prefix.len() as u32 + 1;
    let sum = prefix
        .iter()
        .enumerate()
        .map(|(i, d)| u32::from(*d) * (top - i as u32))
        .sum();
    mod11_digit(sum)
}

/// One CNPJ check digit over `prefix`, weights cycling 2..=9 starting at
/// the rightmost digit.
fn cnpj_digit(prefix: &[u8]) -> u8 {
    let sum = prefix
        .iter()
        .rev()
        .zip((2..=9u32).cycle())
        .map(|(d, w)| u32::from(*d) * w)
        .sum();
    mod11_digit(sum)
}

/// Derives both CPF check digits from the first 9 digits.
///
/// ```rust
/// use farol_core::fiscal::cpf_check_digits;
///
/// assert_eq!(cpf_check_digits(&[5, 2, 9, 9, 8, 2, 2, 4, 7]), [2, 5]);
/// ```
pub fn cpf_check_digits(base: &[u8; 9]) -> [u8; 2] {
    let first = cpf_digit(base);
    let mut extended = [0u8; 10];
    extended[..9].copy_from_slice(base);
    extended[9] = first;
    [first, cpf_digit(&extended)]
}

/// Derives both CNPJ check digits from the first 12 digits.
pub fn cnpj_check_digits(base: &[u8; 12]) -> [u8; 2] {
    let first = cnpj_digit(base);
    let mut extended = [0u8; 13];
    extended[..12].copy_from_slice(base);
    extended[12] = first;
    [first, cnpj_digit(&extended)]
}

/// Validates an already normalized digit string and reports its kind.
///
/// Non-digit characters are treated as a format error; run
/// [`normalize_digits`] first.
pub fn check_digits(digits: &str) -> Result<TaxpayerKind, TaxpayerIdError> {
    let bytes: Vec<u8> = digits
        .bytes()
        .map(|b| b.wrapping_sub(b'0'))
        .collect();

    if bytes.iter().any(|d| *d > 9) {
        return Err(TaxpayerIdError::InvalidFormat {
            digits: digits.chars().filter(char::is_ascii_digit).count(),
        });
    }

    let kind = TaxpayerKind::from_len(bytes.len())
        .ok_or(TaxpayerIdError::InvalidFormat { digits: bytes.len() })?;

    if bytes.windows(2).all(|w| w[0] == w[1]) {
        return Err(TaxpayerIdError::DegenerateInput);
    }

    let (base, given) = bytes.split_at(kind.len() - 2);
    let expected = match kind {
        TaxpayerKind::Cpf => {
            let mut prefix = [0u8; 9];
            prefix.copy_from_slice(base);
            cpf_check_digits(&prefix)
        }
        TaxpayerKind::Cnpj => {
            let mut prefix = [0u8; 12];
            prefix.copy_from_slice(base);
            cnpj_check_digits(&prefix)
        }
    };

    if given != expected {
        return Err(TaxpayerIdError::InvalidCheckDigit { kind });
    }

    Ok(kind)
}

// =============================================================================
// TaxpayerId
// =============================================================================

impl TaxpayerId {
    /// Normalizes and validates raw form input.
    ///
    /// ```rust
    /// use farol_core::fiscal::{TaxpayerId, TaxpayerKind};
    ///
    /// let id = TaxpayerId::parse("529.982.247-25").unwrap();
    /// assert_eq!(id.as_str(), "52998224725");
    /// assert_eq!(id.kind(), TaxpayerKind::Cpf);
    ///
    /// assert!(TaxpayerId::parse("111.111.111-11").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, TaxpayerIdError> {
        let digits = normalize_digits(raw);
        let kind = check_digits(&digits)?;
        Ok(TaxpayerId { kind, digits })
    }

    /// CPF or CNPJ.
    #[inline]
    pub fn kind(&self) -> TaxpayerKind {
        self.kind
    }

    /// The digits-only form, as stored by the backend.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// Punctuated form for display and printed orders:
    /// `529.982.247-25` or `11.222.333/0001-81`.
    pub fn formatted(&self) -> String {
        let d = &self.digits;
        match self.kind {
            TaxpayerKind::Cpf => format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11]),
            TaxpayerKind::Cnpj => format!(
                "{}.{}.{}/{}-{}",
                &d[0..2],
                &d[2..5],
                &d[5..8],
                &d[8..12],
                &d[12..14]
            ),
        }
    }
}

impl fmt::Display for TaxpayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

impl FromStr for TaxpayerId {
    type Err = TaxpayerIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaxpayerId::parse(s)
    }
}

impl TryFrom<String> for TaxpayerId {
    type Error = TaxpayerIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TaxpayerId::parse(&value)
    }
}

impl From<TaxpayerId> for String {
    fn from(id: TaxpayerId) -> Self {
        id.digits
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
