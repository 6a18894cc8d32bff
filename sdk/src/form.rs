//! Token creation form
//!
//! Raw field input as typed by the user and the validation that turns it into
//! [`TokenAttributes`]. Every invalid field yields exactly one [`FieldError`];
//! all of them are reported together so the caller can show them inline.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{TokenAttributes, MAX_DECIMALS, MAX_NAME_LENGTH, MAX_SYMBOL_LENGTH};

/// Unvalidated form input, one string per input control
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenForm {
    pub name: String,
    pub num_decimals: String,
    pub symbol: String,
    pub description: Option<String>,
    /// Image URL
    pub image: Option<String>,
    /// Number of tokens to mint initially
    pub num_token_initial: String,
}

/// Why a single field was rejected
#[derive(Error, Clone, Debug, PartialEq)]
pub enum Violation {
    #[error("is a required field")]
    Required,
    #[error("must be a number")]
    NotANumber,
    #[error("must be an integer")]
    NotInteger,
    #[error("must be greater than or equal to {0}")]
    BelowMin(u8),
    #[error("must be less than or equal to {0}")]
    AboveMax(u8),
    #[error("must be at most {0} bytes")]
    TooLong(usize),
}

/// A rejected field. Optional fields (description, image) never fail.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum FieldError {
    #[error("name {0}")]
    Name(Violation),
    #[error("symbol {0}")]
    Symbol(Violation),
    #[error("numDecimals {0}")]
    NumDecimals(Violation),
    #[error("numTokenInitial {0}")]
    NumTokens(Violation),
}

impl FieldError {
    /// Key of the input control this error belongs to
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::Name(_) => "name",
            FieldError::Symbol(_) => "symbol",
            FieldError::NumDecimals(_) => "numDecimals",
            FieldError::NumTokens(_) => "numTokenInitial",
        }
    }

    pub fn violation(&self) -> &Violation {
        match self {
            FieldError::Name(v)
            | FieldError::Symbol(v)
            | FieldError::NumDecimals(v)
            | FieldError::NumTokens(v) => v,
        }
    }
}

/// All field errors of one validation pass, in form order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormErrors {
    errors: Vec<FieldError>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Error for the given field key, if that field was rejected
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field() == field)
    }

    fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

impl TokenForm {
    /// Validate every field and snapshot the result into [`TokenAttributes`]
    pub fn validate(&self) -> Result<TokenAttributes, FormErrors> {
        let mut errors = FormErrors::default();

        let name = required_text(&self.name, MAX_NAME_LENGTH).map_err(FieldError::Name);
        let num_decimals = parse_decimals(&self.num_decimals).map_err(FieldError::NumDecimals);
        let symbol = required_text(&self.symbol, MAX_SYMBOL_LENGTH).map_err(FieldError::Symbol);
        let num_tokens = parse_supply(&self.num_token_initial).map_err(FieldError::NumTokens);

        let name = name.map_err(|e| errors.push(e)).ok();
        let num_decimals = num_decimals.map_err(|e| errors.push(e)).ok();
        let symbol = symbol.map_err(|e| errors.push(e)).ok();
        let num_tokens = num_tokens.map_err(|e| errors.push(e)).ok();

        match (name, symbol, num_decimals, num_tokens) {
            (Some(name), Some(symbol), Some(num_decimals), Some(num_tokens)) => {
                Ok(TokenAttributes {
                    name,
                    symbol,
                    description: optional_text(self.description.as_deref()),
                    image: optional_text(self.image.as_deref()),
                    num_decimals,
                    num_tokens,
                    metadata_url: None,
                })
            }
            _ => Err(errors),
        }
    }
}

impl TokenAttributes {
    /// Apply the form rules to attributes that may have been built by hand
    pub fn check(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();

        if let Err(v) = required_text(&self.name, MAX_NAME_LENGTH) {
            errors.push(FieldError::Name(v));
        }
        if self.num_decimals > MAX_DECIMALS {
            errors.push(FieldError::NumDecimals(Violation::AboveMax(MAX_DECIMALS)));
        }
        if let Err(v) = required_text(&self.symbol, MAX_SYMBOL_LENGTH) {
            errors.push(FieldError::Symbol(v));
        }
        if !self.num_tokens.is_finite() {
            errors.push(FieldError::NumTokens(Violation::NotANumber));
        } else if self.num_tokens < 0.0 {
            errors.push(FieldError::NumTokens(Violation::BelowMin(0)));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn required_text(raw: &str, max_len: usize) -> Result<String, Violation> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Violation::Required);
    }
    if trimmed.len() > max_len {
        return Err(Violation::TooLong(max_len));
    }
    Ok(trimmed.to_string())
}

fn optional_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_number(raw: &str) -> Result<f64, Violation> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Violation::Required);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(Violation::NotANumber),
    }
}

fn parse_decimals(raw: &str) -> Result<u8, Violation> {
    let value = parse_number(raw)?;
    if value < 0.0 {
        return Err(Violation::BelowMin(0));
    }
    if value.fract() != 0.0 {
        return Err(Violation::NotInteger);
    }
    if value > f64::from(MAX_DECIMALS) {
        return Err(Violation::AboveMax(MAX_DECIMALS));
    }
    Ok(value as u8)
}

fn parse_supply(raw: &str) -> Result<f64, Violation> {
    let value = parse_number(raw)?;
    if value < 0.0 {
        return Err(Violation::BelowMin(0));
    }
    Ok(value)
}
