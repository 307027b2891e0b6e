//! Parsing of the amounts a user types into the amount field.

use crate::Error;

/// The maximum number of digits the user can enter before the decimal point.
pub const MAX_DIGITS_BEFORE_DOT: usize = 7;

/// The maximum number of digits the user can enter after the decimal point.
pub const MAX_DIGITS_AFTER_DOT: usize = 2;

/// The HTML `pattern` attribute that mirrors [AmountInput::parse] in the browser.
pub const AMOUNT_INPUT_PATTERN: &str = r"\d{0,7}(\.\d{0,2})?";

/// Parse `text` as a decimal amount.
///
/// Missing or blank text is treated as an amount of zero so that pressing a
/// button with an empty amount field does nothing.
///
/// # Errors
/// Returns [Error::InvalidAmount] if `text` is not a finite decimal number.
pub fn parse_amount(text: Option<&str>) -> Result<f64, Error> {
    let text = match text.map(str::trim) {
        None | Some("") => return Ok(0.0),
        Some(text) => text,
    };

    match text.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(Error::InvalidAmount(text.to_owned())),
    }
}

/// An amount entered by the user that passed the digit filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmountInput(f64);

impl AmountInput {
    /// Validate and parse the text from the amount field.
    ///
    /// Only digits and a single decimal point are accepted, with at most
    /// [MAX_DIGITS_BEFORE_DOT] digits before the point and
    /// [MAX_DIGITS_AFTER_DOT] after it. Blank text is zero.
    ///
    /// # Errors
    /// Returns:
    /// - [Error::InvalidAmount] if `text` contains anything other than digits and one `.`,
    /// - [Error::AmountTooLarge] if there are too many digits before the point,
    /// - [Error::TooManyDecimalPlaces] if there are too many digits after the point.
    pub fn parse(text: Option<&str>) -> Result<Self, Error> {
        let trimmed = text.map(str::trim).unwrap_or_default();

        if trimmed.is_empty() {
            return Ok(Self(0.0));
        }

        let (integer_part, fractional_part) = match trimmed.split_once('.') {
            Some((integer_part, fractional_part)) => (integer_part, fractional_part),
            None => (trimmed, ""),
        };

        let is_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
        if !is_digits(integer_part)
            || !is_digits(fractional_part)
            || (integer_part.is_empty() && fractional_part.is_empty())
        {
            return Err(Error::InvalidAmount(trimmed.to_owned()));
        }

        if integer_part.len() > MAX_DIGITS_BEFORE_DOT {
            return Err(Error::AmountTooLarge(trimmed.to_owned()));
        }

        if fractional_part.len() > MAX_DIGITS_AFTER_DOT {
            return Err(Error::TooManyDecimalPlaces(trimmed.to_owned()));
        }

        parse_amount(Some(trimmed)).map(Self)
    }

    /// The parsed amount.
    pub fn value(self) -> f64 {
        self.0
    }
}
