//! Input validation for transfer requests
//!
//! All fields are private to force validation through the public API: the
//! engine only ever sees a [`ValidatedTransfer`]. Nothing here touches
//! storage.

use std::fmt;

use rust_decimal::Decimal;

/// Validation errors for transfer input
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid {field} account: '{value}' is not a numeric account identifier")]
    InvalidAccountId { field: &'static str, value: String },

    #[error("Invalid amount: '{value}' is not numeric")]
    InvalidAmountFormat { value: String },

    #[error("The transfer amount must be greater than 0")]
    NonPositiveAmount,

    #[error("The destination account must differ from the originating account")]
    SameAccount,
}

/// Validated account identifier (guaranteed non-negative integer)
///
/// Fields are private to force validation through `parse()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(i64);

impl AccountId {
    /// Parse an account identifier from its string form.
    ///
    /// Accepts decimal digits only; rejects signs, fractions, and anything
    /// that does not fit an `i64`.
    pub fn parse(field: &'static str, value: &str) -> Result<Self, ValidationError> {
        let value = value.trim();
        let invalid = || ValidationError::InvalidAccountId {
            field,
            value: value.to_string(),
        };

        if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let id: i64 = value.parse().map_err(|_| invalid())?;
        Ok(Self(id))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A transfer request that passed input validation
///
/// Ephemeral boundary type, never persisted as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedTransfer {
    from: AccountId,
    to: AccountId,
    amount: Decimal,
}

impl ValidatedTransfer {
    pub fn from(&self) -> AccountId {
        self.from
    }

    pub fn to(&self) -> AccountId {
        self.to
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

/// Validate raw string-encoded transfer input.
///
/// Fails when either identifier is not numeric, the amount is not numeric
/// or not positive, or both identifiers name the same account.
pub fn validate(from: &str, to: &str, amount: &str) -> Result<ValidatedTransfer, ValidationError> {
    let from = AccountId::parse("from", from)?;
    let to = AccountId::parse("to", to)?;

    let amount: Decimal = amount
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidAmountFormat {
            value: amount.to_string(),
        })?;

    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }

    if from == to {
        return Err(ValidationError::SameAccount);
    }

    Ok(ValidatedTransfer { from, to, amount })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_validate_ok() {
        let t = validate("1", "2", "30.50").unwrap();
        assert_eq!(t.from().get(), 1);
        assert_eq!(t.to().get(), 2);
        assert_eq!(t.amount(), dec("30.50"));
    }

    #[test]
    fn test_account_id_not_numeric() {
        let err = validate("abc", "2", "10").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidAccountId { field: "from", .. }
        ));

        let err = validate("1", "2x", "10").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidAccountId { field: "to", .. }
        ));
    }

    #[test]
    fn test_account_id_rejects_sign_and_fraction() {
        assert!(AccountId::parse("from", "-5").is_err());
        assert!(AccountId::parse("from", "+5").is_err());
        assert!(AccountId::parse("from", "1.5").is_err());
        assert!(AccountId::parse("from", "").is_err());
        // overflow past i64
        assert!(AccountId::parse("from", "99999999999999999999").is_err());
    }

    #[test]
    fn test_amount_not_numeric() {
        let err = validate("1", "2", "ten").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidAmountFormat { .. }));
    }

    #[test]
    fn test_amount_must_be_positive() {
        assert_eq!(
            validate("1", "2", "0").unwrap_err(),
            ValidationError::NonPositiveAmount
        );
        assert_eq!(
            validate("1", "2", "-3").unwrap_err(),
            ValidationError::NonPositiveAmount
        );
    }

    #[test]
    fn test_same_account_rejected() {
        assert_eq!(
            validate("7", "7", "10").unwrap_err(),
            ValidationError::SameAccount
        );
    }

    #[test]
    fn test_whitespace_trimmed() {
        let t = validate(" 1 ", " 2 ", " 10 ").unwrap();
        assert_eq!(t.from().get(), 1);
        assert_eq!(t.amount(), dec("10"));
    }
}
