//! # Patients Types
//!
//! Validated value types shared by the core, API and CLI crates.
//!
//! Each type checks its invariant once, at construction, so code holding one
//! never has to re-check it.

/// Maximum number of characters in a patient name.
pub const MAX_NAME_CHARS: usize = 120;

/// Highest accepted age, in years.
pub const MAX_AGE: i64 = 130;

/// Errors that can occur when creating validated text types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// The input text was empty
    #[error("String should have at least 1 character")]
    Empty,
    /// The input text exceeded the maximum length
    #[error("String should have at most {max} characters")]
    TooLong { max: usize },
}

/// Errors that can occur when creating an [`Age`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgeError {
    #[error("Input should be greater than or equal to 0")]
    Negative,
    #[error("Input should be less than or equal to {max}")]
    TooHigh { max: i64 },
}

/// A patient's display name.
///
/// Holds between 1 and [`MAX_NAME_CHARS`] characters. Length is counted in
/// Unicode scalar values, not bytes, and the input is stored exactly as given:
/// no trimming or case folding happens here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientName(String);

impl PatientName {
    /// Creates a new `PatientName` from the given input.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` for an empty string and
    /// `TextError::TooLong` when the input has more than [`MAX_NAME_CHARS`]
    /// characters.
    pub fn new(input: impl Into<String>) -> Result<Self, TextError> {
        let input = input.into();
        if input.is_empty() {
            return Err(TextError::Empty);
        }
        if input.chars().count() > MAX_NAME_CHARS {
            return Err(TextError::TooLong {
                max: MAX_NAME_CHARS,
            });
        }
        Ok(Self(input))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A patient's age in whole years, between 0 and [`MAX_AGE`] inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Age(u8);

impl Age {
    /// Creates a new `Age`, rejecting values outside `0..=MAX_AGE`.
    pub fn new(years: i64) -> Result<Self, AgeError> {
        if years < 0 {
            return Err(AgeError::Negative);
        }
        if years > MAX_AGE {
            return Err(AgeError::TooHigh { max: MAX_AGE });
        }
        // MAX_AGE fits in a u8
        Ok(Self(years as u8))
    }

    pub fn years(self) -> u8 {
        self.0
    }
}
