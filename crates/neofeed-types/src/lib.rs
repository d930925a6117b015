//! Validated primitive types shared across the NeoFeed crates.
//!
//! Clinical measurements arrive from forms, files and wire formats as plain numbers. The types in
//! this crate are the only way to carry those numbers into the evaluator, so a value that made it
//! past construction is known to be inside its documented range.

/// Errors that can occur when creating a [`NonNegative`] quantity.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuantityError {
    /// The value was below zero
    #[error("value must not be negative (got {0})")]
    Negative(f64),
    /// The value was NaN or infinite
    #[error("value must be a finite number")]
    NotFinite,
}

/// Errors that can occur when creating a [`Percentage`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PercentageError {
    /// The value fell outside `0..=100`
    #[error("percentage must be between 0 and 100 (got {0})")]
    OutOfRange(i64),
}

/// A finite real number that is zero or greater.
///
/// Used for flow rates, weight gain, enteral volumes and travel times. Comparisons against
/// thresholds are done on the raw `f64` via [`NonNegative::get`]; no rounding is applied.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct NonNegative(f64);

impl NonNegative {
    /// Creates a new `NonNegative` from the given value.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::NotFinite`] for NaN or infinite input and
    /// [`QuantityError::Negative`] for values below zero.
    pub fn new(value: f64) -> Result<Self, QuantityError> {
        if !value.is_finite() {
            return Err(QuantityError::NotFinite);
        }
        if value < 0.0 {
            return Err(QuantityError::Negative(value));
        }
        // Normalise -0.0.
        Ok(Self(value + 0.0))
    }

    /// Returns the inner value.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl serde::Serialize for NonNegative {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.0)
    }
}

/// A whole-number percentage in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percentage(u8);

impl Percentage {
    /// Creates a new `Percentage`.
    ///
    /// # Errors
    ///
    /// Returns [`PercentageError::OutOfRange`] if `value` is outside `0..=100`.
    pub fn new(value: i64) -> Result<Self, PercentageError> {
        match u8::try_from(value) {
            Ok(v) if v <= 100 => Ok(Self(v)),
            _ => Err(PercentageError::OutOfRange(value)),
        }
    }

    /// Returns the inner value.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl serde::Serialize for Percentage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}
