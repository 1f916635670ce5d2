/// Rejected user input, reported back to whoever called the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("item name must not be blank")]
    InvalidName,
    #[error("quantity must be a whole number greater than zero")]
    InvalidQuantity,
    #[error("no item ids left")]
    ListFull,
}

impl ValidationError {
    /// Short message for inline display in a form
    pub fn user_message(self) -> &'static str {
        match self {
            ValidationError::InvalidName => "Please enter an item name.",
            ValidationError::InvalidQuantity => "Please enter a valid quantity.",
            ValidationError::ListFull => "The list is full.",
        }
    }
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        Err(ValidationError::InvalidName)
    } else {
        Ok(())
    }
}

/// Parse a quantity typed by the user. Surrounding whitespace is ignored;
/// anything that isn't an integer in `1..=u32::MAX` is rejected.
pub fn parse_quantity(text: &str) -> Result<u32, ValidationError> {
    let n: i64 = text
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidQuantity)?;
    if n <= 0 {
        return Err(ValidationError::InvalidQuantity);
    }
    u32::try_from(n).map_err(|_| ValidationError::InvalidQuantity)
}

/// Lenient form of [`parse_quantity`]: falls back to 1
pub fn parse_quantity_or_default(text: &str) -> u32 {
    parse_quantity(text).unwrap_or(1)
}
