use validator::ValidationError;

/// Rejects empty and whitespace-only strings.
///
/// `length(min = 1)` alone would accept `"   "`, so required name/address
/// fields validate through this instead.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_non_blank_values() {
        assert!(not_blank("Bali").is_ok());
        assert!(not_blank("  North Jakarta  ").is_ok());
    }

    #[test]
    fn rejects_blank_values() {
        assert!(not_blank("").is_err());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("\t\n").is_err());
    }
}
