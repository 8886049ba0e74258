use validator::ValidationError;
use zxcvbn::zxcvbn;

const MIN_LENGTH: usize = 8;
const MIN_STRENGTH_SCORE: u8 = 2;

/// Screens a registration password: minimum length plus a zxcvbn strength
/// estimate, so trivially guessable passwords never reach the hasher.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if password.len() < MIN_LENGTH {
        let mut error = ValidationError::new("password_length");
        error.message = Some(format!("Must be at least {} characters", MIN_LENGTH).into());
        return Err(error);
    }

    let estimate = zxcvbn(password, &[]);
    let score = estimate.score() as u8;

    if score < MIN_STRENGTH_SCORE {
        let feedback = estimate
            .feedback()
            .and_then(|f| f.warning().map(|w| w.to_string()))
            .unwrap_or_else(|| "Password is too weak".to_string());

        let mut error = ValidationError::new("password_strength");
        error.message = Some(feedback.into());
        return Err(error);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_passwords_are_rejected() {
        assert!(validate_password_strength("abc").is_err());
    }

    #[test]
    fn guessable_passwords_are_rejected() {
        assert!(validate_password_strength("password").is_err());
    }

    #[test]
    fn reasonable_passwords_pass() {
        assert!(validate_password_strength("corded-Lamp-41-quartz").is_ok());
    }
}
