use serde::Deserialize;

use crate::errors::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub name: String,
}

impl NewUser {
    /// Trims both fields and rejects blanks. Emails are otherwise stored as given.
    pub fn normalized(self) -> Result<NewUser, AppError> {
        let email = self.email.trim().to_string();
        let name = self.name.trim().to_string();
        if email.is_empty() {
            return Err(AppError::Validation("email cannot be empty".to_string()));
        }
        if name.is_empty() {
            return Err(AppError::Validation("name cannot be empty".to_string()));
        }
        Ok(NewUser { email, name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_trims_fields() {
        let user = NewUser {
            email: " ana@example.com ".to_string(),
            name: "Ana ".to_string(),
        }
        .normalized()
        .unwrap();
        assert_eq!(user.email, "ana@example.com");
        assert_eq!(user.name, "Ana");
    }

    #[test]
    fn test_blank_fields_are_rejected() {
        let blank_email = NewUser {
            email: "  ".to_string(),
            name: "Ana".to_string(),
        };
        assert!(matches!(blank_email.normalized(), Err(AppError::Validation(_))));

        let blank_name = NewUser {
            email: "ana@example.com".to_string(),
            name: String::new(),
        };
        assert!(matches!(blank_name.normalized(), Err(AppError::Validation(_))));
    }
}
