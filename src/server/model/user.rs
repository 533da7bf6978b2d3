use entity::sea_orm_active_enums::Role;

use crate::{
    model::user::{RoleDto, SignupDto, UpdateUserDto, UserDto},
    server::error::AppError,
};

const USERNAME_LENGTH: std::ops::RangeInclusive<usize> = 4..=10;

impl From<Role> for RoleDto {
    fn from(role: Role) -> Self {
        match role {
            Role::Customer => Self::Customer,
            Role::Owner => Self::Owner,
            Role::Manager => Self::Manager,
            Role::Master => Self::Master,
        }
    }
}

impl From<RoleDto> for Role {
    fn from(role: RoleDto) -> Self {
        match role {
            RoleDto::Customer => Self::Customer,
            RoleDto::Owner => Self::Owner,
            RoleDto::Manager => Self::Manager,
            RoleDto::Master => Self::Master,
        }
    }
}

/// Live user as seen by the service layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            email: entity.email,
            role: entity.role,
        }
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            username: self.username,
            email: self.email,
            role: self.role.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SignupParams {
    pub username: String,
    pub email: String,
    pub role: Role,
    pub admin_token: Option<String>,
}

impl SignupParams {
    pub fn from_dto(dto: SignupDto) -> Self {
        Self {
            username: dto.username.trim().to_string(),
            email: dto.email.trim().to_string(),
            role: dto.role.into(),
            admin_token: dto.admin_token,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        validate_username(&self.username)?;
        validate_email(&self.email)
    }
}

/// Partial user update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserParams {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

impl UpdateUserParams {
    pub fn from_dto(dto: UpdateUserDto) -> Self {
        Self {
            username: dto.username.map(|u| u.trim().to_string()),
            email: dto.email.map(|e| e.trim().to_string()),
            role: dto.role.map(Into::into),
        }
    }

    /// Applies the signup format rules to whichever of username and email are changing.
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(username) = self.username.as_deref() {
            validate_username(username)?;
        }
        if let Some(email) = self.email.as_deref() {
            validate_email(email)?;
        }
        Ok(())
    }
}

/// Usernames are 4 to 10 characters of lowercase ASCII letters and digits.
pub fn validate_username(username: &str) -> Result<(), AppError> {
    let well_formed = USERNAME_LENGTH.contains(&username.len())
        && username
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit());

    if well_formed {
        Ok(())
    } else {
        Err(AppError::BadRequest(
            "Username must be 4 to 10 lowercase letters or digits".to_string(),
        ))
    }
}

/// Accepts `local@domain` with exactly one `@`, no whitespace, and a dotted domain whose
/// labels are non-empty.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && domain.split('.').all(|label| !label.is_empty())
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if well_formed {
        Ok(())
    } else {
        Err(AppError::BadRequest("Email address is malformed".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_must_be_short_lowercase_alphanumeric() {
        for ok in ["abcd", "user42", "abcdefghij"] {
            assert!(validate_username(ok).is_ok(), "{ok} should pass");
        }
        for bad in ["", "abc", "abcdefghijk", "Alice", "bob_1", "ab cd", "caf\u{e9}s"] {
            assert!(
                matches!(validate_username(bad), Err(AppError::BadRequest(_))),
                "{bad} should fail"
            );
        }
    }

    #[test]
    fn email_needs_local_part_and_dotted_domain() {
        for ok in ["a@b.co", "first.last@mail.example.com"] {
            assert!(validate_email(ok).is_ok(), "{ok} should pass");
        }
        for bad in [
            "",
            "plain",
            "@example.com",
            "user@",
            "user@localhost",
            "user@@example.com",
            "user@example..com",
            "user@.com",
            "us er@example.com",
        ] {
            assert!(
                matches!(validate_email(bad), Err(AppError::BadRequest(_))),
                "{bad} should fail"
            );
        }
    }

    #[test]
    fn update_checks_only_changed_fields() {
        assert!(UpdateUserParams::default().validate().is_ok());

        let bad_name = UpdateUserParams {
            username: Some("X".to_string()),
            ..Default::default()
        };
        assert!(bad_name.validate().is_err());
    }
}
