use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidateEmail, ValidationErrors};

use crate::domain::user::{NewUser, UserRole};
use crate::forms::{sanitize_inline_text, sanitize_optional};

const NAME_MAX_LEN: u64 = 128;
/// Shortest password accepted at registration or on profile update.
pub const PASSWORD_MIN_LEN: usize = 8;
const PASSWORD_MIN_LEN_VALIDATOR: u64 = PASSWORD_MIN_LEN as u64;

pub type UserFormResult<T> = Result<T, UserFormError>;

#[derive(Debug, Error)]
pub enum UserFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("Name is required")]
    EmptyName,
    #[error("Email and password are required")]
    MissingCredentials,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password must be at least {PASSWORD_MIN_LEN} characters")]
    PasswordTooShort,
}

/// Payload of `POST /api/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = PASSWORD_MIN_LEN_VALIDATOR))]
    pub password: String,
    /// Unknown or missing roles fall back to a regular user.
    #[serde(default)]
    pub role: Option<String>,
}

/// A registration that passed validation but whose password is not hashed yet.
#[derive(Debug)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

impl RegisterForm {
    pub fn into_registration(self) -> UserFormResult<Registration> {
        if self.password.chars().count() < PASSWORD_MIN_LEN {
            return Err(UserFormError::PasswordTooShort);
        }
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(UserFormError::EmptyName);
        }

        let role = self
            .role
            .as_deref()
            .and_then(|role| role.trim().to_lowercase().parse().ok())
            .unwrap_or_default();

        Ok(Registration {
            name,
            email: self.email.trim().to_lowercase(),
            password: self.password,
            role,
        })
    }
}

impl Registration {
    pub fn into_new_user(self, password_hash: String) -> NewUser {
        NewUser::new(self.name, self.email, password_hash).with_role(self.role)
    }
}

/// Payload of `POST /api/users/login`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Returns the normalized email and the raw password.
    pub fn into_credentials(self) -> UserFormResult<(String, String)> {
        let email = self.email.trim().to_lowercase();
        if email.is_empty() || self.password.is_empty() {
            return Err(UserFormError::MissingCredentials);
        }
        Ok((email, self.password))
    }
}

/// Multipart payload of `PUT /api/users`. Every field is optional.
#[derive(MultipartForm)]
pub struct UpdateProfileForm {
    pub name: Option<Text<String>>,
    pub email: Option<Text<String>>,
    pub password: Option<Text<String>>,
    pub bio: Option<Text<String>>,
    #[multipart(rename = "profilePic", limit = "5MB")]
    pub profile_pic: Option<TempFile>,
}

/// Validated profile changes; the picture is still an unsaved upload.
pub struct ProfileChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub bio: Option<String>,
    pub picture: Option<TempFile>,
}

impl UpdateProfileForm {
    pub fn into_changes(self) -> UserFormResult<ProfileChanges> {
        let name = sanitize_optional(self.name.as_ref().map(|value| value.as_str()));

        let email = self
            .email
            .as_ref()
            .map(|value| value.trim().to_lowercase())
            .filter(|value| !value.is_empty());
        if email.as_ref().is_some_and(|email| !email.validate_email()) {
            return Err(UserFormError::InvalidEmail);
        }

        let password = self
            .password
            .map(Text::into_inner)
            .filter(|value| !value.is_empty());
        if password
            .as_ref()
            .is_some_and(|value| value.chars().count() < PASSWORD_MIN_LEN)
        {
            return Err(UserFormError::PasswordTooShort);
        }

        let bio = self
            .bio
            .as_ref()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let picture = self.profile_pic.filter(|file| file.size > 0);

        Ok(ProfileChanges {
            name,
            email,
            password,
            bio,
            picture,
        })
    }
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.bio.is_none()
            && self.picture.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    fn register_form(password: &str, role: Option<&str>) -> RegisterForm {
        RegisterForm {
            name: "  Road   Manager ".to_string(),
            email: "TM@Example.com ".to_string(),
            password: password.to_string(),
            role: role.map(str::to_string),
        }
    }

    #[test]
    fn registration_normalizes_fields() {
        let registration = register_form("longenough", Some("manager"))
            .into_registration()
            .expect("valid registration");

        assert_eq!(registration.name, "Road Manager");
        assert_eq!(registration.email, "tm@example.com");
        assert_eq!(registration.role, UserRole::Manager);

        let new_user = registration.into_new_user("hash".to_string());
        assert_eq!(new_user.password_hash, "hash");
        assert_eq!(new_user.role, UserRole::Manager);
    }

    #[test]
    fn registration_falls_back_to_user_role() {
        let registration = register_form("longenough", Some("superuser"))
            .into_registration()
            .expect("valid registration");
        assert_eq!(registration.role, UserRole::User);

        let registration = register_form("longenough", None)
            .into_registration()
            .expect("valid registration");
        assert_eq!(registration.role, UserRole::User);
    }

    #[test]
    fn registration_rejects_short_password() {
        let result = register_form("short", None).into_registration();
        assert!(matches!(result, Err(UserFormError::PasswordTooShort)));
    }

    #[test]
    fn registration_rejects_bad_email() {
        let mut form = register_form("longenough", None);
        form.email = "not-an-email".to_string();

        assert!(matches!(
            form.into_registration(),
            Err(UserFormError::Validation(_))
        ));
    }

    #[test]
    fn login_requires_both_fields() {
        let form = LoginForm {
            email: " ".to_string(),
            password: "secret".to_string(),
        };
        assert!(matches!(
            form.into_credentials(),
            Err(UserFormError::MissingCredentials)
        ));
    }

    fn text(value: &str) -> Option<Text<String>> {
        Some(Text(value.to_string()))
    }

    #[test]
    fn profile_changes_skip_blank_fields() {
        let form = UpdateProfileForm {
            name: text("   "),
            email: None,
            password: text(""),
            bio: text("  Selling shirts since 2009 "),
            profile_pic: None,
        };

        let changes = form.into_changes().expect("valid changes");

        assert!(changes.name.is_none());
        assert!(changes.password.is_none());
        assert_eq!(changes.bio.as_deref(), Some("Selling shirts since 2009"));
        assert!(!changes.is_empty());
    }

    #[test]
    fn profile_changes_validate_email_and_password() {
        let form = UpdateProfileForm {
            name: None,
            email: text("nope"),
            password: None,
            bio: None,
            profile_pic: None,
        };
        assert!(matches!(
            form.into_changes(),
            Err(UserFormError::InvalidEmail)
        ));

        let form = UpdateProfileForm {
            name: None,
            email: None,
            password: text("1234"),
            bio: None,
            profile_pic: None,
        };
        assert!(matches!(
            form.into_changes(),
            Err(UserFormError::PasswordTooShort)
        ));
    }

    #[test]
    fn profile_changes_keep_non_empty_picture() {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(b"\x89PNG").expect("write picture");

        let form = UpdateProfileForm {
            name: None,
            email: None,
            password: None,
            bio: None,
            profile_pic: Some(TempFile {
                file,
                content_type: None,
                file_name: Some("me.png".to_string()),
                size: 4,
            }),
        };

        let changes = form.into_changes().expect("valid changes");
        assert!(changes.picture.is_some());
    }
}
