use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// Upper bound on the trimmed participant name, in characters.
pub const NAME_MAX_CHARS: usize = 50;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern should compile"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str() == value)
    }
}

/// Age bracket. Wire values match what the backend stores, including `fourty`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    #[default]
    Teen,
    Twenty,
    Thirty,
    Fourty,
    Fifty,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 5] = [
        AgeGroup::Teen,
        AgeGroup::Twenty,
        AgeGroup::Thirty,
        AgeGroup::Fourty,
        AgeGroup::Fifty,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AgeGroup::Teen => "teen",
            AgeGroup::Twenty => "twenty",
            AgeGroup::Thirty => "thirty",
            AgeGroup::Fourty => "fourty",
            AgeGroup::Fifty => "fifty",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::Teen => "10s",
            AgeGroup::Twenty => "20s",
            AgeGroup::Thirty => "30s",
            AgeGroup::Fourty => "40s",
            AgeGroup::Fifty => "50s and over",
        }
    }

    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignupField {
    Name,
    Email,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SignupFieldError {
    #[error("Please enter your name.")]
    NameRequired,
    #[error("Name must be at most {max} characters.")]
    NameTooLong { max: usize },
    #[error("Please enter your email.")]
    EmailRequired,
    #[error("Please enter a valid email address.")]
    EmailInvalid,
}

/// Field-level validation failures. Empty means the form may be sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupErrors {
    name: Option<SignupFieldError>,
    email: Option<SignupFieldError>,
}

impl SignupErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }

    #[must_use]
    pub fn get(&self, field: SignupField) -> Option<SignupFieldError> {
        match field {
            SignupField::Name => self.name,
            SignupField::Email => self.email,
        }
    }

    pub fn clear(&mut self, field: SignupField) {
        match field {
            SignupField::Name => self.name = None,
            SignupField::Email => self.email = None,
        }
    }
}

impl std::fmt::Display for SignupErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages = [self.name, self.email]
            .into_iter()
            .flatten()
            .map(|err| err.to_string())
            .collect::<Vec<_>>();
        f.write_str(&messages.join(" "))
    }
}

impl std::error::Error for SignupErrors {}

/// Raw form input as the participant typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub age: AgeGroup,
}

impl SignupForm {
    /// Validate the form on the client before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns `SignupErrors` holding one message per failing field.
    pub fn validate(&self) -> Result<SignupRequest, SignupErrors> {
        let name = self.name.trim();
        let email = self.email.trim();
        let mut errors = SignupErrors::default();

        if name.is_empty() {
            errors.name = Some(SignupFieldError::NameRequired);
        } else if name.chars().count() > NAME_MAX_CHARS {
            errors.name = Some(SignupFieldError::NameTooLong {
                max: NAME_MAX_CHARS,
            });
        }

        if email.is_empty() {
            errors.email = Some(SignupFieldError::EmailRequired);
        } else if !EMAIL_SHAPE.is_match(email) {
            errors.email = Some(SignupFieldError::EmailInvalid);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(SignupRequest {
            name: name.to_string(),
            email: email.to_string(),
            gender: self.gender,
            age: self.age,
        })
    }
}

/// Validated signup payload, serialized as the request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub age: AgeGroup,
}
