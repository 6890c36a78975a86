//! Most of the structs in `web` module and their implementations live here.
//! Includes structs that need to be validated, their parsing implementations and tests for those

use serde::{Deserialize, Serialize};

// ###################################
// ->   STRUCTS
// ###################################
/// Deserializable signup form.
/// Either field can be missing, they only get checked when converting into a `ValidSubscriber`.
/// A present value that isn't a string fails deserialization.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupForm {
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl SignupForm {
    #[cfg(test)]
    pub(crate) fn new(first_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            first_name: Some(first_name.into()),
            email: Some(email.into()),
        }
    }

    /// Trims both fields.
    pub fn trimmed(self) -> Self {
        let trim = |value: Option<String>| value.map(|v| v.trim().to_string());
        Self {
            first_name: trim(self.first_name),
            email: trim(self.email),
        }
    }
}

/// Validated Subscriber
/// A Subscriber with all the fields validated
#[derive(Debug, Clone)]
pub struct ValidSubscriber {
    pub email: ValidEmail,
    pub name: ValidName,
}

impl TryFrom<SignupForm> for ValidSubscriber {
    type Error = DataParsingError;

    /// The email is checked before the name.
    fn try_from(form: SignupForm) -> Result<Self, Self::Error> {
        let email = ValidEmail::parse(form.email.unwrap_or_default())?;
        let name = ValidName::parse(form.first_name.unwrap_or_default())?;
        Ok(ValidSubscriber { email, name })
    }
}

/// Validated Subscriber Email
#[derive(Debug, Clone)]
pub struct ValidEmail(String);

impl AsRef<str> for ValidEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ValidEmail {
    /// Accepts any trimmed, non-empty value containing an `@`.
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref().trim();

        if value.is_empty() || !value.contains('@') {
            return Err(DataParsingError::EmailInvalid);
        }

        Ok(ValidEmail(value.to_owned()))
    }
}

/// Validated Subscriber Name
#[derive(Debug, Clone)]
pub struct ValidName(String);

impl AsRef<str> for ValidName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ValidName {
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref().trim();

        if value.is_empty() {
            return Err(DataParsingError::SubscriberNameEmpty);
        }

        Ok(ValidName(value.to_owned()))
    }
}

/// The JSON body of every response except the preflight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum DataParsingError {
    #[error("missing subscriber name")]
    SubscriberNameEmpty,
    #[error("email invalid")]
    EmailInvalid,
}
