//! Typed access to `multipart/form-data` fields.
//!
//! Browsers send every field as text, so numbers, booleans and lists
//! (JSON-encoded arrays) are decoded here before reaching the domain.

use std::{fmt::Display, str::FromStr};

use salvo::{
    http::form::{FilePart, FormData},
    prelude::StatusError,
};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum FieldError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{field} is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl FieldError {
    pub(crate) fn invalid(field: &'static str, reason: impl Display) -> Self {
        Self::Invalid {
            field,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn into_status_error(self) -> StatusError {
        StatusError::bad_request().brief(self.to_string())
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct FormFields<'a> {
    form: &'a FormData,
}

impl<'a> FormFields<'a> {
    pub(crate) fn new(form: &'a FormData) -> Self {
        Self { form }
    }

    /// Field text, with blank values treated as absent.
    pub(crate) fn text(&self, name: &str) -> Option<String> {
        self.form
            .fields
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(ToOwned::to_owned)
    }

    pub(crate) fn required(&self, name: &'static str) -> Result<String, FieldError> {
        self.text(name).ok_or(FieldError::Missing(name))
    }

    pub(crate) fn parse<T>(&self, name: &'static str) -> Result<Option<T>, FieldError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.text(name)
            .map(|value| value.parse().map_err(|error| FieldError::invalid(name, error)))
            .transpose()
    }

    /// A JSON array sent as a single text field.
    pub(crate) fn list<T>(&self, name: &'static str) -> Result<Option<Vec<T>>, FieldError>
    where
        T: DeserializeOwned,
    {
        self.text(name)
            .map(|value| {
                serde_json::from_str(&value).map_err(|error| FieldError::invalid(name, error))
            })
            .transpose()
    }

    pub(crate) fn file(&self, name: &str) -> Option<&'a FilePart> {
        self.form.files.get(name)
    }
}
