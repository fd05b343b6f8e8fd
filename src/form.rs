//! # Form Buffer
//!
//! Unsaved field edits for the create and edit flows. Nothing here validates; the entity
//! store decides at submission whether the fields may be sent.

use crate::model::{Price, ProductFields};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("unknown form field: {0}")]
    UnknownField(String),
    #[error("form field {0} takes text, got {1}")]
    ExpectedText(&'static str, f64),
}

/// The keys the presentation layer may edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Price,
}

impl FromStr for FormField {
    type Err = FormError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        match key {
            "name" => Ok(FormField::Name),
            "price" => Ok(FormField::Price),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

/// A value typed into the form.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

/// Starts as `{ name: "", price: 0 }`, the same value [`FormBuffer::reset`] returns to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormBuffer {
    fields: ProductFields,
}

impl FormBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces one field and keeps the other. The name only takes text.
    pub fn set_field(&mut self, field: FormField, value: FieldValue) -> Result<(), FormError> {
        match (field, value) {
            (FormField::Name, FieldValue::Text(name)) => self.fields.name = name,
            (FormField::Name, FieldValue::Number(n)) => {
                return Err(FormError::ExpectedText("name", n));
            }
            (FormField::Price, FieldValue::Text(s)) => self.fields.price = Price::Text(s),
            (FormField::Price, FieldValue::Number(n)) => self.fields.price = Price::Number(n),
        }
        Ok(())
    }

    /// Copies `fields` in. Later changes to the source do not reach the buffer.
    pub fn seed(&mut self, fields: ProductFields) {
        self.fields = fields;
    }

    pub fn reset(&mut self) {
        self.fields = ProductFields::default();
    }

    pub fn fields(&self) -> &ProductFields {
        &self.fields
    }
}
