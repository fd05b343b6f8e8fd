//! Product records as the client sees them.
//!
//! # Identity
//! A product's `id` is assigned by the remote service. A product created locally has no id until
//! (and unless) the server's answer is reconciled into it, see
//! [`SyncPolicy::reconcile_id_on_create_success`](crate::config::SyncPolicy).
//!
//! # Remote Service
//! [`Product`] also implements [`ActorEntity`](actor_framework::ActorEntity) so the
//! in-process service in [`product_actor`](crate::product_actor) can serve it.
use serde::{Deserialize, Serialize};

use std::fmt::Display;

/// Opaque, server-assigned identifier for Products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(format!("product_{}", id))
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A price as typed by a user or returned by the service: a number, or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Number(f64),
    Text(String),
}

impl Price {
    /// A price counts as present when it is a non-zero number or non-empty text.
    pub fn is_present(&self) -> bool {
        match self {
            Price::Number(n) => *n != 0.0 && !n.is_nan(),
            Price::Text(s) => !s.is_empty(),
        }
    }
}

impl Default for Price {
    fn default() -> Self {
        Price::Number(0.0)
    }
}

impl From<f64> for Price {
    fn from(n: f64) -> Self {
        Price::Number(n)
    }
}

impl From<&str> for Price {
    fn from(s: &str) -> Self {
        Price::Text(s.to_string())
    }
}

impl From<String> for Price {
    fn from(s: String) -> Self {
        Price::Text(s)
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Price::Number(n) => write!(f, "{}", n),
            Price::Text(s) => f.write_str(s),
        }
    }
}

/// The user-editable part of a product: what gets sent on create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFields {
    pub name: String,
    pub price: Price,
}

impl ProductFields {
    pub fn new(name: impl Into<String>, price: impl Into<Price>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
        }
    }

    /// Fields may only be sent to the service with a non-empty name and a present price.
    pub fn is_submittable(&self) -> bool {
        !self.name.is_empty() && self.price.is_present()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<ProductId>,
    pub name: String,
    pub price: Price,
}

impl Product {
    /// Creates a Product the service already knows about.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: impl Into<Price>) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
            price: price.into(),
        }
    }

    /// A product that exists only locally, before the service has assigned an id.
    pub fn draft(fields: ProductFields) -> Self {
        Self {
            id: None,
            name: fields.name,
            price: fields.price,
        }
    }

    /// Builds a product from fields under a known id.
    pub fn with_id(id: ProductId, fields: ProductFields) -> Self {
        Self {
            id: Some(id),
            name: fields.name,
            price: fields.price,
        }
    }

    pub fn fields(&self) -> ProductFields {
        ProductFields {
            name: self.name.clone(),
            price: self.price.clone(),
        }
    }

    pub fn has_id(&self, id: &ProductId) -> bool {
        self.id.as_ref() == Some(id)
    }
}
