//! The `Customer` entity and its partial-update structure.

use serde::{Deserialize, Serialize};

use crate::CustomerId;

/// A customer record.
///
/// The identifier is assigned by the store on first save and is immutable
/// afterwards; `id` is `None` only on a draft that has not been persisted
/// yet. All other fields are free text; the service layer enforces no
/// format rules on them, only the uniqueness of `email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Store-assigned identifier (`None` on an unsaved draft).
    pub id: Option<CustomerId>,
    /// Customer name.
    pub name: String,
    /// Email address, unique across all customers.
    pub email: String,
    /// Address (a country/region code in practice, stored as opaque text).
    pub address: String,
}

impl Customer {
    /// Create a draft customer with no identifier.
    ///
    /// The store assigns the identifier when the draft is first saved.
    #[must_use]
    pub fn create(
        name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            address: address.into(),
        }
    }
}

/// A partial update for a customer.
///
/// Each field is a discriminated optional: `None` means "leave the stored
/// value unchanged", `Some(value)` means "set the field to `value`", so
/// `Some(String::new())` unambiguously requests an empty value rather than
/// no change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerPatch {
    /// New name, if a change is requested.
    pub name: Option<String>,
    /// New email, if a change is requested.
    pub email: Option<String>,
    /// New address, if a change is requested.
    pub address: Option<String>,
}
