//! Demonstration checkout.
//!
//! Validates the order form and computes the total. Nothing is charged or reserved.

use crate::types::{Event, Price};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

/// Tickets per order
pub const QUANTITY_RANGE: RangeInclusive<u32> = 1..=10;

/// Shown after a successful submission
pub const CONFIRMATION: &str =
    "Purchase successful! This is a demonstration, no real purchase was made.";

/// Order form validation failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PurchaseError {
    /// Quantity outside [`QUANTITY_RANGE`]
    #[error("Quantity must be between 1 and 10, got {0}")]
    InvalidQuantity(u32),

    /// A card field was left empty
    #[error("Missing card field: {0}")]
    MissingCardField(&'static str),
}

/// How the order is paid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    /// Card details are entered in the form
    #[default]
    CreditCard,
    /// Handled off-site
    #[serde(rename = "paypal")]
    PayPal,
}

/// The purchase form as submitted
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchaseForm {
    /// Number of tickets
    pub quantity: u32,
    /// Payment method
    pub payment_method: PaymentMethod,
    /// Name on the card
    pub card_name: String,
    /// Card number
    pub card_number: String,
    /// Expiry date
    pub expiry: String,
    /// Security code
    pub cvc: String,
}

impl PurchaseForm {
    /// Check the form
    ///
    /// # Errors
    ///
    /// Returns [`PurchaseError::InvalidQuantity`] for a quantity outside 1..=10 and
    /// [`PurchaseError::MissingCardField`] if paying by card with an empty card field.
    pub fn validate(&self) -> Result<(), PurchaseError> {
        if !QUANTITY_RANGE.contains(&self.quantity) {
            return Err(PurchaseError::InvalidQuantity(self.quantity));
        }

        if self.payment_method == PaymentMethod::CreditCard {
            for (field, value) in [
                ("card_name", &self.card_name),
                ("card_number", &self.card_number),
                ("expiry", &self.expiry),
                ("cvc", &self.cvc),
            ] {
                if value.trim().is_empty() {
                    return Err(PurchaseError::MissingCardField(field));
                }
            }
        }
        Ok(())
    }
}

/// Order summary shown beside the form
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrderSummary {
    /// The event being bought
    pub event: Event,
    /// Number of tickets
    pub quantity: u32,
    /// Price of one ticket
    pub unit_price: Price,
    /// `unit_price * quantity`
    pub total: Price,
}

impl OrderSummary {
    /// Summarise `quantity` tickets for `event`
    #[must_use]
    pub fn new(event: Event, quantity: u32) -> Self {
        let unit_price = event.price;
        Self {
            total: unit_price.times(quantity),
            event,
            quantity,
            unit_price,
        }
    }
}

/// Result of a valid submission
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Confirmation {
    /// What was "bought"
    pub order: OrderSummary,
    /// Payment method chosen
    pub payment_method: PaymentMethod,
    /// Message for the user
    pub message: &'static str,
}

/// Validate `form` and produce the confirmation
///
/// # Errors
///
/// Returns [`PurchaseError`] if the form is invalid.
pub fn checkout(event: Event, form: &PurchaseForm) -> Result<Confirmation, PurchaseError> {
    form.validate()?;
    let order = OrderSummary::new(event, form.quantity);
    tracing::info!(event_id = %order.event.id, quantity = order.quantity, total = %order.total, "Demonstration purchase completed");
    Ok(Confirmation {
        order,
        payment_method: form.payment_method,
        message: CONFIRMATION,
    })
}
