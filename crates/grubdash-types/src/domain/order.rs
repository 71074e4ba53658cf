use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::fields::{conflicting_id, non_empty_text, positive_integer};

/// Order lifecycle status.
///
/// Creation stores whatever status the client sent, so values outside the
/// four known states survive as [`OrderStatus::Other`]. Updates only ever
/// write one of the known states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Preparing,
    OutForDelivery,
    Delivered,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out-for-delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, OrderStatus::Other(_))
    }
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => OrderStatus::Pending,
            "preparing" => OrderStatus::Preparing,
            "out-for-delivery" => OrderStatus::OutForDelivery,
            "delivered" => OrderStatus::Delivered,
            _ => OrderStatus::Other(raw),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of an order's dish list. Only `quantity` is interpreted; the
/// rest of the dish object is kept as sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub quantity: i64,
    #[serde(flatten)]
    pub dish: Map<String, Value>,
}

impl OrderLine {
    fn from_value(value: Value) -> Option<Self> {
        let Value::Object(mut dish) = value else {
            return None;
        };
        let quantity = positive_integer(dish.remove("quantity"))?;
        Some(Self { quantity, dish })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub deliver_to: String,
    pub mobile_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    pub dishes: Vec<OrderLine>,
}

/// Order fields exactly as a client sent them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    pub id: Option<Value>,
    pub deliver_to: Option<Value>,
    pub mobile_number: Option<Value>,
    pub status: Option<Value>,
    pub dishes: Option<Value>,
}

/// A validated create payload.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub deliver_to: String,
    pub mobile_number: String,
    pub status: Option<OrderStatus>,
    pub dishes: Vec<OrderLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OrderField {
    DeliverTo,
    MobileNumber,
    Dishes,
    Quantity(usize),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Order must include a deliverTo")]
    MissingDeliverTo,
    #[error("Order must include a mobileNumber")]
    MissingMobileNumber,
    #[error("Order must include at least one dish")]
    MissingDishes,
    #[error("Dish {0} must have a quantity that is an integer greater than 0")]
    InvalidQuantity(usize),
    #[error("Order id does not match route id. Order: {body}, Route: {route}")]
    IdMismatch { body: String, route: String },
    #[error("Invalid deliverTo provided for updating the order")]
    InvalidDeliverTo,
    #[error("Invalid mobileNumber provided for updating the order")]
    InvalidMobileNumber,
    #[error("Invalid dishes provided for updating the order")]
    InvalidDishes,
    #[error("Invalid dish quantity for dish at index {0} provided for updating the order")]
    InvalidLineQuantity(usize),
    #[error("A delivered order cannot be changed")]
    Delivered,
    #[error("Order must have a status of pending, preparing, out-for-delivery, delivered")]
    InvalidStatus,
    #[error("An order cannot be deleted unless it is pending")]
    NotPending,
}

impl OrderError {
    fn on_create(field: OrderField) -> Self {
        match field {
            OrderField::DeliverTo => OrderError::MissingDeliverTo,
            OrderField::MobileNumber => OrderError::MissingMobileNumber,
            OrderField::Dishes => OrderError::MissingDishes,
            OrderField::Quantity(index) => OrderError::InvalidQuantity(index),
        }
    }

    fn on_update(field: OrderField) -> Self {
        match field {
            OrderField::DeliverTo => OrderError::InvalidDeliverTo,
            OrderField::MobileNumber => OrderError::InvalidMobileNumber,
            OrderField::Dishes => OrderError::InvalidDishes,
            OrderField::Quantity(index) => OrderError::InvalidLineQuantity(index),
        }
    }
}

struct CheckedFields {
    deliver_to: String,
    mobile_number: String,
    dishes: Vec<OrderLine>,
}

fn line_items(value: Option<Value>) -> Result<Vec<OrderLine>, OrderField> {
    let Some(Value::Array(items)) = value else {
        return Err(OrderField::Dishes);
    };
    if items.is_empty() {
        return Err(OrderField::Dishes);
    }
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| OrderLine::from_value(item).ok_or(OrderField::Quantity(index)))
        .collect()
}

/// Status as stored at creation: strings verbatim, other JSON as its text.
fn stored_status(value: Option<Value>) -> Option<OrderStatus> {
    match value? {
        Value::Null => None,
        Value::String(raw) => Some(OrderStatus::from(raw)),
        other => Some(OrderStatus::Other(other.to_string())),
    }
}

impl OrderInput {
    /// Checks a create payload. The status is not validated.
    pub fn validate_new(mut self) -> Result<OrderDraft, OrderError> {
        let status = stored_status(self.status.take());
        let fields = self.fields().map_err(OrderError::on_create)?;
        Ok(OrderDraft {
            deliver_to: fields.deliver_to,
            mobile_number: fields.mobile_number,
            status,
            dishes: fields.dishes,
        })
    }

    fn fields(self) -> Result<CheckedFields, OrderField> {
        let deliver_to = non_empty_text(self.deliver_to).ok_or(OrderField::DeliverTo)?;
        let mobile_number = non_empty_text(self.mobile_number).ok_or(OrderField::MobileNumber)?;
        let dishes = line_items(self.dishes)?;
        Ok(CheckedFields {
            deliver_to,
            mobile_number,
            dishes,
        })
    }
}

impl Order {
    pub fn new(id: String, draft: OrderDraft) -> Self {
        Self {
            id,
            deliver_to: draft.deliver_to,
            mobile_number: draft.mobile_number,
            status: draft.status,
            dishes: draft.dishes,
        }
    }

    pub fn is_delivered(&self) -> bool {
        self.status == Some(OrderStatus::Delivered)
    }

    pub fn is_pending(&self) -> bool {
        self.status == Some(OrderStatus::Pending)
    }

    /// Validates `input` against this order and overwrites it in place.
    ///
    /// Fields are checked first, then the delivered guard, then the new
    /// status, so a delivered order reports itself as unchangeable even when
    /// the requested status is bogus.
    pub fn apply_update(&mut self, mut input: OrderInput) -> Result<(), OrderError> {
        if let Some(body) = conflicting_id(input.id.take(), &self.id) {
            return Err(OrderError::IdMismatch {
                body,
                route: self.id.clone(),
            });
        }
        let requested = input.status.take();
        let fields = input.fields().map_err(OrderError::on_update)?;

        if self.is_delivered() {
            return Err(OrderError::Delivered);
        }

        let status = match requested {
            Some(Value::String(raw)) => OrderStatus::from(raw),
            _ => return Err(OrderError::InvalidStatus),
        };
        if !status.is_known() {
            return Err(OrderError::InvalidStatus);
        }

        self.deliver_to = fields.deliver_to;
        self.mobile_number = fields.mobile_number;
        self.dishes = fields.dishes;
        self.status = Some(status);
        Ok(())
    }

    pub fn ensure_deletable(&self) -> Result<(), OrderError> {
        if self.is_pending() {
            Ok(())
        } else {
            Err(OrderError::NotPending)
        }
    }
}
