//! Order request decoding.
//!
//! Dates arrive either as `YYYY-MM-DD` or as full ISO timestamps from
//! browser date pickers. Timestamps are reduced to their UTC calendar date.

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use sowraashi_app::domain::orders::{
    data::{
        NewDesignerOrder, NewPublicOrder, OrderType, OrderUpdate, PaymentMethod, PaymentStatus,
        PaymentUpdate, StatusUpdate,
    },
    records::OrderUuid,
    status::OrderStatus,
};

use crate::forms::{FieldError, FormFields};

pub(crate) fn parse_date(value: &str) -> Result<Date, jiff::Error> {
    let value = value.trim();

    value.parse::<Date>().or_else(|_not_a_date| {
        value
            .parse::<Timestamp>()
            .map(|timestamp| timestamp.to_zoned(TimeZone::UTC).date())
    })
}

fn date_field(field: &'static str, value: Option<&str>) -> Result<Date, FieldError> {
    let value = value.ok_or(FieldError::Missing(field))?;

    parse_date(value).map_err(|error| FieldError::invalid(field, error))
}

fn required<T>(field: &'static str, value: Option<T>) -> Result<T, FieldError> {
    value.ok_or(FieldError::Missing(field))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// An amount in whole paise, sent as a JSON number or as form text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub(crate) enum AmountInput {
    Paise(u64),
    Text(String),
}

impl AmountInput {
    /// Blank text counts as absent. Fractions and signs are rejected.
    fn resolve(self, field: &'static str) -> Result<Option<u64>, FieldError> {
        match self {
            Self::Paise(paise) => Ok(Some(paise)),
            Self::Text(text) => {
                let text = text.trim();

                if text.is_empty() {
                    return Ok(None);
                }

                text.parse::<u64>().map(Some).map_err(|error| {
                    FieldError::invalid(field, format!("`{text}` is not whole paise: {error}"))
                })
            }
        }
    }
}

fn amount(field: &'static str, value: Option<AmountInput>) -> Result<Option<u64>, FieldError> {
    value.map_or(Ok(None), |value| value.resolve(field))
}

/// Custom Order Request
///
/// Placed from the public storefront without an account.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct CustomOrderRequest {
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub design_description: Option<String>,

    /// Order total in paise
    pub total_bill: Option<AmountInput>,

    /// Advance paid in paise
    pub advance_payment: Option<AmountInput>,
    pub payment_method: Option<String>,
    pub payment_status: Option<String>,

    /// Date the order was placed
    pub present_date: Option<String>,

    /// Promised delivery date
    pub delivery_date: Option<String>,
}

impl CustomOrderRequest {
    pub(crate) fn into_new_order(self) -> Result<NewPublicOrder, FieldError> {
        let payment_method = required("paymentMethod", non_blank(self.payment_method))?
            .parse::<PaymentMethod>()
            .map_err(|error| FieldError::invalid("paymentMethod", error))?;

        let payment_status = non_blank(self.payment_status)
            .map(|status| status.parse::<PaymentStatus>())
            .transpose()
            .map_err(|error| FieldError::invalid("paymentStatus", error))?;

        Ok(NewPublicOrder {
            uuid: OrderUuid::new(),
            customer_name: required("name", non_blank(self.name))?,
            customer_phone: required("mobile", non_blank(self.mobile))?,
            design: required("designDescription", non_blank(self.design_description))?,
            amount: required(
                "totalBill",
                amount("totalBill", self.total_bill)?.filter(|bill| *bill > 0),
            )?,
            advance_amount: amount("advancePayment", self.advance_payment)?.unwrap_or(0),
            payment_method,
            payment_status,
            order_placed_date: date_field("presentDate", self.present_date.as_deref())?,
            expected_delivery_date: date_field("deliveryDate", self.delivery_date.as_deref())?,
        })
    }
}

/// Public URLs of the images attached to a designer order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct OrderUploads {
    pub fabric_swatch: Option<String>,
    pub design_sketch: Option<String>,
    pub upi_payment_proof: Option<String>,
}

/// A staff order decoded from its multipart form, before any file is stored.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DesignerOrderForm {
    customer_name: String,
    customer_phone: String,
    customer_email: Option<String>,
    order_type: OrderType,
    saree_type: String,
    material: String,
    color: String,
    design: String,
    measurements: Option<String>,
    expected_delivery_date: Date,
    payment_method: PaymentMethod,
    amount: u64,
    advance_amount: u64,
    special_instructions: Option<String>,
}

impl DesignerOrderForm {
    pub(crate) fn parse(fields: &FormFields<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            customer_name: fields.required("customerName")?,
            customer_phone: fields.required("customerPhone")?,
            customer_email: fields.text("customerEmail"),
            order_type: fields.parse("orderType")?.unwrap_or_default(),
            saree_type: fields.required("sareeType")?,
            material: fields.required("material")?,
            color: fields.required("color")?,
            design: fields.required("design")?,
            measurements: fields.text("measurements"),
            expected_delivery_date: date_field(
                "expectedDeliveryDate",
                fields.text("expectedDeliveryDate").as_deref(),
            )?,
            payment_method: required("paymentMethod", fields.parse("paymentMethod")?)?,
            amount: required("amount", fields.parse("amount")?)?,
            advance_amount: fields.parse("advanceAmount")?.unwrap_or(0),
            special_instructions: fields.text("specialInstructions"),
        })
    }

    /// Label used to name this order's uploads on disk.
    pub(crate) fn upload_label(&self) -> &str {
        &self.customer_name
    }

    pub(crate) fn into_new_order(self, uploads: OrderUploads) -> NewDesignerOrder {
        NewDesignerOrder {
            uuid: OrderUuid::new(),
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            customer_email: self.customer_email,
            order_type: self.order_type,
            saree_type: self.saree_type,
            material: self.material,
            color: self.color,
            design: self.design,
            measurements: self.measurements,
            expected_delivery_date: self.expected_delivery_date,
            payment_method: self.payment_method,
            amount: self.amount,
            advance_amount: self.advance_amount,
            special_instructions: self.special_instructions,
            fabric_swatch: uploads.fabric_swatch,
            design_sketch: uploads.design_sketch,
            upi_payment_proof: uploads.upi_payment_proof,
        }
    }
}

/// Status Update Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct StatusRequest {
    /// One of `pending`, `in-progress`, `ready`, `delivered` or `cancelled`
    pub status: Option<String>,

    /// Progress note recorded with the change
    pub description: Option<String>,
}

impl TryFrom<StatusRequest> for StatusUpdate {
    type Error = FieldError;

    fn try_from(request: StatusRequest) -> Result<Self, Self::Error> {
        let status = required("status", non_blank(request.status))?
            .parse::<OrderStatus>()
            .map_err(|error| FieldError::invalid("status", error))?;

        Ok(StatusUpdate {
            status,
            description: required("description", non_blank(request.description))?,
        })
    }
}

/// Payment Update Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct PaymentRequest {
    pub payment_status: Option<String>,
    pub upi_transaction_id: Option<String>,
}

impl TryFrom<PaymentRequest> for PaymentUpdate {
    type Error = FieldError;

    fn try_from(request: PaymentRequest) -> Result<Self, Self::Error> {
        let payment_status = required("paymentStatus", non_blank(request.payment_status))?
            .parse::<PaymentStatus>()
            .map_err(|error| FieldError::invalid("paymentStatus", error))?;

        Ok(PaymentUpdate {
            payment_status,
            upi_transaction_id: non_blank(request.upi_transaction_id),
        })
    }
}

/// Update Order Request
///
/// Absent fields keep their stored value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct UpdateOrderRequest {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub saree_type: Option<String>,
    pub material: Option<String>,
    pub color: Option<String>,
    pub design: Option<String>,
    pub measurements: Option<String>,
    pub expected_delivery_date: Option<String>,
    pub amount: Option<u64>,
    pub advance_amount: Option<u64>,
    pub special_instructions: Option<String>,
}

impl TryFrom<UpdateOrderRequest> for OrderUpdate {
    type Error = FieldError;

    fn try_from(request: UpdateOrderRequest) -> Result<Self, Self::Error> {
        let expected_delivery_date = request
            .expected_delivery_date
            .as_deref()
            .map(|value| date_field("expectedDeliveryDate", Some(value)))
            .transpose()?;

        Ok(OrderUpdate {
            customer_name: request.customer_name,
            customer_phone: request.customer_phone,
            customer_email: request.customer_email,
            saree_type: request.saree_type,
            material: request.material,
            color: request.color,
            design: request.design,
            measurements: request.measurements,
            expected_delivery_date,
            amount: request.amount,
            advance_amount: request.advance_amount,
            special_instructions: request.special_instructions,
        })
    }
}
