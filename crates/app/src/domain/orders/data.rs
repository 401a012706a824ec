//! Order Data

use std::{fmt, str::FromStr};

use jiff::civil::Date;
use thiserror::Error;

use crate::domain::orders::{OrdersServiceError, records::OrderUuid, status::OrderStatus};

/// Saree type recorded for walk-in custom orders.
pub const CUSTOM_SAREE_TYPE: &str = "Custom Design";

/// Material and color recorded for walk-in custom orders.
pub const AS_PER_DESIGN: &str = "As per design";

#[derive(Debug, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownValue {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

macro_rules! string_enum {
    (
        $(#[$meta:meta])* $name:ident, $kind:literal,
        { $($(#[$variant_meta:meta])* $variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$variant_meta])* $variant),+
        }

        impl $name {
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownValue;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($text => Ok(Self::$variant),)+
                    other => Err(UnknownValue::new($kind, other)),
                }
            }
        }
    };
}

string_enum!(
    /// How the customer pays.
    PaymentMethod, "payment method", {
        Cash => "cash",
        Online => "online",
    }
);

string_enum!(
    /// Payment progress of an order.
    #[derive(Default)]
    PaymentStatus, "payment status", {
        #[default]
        Pending => "pending",
        Paid => "paid",
        Completed => "completed",
        Failed => "failed",
        PaymentSuccessful => "paymentSuccessful",
    }
);

string_enum!(
    #[derive(Default)]
    OrderType, "order type", {
        #[default]
        CustomDesign => "custom-design",
        ReadyMade => "ready-made",
    }
);


/// Order total, advance and the balance derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderAmounts {
    amount: u64,
    advance: u64,
}

impl OrderAmounts {
    /// # Errors
    ///
    /// Returns [`OrdersServiceError::InvalidData`] when the advance exceeds the total.
    pub fn new(amount: u64, advance: u64) -> Result<Self, OrdersServiceError> {
        if advance > amount {
            return Err(OrdersServiceError::InvalidData(
                "advance amount cannot exceed the order amount",
            ));
        }

        Ok(Self { amount, advance })
    }

    #[must_use]
    pub const fn amount(self) -> u64 {
        self.amount
    }

    #[must_use]
    pub const fn advance(self) -> u64 {
        self.advance
    }

    #[must_use]
    pub const fn balance(self) -> u64 {
        self.amount - self.advance
    }
}

/// Custom order placed from the public storefront.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPublicOrder {
    pub uuid: OrderUuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub design: String,
    pub amount: u64,
    pub advance_amount: u64,
    pub payment_method: PaymentMethod,
    pub payment_status: Option<PaymentStatus>,
    pub order_placed_date: Date,
    pub expected_delivery_date: Date,
}

impl NewPublicOrder {
    /// # Errors
    ///
    /// Returns [`OrdersServiceError::InvalidData`] naming the first offending field.
    pub fn validate(&self) -> Result<OrderAmounts, OrdersServiceError> {
        require_text(&self.customer_name, "name is required")?;
        require_text(&self.customer_phone, "mobile is required")?;
        require_text(&self.design, "design description is required")?;
        check_dates(self.order_placed_date, self.expected_delivery_date)?;
        require_amount(self.amount)?;

        OrderAmounts::new(self.amount, self.advance_amount)
    }
}

/// Order entered by staff on behalf of a customer.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDesignerOrder {
    pub uuid: OrderUuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub order_type: OrderType,
    pub saree_type: String,
    pub material: String,
    pub color: String,
    pub design: String,
    pub measurements: Option<String>,
    pub expected_delivery_date: Date,
    pub payment_method: PaymentMethod,
    pub amount: u64,
    pub advance_amount: u64,
    pub special_instructions: Option<String>,
    pub fabric_swatch: Option<String>,
    pub design_sketch: Option<String>,
    pub upi_payment_proof: Option<String>,
}

impl NewDesignerOrder {
    /// # Errors
    ///
    /// Returns [`OrdersServiceError::InvalidData`] naming the first offending field.
    pub fn validate(&self, today: Date) -> Result<OrderAmounts, OrdersServiceError> {
        require_text(&self.customer_name, "customer name is required")?;
        require_text(&self.customer_phone, "customer phone is required")?;
        require_text(&self.saree_type, "saree type is required")?;
        require_text(&self.material, "material is required")?;
        require_text(&self.color, "color is required")?;
        require_text(&self.design, "design is required")?;
        check_dates(today, self.expected_delivery_date)?;
        require_amount(self.amount)?;

        OrderAmounts::new(self.amount, self.advance_amount)
    }
}

/// Listing filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
}

/// Status change with the note recorded against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub status: OrderStatus,
    pub description: String,
}

/// Payment status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentUpdate {
    pub payment_status: PaymentStatus,
    pub upi_transaction_id: Option<String>,
}

/// Editable order details. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderUpdate {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub saree_type: Option<String>,
    pub material: Option<String>,
    pub color: Option<String>,
    pub design: Option<String>,
    pub measurements: Option<String>,
    pub expected_delivery_date: Option<Date>,
    pub amount: Option<u64>,
    pub advance_amount: Option<u64>,
    pub special_instructions: Option<String>,
}

impl OrderUpdate {
    /// # Errors
    ///
    /// Returns [`OrdersServiceError::InvalidData`] when a required field is blanked.
    pub fn validate(&self) -> Result<(), OrdersServiceError> {
        let required = [
            (&self.customer_name, "customer name cannot be blank"),
            (&self.customer_phone, "customer phone cannot be blank"),
            (&self.saree_type, "saree type cannot be blank"),
            (&self.material, "material cannot be blank"),
            (&self.color, "color cannot be blank"),
            (&self.design, "design cannot be blank"),
        ];

        for (value, reason) in required {
            if let Some(value) = value {
                require_text(value, reason)?;
            }
        }

        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`OrdersServiceError::InvalidData`] when the new delivery date falls
    /// before the date the order was placed.
    pub fn check_delivery(&self, placed: Date) -> Result<(), OrdersServiceError> {
        self.expected_delivery_date
            .map_or(Ok(()), |expected| check_dates(placed, expected))
    }
}

fn require_text(value: &str, reason: &'static str) -> Result<(), OrdersServiceError> {
    if value.trim().is_empty() {
        Err(OrdersServiceError::InvalidData(reason))
    } else {
        Ok(())
    }
}

fn require_amount(amount: u64) -> Result<(), OrdersServiceError> {
    if amount == 0 {
        Err(OrdersServiceError::InvalidData("amount must be greater than zero"))
    } else {
        Ok(())
    }
}

fn check_dates(placed: Date, expected_delivery: Date) -> Result<(), OrdersServiceError> {
    if expected_delivery < placed {
        Err(OrdersServiceError::InvalidData(
            "delivery date cannot be before the order date",
        ))
    } else {
        Ok(())
    }
}
