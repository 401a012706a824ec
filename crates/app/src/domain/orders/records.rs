//! Order Records

use jiff::{Timestamp, civil::Date};

use crate::{
    auth::UserUuid,
    domain::orders::{
        data::{OrderType, PaymentMethod, PaymentStatus},
        status::OrderStatus,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Progress Update UUID
pub type ProgressUpdateUuid = TypedUuid<ProgressUpdateRecord>;

/// Order Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub designer_uuid: Option<UserUuid>,
    pub designer_name: Option<String>,
    pub order_type: OrderType,
    pub saree_type: String,
    pub material: String,
    pub color: String,
    pub design: String,
    pub measurements: Option<String>,
    pub order_placed_date: Date,
    pub expected_delivery_date: Date,
    pub actual_delivery_date: Option<Timestamp>,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub amount: u64,
    pub advance_amount: u64,
    pub balance_amount: u64,
    pub upi_transaction_id: Option<String>,
    pub upi_payment_proof: Option<String>,
    pub status: OrderStatus,
    pub special_instructions: Option<String>,
    pub fabric_swatch: Option<String>,
    pub design_sketch: Option<String>,
    pub progress_updates: Vec<ProgressUpdateRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One entry in an order's progress history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdateRecord {
    pub uuid: ProgressUpdateUuid,
    pub order_uuid: OrderUuid,
    pub date: Timestamp,
    pub status: OrderStatus,
    pub description: String,
    pub updated_by: String,
}

/// Aggregate counts for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderStats {
    pub total_orders: u64,
    pub total_amount: u64,
    pub pending: u64,
    pub in_progress: u64,
    pub ready: u64,
    pub delivered: u64,
    pub cancelled: u64,
}
