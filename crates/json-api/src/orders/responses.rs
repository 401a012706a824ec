//! Order Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sowraashi_app::domain::orders::records::{OrderRecord, OrderStats, ProgressUpdateRecord};

use crate::responses::PaginationResponse;

/// One progress note in an order's history.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProgressUpdateResponse {
    pub uuid: Uuid,
    pub date: String,
    pub status: String,
    pub description: String,
    pub updated_by: String,
}

impl From<ProgressUpdateRecord> for ProgressUpdateResponse {
    fn from(update: ProgressUpdateRecord) -> Self {
        ProgressUpdateResponse {
            uuid: update.uuid.into_uuid(),
            date: update.date.to_string(),
            status: update.status.to_string(),
            description: update.description,
            updated_by: update.updated_by,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,

    /// Staff member who owns the order, absent for storefront orders
    pub designer_uuid: Option<Uuid>,
    pub designer_name: Option<String>,
    pub order_type: String,
    pub saree_type: String,
    pub material: String,
    pub color: String,
    pub design: String,
    pub measurements: Option<String>,
    pub order_placed_date: String,
    pub expected_delivery_date: String,
    pub actual_delivery_date: Option<String>,
    pub payment_method: String,
    pub payment_status: String,

    /// Amounts are in paise
    pub amount: u64,
    pub advance_amount: u64,
    pub balance_amount: u64,
    pub upi_transaction_id: Option<String>,
    pub upi_payment_proof: Option<String>,
    pub status: String,
    pub special_instructions: Option<String>,
    pub fabric_swatch: Option<String>,
    pub design_sketch: Option<String>,
    pub progress_updates: Vec<ProgressUpdateResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            uuid: order.uuid.into_uuid(),
            customer_name: order.customer_name,
            customer_phone: order.customer_phone,
            customer_email: order.customer_email,
            designer_uuid: order.designer_uuid.map(|designer| designer.into_uuid()),
            designer_name: order.designer_name,
            order_type: order.order_type.to_string(),
            saree_type: order.saree_type,
            material: order.material,
            color: order.color,
            design: order.design,
            measurements: order.measurements,
            order_placed_date: order.order_placed_date.to_string(),
            expected_delivery_date: order.expected_delivery_date.to_string(),
            actual_delivery_date: order.actual_delivery_date.map(|date| date.to_string()),
            payment_method: order.payment_method.to_string(),
            payment_status: order.payment_status.to_string(),
            amount: order.amount,
            advance_amount: order.advance_amount,
            balance_amount: order.balance_amount,
            upi_transaction_id: order.upi_transaction_id,
            upi_payment_proof: order.upi_payment_proof,
            status: order.status.to_string(),
            special_instructions: order.special_instructions,
            fabric_swatch: order.fabric_swatch,
            design_sketch: order.design_sketch,
            progress_updates: order.progress_updates.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// An order wrapped with a confirmation message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderMessageResponse {
    pub message: String,
    pub order: OrderResponse,
}

impl OrderMessageResponse {
    pub(crate) fn new(message: &str, order: OrderRecord) -> Self {
        Self {
            message: message.to_owned(),
            order: order.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    pub orders: Vec<OrderResponse>,
    pub pagination: PaginationResponse,
}

/// Dashboard counters.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderStatsResponse {
    pub total_orders: u64,

    /// Sum of order totals in paise
    pub total_amount: u64,
    pub pending_orders: u64,
    pub in_progress_orders: u64,
    pub ready_orders: u64,
    pub delivered_orders: u64,
    pub cancelled_orders: u64,
}

impl From<OrderStats> for OrderStatsResponse {
    fn from(stats: OrderStats) -> Self {
        OrderStatsResponse {
            total_orders: stats.total_orders,
            total_amount: stats.total_amount,
            pending_orders: stats.pending,
            in_progress_orders: stats.in_progress,
            ready_orders: stats.ready,
            delivered_orders: stats.delivered,
            cancelled_orders: stats.cancelled,
        }
    }
}
