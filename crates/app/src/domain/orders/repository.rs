//! Orders Repository

use jiff::civil::Date;
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    auth::UserUuid,
    domain::orders::{
        OrdersServiceError,
        access::OrderScope,
        data::{OrderAmounts, OrderFilter, OrderType, OrderUpdate, PaymentMethod, PaymentStatus},
        records::{OrderRecord, OrderStats, OrderUuid, ProgressUpdateRecord, ProgressUpdateUuid},
        status::OrderStatus,
    },
    pagination::PageRequest,
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("sql/lock_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const COUNT_ORDERS_SQL: &str = include_str!("sql/count_orders.sql");
const LIST_PROGRESS_UPDATES_SQL: &str = include_str!("sql/list_progress_updates.sql");
const APPEND_PROGRESS_UPDATE_SQL: &str = include_str!("sql/append_progress_update.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");
const UPDATE_ORDER_PAYMENT_SQL: &str = include_str!("sql/update_order_payment.sql");
const UPDATE_ORDER_SQL: &str = include_str!("sql/update_order.sql");
const DELETE_ORDER_SQL: &str = include_str!("sql/delete_order.sql");
const ORDER_STATS_SQL: &str = include_str!("sql/order_stats.sql");

/// Owner of a newly created order.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Designer<'a> {
    pub uuid: UserUuid,
    pub name: &'a str,
}

/// Column values for a new order row.
#[derive(Debug, Clone)]
pub(crate) struct NewOrderRow<'a> {
    pub uuid: OrderUuid,
    pub customer_name: &'a str,
    pub customer_phone: &'a str,
    pub customer_email: Option<&'a str>,
    pub designer: Option<Designer<'a>>,
    pub order_type: OrderType,
    pub saree_type: &'a str,
    pub material: &'a str,
    pub color: &'a str,
    pub design: &'a str,
    pub measurements: Option<&'a str>,
    pub order_placed_date: Date,
    pub expected_delivery_date: Date,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub amounts: OrderAmounts,
    pub upi_payment_proof: Option<&'a str>,
    pub special_instructions: Option<&'a str>,
    pub fabric_swatch: Option<&'a str>,
    pub design_sketch: Option<&'a str>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrderRow<'_>,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let created = query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.customer_name)
            .bind(order.customer_phone)
            .bind(order.customer_email)
            .bind(order.designer.map(|designer| designer.uuid.into_uuid()))
            .bind(order.designer.map(|designer| designer.name))
            .bind(order.order_type.as_str())
            .bind(order.saree_type)
            .bind(order.material)
            .bind(order.color)
            .bind(order.design)
            .bind(order.measurements)
            .bind(SqlxDate::from(order.order_placed_date))
            .bind(SqlxDate::from(order.expected_delivery_date))
            .bind(order.payment_method.as_str())
            .bind(order.payment_status.as_str())
            .bind(i64::try_from(order.amounts.amount())?)
            .bind(i64::try_from(order.amounts.advance())?)
            .bind(i64::try_from(order.amounts.balance())?)
            .bind(order.upi_payment_proof)
            .bind(order.special_instructions)
            .bind(order.fabric_swatch)
            .bind(order.design_sketch)
            .fetch_one(&mut **tx)
            .await?;

        Ok(created)
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch an order and hold its row lock until the transaction ends.
    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        scope: OrderScope,
        filter: OrderFilter,
        page: PageRequest,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let orders = query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(scope.designer().map(UserUuid::into_uuid))
            .bind(filter.status.map(OrderStatus::as_str))
            .bind(i64::from(page.limit()))
            .bind(i64::try_from(page.offset())?)
            .fetch_all(&mut **tx)
            .await?;

        Ok(orders)
    }

    pub(crate) async fn count_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        scope: OrderScope,
        filter: OrderFilter,
    ) -> Result<u64, OrdersServiceError> {
        let count: i64 = query_scalar(COUNT_ORDERS_SQL)
            .bind(scope.designer().map(UserUuid::into_uuid))
            .bind(filter.status.map(OrderStatus::as_str))
            .fetch_one(&mut **tx)
            .await?;

        Ok(u64::try_from(count)?)
    }

    /// Progress history for the given orders, oldest first within each order.
    pub(crate) async fn list_progress_updates(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<ProgressUpdateRecord>, sqlx::Error> {
        let uuids: Vec<Uuid> = orders.iter().map(|order| order.into_uuid()).collect();

        query_as::<Postgres, ProgressUpdateRecord>(LIST_PROGRESS_UPDATES_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn append_progress_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
        description: &str,
        updated_by: &str,
    ) -> Result<ProgressUpdateRecord, sqlx::Error> {
        query_as::<Postgres, ProgressUpdateRecord>(APPEND_PROGRESS_UPDATE_SQL)
            .bind(ProgressUpdateUuid::new().into_uuid())
            .bind(order.into_uuid())
            .bind(status.as_str())
            .bind(description)
            .bind(updated_by)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_payment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        payment_status: PaymentStatus,
        upi_transaction_id: Option<&str>,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(UPDATE_ORDER_PAYMENT_SQL)
            .bind(order.into_uuid())
            .bind(payment_status.as_str())
            .bind(upi_transaction_id)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        update: &OrderUpdate,
        amounts: OrderAmounts,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let updated = query_as::<Postgres, OrderRecord>(UPDATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(update.customer_name.as_deref())
            .bind(update.customer_phone.as_deref())
            .bind(update.customer_email.as_deref())
            .bind(update.saree_type.as_deref())
            .bind(update.material.as_deref())
            .bind(update.color.as_deref())
            .bind(update.design.as_deref())
            .bind(update.measurements.as_deref())
            .bind(update.expected_delivery_date.map(SqlxDate::from))
            .bind(i64::try_from(amounts.amount())?)
            .bind(i64::try_from(amounts.advance())?)
            .bind(i64::try_from(amounts.balance())?)
            .bind(update.special_instructions.as_deref())
            .fetch_one(&mut **tx)
            .await?;

        Ok(updated)
    }

    pub(crate) async fn delete_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ORDER_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn stats(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        designer: Option<UserUuid>,
    ) -> Result<OrderStats, sqlx::Error> {
        query_as::<Postgres, OrderStats>(ORDER_STATS_SQL)
            .bind(designer.map(UserUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await
    }
}

fn decode_error(
    column: &str,
    source: impl std::error::Error + Send + Sync + 'static,
) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}

fn parse_column<T>(row: &PgRow, column: &str) -> sqlx::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    row.try_get::<String, _>(column)?
        .parse()
        .map_err(|error| decode_error(column, error))
}

fn unsigned_column(row: &PgRow, column: &str) -> sqlx::Result<u64> {
    u64::try_from(row.try_get::<i64, _>(column)?).map_err(|error| decode_error(column, error))
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get::<Uuid, _>("uuid")?.into(),
            customer_name: row.try_get("customer_name")?,
            customer_phone: row.try_get("customer_phone")?,
            customer_email: row.try_get("customer_email")?,
            designer_uuid: row
                .try_get::<Option<Uuid>, _>("designer_uuid")?
                .map(UserUuid::from_uuid),
            designer_name: row.try_get("designer_name")?,
            order_type: parse_column(row, "order_type")?,
            saree_type: row.try_get("saree_type")?,
            material: row.try_get("material")?,
            color: row.try_get("color")?,
            design: row.try_get("design")?,
            measurements: row.try_get("measurements")?,
            order_placed_date: row.try_get::<SqlxDate, _>("order_placed_date")?.to_jiff(),
            expected_delivery_date: row
                .try_get::<SqlxDate, _>("expected_delivery_date")?
                .to_jiff(),
            actual_delivery_date: row
                .try_get::<Option<SqlxTimestamp>, _>("actual_delivery_date")?
                .map(SqlxTimestamp::to_jiff),
            payment_method: parse_column(row, "payment_method")?,
            payment_status: parse_column(row, "payment_status")?,
            amount: unsigned_column(row, "amount")?,
            advance_amount: unsigned_column(row, "advance_amount")?,
            balance_amount: unsigned_column(row, "balance_amount")?,
            upi_transaction_id: row.try_get("upi_transaction_id")?,
            upi_payment_proof: row.try_get("upi_payment_proof")?,
            status: parse_column(row, "status")?,
            special_instructions: row.try_get("special_instructions")?,
            fabric_swatch: row.try_get("fabric_swatch")?,
            design_sketch: row.try_get("design_sketch")?,
            progress_updates: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProgressUpdateRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get::<Uuid, _>("uuid")?.into(),
            order_uuid: row.try_get::<Uuid, _>("order_uuid")?.into(),
            date: row.try_get::<SqlxTimestamp, _>("date")?.to_jiff(),
            status: parse_column(row, "status")?,
            description: row.try_get("description")?,
            updated_by: row.try_get("updated_by")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderStats {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            total_orders: unsigned_column(row, "total_orders")?,
            total_amount: unsigned_column(row, "total_amount")?,
            pending: unsigned_column(row, "pending")?,
            in_progress: unsigned_column(row, "in_progress")?,
            ready: unsigned_column(row, "ready")?,
            delivered: unsigned_column(row, "delivered")?,
            cancelled: unsigned_column(row, "cancelled")?,
        })
    }
}
