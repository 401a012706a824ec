//! Orders service.

use async_trait::async_trait;
use jiff::Zoned;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    auth::Principal,
    database::Db,
    domain::orders::{
        access::OrderAccess,
        data::{
            AS_PER_DESIGN, CUSTOM_SAREE_TYPE, NewDesignerOrder, NewPublicOrder, OrderAmounts,
            OrderFilter, OrderType, OrderUpdate, PaymentStatus, PaymentUpdate, StatusUpdate,
        },
        errors::OrdersServiceError,
        records::{OrderRecord, OrderStats, OrderUuid},
        repository::{Designer, NewOrderRow, PgOrdersRepository},
    },
    pagination::{Page, PageRequest},
};

/// Default order listing page size.
pub const DEFAULT_ORDERS_PAGE_LIMIT: u32 = 20;

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
        }
    }

    async fn with_progress(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut orders: Vec<OrderRecord>,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        for update in self.repository.list_progress_updates(tx, &uuids).await? {
            if let Some(order) = orders
                .iter_mut()
                .find(|order| order.uuid == update.order_uuid)
            {
                order.progress_updates.push(update);
            }
        }

        Ok(orders)
    }

    async fn load_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderRecord,
    ) -> Result<OrderRecord, OrdersServiceError> {
        self.with_progress(tx, vec![order])
            .await?
            .pop()
            .ok_or(OrdersServiceError::NotFound)
    }

    /// Lock an order for writing after checking the principal may touch it.
    async fn lock_accessible(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        principal: &Principal,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let locked = self.repository.lock_order(tx, order).await?;

        if !OrderAccess::permits(principal, locked.designer_uuid) {
            return Err(OrdersServiceError::Forbidden);
        }

        Ok(locked)
    }
}

fn optional_text(value: Option<&String>) -> Option<&str> {
    value.map(|value| value.trim()).filter(|value| !value.is_empty())
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_public_order(
        &self,
        order: NewPublicOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let amounts = order.validate()?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_order(
                &mut tx,
                &NewOrderRow {
                    uuid: order.uuid,
                    customer_name: order.customer_name.trim(),
                    customer_phone: order.customer_phone.trim(),
                    customer_email: None,
                    designer: None,
                    order_type: OrderType::CustomDesign,
                    saree_type: CUSTOM_SAREE_TYPE,
                    material: AS_PER_DESIGN,
                    color: AS_PER_DESIGN,
                    design: order.design.trim(),
                    measurements: None,
                    order_placed_date: order.order_placed_date,
                    expected_delivery_date: order.expected_delivery_date,
                    payment_method: order.payment_method,
                    payment_status: order.payment_status.unwrap_or_default(),
                    amounts,
                    upi_payment_proof: None,
                    special_instructions: None,
                    fabric_swatch: None,
                    design_sketch: None,
                },
            )
            .await?;

        tx.commit().await?;

        info!(order = %created.uuid, "public custom order created");

        Ok(created)
    }

    async fn create_designer_order(
        &self,
        principal: &Principal,
        order: NewDesignerOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let today = Zoned::now().date();
        let amounts = order.validate(today)?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_order(
                &mut tx,
                &NewOrderRow {
                    uuid: order.uuid,
                    customer_name: order.customer_name.trim(),
                    customer_phone: order.customer_phone.trim(),
                    customer_email: optional_text(order.customer_email.as_ref()),
                    designer: Some(Designer {
                        uuid: principal.user_uuid,
                        name: &principal.name,
                    }),
                    order_type: order.order_type,
                    saree_type: order.saree_type.trim(),
                    material: order.material.trim(),
                    color: order.color.trim(),
                    design: order.design.trim(),
                    measurements: optional_text(order.measurements.as_ref()),
                    order_placed_date: today,
                    expected_delivery_date: order.expected_delivery_date,
                    payment_method: order.payment_method,
                    payment_status: PaymentStatus::default(),
                    amounts,
                    upi_payment_proof: order.upi_payment_proof.as_deref(),
                    special_instructions: optional_text(order.special_instructions.as_ref()),
                    fabric_swatch: order.fabric_swatch.as_deref(),
                    design_sketch: order.design_sketch.as_deref(),
                },
            )
            .await?;

        tx.commit().await?;

        info!(order = %created.uuid, designer = %principal.user_uuid, "order created");

        Ok(created)
    }

    async fn list_orders(
        &self,
        principal: &Principal,
        filter: OrderFilter,
        page: PageRequest,
    ) -> Result<Page<OrderRecord>, OrdersServiceError> {
        let scope = OrderAccess::scope(principal);

        let mut tx = self.db.begin().await?;

        let orders = self
            .repository
            .list_orders(&mut tx, scope, filter, page)
            .await?;

        let total = self.repository.count_orders(&mut tx, scope, filter).await?;
        let orders = self.with_progress(&mut tx, orders).await?;

        tx.commit().await?;

        Ok(Page::new(orders, page, total))
    }

    async fn get_order(
        &self,
        principal: &Principal,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let found = self.repository.get_order(&mut tx, order).await?;

        if !OrderAccess::permits(principal, found.designer_uuid) {
            return Err(OrdersServiceError::Forbidden);
        }

        let found = self.load_order(&mut tx, found).await?;

        tx.commit().await?;

        Ok(found)
    }

    async fn update_status(
        &self,
        principal: &Principal,
        order: OrderUuid,
        update: StatusUpdate,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let description = update.description.trim();

        if description.is_empty() {
            return Err(OrdersServiceError::InvalidData("description is required"));
        }

        let mut tx = self.db.begin().await?;

        let current = self.lock_accessible(&mut tx, principal, order).await?;
        let next = current.status.transition(update.status)?;

        self.repository
            .append_progress_update(&mut tx, order, next, description, &principal.name)
            .await?;

        let updated = self.repository.update_status(&mut tx, order, next).await?;
        let updated = self.load_order(&mut tx, updated).await?;

        tx.commit().await?;

        info!(
            order = %order,
            from = %current.status,
            to = %next,
            by = %principal.username,
            "order status updated"
        );

        Ok(updated)
    }

    async fn update_payment(
        &self,
        principal: &Principal,
        order: OrderUuid,
        update: PaymentUpdate,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        self.lock_accessible(&mut tx, principal, order).await?;

        let updated = self
            .repository
            .update_payment(
                &mut tx,
                order,
                update.payment_status,
                optional_text(update.upi_transaction_id.as_ref()),
            )
            .await?;

        let updated = self.load_order(&mut tx, updated).await?;

        tx.commit().await?;

        info!(order = %order, payment_status = %update.payment_status, "order payment updated");

        Ok(updated)
    }

    async fn update_order(
        &self,
        principal: &Principal,
        order: OrderUuid,
        update: OrderUpdate,
    ) -> Result<OrderRecord, OrdersServiceError> {
        update.validate()?;

        let mut tx = self.db.begin().await?;

        let current = self.lock_accessible(&mut tx, principal, order).await?;

        update.check_delivery(current.order_placed_date)?;

        let amounts = OrderAmounts::new(
            update.amount.unwrap_or(current.amount),
            update.advance_amount.unwrap_or(current.advance_amount),
        )?;

        let updated = self
            .repository
            .update_order(&mut tx, order, &update, amounts)
            .await?;

        let updated = self.load_order(&mut tx, updated).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_order(
        &self,
        principal: &Principal,
        order: OrderUuid,
    ) -> Result<(), OrdersServiceError> {
        if !principal.is_admin() {
            return Err(OrdersServiceError::Forbidden);
        }

        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_order(&mut tx, order).await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        info!(order = %order, by = %principal.username, "order deleted");

        Ok(())
    }

    async fn stats(&self, principal: &Principal) -> Result<OrderStats, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let stats = self
            .repository
            .stats(&mut tx, OrderAccess::scope(principal).designer())
            .await?;

        tx.commit().await?;

        Ok(stats)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Record a custom order placed from the public storefront.
    async fn create_public_order(
        &self,
        order: NewPublicOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Record an order owned by the calling staff member.
    async fn create_designer_order(
        &self,
        principal: &Principal,
        order: NewDesignerOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Newest orders first, limited to what the principal may see.
    async fn list_orders(
        &self,
        principal: &Principal,
        filter: OrderFilter,
        page: PageRequest,
    ) -> Result<Page<OrderRecord>, OrdersServiceError>;

    async fn get_order(
        &self,
        principal: &Principal,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Move an order through its lifecycle, appending a progress update.
    async fn update_status(
        &self,
        principal: &Principal,
        order: OrderUuid,
        update: StatusUpdate,
    ) -> Result<OrderRecord, OrdersServiceError>;

    async fn update_payment(
        &self,
        principal: &Principal,
        order: OrderUuid,
        update: PaymentUpdate,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Patch editable details and recompute the balance.
    async fn update_order(
        &self,
        principal: &Principal,
        order: OrderUuid,
        update: OrderUpdate,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Remove an order. Admin only.
    async fn delete_order(
        &self,
        principal: &Principal,
        order: OrderUuid,
    ) -> Result<(), OrdersServiceError>;

    /// Dashboard totals. Designers only see their own orders counted.
    async fn stats(&self, principal: &Principal) -> Result<OrderStats, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use crate::{
        auth::Role,
        domain::orders::{data::PaymentMethod, status::OrderStatus},
        test::{
            TestContext,
            helpers::{new_designer_order, new_public_order},
        },
    };

    use super::*;

    fn status(status: OrderStatus, description: &str) -> StatusUpdate {
        StatusUpdate {
            status,
            description: description.to_string(),
        }
    }

    fn first_page() -> PageRequest {
        PageRequest::new(None, None, DEFAULT_ORDERS_PAGE_LIMIT)
    }

    #[tokio::test]
    async fn public_order_records_amounts_and_defaults() -> TestResult {
        let ctx = TestContext::new().await;

        let order = ctx
            .orders
            .create_public_order(NewPublicOrder {
                amount: 5000,
                advance_amount: 1000,
                ..new_public_order()
            })
            .await?;

        assert_eq!(order.amount, 5000);
        assert_eq!(order.advance_amount, 1000);
        assert_eq!(order.balance_amount, 4000);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.order_type, OrderType::CustomDesign);
        assert_eq!(order.saree_type, CUSTOM_SAREE_TYPE);
        assert_eq!(order.material, AS_PER_DESIGN);
        assert_eq!(order.color, AS_PER_DESIGN);
        assert_eq!(order.designer_uuid, None);
        assert!(order.progress_updates.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn public_order_with_advance_above_total_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx
            .orders
            .create_public_order(NewPublicOrder {
                amount: 1000,
                advance_amount: 2000,
                ..new_public_order()
            })
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::InvalidData(_))),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn designer_order_is_owned_by_principal() -> TestResult {
        let ctx = TestContext::new().await;
        let designer = ctx.principal("meera", Role::Designer).await?;

        let order = ctx
            .orders
            .create_designer_order(&designer, new_designer_order())
            .await?;

        assert_eq!(order.designer_uuid, Some(designer.user_uuid));
        assert_eq!(order.designer_name.as_deref(), Some(designer.name.as_str()));
        assert_eq!(order.order_placed_date, Zoned::now().date());
        assert_eq!(order.balance_amount, order.amount - order.advance_amount);

        Ok(())
    }

    #[tokio::test]
    async fn status_update_appends_one_progress_entry() -> TestResult {
        let ctx = TestContext::new().await;
        let designer = ctx.principal("meera", Role::Designer).await?;
        let order = ctx
            .orders
            .create_designer_order(&designer, new_designer_order())
            .await?;

        let updated = ctx
            .orders
            .update_status(
                &designer,
                order.uuid,
                status(OrderStatus::InProgress, "Weaving started"),
            )
            .await?;

        assert_eq!(updated.status, OrderStatus::InProgress);
        assert_eq!(updated.progress_updates.len(), 1);

        let updated = ctx
            .orders
            .update_status(&designer, order.uuid, status(OrderStatus::Ready, "Finished"))
            .await?;

        assert_eq!(updated.progress_updates.len(), 2);

        let last = updated.progress_updates.last().ok_or("missing progress update")?;
        assert_eq!(last.status, OrderStatus::Ready);
        assert_eq!(last.description, "Finished");
        assert_eq!(last.updated_by, designer.name);

        Ok(())
    }

    #[tokio::test]
    async fn delivery_date_is_set_once() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.principal("admin", Role::Admin).await?;
        let order = ctx.orders.create_public_order(new_public_order()).await?;

        assert!(order.actual_delivery_date.is_none());

        let delivered = ctx
            .orders
            .update_status(&admin, order.uuid, status(OrderStatus::Delivered, "Handed over"))
            .await?;

        let delivered_at = delivered
            .actual_delivery_date
            .ok_or("delivery date should be set")?;

        let updated = ctx
            .orders
            .update_payment(
                &admin,
                order.uuid,
                PaymentUpdate {
                    payment_status: PaymentStatus::Completed,
                    upi_transaction_id: None,
                },
            )
            .await?;

        assert_eq!(updated.actual_delivery_date, Some(delivered_at));

        Ok(())
    }

    #[tokio::test]
    async fn terminal_order_rejects_further_transitions() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.principal("admin", Role::Admin).await?;
        let order = ctx.orders.create_public_order(new_public_order()).await?;

        ctx.orders
            .update_status(&admin, order.uuid, status(OrderStatus::Cancelled, "Customer cancelled"))
            .await?;

        let result = ctx
            .orders
            .update_status(&admin, order.uuid, status(OrderStatus::Pending, "Reopen"))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::InvalidTransition(_))),
            "expected InvalidTransition, got {result:?}"
        );

        let reloaded = ctx.orders.get_order(&admin, order.uuid).await?;
        assert_eq!(reloaded.progress_updates.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn status_update_requires_description() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.principal("admin", Role::Admin).await?;
        let order = ctx.orders.create_public_order(new_public_order()).await?;

        let result = ctx
            .orders
            .update_status(&admin, order.uuid, status(OrderStatus::Ready, " "))
            .await;

        assert!(matches!(result, Err(OrdersServiceError::InvalidData(_))));

        Ok(())
    }

    #[tokio::test]
    async fn designer_cannot_read_other_designers_order() -> TestResult {
        let ctx = TestContext::new().await;
        let designer_a = ctx.principal("designer-a", Role::Designer).await?;
        let designer_b = ctx.principal("designer-b", Role::Designer).await?;

        let order = ctx
            .orders
            .create_designer_order(&designer_b, new_designer_order())
            .await?;

        let result = ctx.orders.get_order(&designer_a, order.uuid).await;

        assert!(
            matches!(result, Err(OrdersServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );

        let result = ctx
            .orders
            .update_status(
                &designer_a,
                order.uuid,
                status(OrderStatus::InProgress, "Not mine"),
            )
            .await;

        assert!(matches!(result, Err(OrdersServiceError::Forbidden)));

        Ok(())
    }

    #[tokio::test]
    async fn designer_listing_includes_own_and_unowned_only() -> TestResult {
        let ctx = TestContext::new().await;
        let designer_a = ctx.principal("designer-a", Role::Designer).await?;
        let designer_b = ctx.principal("designer-b", Role::Designer).await?;
        let admin = ctx.principal("admin", Role::Admin).await?;

        let own = ctx
            .orders
            .create_designer_order(&designer_a, new_designer_order())
            .await?;
        let other = ctx
            .orders
            .create_designer_order(&designer_b, new_designer_order())
            .await?;
        let unowned = ctx.orders.create_public_order(new_public_order()).await?;

        let page = ctx
            .orders
            .list_orders(&designer_a, OrderFilter::default(), first_page())
            .await?;

        let uuids: Vec<OrderUuid> = page.items.iter().map(|order| order.uuid).collect();

        assert!(uuids.contains(&own.uuid));
        assert!(uuids.contains(&unowned.uuid));
        assert!(!uuids.contains(&other.uuid));
        assert_eq!(page.pagination.total_items, 2);

        let all = ctx
            .orders
            .list_orders(&admin, OrderFilter::default(), first_page())
            .await?;

        assert_eq!(all.pagination.total_items, 3);

        Ok(())
    }

    #[tokio::test]
    async fn listing_filters_by_status_newest_first() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.principal("admin", Role::Admin).await?;

        let older = ctx.orders.create_public_order(new_public_order()).await?;
        let newer = ctx.orders.create_public_order(new_public_order()).await?;
        let progressed = ctx.orders.create_public_order(new_public_order()).await?;

        ctx.orders
            .update_status(
                &admin,
                progressed.uuid,
                status(OrderStatus::InProgress, "Started"),
            )
            .await?;

        let pending = ctx
            .orders
            .list_orders(
                &admin,
                OrderFilter {
                    status: Some(OrderStatus::Pending),
                },
                first_page(),
            )
            .await?;

        let uuids: Vec<OrderUuid> = pending.items.iter().map(|order| order.uuid).collect();

        assert_eq!(uuids, vec![newer.uuid, older.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn update_order_recomputes_balance() -> TestResult {
        let ctx = TestContext::new().await;
        let designer = ctx.principal("meera", Role::Designer).await?;
        let order = ctx
            .orders
            .create_designer_order(&designer, new_designer_order())
            .await?;

        let updated = ctx
            .orders
            .update_order(
                &designer,
                order.uuid,
                OrderUpdate {
                    amount: Some(12_000),
                    advance_amount: Some(2_500),
                    color: Some("Maroon".to_string()),
                    expected_delivery_date: Some(date(2099, 1, 15)),
                    ..OrderUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.amount, 12_000);
        assert_eq!(updated.advance_amount, 2_500);
        assert_eq!(updated.balance_amount, 9_500);
        assert_eq!(updated.color, "Maroon");
        assert_eq!(updated.material, order.material);
        assert_eq!(updated.expected_delivery_date, date(2099, 1, 15));

        Ok(())
    }

    #[tokio::test]
    async fn update_order_rejects_advance_above_new_amount() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.principal("admin", Role::Admin).await?;
        let order = ctx.orders.create_public_order(new_public_order()).await?;

        let result = ctx
            .orders
            .update_order(
                &admin,
                order.uuid,
                OrderUpdate {
                    amount: Some(order.advance_amount - 1),
                    ..OrderUpdate::default()
                },
            )
            .await;

        assert!(matches!(result, Err(OrdersServiceError::InvalidData(_))));

        Ok(())
    }

    #[tokio::test]
    async fn update_order_rejects_delivery_before_placement() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.principal("admin", Role::Admin).await?;
        let order = ctx.orders.create_public_order(new_public_order()).await?;

        let result = ctx
            .orders
            .update_order(
                &admin,
                order.uuid,
                OrderUpdate {
                    expected_delivery_date: Some(date(2026, 2, 20)),
                    ..OrderUpdate::default()
                },
            )
            .await;

        assert!(matches!(result, Err(OrdersServiceError::InvalidData(_))));

        let unchanged = ctx.orders.get_order(&admin, order.uuid).await?;
        assert_eq!(unchanged.expected_delivery_date, date(2026, 3, 20));

        Ok(())
    }

    #[tokio::test]
    async fn payment_update_keeps_transaction_id() -> TestResult {
        let ctx = TestContext::new().await;
        let designer = ctx.principal("meera", Role::Designer).await?;
        let order = ctx.orders.create_public_order(new_public_order()).await?;

        let paid = ctx
            .orders
            .update_payment(
                &designer,
                order.uuid,
                PaymentUpdate {
                    payment_status: PaymentStatus::Paid,
                    upi_transaction_id: Some("UPI123".to_string()),
                },
            )
            .await?;

        assert_eq!(paid.payment_status, PaymentStatus::Paid);
        assert_eq!(paid.upi_transaction_id.as_deref(), Some("UPI123"));

        let confirmed = ctx
            .orders
            .update_payment(
                &designer,
                order.uuid,
                PaymentUpdate {
                    payment_status: PaymentStatus::PaymentSuccessful,
                    upi_transaction_id: None,
                },
            )
            .await?;

        assert_eq!(confirmed.payment_status, PaymentStatus::PaymentSuccessful);
        assert_eq!(confirmed.upi_transaction_id.as_deref(), Some("UPI123"));

        Ok(())
    }

    #[tokio::test]
    async fn only_admin_can_delete() -> TestResult {
        let ctx = TestContext::new().await;
        let designer = ctx.principal("meera", Role::Designer).await?;
        let admin = ctx.principal("admin", Role::Admin).await?;
        let order = ctx
            .orders
            .create_designer_order(&designer, new_designer_order())
            .await?;

        let result = ctx.orders.delete_order(&designer, order.uuid).await;
        assert!(matches!(result, Err(OrdersServiceError::Forbidden)));

        ctx.orders.delete_order(&admin, order.uuid).await?;

        let result = ctx.orders.get_order(&admin, order.uuid).await;
        assert!(matches!(result, Err(OrdersServiceError::NotFound)));

        let result = ctx.orders.delete_order(&admin, order.uuid).await;
        assert!(matches!(result, Err(OrdersServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn stats_are_scoped_for_designers() -> TestResult {
        let ctx = TestContext::new().await;
        let designer = ctx.principal("meera", Role::Designer).await?;
        let admin = ctx.principal("admin", Role::Admin).await?;

        let own = ctx
            .orders
            .create_designer_order(
                &designer,
                NewDesignerOrder {
                    amount: 8_000,
                    advance_amount: 0,
                    payment_method: PaymentMethod::Online,
                    ..new_designer_order()
                },
            )
            .await?;

        ctx.orders
            .update_status(&designer, own.uuid, status(OrderStatus::Cancelled, "Dropped"))
            .await?;

        ctx.orders
            .create_public_order(NewPublicOrder {
                amount: 5_000,
                advance_amount: 0,
                ..new_public_order()
            })
            .await?;

        let scoped = ctx.orders.stats(&designer).await?;

        assert_eq!(
            scoped,
            OrderStats {
                total_orders: 1,
                total_amount: 8_000,
                cancelled: 1,
                ..OrderStats::default()
            }
        );

        let overall = ctx.orders.stats(&admin).await?;

        assert_eq!(overall.total_orders, 2);
        assert_eq!(overall.total_amount, 13_000);
        assert_eq!(overall.pending, 1);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_order_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.principal("admin", Role::Admin).await?;

        let result = ctx
            .orders
            .update_status(&admin, OrderUuid::new(), status(OrderStatus::Ready, "Ghost"))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
