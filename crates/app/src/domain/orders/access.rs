//! Who may see and change an order.

use crate::auth::{Principal, Role, UserUuid};

/// Rows visible to a principal when listing orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderScope {
    /// Every order.
    All,
    /// Orders owned by the designer plus unowned orders.
    Designer(UserUuid),
}

impl OrderScope {
    /// The designer whose orders are in scope, if restricted.
    #[must_use]
    pub const fn designer(self) -> Option<UserUuid> {
        match self {
            Self::All => None,
            Self::Designer(designer) => Some(designer),
        }
    }
}

/// Ownership rules shared by every single-order operation.
#[derive(Debug, Clone, Copy)]
pub struct OrderAccess;

impl OrderAccess {
    /// Admins may act on any order. Designers may act on unowned orders and
    /// their own.
    #[must_use]
    pub fn permits(principal: &Principal, owner: Option<UserUuid>) -> bool {
        match principal.role {
            Role::Admin => true,
            Role::Designer => owner.is_none_or(|owner| owner == principal.user_uuid),
        }
    }

    #[must_use]
    pub const fn scope(principal: &Principal) -> OrderScope {
        match principal.role {
            Role::Admin => OrderScope::All,
            Role::Designer => OrderScope::Designer(principal.user_uuid),
        }
    }
}
