//! Order lifecycle.

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::domain::orders::data::UnknownValue;

/// Fulfilment status of an order.
///
/// Orders move forward through `pending`, `in-progress`, `ready` and
/// `delivered`. Any non-terminal order may be cancelled. `delivered` and
/// `cancelled` are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    #[default]
    Pending,
    InProgress,
    Ready,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot move order from `{from}` to `{to}`")]
pub struct InvalidTransition {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        Self::Pending,
        Self::InProgress,
        Self::Ready,
        Self::Delivered,
        Self::Cancelled,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Ready => "ready",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    const fn stage(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::InProgress => 1,
            Self::Ready => 2,
            Self::Delivered => 3,
            Self::Cancelled => 4,
        }
    }

    /// Validate a move from `self` to `next`.
    ///
    /// Re-posting the current status of a live order is accepted so that
    /// progress notes can be added without advancing it. Forward moves may
    /// skip stages.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] for moves out of a terminal status and
    /// for backward moves.
    pub fn transition(self, next: OrderStatus) -> Result<OrderStatus, InvalidTransition> {
        let allowed = !self.is_terminal()
            && (next == Self::Cancelled || next.stage() >= self.stage());

        if allowed {
            Ok(next)
        } else {
            Err(InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownValue::new("order status", value))
    }
}
