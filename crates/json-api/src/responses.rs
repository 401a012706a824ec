//! Shared response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use sowraashi_app::pagination::Pagination;

/// Plain acknowledgement.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

/// Paging metadata for list endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaginationResponse {
    pub current_page: u32,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl From<Pagination> for PaginationResponse {
    fn from(pagination: Pagination) -> Self {
        PaginationResponse {
            current_page: pagination.current_page,
            total_pages: pagination.total_pages,
            total_items: pagination.total_items,
            has_next_page: pagination.has_next_page,
            has_prev_page: pagination.has_prev_page,
        }
    }
}
