use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
pub struct Pagination {
    pub page: i32,
    pub page_size: i32,
    pub total_items: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(page: i32, page_size: i32, total_items: i64) -> Self {
        let total_items = total_items.max(0);
        let total_pages = match u64::try_from(page_size) {
            Ok(size) if size > 0 => (total_items as u64).div_ceil(size) as i64,
            _ => 0,
        };

        Self {
            page,
            page_size,
            total_items,
            total_pages,
        }
    }
}
