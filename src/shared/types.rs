use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One page of a paged listing.
///
/// The wire shape mirrors the page envelope the previous backend exposed,
/// so `totalElements`/`totalPages` stay camelCased for existing consumers.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Zero-indexed page number
    pub number: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, number: i64, size: i64, total_elements: i64) -> Self {
        let total_pages = if size > 0 {
            (total_elements + size - 1) / size
        } else {
            0
        };

        Self {
            content,
            number,
            size,
            total_elements,
            total_pages,
        }
    }
}
