//! Pagination semantics (§4.G.1): every paged query takes `(page >= 1,
//! page_size in [1,100])`, with `page_size` silently capped at 100 rather
//! than rejected (§8 invariant 5), and `page`/`page_size <= 0` failing with
//! [`InvalidPaginationError`].

use cursor_sim_types::InvalidPaginationError;
use serde::{Deserialize, Serialize};

/// The largest `page_size` a caller may request; larger values are capped,
/// not rejected.
pub const MAX_PAGE_SIZE: u32 = 100;

/// One page of results: the windowed `items` plus enough metadata to render
/// both response shapes of §6.1 (`pagination: {page, page_size, total}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

/// Validate and normalize a requested `(page, page_size)`, capping
/// `page_size` at [`MAX_PAGE_SIZE`]. `page < 1` or `page_size < 1` fail.
pub fn normalize(page: u32, page_size: u32) -> Result<(u32, u32), InvalidPaginationError> {
    if page < 1 {
        return Err(InvalidPaginationError(format!("page must be >= 1, got {page}")));
    }
    if page_size < 1 {
        return Err(InvalidPaginationError(format!(
            "page_size must be >= 1, got {page_size}"
        )));
    }
    Ok((page, page_size.min(MAX_PAGE_SIZE)))
}

/// Window `items` to `[(page-1)*page_size, min(page*page_size, total))`
/// (§4.G.1).
pub fn paginate<T: Clone>(items: &[T], page: u32, page_size: u32) -> Result<Page<T>, InvalidPaginationError> {
    let (page, page_size) = normalize(page, page_size)?;
    let total = items.len() as u64;
    let start = (page as u64 - 1) * page_size as u64;
    let end = (start + page_size as u64).min(total);
    let windowed = if start >= total {
        Vec::new()
    } else {
        items[start as usize..end as usize].to_vec()
    };
    Ok(Page {
        items: windowed,
        total,
        page,
        page_size,
    })
}
