use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Raw `?page=&limit=` query. Kept as strings so non-numeric input never
/// rejects the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number.
    pub page: Option<String>,
    /// Records per page.
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageRef {
    pub page: u64,
    pub limit: u64,
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<PageRef>,
    pub data: Vec<T>,
}

impl PageQuery {
    /// `None` unless both parameters are integers >= 1; callers then serve
    /// the whole set.
    pub fn window(&self) -> Option<PageRef> {
        Some(PageRef {
            page: positive(self.page.as_deref())?,
            limit: positive(self.limit.as_deref())?,
        })
    }
}

fn positive(raw: Option<&str>) -> Option<u64> {
    raw?.trim().parse::<u64>().ok().filter(|n| *n >= 1)
}

/// Slice `items` to `[(page-1)*limit, page*limit)` in the order given.
pub fn paginate<T>(items: Vec<T>, window: Option<PageRef>) -> Page<T> {
    let Some(PageRef { page, limit }) = window else {
        return Page {
            next: None,
            previous: None,
            data: items,
        };
    };

    let total = items.len() as u64;
    let start = (page - 1).saturating_mul(limit);
    let end = page.saturating_mul(limit);

    let next = (end < total).then(|| PageRef {
        page: page + 1,
        limit,
    });
    let previous = (start > 0).then(|| PageRef {
        page: page - 1,
        limit,
    });

    let skip = usize::try_from(start).unwrap_or(usize::MAX);
    let take = usize::try_from(end - start).unwrap_or(usize::MAX);
    let data = items.into_iter().skip(skip).take(take).collect();

    Page {
        next,
        previous,
        data,
    }
}
