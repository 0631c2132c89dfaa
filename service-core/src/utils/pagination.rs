//! Offset/limit pagination driven by `page` and `per_page` query parameters.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 100;
pub const MAX_PAGE_SIZE: i64 = 1000;
pub const PAGE_VAR: &str = "page";
pub const PAGE_SIZE_VAR: &str = "per_page";

/// Raw query parameters. Kept as strings so that garbage values fall back to
/// defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
}

impl PageParams {
    fn parse(value: Option<&str>, default: i64) -> i64 {
        value
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(default)
    }
}

/// Resolved page window for a known total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pages {
    pub page: i64,
    pub per_page: i64,
    pub page_count: i64,
    pub total_count: i64,
}

/// List envelope returned to clients.
#[derive(Debug, Serialize, Deserialize)]
pub struct Page<T> {
    pub page: i64,
    pub per_page: i64,
    pub page_count: i64,
    pub total_count: i64,
    pub items: Vec<T>,
}

impl Pages {
    pub fn new(page: i64, per_page: i64, total_count: i64) -> Self {
        let per_page = if per_page <= 0 {
            DEFAULT_PAGE_SIZE
        } else {
            per_page.min(MAX_PAGE_SIZE)
        };

        let mut page = page;
        let mut page_count = -1;
        if total_count >= 0 {
            page_count = (total_count + per_page - 1) / per_page;
            if page > page_count {
                page = page_count;
            }
        }
        if page < 1 {
            page = 1;
        }

        Self {
            page,
            per_page,
            page_count,
            total_count,
        }
    }

    pub fn from_params(params: &PageParams, total_count: i64) -> Self {
        let page = PageParams::parse(params.page.as_deref(), 1);
        let per_page = PageParams::parse(params.per_page.as_deref(), DEFAULT_PAGE_SIZE);
        Self::new(page, per_page, total_count)
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    pub fn with_items<T>(self, items: Vec<T>) -> Page<T> {
        Page {
            page: self.page,
            per_page: self.per_page,
            page_count: self.page_count,
            total_count: self.total_count,
            items,
        }
    }

    /// First, prev, next and last page URLs; empty strings where a relation
    /// does not exist.
    pub fn links(&self, base_url: &str) -> [String; 4] {
        let mut links: [String; 4] = Default::default();

        let mut page = self.page;
        if self.page_count >= 0 && page > self.page_count {
            page = self.page_count;
        }

        let sep = if base_url.contains('?') { '&' } else { '?' };
        let base = format!("{base_url}{sep}");

        if page > 1 {
            links[0] = format!("{base}{PAGE_VAR}=1");
            links[1] = format!("{base}{PAGE_VAR}={}", page - 1);
        }
        if self.page_count >= 0 && page < self.page_count {
            links[2] = format!("{base}{PAGE_VAR}={}", page + 1);
            links[3] = format!("{base}{PAGE_VAR}={}", self.page_count);
        } else if self.page_count < 0 {
            links[2] = format!("{base}{PAGE_VAR}={}", page + 1);
        }

        if self.per_page != DEFAULT_PAGE_SIZE {
            for link in links.iter_mut().filter(|l| !l.is_empty()) {
                link.push_str(&format!("&{PAGE_SIZE_VAR}={}", self.per_page));
            }
        }

        links
    }

    /// RFC 8288 `Link` header value, or `None` when there is a single page.
    pub fn link_header(&self, base_url: &str) -> Option<String> {
        let [first, prev, next, last] = self.links(base_url);
        let mut parts = Vec::new();

        if !first.is_empty() {
            parts.push(format!("<{first}>; rel=\"first\""));
            parts.push(format!("<{prev}>; rel=\"prev\""));
        }
        if !next.is_empty() {
            parts.push(format!("<{next}>; rel=\"next\""));
            if !last.is_empty() {
                parts.push(format!("<{last}>; rel=\"last\""));
            }
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}
