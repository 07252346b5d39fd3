//! Page requests parsed from `page`/`size`/`sort` query parameters, and the pages returned for them.

use crate::domain::ID_COLUMN;
use crate::error::AppError;
use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 2000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortOrder {
    pub property: String,
    pub direction: Direction,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page: u32,
    pub size: u32,
    pub sort: Vec<SortOrder>,
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Vec::new(),
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        PageRequest {
            page,
            size: clamp_size(size),
            sort: Vec::new(),
        }
    }

    pub fn sorted_by(mut self, property: &str, direction: Direction) -> Self {
        self.sort.push(SortOrder {
            property: property.to_string(),
            direction,
        });
        self
    }

    /// Build from raw query pairs. Unparseable `page`/`size` fall back to the defaults;
    /// each `sort` value is `prop[,prop...][,asc|desc]`.
    pub fn from_query(params: &[(String, String)]) -> Self {
        let mut req = PageRequest::default();
        for (k, v) in params {
            match k.as_str() {
                "page" => {
                    if let Ok(n) = v.trim().parse::<u32>() {
                        req.page = n;
                    }
                }
                "size" => {
                    if let Ok(n) = v.trim().parse::<u32>() {
                        req.size = clamp_size(n);
                    }
                }
                "sort" => req.sort.extend(parse_sort(v)),
                _ => {}
            }
        }
        req
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    /// Reject sort properties the entity does not have.
    pub fn ensure_sortable(&self, is_sortable: impl Fn(&str) -> bool) -> Result<(), AppError> {
        match self.sort.iter().find(|o| !is_sortable(&o.property)) {
            Some(o) => Err(AppError::BadRequest(format!("unknown sort property: {}", o.property))),
            None => Ok(()),
        }
    }

    /// Sort orders with `id` appended as the final tiebreaker unless already present.
    pub fn effective_sort(&self) -> Vec<SortOrder> {
        let mut orders = self.sort.clone();
        if !orders.iter().any(|o| o.property == ID_COLUMN) {
            orders.push(SortOrder {
                property: ID_COLUMN.to_string(),
                direction: Direction::Asc,
            });
        }
        orders
    }
}

fn clamp_size(size: u32) -> u32 {
    if size == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        size.min(MAX_PAGE_SIZE)
    }
}

fn parse_sort(value: &str) -> Vec<SortOrder> {
    let mut parts: Vec<&str> = value.split(',').map(str::trim).filter(|s| !s.is_empty()).collect();
    let direction = match parts.last().map(|s| s.to_ascii_lowercase()) {
        Some(d) if d == "desc" => {
            parts.pop();
            Direction::Desc
        }
        Some(d) if d == "asc" => {
            parts.pop();
            Direction::Asc
        }
        _ => Direction::Asc,
    };
    parts
        .into_iter()
        .map(|p| SortOrder {
            property: p.to_string(),
            direction,
        })
        .collect()
}

/// One page of rows plus the total row count.
#[derive(Clone, Debug, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Page {
            content,
            number: request.page,
            size: request.size,
            total_elements,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 1;
        }
        self.total_elements.div_ceil(u64::from(self.size))
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.number) + 1 < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0
    }

    /// `Link` header value: next, prev, last, first relations against `base_url`.
    pub fn link_header(&self, base_url: &str) -> String {
        let uri = |page: u64| format!("<{}?page={}&size={}>", base_url, page, self.size);
        let mut links = Vec::with_capacity(4);
        if self.has_next() {
            links.push(format!("{}; rel=\"next\"", uri(u64::from(self.number) + 1)));
        }
        if self.has_previous() {
            links.push(format!("{}; rel=\"prev\"", uri(u64::from(self.number) - 1)));
        }
        let last = self.total_pages().saturating_sub(1);
        links.push(format!("{}; rel=\"last\"", uri(last)));
        links.push(format!("{}; rel=\"first\"", uri(0)));
        links.join(",")
    }
}
