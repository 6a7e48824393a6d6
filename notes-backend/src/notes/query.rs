//! Search and page slicing over the in-memory collection

use notes_types::{Note, Pagination};

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;

/// Parameters of a list request. Page numbers start at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub page: usize,
    pub limit: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ListQuery {
    /// Build a query, treating missing or zero page/limit as the defaults
    pub fn new(search: Option<String>, page: Option<usize>, limit: Option<usize>) -> Self {
        Self {
            search: search.filter(|s| !s.is_empty()),
            page: page.filter(|&p| p > 0).unwrap_or(DEFAULT_PAGE),
            limit: limit.filter(|&l| l > 0).unwrap_or(DEFAULT_LIMIT),
        }
    }
}

/// One page of notes plus the totals computed after filtering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePage {
    pub items: Vec<Note>,
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl NotePage {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            limit: self.limit,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}

/// Case-insensitive substring match against title or content
pub fn matches(note: &Note, needle_lower: &str) -> bool {
    note.title.to_lowercase().contains(needle_lower)
        || note.content.to_lowercase().contains(needle_lower)
}

/// Filter `notes` by the query's search string and cut out the requested page.
/// Pages past the end yield an empty `items`.
pub fn run(notes: &[Note], query: &ListQuery) -> NotePage {
    let page = query.page.max(1);
    let limit = query.limit.max(1);

    let filtered: Vec<&Note> = match query.search.as_deref() {
        Some(search) if !search.is_empty() => {
            let needle = search.to_lowercase();
            notes.iter().filter(|n| matches(n, &needle)).collect()
        }
        _ => notes.iter().collect(),
    };

    let total = filtered.len();
    let items = filtered
        .into_iter()
        .skip((page - 1).saturating_mul(limit))
        .take(limit)
        .cloned()
        .collect();

    NotePage {
        items,
        page,
        limit,
        total,
        total_pages: total.div_ceil(limit),
    }
}
