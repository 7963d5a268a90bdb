//! Derived view of the directory: search filter plus a fixed-size page window.

use crate::contract::model::{Employee, PageView};

/// Rows per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 4;

/// User-controlled view state. Fields are private so the page can only move
/// through the clamping operations below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    search_query: String,
    current_page: u32,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            current_page: 1,
        }
    }
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// A different query always sends the view back to page 1.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.search_query {
            self.search_query = query;
            self.current_page = 1;
        }
    }

    /// Clamp into `[1, max(total_pages, 1)]`.
    pub fn go_to_page(&mut self, page: u32, total_pages: u32) {
        self.current_page = page.clamp(1, total_pages.max(1));
    }

    pub fn next_page(&mut self, total_pages: u32) {
        self.go_to_page(self.current_page.saturating_add(1), total_pages);
    }

    pub fn previous_page(&mut self, total_pages: u32) {
        self.go_to_page(self.current_page.saturating_sub(1), total_pages);
    }
}

/// Case-insensitive substring match on name, department or position.
pub fn matches(employee: &Employee, needle_lower: &str) -> bool {
    [&employee.name, &employee.department, &employee.position]
        .iter()
        .any(|field| field.to_lowercase().contains(needle_lower))
}

/// Entries matching `query`, in collection order. Empty query keeps everything.
pub fn filter<'a>(employees: &'a [Employee], query: &str) -> Vec<&'a Employee> {
    let needle = query.to_lowercase();
    employees.iter().filter(|e| matches(e, &needle)).collect()
}

/// `ceil(filtered_count / page_size)`.
pub fn total_pages(filtered_count: usize, page_size: usize) -> u32 {
    let page_size = page_size.max(1);
    u32::try_from(filtered_count.div_ceil(page_size)).unwrap_or(u32::MAX)
}

/// Compute the visible slice for `state`.
///
/// The state's page is clamped for rendering only; callers that own the
/// state should clamp it too via [`QueryState::go_to_page`].
pub fn render(employees: &[Employee], state: &QueryState, page_size: usize) -> PageView {
    let page_size = page_size.max(1);
    let filtered = filter(employees, state.search_query());
    let total = total_pages(filtered.len(), page_size);
    let page = state.current_page().clamp(1, total.max(1));

    let start = (page as usize - 1) * page_size;
    let rows = filtered
        .iter()
        .skip(start)
        .take(page_size)
        .map(|e| (*e).clone())
        .collect();

    PageView {
        rows,
        search_query: state.search_query().to_string(),
        current_page: page,
        total_pages: total,
        filtered_count: filtered.len(),
        directory_size: employees.len(),
    }
}
