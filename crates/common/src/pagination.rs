use serde::Deserialize;

/// 1-based page selection for list endpoints.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    pub page: u64,
    pub per_page: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, per_page: 25 }
    }
}

impl Pagination {
    /// Convert to a 0-based page index and a clamped page size.
    pub fn normalize(&self) -> (u64, u64) {
        let per_page = self.per_page.clamp(1, 100);
        let page_idx = self.page.max(1) - 1;
        (page_idx, per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_clamps_page_and_size() {
        let (idx, per) = Pagination { page: 0, per_page: 0 }.normalize();
        assert_eq!((idx, per), (0, 1));

        let (idx, per) = Pagination { page: 3, per_page: 500 }.normalize();
        assert_eq!((idx, per), (2, 100));

        let (idx, per) = Pagination::default().normalize();
        assert_eq!((idx, per), (0, 25));
    }
}
