use crate::domain::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            _ => Err(format!("Unknown sort order: {}", s)),
        }
    }
}

/// Filters for the article list endpoint. Unset fields are left out of the
/// request entirely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleQuery {
    pub query: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub category: Option<Category>,
    pub sort_by: Option<String>,
    pub order: Option<SortOrder>,
    pub page_number: Option<u32>,
    pub request_id: Option<String>,
}

impl ArticleQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_page(mut self, page: u32, page_size: u32) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }

    pub fn with_sort(mut self, sort_by: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(sort_by.into());
        self.order = Some(order);
        self
    }

    /// Query-string pairs using the API's parameter names.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if let Some(query) = &self.query {
            params.push(("query", query.clone()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            params.push(("pageSize", page_size.to_string()));
        }
        // `None` has no wire name, so it is never sent
        if let Some(category) = self.category.filter(|c| *c != Category::None) {
            params.push(("category", category.as_str().to_string()));
        }
        if let Some(sort_by) = &self.sort_by {
            params.push(("sortBy", sort_by.clone()));
        }
        if let Some(order) = self.order {
            params.push(("order", order.as_str().to_string()));
        }
        if let Some(page_number) = self.page_number {
            params.push(("pageNumber", page_number.to_string()));
        }
        if let Some(request_id) = &self.request_id {
            params.push(("requestId", request_id.clone()));
        }

        params
    }
}
