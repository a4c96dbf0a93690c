use crate::api::ApiError;

use super::filters::FilterSet;

/// Fetch lifecycle of a paged list. Leaving `Error` happens only through a
/// new user-triggered fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Error(ApiError),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            LoadState::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn begin(&mut self) {
        *self = LoadState::Loading;
    }

    pub fn finish<T>(&mut self, result: &Result<T, ApiError>) {
        *self = match result {
            Ok(_) => LoadState::Idle,
            Err(err) => LoadState::Error(err.clone()),
        };
    }
}

/// Monotonic ticket source; only the newest ticket may write results back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchGeneration(u64);

impl FetchGeneration {
    pub fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(1);
        self.0
    }

    pub fn current(&self) -> u64 {
        self.0
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0 == ticket
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageQuery {
    pub page_index: usize,
    pub page_size: usize,
    pub filters: FilterSet,
}

impl PageQuery {
    pub fn new(page_index: usize, page_size: usize, filters: FilterSet) -> Self {
        Self {
            page_index: page_index.max(1),
            page_size: page_size.max(1),
            filters,
        }
    }

    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page_index.to_string()),
            ("per_page".to_string(), self.page_size.to_string()),
        ];
        params.extend(self.filters.to_query());
        params
    }
}
