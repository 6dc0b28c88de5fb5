use crate::errors::NewsResult;

/// State handed to the rendering layer for one request/response cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource<T> {
    Loading,
    Success(T),
    Error { message: String, data: Option<T> },
}

impl<T> Resource<T> {
    pub fn from_result(result: NewsResult<T>) -> Self {
        match result {
            Ok(data) => Resource::Success(data),
            Err(e) => Resource::Error {
                message: e.user_message(),
                data: None,
            },
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Resource::Success(data) => Some(data),
            Resource::Error { data, .. } => data.as_ref(),
            Resource::Loading => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Resource::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Resource<U> {
        match self {
            Resource::Loading => Resource::Loading,
            Resource::Success(data) => Resource::Success(f(data)),
            Resource::Error { message, data } => Resource::Error {
                message,
                data: data.map(f),
            },
        }
    }
}
