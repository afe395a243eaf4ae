//! Mapping of application errors onto GraphQL errors

use async_graphql::{Error, ErrorExtensions};

use crate::error::AppError;

impl ErrorExtensions for AppError {
    fn extend(&self) -> Error {
        let message = match self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) => msg.clone(),
            AppError::Validation(_) => "Validation failed".to_string(),
            other => other.to_string(),
        };

        Error::new(message).extend_with(|_, e| {
            e.set("code", self.error_code());
            if let AppError::Validation(fields) = self {
                if let Ok(errors) = async_graphql::to_value(fields) {
                    e.set("errors", errors);
                }
            }
        })
    }
}
