use crate::error::ApiError;

pub mod health;
pub mod home;
pub mod metrics;
pub mod predict;

pub async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed("Method not allowed")
}
