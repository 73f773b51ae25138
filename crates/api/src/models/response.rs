//! Success response envelope.

use serde::Serialize;

/// The success envelope every 2xx JSON body uses:
/// `{"status":"success","data":...}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: &'static str,
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload in the success envelope.
    pub const fn new(data: T) -> Self {
        Self {
            status: "success",
            data,
        }
    }
}
