//! Uniform response wrapper shared by every endpoint

use serde::Serialize;

/// `{ "is_success": bool, "data": ... }`, with `data` omitted when absent
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub is_success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            is_success: true,
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    /// Envelope carrying only the outcome flag
    pub fn status(is_success: bool) -> Self {
        Self {
            is_success,
            data: None,
        }
    }
}
