//! API response envelope and pagination types

use serde::{Deserialize, Serialize};

/// Unified API response envelope
///
/// ```json
/// { "success": true, "data": { ... } }
/// { "success": false, "error": "Product not found" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> AppResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Paginated list response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    /// Total matching records (not just this page)
    pub total: u64,
    pub current_page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit > 0 {
            ((total as f64) / (limit as f64)).ceil() as u32
        } else {
            1
        };

        Self {
            data,
            total,
            current_page: page,
            limit,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_math() {
        let resp = PaginatedResponse::new(vec![0u8; 10], 23, 2, 10);
        assert_eq!(resp.total_pages, 3);
        assert!(resp.has_next);
        assert!(resp.has_prev);

        let first = PaginatedResponse::new(vec![0u8; 10], 23, 1, 10);
        assert!(first.has_next);
        assert!(!first.has_prev);

        let last = PaginatedResponse::new(vec![0u8; 3], 23, 3, 10);
        assert!(!last.has_next);
        assert!(last.has_prev);
    }

    #[test]
    fn exact_multiple_has_no_phantom_page() {
        let resp = PaginatedResponse::new(vec![0u8; 10], 20, 2, 10);
        assert_eq!(resp.total_pages, 2);
        assert!(!resp.has_next);
    }

    #[test]
    fn envelope_serialization_skips_absent_fields() {
        let ok: AppResponse<i32> = AppResponse::success(1);
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("error").is_none());

        let err: AppResponse<i32> = AppResponse::error("boom");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("data").is_none());
    }
}
