//! Pure functions for mapping service errors to HTTP status codes.

use super::ServiceError;

/// Maps a [`ServiceError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `InvalidInput` -> 400 (Bad Request)
/// - `Forbidden` -> 403 (Forbidden)
/// - `Throttled` -> 429 (Too Many Requests)
/// - `Unavailable` -> 503 (Service Unavailable)
/// - `Upstream` -> 502 (Bad Gateway)
///
/// # Examples
///
/// ```
/// use awsrelay_core::{ServiceError, service_error_to_status_code};
///
/// let error = ServiceError::NotFound {
///     resource: "Queue",
///     id: "jobs".to_string(),
/// };
/// assert_eq!(service_error_to_status_code(&error), 404);
/// ```
pub fn service_error_to_status_code(error: &ServiceError) -> u16 {
    match error {
        ServiceError::NotFound { .. } => 404,
        ServiceError::InvalidInput(_) => 400,
        ServiceError::Forbidden(_) => 403,
        ServiceError::Throttled(_) => 429,
        ServiceError::Unavailable(_) => 503,
        ServiceError::Upstream { .. } => 502,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = ServiceError::NotFound {
            resource: "Item",
            id: "abc-123".to_string(),
        };
        assert_eq!(service_error_to_status_code(&error), 404);
    }

    #[test]
    fn test_invalid_input_maps_to_400() {
        let error = ServiceError::InvalidInput("message is required".to_string());
        assert_eq!(service_error_to_status_code(&error), 400);
    }

    #[test]
    fn test_forbidden_maps_to_403() {
        let error = ServiceError::Forbidden("not authorized".to_string());
        assert_eq!(service_error_to_status_code(&error), 403);
    }

    #[test]
    fn test_throttled_maps_to_429() {
        let error = ServiceError::Throttled("rate exceeded".to_string());
        assert_eq!(service_error_to_status_code(&error), 429);
    }

    #[test]
    fn test_unavailable_maps_to_503() {
        let error = ServiceError::Unavailable("dispatch failure".to_string());
        assert_eq!(service_error_to_status_code(&error), 503);
    }

    #[test]
    fn test_upstream_maps_to_502() {
        let error = ServiceError::upstream("ListTables", "internal error");
        assert_eq!(service_error_to_status_code(&error), 502);
    }
}
