//! User-friendly error message formatting.
//!
//! This module converts fetch error strings coming back from the worker into
//! a short headline plus an actionable suggestion for the error view.

/// Convert a technical error message to a user-friendly message with guidance.
///
/// Takes the raw error string and returns a tuple of (short_message, suggestion).
pub fn format_error_with_guidance(error: &str) -> (String, Option<String>) {
    let error_lower = error.to_lowercase();

    // Bad base URL, before the generic "not reachable" match
    if error_lower.contains("invalid url") {
        return (
            "Invalid API URL".to_string(),
            Some("Check --api-url or run 'climadash config set api-url <URL>'.".to_string()),
        );
    }

    // Timeout
    if error_lower.contains("timed out") || error_lower.contains("timeout") {
        return (
            "Request timed out".to_string(),
            Some(
                "The API took too long to answer. Press r to retry or raise 'timeout' in the config."
                    .to_string(),
            ),
        );
    }

    // Connection refused, DNS failure and similar
    if error_lower.contains("not reachable") || error_lower.contains("connection refused") {
        return (
            "API not reachable".to_string(),
            Some(
                "Make sure the API server is running and the URL is correct, then press r."
                    .to_string(),
            ),
        );
    }

    if error_lower.contains("(404)") {
        return (
            "Endpoint not found".to_string(),
            Some("The API URL may point at the wrong server or path.".to_string()),
        );
    }

    if error_lower.contains("api error (5") {
        return (
            "Server error".to_string(),
            Some("The API failed to answer. Try again in a moment.".to_string()),
        );
    }

    if error_lower.contains("api error") {
        return (
            "Request rejected".to_string(),
            Some("The API refused the request. Check the server logs.".to_string()),
        );
    }

    if error_lower.contains("unexpected response") || error_lower.contains("decode") {
        return (
            "Unexpected data from API".to_string(),
            Some("The server answered with a format this version does not understand.".to_string()),
        );
    }

    // Default - show original error, no suggestion
    (error.to_string(), None)
}
