pub(crate) mod auth;
pub(crate) mod comments;
pub(crate) mod media;
pub(crate) mod posts;
pub(crate) mod stats;

use serde::Serialize;
use utoipa::ToSchema;

/// Success envelope carrying nothing but a human-readable confirmation.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct MessageResponseDto {
    pub(crate) status: &'static str,
    pub(crate) message: String,
}

impl MessageResponseDto {
    pub(crate) fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
        }
    }
}

/// Mirrors the PHP-era `empty()` checks: a blank string counts as missing.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let value = value.trim().to_string();
        (!value.is_empty()).then_some(value)
    })
}

/// Ids must be positive to count as provided.
pub(crate) fn present_id(value: Option<i64>) -> Option<i64> {
    value.filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::{present, present_id};

    #[test]
    fn present_filters_blank_strings() {
        assert_eq!(present(None), None);
        assert_eq!(present(Some("  ".to_string())), None);
        assert_eq!(present(Some(" x ".to_string())).as_deref(), Some("x"));
    }

    #[test]
    fn present_id_filters_non_positive() {
        assert_eq!(present_id(None), None);
        assert_eq!(present_id(Some(0)), None);
        assert_eq!(present_id(Some(-3)), None);
        assert_eq!(present_id(Some(7)), Some(7));
    }
}
