use serde::{Deserialize, Serialize};

use super::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreateCommentRequest {
    pub(crate) content: String,
}

impl CreateCommentRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let content = self.content.trim();
        if content.is_empty() || content.len() > 2000 {
            return Err(DomainError::Validation {
                field: "content",
                message: "must be 1..2000 chars",
            });
        }
        Ok(Self {
            content: content.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::CreateCommentRequest;

    #[test]
    fn validate_trims_content() {
        let req = CreateCommentRequest {
            content: "  well said  ".to_string(),
        };
        let validated = req.validate().expect("must validate");
        assert_eq!(validated.content, "well said");
    }

    #[test]
    fn validate_rejects_blank_content() {
        let req = CreateCommentRequest {
            content: "   ".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
