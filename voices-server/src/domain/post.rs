use serde::{Deserialize, Serialize};

use super::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) category: String,
    pub(crate) institution: String,
    pub(crate) images: Vec<String>,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_title(&self.title)?,
            content: normalize_content(&self.content)?,
            category: normalize_tag("category", &self.category)?,
            institution: normalize_tag("institution", &self.institution)?,
            images: normalize_images(self.images),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UpdatePostRequest {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) category: String,
    pub(crate) institution: String,
    pub(crate) images: Vec<String>,
}

impl UpdatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_title(&self.title)?,
            content: normalize_content(&self.content)?,
            category: normalize_tag("category", &self.category)?,
            institution: normalize_tag("institution", &self.institution)?,
            images: normalize_images(self.images),
        })
    }
}

/// Image list as persisted: JSON text for a non-empty list, NULL otherwise.
pub(crate) fn images_to_column(images: &[String]) -> Result<Option<String>, DomainError> {
    if images.is_empty() {
        return Ok(None);
    }
    serde_json::to_string(images)
        .map(Some)
        .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() || title.len() > 255 {
        return Err(DomainError::Validation {
            field: "title",
            message: "must be 1..255 chars",
        });
    }
    Ok(title.to_string())
}

fn normalize_content(content: &str) -> Result<String, DomainError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(DomainError::Validation {
            field: "content",
            message: "must not be empty",
        });
    }
    Ok(content.to_string())
}

fn normalize_tag(field: &'static str, value: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() || value.len() > 150 {
        return Err(DomainError::Validation {
            field,
            message: "must be 1..150 chars",
        });
    }
    Ok(value.to_string())
}

fn normalize_images(images: Vec<String>) -> Vec<String> {
    images
        .into_iter()
        .map(|img| img.trim().to_string())
        .filter(|img| !img.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{CreatePostRequest, DomainError, images_to_column};

    fn request(title: &str, content: &str) -> CreatePostRequest {
        CreatePostRequest {
            title: title.to_string(),
            content: content.to_string(),
            category: "harassment".to_string(),
            institution: "State College".to_string(),
            images: Vec::new(),
        }
    }

    #[test]
    fn validate_rejects_empty_title() {
        let err = request("   ", "body").validate().expect_err("title must be rejected");
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, "title"),
            _ => panic!("expected DomainError::Validation"),
        }
    }

    #[test]
    fn validate_normalizes_fields_and_drops_blank_images() {
        let mut req = request("  A title  ", "  some content  ");
        req.images = vec!["  a.png  ".to_string(), "   ".to_string()];

        let validated = req.validate().expect("must validate");
        assert_eq!(validated.title, "A title");
        assert_eq!(validated.content, "some content");
        assert_eq!(validated.images, vec!["a.png".to_string()]);
    }

    #[test]
    fn images_column_is_null_for_empty_list() {
        assert_eq!(images_to_column(&[]).expect("must encode"), None);
    }

    #[test]
    fn images_column_is_json_for_non_empty_list() {
        let column = images_to_column(&["a.png".to_string(), "b.jpg".to_string()])
            .expect("must encode")
            .expect("must be some");
        assert_eq!(column, r#"["a.png","b.jpg"]"#);
    }
}
