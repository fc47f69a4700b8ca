use crate::errors::{CoreError, CoreResult};

/// Field-level validation for submission payloads. All checks run before a
/// transaction is opened; a payload that fails here is never partially
/// applied.
pub struct ValidationService;

impl ValidationService {
    pub fn validate_title(title: &str) -> CoreResult<String> {
        let trimmed = title.trim();

        if trimmed.is_empty() {
            return Err(CoreError::validation("Project title cannot be empty"));
        }

        if trimmed.len() > 200 {
            return Err(CoreError::validation(
                "Project title is too long (max 200 characters)",
            ));
        }

        Ok(trimmed.to_string())
    }

    pub fn validate_description(description: &str) -> CoreResult<String> {
        let trimmed = description.trim();

        if trimmed.is_empty() {
            return Err(CoreError::validation(
                "Project description cannot be empty",
            ));
        }

        if trimmed.len() > 10_000 {
            return Err(CoreError::validation(
                "Project description is too long (max 10000 characters)",
            ));
        }

        Ok(trimmed.to_string())
    }

    /// Thumbnail and media URLs are opaque references into external blob
    /// storage; only emptiness and length are checked here.
    pub fn validate_url_field(field: &str, url: &str) -> CoreResult<String> {
        let trimmed = url.trim();

        if trimmed.is_empty() {
            return Err(CoreError::validation(format!("{} cannot be empty", field)));
        }

        if trimmed.len() > 2000 {
            return Err(CoreError::validation(format!(
                "{} is too long (max 2000 characters)",
                field
            )));
        }

        Ok(trimmed.to_string())
    }

    pub fn validate_team_name(name: &str) -> CoreResult<String> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(CoreError::validation("Team name cannot be empty"));
        }

        if trimmed.len() > 100 {
            return Err(CoreError::validation(
                "Team name is too long (max 100 characters)",
            ));
        }

        Ok(trimmed.to_string())
    }

    pub fn validate_feedback_content(content: &str) -> CoreResult<String> {
        let trimmed = content.trim();

        if trimmed.is_empty() {
            return Err(CoreError::validation("Feedback content cannot be empty"));
        }

        if trimmed.len() > 5_000 {
            return Err(CoreError::validation(
                "Feedback content is too long (max 5000 characters)",
            ));
        }

        Ok(trimmed.to_string())
    }

    /// Ratings outside [1, 5] are rejected, never clamped.
    pub fn validate_rating(rating: i32) -> CoreResult<i32> {
        if !(1..=5).contains(&rating) {
            return Err(CoreError::validation(format!(
                "Rating must be between 1 and 5, got {}",
                rating
            )));
        }
        Ok(rating)
    }

    /// Optional URL fields: a supplied blank value is normalized to `None`
    /// rather than stored as an empty string.
    pub fn normalize_optional_url(value: Option<String>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_validation() {
        assert_eq!(
            ValidationService::validate_title("  Solar Pods  ").unwrap(),
            "Solar Pods"
        );
        assert!(ValidationService::validate_title("").is_err());
        assert!(ValidationService::validate_title("   ").is_err());
        assert!(ValidationService::validate_title(&"a".repeat(201)).is_err());
    }

    #[test]
    fn test_description_validation() {
        assert!(ValidationService::validate_description("A project").is_ok());
        assert!(ValidationService::validate_description(" ").is_err());
    }

    #[test]
    fn test_team_name_validation() {
        assert_eq!(
            ValidationService::validate_team_name("EduTech").unwrap(),
            "EduTech"
        );
        assert!(ValidationService::validate_team_name("  ").is_err());
        assert!(ValidationService::validate_team_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_rating_validation() {
        for rating in 1..=5 {
            assert_eq!(ValidationService::validate_rating(rating).unwrap(), rating);
        }
        assert!(ValidationService::validate_rating(0).is_err());
        assert!(ValidationService::validate_rating(6).is_err());
        assert!(ValidationService::validate_rating(-1).is_err());
    }

    #[test]
    fn test_url_field_validation() {
        assert!(ValidationService::validate_url_field("thumbnailUrl", "https://x/y.jpg").is_ok());
        assert!(ValidationService::validate_url_field("thumbnailUrl", "").is_err());
    }

    #[test]
    fn test_normalize_optional_url() {
        assert_eq!(
            ValidationService::normalize_optional_url(Some(" https://x ".to_string())),
            Some("https://x".to_string())
        );
        assert_eq!(
            ValidationService::normalize_optional_url(Some("  ".to_string())),
            None
        );
        assert_eq!(ValidationService::normalize_optional_url(None), None);
    }
}
