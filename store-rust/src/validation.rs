//! Field rules shared by the article form and tag creation. Lengths are
//! counted in characters after trimming.

pub const TITLE_MIN_LENGTH: usize = 3;
pub const TITLE_MAX_LENGTH: usize = 200;
pub const CONTENT_MIN_LENGTH: usize = 10;
pub const TAG_NAME_MIN_LENGTH: usize = 2;
pub const TAG_NAME_MAX_LENGTH: usize = 50;

pub fn validate_title(title: &str) -> Result<(), String> {
    let length = title.trim().chars().count();
    if length == 0 {
        return Err("Title is required.".to_string());
    }
    if length < TITLE_MIN_LENGTH {
        return Err(format!(
            "Title must be at least {TITLE_MIN_LENGTH} characters long."
        ));
    }
    if length > TITLE_MAX_LENGTH {
        return Err(format!(
            "Title must be no more than {TITLE_MAX_LENGTH} characters long."
        ));
    }
    Ok(())
}

pub fn validate_content(content: &str) -> Result<(), String> {
    let length = content.trim().chars().count();
    if length == 0 {
        return Err("Content is required.".to_string());
    }
    if length < CONTENT_MIN_LENGTH {
        return Err(format!(
            "Content must be at least {CONTENT_MIN_LENGTH} characters long."
        ));
    }
    Ok(())
}

pub fn validate_tag_count(count: usize) -> Result<(), String> {
    if count == 0 {
        return Err("At least one tag is required.".to_string());
    }
    Ok(())
}

/// Tag names allow letters, digits, whitespace, hyphens and underscores.
pub fn validate_tag_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    let length = trimmed.chars().count();
    if length == 0 {
        return Err("Tag name is required.".to_string());
    }
    if length < TAG_NAME_MIN_LENGTH {
        return Err(format!(
            "Tag name must be at least {TAG_NAME_MIN_LENGTH} characters long."
        ));
    }
    if length > TAG_NAME_MAX_LENGTH {
        return Err(format!(
            "Tag name must be no more than {TAG_NAME_MAX_LENGTH} characters long."
        ));
    }
    let allowed =
        |c: char| c.is_ascii_alphanumeric() || c.is_whitespace() || c == '-' || c == '_';
    if !trimmed.chars().all(allowed) {
        return Err(
            "Tag name can only contain letters, numbers, spaces, hyphens, and underscores."
                .to_string(),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_rules() {
        assert_eq!(validate_title("   ").unwrap_err(), "Title is required.");
        assert_eq!(
            validate_title("Go").unwrap_err(),
            "Title must be at least 3 characters long."
        );
        assert!(validate_title("  Rust  ").is_ok());
        assert!(validate_title(&"x".repeat(TITLE_MAX_LENGTH)).is_ok());
        assert_eq!(
            validate_title(&"x".repeat(TITLE_MAX_LENGTH + 1)).unwrap_err(),
            "Title must be no more than 200 characters long."
        );
    }

    #[test]
    fn title_length_counts_characters_not_bytes() {
        assert!(validate_title("äö").is_err());
        assert!(validate_title("äöü").is_ok());
    }

    #[test]
    fn content_rules() {
        assert_eq!(validate_content("").unwrap_err(), "Content is required.");
        assert_eq!(
            validate_content(" too short ").unwrap_err(),
            "Content must be at least 10 characters long."
        );
        assert!(validate_content("long enough body").is_ok());
    }

    #[test]
    fn tag_name_rules() {
        assert_eq!(validate_tag_name(" ").unwrap_err(), "Tag name is required.");
        assert!(validate_tag_name("a").is_err());
        assert!(validate_tag_name(&"a".repeat(51)).is_err());
        assert!(validate_tag_name("web-dev_2024 notes").is_ok());
        assert!(validate_tag_name("c++").is_err());
    }

    #[test]
    fn tag_count_rule() {
        assert_eq!(
            validate_tag_count(0).unwrap_err(),
            "At least one tag is required."
        );
        assert!(validate_tag_count(1).is_ok());
    }
}
