//! Embedded fallback prompts
//!
//! These are compiled into the binary and used when template files are not found.

/// Prompt for generating the study outline
pub const OUTLINE: &str = r#"Generate a detailed and comprehensive index for studying {{subject}}. Include:
1. All major concepts and their sub-topics
2. Practical applications and examples
3. Common problems and solutions
4. Best practices and guidelines
Use ## for main sections and nested bullets for subsections.
Make sure to cover both theoretical and practical aspects."#;

/// Prompt for expanding one heading into detailed notes
pub const DETAIL: &str = r#"Create comprehensive educational notes for the topic "{{heading}}" in the context of {{subject}}. Include:
1. Detailed explanation of concepts
2. Real-world examples and applications
3. Code examples where applicable
4. Common pitfalls and how to avoid them
5. Best practices and tips
6. Related concepts and their connections
7. Practice problems or exercises

Format the response in clear markdown with appropriate sections and highlighting of key concepts."#;

/// Look up an embedded template by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    match name {
        "outline" => Some(OUTLINE),
        "detail" => Some(DETAIL),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_embedded_known_names() {
        assert!(get_embedded("outline").is_some());
        assert!(get_embedded("detail").is_some());
        assert!(get_embedded("nonexistent").is_none());
    }

    #[test]
    fn test_outline_template_has_subject_placeholder() {
        assert!(OUTLINE.contains("{{subject}}"));
        assert!(OUTLINE.contains("##"));
    }

    #[test]
    fn test_detail_template_has_both_placeholders() {
        assert!(DETAIL.contains("{{heading}}"));
        assert!(DETAIL.contains("{{subject}}"));
    }
}
