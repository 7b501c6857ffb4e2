/// System prompts for the supported writing styles. Anything unknown
/// falls back to the blog preset.
const BLOG: &str = "You are a creative blog writer. Write engaging, informative blog posts with a conversational tone.";
const ARTICLE: &str = "You are a professional article writer. Write well-researched, formal articles with clear structure.";
const SOCIAL: &str = "You are a social media content creator. Write catchy, concise posts optimized for social media platforms.";

pub fn style_prompt(style: Option<&str>) -> &'static str {
    match style {
        Some("article") => ARTICLE,
        Some("social") => SOCIAL,
        _ => BLOG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_styles_map_to_their_prompts() {
        assert_eq!(style_prompt(Some("blog")), BLOG);
        assert_eq!(style_prompt(Some("article")), ARTICLE);
        assert_eq!(style_prompt(Some("social")), SOCIAL);
    }

    #[test]
    fn unknown_or_absent_style_falls_back_to_blog() {
        assert_eq!(style_prompt(None), BLOG);
        assert_eq!(style_prompt(Some("haiku")), BLOG);
        assert_eq!(style_prompt(Some("")), BLOG);
    }
}
