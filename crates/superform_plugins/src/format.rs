//! Wiki page naming and markup.

use superform_domain::Publishing;

/// Characters stripped from titles before they are used as page names.
pub const TITLE_DELIMITERS: &[char] = &[
    ' ', ',', ';', '.', '\\', '/', '<', '>', '@', '?', '=', '+', '%', '*', '`', '"', '\n', '&',
    '#', '_',
];

/// Remove every delimiter character from `title`.
///
/// The result is lossy: case is preserved, nothing is truncated, and a title
/// made only of delimiters becomes an empty string.
pub fn format_title(title: &str) -> String {
    title.split(TITLE_DELIMITERS).collect()
}

/// Wiki markup for a news page: a `(:title ...:)` directive followed by the
/// description. Neither field is escaped.
pub fn format_text(title: &str, description: &str) -> String {
    format!("(:title {title}:){description}")
}

/// Page name `<formatted title>-<post id>-<channel id>`.
pub fn page_name(publishing: &Publishing) -> String {
    format!(
        "{}-{}-{}",
        format_title(&publishing.title),
        publishing.post_id,
        publishing.channel_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use superform_domain::{ChannelId, PostId};

    #[test]
    fn test_format_title_strips_delimiters() {
        assert_eq!(format_title("Hello, World"), "HelloWorld");
        assert_eq!(format_title("a.b/c\\d<e>f@g?h=i+j%k*l`m\"n\no&p#q_r;s"), "abcdefghijklmnopqrs");
    }

    #[test]
    fn test_format_title_keeps_other_punctuation() {
        assert_eq!(format_title("Hello, World!"), "HelloWorld!");
        assert_eq!(format_title("C'est l'été"), "C'estl'été");
    }

    #[test]
    fn test_format_title_preserves_case() {
        assert_eq!(format_title("MiXeD Case"), "MiXeDCase");
    }

    #[test]
    fn test_format_title_edge_cases() {
        assert_eq!(format_title(""), "");
        assert_eq!(format_title(" , ; . _ "), "");
    }

    #[test]
    fn test_format_text() {
        assert_eq!(format_text("Title", "Body"), "(:title Title:)Body");
        assert_eq!(format_text("", ""), "(:title :)");
        assert_eq!(format_text("a:)b", "[[x]]"), "(:title a:)b:)[[x]]");
    }

    #[test]
    fn test_page_name() {
        let publishing = Publishing::new("Hello, World", "desc", PostId(5), ChannelId(2));
        assert_eq!(page_name(&publishing), "HelloWorld-5-2");
    }

    #[test]
    fn test_page_name_negative_channel() {
        let publishing = Publishing::new("News", "", PostId(1), ChannelId(-1));
        assert_eq!(page_name(&publishing), "News-1--1");
    }

    fn delimiter_string() -> impl Strategy<Value = String> {
        prop::collection::vec(prop::sample::select(TITLE_DELIMITERS.to_vec()), 0..32)
            .prop_map(|chars| chars.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_only_delimiters_yield_empty(title in delimiter_string()) {
            prop_assert_eq!(format_title(&title), "");
        }

        #[test]
        fn prop_delimiter_free_title_unchanged(title in "[a-zA-Z0-9!'()\\-:é]{0,40}") {
            prop_assert_eq!(format_title(&title), title);
        }

        #[test]
        fn prop_output_has_no_delimiters(title in ".{0,64}") {
            let formatted = format_title(&title);
            prop_assert!(!formatted.contains(TITLE_DELIMITERS));
        }

        #[test]
        fn prop_format_text_is_concatenation(title in ".{0,32}", description in ".{0,32}") {
            let text = format_text(&title, &description);
            prop_assert_eq!(text, format!("(:title {}:){}", title, description));
        }
    }
}
