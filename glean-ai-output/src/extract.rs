//! Fenced-block window extraction.
//!
//! Models wrap structured payloads in markdown code fences and surround
//! them with prose. [`extract_fenced_block`] isolates the window the
//! structured decoder should look at, without touching the content itself.

use regex::Regex;
use std::sync::LazyLock;

/// A delimiter line: optional leading text, three or more backticks, an
/// optional language tag, optional trailing whitespace, then the line end.
/// End of input counts as a line end, so a fence opened in the last
/// fragment of a stream is already a delimiter.
static FENCE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^.*?`{3,}[ \t]*[A-Za-z0-9_+.#-]*[ \t]*\r?$").expect("valid fence pattern")
});

/// Isolate the fenced window of `text`.
///
/// - No delimiter lines: the input is returned unchanged.
/// - Exactly one: everything after it, the unterminated-fence case seen
///   mid-stream.
/// - Two or more: the content strictly between the first and second
///   delimiter lines. Anything after the second, including further fences,
///   is ignored.
///
/// The function is pure and returns a subslice of the input; delimiter
/// lines and the line breaks adjoining them are never part of the window.
/// Extracting an already-extracted window is a no-op, since a window never
/// contains a delimiter line.
#[must_use]
pub fn extract_fenced_block(text: &str) -> &str {
    let mut fences = FENCE_LINE.find_iter(text);
    let Some(first) = fences.next() else {
        return text;
    };

    // Window content starts past the delimiter's line terminator.
    let mut start = first.end();
    if text[start..].starts_with('\n') {
        start += 1;
    }

    match fences.next() {
        None => &text[start..],
        Some(second) => {
            let bytes = text.as_bytes();
            let mut end = second.start();
            if end > start && bytes[end - 1] == b'\n' {
                end -= 1;
                if end > start && bytes[end - 1] == b'\r' {
                    end -= 1;
                }
            }
            &text[start..end]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::plain_prose("no fences here at all", "no fences here at all")]
    #[case::bare_json("[1, 2, 3]", "[1, 2, 3]")]
    #[case::empty("", "")]
    #[case::inline_backticks("a `code` span is not a fence", "a `code` span is not a fence")]
    fn test_no_delimiters_returns_input_unchanged(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(extract_fenced_block(input), expected);
    }

    #[rstest]
    #[case::json_tag("Here you go:\n```json\n[1, 2]\n```\nHope that helps!", "[1, 2]")]
    #[case::no_tag("```\n{\"a\": 1}\n```", "{\"a\": 1}")]
    #[case::four_backticks("````\ndata\n````", "data")]
    #[case::cplusplus_tag("```c++\nint x;\n```", "int x;")]
    #[case::leading_text_on_fence("The data: ```json\n[3]\n```", "[3]")]
    #[case::indented_fence("  ```yaml\nkey: value\n  ```", "key: value")]
    #[case::trailing_ws_after_tag("```json  \n[7]\n```", "[7]")]
    fn test_two_delimiters_yields_content_between(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(extract_fenced_block(input), expected);
    }

    #[test]
    fn test_one_delimiter_yields_everything_after() {
        assert_eq!(extract_fenced_block("```json\n[1, 2"), "[1, 2");
        assert_eq!(extract_fenced_block("Sure:\n```json\n{\"a\":"), "{\"a\":");
    }

    #[test]
    fn test_unterminated_fence_line_at_end_of_input() {
        // The opening fence arrived as the last fragment, with no newline yet.
        assert_eq!(extract_fenced_block("Sure:\n```json"), "");
    }

    #[test]
    fn test_content_after_second_delimiter_is_ignored() {
        let input = "```json\n[1]\n```\nand also\n```yaml\n- 2\n```\n";
        assert_eq!(extract_fenced_block(input), "[1]");
    }

    #[test]
    fn test_empty_window_between_adjacent_fences() {
        assert_eq!(extract_fenced_block("```json\n```"), "");
    }

    #[test]
    fn test_crlf_line_endings() {
        let input = "intro\r\n```json\r\n[1, 2]\r\n```\r\n";
        assert_eq!(extract_fenced_block(input), "[1, 2]");
    }

    #[test]
    fn test_multiline_window_preserved_verbatim() {
        let input = "```\nline one\n  line two\n\nline four\n```";
        assert_eq!(extract_fenced_block(input), "line one\n  line two\n\nline four");
    }

    #[test]
    fn test_language_tag_with_junk_after_is_not_a_delimiter() {
        // "```json extra words" is ordinary text, not a fence line.
        let input = "```json extra words\nstill prose";
        assert_eq!(extract_fenced_block(input), input);
    }

    #[rstest]
    #[case("Here!\n```json\n[1, 2]\n```\ntrailing")]
    #[case("```json\n[1,")]
    #[case("no fences")]
    #[case("```\n\n```")]
    fn test_extraction_is_idempotent(#[case] input: &str) {
        let once = extract_fenced_block(input);
        let twice = extract_fenced_block(once);
        assert_eq!(once, twice);
    }
}
