//! SQL `LIKE` patterns translated for backends without `LIKE`.

/// Translate a SQL `LIKE` pattern into an anchored regular expression.
///
/// `%` matches any run of characters (including none), `_` matches exactly
/// one, and `\` makes the next character literal. Everything else is matched
/// literally and case-sensitively, as PostgreSQL's `LIKE` does.
pub fn like_to_regex(pattern: &str) -> String {
    let mut regex = String::with_capacity(pattern.len() * 2 + 8);
    regex.push_str("(?s)^");

    let mut literal = String::new();
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '%' | '_' => {
                regex.push_str(&regex::escape(&literal));
                literal.clear();
                regex.push_str(if c == '%' { ".*" } else { "." });
            }
            // A trailing backslash has nothing to escape and stays literal.
            '\\' => literal.push(chars.next().unwrap_or('\\')),
            c => literal.push(c),
        }
    }
    regex.push_str(&regex::escape(&literal));
    regex.push('$');
    regex
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use rstest::rstest;

    fn like(pattern: &str, text: &str) -> bool {
        Regex::new(&like_to_regex(pattern)).unwrap().is_match(text)
    }

    #[rstest]
    fn test_translation() {
        assert_eq!(like_to_regex("%a%"), "(?s)^.*a.*$");
        assert_eq!(like_to_regex("Pizza"), "(?s)^Pizza$");
        assert_eq!(like_to_regex("_"), "(?s)^.$");
    }

    #[rstest]
    #[case("%", "", true)]
    #[case("%", "Ice Cream Sundae", true)]
    #[case("%a%", "Lasagne", true)]
    #[case("%a%", "Tomato Soup", true)]
    #[case("%a%", "Sushi", false)]
    #[case("%A%", "Lasagne", false)]
    #[case("P_zza", "Pizza", true)]
    #[case("P_zza", "Pzza", false)]
    #[case("Pizza", "Pizza!", false)]
    #[case("100\\%", "100%", true)]
    #[case("100\\%", "1000", false)]
    #[case("a\\_b", "a_b", true)]
    #[case("a\\_b", "axb", false)]
    #[case("(x)+.", "(x)+.", true)]
    #[case("(x)+.", "xx!", false)]
    #[case("tail\\", "tail\\", true)]
    #[case("%", "line\nbreak", true)]
    fn test_like_semantics(#[case] pattern: &str, #[case] text: &str, #[case] expected: bool) {
        assert_eq!(like(pattern, text), expected, "{:?} LIKE {:?}", text, pattern);
    }
}
