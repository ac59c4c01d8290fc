//! Marker-based parsing of free-text model replies. Every path yields a
//! renderable result; missing sections fall back to fixed defaults.

use super::prompts::REWRITE_MARKER;

pub const REVIEW_MARKER: &str = "REVIEW:";
pub const SUGGESTIONS_MARKER: &str = "SUGGESTIONS:";
pub const IMPROVEMENTS_MARKER: &str = "Improvements:";

pub const FALLBACK_SUGGESTIONS: [&str; 3] = [
    "Review code structure and organization",
    "Check for proper error handling",
    "Ensure code follows best practices",
];

pub const FALLBACK_IMPROVEMENTS: [&str; 2] = ["Fixed syntax errors", "Code is error-free"];

/// Lines starting with `-` or `*`, marker stripped and trimmed.
fn bullet_items(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter_map(|line| {
            line.strip_prefix('-')
                .or_else(|| line.strip_prefix('*'))
                .map(|rest| rest.trim().to_string())
        })
        .collect()
}

/// Split a reply into review body and suggestion list.
pub fn parse_review(reply: &str) -> (String, Vec<String>) {
    let review = match reply.split_once(REVIEW_MARKER) {
        Some((_, rest)) => rest
            .split(SUGGESTIONS_MARKER)
            .next()
            .unwrap_or_default()
            .trim()
            .to_string(),
        None => reply.trim().to_string(),
    };

    let mut suggestions = match reply.split_once(SUGGESTIONS_MARKER) {
        Some((_, rest)) => bullet_items(rest),
        None => Vec::new(),
    };
    if suggestions.is_empty() {
        suggestions = FALLBACK_SUGGESTIONS.map(String::from).to_vec();
    }

    (review, suggestions)
}

/// Split a reply into rewritten code and improvements list.
pub fn parse_rewrite(reply: &str) -> (String, Vec<String>) {
    let rewritten_code = match reply.split_once(REWRITE_MARKER) {
        Some((_, rest)) => rest.trim().to_string(),
        None => reply.trim().to_string(),
    };

    let mut improvements = match reply.split_once(IMPROVEMENTS_MARKER) {
        Some((_, rest)) => bullet_items(rest),
        None => Vec::new(),
    };
    if improvements.is_empty() {
        improvements = FALLBACK_IMPROVEMENTS.map(String::from).to_vec();
    }

    (rewritten_code, improvements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_with_both_markers() {
        let reply = "REVIEW: looks fine\nSUGGESTIONS:\n- add docstring\n- add type hints";
        let (review, suggestions) = parse_review(reply);
        assert_eq!(review, "looks fine");
        assert_eq!(suggestions, vec!["add docstring", "add type hints"]);
    }

    #[test]
    fn review_without_markers_is_whole_reply() {
        let reply = "  The code is straightforward and correct.  ";
        let (review, suggestions) = parse_review(reply);
        assert_eq!(review, "The code is straightforward and correct.");
        assert_eq!(suggestions, FALLBACK_SUGGESTIONS.map(String::from).to_vec());
    }

    #[test]
    fn review_accepts_asterisk_bullets() {
        let reply = "REVIEW: ok\nSUGGESTIONS:\n* first\n* second";
        let (_, suggestions) = parse_review(reply);
        assert_eq!(suggestions, vec!["first", "second"]);
    }

    #[test]
    fn suggestions_section_without_bullets_falls_back() {
        let reply = "REVIEW: ok\nSUGGESTIONS:\nnothing actionable here";
        let (review, suggestions) = parse_review(reply);
        assert_eq!(review, "ok");
        assert_eq!(suggestions, FALLBACK_SUGGESTIONS.map(String::from).to_vec());
    }

    #[test]
    fn review_body_stops_at_suggestions_marker() {
        let reply = "preamble REVIEW: body text\nSUGGESTIONS:\n- one";
        let (review, _) = parse_review(reply);
        assert_eq!(review, "body text");
    }

    #[test]
    fn rewrite_with_sentinel() {
        let reply = "Here is the fix.\n---CORRECTED---\nfn main() { println!(\"hi\"); }";
        let (code, improvements) = parse_rewrite(reply);
        assert_eq!(code, "fn main() { println!(\"hi\"); }");
        assert_eq!(
            improvements,
            FALLBACK_IMPROVEMENTS.map(String::from).to_vec()
        );
    }

    #[test]
    fn rewrite_without_sentinel_is_whole_reply() {
        let reply = "  fn main() {}  ";
        let (code, improvements) = parse_rewrite(reply);
        assert_eq!(code, "fn main() {}");
        assert_eq!(
            improvements,
            FALLBACK_IMPROVEMENTS.map(String::from).to_vec()
        );
    }

    #[test]
    fn rewrite_extracts_improvements_bullets() {
        let reply = "---CORRECTED---\nx = 1\n\nImprovements:\n- fixed assignment operator\n- removed dead code";
        let (code, improvements) = parse_rewrite(reply);
        assert!(code.starts_with("x = 1"));
        assert_eq!(
            improvements,
            vec!["fixed assignment operator", "removed dead code"]
        );
    }

    #[test]
    fn sentinel_does_not_match_mid_word() {
        // A bare-word marker would match prose like "Outputs"; the sentinel
        // line cannot occur in ordinary replies.
        let reply = "The function Outputs a value.\nfn f() -> u8 { 1 }";
        let (code, _) = parse_rewrite(reply);
        assert_eq!(code, reply.trim());
    }
}
