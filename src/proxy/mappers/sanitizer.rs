// Model output cleanup before it reaches the chat bubble.
use regex::Regex;
use std::sync::LazyLock;

static CODE_MARKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[`_]").expect("Invalid code mark regex"));
static HEADING_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*#+\s*").expect("Invalid heading regex"));
static BULLET_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*-\s*").expect("Invalid bullet regex"));

/// Strips backticks, underscores, leading heading runs and leading bullets,
/// then trims. Absent or empty input yields an empty string.
///
/// Heading and bullet stripping repeat until the text stops changing, so a
/// line such as `- # x` loses both markers and a second call is a no-op.
pub fn sanitize_response(text: Option<&str>) -> String {
    let text = match text {
        Some(t) if !t.is_empty() => t,
        _ => return String::new(),
    };

    let mut current = CODE_MARKS.replace_all(text, "").into_owned();
    loop {
        let without_headings = HEADING_MARKER.replace_all(&current, "");
        let next = BULLET_MARKER.replace_all(&without_headings, "").into_owned();
        if next == current {
            break;
        }
        current = next;
    }

    current.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_absent_input() {
        assert_eq!(sanitize_response(Some("")), "");
        assert_eq!(sanitize_response(None), "");
    }

    #[test]
    fn test_heading_bullet_and_code_marks() {
        assert_eq!(
            sanitize_response(Some("# Title\n- item one\n`code`")),
            "Title\nitem one\ncode"
        );
    }

    #[test]
    fn test_underscores_removed_anywhere() {
        assert_eq!(sanitize_response(Some("snake_case __bold__")), "snakecase bold");
    }

    #[test]
    fn test_indented_markers_and_deep_headings() {
        assert_eq!(
            sanitize_response(Some("   ### Uso\n    - Limpia la zona\n\t-Aplica")),
            "Uso\nLimpia la zona\nAplica"
        );
    }

    #[test]
    fn test_hyphen_inside_line_is_kept() {
        assert_eq!(
            sanitize_response(Some("Dura 4-6 horas - aprox.")),
            "Dura 4-6 horas - aprox."
        );
    }

    #[test]
    fn test_stacked_markers_are_all_removed() {
        assert_eq!(sanitize_response(Some("- # Nota")), "Nota");
        assert_eq!(sanitize_response(Some("## - Nota")), "Nota");
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        assert_eq!(sanitize_response(Some("\n\n  Hola 👋  \n")), "Hola 👋");
    }

    #[test]
    fn test_idempotent_on_samples() {
        let samples = [
            "",
            "# Title\n- item one\n`code`",
            "- # x\n#- y\n  -- z",
            "a_b `c` ## d\n\n- e\n-\n#",
            "Hola 👋, soy Patchy.\n\n1. Eucalipto\n2. Menta",
            "   \n \t- \n# \n",
        ];
        for sample in samples {
            let once = sanitize_response(Some(sample));
            let twice = sanitize_response(Some(&once));
            assert_eq!(once, twice, "not idempotent for {:?}", sample);
        }
    }

    const MARKER_ALPHABET: [char; 9] = ['#', '-', ' ', '\t', '\n', '`', '_', 'a', 'b'];

    fn assert_idempotent(input: &str) {
        let once = sanitize_response(Some(input));
        let twice = sanitize_response(Some(&once));
        assert_eq!(once, twice, "not idempotent for {:?}", input);
    }

    #[test]
    fn test_idempotent_for_every_short_marker_string() {
        // Every string of up to five characters over the marker alphabet.
        let mut frontier = vec![String::new()];
        for _ in 0..5 {
            let mut next = Vec::with_capacity(frontier.len() * MARKER_ALPHABET.len());
            for prefix in &frontier {
                for c in MARKER_ALPHABET {
                    let mut candidate = prefix.clone();
                    candidate.push(c);
                    assert_idempotent(&candidate);
                    next.push(candidate);
                }
            }
            frontier = next;
        }
    }

    #[test]
    fn test_idempotent_for_generated_long_inputs() {
        // Fixed-seed xorshift so failures reproduce.
        let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };
        for _ in 0..5_000 {
            let len = (next() % 48) as usize;
            let input: String = (0..len)
                .map(|_| MARKER_ALPHABET[(next() % MARKER_ALPHABET.len() as u64) as usize])
                .collect();
            assert_idempotent(&input);
        }
    }
}
