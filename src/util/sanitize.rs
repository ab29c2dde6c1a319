use regex::Regex;
use std::sync::LazyLock;

// CSI sequences (ESC[ ... cmd) cover the styling/movement codes seen in practice.
static ANSI_CSI: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;?]*[ -/]*[@-~]").ok());

/// Makes untrusted API text safe to print: strips ANSI sequences and control
/// characters, collapses whitespace, and truncates to `max_chars`.
pub fn sanitize_for_terminal(s: &str, max_chars: usize) -> String {
    let no_ansi = match ANSI_CSI.as_ref() {
        Some(re) => re.replace_all(s, "").into_owned(),
        None => s.to_string(),
    };

    let cleaned: String = no_ansi
        .chars()
        .map(|ch| if matches!(ch, '\n' | '\r' | '\t') { ' ' } else { ch })
        .filter(|ch| !ch.is_control())
        .collect();
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() > max_chars {
        let mut truncated: String = collapsed.chars().take(max_chars.saturating_sub(1)).collect();
        truncated.push('…');
        truncated
    } else {
        collapsed
    }
}
