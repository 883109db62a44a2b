//! Terminal output: status notes and aligned key/value blocks.

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";

/// Colour unless `NO_COLOR` is set or the terminal is dumb.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && std::env::var("TERM").map(|t| t != "dumb").unwrap_or(false)
}

pub fn note_info(msg: &str) {
    if supports_color() {
        println!("{CYAN}{BOLD}i{RESET} {msg}");
    } else {
        println!("INFO: {msg}");
    }
}

pub fn note_success(msg: &str) {
    if supports_color() {
        println!("{GREEN}{BOLD}✓{RESET} {msg}");
    } else {
        println!("OK: {msg}");
    }
}

pub fn note_error(msg: &str) {
    if supports_color() {
        eprintln!("{RED}{BOLD}✗{RESET} {msg}");
    } else {
        eprintln!("ERROR: {msg}");
    }
}

/// Labels padded to the longest one, one pair per line.
pub fn render_pairs(pairs: &[(&str, String)]) -> String {
    let width = pairs.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    pairs
        .iter()
        .map(|(k, v)| format!("  {k:<width$}  {v}\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_are_aligned() {
        let out = render_pairs(&[("model", "mock-gpt-4".into()), ("owned_by", "tanzu-workshop".into())]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "  model     mock-gpt-4");
        assert_eq!(lines[1], "  owned_by  tanzu-workshop");
    }

    #[test]
    fn empty_pairs_render_nothing() {
        assert!(render_pairs(&[]).is_empty());
    }
}
