use provguard_types::Violation;

/// One line per violation, suitable for terminal output and error text.
pub fn render_text(violations: &[Violation]) -> String {
    let mut out = String::new();
    if violations.is_empty() {
        out.push_str("no violations\n");
        return out;
    }
    out.push_str(&format!("{} violation(s)\n", violations.len()));
    for v in violations {
        out.push_str(&format!("{v}\n"));
    }
    out
}
