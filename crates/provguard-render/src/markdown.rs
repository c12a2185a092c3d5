use provguard_types::{Violation, lookup_explanation};

pub fn render_markdown(violations: &[Violation]) -> String {
    let mut out = String::new();

    out.push_str("# Provguard report\n\n");
    let verdict = if violations.is_empty() { "PASS" } else { "FAIL" };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Violations: {}\n\n",
        verdict,
        violations.len()
    ));

    if violations.is_empty() {
        out.push_str("No violations.\n");
        return out;
    }

    out.push_str("## Violations\n\n");

    for v in violations {
        out.push_str(&format!("- `{}` / `{}` — {}\n", v.path, v.rule, v.message));
        if let Some(explanation) = lookup_explanation(&v.rule) {
            out.push_str(&format!("  - fix: {}\n", explanation.remediation));
        }
    }

    out
}
