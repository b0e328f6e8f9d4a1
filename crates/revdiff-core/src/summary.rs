//! Templated change summaries

/// Render a one-sentence summary of diff counts.
///
/// Zero-count clauses are omitted; the first clause carries the word
/// "objects". All-zero input yields a fixed no-changes sentence. Pure and
/// infallible.
pub fn summarize(added: usize, removed: usize, moved: usize) -> String {
    let mut clauses: Vec<String> = Vec::new();
    for (count, verb) in [(added, "added"), (removed, "removed"), (moved, "moved")] {
        if count == 0 {
            continue;
        }
        if clauses.is_empty() {
            clauses.push(format!("{} objects {}", count, verb));
        } else {
            clauses.push(format!("{} {}", count, verb));
        }
    }

    if clauses.is_empty() {
        "No changes detected.".to_string()
    } else {
        format!("{}.", clauses.join(", "))
    }
}
