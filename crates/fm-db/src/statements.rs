//! Split a migration script into executable statements.

/// Statements of `script` in order, with comment lines removed.
///
/// A line whose first non-blank characters are `comment_prefix` is dropped.
/// The remaining text is split on `;` and empty statements are skipped.
/// Semicolons inside string literals are not recognized.
pub fn split_statements(script: &str, comment_prefix: &str) -> Vec<String> {
    let body: String = script
        .lines()
        .filter(|line| !line.trim_start().starts_with(comment_prefix))
        .collect::<Vec<_>>()
        .join("\n");

    body.split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "statements_test.rs"]
mod tests;
