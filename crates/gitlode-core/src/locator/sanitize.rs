//! Linux-safe filename sanitization.

/// Makes `name` safe as a single Linux path component.
///
/// - Replaces NUL, `/`, `\`, whitespace, and control characters with `_`
/// - Collapses runs of `_`
/// - Trims leading/trailing dots, spaces, and underscores
/// - Truncates to 255 bytes (NAME_MAX) on a char boundary
pub fn sanitize_filename_for_linux(name: &str) -> String {
    const NAME_MAX: usize = 255;

    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let c = if matches!(c, '\0' | '/' | '\\') || c.is_control() || c.is_whitespace() {
            '_'
        } else {
            c
        };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_' || c == ' ');
    let mut take = trimmed.len().min(NAME_MAX);
    while !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    trimmed[..take].to_string()
}
