//! Turns raw source text into an ordered list of segments.

/// Splits `source` into top-level, semicolon- and newline-delimited
/// segments. Splits never occur inside parentheses or inside a
/// double-quoted string literal; inside a string, `\` escapes the next
/// byte. Carriage returns are stripped.
pub fn split(source: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut depth: i32 = 0;
    let mut in_string = false;
    let mut escaped = false;

    for ch in source.chars() {
        if ch == '\r' {
            continue;
        }

        if escaped {
            current.push(ch);
            escaped = false;
            continue;
        }

        if in_string {
            current.push(ch);
            match ch {
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => {
                in_string = true;
                current.push(ch);
            }
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                depth -= 1;
                current.push(ch);
            }
            ';' if depth <= 0 => {
                segments.push(current.clone());
                current.clear();
            }
            '\n' if depth <= 0 => {
                segments.push(current.clone());
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Rejoins segments the way a program store would re-derive its source,
/// used to verify the splitter's left-inverse contract.
pub fn join(segments: &[String]) -> String {
    segments.join(";")
}
