// Prefix resolution and invocation parsing. These are the pure pieces of the
// dispatch path; the discord layer feeds them into the framework's prefix
// hook and the help command reuses them for lookups.

/// Compute the effective prefix list for a guild: the custom prefix (if
/// configured) first, then the built-in defaults unless the guild opted out.
///
/// A guild that disables the defaults without configuring its own prefix
/// falls back to the default list anyway, so no guild is ever left without a
/// usable prefix.
pub fn resolve_prefixes(
    custom_prefix: Option<&str>,
    use_default_prefix: bool,
    defaults: &[String],
) -> Vec<String> {
    let mut prefixes = Vec::new();

    if let Some(custom) = custom_prefix {
        if !custom.is_empty() {
            prefixes.push(custom.to_string());
        }
    }

    if use_default_prefix {
        prefixes.extend(defaults.iter().cloned());
    }

    if prefixes.is_empty() {
        defaults.to_vec()
    } else {
        prefixes
    }
}

/// Match `content` against the prefix list; first match wins. Returns the
/// matched prefix and the remaining text.
pub fn match_prefix<'a>(content: &'a str, prefixes: &[String]) -> Option<(&'a str, &'a str)> {
    for prefix in prefixes {
        if let Some(rest) = content.strip_prefix(prefix.as_str()) {
            return Some((&content[..prefix.len()], rest));
        }
    }
    None
}

/// Split prefix-stripped text into a command token and its argument text.
/// Returns `None` when there is nothing after the prefix.
pub fn split_invocation(rest: &str) -> Option<(&str, &str)> {
    let trimmed = rest.trim_start();
    if trimmed.is_empty() {
        return None;
    }

    match trimmed.split_once(char::is_whitespace) {
        Some((name, args)) => Some((name, args.trim_start())),
        None => Some((trimmed, "")),
    }
}
