/// Placeholder that replaces the hidden part of a message.
pub const MASK: &str = "****";

/// Redact a message, keeping only its first and last character.
///
/// Messages longer than two characters become `first + "****" + last`;
/// anything shorter collapses to `"****"`. Length is counted in chars so
/// multi-byte input is never split.
///
/// This is obfuscation for log hygiene, not a security control.
pub fn mask(message: &str) -> String {
    let mut chars = message.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if chars.next().is_some() => {
            let mut out = String::with_capacity(first.len_utf8() + MASK.len() + last.len_utf8());
            out.push(first);
            out.push_str(MASK);
            out.push(last);
            out
        }
        _ => MASK.to_string(),
    }
}
