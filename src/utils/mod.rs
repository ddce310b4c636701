/// Normalize a switch identifier for use in cache keys.
/// Delimiters are dropped and hex digits upper-cased, so
/// "aa:bb:cc:dd:ee:ff", "AA-BB-CC-DD-EE-FF" and "AABBCCDDEEFF" collapse
/// to "AABBCCDDEEFF".
pub fn normalize_switch_id(switch_id: &str) -> String {
    switch_id
        .chars()
        .filter(|c| !is_switch_id_delimiter(*c))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

fn is_switch_id_delimiter(c: char) -> bool {
    matches!(c, ':' | '-' | '.') || c.is_whitespace()
}

/// Validate a port number segment: a non-empty run of ASCII digits that fits in a u32.
pub fn parse_port_number(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
