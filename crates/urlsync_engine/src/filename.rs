use sha2::{Digest, Sha256};

/// Portable, deterministic file name for a store: `{sanitized_name}--{short_hash(name)}.json`
pub fn store_filename(store_name: &str) -> String {
    let sanitized = sanitize_name(store_name);
    let hash = short_hash(store_name);
    format!("{sanitized}--{hash}.json")
}

fn sanitize_name(input: &str) -> String {
    let mut compacted = String::with_capacity(input.len());
    let mut prev_underscore = false;
    for c in input.trim().chars() {
        let c = if c.is_ascii_alphanumeric() || c == '-' {
            c
        } else {
            '_'
        };
        if c == '_' && prev_underscore {
            continue;
        }
        prev_underscore = c == '_';
        compacted.push(c);
    }
    let mut name = compacted.trim_matches('_').to_string();
    if name.is_empty() {
        name = "store".to_string();
    }
    name.truncate(64);
    name
}

fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
