//! Id and clock helpers shared across the workspace.

/// Current UTC timestamp in milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a store push id: lexicographically sortable, unique at
/// single-gym scale.
///
/// Layout (string, 13 chars):
///   - base36 millisecond timestamp (sortable prefix)
///   - 5 base36 random chars (collision headroom within one ms)
///
/// Matches the id shape the legacy store already contains, so new and
/// migrated records sort together chronologically.
pub fn push_id() -> String {
    use rand::Rng;
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    let mut id = to_base36(now_millis() as u64);
    for _ in 0..5 {
        id.push(ALPHABET[rng.gen_range(0..36)] as char);
    }
    id
}

fn to_base36(mut n: u64) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(ALPHABET[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).expect("base36 output is always ASCII")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_ids_are_unique_and_sortable() {
        let a = push_id();
        let b = push_id();
        assert_ne!(a, b);
        assert!(a.len() >= 13);
    }

    #[test]
    fn base36_round_trip() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
