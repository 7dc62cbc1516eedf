//! Note identifiers.
//!
//! An id is `<base36 millis>-<16 hex digits>`. The prefix keeps ids roughly
//! time-ordered when eyeballing a store file; the suffix carries 64 bits from
//! the thread-local CSPRNG so that ids minted in the same millisecond do not
//! collide. Callers must treat ids as opaque and only compare them for equality.

use chrono::Utc;
use rand::Rng;

/// Generate a fresh note id.
pub fn generate() -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    let suffix: u64 = rand::thread_rng().gen();
    format!("{}-{:016x}", to_base36(millis), suffix)
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while value > 0 {
        buf.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).unwrap_or_default()
}
