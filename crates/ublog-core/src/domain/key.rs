//! Post key generation.
//!
//! Keys are `prefix + suffix` where the prefix is `KEY_EPOCH_CEILING - now_ms`
//! in fixed-width base-36. Newer posts get smaller prefixes, so a store that
//! enumerates keys in ascending order lists the newest post first. The random
//! suffix separates posts created in the same millisecond.

use chrono::Utc;
use rand::Rng;

/// Upper bound on epoch millis; keys stay non-negative until the year 2286.
const KEY_EPOCH_CEILING: i64 = 9_999_999_999_999;

/// Width of the inverted-timestamp prefix. `36^9` exceeds `KEY_EPOCH_CEILING`.
pub const KEY_PREFIX_WIDTH: usize = 9;

/// Width of the random suffix.
pub const KEY_SUFFIX_WIDTH: usize = 6;

const SUFFIX_SPACE: u64 = 36u64.pow(KEY_SUFFIX_WIDTH as u32);

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a key for a post created now.
pub fn generate_key() -> String {
    generate_key_at(Utc::now().timestamp_millis(), &mut rand::thread_rng())
}

/// Generate a key for a post created at `epoch_millis`, drawing the suffix from `rng`.
pub fn generate_key_at<R: Rng + ?Sized>(epoch_millis: i64, rng: &mut R) -> String {
    let inverted = (KEY_EPOCH_CEILING - epoch_millis).max(0) as u64;
    let suffix = rng.gen_range(0..SUFFIX_SPACE);

    let mut key = to_base36(inverted, KEY_PREFIX_WIDTH);
    key.push_str(&to_base36(suffix, KEY_SUFFIX_WIDTH));
    key
}

/// Lowercase base-36, left-padded with `0` to `width`.
fn to_base36(mut value: u64, width: usize) -> String {
    let mut digits = Vec::with_capacity(width);
    loop {
        digits.push(BASE36_DIGITS[(value % 36) as usize] as char);
        value /= 36;
        if value == 0 {
            break;
        }
    }
    while digits.len() < width {
        digits.push('0');
    }
    digits.iter().rev().collect()
}
