//! Share-slug generation.

use rand::Rng;

/// Length of generated share slugs.
pub const SLUG_LEN: usize = 6;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a random 6-character lowercase alphanumeric slug.
///
/// Slugs are shareable short identifiers, generated for every finished
/// lecture regardless of persistence outcome. Uniqueness is enforced by
/// the database constraint, not here; collisions at 36^6 are accepted
/// as an insert error the caller can observe.
pub fn share_slug() -> String {
    let mut rng = rand::rng();
    (0..SLUG_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
