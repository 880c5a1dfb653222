//! Product slugs.

use rand::seq::SliceRandom;

const SUFFIX_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of the random suffix appended to a colliding slug.
pub const SUFFIX_LEN: usize = 3;

/// Lowercase `name` and collapse every run of characters outside `[a-z0-9]` into a
/// single `-`, without leading or trailing separators.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for character in name.chars().flat_map(char::to_lowercase) {
        if character.is_ascii_lowercase() || character.is_ascii_digit() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }

            pending_separator = false;
            slug.push(character);
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Append `-` and a short random suffix to `slug`.
#[must_use]
pub fn with_random_suffix(slug: &str) -> String {
    let mut rng = rand::thread_rng();

    let suffix: String = (0..SUFFIX_LEN)
        .filter_map(|_| SUFFIX_CHARSET.choose(&mut rng))
        .map(|&byte| char::from(byte))
        .collect();

    format!("{slug}-{suffix}")
}
