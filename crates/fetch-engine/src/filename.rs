//! Deterministic cache filenames for downloaded media.

use twox_hash::xxh3::hash64;

/// Longest final-segment suffix kept in a cache filename.
const MAX_SEGMENT_LEN: usize = 80;

/// Derive the cache filename for a source URL.
///
/// The name is the 16-hex-digit hash of the full URL followed by the
/// URL's final path segment (query and fragment stripped, unsafe
/// characters replaced). The hash prefix keeps distinct URLs apart even
/// when their final segments match, and makes re-downloads of the same
/// URL land on the same file.
pub fn cache_filename(url: &str) -> String {
    let prefix = format!("{:016x}", hash64(url.as_bytes()));

    let without_fragment = url.split('#').next().unwrap_or(url);
    let without_query = without_fragment.split('?').next().unwrap_or(without_fragment);
    let segment = without_query
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("download");

    let mut sanitized: String = segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if sanitized.len() > MAX_SEGMENT_LEN {
        sanitized = sanitized
            .chars()
            .skip(sanitized.chars().count().saturating_sub(MAX_SEGMENT_LEN))
            .collect();
    }

    format!("{prefix}-{sanitized}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_filename_is_deterministic() {
        let url = "https://cdn.example.com/photos/lamp.jpg";
        assert_eq!(cache_filename(url), cache_filename(url));
    }

    #[test]
    fn test_same_segment_different_urls_do_not_collide() {
        let a = cache_filename("https://cdn.example.com/items/1/photo.jpg");
        let b = cache_filename("https://cdn.example.com/items/2/photo.jpg");
        assert_ne!(a, b);
        assert!(a.ends_with("-photo.jpg"));
        assert!(b.ends_with("-photo.jpg"));
    }

    #[test]
    fn test_query_and_fragment_are_stripped_from_segment() {
        let name = cache_filename("https://cdn.example.com/photo.jpg?w=500#top");
        assert!(name.ends_with("-photo.jpg"));

        // Same path, different query: still distinct files.
        let other = cache_filename("https://cdn.example.com/photo.jpg?w=900");
        assert_ne!(name, other);
    }

    #[test]
    fn test_trailing_slash_falls_back_to_placeholder() {
        let name = cache_filename("https://cdn.example.com/photos/");
        assert!(name.ends_with("-download"));
    }

    #[test]
    fn test_unsafe_characters_are_replaced() {
        let name = cache_filename("https://cdn.example.com/my photo (1).jpg");
        assert!(!name.contains(' '));
        assert!(!name.contains('('));
    }

    proptest! {
        #[test]
        fn prop_filename_is_a_single_safe_path_component(url in ".{0,200}") {
            let name = cache_filename(&url);
            prop_assert!(!name.is_empty());
            prop_assert!(!name.contains('/'));
            prop_assert!(!name.contains('\\'));
            prop_assert!(name.len() <= 16 + 1 + MAX_SEGMENT_LEN);
            prop_assert_eq!(cache_filename(&url), name);
        }
    }
}
