//! Utility functions for ridedesk

/// Whether `url` already carries an `http`/`https` scheme
#[must_use]
pub fn has_network_scheme(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Resolve a photo path against the file-serving origin
///
/// Absolute `http(s)` URLs are returned unchanged, an empty input stays empty,
/// and anything else is joined onto `file_base` with exactly one `/`.
#[must_use]
pub fn normalize_photo_url(url: &str, file_base: &str) -> String {
    if url.is_empty() || has_network_scheme(url) {
        return url.to_string();
    }

    let base = file_base.trim_end_matches('/');
    let path = url.trim_start_matches('/');
    format!("{base}/{path}")
}

/// [`normalize_photo_url`] for optional values; absent or blank URLs stay absent
#[must_use]
pub fn normalize_optional_photo_url(url: Option<&str>, file_base: &str) -> Option<String> {
    url.map(str::trim)
        .filter(|u| !u.is_empty())
        .map(|u| normalize_photo_url(u, file_base))
}

/// Number of pages needed for `len` items, never less than one
#[must_use]
pub const fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 || len == 0 {
        return 1;
    }
    len.div_ceil(page_size)
}

/// Trim a free-text field, mapping blank input to `None`
#[must_use]
pub fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
