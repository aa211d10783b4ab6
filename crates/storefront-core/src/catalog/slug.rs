//! Slug preview for admin forms.

/// Derive a URL slug from a title.
///
/// ASCII letters and digits are kept and lower-cased; every run of other
/// characters becomes a single `-`. The result never starts or ends with `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
