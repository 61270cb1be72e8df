//! Helpers for renderers: breadcrumbs, link escaping and size formatting.

/// One segment of the breadcrumb trail above a listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Crumb {
    /// Relative link from the current directory to the segment.
    pub link: String,
    /// Segment name; empty for the root.
    pub text: String,
}

/// Splits a request path into breadcrumbs, root first.
///
/// Links are relative (`../` repeated) so the trail works under any mount
/// point. The final crumb, the current directory, links to `""`.
///
/// # Examples
///
/// ```
/// use listing::crumbs;
///
/// let trail = crumbs("/music/albums/");
/// let links: Vec<_> = trail.iter().map(|c| c.link.as_str()).collect();
/// let texts: Vec<_> = trail.iter().map(|c| c.text.as_str()).collect();
/// assert_eq!(links, ["../../", "../", ""]);
/// assert_eq!(texts, ["", "music", "albums"]);
/// ```
#[must_use]
pub fn crumbs(request_path: &str) -> Vec<Crumb> {
    let trimmed = request_path.strip_suffix('/').unwrap_or(request_path);
    let segments: Vec<&str> = trimmed.split('/').collect();
    let count = segments.len();
    segments
        .into_iter()
        .enumerate()
        .map(|(index, segment)| Crumb {
            link: "../".repeat(count - index - 1),
            text: segment.to_owned(),
        })
        .collect()
}

/// Escapes characters that would otherwise end the path part of a relative
/// link.
#[must_use]
pub fn href(relative: &str) -> String {
    relative.replace('#', "%23")
}

/// Formats a byte count with SI units the way listings display sizes.
///
/// # Examples
///
/// ```
/// use listing::human_size;
///
/// assert_eq!(human_size(9), "9 B");
/// assert_eq!(human_size(82_854), "83 kB");
/// assert_eq!(human_size(1_100_000), "1.1 MB");
/// ```
#[must_use]
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 7] = ["B", "kB", "MB", "GB", "TB", "PB", "EB"];
    if bytes < 10 {
        return format!("{bytes} B");
    }

    let mut exponent = 0;
    let mut scale = 1u64;
    while exponent + 1 < UNITS.len() && bytes / scale >= 1000 {
        scale *= 1000;
        exponent += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    let value = (bytes as f64 / scale as f64 * 10.0 + 0.5).floor() / 10.0;
    if value < 10.0 {
        format!("{value:.1} {}", UNITS[exponent])
    } else {
        format!("{value:.0} {}", UNITS[exponent])
    }
}
