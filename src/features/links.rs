//! Link classification and media counts.

use crate::dom::{get_attribute, Document, Selection};
use crate::result::{LinkStats, MediaStats};
use crate::url_utils::is_internal_href;

/// Classify every anchor carrying an `href`.
///
/// Internal anchors are root-relative or contain `page_host`. External
/// anchors count as dofollow unless their `rel` contains `nofollow`.
#[must_use]
pub fn link_stats(doc: &Document, page_host: &str) -> LinkStats {
    let mut stats = LinkStats::default();
    for node in doc.select("a[href]").nodes() {
        let anchor = Selection::from(*node);
        let href = get_attribute(&anchor, "href").unwrap_or_default();
        if is_internal_href(&href, page_host) {
            stats.internal_count += 1;
            continue;
        }
        stats.external_count += 1;
        let nofollow = get_attribute(&anchor, "rel")
            .is_some_and(|rel| rel.to_ascii_lowercase().contains("nofollow"));
        if !nofollow {
            stats.external_dofollow_count += 1;
        }
    }
    stats
}

/// Count images, images with alt text, and embedded videos.
#[must_use]
pub fn media_stats(doc: &Document) -> MediaStats {
    let images = doc.select("img");
    let image_with_alt_count = images
        .nodes()
        .iter()
        .filter(|node| {
            get_attribute(&Selection::from(**node), "alt").is_some_and(|alt| !alt.trim().is_empty())
        })
        .count();
    MediaStats {
        image_count: images.length(),
        image_with_alt_count,
        video_count: doc.select("video, iframe").length(),
    }
}
