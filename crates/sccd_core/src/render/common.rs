//! Markup pieces shared by section renderers.

use crate::dom::{Element, Fragment};

pub const EMPTY_STATE_TEXT: &str = "No data available.";

/// Brand accent colors cycled by listings and active controls.
pub const ACCENT_COLORS: [&str; 3] = ["#FF448A", "#00FF80", "#26BCFF"];

const IFRAME_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture";

/// Placeholder rendered by every list renderer given no records.
pub fn empty_state() -> Element {
    Element::new("p")
        .class("empty-state text-gray-5 col-span-full")
        .text(EMPTY_STATE_TEXT)
}

pub fn empty_state_fragment() -> Fragment {
    Fragment::new().with(empty_state())
}

/// Accordion item chevron; rotated 180deg when open.
pub fn chevron_down() -> Element {
    Element::new("i").class("fa-solid fa-chevron-down text-p1 transition-transform duration-300")
}

/// Year toggle chevron. `rotate-90` marks the group as initially open.
pub fn chevron_right_open() -> Element {
    Element::new("i").class("fa-solid fa-chevron-right text-p1 transition-all duration-fast rotate-90")
}

/// Thin rule between year groups.
pub fn rule_row(row_classes: &str, rule_classes: &str) -> Element {
    Element::new("div")
        .class(row_classes)
        .child(Element::new("div").class(rule_classes))
}

/// Whether `url` should be embedded as a player iframe.
pub fn is_embed_url(url: &str) -> bool {
    url.contains("youtube") || url.contains("vimeo") || url.contains("embed")
}

/// Video player for `url`: iframe for hosted players, `<video>` otherwise.
pub fn video_embed(url: &str) -> Element {
    if is_embed_url(url) {
        Element::new("iframe")
            .class("w-full h-full")
            .attr("src", url)
            .attr("frameborder", "0")
            .attr("allow", IFRAME_ALLOW)
            .attr("allowfullscreen", "")
    } else {
        Element::new("video")
            .class("w-full h-full")
            .attr("controls", "")
            .child(
                Element::new("source")
                    .attr("src", url)
                    .attr("type", "video/mp4"),
            )
            .text("Your browser does not support the video tag.")
    }
}

/// Accent color for listing position `index`.
pub fn accent_color(index: usize) -> &'static str {
    ACCENT_COLORS[index % ACCENT_COLORS.len()]
}

#[cfg(test)]
mod tests {
    use super::{accent_color, empty_state, video_embed};

    #[test]
    fn embed_urls_become_iframes() {
        assert_eq!(video_embed("https://www.youtube.com/embed/x").tag, "iframe");
        assert_eq!(video_embed("https://player.vimeo.com/video/1").tag, "iframe");
        let local = video_embed("../videos/show.mp4");
        assert_eq!(local.tag, "video");
        assert!(local.to_html().contains("<source src=\"../videos/show.mp4\" type=\"video/mp4\">"));
    }

    #[test]
    fn empty_state_is_marked() {
        let html = empty_state().to_html();
        assert!(html.contains("empty-state"));
        assert!(html.contains("No data available."));
    }

    #[test]
    fn accent_colors_cycle() {
        assert_eq!(accent_color(0), accent_color(3));
        assert_ne!(accent_color(0), accent_color(1));
    }
}
