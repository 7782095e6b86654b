//! HTML rendering
//!
//! Plain string building: a breadcrumb bar, folder and video grids, and
//! an inline player with previous/next buttons. Every name is escaped
//! before it goes into the markup, and every link is percent-encoded.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt::Write;
use vidbrowse_lib::{BrowsePage, Root};

/// Characters left alone by `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const STYLE: &str = r#"
body { font-family: Arial, sans-serif; margin: 20px; background-color: #f5f5f5; }
.container { max-width: 1200px; margin: 0 auto; background: white; padding: 20px; border-radius: 8px; }
.breadcrumb { margin-bottom: 20px; padding: 10px; background-color: #e9ecef; border-radius: 4px; }
.breadcrumb a { color: #007bff; text-decoration: none; margin-right: 5px; }
.grid { display: grid; grid-template-columns: repeat(2, 1fr); gap: 20px; }
.item { display: block; padding: 15px; border: 1px solid #ddd; border-radius: 8px; text-align: center; color: inherit; text-decoration: none; cursor: pointer; }
.folder { background-color: #fff3cd; }
.video { background-color: #d1ecf1; }
.empty { text-align: center; color: #666; font-style: italic; }
.video-player { margin-top: 30px; text-align: center; }
video { max-width: 100%; max-height: 500px; }
"#;

const PLAYER_SCRIPT: &str = r#"
const items = Array.from(document.querySelectorAll('.video'));
let current = -1;
function play(index) {
    if (index < 0 || index >= items.length) return;
    current = index;
    const player = document.getElementById('videoPlayer');
    document.getElementById('videoElement').src = items[index].dataset.src;
    document.getElementById('currentVideoName').textContent = items[index].dataset.name;
    player.style.display = 'block';
    player.scrollIntoView({ behavior: 'smooth' });
}
items.forEach((item, i) => item.addEventListener('click', () => play(i)));
document.getElementById('prevBtn').addEventListener('click', () => play(current - 1));
document.getElementById('nextBtn').addEventListener('click', () => play(current + 1));
"#;

/// Escape text for use in HTML content and quoted attributes
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Percent-encode a subpath as a single URL component (`/` included)
pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

/// Append a name to a subpath
pub fn join_subpath(subpath: &str, name: &str) -> String {
    if subpath.is_empty() {
        name.to_string()
    } else if subpath.ends_with('/') {
        format!("{}{}", subpath, name)
    } else {
        format!("{}/{}", subpath, name)
    }
}

/// Link to the browse page of a subpath
pub fn browse_href(subpath: &str) -> String {
    format!("/browse/{}", encode_component(subpath))
}

/// Link to the video endpoint for a file path
pub fn video_href(path: &str) -> String {
    format!("/video/{}", encode_component(path))
}

fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n<div class=\"container\">\n{}</div>\n</body>\n</html>\n",
        escape_html(title),
        STYLE,
        body
    )
}

/// Render the list of top-level roots
pub fn render_roots(roots: &[Root]) -> String {
    let mut body = String::from("<h1>Available Drives</h1>\n<ul>\n");
    for root in roots {
        let _ = writeln!(
            body,
            "<li><a href=\"{}\">{}</a></li>",
            escape_html(&browse_href(&root.subpath)),
            escape_html(&root.name)
        );
    }
    body.push_str("</ul>\n");
    document("Video Player", &body)
}

/// Render a folder listing
pub fn render_browse(page: &BrowsePage) -> String {
    let mut body = String::from("<h1>Video Player</h1>\n");

    body.push_str("<div class=\"breadcrumb\">\n<a href=\"/\">Home</a>\n");
    for crumb in &page.breadcrumbs {
        let _ = writeln!(
            body,
            "/ <a href=\"{}\">{}</a>",
            escape_html(&browse_href(&crumb.path)),
            escape_html(&crumb.name)
        );
    }
    body.push_str("</div>\n");

    let _ = writeln!(
        body,
        "<p><strong>Current Path:</strong> {}</p>",
        escape_html(&page.current_path)
    );

    if !page.folders.is_empty() {
        body.push_str("<div class=\"folder-list\">\n<h2>Folders</h2>\n<div class=\"grid\">\n");
        for folder in &page.folders {
            let _ = writeln!(
                body,
                "<a class=\"item folder\" href=\"{}\">{}</a>",
                escape_html(&browse_href(&join_subpath(&page.subpath, folder))),
                escape_html(folder)
            );
        }
        body.push_str("</div>\n</div>\n");
    }

    if !page.videos.is_empty() {
        body.push_str("<div class=\"video-list\">\n<h2>Videos</h2>\n<div class=\"grid\">\n");
        for video in &page.videos {
            let _ = writeln!(
                body,
                "<div class=\"item video\" data-src=\"{}\" data-name=\"{}\">{}</div>",
                escape_html(&video_href(&join_subpath(&page.subpath, video))),
                escape_html(video),
                escape_html(video)
            );
        }
        body.push_str("</div>\n</div>\n");
    }

    if page.folders.is_empty() && page.videos.is_empty() {
        body.push_str("<p class=\"empty\">No folders or video files found in this directory.</p>\n");
    }

    body.push_str(concat!(
        "<div class=\"video-player\" id=\"videoPlayer\" style=\"display: none;\">\n",
        "<h3>Now Playing: <span id=\"currentVideoName\"></span></h3>\n",
        "<video id=\"videoElement\" controls>Your browser does not support the video tag.</video>\n",
        "<div><button id=\"prevBtn\">Prev</button> <button id=\"nextBtn\">Next</button></div>\n",
        "</div>\n"
    ));
    let _ = writeln!(body, "<script>{}</script>", PLAYER_SCRIPT);

    document("Video Player", &body)
}
