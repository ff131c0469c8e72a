// HTML tag rendering

use std::collections::BTreeMap;

/// Render `<img src='URL' k1='v1' .../>` with attributes in key order
///
/// Values are written verbatim inside single quotes; escaping is up to the
/// caller.
pub fn render_img_tag(url: &str, attributes: &BTreeMap<String, String>) -> String {
    let mut tag = String::with_capacity(url.len() + 16 + attributes.len() * 16);
    tag.push_str("<img src='");
    tag.push_str(url);
    tag.push('\'');
    for (key, value) in attributes {
        tag.push(' ');
        tag.push_str(key);
        tag.push_str("='");
        tag.push_str(value);
        tag.push('\'');
    }
    tag.push_str("/>");
    tag
}
