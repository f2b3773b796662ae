//! Lenient markup reader for chrome components.
//!
//! # Responsibility
//! - Turn component HTML (`components/header.html`) into a `Fragment` so the
//!   chrome can be queried and bound like rendered markup.
//!
//! # Invariants
//! - Reading never fails. Stray closing tags are dropped, elements still
//!   open at the end of input are closed, and a `<` that starts no tag is
//!   text.
//! - Comments, doctype and processing instructions are dropped.
//! - `script` and `style` bodies are kept verbatim as `Node::Raw`.
//! - Entities in text and attribute values are decoded once; serialization
//!   escapes them again.

use crate::dom::fragment::{is_void_tag, Element, Fragment, Node};

const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

/// Reads `html` into a fragment of top-level nodes.
pub fn parse_fragment(html: &str) -> Fragment {
    let mut reader = Reader {
        input: html,
        pos: 0,
        open: Vec::new(),
        roots: Vec::new(),
    };
    reader.run();
    reader.roots.into_iter().collect()
}

struct Reader<'a> {
    input: &'a str,
    pos: usize,
    open: Vec<Element>,
    roots: Vec<Node>,
}

impl<'a> Reader<'a> {
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn run(&mut self) {
        while self.pos < self.input.len() {
            let rest = self.rest();
            if rest.starts_with("<!--") {
                self.pos += rest.find("-->").map(|end| end + 3).unwrap_or(rest.len());
            } else if rest.starts_with("</") {
                self.close_tag();
            } else if rest.starts_with("<!") || rest.starts_with("<?") {
                self.pos += rest.find('>').map(|end| end + 1).unwrap_or(rest.len());
            } else if starts_tag(rest) {
                self.open_tag();
            } else {
                self.text();
            }
        }
        while let Some(element) = self.open.pop() {
            self.push(Node::Element(element));
        }
    }

    fn push(&mut self, node: Node) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.roots.push(node),
        }
    }

    fn text(&mut self) {
        let rest = self.rest();
        // a lone `<` is text; skip it before looking for the next tag
        let skip = usize::from(rest.starts_with('<'));
        let end = rest[skip..].find('<').map(|at| at + skip).unwrap_or(rest.len());
        let text = decode_entities(&rest[..end]);
        self.pos += end;
        self.push(Node::Text(text));
    }

    fn open_tag(&mut self) {
        self.pos += 1;
        let tag = self.take_while(|ch| ch.is_ascii_alphanumeric() || ch == '-').to_ascii_lowercase();
        let mut element = Element::new(&tag);
        let mut self_closing = false;

        loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.is_empty() {
                break;
            }
            if rest.starts_with("/>") {
                self.pos += 2;
                self_closing = true;
                break;
            }
            if rest.starts_with('>') {
                self.pos += 1;
                break;
            }
            let name = self
                .take_while(|ch| !ch.is_whitespace() && ch != '=' && ch != '>' && ch != '/')
                .to_ascii_lowercase();
            if name.is_empty() {
                // stray `/` or `=` inside the tag
                self.pos += 1;
                continue;
            }
            self.skip_whitespace();
            let value = if self.rest().starts_with('=') {
                self.pos += 1;
                self.skip_whitespace();
                self.attr_value()
            } else {
                String::new()
            };
            element = with_attr(element, &name, value);
        }

        if RAW_TEXT_TAGS.contains(&tag.as_str()) && !self_closing {
            let body = self.raw_body(&tag);
            if !body.is_empty() {
                element.children.push(Node::Raw(body));
            }
            self.push(Node::Element(element));
        } else if self_closing || is_void_tag(&tag) {
            self.push(Node::Element(element));
        } else {
            self.open.push(element);
        }
    }

    fn close_tag(&mut self) {
        self.pos += 2;
        let tag = self.take_while(|ch| ch != '>').trim().to_ascii_lowercase();
        if self.rest().starts_with('>') {
            self.pos += 1;
        }
        let Some(depth) = self.open.iter().rposition(|element| element.tag == tag) else {
            return;
        };
        while self.open.len() > depth {
            if let Some(element) = self.open.pop() {
                self.push(Node::Element(element));
            }
        }
    }

    fn attr_value(&mut self) -> String {
        let rest = self.rest();
        let raw = match rest.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let body = &rest[1..];
                let end = body.find(quote).unwrap_or(body.len());
                self.pos += 1 + end + usize::from(end < body.len());
                &body[..end]
            }
            _ => {
                let end = rest
                    .find(|ch: char| ch.is_whitespace() || ch == '>')
                    .unwrap_or(rest.len());
                self.pos += end;
                &rest[..end]
            }
        };
        decode_entities(raw)
    }

    /// Everything up to `</tag`, which is consumed as well.
    fn raw_body(&mut self, tag: &str) -> String {
        let rest = self.rest();
        let closing = format!("</{tag}");
        let end = rest.to_ascii_lowercase().find(&closing).unwrap_or(rest.len());
        let body = rest[..end].to_string();
        self.pos += end;
        if self.pos < self.input.len() {
            let after = self.rest();
            self.pos += after.find('>').map(|close| close + 1).unwrap_or(after.len());
        }
        body
    }

    fn take_while(&mut self, keep: impl Fn(char) -> bool) -> String {
        let rest = self.rest();
        let end = rest.find(|ch: char| !keep(ch)).unwrap_or(rest.len());
        self.pos += end;
        rest[..end].to_string()
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }
}

fn starts_tag(rest: &str) -> bool {
    let mut chars = rest.chars();
    chars.next() == Some('<') && chars.next().is_some_and(|ch| ch.is_ascii_alphabetic())
}

fn with_attr(element: Element, name: &str, value: String) -> Element {
    match name {
        "id" => element.id(value),
        "class" => element.class(&value),
        "style" => value
            .split(';')
            .filter_map(|declaration| declaration.split_once(':'))
            .fold(element, |element, (property, value)| {
                element.style(property.trim(), value.trim())
            }),
        _ => element.attr(name, value),
    }
}

/// Decodes the named entities the site uses plus numeric references.
/// Unknown entities are kept as written.
fn decode_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .filter(|end| *end <= 10)
            .and_then(|end| entity(&tail[1..end]).map(|ch| (ch, end + 1)));
        match decoded {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let number = name.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_entities, parse_fragment};
    use crate::dom::{Document, Node};

    #[test]
    fn nested_markup_becomes_queryable_elements() {
        let fragment = parse_fragment(
            r#"<!-- header --><header id="site-header" class="fixed  top-0">
                 <nav><ul><li><a class="nav-link" href="about.html">About</a></li></ul></nav>
                 <button class="mobile-menu-btn" aria-label=menu><i class="fa-solid fa-bars"></i></button>
               </header>"#,
        );
        let doc = Document::from_fragment(fragment);
        let header = doc.get_element_by_id("site-header").expect("header");
        assert!(doc.has_class(header, "fixed") && doc.has_class(header, "top-0"));
        let link = doc.query_class_all("nav-link")[0];
        assert_eq!(doc.attr(link, "href"), Some("about.html"));
        assert_eq!(doc.text_content(link), "About");
        let button = doc.query_class_all("mobile-menu-btn")[0];
        assert_eq!(doc.attr(button, "aria-label"), Some("menu"));
        assert!(!doc.to_html().contains("<!--"));
    }

    #[test]
    fn void_and_self_closing_tags_take_no_children() {
        let fragment = parse_fragment(r#"<div><img src="a.jpg"><br/>text</div>"#);
        let Node::Element(div) = &fragment.nodes()[0] else {
            panic!("expected an element");
        };
        assert_eq!(div.children.len(), 3);
        assert_eq!(fragment.to_html(), r#"<div><img src="a.jpg"><br>text</div>"#);
    }

    #[test]
    fn unbalanced_markup_is_repaired() {
        let fragment = parse_fragment("<div><span>open</div></p><p>tail");
        assert_eq!(fragment.to_html(), "<div><span>open</span></div><p>tail</p>");
        assert_eq!(parse_fragment("a < b").to_html(), "a &lt; b");
    }

    #[test]
    fn style_and_script_bodies_stay_verbatim() {
        let fragment = parse_fragment(
            r#"<p style="display: none; color:red">x</p><script>if (a < b) {}</script>"#,
        );
        let html = fragment.to_html();
        assert!(html.contains(r#"style="display: none; color: red;""#));
        assert!(html.contains("<script>if (a < b) {}</script>"));
    }

    #[test]
    fn entities_decode_once() {
        assert_eq!(decode_entities("Tom &amp; Jerry &#169; &#x4E2D; &bogus;"), "Tom & Jerry © 中 &bogus;");
        let fragment = parse_fragment(r#"<a title="a &quot;b&quot;">&lt;i&gt;</a>"#);
        assert_eq!(fragment.to_html(), r#"<a title="a &quot;b&quot;">&lt;i&gt;</a>"#);
    }
}
