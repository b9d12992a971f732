//! Headings and links of a markdown document, as `pulldown-cmark` sees them.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// A heading with its explicit `{#id}` attribute, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// 1 for `#`, 2 for `##`, and so on.
    pub level: u8,
    /// Heading text with inline markup removed.
    pub text: String,
    /// The `{#id}` attribute.
    pub id: Option<String>,
    /// The code span after the first `**URI:**` label in the heading's
    /// section.
    pub uri: Option<String>,
}

/// A link and its visible text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Link text with inline markup removed.
    pub text: String,
    /// The destination as written.
    pub dest: String,
}

impl Link {
    /// The fragment of an in-document link (`#anchor`), without the `#`.
    pub fn fragment(&self) -> Option<&str> {
        self.dest.strip_prefix('#')
    }
}

/// Every heading and link of one document, in document order.
#[derive(Debug, Clone, Default)]
pub struct Outline {
    /// All headings.
    pub headings: Vec<Heading>,
    /// All links.
    pub links: Vec<Link>,
}

impl Outline {
    /// Parses `markdown` with heading attributes enabled.
    pub fn parse(markdown: &str) -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

        let mut outline = Self::default();
        let mut heading: Option<Heading> = None;
        let mut link: Option<Link> = None;
        let mut strong: Option<String> = None;
        let mut awaiting_uri = false;

        for event in Parser::new_ext(markdown, options) {
            match event {
                Event::Start(Tag::Heading { level, id, .. }) => {
                    heading = Some(Heading {
                        level: level_number(level),
                        text: String::new(),
                        id: id.map(|i| i.to_string()),
                        uri: None,
                    });
                    awaiting_uri = false;
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some(mut h) = heading.take() {
                        h.text = h.text.trim().to_string();
                        outline.headings.push(h);
                    }
                }
                Event::Start(Tag::Link { dest_url, .. }) => {
                    link = Some(Link {
                        text: String::new(),
                        dest: dest_url.to_string(),
                    });
                }
                Event::End(TagEnd::Link) => {
                    if let Some(l) = link.take() {
                        outline.links.push(l);
                    }
                }
                Event::Start(Tag::Strong) => strong = Some(String::new()),
                Event::End(TagEnd::Strong) => {
                    if let Some(label) = strong.take() {
                        awaiting_uri = label.trim() == "URI:";
                    }
                }
                Event::Code(code) if awaiting_uri && heading.is_none() => {
                    awaiting_uri = false;
                    if let Some(h) = outline.headings.last_mut() {
                        h.uri.get_or_insert_with(|| code.to_string());
                    }
                }
                Event::Text(text) | Event::Code(text) => {
                    if let Some(label) = strong.as_mut() {
                        label.push_str(&text);
                    }
                    if let Some(l) = link.as_mut() {
                        l.text.push_str(&text);
                    }
                    if let Some(h) = heading.as_mut() {
                        h.text.push_str(&text);
                    }
                }
                _ => {}
            }
        }
        outline
    }

    /// Headings of the given level that carry an id.
    pub fn anchored(&self, level: u8) -> impl Iterator<Item = (&str, &str)> {
        self.headings
            .iter()
            .filter(move |h| h.level == level)
            .filter_map(|h| h.id.as_deref().map(|id| (h.text.as_str(), id)))
    }

    /// The `**URI:**` of the level-2 section carrying `id`.
    pub fn section_uri(&self, id: &str) -> Option<&str> {
        self.headings
            .iter()
            .filter(|h| h.level == 2)
            .find(|h| h.id.as_deref() == Some(id))
            .and_then(|h| h.uri.as_deref())
    }
}

fn level_number(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "# Entities\n\n## Table of Contents\n\n- [Pump](#pump)\n\n---\n\n\
                       ## Pump {#pump}\n\n**URI:** `http://x.org/o#Pump`\n\n\
                       ### Superclasses\n\n- [Equipment](#equipment)\n- `BFO_1`\n\n\
                       See [the index](index.md).\n";

    #[test]
    fn heading_ids_are_parsed() {
        let outline = Outline::parse(DOC);
        let anchored: Vec<_> = outline.anchored(2).collect();
        assert_eq!(anchored, vec![("Pump", "pump")]);
        assert_eq!(outline.headings.len(), 4);
    }

    #[test]
    fn links_keep_text_and_destination() {
        let outline = Outline::parse(DOC);
        let fragments: Vec<_> = outline.links.iter().filter_map(Link::fragment).collect();
        assert_eq!(fragments, vec!["pump", "equipment"]);
        assert_eq!(outline.links[2].dest, "index.md");
        assert_eq!(outline.links[1].text, "Equipment");
    }

    #[test]
    fn sections_carry_their_uri() {
        let outline = Outline::parse(DOC);
        assert_eq!(outline.section_uri("pump"), Some("http://x.org/o#Pump"));
        assert_eq!(outline.section_uri("equipment"), None);
        // `BFO_1` is code, but not after a URI label.
        assert_eq!(outline.headings[3].uri, None);
    }
}
