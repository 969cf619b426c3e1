use super::*;

use std::borrow::Cow;

/// Parses markup into a fresh [`Dom`].
///
/// This is a forgiving tree builder for server-rendered forms, not a full
/// HTML5 parser: there is no implied-end-tag handling, unmatched end tags
/// are dropped, and a `<` that does not open markup is kept as text.
pub(crate) fn parse_html(html: &str) -> Result<Dom> {
    let mut builder = TreeBuilder {
        open: vec![NodeId(0)],
        dom: Dom::new(),
    };
    let mut rest = html;
    while !rest.is_empty() {
        rest = builder.consume(rest)?;
    }
    Ok(builder.dom)
}

pub(crate) fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Elements whose body is taken verbatim up to the matching end tag.
fn is_raw_text_element(tag: &str) -> bool {
    matches!(tag, "script" | "style" | "textarea" | "title")
}

struct TreeBuilder {
    /// Open elements, document node at the bottom.
    open: Vec<NodeId>,
    dom: Dom,
}

impl TreeBuilder {
    fn current(&self) -> NodeId {
        self.open.last().copied().unwrap_or(self.dom.root)
    }

    /// Consumes one token from the front of `rest` and returns what is left.
    fn consume<'a>(&mut self, rest: &'a str) -> Result<&'a str> {
        if let Some(after) = rest.strip_prefix("<!--") {
            let end = after
                .find("-->")
                .ok_or_else(|| Error::HtmlParse("unclosed HTML comment".into()))?;
            return Ok(&after[end + 3..]);
        }
        if let Some(after) = rest.strip_prefix("</") {
            if starts_with_letter(after) {
                return self.end_tag(after);
            }
        }
        if let Some(after) = rest.strip_prefix("<!") {
            return skip_declaration(after);
        }
        if let Some(after) = rest.strip_prefix('<') {
            if starts_with_letter(after) {
                return self.start_tag(after);
            }
        }
        Ok(self.text(rest))
    }

    fn text<'a>(&mut self, rest: &'a str) -> &'a str {
        // The first character is text even when it is a stray `<`.
        let end = rest
            .char_indices()
            .skip(1)
            .find(|(_, c)| *c == '<')
            .map_or(rest.len(), |(index, _)| index);
        let parent = self.current();
        self.dom.append_text(parent, &decode_entities(&rest[..end]));
        &rest[end..]
    }

    fn end_tag<'a>(&mut self, after: &'a str) -> Result<&'a str> {
        let (name, after) = split_name(after);
        let tag = name.to_ascii_lowercase();
        let close = after
            .find('>')
            .ok_or_else(|| Error::HtmlParse("unclosed end tag".into()))?;
        if let Some(depth) = self
            .open
            .iter()
            .rposition(|node| self.dom.tag_name(*node) == Some(tag.as_str()))
        {
            self.open.truncate(depth);
        }
        Ok(&after[close + 1..])
    }

    fn start_tag<'a>(&mut self, after: &'a str) -> Result<&'a str> {
        let (name, mut rest) = split_name(after);
        let tag = name.to_ascii_lowercase();
        let mut attrs = BTreeMap::new();

        let self_closing = loop {
            rest = rest.trim_start();
            if let Some(after) = rest.strip_prefix('>') {
                rest = after;
                break false;
            }
            if let Some(after) = rest.strip_prefix("/>") {
                rest = after;
                break true;
            }
            if rest.is_empty() {
                return Err(Error::HtmlParse("unclosed start tag".into()));
            }
            rest = attribute(rest, &mut attrs)?;
        };

        let parent = self.current();
        let node = self.dom.append_element(parent, tag.clone(), attrs);
        if self_closing || is_void_element(&tag) {
            return Ok(rest);
        }
        if is_raw_text_element(&tag) {
            let (body, after) = split_raw_text(rest, &tag)
                .ok_or_else(|| Error::HtmlParse(format!("unclosed <{tag}>")))?;
            self.dom.append_text(node, body);
            return Ok(after);
        }
        self.open.push(node);
        Ok(rest)
    }
}

fn starts_with_letter(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
}

fn split_name(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(s.len());
    s.split_at(end)
}

/// Reads one attribute into `attrs`. The first occurrence of a name wins, as
/// in the HTML tokenizer. Junk that cannot start a name is skipped.
fn attribute<'a>(rest: &'a str, attrs: &mut BTreeMap<String, String>) -> Result<&'a str> {
    let name_end = rest
        .find(|c: char| c.is_ascii_whitespace() || matches!(c, '=' | '>' | '/'))
        .unwrap_or(rest.len());
    if name_end == 0 {
        // A lone `/` or `=` with nothing sensible around it.
        return Ok(&rest[1..]);
    }
    let name = rest[..name_end].to_ascii_lowercase();
    let mut rest = rest[name_end..].trim_start();

    let mut value = Cow::Borrowed("");
    if let Some(after) = rest.strip_prefix('=') {
        let after = after.trim_start();
        let (raw, tail) = attribute_value(after)?;
        value = decode_entities(raw);
        rest = tail;
    }
    attrs.entry(name).or_insert_with(|| value.into_owned());
    Ok(rest)
}

fn attribute_value(s: &str) -> Result<(&str, &str)> {
    if let Some(quote) = s.chars().next().filter(|c| *c == '"' || *c == '\'') {
        let body = &s[1..];
        let end = body
            .find(quote)
            .ok_or_else(|| Error::HtmlParse("unclosed quoted attribute value".into()))?;
        return Ok((&body[..end], &body[end + 1..]));
    }
    let mut end = s
        .find(|c: char| c.is_ascii_whitespace() || c == '>')
        .unwrap_or(s.len());
    // `<a href=x/>` keeps the slash for the self-closing marker.
    if s[end..].starts_with('>') && s[..end].ends_with('/') {
        end -= 1;
    }
    Ok(s.split_at(end))
}

/// Skips `<!DOCTYPE ...>` and friends, honoring quoted sections.
fn skip_declaration(after: &str) -> Result<&str> {
    let mut quote = None;
    for (index, c) in after.char_indices() {
        match (quote, c) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Ok(&after[index + 1..]),
            (None, _) => {}
        }
    }
    Err(Error::HtmlParse("unclosed declaration tag".into()))
}

/// Splits raw text at `</tag` followed by `>` or whitespace, case-insensitive,
/// and returns the body and whatever follows the end tag.
fn split_raw_text<'a>(rest: &'a str, tag: &str) -> Option<(&'a str, &'a str)> {
    let lowered = rest.to_ascii_lowercase();
    let needle = format!("</{tag}");
    let start = lowered.match_indices(&needle).map(|(index, _)| index).find(|index| {
        lowered[index + needle.len()..]
            .chars()
            .next()
            .is_some_and(|c| c == '>' || c.is_ascii_whitespace())
    })?;
    let close = rest[start..].find('>')?;
    Some((&rest[..start], &rest[start + close + 1..]))
}

/// Decodes numeric references and the named ones French forms use.
/// Unknown references are left as written.
fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut pieces = text.split('&');
    if let Some(head) = pieces.next() {
        out.push_str(head);
    }
    for piece in pieces {
        let decoded = piece
            .split_once(';')
            .and_then(|(name, tail)| Some((entity(name)?, tail)));
        match decoded {
            Some((c, tail)) => {
                out.push(c);
                out.push_str(tail);
            }
            None => {
                out.push('&');
                out.push_str(piece);
            }
        }
    }
    Cow::Owned(out)
}

fn entity(name: &str) -> Option<char> {
    if let Some(numeric) = name.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse().ok()?,
        };
        return char::from_u32(code);
    }
    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{00A0}',
        "hellip" => '…',
        "laquo" => '«',
        "raquo" => '»',
        "rsquo" => '’',
        "eacute" => 'é',
        "egrave" => 'è',
        "agrave" => 'à',
        "ccedil" => 'ç',
        _ => return None,
    })
}
