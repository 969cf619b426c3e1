use super::*;

use std::iter::Peekable;
use std::str::Chars;

/// A descendant chain of compound selectors, like `.fr-table__content input`.
///
/// Supported per compound: a type name, `#id`, `.class` and `[attr=value]`.
/// Only the descendant combinator is understood; anything else is rejected
/// with [`Error::UnsupportedSelector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Selector {
    /// Outermost ancestor first, subject last.
    chain: Vec<Compound>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
}

impl Selector {
    pub(crate) fn parse(source: &str) -> Result<Self> {
        let unsupported = || Error::UnsupportedSelector(source.to_string());
        let mut chars = source.trim().chars().peekable();
        let mut chain = Vec::new();

        while chars.peek().is_some() {
            chain.push(Compound::parse(&mut chars).ok_or_else(unsupported)?);
            let mut separated = false;
            while chars.next_if(char::is_ascii_whitespace).is_some() {
                separated = true;
            }
            if !separated && chars.peek().is_some() {
                return Err(unsupported());
            }
        }

        if chain.is_empty() {
            return Err(unsupported());
        }
        Ok(Self { chain })
    }

    /// The id when the whole selector is a bare `#id`.
    pub(crate) fn as_id(&self) -> Option<&str> {
        match self.chain.as_slice() {
            [only] if only.tag.is_none() && only.classes.is_empty() && only.attrs.is_empty() => {
                only.id.as_deref()
            }
            _ => None,
        }
    }

    pub(crate) fn matches(&self, dom: &Dom, node_id: NodeId) -> bool {
        let Some((subject, context)) = self.chain.split_last() else {
            return false;
        };
        if !dom.element(node_id).is_some_and(|element| subject.matches(element)) {
            return false;
        }

        // The nearest matching ancestor is always the best choice when every
        // combinator is a descendant one, so one upward pass is enough.
        let mut ancestors = dom.ancestors(node_id);
        context.iter().rev().all(|compound| {
            ancestors.any(|ancestor| {
                dom.element(ancestor)
                    .is_some_and(|element| compound.matches(element))
            })
        })
    }
}

impl Compound {
    fn parse(chars: &mut Peekable<Chars<'_>>) -> Option<Self> {
        let mut compound = Self::default();
        if chars.peek().is_some_and(|c| is_ident_char(*c)) {
            compound.tag = Some(ident(chars)?.to_ascii_lowercase());
        }
        loop {
            match chars.peek() {
                Some('#') => {
                    chars.next();
                    if compound.id.replace(ident(chars)?).is_some() {
                        return None;
                    }
                }
                Some('.') => {
                    chars.next();
                    compound.classes.push(ident(chars)?);
                }
                Some('[') => {
                    chars.next();
                    compound.attrs.push(attr_equals(chars)?);
                }
                _ => break,
            }
        }
        (compound != Self::default()).then_some(compound)
    }

    fn matches(&self, element: &Element) -> bool {
        self.tag.as_ref().is_none_or(|tag| element.tag == *tag)
            && self
                .id
                .as_deref()
                .is_none_or(|id| element.attr("id") == Some(id))
            && self.classes.iter().all(|class| element.has_class(class))
            && self
                .attrs
                .iter()
                .all(|(name, value)| element.attr(name) == Some(value.as_str()))
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn ident(chars: &mut Peekable<Chars<'_>>) -> Option<String> {
    let mut out = String::new();
    while let Some(c) = chars.next_if(|c| is_ident_char(*c)) {
        out.push(c);
    }
    (!out.is_empty()).then_some(out)
}

fn skip_spaces(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(char::is_ascii_whitespace).is_some() {}
}

/// Body of `[name=value]` after the opening bracket. The value may be bare or
/// quoted with either quote character.
fn attr_equals(chars: &mut Peekable<Chars<'_>>) -> Option<(String, String)> {
    skip_spaces(chars);
    let name = ident(chars)?.to_ascii_lowercase();
    skip_spaces(chars);
    chars.next_if_eq(&'=')?;
    skip_spaces(chars);

    let mut value = String::new();
    match chars.next_if(|c| *c == '"' || *c == '\'') {
        Some(quote) => loop {
            match chars.next()? {
                c if c == quote => break,
                c => value.push(c),
            }
        },
        None => value = ident(chars)?,
    }

    skip_spaces(chars);
    chars.next_if_eq(&']')?;
    Some((name, value))
}
