//! The CSS selector subset used to locate page elements.
//!
//! Supported: type (`section`), universal (`*`), class (`.hero`), id (`#contato`), attribute
//! presence (`[id]`) and equality (`[type="submit"]`), compound selectors, the descendant and
//! child (`>`) combinators, and comma-separated lists.

use std::fmt;

use crate::dom::host::DomQuery;
use crate::foundation::error::{GlassError, GlassResult};
use crate::foundation::ids::NodeId;

/// A parsed, comma-separated selector list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList {
    source: String,
    selectors: Vec<ComplexSelector>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct ComplexSelector {
    // parts[i] and parts[i + 1] are joined by combinators[i].
    parts: Vec<Compound>,
    combinators: Vec<Combinator>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    value: Option<String>,
}

impl SelectorList {
    /// Parse a selector list.
    pub fn parse(source: &str) -> GlassResult<Self> {
        let mut cur = Cursor::new(source);
        let mut selectors = Vec::new();
        loop {
            cur.skip_ws();
            selectors.push(parse_complex(&mut cur)?);
            cur.skip_ws();
            match cur.peek() {
                None => break,
                Some(',') => {
                    cur.bump();
                }
                Some(c) => return Err(cur.error(&format!("unexpected '{c}'"))),
            }
        }
        Ok(Self {
            source: source.trim().to_owned(),
            selectors,
        })
    }

    /// The selector text as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `node` matches any selector in the list.
    pub fn matches<D: DomQuery + ?Sized>(&self, dom: &D, node: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(dom, node))
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for SelectorList {
    type Err = GlassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl ComplexSelector {
    fn matches<D: DomQuery + ?Sized>(&self, dom: &D, node: NodeId) -> bool {
        self.matches_part(dom, node, self.parts.len() - 1)
    }

    // Right-to-left; backtracks over ancestors for the descendant combinator.
    fn matches_part<D: DomQuery + ?Sized>(&self, dom: &D, node: NodeId, idx: usize) -> bool {
        if !self.parts[idx].matches(dom, node) {
            return false;
        }
        if idx == 0 {
            return true;
        }
        match self.combinators[idx - 1] {
            Combinator::Child => dom
                .parent(node)
                .is_some_and(|p| self.matches_part(dom, p, idx - 1)),
            Combinator::Descendant => {
                let mut cur = dom.parent(node);
                while let Some(p) = cur {
                    if self.matches_part(dom, p, idx - 1) {
                        return true;
                    }
                    cur = dom.parent(p);
                }
                false
            }
        }
    }
}

impl Compound {
    fn matches<D: DomQuery + ?Sized>(&self, dom: &D, node: NodeId) -> bool {
        if let Some(tag) = &self.tag
            && !dom.tag(node).eq_ignore_ascii_case(tag)
        {
            return false;
        }
        if let Some(id) = &self.id
            && dom.element_id(node) != Some(id.as_str())
        {
            return false;
        }
        if !self.classes.iter().all(|c| dom.has_flag(node, c)) {
            return false;
        }
        self.attrs.iter().all(|a| match (&a.value, dom.attribute(node, &a.name)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(want), Some(got)) => want == got,
        })
    }
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Returns `true` when any whitespace was skipped.
    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
        self.pos != start
    }

    fn ident(&mut self) -> Option<&'a str> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.bump();
        }
        (self.pos != start).then(|| &self.src[start..self.pos])
    }

    fn expect(&mut self, want: char) -> GlassResult<()> {
        match self.bump() {
            Some(c) if c == want => Ok(()),
            Some(c) => Err(self.error(&format!("expected '{want}', found '{c}'"))),
            None => Err(self.error(&format!("expected '{want}'"))),
        }
    }

    fn error(&self, msg: &str) -> GlassError {
        GlassError::selector(format!("{msg} at offset {} in \"{}\"", self.pos, self.src))
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn parse_complex(cur: &mut Cursor<'_>) -> GlassResult<ComplexSelector> {
    let mut parts = vec![parse_compound(cur)?];
    let mut combinators = Vec::new();
    loop {
        let had_ws = cur.skip_ws();
        match cur.peek() {
            None | Some(',') => break,
            Some('>') => {
                cur.bump();
                cur.skip_ws();
                combinators.push(Combinator::Child);
            }
            Some(_) if had_ws => combinators.push(Combinator::Descendant),
            Some(c) => return Err(cur.error(&format!("unexpected '{c}'"))),
        }
        parts.push(parse_compound(cur)?);
    }
    Ok(ComplexSelector { parts, combinators })
}

fn parse_compound(cur: &mut Cursor<'_>) -> GlassResult<Compound> {
    let mut out = Compound::default();
    let mut any = false;

    match cur.peek() {
        Some('*') => {
            cur.bump();
            any = true;
        }
        Some(c) if is_ident_char(c) => {
            let tag = cur.ident().unwrap_or_default();
            out.tag = Some(tag.to_ascii_lowercase());
            any = true;
        }
        _ => {}
    }

    loop {
        match cur.peek() {
            Some('.') => {
                cur.bump();
                let name = cur
                    .ident()
                    .ok_or_else(|| cur.error("expected class name"))?;
                out.classes.push(name.to_owned());
            }
            Some('#') => {
                cur.bump();
                let name = cur.ident().ok_or_else(|| cur.error("expected id"))?;
                out.id = Some(name.to_owned());
            }
            Some('[') => {
                cur.bump();
                out.attrs.push(parse_attr(cur)?);
            }
            _ => break,
        }
        any = true;
    }

    if !any {
        return Err(match cur.peek() {
            Some(c) => cur.error(&format!("expected selector, found '{c}'")),
            None => cur.error("expected selector"),
        });
    }
    Ok(out)
}

fn parse_attr(cur: &mut Cursor<'_>) -> GlassResult<AttrMatch> {
    cur.skip_ws();
    let name = cur
        .ident()
        .ok_or_else(|| cur.error("expected attribute name"))?
        .to_ascii_lowercase();
    cur.skip_ws();
    if cur.peek() == Some(']') {
        cur.bump();
        return Ok(AttrMatch { name, value: None });
    }
    cur.expect('=')?;
    cur.skip_ws();
    let value = match cur.peek() {
        Some(q @ ('"' | '\'')) => {
            cur.bump();
            let start = cur.pos;
            while cur.peek().is_some_and(|c| c != q) {
                cur.bump();
            }
            let value = cur.src[start..cur.pos].to_owned();
            cur.expect(q)?;
            value
        }
        _ => cur
            .ident()
            .ok_or_else(|| cur.error("expected attribute value"))?
            .to_owned(),
    };
    cur.skip_ws();
    cur.expect(']')?;
    Ok(AttrMatch {
        name,
        value: Some(value),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/dom/selector.rs"]
mod tests;
