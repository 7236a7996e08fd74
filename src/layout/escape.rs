//! Inline escape codes.
//!
//! Page text uses backslash codes: `\C[n]` color, `\I[n]` icon, `\{` and
//! `\}` font size, `\V[n]` variable, `\N[n]` actor name, `\P[n]` party
//! member name, `\G` currency unit and `\\` for a literal backslash. Codes
//! are case-insensitive. Anything that does not form a valid code is kept as
//! literal text.
//!
//! Codes are marked internally with U+001B, as the host engine does, so a
//! literal U+001B in page text starts a code exactly like a backslash.

use log::debug;

const ESC: char = '\u{1b}';

/// Message-window codes that carry no meaning inside a book page.
const INERT_CODES: &[&str] = &["$", ".", "|", "^", "!", ">", "<"];

/// A rendering change applied at a position in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Color(u32),
    Icon(u32),
    FontBigger,
    FontSmaller,
}

/// Interpreted page text: plain runs separated by directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Directive(Directive),
}

/// Resolves raw page text into renderable segments.
pub trait EscapeInterpreter: Send + Sync {
    fn interpret(&self, raw: &str) -> Vec<Segment>;
}

/// Host values substituted into text before layout.
///
/// A missing variable reads as `0`; any other missing value reads as an
/// empty string.
pub trait Substitutions: Send + Sync {
    fn variable(&self, _id: u32) -> Option<String> {
        None
    }

    fn actor_name(&self, _id: u32) -> Option<String> {
        None
    }

    /// Name of the party member at 1-based `position`.
    fn party_member_name(&self, _position: u32) -> Option<String> {
        None
    }

    fn currency_unit(&self) -> Option<String> {
        None
    }
}

/// Substitutions for hosts without game state.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSubstitutions;

impl Substitutions for NoSubstitutions {}

/// The default interpreter for backslash codes.
#[derive(Debug, Clone, Default)]
pub struct StandardEscapes<S = NoSubstitutions> {
    substitutions: S,
}

impl StandardEscapes {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: Substitutions> StandardEscapes<S> {
    pub fn with_substitutions(substitutions: S) -> Self {
        Self { substitutions }
    }

    pub fn substitutions(&self) -> &S {
        &self.substitutions
    }

    /// Replace substitution codes with host values, leaving every other
    /// code marked with `ESC` for [`split_segments`].
    fn substitute(&self, raw: &str) -> String {
        let text = raw.replace('\\', "\u{1b}").replace("\u{1b}\u{1b}", "\\");

        // A variable may itself hold codes, including another variable.
        let variable = |id| {
            self.substitutions
                .variable(id)
                .unwrap_or_else(|| "0".to_string())
                .replace('\\', "\u{1b}")
        };
        let text = replace_indexed(&text, 'V', variable);
        let text = replace_indexed(&text, 'V', variable);

        let text = replace_indexed(&text, 'N', |id| {
            self.substitutions.actor_name(id).unwrap_or_default()
        });
        let text = replace_indexed(&text, 'P', |position| {
            self.substitutions
                .party_member_name(position)
                .unwrap_or_default()
        });
        replace_bare(&text, 'G', || {
            self.substitutions.currency_unit().unwrap_or_default()
        })
    }
}

impl<S: Substitutions> EscapeInterpreter for StandardEscapes<S> {
    fn interpret(&self, raw: &str) -> Vec<Segment> {
        split_segments(&self.substitute(raw))
    }
}

fn replace_indexed(text: &str, code: char, resolve: impl Fn(u32) -> String) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find(ESC) {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + ESC.len_utf8()..];
        match strip_code(after, code).and_then(parse_param) {
            Some((id, tail)) => {
                out.push_str(&resolve(id));
                rest = tail;
            }
            None => {
                out.push(ESC);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn replace_bare(text: &str, code: char, resolve: impl Fn() -> String) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find(ESC) {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + ESC.len_utf8()..];
        match strip_code(after, code) {
            Some(tail) => {
                out.push_str(&resolve());
                rest = tail;
            }
            None => {
                out.push(ESC);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn split_segments(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = text;

    while let Some(pos) = rest.find(ESC) {
        literal.push_str(&rest[..pos]);
        let after = &rest[pos + ESC.len_utf8()..];
        let (code, tail) = split_code(after);

        match resolve_code(code, tail) {
            Some((Some(directive), tail)) => {
                if !literal.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Directive(directive));
                rest = tail;
            }
            Some((None, tail)) => rest = tail,
            None => {
                debug!("keeping malformed escape code \\{code} as text");
                literal.push('\\');
                rest = after;
            }
        }
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        segments.push(Segment::Text(literal));
    }
    segments
}

/// Split the code name off the text following an escape: one symbol, or a
/// run of ASCII letters.
fn split_code(text: &str) -> (&str, &str) {
    match text.chars().next() {
        Some(c) if "$.|^!><{}\\".contains(c) => text.split_at(c.len_utf8()),
        Some(_) => {
            let end = text
                .find(|c: char| !c.is_ascii_alphabetic())
                .unwrap_or(text.len());
            text.split_at(end)
        }
        None => ("", text),
    }
}

fn resolve_code<'a>(code: &str, tail: &'a str) -> Option<(Option<Directive>, &'a str)> {
    let code = code.to_ascii_uppercase();
    match code.as_str() {
        "C" => parse_param(tail).map(|(n, tail)| (Some(Directive::Color(n)), tail)),
        "I" => parse_param(tail).map(|(n, tail)| (Some(Directive::Icon(n)), tail)),
        "{" => Some((Some(Directive::FontBigger), tail)),
        "}" => Some((Some(Directive::FontSmaller), tail)),
        inert if INERT_CODES.contains(&inert) => Some((None, tail)),
        _ => None,
    }
}

fn strip_code(text: &str, code: char) -> Option<&str> {
    let mut chars = text.chars();
    let first = chars.next()?;
    first.eq_ignore_ascii_case(&code).then(|| chars.as_str())
}

/// Parse a leading `[digits]` argument.
fn parse_param(text: &str) -> Option<(u32, &str)> {
    let inner = text.strip_prefix('[')?;
    let end = inner.find(']')?;
    let digits = &inner[..end];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value = digits.parse().ok()?;
    Some((value, &inner[end + 1..]))
}
