//! Inline attribute lists.
//!
//! Parses the `{#id .class key="value"}` syntax that annotates the block
//! following it, and the reserved `{frontmatter}`, `{mainmatter}` and
//! `{backmatter}` markers that share its braces.

use std::collections::BTreeMap;

use tracing::trace;

/// Identifier, classes and key/value pairs attached to one block.
///
/// # Example
///
/// ```
/// use mmark_blocks::ial;
///
/// let (list, consumed) = ial::scan(r#"{#intro .lead lang="en"}"#).unwrap();
/// assert_eq!(consumed, 24);
/// assert_eq!(list.id.as_deref(), Some("intro"));
/// assert_eq!(list.classes, vec!["lead"]);
/// assert_eq!(list.get("lang"), Some("en"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AttributeList {
    /// Block identifier: `{#id}`.
    pub id: Option<String>,
    /// Classes in the order they were written: `{.a .b}`.
    pub classes: Vec<String>,
    /// Key/value pairs: `{key="value"}`.
    pub attributes: BTreeMap<String, String>,
}

impl AttributeList {
    /// Whether the list carries nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.classes.is_empty() && self.attributes.is_empty()
    }

    /// Get an attribute value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Fold several lists into one, in order.
    ///
    /// The last identifier wins, classes accumulate without duplicates and
    /// later attributes overwrite earlier ones.
    #[must_use]
    pub fn merge(lists: &[Self]) -> Self {
        let mut merged = Self::default();
        for list in lists {
            if list.id.is_some() {
                merged.id.clone_from(&list.id);
            }
            for class in &list.classes {
                if !merged.classes.contains(class) {
                    merged.classes.push(class.clone());
                }
            }
            merged
                .attributes
                .extend(list.attributes.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        merged
    }

    /// Reconstruct the `{#id .class key="value"}` syntax.
    #[must_use]
    pub fn to_syntax(&self) -> String {
        let mut parts = Vec::new();

        if let Some(id) = &self.id {
            parts.push(format!("#{id}"));
        }
        for class in &self.classes {
            parts.push(format!(".{class}"));
        }
        for (key, value) in &self.attributes {
            let escaped = value.replace('\\', r"\\").replace('"', r#"\""#);
            parts.push(format!(r#"{key}="{escaped}""#));
        }

        format!("{{{}}}", parts.join(" "))
    }

    fn add_token(&mut self, token: &str) {
        if let Some(class) = token.strip_prefix('.') {
            let class = unescape(class);
            if !class.is_empty() {
                self.classes.push(class);
            }
        } else if let Some(id) = token.strip_prefix('#') {
            let id = unescape(id);
            if !id.is_empty() {
                self.id = Some(id);
            }
        } else if let Some((key, value)) = token.split_once('=') {
            if !key.is_empty() {
                self.attributes.insert(unescape(key), unescape(value));
            }
        } else {
            self.id = Some(unescape(token));
        }
    }
}

/// Document division marked by a reserved brace keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DocumentPart {
    /// `{frontmatter}`
    Front,
    /// `{mainmatter}`
    Main,
    /// `{backmatter}`
    Back,
}

impl DocumentPart {
    const ALL: [Self; 3] = [Self::Front, Self::Main, Self::Back];

    /// Keyword written between the braces.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Front => "frontmatter",
            Self::Main => "mainmatter",
            Self::Back => "backmatter",
        }
    }

    /// Recognize a reserved marker at the start of `input`.
    ///
    /// Returns the part and the number of bytes consumed.
    #[must_use]
    pub fn scan(input: &str) -> Option<(Self, usize)> {
        let inner = input.strip_prefix('{')?;
        let close = inner.find('}')?;
        let keyword = &inner[..close];
        Self::from_keyword(keyword).map(|part| (part, close + 2))
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|part| part.keyword() == keyword)
    }
}

/// Scan an attribute list at the start of `input`.
///
/// Returns the list and the number of bytes consumed, closing brace
/// included. Returns `None` when `input` does not hold a complete list on
/// the current line, when the braces are empty, or when they hold one of the
/// reserved document part keywords.
///
/// Tokens are separated by spaces outside double quotes. A backslash makes
/// the next byte literal, so `\"` neither opens nor closes a quoted value and
/// `\}` does not close the list.
#[must_use]
pub fn scan(input: &str) -> Option<(AttributeList, usize)> {
    let bytes = input.as_bytes();
    if bytes.first() != Some(&b'{') {
        return None;
    }

    let mut quoted = false;
    let mut escaped = false;
    let mut token_start = 1;
    let mut tokens = Vec::new();

    for (i, &b) in bytes.iter().enumerate().skip(1) {
        if b == b'\n' {
            return None;
        }
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' => escaped = true,
            b'"' => quoted = !quoted,
            b' ' if !quoted => {
                push_token(&mut tokens, &input[token_start..i]);
                token_start = i + 1;
            }
            b'}' if !quoted => {
                let content = &input[1..i];
                if DocumentPart::from_keyword(content).is_some() {
                    trace!(content, "reserved keyword is not an attribute list");
                    return None;
                }
                push_token(&mut tokens, &input[token_start..i]);
                if tokens.is_empty() {
                    return None;
                }

                let mut list = AttributeList::default();
                for token in tokens {
                    list.add_token(token);
                }
                trace!(consumed = i + 1, ?list, "scanned attribute list");
                return Some((list, i + 1));
            }
            _ => {}
        }
    }

    None
}

fn push_token<'a>(tokens: &mut Vec<&'a str>, token: &'a str) {
    if !token.is_empty() {
        tokens.push(token);
    }
}

/// Drop unescaped double quotes and resolve backslash escapes.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            '"' => {}
            _ => out.push(c),
        }
    }
    out
}
