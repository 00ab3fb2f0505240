//! Mail addresses of the form `Display Name <user@host>`.
//!
//! Only the subset of RFC 5322 needed to turn a contact into an invitation is
//! supported: a bare address, an unquoted display name, or a quoted display
//! name followed by an angle-bracketed address. Group syntax and comments are
//! rejected.

use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

/// A single mailbox: an address plus an optional display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailAddress {
    pub email: String,
    pub name: Option<String>,
}

impl MailAddress {
    pub fn new(email: impl Into<String>, name: Option<String>) -> Self {
        Self {
            email: email.into(),
            name,
        }
    }
}

const SPECIALS: &[char] = &['(', ')', '<', '>', '[', ']', ':', ';', '@', '\\', ',', '.', '"'];

impl fmt::Display for MailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name.as_deref().filter(|name| !name.is_empty()) {
            Some(name) if name.contains(SPECIALS) => {
                let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
                write!(f, "\"{escaped}\" <{}>", self.email)
            }
            Some(name) => write!(f, "{name} <{}>", self.email),
            None => f.write_str(&self.email),
        }
    }
}

impl FromStr for MailAddress {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |position: usize, reason: &str| ApiError::MalformedAddress {
            address: s.to_string(),
            position,
            reason: reason.to_string(),
        };

        let trimmed = s.trim_end();
        if trimmed.trim_start().is_empty() {
            return Err(malformed(0, "empty address"));
        }

        let Some(open) = trimmed.find('<') else {
            let start = s.len() - s.trim_start().len();
            let email = trimmed.trim_start();
            return match email.find(|c: char| c.is_whitespace() || "<>\",;:()".contains(c)) {
                Some(offset) => Err(malformed(start + offset, "illegal character in address")),
                None => parse_addr_spec(email, start, &malformed).map(|email| Self::new(email, None)),
            };
        };

        if !trimmed.ends_with('>') {
            return Err(malformed(trimmed.len(), "missing '>'"));
        }
        // The angle address is the last `<` before the closing `>`; earlier
        // brackets belong to a quoted display name.
        let open = trimmed[..trimmed.len() - 1].rfind('<').unwrap_or(open);
        let inner = &trimmed[open + 1..trimmed.len() - 1];
        if let Some(offset) = inner.find('>') {
            return Err(malformed(open + 1 + offset, "nested angle bracket"));
        }
        let email = parse_addr_spec(inner.trim(), open + 1, &malformed)?;

        let phrase = trimmed[..open].trim();
        let name = if phrase.is_empty() {
            None
        } else if let Some(quoted) = phrase.strip_prefix('"') {
            let start = s.find('"').unwrap_or(0);
            Some(unquote(quoted).ok_or_else(|| malformed(start, "unterminated quoted string"))?)
        } else if let Some(offset) = phrase.find(['"', '@', ',', ';', ':', '<', '>']) {
            return Err(malformed(s.find(phrase).unwrap_or(0) + offset, "illegal character in display name"));
        } else {
            Some(phrase.to_string())
        };

        Ok(Self::new(email, name.filter(|name| !name.is_empty())))
    }
}

/// Check the `local@domain` shape and return the address as an owned string.
fn parse_addr_spec(
    spec: &str,
    start: usize,
    malformed: &dyn Fn(usize, &str) -> ApiError,
) -> Result<String, ApiError> {
    let Some(at) = spec.rfind('@') else {
        return Err(malformed(start + spec.len(), "missing '@'"));
    };
    if at == 0 {
        return Err(malformed(start, "missing local part"));
    }
    if at + 1 == spec.len() {
        return Err(malformed(start + spec.len(), "missing domain"));
    }
    Ok(spec.to_string())
}

/// Undo quoted-string escaping. `rest` starts just after the opening quote
/// and must end with the closing quote.
fn unquote(rest: &str) -> Option<String> {
    let mut out = String::with_capacity(rest.len());
    let mut chars = rest.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push(chars.next()?),
            '"' => return chars.as_str().trim().is_empty().then_some(out),
            _ => out.push(c),
        }
    }
    None
}
