//! Type tags for contract arguments and return values
//!
//! Tags use Rust/SCALE syntax (`u32`, `Vec<u8>`, `[u8; 32]`, `Option<AccountId>`).
//! Older ink! metadata writes generic types as objects, e.g.
//! `{"Option<T>": {"T": "u32"}}`, which are resolved by substitution.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

/// A recognized argument or return type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDef {
    Bool,
    U8,
    U16,
    U32,
    U64,
    U128,
    I8,
    I16,
    I32,
    I64,
    I128,
    /// UTF-8 string
    Str,
    /// 32-byte account identifier
    AccountId,
    /// 32-byte hash
    Hash,
    Vec(Box<TypeDef>),
    Array(Box<TypeDef>, usize),
    Option(Box<TypeDef>),
    Result(Box<TypeDef>, Box<TypeDef>),
    /// Compact-encoded unsigned integer
    Compact(Box<TypeDef>),
    Tuple(Vec<TypeDef>),
}

/// Type tag that could not be recognized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ParseTypeError(String);

impl TypeDef {
    /// Resolve a type tag from its JSON form (string or template object)
    pub fn from_json(value: &Value) -> Result<Self, ParseTypeError> {
        resolve_json(value)?.parse()
    }

    pub fn is_unsigned(&self) -> bool {
        matches!(self, Self::U8 | Self::U16 | Self::U32 | Self::U64 | Self::U128)
    }

    /// Encodes to no bytes at all: `()`, `[T; 0]` and tuples or arrays of those
    pub fn is_zero_sized(&self) -> bool {
        match self {
            Self::Tuple(items) => items.iter().all(Self::is_zero_sized),
            Self::Array(inner, len) => *len == 0 || inner.is_zero_sized(),
            _ => false,
        }
    }

    /// JSON form may be `null`
    pub fn is_nullable(&self) -> bool {
        matches!(self, Self::Option(_))
    }

    /// `u8` element type, for types that accept hex input
    pub fn is_byte(&self) -> bool {
        matches!(self, Self::U8)
    }

    fn from_name(name: &str) -> Option<Self> {
        let ty = match name {
            "bool" => Self::Bool,
            "u8" => Self::U8,
            "u16" => Self::U16,
            "u32" => Self::U32,
            "u64" => Self::U64,
            "u128" | "Balance" => Self::U128,
            "i8" => Self::I8,
            "i16" => Self::I16,
            "i32" => Self::I32,
            "i64" => Self::I64,
            "i128" => Self::I128,
            "BlockNumber" | "Moment" => Self::U64,
            "String" | "Text" | "str" => Self::Str,
            "AccountId" => Self::AccountId,
            "Hash" | "H256" => Self::Hash,
            "Bytes" => Self::Vec(Box::new(Self::U8)),
            _ => return None,
        };
        Some(ty)
    }
}

impl FromStr for TypeDef {
    type Err = ParseTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser { src: s, pos: 0 };
        let ty = parser.parse_type()?;
        parser.skip_ws();
        if parser.pos != s.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(ty)
    }
}

impl fmt::Display for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::U8 => write!(f, "u8"),
            Self::U16 => write!(f, "u16"),
            Self::U32 => write!(f, "u32"),
            Self::U64 => write!(f, "u64"),
            Self::U128 => write!(f, "u128"),
            Self::I8 => write!(f, "i8"),
            Self::I16 => write!(f, "i16"),
            Self::I32 => write!(f, "i32"),
            Self::I64 => write!(f, "i64"),
            Self::I128 => write!(f, "i128"),
            Self::Str => write!(f, "String"),
            Self::AccountId => write!(f, "AccountId"),
            Self::Hash => write!(f, "Hash"),
            Self::Vec(inner) => write!(f, "Vec<{}>", inner),
            Self::Array(inner, len) => write!(f, "[{}; {}]", inner, len),
            Self::Option(inner) => write!(f, "Option<{}>", inner),
            Self::Result(ok, err) => write!(f, "Result<{}, {}>", ok, err),
            Self::Compact(inner) => write!(f, "Compact<{}>", inner),
            Self::Tuple(items) => {
                let items: Vec<String> = items.iter().map(ToString::to_string).collect();
                if items.len() == 1 {
                    write!(f, "({},)", items[0])
                } else {
                    write!(f, "({})", items.join(", "))
                }
            }
        }
    }
}

/// Recursive-descent parser over a type string
struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, reason: &str) -> ParseTypeError {
        ParseTypeError(format!("{} at offset {} in `{}`", reason, self.pos, self.src))
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseTypeError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(&format!("expected `{}`", expected)))
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.src[start..self.pos]
    }

    fn parse_type(&mut self) -> Result<TypeDef, ParseTypeError> {
        self.skip_ws();
        match self.peek() {
            Some('(') => self.parse_tuple(),
            Some('[') => self.parse_array(),
            Some(_) => self.parse_named(),
            None => Err(self.error("expected a type")),
        }
    }

    fn parse_tuple(&mut self) -> Result<TypeDef, ParseTypeError> {
        self.expect('(')?;
        let mut items = Vec::new();
        if self.eat(')') {
            return Ok(TypeDef::Tuple(items));
        }
        loop {
            items.push(self.parse_type()?);
            if !self.eat(',') {
                break;
            }
            // trailing comma, as in `(u32,)`
            self.skip_ws();
            if self.peek() == Some(')') {
                break;
            }
        }
        self.expect(')')?;
        Ok(TypeDef::Tuple(items))
    }

    fn parse_array(&mut self) -> Result<TypeDef, ParseTypeError> {
        self.expect('[')?;
        let inner = self.parse_type()?;
        self.expect(';')?;
        self.skip_ws();
        let digits = self.take_while(|c| c.is_ascii_digit());
        let len = digits
            .parse::<usize>()
            .map_err(|_| self.error("expected array length"))?;
        self.expect(']')?;
        self.check_element(&inner)?;
        Ok(TypeDef::Array(Box::new(inner), len))
    }

    /// Sequence elements must encode to at least one byte
    fn check_element(&self, inner: &TypeDef) -> Result<(), ParseTypeError> {
        if inner.is_zero_sized() {
            return Err(self.error(&format!(
                "sequence of zero-sized `{}` is not supported",
                inner
            )));
        }
        Ok(())
    }

    fn parse_named(&mut self) -> Result<TypeDef, ParseTypeError> {
        // `&str` reads as `str`
        self.eat('&');
        self.skip_ws();
        let path = self.take_while(|c| c.is_alphanumeric() || c == '_' || c == ':');
        if path.is_empty() {
            return Err(self.error("expected a type name"));
        }
        // Fully qualified paths resolve by their last segment
        let name = path.rsplit("::").next().unwrap_or(path);

        let mut params = Vec::new();
        if self.eat('<') {
            loop {
                params.push(self.parse_type()?);
                if !self.eat(',') {
                    break;
                }
            }
            self.expect('>')?;
        }

        let mut params = params.into_iter();
        let ty = match (name, params.len()) {
            ("Vec", 1) => {
                let inner = params.next().unwrap_or(TypeDef::U8);
                self.check_element(&inner)?;
                TypeDef::Vec(Box::new(inner))
            }
            ("Option", 1) => TypeDef::Option(Box::new(params.next().unwrap_or(TypeDef::U8))),
            ("Box", 1) => params.next().unwrap_or(TypeDef::U8),
            ("Result", 2) => {
                let ok = params.next().unwrap_or(TypeDef::U8);
                let err = params.next().unwrap_or(TypeDef::U8);
                TypeDef::Result(Box::new(ok), Box::new(err))
            }
            ("Compact", 1) => {
                let inner = params.next().unwrap_or(TypeDef::U8);
                if !inner.is_unsigned() {
                    return Err(self.error(&format!(
                        "Compact requires an unsigned integer, got {}",
                        inner
                    )));
                }
                TypeDef::Compact(Box::new(inner))
            }
            (name, 0) => TypeDef::from_name(name)
                .ok_or_else(|| self.error(&format!("unknown type `{}`", name)))?,
            (name, n) => {
                return Err(self.error(&format!(
                    "unknown generic type `{}` with {} parameters",
                    name, n
                )))
            }
        };
        Ok(ty)
    }
}

/// Flatten a JSON type tag into a type string
fn resolve_json(value: &Value) -> Result<String, ParseTypeError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Object(map) if map.len() == 1 => {
            let (template, params) = map
                .iter()
                .next()
                .ok_or_else(|| ParseTypeError("empty type object".into()))?;
            let params = params.as_object().ok_or_else(|| {
                ParseTypeError(format!("parameters of `{}` should be an object", template))
            })?;
            substitute(template, |ident| {
                params.get(ident).map(resolve_json).transpose()
            })
        }
        Value::Object(_) => Err(ParseTypeError(
            "type object should have exactly one template key".into(),
        )),
        other => Err(ParseTypeError(format!("unsupported type tag {}", other))),
    }
}

/// Replace whole identifiers in `template` using `lookup`
fn substitute(
    template: &str,
    lookup: impl Fn(&str) -> Result<Option<String>, ParseTypeError>,
) -> Result<String, ParseTypeError> {
    let mut out = String::with_capacity(template.len());
    let mut ident = String::new();

    let flush = |ident: &mut String, out: &mut String| -> Result<(), ParseTypeError> {
        if !ident.is_empty() {
            match lookup(ident)? {
                Some(resolved) => out.push_str(&resolved),
                None => out.push_str(ident),
            }
            ident.clear();
        }
        Ok(())
    };

    for c in template.chars() {
        if c.is_alphanumeric() || c == '_' {
            ident.push(c);
        } else {
            flush(&mut ident, &mut out)?;
            out.push(c);
        }
    }
    flush(&mut ident, &mut out)?;

    Ok(out)
}
