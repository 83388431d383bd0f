//! Restricted literal decoder for settings values
//!
//! A value may be written as a literal (`['Edit', 'Quit']`, `42`, `True`, ...)
//! so that lists and scalars need no separate schema. Only a closed set of
//! literal forms is recognised and nothing is ever evaluated: text that is not
//! a complete literal is kept verbatim as a string.

use std::collections::BTreeMap;

use super::value::ConfigValue;

/// Containers nested deeper than this are not treated as literals.
const MAX_DEPTH: usize = 64;

/// Decode one raw settings value.
///
/// Total: when `raw` is not a literal the result is `ConfigValue::String(raw)`.
pub fn decode(raw: &str) -> ConfigValue {
    match parse_literal(raw) {
        Some(value) => value,
        None => ConfigValue::String(raw.to_string()),
    }
}

/// Parse `raw` as a literal, returning `None` if any part of it is not one.
///
/// Comma-separated values without brackets (`'Edit', 'Quit'`) form a list,
/// like a bare tuple.
pub fn parse_literal(raw: &str) -> Option<ConfigValue> {
    let mut parser = LiteralParser::new(raw);
    let first = parser.value()?;
    parser.skip_whitespace();
    if parser.at_end() {
        return Some(first);
    }

    let mut items = vec![first];
    while parser.eat(',') {
        parser.skip_whitespace();
        if parser.at_end() {
            break;
        }
        items.push(parser.value()?);
        parser.skip_whitespace();
    }
    if parser.at_end() {
        Some(ConfigValue::List(items))
    } else {
        None
    }
}

struct LiteralParser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> LiteralParser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0, depth: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.bump();
        }
    }

    fn value(&mut self) -> Option<ConfigValue> {
        self.skip_whitespace();
        if self.string_start() {
            return self.strings();
        }
        match self.peek()? {
            '[' => self.nested(Self::list),
            '(' => self.nested(Self::tuple),
            '{' => self.nested(Self::mapping),
            c if c == '+' || c == '-' || c == '.' || c.is_ascii_digit() => self.number(),
            c if c.is_alphabetic() || c == '_' => self.word(),
            _ => None,
        }
    }

    fn nested(&mut self, parse: fn(&mut Self) -> Option<ConfigValue>) -> Option<ConfigValue> {
        if self.depth >= MAX_DEPTH {
            return None;
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    /// Items up to `close`, after the opening bracket. The flag reports a
    /// trailing comma, which turns `(x,)` into a one-element list.
    fn sequence(&mut self, close: char) -> Option<(Vec<ConfigValue>, bool)> {
        let mut items = Vec::new();
        let mut trailing_comma = false;
        loop {
            self.skip_whitespace();
            if self.eat(close) {
                return Some((items, trailing_comma));
            }
            items.push(self.value()?);
            self.skip_whitespace();
            if self.eat(',') {
                trailing_comma = true;
                continue;
            }
            return if self.eat(close) {
                Some((items, false))
            } else {
                None
            };
        }
    }

    fn list(&mut self) -> Option<ConfigValue> {
        self.bump();
        let (items, _) = self.sequence(']')?;
        Some(ConfigValue::List(items))
    }

    fn tuple(&mut self) -> Option<ConfigValue> {
        self.bump();
        let (mut items, trailing_comma) = self.sequence(')')?;
        if items.len() == 1 && !trailing_comma {
            // plain parentheses around a single value
            items.pop()
        } else {
            Some(ConfigValue::List(items))
        }
    }

    fn mapping(&mut self) -> Option<ConfigValue> {
        self.bump();
        let mut map = BTreeMap::new();
        loop {
            self.skip_whitespace();
            if self.eat('}') {
                return Some(ConfigValue::Mapping(map));
            }
            let key = match self.value()? {
                ConfigValue::String(key) => key,
                _ => return None,
            };
            self.skip_whitespace();
            if !self.eat(':') {
                return None;
            }
            let value = self.value()?;
            map.insert(key, value);
            self.skip_whitespace();
            if self.eat(',') {
                continue;
            }
            return if self.eat('}') {
                Some(ConfigValue::Mapping(map))
            } else {
                None
            };
        }
    }

    fn string_start(&self) -> bool {
        match self.peek() {
            Some('\'' | '"') => true,
            Some('r' | 'R' | 'u' | 'U') => matches!(self.peek_second(), Some('\'' | '"')),
            _ => false,
        }
    }

    /// One or more adjacent string literals, concatenated.
    fn strings(&mut self) -> Option<ConfigValue> {
        let mut text = self.string()?;
        loop {
            let before = self.pos;
            self.skip_whitespace();
            if self.string_start() {
                text.push_str(&self.string()?);
            } else {
                self.pos = before;
                return Some(ConfigValue::String(text));
            }
        }
    }

    fn string(&mut self) -> Option<String> {
        let raw = match self.peek()? {
            'r' | 'R' => {
                self.bump();
                true
            }
            'u' | 'U' => {
                self.bump();
                false
            }
            _ => false,
        };
        let quote = self.bump()?;
        let doubled: String = [quote, quote].iter().collect();
        if self.rest().starts_with(&doubled) {
            // triple-quoted strings are not part of the grammar
            return None;
        }

        let mut out = String::new();
        loop {
            let c = self.bump()?;
            if c == quote {
                return Some(out);
            }
            match c {
                '\n' => return None,
                '\\' => {
                    let next = self.bump()?;
                    if raw {
                        out.push('\\');
                        out.push(next);
                    } else {
                        self.escape(next, &mut out)?;
                    }
                }
                c => out.push(c),
            }
        }
    }

    fn escape(&mut self, c: char, out: &mut String) -> Option<()> {
        match c {
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'v' => out.push('\x0b'),
            '0'..='7' => {
                let mut code = c.to_digit(8)?;
                for _ in 0..2 {
                    match self.peek().and_then(|d| d.to_digit(8)) {
                        Some(digit) => {
                            code = code * 8 + digit;
                            self.bump();
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(code)?);
            }
            'x' => out.push(self.hex_escape(2)?),
            'u' => out.push(self.hex_escape(4)?),
            'U' => out.push(self.hex_escape(8)?),
            // named escapes need the unicode name table
            'N' => return None,
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        Some(())
    }

    fn hex_escape(&mut self, len: usize) -> Option<char> {
        let digits = self.rest().get(..len)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let code = u32::from_str_radix(digits, 16).ok()?;
        self.pos += len;
        char::from_u32(code)
    }

    fn number(&mut self) -> Option<ConfigValue> {
        let negative = match self.peek()? {
            '-' => {
                self.bump();
                true
            }
            '+' => {
                self.bump();
                false
            }
            _ => false,
        };
        self.skip_whitespace();

        let start = self.pos;
        let mut prev = '\0';
        while let Some(c) = self.peek() {
            let exponent_sign = matches!(c, '+' | '-')
                && matches!(prev, 'e' | 'E')
                && radix_prefix(&self.src[start..self.pos]).is_none();
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' || exponent_sign {
                prev = c;
                self.bump();
            } else {
                break;
            }
        }
        parse_number(&self.src[start..self.pos], negative)
    }

    fn word(&mut self) -> Option<ConfigValue> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !(c.is_alphanumeric() || c == '_') {
                break;
            }
            self.bump();
        }
        match &self.src[start..self.pos] {
            "True" => Some(ConfigValue::Boolean(true)),
            "False" => Some(ConfigValue::Boolean(false)),
            "None" => Some(ConfigValue::None),
            _ => None,
        }
    }
}

fn radix_prefix(token: &str) -> Option<(u32, &str)> {
    let mut chars = token.chars();
    if chars.next() != Some('0') {
        return None;
    }
    let radix = match chars.next()? {
        'x' | 'X' => 16,
        'o' | 'O' => 8,
        'b' | 'B' => 2,
        _ => return None,
    };
    Some((radix, &token[2..]))
}

fn parse_number(token: &str, negative: bool) -> Option<ConfigValue> {
    let cleaned = strip_underscores(token)?;
    if cleaned.is_empty() {
        return None;
    }

    if let Some((radix, digits)) = radix_prefix(&cleaned) {
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return None;
        }
        let magnitude = i128::from_str_radix(digits, radix).ok()?;
        return signed_integer(magnitude, negative);
    }

    if cleaned.bytes().all(|b| b.is_ascii_digit()) {
        // leading zeros are only allowed for zero itself
        if cleaned.len() > 1 && cleaned.starts_with('0') && cleaned.bytes().any(|b| b != b'0') {
            return None;
        }
        let magnitude: i128 = cleaned.parse().ok()?;
        return signed_integer(magnitude, negative);
    }

    if !is_float_syntax(&cleaned) {
        return None;
    }
    let value: f64 = cleaned.parse().ok()?;
    Some(ConfigValue::Float(if negative { -value } else { value }))
}

fn signed_integer(magnitude: i128, negative: bool) -> Option<ConfigValue> {
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).ok().map(ConfigValue::Integer)
}

/// Digit separators must sit between two alphanumerics (`1_000`, `0x_ff`).
fn strip_underscores(token: &str) -> Option<String> {
    let chars: Vec<char> = token.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if *c != '_' {
            continue;
        }
        let before = i.checked_sub(1).map(|j| chars[j]);
        let after = chars.get(i + 1).copied();
        let separates = matches!(before, Some(b) if b.is_ascii_alphanumeric())
            && matches!(after, Some(a) if a.is_ascii_alphanumeric());
        if !separates {
            return None;
        }
    }
    Some(chars.into_iter().filter(|c| *c != '_').collect())
}

fn is_float_syntax(s: &str) -> bool {
    let (mantissa, exponent) = match s.find(|c: char| c == 'e' || c == 'E') {
        Some(i) => (&s[..i], Some(&s[i + 1..])),
        None => (s, None),
    };

    let mut parts = mantissa.splitn(2, '.');
    let whole = parts.next().unwrap_or("");
    let fraction = parts.next().unwrap_or("");
    let mantissa_ok = !(whole.is_empty() && fraction.is_empty())
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit());

    let exponent_ok = match exponent {
        None => true,
        Some(e) => {
            let digits = e.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(e);
            !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
        }
    };

    mantissa_ok && exponent_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_command_stays_verbatim() {
        assert_eq!(
            decode("nano file.txt"),
            ConfigValue::String("nano file.txt".to_string())
        );
    }

    #[test]
    fn test_tuple_forms() {
        assert_eq!(decode("()"), ConfigValue::List(Vec::new()));
        assert_eq!(decode("(1)"), ConfigValue::Integer(1));
        assert_eq!(
            decode("(1,)"),
            ConfigValue::List(vec![ConfigValue::Integer(1)])
        );
    }

    #[test]
    fn test_bare_sequence_is_a_list() {
        assert_eq!(
            decode("'Edit', 'Quit'"),
            ConfigValue::List(vec![ConfigValue::from("Edit"), ConfigValue::from("Quit")])
        );
        assert_eq!(
            decode("'Edit',"),
            ConfigValue::List(vec![ConfigValue::from("Edit")])
        );
        assert_eq!(decode("'a', b"), ConfigValue::String("'a', b".to_string()));
        assert_eq!(decode("'a',,"), ConfigValue::String("'a',,".to_string()));
    }

    #[test]
    fn test_leading_zero_integer_is_not_a_literal() {
        assert_eq!(decode("007"), ConfigValue::String("007".to_string()));
        assert_eq!(decode("000"), ConfigValue::Integer(0));
    }

    #[test]
    fn test_depth_limit() {
        let deep = format!("{}{}", "[".repeat(MAX_DEPTH + 1), "]".repeat(MAX_DEPTH + 1));
        assert_eq!(decode(&deep), ConfigValue::String(deep.clone()));

        let shallow = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(matches!(decode(&shallow), ConfigValue::List(_)));
    }

    #[test]
    fn test_float_syntax() {
        assert!(is_float_syntax("1.5"));
        assert!(is_float_syntax(".5"));
        assert!(is_float_syntax("2."));
        assert!(is_float_syntax("1e-3"));
        assert!(!is_float_syntax("."));
        assert!(!is_float_syntax("1e"));
        assert!(!is_float_syntax("1.2.3"));
        assert!(!is_float_syntax("12abc"));
    }
}
