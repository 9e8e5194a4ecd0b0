//! Metadata literal parser
//!
//! Markup carries configuration as a relaxed object literal, for example
//! `{tableName:'players', autoAddRow:false}`. Keys may be bare identifiers,
//! strings may use single or double quotes and trailing commas are allowed.
//! The literal is converted to a [`serde_json::Value`] so that options coming
//! from markup deserialize through exactly the same path as explicit options.

use serde_json::{Map, Number, Value};

use super::{TableError, TableResult};

/// Deepest object/array nesting accepted in a literal
const MAX_DEPTH: usize = 128;

/// Parses a complete metadata literal
pub fn parse_literal(input: &str) -> TableResult<Value> {
    let mut parser = LiteralParser::new(input);
    parser.skip_whitespace();
    if parser.at_end() {
        return Err(parser.error("empty literal"));
    }
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    if !parser.at_end() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(value)
}

/// Recursive descent parser over the literal text
///
/// Grammar:
/// ```text
/// value  ::= object | array | string | number | 'true' | 'false' | 'null' | 'undefined'
/// object ::= '{' (key ':' value (',' key ':' value)* ','?)? '}'
/// array  ::= '[' (value (',' value)* ','?)? ']'
/// key    ::= IDENT | string
/// ```
#[derive(Debug)]
struct LiteralParser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> LiteralParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
        }
    }

    fn error(&self, message: impl Into<String>) -> TableError {
        TableError::InvalidMetadata {
            position: self.pos,
            message: message.into(),
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn expect(&mut self, expected: char) -> TableResult<()> {
        self.skip_whitespace();
        match self.current_char() {
            Some(ch) if ch == expected => {
                self.advance();
                Ok(())
            }
            Some(ch) => Err(self.error(format!("expected '{expected}', found '{ch}'"))),
            None => Err(self.error(format!("expected '{expected}', found end of input"))),
        }
    }

    fn parse_value(&mut self) -> TableResult<Value> {
        self.skip_whitespace();
        match self.current_char() {
            Some('{') => self.parse_object(),
            Some('[') => self.parse_array(),
            Some(quote @ ('\'' | '"')) => self.parse_string(quote).map(Value::String),
            Some(ch) if ch == '-' || ch == '+' || ch == '.' || ch.is_ascii_digit() => {
                self.parse_number()
            }
            Some(ch) if is_ident_start(ch) => {
                let word = self.read_identifier();
                match word {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    "null" | "undefined" => Ok(Value::Null),
                    other => Err(self.error(format!("unexpected word '{other}'"))),
                }
            }
            Some(ch) => Err(self.error(format!("unexpected character '{ch}'"))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn enter(&mut self) -> TableResult<()> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_object(&mut self) -> TableResult<Value> {
        self.expect('{')?;
        self.enter()?;
        let mut map = Map::new();
        loop {
            self.skip_whitespace();
            match self.current_char() {
                Some('}') => {
                    self.advance();
                    self.depth -= 1;
                    return Ok(Value::Object(map));
                }
                Some(_) => {}
                None => return Err(self.error("unterminated object")),
            }

            let key = self.parse_key()?;
            self.expect(':')?;
            let value = self.parse_value()?;
            map.insert(key, value);

            self.skip_whitespace();
            match self.current_char() {
                Some(',') => self.advance(),
                Some('}') => {}
                Some(ch) => return Err(self.error(format!("expected ',' or '}}', found '{ch}'"))),
                None => return Err(self.error("unterminated object")),
            }
        }
    }

    fn parse_array(&mut self) -> TableResult<Value> {
        self.expect('[')?;
        self.enter()?;
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.current_char() {
                Some(']') => {
                    self.advance();
                    self.depth -= 1;
                    return Ok(Value::Array(items));
                }
                Some(_) => {}
                None => return Err(self.error("unterminated array")),
            }

            items.push(self.parse_value()?);

            self.skip_whitespace();
            match self.current_char() {
                Some(',') => self.advance(),
                Some(']') => {}
                Some(ch) => return Err(self.error(format!("expected ',' or ']', found '{ch}'"))),
                None => return Err(self.error("unterminated array")),
            }
        }
    }

    fn parse_key(&mut self) -> TableResult<String> {
        self.skip_whitespace();
        match self.current_char() {
            Some(quote @ ('\'' | '"')) => self.parse_string(quote),
            Some(ch) if is_ident_start(ch) => Ok(self.read_identifier().to_string()),
            Some(ch) => Err(self.error(format!("expected key, found '{ch}'"))),
            None => Err(self.error("expected key, found end of input")),
        }
    }

    fn read_identifier(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(ch) = self.current_char() {
            if is_ident_continue(ch) {
                self.advance();
            } else {
                break;
            }
        }
        &self.input[start..self.pos]
    }

    fn parse_string(&mut self, quote: char) -> TableResult<String> {
        self.advance();
        let mut out = String::new();
        loop {
            match self.current_char() {
                Some(ch) if ch == quote => {
                    self.advance();
                    return Ok(out);
                }
                Some('\\') => {
                    self.advance();
                    let escaped = match self.current_char() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some(other) => other,
                        None => return Err(self.error("unterminated escape")),
                    };
                    out.push(escaped);
                    self.advance();
                }
                Some(ch) => {
                    out.push(ch);
                    self.advance();
                }
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn parse_number(&mut self) -> TableResult<Value> {
        let start = self.pos;
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | 'e' | 'E') {
                self.advance();
            } else {
                break;
            }
        }
        let text = &self.input[start..self.pos];
        if let Ok(n) = text.parse::<i64>() {
            return Ok(Value::Number(n.into()));
        }
        text.parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| TableError::InvalidMetadata {
                position: start,
                message: format!("invalid number '{text}'"),
            })
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

fn is_ident_continue(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_flat_object() {
        let value = parse_literal("{tableName:'players', autoAddRow:false}").unwrap();
        assert_eq!(value, json!({"tableName": "players", "autoAddRow": false}));
    }

    #[test]
    fn test_parse_double_quotes_and_quoted_keys() {
        let value = parse_literal(r#"{"tableName": "players", 'enableAddRow': true}"#).unwrap();
        assert_eq!(value, json!({"tableName": "players", "enableAddRow": true}));
    }

    #[test]
    fn test_parse_nested_columns() {
        let value = parse_literal(
            "{tableName:'players', columns:[{name:'name', required:true}, {editable:false, name:'total'},]}",
        )
        .unwrap();
        assert_eq!(value["columns"][1]["editable"], json!(false));
        assert_eq!(value["columns"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_parse_numbers() {
        let value = parse_literal("{a: 3, b: -1.5, c: 2e2}").unwrap();
        assert_eq!(value, json!({"a": 3, "b": -1.5, "c": 200.0}));
    }

    #[test]
    fn test_parse_null_and_undefined() {
        let value = parse_literal("{a: null, b: undefined}").unwrap();
        assert_eq!(value, json!({"a": null, "b": null}));
    }

    #[test]
    fn test_parse_escapes() {
        let value = parse_literal(r"{a:'it\'s'}").unwrap();
        assert_eq!(value, json!({"a": "it's"}));
    }

    #[test]
    fn test_parse_empty_object() {
        assert_eq!(parse_literal(" { } ").unwrap(), json!({}));
    }

    #[test]
    fn test_error_empty_input() {
        assert!(matches!(
            parse_literal("   "),
            Err(TableError::InvalidMetadata { .. })
        ));
    }

    #[test]
    fn test_error_missing_colon() {
        let err = parse_literal("{tableName 'players'}").unwrap_err();
        assert!(matches!(err, TableError::InvalidMetadata { position: 11, .. }));
    }

    #[test]
    fn test_error_unterminated_string() {
        assert!(parse_literal("{a:'abc}").is_err());
    }

    #[test]
    fn test_error_trailing_input() {
        assert!(parse_literal("{} x").is_err());
    }

    #[test]
    fn test_error_nesting_too_deep() {
        let literal = format!("{{tableName:'t', x:{}{}}}", "[".repeat(200), "]".repeat(200));
        assert!(matches!(
            parse_literal(&literal),
            Err(TableError::InvalidMetadata { .. })
        ));
    }

    #[test]
    fn test_deep_nesting_rejected_without_overflow() {
        let literal = format!("{{x:{}{}}}", "[".repeat(20_000), "]".repeat(20_000));
        let err = parse_literal(&literal).unwrap_err();
        assert!(err.to_string().contains("nesting too deep"));
    }

    #[test]
    fn test_nesting_within_limit() {
        let literal = format!("{{x:{}{}}}", "[".repeat(100), "]".repeat(100));
        assert!(parse_literal(&literal).is_ok());
    }

    #[test]
    fn test_error_unknown_word() {
        assert!(parse_literal("{a: yes}").is_err());
    }
}
