//! Lightweight sanity check for CSS selectors embedded in `remove-attr`/`remove-class` arguments.
//! Only the token stream is inspected; selector grammar is left to the browser.

use cssparser::{ParseError, Parser, ParserInput, Token};

use crate::tokenizer::SyntaxError;

/// Delimiters that can appear between the parts of a selector.
const SELECTOR_DELIMITERS: [char; 8] = ['.', '*', '>', '+', '~', '|', '=', '&'];

fn check_tokens<'i, 't>(
    parser: &mut Parser<'i, 't>,
    nested: bool,
) -> Result<(), ParseError<'i, ()>> {
    loop {
        let token = match parser.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => return Ok(()),
        };

        match token {
            Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock => {
                parser.parse_nested_block(|nested_parser| check_tokens(nested_parser, true))?;
            }
            Token::Comment(_)
            | Token::BadString(_)
            | Token::BadUrl(_)
            | Token::CurlyBracketBlock
            | Token::CloseCurlyBracket
            | Token::CloseParenthesis
            | Token::CloseSquareBracket
            | Token::Semicolon
            | Token::AtKeyword(_)
            | Token::CDO
            | Token::CDC => return Err(parser.new_custom_error(())),
            Token::Delim(c) if !nested && !SELECTOR_DELIMITERS.contains(&c) => {
                return Err(parser.new_custom_error(()))
            }
            Token::QuotedString(_) | Token::UnquotedUrl(_) if !nested => {
                return Err(parser.new_custom_error(()))
            }
            _ => (),
        }
    }
}

/// Rejects selectors that could break out of the rule they are embedded in, such as ones
/// containing comments, blocks or unbalanced brackets.
pub fn validate_selector(selector: &str) -> Result<(), SyntaxError> {
    let mut input = ParserInput::new(selector);
    let mut parser = Parser::new(&mut input);

    check_tokens(&mut parser, false)
        .map_err(|_| SyntaxError::InvalidSelector(selector.to_owned()))
}

#[cfg(test)]
#[path = "../tests/unit/css_validation.rs"]
mod unit_tests;
