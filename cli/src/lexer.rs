use logos::Logos;

/// Tokens of an environment file: words separated by blanks, one
/// declaration per line.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token {
    #[token("\n")]
    Newline,

    #[regex(r"//[^\n]*")]
    Comment,

    #[regex(r"[^ \t\r\n\f]+")]
    Word,
}

/// Splits `source` into its non-empty lines of words, each with its
/// one-based line number.
pub fn lines(source: &str) -> Result<Vec<(usize, Vec<&str>)>, usize> {
    let mut lines = Vec::new();
    let mut number = 1;
    let mut words = Vec::new();

    let mut lexer = Token::lexer(source);
    while let Some(token) = lexer.next() {
        match token {
            Ok(Token::Newline) => {
                if !words.is_empty() {
                    lines.push((number, std::mem::take(&mut words)));
                }
                number += 1;
            }
            Ok(Token::Comment) => {}
            Ok(Token::Word) => words.push(lexer.slice()),
            Err(()) => return Err(number),
        }
    }
    if !words.is_empty() {
        lines.push((number, words));
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lines_skip_blanks_and_comments() {
        let source = "enum role striker 0\n\n// outputs\ndecimal-output walk.speed // m/s\n";
        assert_eq!(
            lines(source).unwrap(),
            vec![
                (1, vec!["enum", "role", "striker", "0"]),
                (4, vec!["decimal-output", "walk.speed"]),
            ]
        );
    }

    #[test]
    fn test_last_line_without_newline() {
        assert_eq!(
            lines("basic-behavior kick").unwrap(),
            vec![(1, vec!["basic-behavior", "kick"])]
        );
    }
}
