use logos::Logos;

/// Raw lexical classes of the intermediate code.
///
/// The format is a whitespace separated token stream; the only structure the
/// lexer knows about is line comments.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub(crate) enum RawToken {
    #[regex(r"//[^\n]*")]
    Comment,

    #[regex(r"[^ \t\r\n\f/][^ \t\r\n\f]*")]
    Word,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<(Result<RawToken, ()>, &str)> {
        let mut lexer = RawToken::lexer(source);
        let mut out = Vec::new();
        while let Some(token) = lexer.next() {
            out.push((token, lexer.slice()));
        }
        out
    }

    #[test]
    fn test_words_and_whitespace() {
        assert_eq!(
            lex("  1 \toption_a\n  2.5 "),
            vec![
                (Ok(RawToken::Word), "1"),
                (Ok(RawToken::Word), "option_a"),
                (Ok(RawToken::Word), "2.5"),
            ]
        );
    }

    #[test]
    fn test_comment_runs_to_end_of_line() {
        assert_eq!(
            lex("a // b c\nd"),
            vec![
                (Ok(RawToken::Word), "a"),
                (Ok(RawToken::Comment), "// b c"),
                (Ok(RawToken::Word), "d"),
            ]
        );
    }

    #[test]
    fn test_slash_inside_word_is_not_a_comment() {
        assert_eq!(lex("a//b"), vec![(Ok(RawToken::Word), "a//b")]);
    }

    #[test]
    fn test_lone_slash_is_an_error() {
        let tokens = lex("/x");
        assert_eq!(tokens[0].0, Err(()));
    }
}
