//! Command string grammar: `name` or `name(arg1,arg2,...)`.
//!
//! The name is a maximal run of ASCII alphanumerics. Arguments are the raw
//! substrings between `(`, `,` and `)`. There is no quoting or escaping, so
//! an argument can never contain a literal `,` or `)`; configuration files
//! in the wild depend on exactly this grammar.

use super::error::ParseError;

/// Maximum number of arguments a command string may carry.
pub const MAX_ARGS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

impl ParsedCommand {
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }
}

pub fn parse_command(cmd: &str) -> Result<ParsedCommand, ParseError> {
    let bytes = cmd.as_bytes();
    let name_end = bytes
        .iter()
        .position(|b| !b.is_ascii_alphanumeric())
        .unwrap_or(bytes.len());
    if name_end == 0 {
        return Err(ParseError::EmptyName);
    }
    let name = cmd[..name_end].to_string();

    let mut args = Vec::new();
    let mut pos = name_end;
    if bytes.get(pos) == Some(&b'(') {
        loop {
            let start = pos + 1;
            let end = bytes[start..]
                .iter()
                .position(|&b| b == b',' || b == b')')
                .map_or(bytes.len(), |off| start + off);
            args.push(cmd[start..end].to_string());
            pos = end;
            match bytes.get(pos) {
                Some(b',') if args.len() == MAX_ARGS => {
                    return Err(ParseError::TooManyArguments { max: MAX_ARGS });
                }
                Some(b',') => continue,
                Some(b')') => break,
                _ => return Err(ParseError::MissingCloseParen),
            }
        }
        // skip ')'
        pos += 1;
    }

    if pos < bytes.len() {
        return Err(ParseError::TrailingCharacters(cmd[pos..].to_string()));
    }

    Ok(ParsedCommand { name, args })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_name() {
        let parsed = parse_command("zoomIn").unwrap();
        assert_eq!(parsed.name, "zoomIn");
        assert!(parsed.args.is_empty());
    }

    #[test]
    fn single_argument() {
        let parsed = parse_command("gotoPage(5)").unwrap();
        assert_eq!(parsed.name, "gotoPage");
        assert_eq!(parsed.args, vec!["5"]);
    }

    #[test]
    fn arguments_are_taken_verbatim() {
        let parsed = parse_command("setSelection(1, 2.5,x y,,)").unwrap();
        assert_eq!(parsed.args, vec!["1", " 2.5", "x y", "", ""]);
    }

    #[test]
    fn empty_parens_yield_one_empty_argument() {
        let parsed = parse_command("quit()").unwrap();
        assert_eq!(parsed.args, vec![""]);
    }

    #[test]
    fn empty_name_is_rejected() {
        assert_eq!(parse_command(""), Err(ParseError::EmptyName));
        assert_eq!(parse_command("(5)"), Err(ParseError::EmptyName));
        assert_eq!(parse_command(" quit"), Err(ParseError::EmptyName));
    }

    #[test]
    fn unclosed_argument_list_is_rejected() {
        assert_eq!(
            parse_command("gotoPage(5"),
            Err(ParseError::MissingCloseParen)
        );
        assert_eq!(parse_command("run("), Err(ParseError::MissingCloseParen));
    }

    #[test]
    fn trailing_characters_are_rejected() {
        assert_eq!(
            parse_command("gotoPage(5)x"),
            Err(ParseError::TrailingCharacters("x".into()))
        );
        assert_eq!(
            parse_command("quit "),
            Err(ParseError::TrailingCharacters(" ".into()))
        );
        assert_eq!(
            parse_command("go-to"),
            Err(ParseError::TrailingCharacters("-to".into()))
        );
    }

    #[test]
    fn eight_arguments_fit() {
        let parsed = parse_command("c(1,2,3,4,5,6,7,8)").unwrap();
        assert_eq!(parsed.arg_count(), MAX_ARGS);
    }

    #[test]
    fn ninth_argument_is_rejected() {
        assert_eq!(
            parse_command("c(1,2,3,4,5,6,7,8,9)"),
            Err(ParseError::TooManyArguments { max: MAX_ARGS })
        );
    }

    #[test]
    fn commas_cannot_be_escaped() {
        // "a\,b" is still split on the comma
        let parsed = parse_command(r"run(echo a\,b)").unwrap();
        assert_eq!(parsed.args, vec![r"echo a\", "b"]);

        // a literal ')' ends the argument list early
        assert_eq!(
            parse_command("run(echo (x))"),
            Err(ParseError::TrailingCharacters(")".into()))
        );
    }

    #[test]
    fn non_ascii_argument_text_survives() {
        let parsed = parse_command("gotoDest(chapitre_été)").unwrap();
        assert_eq!(parsed.args, vec!["chapitre_été"]);
    }
}
