use std::fmt;

/// Where an unterminated quote opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizeError {
    pub index: usize,
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unterminated quote at position {}", self.index + 1)
    }
}

impl std::error::Error for TokenizeError {}

/// Split a wire line on runs of whitespace. A double-quoted stretch may hold
/// whitespace and comes back with the quotes stripped; `""` is an empty token.
///
/// # Errors
///
/// Will return `Err` if a quote is never closed
pub fn tokenize(input: &str) -> Result<Vec<String>, TokenizeError> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;
    let mut open_index = 0usize;
    for (index, ch) in input.char_indices() {
        if quoted {
            if ch == '"' {
                quoted = false;
            } else {
                current.push(ch);
            }
            continue;
        }

        if ch == '"' {
            quoted = true;
            in_token = true;
            open_index = index;
            continue;
        }

        if ch.is_whitespace() {
            if in_token {
                items.push(std::mem::take(&mut current));
                in_token = false;
            }
            continue;
        }

        current.push(ch);
        in_token = true;
    }

    if quoted {
        return Err(TokenizeError { index: open_index });
    }

    if in_token {
        items.push(current);
    }
    Ok(items)
}

/// Quote a token that would not survive [`tokenize`] bare. The line format has
/// no escape, so an embedded double quote becomes a single quote.
#[must_use]
pub fn add_quotes(text: &str) -> String {
    let text = if text.contains('"') {
        text.replace('"', "'")
    } else {
        text.to_string()
    };
    if text.is_empty() || text.chars().any(char::is_whitespace) {
        format!("\"{text}\"")
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_plain() {
        let tokens = tokenize("4 4  3\t5").unwrap();
        assert_eq!(tokens, vec!["4", "4", "3", "5"]);
    }

    #[test]
    fn test_tokenize_quoted() {
        let tokens = tokenize(r#""Pine Valley" 72 "" x"#).unwrap();
        assert_eq!(tokens, vec!["Pine Valley", "72", "", "x"]);
    }

    #[test]
    fn test_tokenize_unterminated() {
        let err = tokenize(r#"1 2 "Blue tees"#).unwrap_err();
        assert_eq!(err.index, 4);
    }

    #[test]
    fn test_tokenize_blank_line() {
        assert!(tokenize("   ").unwrap().is_empty());
    }

    #[test]
    fn test_add_quotes() {
        assert_eq!(add_quotes("412"), "412");
        assert_eq!(add_quotes("Blue Tees"), "\"Blue Tees\"");
        assert_eq!(add_quotes(""), "\"\"");
        assert_eq!(add_quotes("say \"hi\""), "\"say 'hi'\"");
    }

    #[test]
    fn test_add_quotes_survives_tokenize() {
        let line = ["Back Tees", "", "7"]
            .iter()
            .map(|t| add_quotes(t))
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(tokenize(&line).unwrap(), vec!["Back Tees", "", "7"]);
    }
}
