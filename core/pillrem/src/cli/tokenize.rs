//! シェル入力行を引数列に分割する
//!
//! POSIX シェルの規則（shell_words）に従う。語頭の `#` 以降はコメントになるので、
//! 色指定は `primaryColor=#336699` か引用符で囲んで渡す。

use common::error::Error;

pub fn tokenize(line: &str) -> Result<Vec<String>, Error> {
    shell_words::split(line).map_err(|e| Error::invalid_argument(format!("Cannot parse input: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_words() {
        assert_eq!(tokenize("  add morning  Aspirin ").unwrap(), vec!["add", "morning", "Aspirin"]);
        assert!(tokenize("   ").unwrap().is_empty());
    }

    #[test]
    fn test_quotes() {
        assert_eq!(
            tokenize(r#"add evening "Vitamin D" 21:00"#).unwrap(),
            vec!["add", "evening", "Vitamin D", "21:00"]
        );
        assert_eq!(
            tokenize(r#"edit 5 name='Fish "oil"'"#).unwrap(),
            vec!["edit", "5", r#"name=Fish "oil""#]
        );
        assert_eq!(tokenize(r#"x "" y"#).unwrap(), vec!["x", "", "y"]);
        assert_eq!(tokenize(r#"say "a \"b\" c""#).unwrap(), vec!["say", r#"a "b" c"#]);
    }

    #[test]
    fn test_backslash_outside_quotes() {
        assert_eq!(tokenize(r"add morning Vitamin\ C").unwrap(), vec!["add", "morning", "Vitamin C"]);
    }

    #[test]
    fn test_unterminated_quote_is_usage_error() {
        let err = tokenize("add morning \"Aspirin").unwrap_err();
        assert!(err.is_usage());
        assert!(tokenize("x 'y").is_err());
    }

    #[test]
    fn test_hash_word_starts_comment() {
        assert_eq!(tokenize("set primaryColor #336699").unwrap(), vec!["set", "primaryColor"]);
        assert_eq!(
            tokenize("set primaryColor '#336699'").unwrap(),
            vec!["set", "primaryColor", "#336699"]
        );
        assert_eq!(tokenize("set primaryColor=#336699").unwrap(), vec!["set", "primaryColor=#336699"]);
    }
}
