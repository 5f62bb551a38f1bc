fn strip_prefix_token_untrimmed<'a>(src: &'a str, search: &str) -> Option<&'a str> {
    src.strip_prefix(search)
        .filter(|src| src.chars().next().is_none_or(<char>::is_whitespace))
}
pub fn strip_prefix_token<'a>(src: &'a str, search: &str) -> Option<&'a str> {
    strip_prefix_token_untrimmed(src, search).map(<str>::trim_start)
}

#[cfg(test)]
mod test {
    use crate::misc::strip_prefix_token;

    #[test]
    fn token_boundaries_are_respected() {
        assert_eq!(strip_prefix_token("automate black", "automate"), Some("black"));
        assert_eq!(strip_prefix_token("automate", "automate"), Some(""));
        assert_eq!(strip_prefix_token("automated", "automate"), None);
        assert_eq!(strip_prefix_token("import  w abc", "import"), Some("w abc"));
    }
}
