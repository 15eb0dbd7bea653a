//! TokenList (classList)
//!
//! Ordered, duplicate-free class tokens, plus a prefix view used for
//! state markers such as `is-open`.

/// Space-separated token list backing an element's `class` attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<String>,
}

impl TokenList {
    /// Create empty token list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from whitespace-separated string, dropping duplicates
    pub fn from_string(s: &str) -> Self {
        let mut list = Self::new();
        for token in s.split_whitespace() {
            list.push(token);
        }
        list
    }

    /// Tokens may not be empty or contain whitespace
    pub fn is_valid_token(token: &str) -> bool {
        !token.is_empty() && !token.contains(|c: char| c.is_ascii_whitespace())
    }

    fn push(&mut self, token: &str) {
        if Self::is_valid_token(token) && !self.contains(token) {
            self.tokens.push(token.to_string());
        }
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token at index
    pub fn item(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(|s| s.as_str())
    }

    /// Check if token exists
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Add token(s) at the end
    pub fn add(&mut self, tokens: &[&str]) {
        for token in tokens {
            self.push(token);
        }
    }

    /// Remove token(s)
    pub fn remove(&mut self, tokens: &[&str]) {
        self.tokens.retain(|t| !tokens.contains(&t.as_str()));
    }

    /// Toggle token, returns new state
    pub fn toggle(&mut self, token: &str, force: Option<bool>) -> bool {
        if force.unwrap_or(!self.contains(token)) {
            self.push(token);
        } else {
            self.remove(&[token]);
        }
        self.contains(token)
    }

    /// Names of all tokens starting with `prefix`, with the prefix stripped.
    ///
    /// A token equal to the bare prefix carries no name and is skipped.
    pub fn prefixed<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.tokens.iter()
            .filter_map(move |t| t.strip_prefix(prefix))
            .filter(|name| !name.is_empty())
    }

    /// Replace every `prefix`ed token with `prefix + name` for each of
    /// `names`, appended after the untouched tokens.
    ///
    /// Tokens without the prefix keep their relative order. Empty names and
    /// names that would split into several tokens are skipped.
    pub fn replace_prefixed<'n, I>(&mut self, prefix: &str, names: I)
    where
        I: IntoIterator<Item = &'n str>,
    {
        self.tokens.retain(|t| !t.starts_with(prefix));
        for name in names.into_iter().filter(|name| Self::is_valid_token(name)) {
            let token = format!("{prefix}{name}");
            self.push(&token);
        }
    }

    /// Serialized value
    pub fn value(&self) -> String {
        self.tokens.join(" ")
    }

    /// Replace contents from a string
    pub fn set_value(&mut self, value: &str) {
        *self = Self::from_string(value);
    }

    /// Iterate over tokens
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|s| s.as_str())
    }
}

impl std::fmt::Display for TokenList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}
