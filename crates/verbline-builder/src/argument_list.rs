use serde::Serialize;
use verbline_utils::unquote;

/// Ordered command-line tokens produced for one verb instance.
///
/// Tokens are stored already quoted for a joined command line, so
/// [`to_command_string`](Self::to_command_string) is a plain join. Use
/// [`to_argv`](Self::to_argv) to hand the tokens to a process without a
/// shell.
///
/// # Example
///
/// ```rust
/// use verbline_builder::ArgumentList;
///
/// let args = ArgumentList::new()
///     .arg("run")
///     .flag("image", "\"nginx 1.2\"")
///     .switch("detach");
///
/// assert_eq!(args.to_command_string(), "run --image \"nginx 1.2\" --detach");
/// assert_eq!(args.to_argv()[2], "nginx 1.2");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArgumentList {
    tokens: Vec<String>,
}

impl ArgumentList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single token.
    #[must_use]
    pub fn arg(mut self, token: impl Into<String>) -> Self {
        self.tokens.push(token.into());
        self
    }

    /// Append several tokens.
    #[must_use]
    pub fn args<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens.extend(tokens.into_iter().map(Into::into));
        self
    }

    /// Append `--name value`.
    #[must_use]
    pub fn flag(self, name: &str, value: impl Into<String>) -> Self {
        self.arg(format!("--{name}")).arg(value)
    }

    /// Append `--name` with no value token.
    #[must_use]
    pub fn switch(self, name: &str) -> Self {
        self.arg(format!("--{name}"))
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens joined by single spaces.
    #[must_use]
    pub fn to_command_string(&self) -> String {
        self.tokens.join(" ")
    }

    /// Tokens with quoting removed, one element per process argument.
    #[must_use]
    pub fn to_argv(&self) -> Vec<String> {
        self.tokens.iter().map(|token| unquote(token)).collect()
    }
}

impl IntoIterator for ArgumentList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}
