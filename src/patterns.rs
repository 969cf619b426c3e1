use super::*;

/// `fancy_regex` wrapper whose failures surface as crate errors.
#[derive(Debug, Clone)]
pub(crate) struct Pattern {
    backend: fancy_regex::Regex,
}

impl Pattern {
    pub(crate) fn new(pattern: &str) -> Result<Self> {
        let backend = fancy_regex::Regex::new(pattern)?;
        Ok(Self { backend })
    }

    pub(crate) fn is_match(&self, input: &str) -> Result<bool> {
        Ok(self.backend.is_match(input)?)
    }
}

impl From<fancy_regex::Error> for Error {
    fn from(value: fancy_regex::Error) -> Self {
        Self::Pattern(value.to_string())
    }
}

static LANGUAGE_CODE: LazyLock<Result<Pattern>> =
    LazyLock::new(|| Pattern::new(r"^[A-Za-z]{2,3}(?:-[A-Za-z0-9]{1,8})*$"));

// RFC 6265 cookie-name token.
static COOKIE_TOKEN: LazyLock<Result<Pattern>> =
    LazyLock::new(|| Pattern::new(r"^[!#$%&'*+\-.^_`|~0-9A-Za-z]+$"));

static COOKIE_PATH: LazyLock<Result<Pattern>> = LazyLock::new(|| Pattern::new(r"^/[^;,\s]*$"));

fn matches(pattern: &LazyLock<Result<Pattern>>, input: &str) -> Result<bool> {
    match &**pattern {
        Ok(pattern) => pattern.is_match(input),
        Err(err) => Err(err.clone()),
    }
}

/// BCP 47 shaped language code such as `fr`, `en` or `pt-BR`.
pub(crate) fn is_language_code(value: &str) -> Result<bool> {
    matches(&LANGUAGE_CODE, value)
}

pub(crate) fn is_cookie_token(value: &str) -> Result<bool> {
    matches(&COOKIE_TOKEN, value)
}

pub(crate) fn is_cookie_path(value: &str) -> Result<bool> {
    matches(&COOKIE_PATH, value)
}
