use url::Url;

/// Base used to resolve path-only input such as `/single?rh=50`.
const PLACEHOLDER_BASE: &str = "http://placeholder.invalid/";

/// Query parameters in first-appearance key order, every value of a repeated key kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParams {
    entries: Vec<(String, Vec<String>)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    /// All values for `key`, empty when the key is missing.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    pub fn first(&self, key: &str) -> Option<&str> {
        self.get_all(key).first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    pub path: String,
    pub query_params: QueryParams,
    pub fragment: String,
    pub path_segments: Vec<String>,
}

impl ParsedUrl {
    /// The structure handed out for input that cannot be parsed at all.
    pub fn empty() -> Self {
        Self {
            path: String::new(),
            query_params: QueryParams::new(),
            fragment: String::new(),
            path_segments: split_segments(""),
        }
    }

    fn from_url(url: &Url) -> Self {
        let mut query_params = QueryParams::new();
        for (key, value) in url.query_pairs() {
            // Blank values are dropped, same as form decoding without keep-blank.
            if key.is_empty() || value.is_empty() {
                continue;
            }
            query_params.push(key.into_owned(), value.into_owned());
        }
        let path = url.path().to_string();
        Self {
            path_segments: split_segments(&path),
            path,
            query_params,
            fragment: url.fragment().unwrap_or_default().to_string(),
        }
    }
}

/// Parse a URL into path, segments, query and fragment. Never fails.
pub fn parse_url(raw: &str) -> ParsedUrl {
    let raw = raw.trim();
    match Url::parse(raw) {
        Ok(url) => ParsedUrl::from_url(&url),
        Err(url::ParseError::RelativeUrlWithoutBase) if raw.starts_with('/') => {
            match Url::parse(PLACEHOLDER_BASE).and_then(|base| base.join(raw)) {
                Ok(url) => ParsedUrl::from_url(&url),
                Err(_) => ParsedUrl::empty(),
            }
        }
        Err(_) => ParsedUrl::empty(),
    }
}

fn split_segments(path: &str) -> Vec<String> {
    path.trim_matches('/').split('/').map(ToOwned::to_owned).collect()
}
