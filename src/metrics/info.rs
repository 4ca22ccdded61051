//! `INFO` report lookup.

/// Server status report as returned by `INFO`.
///
/// The body is a list of `name:value` lines separated by `\r\n`, with
/// `# Section` headers and blank lines in between.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoReport {
    text: String,
}

impl InfoReport {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Decode a raw bulk body. Invalid UTF-8 is replaced, not rejected.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(String::from_utf8_lossy(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Raw values of every line starting with `name:`, in report order.
    ///
    /// A value runs up to the next `:` and is trimmed. Duplicate lines are
    /// all returned.
    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.text.split('\n').filter_map(move |line| {
            let rest = line.strip_prefix(name)?.strip_prefix(':')?;
            let value = rest.split(':').next().unwrap_or(rest);
            Some(value.trim())
        })
    }
}
