/// Extra headers merged into an upload request, e.g. the content type.
///
/// Later entries with the same name replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileOptions {
    headers: Vec<(String, String)>,
}

impl FileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an arbitrary header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into().to_ascii_lowercase();
        self.headers.retain(|(n, _)| *n != name);
        self.headers.push((name, value.into()));
        self
    }

    pub fn content_type(self, value: &str) -> Self {
        self.header("content-type", value)
    }

    pub fn cache_control(self, value: &str) -> Self {
        self.header("cache-control", value)
    }

    /// Overwrite an existing object instead of failing with a conflict.
    pub fn upsert(self, value: bool) -> Self {
        self.header("x-upsert", if value { "true" } else { "false" })
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FileOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |opts, (k, v)| opts.header(k, v))
    }
}
