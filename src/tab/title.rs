//! Tab title resolution.

use navdeck_config::Config;

/// Uppercase the first character, leave the rest untouched.
pub fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Resolves the label of a newly opened tab.
///
/// Fallback chain: matched route title, then the last path segment
/// capitalized (the parent segment when the last one is `index`), then the
/// home label for `/` and the home path, then the untitled label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleResolver {
    home_path: String,
    home_label: String,
    untitled_label: String,
}

impl TitleResolver {
    pub fn new(
        home_path: impl Into<String>,
        home_label: impl Into<String>,
        untitled_label: impl Into<String>,
    ) -> Self {
        Self {
            home_path: home_path.into(),
            home_label: home_label.into(),
            untitled_label: untitled_label.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.home_path.clone(),
            config.home_label.clone(),
            config.untitled_label.clone(),
        )
    }

    pub fn home_path(&self) -> &str {
        &self.home_path
    }

    pub fn home_label(&self) -> &str {
        &self.home_label
    }

    pub fn resolve(&self, path: &str, route_title: Option<&str>) -> String {
        if let Some(title) = route_title.map(str::trim).filter(|t| !t.is_empty()) {
            return title.to_string();
        }

        if path == "/" || path == self.home_path {
            return self.home_label.clone();
        }

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => self.untitled_label.clone(),
            [.., parent, "index"] => capitalize(parent),
            [.., last] => capitalize(last),
        }
    }
}

impl Default for TitleResolver {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
