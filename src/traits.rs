//! Seams between the navigation core and its host.

/// Side channel used whenever the active tab changes in a way that requires
/// the displayed page to change.
///
/// The host's router implements this; the core never assumes the request
/// succeeded. Closures taking `&str` implement it too.
pub trait Navigator {
    fn navigate(&mut self, path: &str);
}

impl<F> Navigator for F
where
    F: FnMut(&str),
{
    fn navigate(&mut self, path: &str) {
        self(path)
    }
}

/// Navigator that only records requested paths, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingNavigator {
    pub history: Vec<String>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    /// Take the recorded paths, leaving the history empty.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.history)
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, path: &str) {
        log::trace!("navigate -> {}", path);
        self.history.push(path.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_navigator_keeps_order() {
        let mut nav = RecordingNavigator::new();
        nav.navigate("/a");
        nav.navigate("/b");
        assert_eq!(nav.last(), Some("/b"));
        assert_eq!(nav.drain(), vec!["/a".to_string(), "/b".to_string()]);
        assert!(nav.history.is_empty());
    }

    #[test]
    fn closures_are_navigators() {
        let mut seen = Vec::new();
        {
            let mut nav = |path: &str| seen.push(path.to_uppercase());
            nav.navigate("/x");
        }
        assert_eq!(seen, vec!["/X".to_string()]);
    }
}
