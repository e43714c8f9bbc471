//! The live document a theme is injected into.

/// Holder of identified style elements.
///
/// Implementations only store what they are given; replacement policy lives
/// in [`crate::apply`].
pub trait StyleHost {
    /// Remove every style element with `id`. Returns whether any existed.
    fn remove_style(&mut self, id: &str) -> bool;

    /// Append a style element.
    fn insert_style(&mut self, id: &str, css: String);

    /// Contents of the first style element with `id`.
    fn style(&self, id: &str) -> Option<&str>;

    /// Number of style elements carrying `id`.
    fn style_count(&self, id: &str) -> usize;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleElement {
    pub id: String,
    pub css: String,
}

/// In-memory document head.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    head: Vec<StyleElement>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn head(&self) -> &[StyleElement] {
        &self.head
    }
}

impl StyleHost for MemoryDocument {
    fn remove_style(&mut self, id: &str) -> bool {
        let before = self.head.len();
        self.head.retain(|element| element.id != id);
        self.head.len() != before
    }

    fn insert_style(&mut self, id: &str, css: String) {
        self.head.push(StyleElement {
            id: id.to_string(),
            css,
        });
    }

    fn style(&self, id: &str) -> Option<&str> {
        self.head
            .iter()
            .find(|element| element.id == id)
            .map(|element| element.css.as_str())
    }

    fn style_count(&self, id: &str) -> usize {
        self.head.iter().filter(|element| element.id == id).count()
    }
}
