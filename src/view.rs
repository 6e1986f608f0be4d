//! Terminal rendering of the result grid and the recipe detail modal,
//! plus the small pieces of view state they need.

use crate::model::Recipe;

/// Scroll offset past which the "scroll to top" affordance is shown
pub const DEFAULT_SCROLL_THRESHOLD: u32 = 300;

/// Keys the detail modal reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
    Escape,
}

impl NavKey {
    /// Line commands accepted by the interactive browser
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "n" | "next" | "right" | "l" => Some(NavKey::Right),
            "p" | "prev" | "previous" | "left" | "h" => Some(NavKey::Left),
            "q" | "esc" | "escape" | "close" => Some(NavKey::Escape),
            _ => None,
        }
    }
}

/// Which recipe the detail modal shows, if any.
///
/// The index is clamped to the result list; stepping past either end is a
/// no-op rather than wrapping around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModalState {
    index: Option<usize>,
}

impl ModalState {
    pub fn current(&self) -> Option<usize> {
        self.index
    }

    pub fn is_open(&self) -> bool {
        self.index.is_some()
    }

    /// Opens at `index` clamped to `[0, len - 1]`; stays closed for an empty list
    pub fn open(&mut self, index: usize, len: usize) {
        self.index = if len == 0 {
            None
        } else {
            Some(index.min(len - 1))
        };
    }

    pub fn close(&mut self) {
        self.index = None;
    }

    pub fn next(&mut self, len: usize) {
        if let Some(index) = self.index {
            if index + 1 < len {
                self.index = Some(index + 1);
            }
        }
    }

    pub fn previous(&mut self) {
        if let Some(index) = self.index {
            self.index = Some(index.saturating_sub(1));
        }
    }

    pub fn has_previous(&self) -> bool {
        matches!(self.index, Some(index) if index > 0)
    }

    pub fn has_next(&self, len: usize) -> bool {
        matches!(self.index, Some(index) if index + 1 < len)
    }

    pub fn handle_key(&mut self, key: NavKey, len: usize) {
        match key {
            NavKey::Left => self.previous(),
            NavKey::Right => self.next(len),
            NavKey::Escape => self.close(),
        }
    }
}

/// Shows a "scroll to top" affordance once the viewport passes a fixed offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollToTop {
    threshold: u32,
    visible: bool,
}

impl Default for ScrollToTop {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_THRESHOLD)
    }
}

impl ScrollToTop {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            visible: false,
        }
    }

    /// Returns the new visibility
    pub fn on_scroll(&mut self, offset: u32) -> bool {
        self.visible = offset > self.threshold;
        self.visible
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

pub fn render_list(recipes: &[Recipe]) -> String {
    if recipes.is_empty() {
        return "No recipes found.\n".to_string();
    }

    let width = recipes.len().to_string().len();
    let mut out = String::new();
    for (i, recipe) in recipes.iter().enumerate() {
        out.push_str(&format!(
            "{:>width$}. {} ({} ingredients)\n",
            i + 1,
            recipe.name,
            recipe.ingredient_count(),
        ));
    }
    out
}

pub fn render_modal(recipes: &[Recipe], modal: &ModalState) -> Option<String> {
    let index = modal.current()?;
    let recipe = recipes.get(index)?;

    let mut out = String::new();
    out.push_str(&format!("[{}/{}] {}\n", index + 1, recipes.len(), recipe.name));
    if !recipe.thumbnail_url.is_empty() {
        out.push_str(&format!("{}\n", recipe.thumbnail_url));
    }

    let meta: Vec<&str> = [recipe.category.as_str(), recipe.area.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if !meta.is_empty() {
        out.push_str(&format!("{}\n", meta.join(" · ")));
    }
    let tags = recipe.tag_list();
    if !tags.is_empty() {
        out.push_str(&format!("Tags: {}\n", tags.join(", ")));
    }

    out.push_str("\nIngredients\n");
    for (measure, ingredient) in recipe.ingredient_lines() {
        if measure.is_empty() {
            out.push_str(&format!("  - {ingredient}\n"));
        } else {
            out.push_str(&format!("  - {measure} {ingredient}\n"));
        }
    }

    out.push_str("\nInstructions\n");
    out.push_str(&format!("{}\n", recipe.instructions.trim()));

    if !recipe.youtube_url.is_empty() {
        out.push_str(&format!("\nVideo: {}\n", recipe.youtube_url));
    }
    if !recipe.source_url.is_empty() {
        out.push_str(&format!("Source: {}\n", recipe.source_url));
    }

    let mut controls = vec!["[q] close"];
    if modal.has_previous() {
        controls.push("[p] previous");
    }
    if modal.has_next(recipes.len()) {
        controls.push("[n] next");
    }
    out.push_str(&format!("\n{}\n", controls.join("  ")));

    Some(out)
}
