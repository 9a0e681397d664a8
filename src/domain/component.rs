//! Component domain model
//!
//! A component is a named block of text wrapped in a pair of delimiters.
//! The serialized field names are the snapshot file format, so renaming a
//! field here breaks every saved `.sns` file.

use serde::{Deserialize, Serialize};

/// Default name of the index component
pub const INDEX_NAME: &str = "rwi";

/// Default delimiters of the index component
pub const INDEX_BEGIN: &str = "###RWI_START###";
pub const INDEX_END: &str = "###RWI_END###";

/// Delimiters and description of a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentConfig {
    /// Emitted on the line before the content
    pub begin_bracket: String,

    /// Emitted on the line after the content
    pub end_bracket: String,

    /// One-line description shown in the index
    pub rwi_text: String,
}

/// A named, orderable content block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Unique, case-sensitive identifier
    pub name: String,

    /// Pinned components sort first and cannot be moved
    pub pinned: bool,

    /// Only active components are assembled and indexed
    pub active: bool,

    /// Position among components with the same pin state
    pub order: usize,

    pub config: ComponentConfig,

    /// Free-form body
    pub content: String,
}

impl Component {
    /// Creates the index component with default delimiters
    pub fn index(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pinned: true,
            active: true,
            order: 0,
            config: ComponentConfig {
                begin_bracket: INDEX_BEGIN.to_string(),
                end_bracket: INDEX_END.to_string(),
                rwi_text: "Index of the active components and their delimiters".to_string(),
            },
            content: String::new(),
        }
    }

    /// Renders the delimited block without the trailing blank line
    pub fn block(&self) -> String {
        format!(
            "{}\n{}\n{}",
            self.config.begin_bracket, self.content, self.config.end_bracket
        )
    }

    /// Renders this component's line in the index
    pub fn index_entry(&self) -> String {
        format!(
            "- {}: [{}]...[{}] {}",
            self.name, self.config.begin_bracket, self.config.end_bracket, self.config.rwi_text
        )
    }

    /// Applies a partial update, returning true if any field changed
    pub fn apply(&mut self, update: &ComponentUpdate) -> bool {
        let mut changed = false;

        if let Some(begin) = &update.begin_bracket {
            changed |= self.config.begin_bracket != *begin;
            self.config.begin_bracket = begin.clone();
        }
        if let Some(end) = &update.end_bracket {
            changed |= self.config.end_bracket != *end;
            self.config.end_bracket = end.clone();
        }
        if let Some(text) = &update.rwi_text {
            changed |= self.config.rwi_text != *text;
            self.config.rwi_text = text.clone();
        }
        if let Some(content) = &update.content {
            changed |= self.content != *content;
            self.content = content.clone();
        }

        changed
    }
}

/// Input for adding a component
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewComponent {
    pub name: String,
    pub begin_bracket: String,
    pub end_bracket: String,
    pub rwi_text: String,
    pub content: String,
}

impl NewComponent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn brackets(mut self, begin: impl Into<String>, end: impl Into<String>) -> Self {
        self.begin_bracket = begin.into();
        self.end_bracket = end.into();
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.rwi_text = text.into();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }
}

/// Partial update of a component's editable fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentUpdate {
    pub begin_bracket: Option<String>,
    pub end_bracket: Option<String>,
    pub rwi_text: Option<String>,
    pub content: Option<String>,
}

impl ComponentUpdate {
    /// Returns true if no field is set
    pub fn is_empty(&self) -> bool {
        self.begin_bracket.is_none()
            && self.end_bracket.is_none()
            && self.rwi_text.is_none()
            && self.content.is_none()
    }
}
