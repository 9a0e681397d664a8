//! Component registry and document assembler
//!
//! The registry owns the ordered component list. Every successful mutation
//! re-sorts the list into display order, regenerates the index component and
//! notifies subscribers with a single [`RegistryEvent`]. Failed mutations
//! leave the list untouched and notify nobody.
//!
//! Display order is pinned components first, then ascending `order` within
//! each group. After sorting, `order` is rewritten to the position in the
//! merged sequence, so pinned and unpinned components share one scale.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use super::component::{Component, ComponentConfig, ComponentUpdate, NewComponent, INDEX_NAME};
use super::error::{BoundaryReason, RegistryError};

/// Fixed text at the top of the index component
pub const INDEX_PREAMBLE: &str = "RWI INDEX\n\
This document is assembled from the components listed below. Each entry gives \
the component name, the delimiters that wrap it, and what it contains.";

/// Direction of a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _ => Err(format!("Unknown direction: {} (expected 'up' or 'down')", s)),
        }
    }
}

/// Change notification emitted after a successful mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    Added(String),
    Updated(String),
    Removed(String),
    ActiveChanged { name: String, active: bool },
    PinChanged { name: String, pinned: bool },
    Moved { name: String, direction: Direction },
    Loaded { count: usize },
}

impl fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryEvent::Added(name) => write!(f, "added {}", name),
            RegistryEvent::Updated(name) => write!(f, "updated {}", name),
            RegistryEvent::Removed(name) => write!(f, "removed {}", name),
            RegistryEvent::ActiveChanged { name, active } => {
                write!(f, "{} {}", if *active { "enabled" } else { "disabled" }, name)
            }
            RegistryEvent::PinChanged { name, pinned } => {
                write!(f, "{} {}", if *pinned { "pinned" } else { "unpinned" }, name)
            }
            RegistryEvent::Moved { name, direction } => write!(f, "moved {} {}", name, direction),
            RegistryEvent::Loaded { count } => write!(f, "loaded {} components", count),
        }
    }
}

/// An active block whose content contains a delimiter of an active block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    /// Component whose content contains the delimiter
    pub component: String,

    /// The delimiter found in the content
    pub delimiter: String,

    /// Component that owns the delimiter
    pub owner: String,
}

type Listener = Box<dyn FnMut(&RegistryEvent)>;

/// Ordered collection of components with one distinguished index component
pub struct Registry {
    /// Kept in display order
    components: Vec<Component>,
    index_name: String,
    selected: Option<String>,
    listeners: Vec<Listener>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("components", &self.components)
            .field("index_name", &self.index_name)
            .field("selected", &self.selected)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Registry {
    /// Creates a registry holding only the default index component
    pub fn new() -> Self {
        Self::with_index(INDEX_NAME)
    }

    /// Creates a registry holding only an index component with the given name
    pub fn with_index(index_name: impl Into<String>) -> Self {
        let index_name = index_name.into();
        let mut registry = Self {
            components: vec![Component::index(index_name.clone())],
            index_name: index_name.clone(),
            selected: Some(index_name),
            listeners: Vec::new(),
        };
        registry.regenerate_index();
        registry
    }

    /// Registers a listener called after every successful mutation
    pub fn subscribe(&mut self, listener: impl FnMut(&RegistryEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Returns the components in display order
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the name of the index component
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Returns the index component
    pub fn index(&self) -> Option<&Component> {
        self.get(&self.index_name)
    }

    pub fn active_count(&self) -> usize {
        self.components.iter().filter(|c| c.active).count()
    }

    /// Returns the selected component name, if any
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Selects a component for subsequent moves
    pub fn select(&mut self, name: &str) -> Result<(), RegistryError> {
        if !self.contains(name) {
            return Err(RegistryError::NotFound(name.to_string()));
        }
        self.selected = Some(name.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Adds a new active, unpinned component at the end of the list
    pub fn add(&mut self, input: NewComponent) -> Result<Component, RegistryError> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(RegistryError::BlankName);
        }
        if self.contains(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        let component = Component {
            name: name.clone(),
            pinned: false,
            active: true,
            order: self.components.len(),
            config: ComponentConfig {
                begin_bracket: input.begin_bracket,
                end_bracket: input.end_bracket,
                rwi_text: input.rwi_text,
            },
            content: input.content,
        };

        self.components.push(component.clone());
        self.commit(RegistryEvent::Added(name));
        Ok(component)
    }

    /// Applies a partial update to a component's delimiters, description or content
    ///
    /// Returns whether any field changed. The index is regenerated either way.
    pub fn update(
        &mut self,
        name: &str,
        update: &ComponentUpdate,
    ) -> Result<bool, RegistryError> {
        if name == self.index_name && update.content.is_some() {
            return Err(RegistryError::ProtectedComponent(
                name.to_string(),
                "its content is generated",
            ));
        }

        let changed = self.find_mut(name)?.apply(update);

        self.commit(RegistryEvent::Updated(name.to_string()));
        Ok(changed)
    }

    /// Removes a component; the index component cannot be removed
    pub fn delete(&mut self, name: &str) -> Result<(), RegistryError> {
        if name == self.index_name {
            return Err(RegistryError::ProtectedComponent(
                name.to_string(),
                "the index cannot be deleted",
            ));
        }

        let pos = self.position(name)?;
        self.components.remove(pos);

        if self.selected.as_deref() == Some(name) {
            self.selected = None;
        }

        self.commit(RegistryEvent::Removed(name.to_string()));
        Ok(())
    }

    /// Sets whether a component is assembled and indexed
    pub fn set_active(&mut self, name: &str, active: bool) -> Result<(), RegistryError> {
        self.find_mut(name)?.active = active;
        self.commit(RegistryEvent::ActiveChanged {
            name: name.to_string(),
            active,
        });
        Ok(())
    }

    /// Sets whether a component is pinned; the index component stays pinned
    pub fn set_pinned(&mut self, name: &str, pinned: bool) -> Result<(), RegistryError> {
        if name == self.index_name && !pinned {
            return Err(RegistryError::ProtectedComponent(
                name.to_string(),
                "the index must stay pinned",
            ));
        }

        self.find_mut(name)?.pinned = pinned;
        self.commit(RegistryEvent::PinChanged {
            name: name.to_string(),
            pinned,
        });
        Ok(())
    }

    /// Selects a component and moves it one slot
    pub fn move_component(
        &mut self,
        name: &str,
        direction: Direction,
    ) -> Result<(), RegistryError> {
        self.select(name)?;
        self.move_selected(direction)
    }

    /// Swaps the selected component's order with its neighbor
    ///
    /// Refused with [`RegistryError::Boundary`] when nothing is selected, the
    /// selection is pinned, the neighbor slot does not exist, or the neighbor
    /// is pinned.
    pub fn move_selected(&mut self, direction: Direction) -> Result<(), RegistryError> {
        let name = self
            .selected
            .clone()
            .ok_or(RegistryError::Boundary(BoundaryReason::NoSelection))?;

        if name == self.index_name {
            return Err(RegistryError::ProtectedComponent(
                name,
                "the index cannot be reordered",
            ));
        }

        self.render();
        let pos = self
            .components
            .iter()
            .position(|c| c.name == name)
            .ok_or(RegistryError::Boundary(BoundaryReason::NoSelection))?;

        if self.components[pos].pinned {
            return Err(RegistryError::Boundary(BoundaryReason::Pinned));
        }

        let target = match direction {
            Direction::Up => pos.checked_sub(1),
            Direction::Down => Some(pos + 1).filter(|t| *t < self.components.len()),
        }
        .ok_or(RegistryError::Boundary(BoundaryReason::OutOfBounds))?;

        if self.components[target].pinned {
            return Err(RegistryError::Boundary(BoundaryReason::PinnedNeighbor));
        }

        let order = self.components[pos].order;
        self.components[pos].order = self.components[target].order;
        self.components[target].order = order;

        self.commit(RegistryEvent::Moved { name, direction });
        Ok(())
    }

    /// Sorts into display order and renumbers `order` positionally
    pub fn render(&mut self) -> &[Component] {
        self.components.sort_by_key(|c| (!c.pinned, c.order));
        for (position, component) in self.components.iter_mut().enumerate() {
            component.order = position;
        }
        &self.components
    }

    /// Rebuilds the index component's content from the other active components
    pub fn regenerate_index(&mut self) {
        let content = self.index_content();
        let index_name = self.index_name.clone();
        if let Some(index) = self.components.iter_mut().find(|c| c.name == index_name) {
            index.content = content;
        }
    }

    fn index_content(&self) -> String {
        let mut content = INDEX_PREAMBLE.to_string();
        for component in self
            .components
            .iter()
            .filter(|c| c.active && c.name != self.index_name)
        {
            content.push('\n');
            content.push_str(&component.index_entry());
        }
        content
    }

    /// Concatenates the active components into one document
    ///
    /// Content is emitted verbatim; see [`Registry::collisions`] for
    /// detecting content that contains a delimiter.
    pub fn assemble(&self) -> String {
        let mut document = String::new();
        for component in self.components.iter().filter(|c| c.active) {
            document.push_str(&component.block());
            document.push_str("\n\n");
        }
        document
    }

    /// Lists active contents that contain an active component's delimiter
    ///
    /// The index quotes every delimiter by construction, so its content is
    /// not checked.
    pub fn collisions(&self) -> Vec<Collision> {
        let active: Vec<_> = self.components.iter().filter(|c| c.active).collect();
        let mut collisions = Vec::new();

        for component in active.iter().filter(|c| c.name != self.index_name) {
            for owner in &active {
                for delimiter in [&owner.config.begin_bracket, &owner.config.end_bracket] {
                    if delimiter.is_empty() || !component.content.contains(delimiter.as_str()) {
                        continue;
                    }
                    let collision = Collision {
                        component: component.name.clone(),
                        delimiter: delimiter.clone(),
                        owner: owner.name.clone(),
                    };
                    if !collisions.contains(&collision) {
                        collisions.push(collision);
                    }
                }
            }
        }

        collisions
    }

    /// Serializes the full component list as a JSON array
    pub fn serialize(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.components)
    }

    /// Replaces the whole registry from a serialized component list
    ///
    /// Nothing changes unless the blob parses completely.
    pub fn deserialize(&mut self, blob: &str) -> Result<(), RegistryError> {
        let value: serde_json::Value = serde_json::from_str(blob)
            .map_err(|e| RegistryError::Format(format!("malformed JSON: {}", e)))?;

        let records = value
            .as_array()
            .ok_or_else(|| RegistryError::Format("expected an array of components".to_string()))?;

        if records.is_empty() {
            return Err(RegistryError::Format(
                "snapshot contains no components".to_string(),
            ));
        }

        let mut components = Vec::with_capacity(records.len());
        let mut names = HashSet::new();

        for (i, record) in records.iter().enumerate() {
            let component: Component = serde_json::from_value(record.clone())
                .map_err(|e| RegistryError::Format(format!("record {}: {}", i, e)))?;

            if component.name.trim().is_empty() {
                return Err(RegistryError::Format(format!("record {}: empty name", i)));
            }
            if !names.insert(component.name.clone()) {
                return Err(RegistryError::Format(format!(
                    "record {}: duplicate name '{}'",
                    i, component.name
                )));
            }

            components.push(component);
        }

        // The configured index if present, otherwise the first record
        let index_pos = components
            .iter()
            .position(|c| c.name == self.index_name)
            .unwrap_or(0);
        components[index_pos].pinned = true;

        let count = components.len();
        self.index_name = components[index_pos].name.clone();
        self.selected = Some(self.index_name.clone());
        self.components = components;

        self.commit(RegistryEvent::Loaded { count });
        Ok(())
    }

    fn position(&self, name: &str) -> Result<usize, RegistryError> {
        self.components
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    fn find_mut(&mut self, name: &str) -> Result<&mut Component, RegistryError> {
        self.components
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    fn commit(&mut self, event: RegistryEvent) {
        self.render();
        self.regenerate_index();
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::component::{INDEX_BEGIN, INDEX_END};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn block(name: &str, begin: &str, end: &str, content: &str) -> NewComponent {
        NewComponent::new(name)
            .brackets(begin, end)
            .description(format!("{} block", name))
            .content(content)
    }

    /// Index plus `a`, `b`, `c` in that order
    fn registry_abc() -> Registry {
        let mut registry = Registry::new();
        for name in ["a", "b", "c"] {
            registry
                .add(block(name, &format!("<{}>", name), &format!("</{}>", name), name))
                .unwrap();
        }
        registry
    }

    fn names(registry: &Registry) -> Vec<&str> {
        registry.components().iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn new_registry_has_index() {
        let registry = Registry::new();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.index_name(), "rwi");
        let index = registry.index().unwrap();
        assert!(index.pinned);
        assert_eq!(index.content, INDEX_PREAMBLE);
    }

    #[test]
    fn add_appends_active_unpinned() {
        let mut registry = Registry::new();
        let added = registry.add(block("a", "B1", "E1", "X")).unwrap();

        assert!(added.active);
        assert!(!added.pinned);
        assert_eq!(added.order, 1);
        assert_eq!(names(&registry), vec!["rwi", "a"]);
        assert!(registry
            .index()
            .unwrap()
            .content
            .contains("- a: [B1]...[E1] a block"));
    }

    #[test]
    fn add_rejects_duplicate_and_blank_names() {
        let mut registry = registry_abc();

        assert_eq!(
            registry.add(block("a", "", "", "")),
            Err(RegistryError::DuplicateName("a".to_string()))
        );
        assert_eq!(registry.add(block("   ", "", "", "")), Err(RegistryError::BlankName));
        assert_eq!(
            registry.add(block("rwi", "", "", "")),
            Err(RegistryError::DuplicateName("rwi".to_string()))
        );
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut registry = registry_abc();
        assert!(registry.add(block("A", "", "", "")).is_ok());
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn update_changes_fields_and_index() {
        let mut registry = registry_abc();
        let update = ComponentUpdate {
            rwi_text: Some("renamed".to_string()),
            content: Some("new body".to_string()),
            ..Default::default()
        };

        assert!(registry.update("b", &update).unwrap());

        let b = registry.get("b").unwrap();
        assert_eq!(b.content, "new body");
        assert_eq!(b.config.begin_bracket, "<b>");
        assert!(registry.index().unwrap().content.contains("- b: [<b>]...[</b>] renamed"));
    }

    #[test]
    fn update_with_current_values_reports_no_change() {
        let mut registry = registry_abc();
        let update = ComponentUpdate {
            begin_bracket: Some("<b>".to_string()),
            ..Default::default()
        };
        let before = registry.components().to_vec();

        assert!(!registry.update("b", &update).unwrap());
        assert_eq!(registry.components(), before.as_slice());
    }

    #[test]
    fn update_missing_fails() {
        let mut registry = registry_abc();
        assert_eq!(
            registry.update("zzz", &ComponentUpdate::default()),
            Err(RegistryError::NotFound("zzz".to_string()))
        );
    }

    #[test]
    fn index_content_cannot_be_edited() {
        let mut registry = registry_abc();
        let update = ComponentUpdate {
            content: Some("hand written".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            registry.update("rwi", &update),
            Err(RegistryError::ProtectedComponent(_, _))
        ));

        let update = ComponentUpdate {
            begin_bracket: Some("[[INDEX]]".to_string()),
            ..Default::default()
        };
        assert!(registry.update("rwi", &update).unwrap());
        assert_eq!(registry.index().unwrap().config.begin_bracket, "[[INDEX]]");
    }

    #[test]
    fn delete_removes_and_clears_selection() {
        let mut registry = registry_abc();
        registry.select("b").unwrap();

        registry.delete("b").unwrap();

        assert_eq!(names(&registry), vec!["rwi", "a", "c"]);
        assert_eq!(registry.selected(), None);
        assert!(!registry.index().unwrap().content.contains("- b:"));
        let orders: Vec<_> = registry.components().iter().map(|c| c.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn delete_keeps_other_selection() {
        let mut registry = registry_abc();
        registry.select("a").unwrap();
        registry.delete("b").unwrap();
        assert_eq!(registry.selected(), Some("a"));
    }

    #[test]
    fn delete_index_fails_and_changes_nothing() {
        let mut registry = registry_abc();
        let before = registry.components().to_vec();

        assert!(matches!(
            registry.delete("rwi"),
            Err(RegistryError::ProtectedComponent(_, _))
        ));
        assert_eq!(registry.components(), before.as_slice());
    }

    #[test]
    fn delete_missing_fails() {
        let mut registry = registry_abc();
        assert_eq!(
            registry.delete("zzz"),
            Err(RegistryError::NotFound("zzz".to_string()))
        );
    }

    #[test]
    fn deactivate_removes_only_that_index_line() {
        let mut registry = registry_abc();
        let before = registry.index().unwrap().content.clone();
        let a_before = registry.get("a").unwrap().clone();

        registry.set_active("b", false).unwrap();

        let after = registry.index().unwrap().content.clone();
        let removed: Vec<_> = before.lines().filter(|l| !after.lines().any(|a| a == *l)).collect();
        assert_eq!(removed, vec!["- b: [<b>]...[</b>] b block"]);
        assert_eq!(after.lines().count(), before.lines().count() - 1);

        let b = registry.get("b").unwrap();
        assert!(!b.active);
        assert_eq!(b.content, "b");
        assert_eq!(registry.get("a").unwrap(), &a_before);
    }

    #[test]
    fn pinning_sorts_first() {
        let mut registry = registry_abc();

        registry.set_pinned("c", true).unwrap();
        assert_eq!(names(&registry), vec!["rwi", "c", "a", "b"]);

        registry.set_pinned("c", false).unwrap();
        assert_eq!(names(&registry), vec!["rwi", "c", "a", "b"]);
        assert!(!registry.get("c").unwrap().pinned);

        let orders: Vec<_> = registry.components().iter().map(|c| c.order).collect();
        assert_eq!(orders, vec![0, 1, 2, 3]);
    }

    #[test]
    fn pinning_reorders_index_entries() {
        let mut registry = registry_abc();
        registry.set_pinned("c", true).unwrap();

        let content = &registry.index().unwrap().content;
        let c_line = content.find("- c:").unwrap();
        let a_line = content.find("- a:").unwrap();
        assert!(c_line < a_line);
    }

    #[test]
    fn index_cannot_be_unpinned() {
        let mut registry = registry_abc();
        assert!(matches!(
            registry.set_pinned("rwi", false),
            Err(RegistryError::ProtectedComponent(_, _))
        ));
        assert!(registry.index().unwrap().pinned);
    }

    #[test]
    fn render_sorts_by_pin_then_order() {
        let mut registry = Registry::new();
        let blob = r#"[
            {"name":"x","pinned":false,"active":true,"order":7,
             "config":{"begin_bracket":"","end_bracket":"","rwi_text":""},
             "content":""},
            {"name":"rwi","pinned":true,"active":true,"order":3,
             "config":{"begin_bracket":"","end_bracket":"","rwi_text":""},
             "content":""},
            {"name":"y","pinned":false,"active":true,"order":2,
             "config":{"begin_bracket":"","end_bracket":"","rwi_text":""},
             "content":""},
            {"name":"p","pinned":true,"active":true,"order":9,
             "config":{"begin_bracket":"","end_bracket":"","rwi_text":""},
             "content":""}
        ]"#;
        registry.deserialize(blob).unwrap();

        let rendered: Vec<_> = registry
            .render()
            .iter()
            .map(|c| (c.name.as_str(), c.order))
            .collect();
        assert_eq!(rendered, vec![("rwi", 0), ("p", 1), ("y", 2), ("x", 3)]);
    }

    #[test]
    fn move_swaps_with_neighbor() {
        let mut registry = registry_abc();

        registry.move_component("c", Direction::Up).unwrap();
        assert_eq!(names(&registry), vec!["rwi", "a", "c", "b"]);
        assert_eq!(registry.selected(), Some("c"));
        assert!(!registry.get("c").unwrap().pinned);

        registry.move_selected(Direction::Up).unwrap();
        assert_eq!(names(&registry), vec!["rwi", "c", "a", "b"]);
    }

    #[test]
    fn move_refuses_at_boundaries() {
        let mut registry = registry_abc();

        assert_eq!(
            registry.move_component("c", Direction::Down),
            Err(RegistryError::Boundary(BoundaryReason::OutOfBounds))
        );
        assert_eq!(
            registry.move_component("a", Direction::Up),
            Err(RegistryError::Boundary(BoundaryReason::PinnedNeighbor))
        );

        registry.set_pinned("b", true).unwrap();
        assert_eq!(
            registry.move_component("b", Direction::Down),
            Err(RegistryError::Boundary(BoundaryReason::Pinned))
        );
        assert_eq!(names(&registry), vec!["rwi", "b", "a", "c"]);
    }

    #[test]
    fn move_without_selection() {
        let mut registry = registry_abc();
        registry.clear_selection();
        assert_eq!(
            registry.move_selected(Direction::Up),
            Err(RegistryError::Boundary(BoundaryReason::NoSelection))
        );
    }

    #[test]
    fn move_index_is_protected() {
        let mut registry = registry_abc();
        assert!(matches!(
            registry.move_component("rwi", Direction::Down),
            Err(RegistryError::ProtectedComponent(_, _))
        ));
    }

    #[test]
    fn move_missing_fails() {
        let mut registry = registry_abc();
        assert_eq!(
            registry.move_component("zzz", Direction::Up),
            Err(RegistryError::NotFound("zzz".to_string()))
        );
    }

    #[test]
    fn assemble_scenario() {
        let mut registry = Registry::new();
        registry
            .add(NewComponent::new("a").brackets("B1", "E1").content("X"))
            .unwrap();

        let document = registry.assemble();
        let index = registry.index().unwrap();
        let index_block = format!("{}\n{}\n{}\n\n", INDEX_BEGIN, index.content, INDEX_END);
        assert!(document.starts_with(&index_block));
        assert!(document.ends_with("B1\nX\nE1\n\n"));
        assert!(index.content.contains("- a: [B1]...[E1]"));

        registry.set_active("a", false).unwrap();
        let document = registry.assemble();
        assert!(!document.contains("B1"));
        assert!(!document.contains("E1"));
        assert!(!document.contains("\nX\n"));
        assert!(!registry.index().unwrap().content.contains("- a:"));
    }

    #[test]
    fn assemble_contains_every_active_block_in_order() {
        let mut registry = registry_abc();
        registry.set_active("b", false).unwrap();
        let document = registry.assemble();

        let a = document.find("<a>\na\n</a>").unwrap();
        let c = document.find("<c>\nc\n</c>").unwrap();
        assert!(a < c);
        assert!(!document.contains("<b>"));
    }

    #[test]
    fn assemble_is_verbatim_on_collision() {
        let mut registry = Registry::new();
        registry
            .add(NewComponent::new("a").brackets("<a>", "</a>").content("oops </a> inside"))
            .unwrap();

        assert!(registry.assemble().contains("<a>\noops </a> inside\n</a>\n\n"));

        let collisions = registry.collisions();
        assert_eq!(
            collisions,
            vec![Collision {
                component: "a".to_string(),
                delimiter: "</a>".to_string(),
                owner: "a".to_string(),
            }]
        );
    }

    #[test]
    fn index_content_is_not_a_collision() {
        let registry = registry_abc();
        assert!(registry.collisions().is_empty());
    }

    #[test]
    fn collisions_ignore_inactive_blocks() {
        let mut registry = Registry::new();
        registry
            .add(NewComponent::new("a").brackets("<a>", "</a>").content("mentions <b>"))
            .unwrap();
        registry
            .add(NewComponent::new("b").brackets("<b>", "</b>").content("fine"))
            .unwrap();
        assert_eq!(registry.collisions().len(), 1);

        registry.set_active("b", false).unwrap();
        assert!(registry.collisions().is_empty());
    }

    #[test]
    fn serialize_then_load_restores_list() {
        let mut registry = registry_abc();
        registry.set_pinned("b", true).unwrap();
        registry.set_active("c", false).unwrap();
        let blob = registry.serialize().unwrap();

        let mut restored = Registry::new();
        restored.deserialize(&blob).unwrap();

        assert_eq!(restored.components(), registry.components());
        assert_eq!(restored.selected(), Some("rwi"));
    }

    #[test]
    fn deserialize_rejects_non_array() {
        let mut registry = registry_abc();
        let before = registry.components().to_vec();

        let err = registry.deserialize("{not an array}").unwrap_err();
        assert!(matches!(err, RegistryError::Format(_)));

        let err = registry.deserialize(r#"{"name":"a"}"#).unwrap_err();
        assert!(matches!(err, RegistryError::Format(_)));

        assert_eq!(registry.components(), before.as_slice());
    }

    #[test]
    fn deserialize_rejects_malformed_records() {
        let mut registry = registry_abc();
        let before = registry.components().to_vec();

        for blob in [
            "[]",
            r#"[{"name":"a"}]"#,
            r#"[1, 2, 3]"#,
            r#"[
                {"name":"a","pinned":true,"active":true,"order":0,
                 "config":{"begin_bracket":"","end_bracket":"","rwi_text":""},
                 "content":""},
                {"name":"a","pinned":false,"active":true,"order":1,
                 "config":{"begin_bracket":"","end_bracket":"","rwi_text":""},
                 "content":""}
            ]"#,
        ] {
            let err = registry.deserialize(blob).unwrap_err();
            assert!(matches!(err, RegistryError::Format(_)), "blob: {}", blob);
        }

        assert_eq!(registry.components(), before.as_slice());
    }

    #[test]
    fn deserialize_without_named_index_uses_first() {
        let mut registry = Registry::new();
        let blob = r#"[
            {"name":"summary","pinned":false,"active":true,"order":0,
             "config":{"begin_bracket":"S","end_bracket":"/S","rwi_text":""},
             "content":"stale"},
            {"name":"a","pinned":false,"active":true,"order":1,
             "config":{"begin_bracket":"A","end_bracket":"/A","rwi_text":"alpha"},
             "content":"x"}
        ]"#;

        registry.deserialize(blob).unwrap();

        assert_eq!(registry.index_name(), "summary");
        let index = registry.index().unwrap();
        assert!(index.pinned);
        assert!(index.content.starts_with(INDEX_PREAMBLE));
        assert!(index.content.contains("- a: [A]...[/A] alpha"));
        assert!(registry.delete("summary").is_err());
    }

    #[test]
    fn listeners_receive_one_event_per_mutation() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);

        let mut registry = Registry::new();
        registry.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        registry.add(block("a", "", "", "")).unwrap();
        registry.add(block("b", "", "", "")).unwrap();
        registry.move_component("b", Direction::Up).unwrap();
        registry.set_active("a", false).unwrap();
        let _ = registry.delete("rwi");
        let _ = registry.move_component("b", Direction::Up);

        assert_eq!(
            *events.borrow(),
            vec![
                RegistryEvent::Added("a".to_string()),
                RegistryEvent::Added("b".to_string()),
                RegistryEvent::Moved {
                    name: "b".to_string(),
                    direction: Direction::Up
                },
                RegistryEvent::ActiveChanged {
                    name: "a".to_string(),
                    active: false
                },
            ]
        );
    }

    #[test]
    fn parse_direction() {
        assert_eq!("UP".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("down".parse::<Direction>(), Ok(Direction::Down));
        assert!("left".parse::<Direction>().is_err());
    }
}
