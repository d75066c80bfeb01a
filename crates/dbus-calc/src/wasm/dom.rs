//! Mock page for testing the client without a browser
//!
//! Keeps elements by id, the current location, and a history of user events
//! and field writes so tests can assert exactly what the client touched.

use crate::page::{ids, Page};
use std::collections::HashMap;

/// An input element on the mock page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Current value
    pub value: String,
}

impl DomElement {
    /// Creates an empty input with the given ID
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            value: String::new(),
        }
    }
}

/// Events recorded by the mock page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// User typed into a field
    Input {
        /// The ID of the input element
        element_id: String,
        /// The new value entered
        value: String,
    },
    /// Script assigned a field value
    ValueSet {
        /// The ID of the written element
        element_id: String,
        /// The value written
        value: String,
    },
    /// Script replaced the page location
    Navigate {
        /// New location
        location: String,
    },
}

impl DomEvent {
    /// Creates an input event
    #[must_use]
    pub fn input(element_id: &str, value: &str) -> Self {
        Self::Input {
            element_id: element_id.to_string(),
            value: value.to_string(),
        }
    }
}

/// In-memory page implementing [`Page`]
#[derive(Debug)]
pub struct MockPage {
    /// Elements by ID
    elements: HashMap<String, DomElement>,
    /// Current location
    location: String,
    /// Every event, in order
    event_history: Vec<DomEvent>,
}

impl Default for MockPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPage {
    /// Creates an empty page at `/calculator.html`
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: HashMap::new(),
            location: "/calculator.html".to_string(),
            event_history: Vec::new(),
        }
    }

    /// Creates the calculator page: two number inputs and a result field
    #[must_use]
    pub fn calculator() -> Self {
        let mut page = Self::new();
        for id in [ids::NUMBER1, ids::NUMBER2, ids::RESULT] {
            page.elements.insert(id.to_string(), DomElement::new(id));
        }
        page
    }

    /// Creates the calculator page with both operands already typed in
    #[must_use]
    pub fn with_operands(lhs: &str, rhs: &str) -> Self {
        let mut page = Self::calculator();
        page.type_into(ids::NUMBER1, lhs);
        page.type_into(ids::NUMBER2, rhs);
        page
    }

    /// Simulates the user typing into a field
    pub fn type_into(&mut self, id: &str, value: &str) {
        self.event_history.push(DomEvent::input(id, value));
        if let Some(elem) = self.elements.get_mut(id) {
            elem.value = value.to_string();
        }
    }

    /// Current location
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Clears event history
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }

    /// Number of script-driven field writes
    #[must_use]
    pub fn mutation_count(&self) -> usize {
        self.event_history
            .iter()
            .filter(|e| matches!(e, DomEvent::ValueSet { .. }))
            .count()
    }

    /// Locations navigated to, oldest first
    #[must_use]
    pub fn navigations(&self) -> Vec<&str> {
        self.event_history
            .iter()
            .filter_map(|e| match e {
                DomEvent::Navigate { location } => Some(location.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Page for MockPage {
    fn field_value(&self, id: &str) -> Option<String> {
        self.elements.get(id).map(|e| e.value.clone())
    }

    fn set_field_value(&mut self, id: &str, value: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.value = value.to_string();
            self.event_history.push(DomEvent::ValueSet {
                element_id: id.to_string(),
                value: value.to_string(),
            });
        }
    }

    fn replace_location(&mut self, location: &str) {
        location.clone_into(&mut self.location);
        self.event_history.push(DomEvent::Navigate {
            location: location.to_string(),
        });
    }
}
