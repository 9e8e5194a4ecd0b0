//! Mock DOM for exercising the table widget without a browser
//!
//! The tree is owned by [`MockDom`]; lookups walk it by element id, so a
//! re-rendered `tbody` never leaves stale entries behind.

use std::collections::BTreeMap;

/// Represents a DOM element for testing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes, excluding `id` and `class`
    pub attributes: BTreeMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Whether element is visible
    pub visible: bool,
    /// Child elements
    pub children: Vec<DomElement>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            visible: true,
            children: Vec::new(),
        }
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Adds a child element
    #[must_use]
    pub fn with_child(mut self, child: DomElement) -> Self {
        self.children.push(child);
        self
    }

    /// Hides the element
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Sets visibility
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Sets text content
    pub fn set_text(&mut self, text: &str) {
        self.text_content = text.to_string();
    }

    /// Adds a class
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Removes a class
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Sets an attribute value
    pub fn set_attr(&mut self, key: &str, value: &str) {
        self.attributes.insert(key.to_string(), value.to_string());
    }

    /// Direct children with the given tag
    pub fn children_with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a DomElement> {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Depth-first search for an element by ID, including `self`
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&DomElement> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Mutable variant of [`DomElement::find`]
    pub fn find_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// First descendant (excluding `self`) with the given tag
    #[must_use]
    pub fn first_descendant(&self, tag: &str) -> Option<&DomElement> {
        self.children
            .iter()
            .find_map(|c| if c.tag == tag { Some(c) } else { c.first_descendant(tag) })
    }

    /// Mutable variant of [`DomElement::first_descendant`]
    pub fn first_descendant_mut(&mut self, tag: &str) -> Option<&mut DomElement> {
        for child in &mut self.children {
            if child.tag == tag {
                return Some(child);
            }
            if let Some(found) = child.first_descendant_mut(tag) {
                return Some(found);
            }
        }
        None
    }

    /// All descendants (excluding `self`) with the given tag, in document order
    #[must_use]
    pub fn descendants(&self, tag: &str) -> Vec<&DomElement> {
        let mut out = Vec::new();
        self.collect_descendants(tag, &mut out);
        out
    }

    fn collect_descendants<'a>(&'a self, tag: &str, out: &mut Vec<&'a DomElement>) {
        for child in &self.children {
            if child.tag == tag {
                out.push(child);
            }
            child.collect_descendants(tag, out);
        }
    }

    /// Serializes the element and its subtree as HTML
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    /// Serializes only the children, like `innerHTML`
    #[must_use]
    pub fn inner_html(&self) -> String {
        let mut out = escape_html(&self.text_content);
        for child in &self.children {
            child.write_html(&mut out);
        }
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if !self.id.is_empty() {
            push_attr(out, "id", &self.id);
        }
        if !self.classes.is_empty() {
            push_attr(out, "class", &self.classes.join(" "));
        }
        for (key, value) in &self.attributes {
            push_attr(out, key, value);
        }
        if !self.visible {
            push_attr(out, "style", "display:none");
        }
        if is_void(&self.tag) {
            out.push_str("/>");
            return;
        }
        out.push('>');
        out.push_str(&self.inner_html());
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "input" | "br" | "img" | "col")
}

fn push_attr(out: &mut String, key: &str, value: &str) {
    out.push(' ');
    out.push_str(key);
    out.push_str("=\"");
    out.push_str(&escape_html(value));
    out.push('"');
}

/// Escape special characters for HTML text and attribute values
#[must_use]
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// DOM events that can be dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click event on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Input event with new value
    Input {
        /// The ID of the input element
        element_id: String,
        /// The new value entered
        value: String,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates an input event
    #[must_use]
    pub fn input(element_id: &str, value: &str) -> Self {
        Self::Input {
            element_id: element_id.to_string(),
            value: value.to_string(),
        }
    }

    /// ID of the element the event targets
    #[must_use]
    pub fn target(&self) -> &str {
        match self {
            Self::Click { element_id } | Self::Input { element_id, .. } => element_id,
        }
    }
}

/// Mock DOM holding one document tree
#[derive(Debug)]
pub struct MockDom {
    /// Root element
    pub root: DomElement,
    /// Event history for verification
    event_history: Vec<DomEvent>,
}

impl Default for MockDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDom {
    /// Creates a new mock DOM
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: DomElement::new("div").with_id("root"),
            event_history: Vec::new(),
        }
    }

    /// Creates a document holding one table fixture.
    ///
    /// `headers` are the metadata literals of the header cells (one `th`
    /// per entry; empty strings produce a `th` without metadata) and `rows`
    /// the static body rows, cell text in column order.
    #[must_use]
    pub fn table(table_id: &str, headers: &[&str], rows: &[&[&str]]) -> Self {
        let header_row = headers.iter().fold(DomElement::new("tr"), |tr, literal| {
            let th = if literal.is_empty() {
                DomElement::new("th")
            } else {
                DomElement::new("th").with_attr("data", literal)
            };
            tr.with_child(th)
        });
        let body = rows.iter().fold(DomElement::new("tbody"), |tbody, cells| {
            let tr = cells.iter().fold(DomElement::new("tr"), |tr, text| {
                tr.with_child(DomElement::new("td").with_text(text))
            });
            tbody.with_child(tr)
        });
        let table = DomElement::new("table")
            .with_id(table_id)
            .with_child(DomElement::new("thead").with_child(header_row))
            .with_child(body);

        let mut dom = Self::new();
        dom.root.children.push(table);
        dom
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.root.find(id)
    }

    /// Gets a mutable element by ID
    pub fn get_element_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        self.root.find_mut(id)
    }

    /// Sets an attribute on an element; returns false if it does not exist
    pub fn set_attribute(&mut self, id: &str, key: &str, value: &str) -> bool {
        match self.root.find_mut(id) {
            Some(elem) => {
                elem.set_attr(key, value);
                true
            }
            None => false,
        }
    }

    /// Records an event and applies its direct effect on the tree
    pub fn dispatch_event(&mut self, event: DomEvent) {
        if let DomEvent::Input { element_id, value } = &event {
            if let Some(elem) = self.root.find_mut(element_id) {
                elem.set_attr("value", value);
            }
        }
        self.event_history.push(event);
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

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.get_element(id).map(|e| e.text_content.as_str())
    }

    /// Replaces the children of an element; returns false if it does not exist
    pub fn replace_children(&mut self, id: &str, children: Vec<DomElement>) -> bool {
        match self.root.find_mut(id) {
            Some(elem) => {
                elem.children = children;
                true
            }
            None => false,
        }
    }
}
