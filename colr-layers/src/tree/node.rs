//! Elements of a ttx tree

/// An element in a ttx tree: a tag, its attributes, and child elements.
///
/// Attributes keep the order in which they were added or parsed, so that
/// written output is stable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeNode {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a new element with no attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        TreeNode {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Builder-style method to add an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder-style method to add a child element.
    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Set an attribute, replacing an existing value with the same name.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl ToString) {
        let name = name.into();
        let value = value.to_string();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Returns the value of an attribute, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over the child elements with a given tag.
    pub fn children_with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a TreeNode> {
        self.children.iter().filter(move |child| child.tag == tag)
    }

    /// `true` if this element has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
