/// A node of a server `<configuration>` tree.
///
/// Children keep document order. Lookup by name returns the first child with
/// that name; same-named siblings are reachable in order through
/// [`ConfigNode::children_named`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigNode {
    name: String,
    value: Option<String>,
    children: Vec<ConfigNode>,
}

impl ConfigNode {
    /// Create an empty node with the given tag name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            children: Vec::new(),
        }
    }

    /// Set the scalar value (builder style).
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Append a child (builder style).
    pub fn with_child(mut self, child: ConfigNode) -> Self {
        self.children.push(child);
        self
    }

    /// Tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Scalar value, if the node has one.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Replace the scalar value.
    pub fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }

    /// Append a child node.
    pub fn push_child(&mut self, child: ConfigNode) {
        self.children.push(child);
    }

    /// First child named `name`.
    pub fn child(&self, name: &str) -> Option<&ConfigNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// First child named `name`, mutably.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut ConfigNode> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    /// Children named `name`, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ConfigNode> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Children named `name`, in document order, mutably.
    pub fn children_named_mut<'a>(
        &'a mut self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a mut ConfigNode> {
        self.children.iter_mut().filter(move |c| c.name == name)
    }

    /// Follow `path` through first-named children.
    ///
    /// Returns `None` as soon as one segment is missing. An empty path yields
    /// the node itself.
    pub fn descend(&self, path: &[&str]) -> Option<&ConfigNode> {
        path.iter().try_fold(self, |node, segment| node.child(segment))
    }

    /// Mutable counterpart of [`ConfigNode::descend`].
    pub fn descend_mut(&mut self, path: &[&str]) -> Option<&mut ConfigNode> {
        path.iter()
            .try_fold(self, |node, segment| node.child_mut(segment))
    }
}

/// A server entry of the settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Server {
    /// Server identifier, matched against repository ids.
    pub id: String,
    /// The free-form `<configuration>` block, if any.
    pub configuration: Option<ConfigNode>,
}

impl Server {
    /// Create a server entry without configuration.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            configuration: None,
        }
    }

    /// Attach a configuration tree (builder style).
    pub fn with_configuration(mut self, configuration: ConfigNode) -> Self {
        self.configuration = Some(configuration);
        self
    }
}

/// The parts of a settings file this workspace cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Server entries in document order.
    pub servers: Vec<Server>,
}
