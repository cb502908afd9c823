//! Thin read-only view over the client's `--xml` output, backed by `xot`.

use xot::{NameId, Node, Xot};

use crate::error::{Error, Result};

pub(crate) struct XmlDocument {
    xot: Xot,
    root: Node,
}

impl XmlDocument {
    /// Parses `text` and locates its document element.
    pub(crate) fn parse(text: &str) -> Result<Self> {
        let mut xot = Xot::new();
        let document = xot.parse(text).map_err(|e| Error::Xml {
            message: e.to_string(),
        })?;
        let root = xot
            .children(document)
            .find(|node| xot.is_element(*node))
            .ok_or_else(|| Error::Xml {
                message: "document has no root element".to_string(),
            })?;
        Ok(Self { xot, root })
    }

    /// Interns a local (namespace-free) name for lookups.
    pub(crate) fn name(&mut self, local: &str) -> NameId {
        self.xot.add_name(local)
    }

    pub(crate) fn root(&self) -> Node {
        self.root
    }

    pub(crate) fn is_named(&self, node: Node, name: NameId) -> bool {
        self.xot
            .element(node)
            .is_some_and(|element| element.name() == name)
    }

    /// Child elements of `node` called `name`, in document order.
    pub(crate) fn children(&self, node: Node, name: NameId) -> Vec<Node> {
        self.xot
            .children(node)
            .filter(|child| self.is_named(*child, name))
            .collect()
    }

    pub(crate) fn child(&self, node: Node, name: NameId) -> Option<Node> {
        self.xot
            .children(node)
            .find(|child| self.is_named(*child, name))
    }

    pub(crate) fn attribute(&self, node: Node, name: NameId) -> Option<&str> {
        self.xot.get_attribute(node, name)
    }

    /// Concatenated text of the direct text children of `node`.
    pub(crate) fn text(&self, node: Node) -> String {
        self.xot
            .children(node)
            .filter_map(|child| self.xot.text_str(child))
            .collect()
    }
}
