use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Node labels stored in the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter)]
pub enum NodeLabel {
    Class,
    Method,
}

/// Relationship labels stored in the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    /// Method -> Method
    Calls,
    /// Class -> Class
    Extends,
}

impl RelationshipType {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    pub fn endpoints(&self) -> (NodeLabel, NodeLabel) {
        match self {
            RelationshipType::Calls => (NodeLabel::Method, NodeLabel::Method),
            RelationshipType::Extends => (NodeLabel::Class, NodeLabel::Class),
        }
    }
}
