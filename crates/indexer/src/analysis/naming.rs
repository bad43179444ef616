use serde::{Deserialize, Serialize};
use std::fmt;

/// Graph key of a method: `"{unit_id}.{member}"`.
///
/// Equal `(unit_id, member)` pairs always produce the same key, which is what
/// makes repeated merges land on the same node. It also means overloads, or
/// equally named methods of two classes in one file, share a key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualifiedName(String);

impl QualifiedName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for QualifiedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub fn qualify(unit_id: &str, member_name: &str) -> QualifiedName {
    QualifiedName(format!("{unit_id}.{member_name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualify_format() {
        assert_eq!(
            qualify("HelloWorld.java", "sayHello").as_str(),
            "HelloWorld.java.sayHello"
        );
    }

    #[test]
    fn test_qualify_is_deterministic() {
        for (unit, member) in [("A.java", "run"), ("", ""), ("dir/x.java", "a.b")] {
            assert_eq!(qualify(unit, member), qualify(unit, member));
        }
        assert_ne!(qualify("A.java", "run"), qualify("B.java", "run"));
    }

    #[test]
    fn test_qualify_is_total_on_odd_input() {
        assert_eq!(qualify("", "").as_str(), ".");
        assert_eq!(qualify("it's.java", "m\"x").as_str(), "it's.java.m\"x");
    }
}
