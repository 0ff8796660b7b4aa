//! A single recorded step and its variable bindings

use super::structure::{Structure, StructureKind};
use indexmap::IndexMap;
use std::fmt;

/// A displayable variable value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    Number(i64),
    Text(String),
}

impl Scalar {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Scalar::Number(n) => Some(*n),
            Scalar::Text(_) => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Number(i64::from(n))
    }
}

impl From<u64> for Scalar {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or_else(|_| Scalar::Text(n.to_string()), Scalar::Number)
    }
}

impl From<usize> for Scalar {
    fn from(n: usize) -> Self {
        i64::try_from(n).map_or_else(|_| Scalar::Text(n.to_string()), Scalar::Number)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Text(b.to_string())
    }
}

impl From<char> for Scalar {
    fn from(c: char) -> Self {
        Scalar::Text(c.to_string())
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

/// Insertion-ordered variable bindings shown by the inspector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables(IndexMap<String, Scalar>);

impl Variables {
    pub fn new() -> Self {
        Variables(IndexMap::new())
    }

    /// Bind `name`, replacing an earlier binding in place
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Scalar>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Scalar> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Immutable snapshot at one meaningful point of an algorithm's execution
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub message: String,
    /// Pseudocode line (1-based); not validated against the listing
    pub line: Option<usize>,
    pub variables: Variables,
    pub structure: Structure,
}

impl Step {
    pub fn new(message: impl Into<String>, structure: impl Into<Structure>) -> Self {
        Step {
            message: message.into(),
            line: None,
            variables: Variables::new(),
            structure: structure.into(),
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn var(mut self, name: &str, value: impl Into<Scalar>) -> Self {
        self.variables.insert(name, value);
        self
    }

    pub fn kind(&self) -> StructureKind {
        self.structure.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::ArrayView;

    #[test]
    fn builder_keeps_variable_order() {
        let step = Step::new("start", ArrayView::capture(&[1]))
            .at_line(3)
            .var("j", 1usize)
            .var("i", 0usize)
            .var("key", "x");
        let names: Vec<&str> = step.variables.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["j", "i", "key"]);
        assert_eq!(step.line, Some(3));
        assert_eq!(step.kind(), StructureKind::Array);
    }

    #[test]
    fn rebinding_a_variable_keeps_its_position() {
        let mut vars = Variables::new();
        vars.insert("a", 1);
        vars.insert("b", 2);
        vars.insert("a", 3);
        let pairs: Vec<String> = vars.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        assert_eq!(pairs, vec!["a=3", "b=2"]);
    }
}
