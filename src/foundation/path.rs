use std::fmt;

/// One step from a document root to a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathElem {
    Field(String),
    Index(usize),
}

/// JSON-path style location (`$.layers[0].shapes[2]`) of a node inside a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath(Vec<PathElem>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, elem: PathElem) {
        self.0.push(elem);
    }

    pub fn pop(&mut self) {
        self.0.pop();
    }

    pub fn elems(&self) -> &[PathElem] {
        &self.0
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for p in &self.0 {
            match p {
                PathElem::Field(name) => write!(f, ".{name}")?,
                PathElem::Index(i) => write!(f, "[{i}]")?,
            }
        }
        Ok(())
    }
}

impl serde::Serialize for NodePath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
