//! Instance-factory seam between the generator and the host engine.

use std::fmt;

use crate::types::NodeKind;

/// Creates the external representation attached to each generated node.
/// The generator stores the handle untouched and never inspects it.
///
/// Implementations must fail with a descriptive [`FactoryError`] for kinds
/// they cannot build; downstream consumers assume every published node
/// carries a usable handle.
pub trait NodeFactory {
    type Handle;

    fn create(&mut self, kind: NodeKind) -> Result<Self::Handle, FactoryError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactoryError {
    pub kind: NodeKind,
    pub reason: String,
}

impl FactoryError {
    pub fn new(kind: NodeKind, reason: impl Into<String>) -> Self {
        Self { kind, reason: reason.into() }
    }
}

impl fmt::Display for FactoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot create a {:?} node instance: {}", self.kind, self.reason)
    }
}

impl std::error::Error for FactoryError {}

/// Kind-tagged serial token, the reference handle used by tests and tooling
/// in place of a real engine object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeToken {
    pub kind: NodeKind,
    pub serial: u32,
}

/// Reference [`NodeFactory`] producing [`NodeToken`]s with increasing
/// serials.
#[derive(Clone, Debug, Default)]
pub struct TokenFactory {
    created: u32,
}

impl NodeFactory for TokenFactory {
    type Handle = NodeToken;

    fn create(&mut self, kind: NodeKind) -> Result<NodeToken, FactoryError> {
        let serial = self.created;
        self.created += 1;
        Ok(NodeToken { kind, serial })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_factory_tags_handles_with_their_kind_and_a_fresh_serial() {
        let mut factory = TokenFactory::default();
        let first = factory.create(NodeKind::Rest).expect("token creation cannot fail");
        let second = factory.create(NodeKind::Boss).expect("token creation cannot fail");

        assert_eq!(first, NodeToken { kind: NodeKind::Rest, serial: 0 });
        assert_eq!(second, NodeToken { kind: NodeKind::Boss, serial: 1 });
    }

    #[test]
    fn factory_errors_name_the_offending_kind() {
        let error = FactoryError::new(NodeKind::Elite, "no prefab registered");
        assert!(error.to_string().contains("Elite"));
        assert!(error.to_string().contains("no prefab registered"));
    }
}
