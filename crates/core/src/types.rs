use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct NodeId;
}

/// Semantic node kinds on the run map. Declaration order is load-bearing:
/// it fixes the priority in which special kinds are tried during assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    /// Default encounter; every node starts out as this.
    Basic,
    Elite,
    Rest,
    Boss,
}
