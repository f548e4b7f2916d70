//! Generation rules: row-count ranges, fixed rows, and per-kind limits.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::NodeKind;

/// Inclusive node-count range for one row class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeCountRange {
    pub min: usize,
    pub max: usize,
}

impl NodeCountRange {
    pub fn contains(self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

/// Which count range applies to a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowClass {
    First,
    Normal,
    Last,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowCountRanges {
    pub first: NodeCountRange,
    pub normal: NodeCountRange,
    pub last: NodeCountRange,
}

/// Placement limits for one node kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRule {
    /// Hard cap on how many nodes of this kind one act may hold.
    pub max_count: usize,
    /// Rows where the kind may never be placed.
    pub disabled_rows: BTreeSet<usize>,
    /// Forbid the kind on two directly connected nodes.
    pub disable_consecutive: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapConfig {
    pub act_count: u32,
    /// Last row index per act; row count is `max_row_index + 1`.
    pub max_row_index: usize,
    pub row_counts: RowCountRanges,
    /// Row index -> forced kind, applied in ascending row order.
    pub fixed_rows: BTreeMap<usize, NodeKind>,
    /// Per-kind placement rules. Key order doubles as the fixed priority in
    /// which special kinds are tried during assignment.
    pub node_rules: BTreeMap<NodeKind, NodeRule>,
}

impl MapConfig {
    /// Fail-fast sanity check, run once before any generation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.act_count == 0 {
            return Err(ConfigError::NoActs);
        }
        for (class, range) in [
            (RowClass::First, self.row_counts.first),
            (RowClass::Normal, self.row_counts.normal),
            (RowClass::Last, self.row_counts.last),
        ] {
            if range.min == 0 || range.min > range.max {
                return Err(ConfigError::InvalidRowRange { class, min: range.min, max: range.max });
            }
        }
        for (&row, &kind) in &self.fixed_rows {
            if row > self.max_row_index {
                return Err(ConfigError::FixedRowOutOfBounds {
                    row,
                    kind,
                    max_row_index: self.max_row_index,
                });
            }
        }
        Ok(())
    }

    pub(super) fn row_count_range(&self, row: usize) -> NodeCountRange {
        if row == 0 {
            self.row_counts.first
        } else if row == self.max_row_index {
            self.row_counts.last
        } else {
            self.row_counts.normal
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        let max_row_index = 15;
        Self {
            act_count: 3,
            max_row_index,
            row_counts: RowCountRanges {
                first: NodeCountRange { min: 2, max: 4 },
                normal: NodeCountRange { min: 1, max: 6 },
                last: NodeCountRange { min: 1, max: 1 },
            },
            fixed_rows: BTreeMap::from([
                (0, NodeKind::Basic),
                (max_row_index - 1, NodeKind::Rest),
                (max_row_index, NodeKind::Boss),
            ]),
            node_rules: BTreeMap::from([
                (
                    NodeKind::Basic,
                    NodeRule {
                        max_count: usize::MAX,
                        disabled_rows: BTreeSet::new(),
                        disable_consecutive: false,
                    },
                ),
                (
                    NodeKind::Elite,
                    NodeRule {
                        max_count: 5,
                        disabled_rows: BTreeSet::from([0, 1, 2, 3]),
                        disable_consecutive: true,
                    },
                ),
                (
                    NodeKind::Rest,
                    NodeRule {
                        max_count: 10,
                        disabled_rows: BTreeSet::new(),
                        disable_consecutive: true,
                    },
                ),
                (
                    NodeKind::Boss,
                    NodeRule {
                        max_count: 1,
                        disabled_rows: BTreeSet::new(),
                        disable_consecutive: true,
                    },
                ),
            ]),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    NoActs,
    InvalidRowRange { class: RowClass, min: usize, max: usize },
    FixedRowOutOfBounds { row: usize, kind: NodeKind, max_row_index: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoActs => write!(f, "act_count must be at least 1"),
            Self::InvalidRowRange { class, min, max } => {
                write!(f, "{class:?} row count range {min}..={max} must satisfy 1 <= min <= max")
            }
            Self::FixedRowOutOfBounds { row, kind, max_row_index } => {
                write!(f, "fixed row {row} ({kind:?}) lies beyond max_row_index {max_row_index}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_validates() {
        assert_eq!(MapConfig::default().validate(), Ok(()));
    }

    #[test]
    fn inverted_row_range_is_rejected() {
        let mut config = MapConfig::default();
        config.row_counts.normal = NodeCountRange { min: 4, max: 2 };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidRowRange { class: RowClass::Normal, min: 4, max: 2 })
        );
    }

    #[test]
    fn empty_row_range_is_rejected() {
        let mut config = MapConfig::default();
        config.row_counts.first = NodeCountRange { min: 0, max: 3 };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRowRange { class: RowClass::First, .. })
        ));
    }

    #[test]
    fn fixed_row_beyond_the_last_row_is_rejected() {
        let mut config = MapConfig::default();
        config.max_row_index = 10;
        assert_eq!(
            config.validate(),
            Err(ConfigError::FixedRowOutOfBounds {
                row: 14,
                kind: NodeKind::Rest,
                max_row_index: 10
            })
        );
    }

    #[test]
    fn zero_acts_are_rejected() {
        let config = MapConfig { act_count: 0, ..MapConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::NoActs));
    }

    #[test]
    fn row_classes_map_to_their_ranges() {
        let config = MapConfig::default();
        assert_eq!(config.row_count_range(0), config.row_counts.first);
        assert_eq!(config.row_count_range(1), config.row_counts.normal);
        assert_eq!(config.row_count_range(14), config.row_counts.normal);
        assert_eq!(config.row_count_range(15), config.row_counts.last);
    }
}
