pub use crate::builder::{RankedSet, TopNBuilder, TopNStrategy};
pub use crate::config::{TieMode, TopNConfig};
pub use crate::ds::{RankBuckets, SlotArena, SlotId, SortedList};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::TopNMetricsSnapshot;
pub use crate::policy::list::ListTopN;
pub use crate::policy::tree::TreeTopN;
pub use crate::traits::{ExclusionStrategy, TopN};
