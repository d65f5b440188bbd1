pub mod rank_buckets;
pub mod slot_arena;
pub mod sorted_list;

pub use rank_buckets::RankBuckets;
pub use slot_arena::{SlotArena, SlotId};
pub use sorted_list::SortedList;
