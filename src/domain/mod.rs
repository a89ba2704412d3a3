pub mod entry;
pub mod topic;

pub use entry::{top_entries, Entry, IndexedEntry, NO_TITLE};
pub use topic::{Topic, TopicRegistry};
