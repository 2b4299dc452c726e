mod memory;
mod upstash;

pub use memory::MemoryListStore;
pub use upstash::UpstashListStore;
