pub mod clock;
mod maintenance;
mod ttl_cache;

pub use clock::{Clock, ManualClock, SystemClock};
pub use maintenance::TtlCacheMaintenance;
pub use ttl_cache::{FetchOutcome, TtlCache};
