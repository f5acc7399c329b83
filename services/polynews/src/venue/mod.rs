pub mod gamma;
pub mod mock;
pub mod traits;

pub use gamma::{parse_events_body, GammaClient};
pub use mock::MockEventSource;
pub use traits::{EventQuery, EventSource, QUERY_DATE_FORMAT};
