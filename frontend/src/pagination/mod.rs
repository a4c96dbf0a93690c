//! Client-side page window over server-paginated lists, with optimistic
//! reconciliation of local mutations.

mod controller;
mod filters;
mod load_state;
mod window;

pub use controller::{PageFetcher, PagedList};
pub use filters::{FilterSet, FilterValue};
pub use load_state::{FetchGeneration, LoadState, PageQuery};
pub use window::{
    last_page, PageWindow, Reconciler, Reconciliation, Row, ShortfallRequest,
    DEFAULT_BULK_REFETCH_THRESHOLD,
};
