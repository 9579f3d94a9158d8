//! The list pipeline: filter → sort → paginate.
//!
//! [`LocalListController`] runs the whole pipeline over an in-memory
//! collection. [`RemoteUserList`] delegates filtering and paging to the
//! backend and only debounces the search term.
//!
//! The stages are also usable on their own:
//!
//! ```ignore
//! let rows = filter_rows(&items, &FilterCriteria::new().with_query("lee"));
//! let rows = sort_rows(&items, &rows, &SortSpec::descending("joinDate"), &collation);
//! let page = paginate(&rows, PageSpec::first(5)?);
//! ```

mod collation;
mod filter;
mod local_list;
mod paginate;
mod record;
mod remote_list;
mod sort;

pub use collation::{Collation, DEFAULT_LOCALE};
pub use filter::{FilterCriteria, filter_rows};
pub use local_list::{LocalListController, ViewSummary};
pub use paginate::{PageSpec, page_count, paginate};
pub use record::{FieldValue, Record};
pub use remote_list::{DeleteOutcome, LoadTicket, RemoteUserList};
pub use sort::{SortDirection, SortSpec, compare_fields, sort_rows};
