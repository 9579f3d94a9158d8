//! Page controllers. Each owns its state and reports to the view through
//! signals; rendering is left to the caller.

pub mod dashboard;
pub mod forms_example;
pub mod table_example;
pub mod users;

pub use dashboard::{StatCard, stat_cards};
pub use forms_example::FormsExample;
pub use table_example::{Member, MemberStatus, TableExample, sample_members};
pub use users::{Navigation, USERS_ROUTE, UserCreatePage, UserDetailPage, format_ko_date};
