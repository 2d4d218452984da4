mod common;
pub use self::common::{Pagination, Query};

mod posting;
pub use self::posting::PostingQuery;
