mod list;

pub(crate) use list::json_output;
pub use list::{list_articles, list_products};
