pub mod catalog;
pub mod check;
pub mod env;
pub mod error;
pub mod fetch;
pub mod render;
pub mod scrape;
pub mod stamp;
pub mod storage;
pub mod ui;
pub mod util;
