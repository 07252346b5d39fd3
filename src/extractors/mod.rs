pub mod page;

pub use page::PageQuery;
