mod category;

pub use category::CategorySummary;
