mod execute;
mod query_any;

pub use execute::Execute;
pub use query_any::QueryAny;
