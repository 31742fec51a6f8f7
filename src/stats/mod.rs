pub mod history;
pub mod pipeline;
pub mod snapshot;
pub mod summary;
