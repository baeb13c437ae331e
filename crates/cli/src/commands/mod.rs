pub mod decide;
pub mod migrate;
