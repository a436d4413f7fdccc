pub mod entry;
pub mod meta;
pub mod options;
pub mod row;
