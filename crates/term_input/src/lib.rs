mod raw_mode;
mod reader;

pub use raw_mode::RawMode;
pub use reader::FdReader;
