pub mod error_handling;
pub mod flash;
pub mod path;
pub mod xhr;
