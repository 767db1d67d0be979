//! Command implementations.

pub mod count;
pub mod extract;
pub mod fields;
pub mod segment;
pub mod tokenize;

pub use self::count::execute_count;
pub use self::extract::execute_extract;
pub use self::fields::execute_fields;
pub use self::segment::execute_segment;
pub use self::tokenize::execute_tokenize;
