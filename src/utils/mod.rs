// Utils compartidos

pub mod constants;
pub mod file_name;
pub mod file_signature;
pub mod random;
pub mod file_reader;

pub use constants::*;
pub use file_name::*;
pub use random::*;
