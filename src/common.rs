pub mod amount;
pub mod dates;
pub mod error;
