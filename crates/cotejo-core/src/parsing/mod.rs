pub mod amount;
pub mod keywords;
