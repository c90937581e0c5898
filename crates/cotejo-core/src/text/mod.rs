pub mod amounts;
pub mod links;
