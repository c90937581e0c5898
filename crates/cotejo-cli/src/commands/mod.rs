pub mod extract;
pub mod links;
pub mod profile;
pub mod rank;
pub mod scan;
