pub mod scorer;

pub use scorer::{rank_candidates, MAX_FOLDER_CANDIDATES};
