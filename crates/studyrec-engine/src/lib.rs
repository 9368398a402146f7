#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod handle;
pub mod recommender;

pub use handle::RecommenderHandle;
pub use recommender::StudyRecommender;
