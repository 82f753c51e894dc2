mod memory_movie_store;
mod movie_store;
mod pg_movie_store;

pub use memory_movie_store::*;
pub use movie_store::*;
pub use pg_movie_store::*;
