pub mod aggregate;
pub mod config;
pub mod duration;
pub mod loader;
pub mod municipality;
pub mod output;
pub mod pipeline;
pub mod trips;
