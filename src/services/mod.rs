pub mod dashboard;
pub mod insights;
pub mod mind_client;
pub mod mood;
pub mod normalize;
pub mod progress;
pub mod recommendations;
pub mod store;

#[cfg(test)]
pub mod memory;
