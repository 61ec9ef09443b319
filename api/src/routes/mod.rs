pub mod analytics;
pub mod complaints;
pub mod departments;
pub mod map;
