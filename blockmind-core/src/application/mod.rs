pub mod agent;
pub mod catalog;
pub mod coalescer;
pub mod tasks;
pub mod tooling;
pub mod world;
