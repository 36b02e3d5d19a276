// src/lib.rs — Library root for TaskFlow

pub mod assistant;
pub mod cli;
pub mod identity;
pub mod infra;
pub mod task;
pub mod util;
