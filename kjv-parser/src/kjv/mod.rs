//! Main module for kjv library functionality

pub mod bible;
pub mod browsing;
pub mod canon;
pub mod extraction;
pub mod loader;
pub mod pipeline;
pub mod store;
pub mod testing;
