//! Descriptive statistics over a filtered trip dataset.
//!
//! Every analyzer reads the dataset through the frequency primitive in
//! [`mode`]; [`analyzer`] runs them all and assembles a [`types::TripReport`].

pub mod analyzer;
pub mod duration;
pub mod format;
pub mod mode;
pub mod station;
pub mod time;
pub mod types;
pub mod user;
pub mod utility;
