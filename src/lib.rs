pub mod args;
pub mod codec;
pub mod controller;
pub mod db;
pub mod error;
pub mod model;
pub mod view;

pub use error::LeagueError;
pub use model::{HoleFormat, HoleKind, HoleRecord};
