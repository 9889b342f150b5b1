pub mod course;
pub mod event;
pub mod field;
pub mod focus;
pub mod format;
pub mod hole;
pub mod id;
pub mod player;
pub mod policy;
pub mod scorecard;
pub mod sigma;
pub mod validator;

pub use course::Course;
pub use event::Event;
pub use field::Field;
pub use focus::FocusChain;
pub use format::{HOLE_COUNT, HoleFormat, Slot};
pub use hole::{HoleRecord, Surface};
pub use id::{IdPrefix, RecordId};
pub use player::Player;
pub use policy::{HandicapRule, HoleKind, HolePolicy};
pub use scorecard::Scorecard;
pub use sigma::{Sigma, SigmaField};
pub use validator::{LogValidator, MessageValidator, Rule, ValidationError, Validator};
