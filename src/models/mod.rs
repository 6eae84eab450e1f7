pub mod craft;
pub mod event;
pub mod team_member;
pub mod validation;
pub mod volunteer;

pub use craft::{Craft, NewCraft};
pub use event::{Event, NewEvent};
pub use team_member::{NewTeamMember, TeamMember};
pub use validation::{FieldError, PathSegment, ValidationErrors};
pub use volunteer::{NewVolunteer, Volunteer};
