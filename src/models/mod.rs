pub mod churn;
pub mod form;
pub mod identity;
pub mod location;
pub mod note;
pub mod target;
pub mod upsell;

pub use churn::{ChurnEvent, ChurnForm, ChurnPatch, NewChurn};
pub use identity::{Identity, NewCredential, Role};
pub use location::{Location, LocationForm, LocationPatch, NewLocation};
pub use note::{ClientNote, NewNote, NoteForm, NoteUpdate};
pub use target::{CURRENT_TARGET_ID, SalesTarget, TargetUpdate};
pub use upsell::{NewUpsell, UpsellEvent, UpsellForm, UpsellPatch};
