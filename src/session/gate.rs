use super::{Session, SessionStorage};
use crate::errors::AppResult;

/// Named views of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Dashboard,
    Map,
    AddLocation,
    Churns,
    AddChurn,
    Upsells,
    AddUpsell,
    Notes,
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Login => "login",
            View::Dashboard => "dashboard",
            View::Map => "map",
            View::AddLocation => "add-location",
            View::Churns => "churns",
            View::AddChurn => "add-churn",
            View::Upsells => "upsells",
            View::AddUpsell => "add-upsell",
            View::Notes => "notes",
        }
    }

    pub fn requires_session(&self) -> bool {
        !matches!(self, View::Login)
    }

    pub fn requires_elevated(&self) -> bool {
        matches!(self, View::AddLocation | View::AddChurn | View::AddUpsell)
    }
}

/// Route guard: no session redirects to login, elevated views reject
/// standard sessions.
pub fn authorize<S: SessionStorage>(view: View, session: &Session<S>) -> AppResult<()> {
    if view.requires_elevated() {
        session.require_elevated()?;
    } else if view.requires_session() {
        session.require_signed_in()?;
    }
    Ok(())
}
