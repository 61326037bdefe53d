//! Session holder and view gate.
//!
//! A `Session` holds at most one signed-in identity and mirrors every change
//! into its `SessionStorage`. Capability checks happen here, before any
//! store call is attempted.

pub mod gate;
pub mod storage;

pub use gate::{View, authorize};
pub use storage::{FileSessionStorage, MemorySessionStorage, SessionStorage};

use crate::errors::{AppError, AppResult};
use crate::models::Identity;
use log::{info, warn};

pub struct Session<S: SessionStorage> {
    storage: S,
    identity: Option<Identity>,
}

impl<S: SessionStorage> Session<S> {
    /// Restore whatever identity the storage holds. An unreadable blob is
    /// logged and treated as signed out.
    pub fn open(storage: S) -> Self {
        let identity = match storage.load() {
            Ok(id) => id,
            Err(e) => {
                warn!("event=session_restore status=error error={}", e);
                None
            }
        };
        Self { storage, identity }
    }

    pub fn sign_in(&mut self, identity: Identity) -> AppResult<()> {
        self.storage.save(&identity)?;
        info!(
            "event=sign_in status=ok user_id={} role={}",
            identity.id,
            identity.role.to_db_str()
        );
        self.identity = Some(identity);
        Ok(())
    }

    pub fn sign_out(&mut self) -> AppResult<()> {
        self.storage.clear()?;
        if let Some(id) = self.identity.take() {
            info!("event=sign_out status=ok user_id={}", id.id);
        }
        Ok(())
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.identity.is_some()
    }

    pub fn is_elevated(&self) -> bool {
        self.identity
            .as_ref()
            .map(|i| i.role.is_elevated())
            .unwrap_or(false)
    }

    pub fn require_signed_in(&self) -> AppResult<&Identity> {
        self.identity.as_ref().ok_or(AppError::NotSignedIn)
    }

    /// Gate for admin-only mutations.
    pub fn require_elevated(&self) -> AppResult<&Identity> {
        let id = self.require_signed_in()?;
        if !id.role.is_elevated() {
            warn!("event=access_denied user_id={}", id.id);
            return Err(AppError::AccessDenied);
        }
        Ok(id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
