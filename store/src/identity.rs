//! Who is using the app. Authentication happens elsewhere; this only answers
//! "which user id should new records be stamped with".

use crate::error::StoreError;

pub trait Identity: Send + Sync {
    fn current_user_id(&self) -> Option<String>;

    /// Like [`Identity::current_user_id`] but an error when nobody is signed in.
    fn require_user_id(&self) -> Result<String, StoreError> {
        self.current_user_id().ok_or(StoreError::NoIdentity)
    }
}

/// Reads `CAMPUS_USER_ID`; empty values count as unset.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvIdentity;

impl Identity for EnvIdentity {
    fn current_user_id(&self) -> Option<String> {
        std::env::var("CAMPUS_USER_ID")
            .ok()
            .filter(|id| !id.trim().is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct StaticIdentity(pub String);

impl Identity for StaticIdentity {
    fn current_user_id(&self) -> Option<String> {
        Some(self.0.clone()).filter(|id| !id.trim().is_empty())
    }
}
