use crate::{
    api::{decode_claims, Claims},
    router::Route,
    utils::storage::{SessionStore, StorageError},
};

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub claims: Option<Claims>,
}

impl AuthState {
    /// A stored token that cannot be decoded counts as signed out.
    pub fn from_session(store: &dyn SessionStore) -> Result<Self, StorageError> {
        let claims = store.get_token()?.as_deref().and_then(decode_claims);
        Ok(Self { claims })
    }

    pub fn route_for(&self, requested: Route) -> Route {
        requested.resolve(self.claims.as_ref())
    }
}
