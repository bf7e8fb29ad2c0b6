use crate::api::{Claims, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    MyRequests,
    PendingRequests,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::MyRequests => "/leave",
            Route::PendingRequests => "/leave/manager",
        }
    }

    /// The route actually shown when `self` is requested by the holder of
    /// `claims` (`None` when signed out).
    pub fn resolve(self, claims: Option<&Claims>) -> Route {
        let Some(claims) = claims else {
            return Route::Login;
        };
        match (self, claims.role()) {
            (Route::Login, Role::Manager) | (Route::MyRequests, Role::Manager) => {
                Route::PendingRequests
            }
            (Route::Login, Role::Employee) | (Route::PendingRequests, Role::Employee) => {
                Route::MyRequests
            }
            (route, _) => route,
        }
    }
}
