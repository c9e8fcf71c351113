use std::sync::Arc;

use ecoguard::Role;
use log::{debug, error};
use tokio::sync::watch;

use crate::SessionStore;

pub const LOGIN_ROUTE: &str = "/login";

pub fn home_route(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin",
        Role::User => "/user",
    }
}

/// Observable current route. Every navigation notifies subscribers, even
/// when the path does not change.
#[derive(Clone)]
pub struct RouteState {
    sender: Arc<watch::Sender<String>>,
}

impl RouteState {
    pub fn new(initial: &str) -> RouteState {
        let (sender, _) = watch::channel(normalize(initial));

        RouteState {
            sender: Arc::new(sender),
        }
    }

    pub fn current(&self) -> String {
        self.sender.borrow().clone()
    }

    pub fn navigate(&self, path: &str) {
        let path = normalize(path);
        debug!("navigate to {path}");
        self.sender.send_replace(path);
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.sender.subscribe()
    }

    pub fn require_signed_in(&self, store: &dyn SessionStore) -> bool {
        if store.get().is_none() {
            self.navigate(LOGIN_ROUTE);
            return false;
        }

        true
    }

    pub fn require_role(&self, store: &dyn SessionStore, role: Role) -> bool {
        match store.get() {
            None => {
                self.navigate(LOGIN_ROUTE);
                false
            }
            Some(session) if session.role != role => {
                self.navigate(home_route(session.role));
                false
            }
            Some(_) => true,
        }
    }
}

fn normalize(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Invoked by the gateway after the backend rejected the session.
pub trait AuthExpiredHandler: Send + Sync {
    fn auth_expired(&self);
}

impl<F> AuthExpiredHandler for F
where
    F: Fn() + Send + Sync,
{
    fn auth_expired(&self) {
        self()
    }
}

/// Clears the stored session and sends the user to sign-in.
pub struct SignOut {
    store: Arc<dyn SessionStore>,
    routes: RouteState,
}

impl SignOut {
    pub fn new(store: Arc<dyn SessionStore>, routes: RouteState) -> SignOut {
        SignOut { store, routes }
    }
}

impl AuthExpiredHandler for SignOut {
    fn auth_expired(&self) {
        if let Err(err) = self.store.clear() {
            error!("unable to clear session: {err}");
        }

        self.routes.navigate(LOGIN_ROUTE);
    }
}
