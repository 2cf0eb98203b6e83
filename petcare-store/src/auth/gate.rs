//! Route gate
//!
//! Decides what a UI router should do with a request path given whether a
//! session exists. Static assets are never gated; the login and register
//! pages are public.

/// Outcome of [`route_gate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    RedirectToLogin,
    RedirectHome,
}

impl GateDecision {
    /// Redirect target, if any
    pub fn location(&self) -> Option<&'static str> {
        match self {
            GateDecision::Allow => None,
            GateDecision::RedirectToLogin => Some(LOGIN_PATH),
            GateDecision::RedirectHome => Some(HOME_PATH),
        }
    }
}

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const HOME_PATH: &str = "/";

const ASSET_PREFIXES: &[&str] = &["/_next/static", "/_next/image", "/favicon.ico"];

fn is_asset(path: &str) -> bool {
    ASSET_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

fn is_public(path: &str) -> bool {
    path.starts_with(LOGIN_PATH) || path.starts_with(REGISTER_PATH)
}

pub fn route_gate(path: &str, authenticated: bool) -> GateDecision {
    if is_asset(path) {
        return GateDecision::Allow;
    }
    match (authenticated, is_public(path)) {
        (false, false) => GateDecision::RedirectToLogin,
        (true, true) => GateDecision::RedirectHome,
        _ => GateDecision::Allow,
    }
}
