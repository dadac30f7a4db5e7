//! Session events and the observers that react to them.
//!
//! The data layer never navigates. When a session is refreshed or lost, the
//! client emits a [`SessionEvent`] to every registered [`SessionObserver`];
//! the application decides what to do with it. [`LoginRedirect`] is the
//! stock observer that sends the user to the login view.
//!
//! # Example: closure observer
//!
//! ```no_run
//! use storefront_client::{ApiClient, ClientConfig, SessionEvent};
//!
//! # fn example() -> storefront_client::Result<()> {
//! let client = ApiClient::builder()
//!     .config(ClientConfig::from_env())
//!     .observer(|event: &SessionEvent| {
//!         if let SessionEvent::Expired { reason } = event {
//!             eprintln!("Session lost: {reason}");
//!         }
//!     })
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use reqwest::StatusCode;

// ============================================================================
// Events
// ============================================================================

/// Why a session could not be recovered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpiryReason {
    /// The refresh endpoint itself answered 401 to a regular call
    RefreshEndpointRejected,
    /// The refresh call was rejected (401/400 when the refresh cookie is invalid or expired)
    RefreshRejected {
        /// Status of the refresh response
        status: StatusCode,
    },
    /// The refresh call succeeded but carried no access token
    MissingCredential,
    /// The refresh call failed before a response arrived
    Transport(String),
}

impl std::fmt::Display for ExpiryReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RefreshEndpointRejected => write!(f, "refresh endpoint rejected the session"),
            Self::RefreshRejected { status } => write!(f, "refresh rejected with {status}"),
            Self::MissingCredential => write!(f, "refresh response carried no access token"),
            Self::Transport(e) => write!(f, "refresh call failed: {e}"),
        }
    }
}

/// Session lifecycle event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A silent refresh stored a new access credential
    Refreshed,
    /// The session is gone; the credential store has been cleared
    Expired {
        /// What failed
        reason: ExpiryReason,
    },
}

// ============================================================================
// Observer Trait
// ============================================================================

/// Receives session events from the client.
///
/// Observers run inline on the task that hit the event, so they should be quick.
pub trait SessionObserver: Send + Sync {
    /// Called for every session event
    fn on_session_event(&self, event: &SessionEvent);
}

impl<F> SessionObserver for F
where
    F: Fn(&SessionEvent) + Send + Sync,
{
    fn on_session_event(&self, event: &SessionEvent) {
        self(event);
    }
}

/// Shared, type-erased observer
pub type SharedSessionObserver = Arc<dyn SessionObserver>;

// ============================================================================
// Login Redirect
// ============================================================================

/// Something that can report and change the current view
pub trait Navigator: Send + Sync {
    /// Current location path
    fn current_path(&self) -> String;

    /// Full navigation to `path`
    fn navigate(&self, path: &str);
}

/// Observer that navigates to the login view when the session expires,
/// unless the navigator is already there
pub struct LoginRedirect<N> {
    navigator: N,
    login_view: String,
}

impl<N: Navigator> LoginRedirect<N> {
    /// Redirect to `login_view` through `navigator`
    pub fn new(navigator: N, login_view: impl Into<String>) -> Self {
        Self {
            navigator,
            login_view: login_view.into(),
        }
    }

    /// Wrapped navigator
    pub fn navigator(&self) -> &N {
        &self.navigator
    }
}

impl<N: Navigator> SessionObserver for LoginRedirect<N> {
    fn on_session_event(&self, event: &SessionEvent) {
        let SessionEvent::Expired { reason } = event else {
            return;
        };
        if self.navigator.current_path().contains(&self.login_view) {
            tracing::debug!(%reason, "Session expired on the login view; not redirecting");
            return;
        }
        tracing::info!(%reason, login_view = %self.login_view, "Session expired; redirecting to login");
        self.navigator.navigate(&self.login_view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FakeNavigator {
        path: Mutex<String>,
        navigations: AtomicU32,
    }

    impl FakeNavigator {
        fn at(path: &str) -> Self {
            Self {
                path: Mutex::new(path.to_string()),
                navigations: AtomicU32::new(0),
            }
        }
    }

    impl Navigator for FakeNavigator {
        fn current_path(&self) -> String {
            self.path.lock().unwrap().clone()
        }

        fn navigate(&self, path: &str) {
            self.navigations.fetch_add(1, Ordering::SeqCst);
            *self.path.lock().unwrap() = path.to_string();
        }
    }

    fn expired() -> SessionEvent {
        SessionEvent::Expired {
            reason: ExpiryReason::RefreshRejected {
                status: StatusCode::UNAUTHORIZED,
            },
        }
    }

    #[test]
    fn test_redirects_once() {
        let redirect = LoginRedirect::new(FakeNavigator::at("/orders"), "/login");

        redirect.on_session_event(&expired());
        redirect.on_session_event(&expired());

        assert_eq!(redirect.navigator().current_path(), "/login");
        assert_eq!(redirect.navigator().navigations.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_no_redirect_on_login_view() {
        let redirect = LoginRedirect::new(FakeNavigator::at("/login?next=/cart"), "/login");
        redirect.on_session_event(&expired());
        assert_eq!(redirect.navigator().navigations.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_refreshed_is_ignored() {
        let redirect = LoginRedirect::new(FakeNavigator::at("/orders"), "/login");
        redirect.on_session_event(&SessionEvent::Refreshed);
        assert_eq!(redirect.navigator().navigations.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_closure_observer() {
        let seen = Arc::new(AtomicU32::new(0));
        let counter = seen.clone();
        let observer: SharedSessionObserver = Arc::new(move |_event: &SessionEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        observer.on_session_event(&SessionEvent::Refreshed);
        observer.on_session_event(&expired());
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_reason_display() {
        assert_eq!(
            ExpiryReason::RefreshRejected {
                status: StatusCode::BAD_REQUEST
            }
            .to_string(),
            "refresh rejected with 400 Bad Request"
        );
    }
}
