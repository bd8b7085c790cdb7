//! # Auth Commands
//!
//! Register, sign in and sign out against the in-process account list.

use tracing::{debug, warn};

use bite_core::User;

use crate::error::ApiError;
use crate::notify::Notifier;
use crate::state::{RegisterForm, SessionState};

/// Creates an account and signs it in.
///
/// ## Errors
/// - `VALIDATION_ERROR` - bad name, email, short password or mismatched confirmation
/// - `CONFLICT` - email already registered
pub async fn register(
    session: &SessionState,
    notifier: &dyn Notifier,
    form: RegisterForm,
) -> Result<User, ApiError> {
    debug!("register command");

    match session.register(form).await {
        Ok(user) => {
            notifier.success(
                "Account Created!",
                "Welcome to Yellow Bite! You can now start ordering.",
            );
            Ok(user)
        }
        Err(e) => {
            let err = ApiError::from(e);
            warn!(error = %err, "Registration failed");
            notifier.destructive("Registration Failed", &err.message);
            Err(err)
        }
    }
}

/// Signs in an existing account.
pub async fn login(
    session: &SessionState,
    notifier: &dyn Notifier,
    email: &str,
    password: &str,
) -> Result<User, ApiError> {
    debug!("login command");

    match session.login(email, password).await {
        Ok(user) => {
            notifier.success("Welcome back!", &format!("Signed in as {}.", user.name));
            Ok(user)
        }
        Err(e) => {
            let err = ApiError::from(e);
            notifier.destructive("Login Failed", &err.message);
            Err(err)
        }
    }
}

/// Signs out. Returns who was signed in, if anyone.
pub fn logout(session: &SessionState) -> Option<User> {
    debug!("logout command");
    session.logout()
}

/// The signed-in user, if any.
pub fn current_user(session: &SessionState) -> Option<User> {
    session.current_user()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::notify::RecordingNotifier;
    use bite_core::NotificationKind;
    use std::time::Duration;

    fn form(email: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            name: "Jane Doe".to_string(),
            email: email.to_string(),
            password: "secret1".to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_toasts() {
        let session = SessionState::new(Duration::ZERO);
        let notifier = RecordingNotifier::new();

        register(&session, &notifier, form("jane@example.com", "secret1"))
            .await
            .unwrap();
        let toast = notifier.last().unwrap();
        assert_eq!(toast.kind, NotificationKind::Success);
        assert_eq!(toast.title, "Account Created!");
        assert_eq!(current_user(&session).map(|u| u.name), Some("Jane Doe".to_string()));

        let err = register(&session, &notifier, form("jane@example.com", "secret1"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(notifier.last().unwrap().title, "Registration Failed");

        let err = register(&session, &notifier, form("joe@example.com", "other12"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_login_after_logout() {
        let session = SessionState::new(Duration::ZERO);
        let notifier = RecordingNotifier::new();
        register(&session, &notifier, form("jane@example.com", "secret1"))
            .await
            .unwrap();

        assert!(logout(&session).is_some());
        assert!(logout(&session).is_none());

        let err = login(&session, &notifier, "jane@example.com", "nope123")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert_eq!(notifier.last().unwrap().kind, NotificationKind::Destructive);

        login(&session, &notifier, "jane@example.com", "secret1")
            .await
            .unwrap();
        assert_eq!(notifier.last().unwrap().title, "Welcome back!");
        assert!(session.is_authenticated());
    }
}
