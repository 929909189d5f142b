//! Services driving the session lifecycle.

use crate::domain::user::{Credentials, NewUser, User};
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::repository::AuthGateway;
use crate::services::{ServiceError, ServiceResult};
use crate::session::Session;

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";

/// Resolves the user behind the stored session cookie, once at startup.
///
/// Any failure leaves the session anonymous.
pub async fn restore_session<G>(gateway: &G, session: &Session) -> Option<User>
where
    G: AuthGateway + ?Sized,
{
    match gateway.current_user().await {
        Ok(user) => {
            log::info!("Restored session for {}", user.email);
            session.sign_in(user.clone());
            Some(user)
        }
        Err(err) => {
            log::debug!("No active session: {err}");
            session.sign_out();
            None
        }
    }
}

/// Signs in with the submitted credentials.
pub async fn login<G>(gateway: &G, session: &Session, form: &LoginForm) -> ServiceResult<User>
where
    G: AuthGateway + ?Sized,
{
    let credentials = Credentials::try_from(form)?;
    session.clear_error();

    let user = gateway.login(&credentials).await.map_err(|err| {
        let err = ServiceError::store(err, LOGIN_FAILED);
        log::error!("{LOGIN_FAILED}: {err}");
        session.set_error(err.message());
        err
    })?;

    log::info!("Signed in as {}", user.email);
    session.sign_in(user.clone());
    Ok(user)
}

/// Creates an account and signs it in.
pub async fn register<G>(gateway: &G, session: &Session, form: &RegisterForm) -> ServiceResult<User>
where
    G: AuthGateway + ?Sized,
{
    let new_user = NewUser::try_from(form)?;
    session.clear_error();

    let user = gateway.register(&new_user).await.map_err(|err| {
        let err = ServiceError::store(err, REGISTRATION_FAILED);
        log::error!("{REGISTRATION_FAILED}: {err}");
        session.set_error(err.message());
        err
    })?;

    log::info!("Registered {}", user.email);
    session.sign_in(user.clone());
    Ok(user)
}

/// Ends the session locally even when the server call fails.
pub async fn logout<G>(gateway: &G, session: &Session)
where
    G: AuthGateway + ?Sized,
{
    if let Err(err) = gateway.logout().await {
        log::error!("Logout request failed: {err}");
    }
    session.clear_error();
    session.sign_out();
}
