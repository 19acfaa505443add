//! Session state and the local sign-in stand-in.
//!
//! This is not an authentication system. Any non-empty email/password pair
//! signs in; the session only decides which name gets stamped into
//! `created_by`. Sign-up keeps a local account directory in the
//! `kanban_users` slot, storing a salted blake3 digest instead of the password.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AuthError, StorageError};
use crate::model::{ANONYMOUS_USER, User, UserId};
use crate::storage::{self, KeyValueStorage, USER_DIRECTORY_SLOT, USER_SLOT};

const MIN_EMAIL_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 6;
const MIN_NAME_LEN: usize = 2;

/// The current user, as seen by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
    current_user: String,
}

impl Session {
    /// The signed-in user record, if any.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Current user name; empty when nobody is set.
    pub fn current_user(&self) -> &str {
        &self.current_user
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Name to stamp into `created_by`.
    pub fn author(&self) -> &str {
        if self.current_user.is_empty() {
            ANONYMOUS_USER
        } else {
            &self.current_user
        }
    }

    pub(crate) fn set_current_user(&mut self, name: String) {
        self.current_user = name;
    }

    pub(crate) fn sign_in(&mut self, user: User) {
        self.current_user = user.name.clone();
        self.user = Some(user);
    }

    pub(crate) fn clear(&mut self) {
        self.user = None;
        self.current_user.clear();
    }
}

/// One entry of the `kanban_users` directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub password_salt: String,
    pub password_hash: String,
}

impl AccountRecord {
    fn new(email: &str, password: &str, name: &str) -> Self {
        let salt = Uuid::new_v4().simple().to_string();
        let hash = password_digest(&salt, password);
        Self {
            id: UserId::new(),
            email: email.to_string(),
            name: name.to_string(),
            password_salt: salt,
            password_hash: hash,
        }
    }

    /// Whether `password` matches the stored digest.
    pub fn verify_password(&self, password: &str) -> bool {
        password_digest(&self.password_salt, password) == self.password_hash
    }

    fn user(&self) -> User {
        User {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

fn password_digest(salt: &str, password: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hasher.finalize().to_hex().to_string()
}

/// Sign in with any non-empty email and password.
///
/// The user name is the part of the email before `@`. The resulting record is
/// mirrored into the `kanban_user` slot.
pub fn login(storage: &dyn KeyValueStorage, email: &str, password: &str) -> Result<User, AuthError> {
    if email.is_empty() || password.is_empty() {
        log::info!("Login rejected: email or password empty");
        return Err(AuthError::MissingCredentials);
    }

    let name = email.split('@').next().unwrap_or_default().to_string();
    let user = User {
        id: UserId::new(),
        email: email.to_string(),
        name,
    };
    storage::write_json(storage, USER_SLOT, &user)?;
    log::info!("Login successful for {}", user.email);
    Ok(user)
}

/// Register an account in the local directory and sign it in.
pub fn signup(
    storage: &dyn KeyValueStorage,
    email: &str,
    password: &str,
    name: &str,
) -> Result<User, AuthError> {
    if email.chars().count() < MIN_EMAIL_LEN {
        return Err(AuthError::Validation(format!(
            "email must be at least {MIN_EMAIL_LEN} characters"
        )));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if name.chars().count() < MIN_NAME_LEN {
        return Err(AuthError::Validation(format!(
            "name must be at least {MIN_NAME_LEN} characters"
        )));
    }

    let mut accounts = directory(storage)?;
    if accounts.iter().any(|a| a.email == email) {
        log::info!("Signup rejected: {email} already registered");
        return Err(AuthError::AlreadyExists(email.to_string()));
    }

    let account = AccountRecord::new(email, password, name);
    let user = account.user();
    accounts.push(account);
    storage::write_json(storage, USER_DIRECTORY_SLOT, &accounts)?;
    storage::write_json(storage, USER_SLOT, &user)?;
    log::info!("Signup successful for {}", user.email);
    Ok(user)
}

/// Forget the persisted user.
pub fn logout(storage: &dyn KeyValueStorage) -> Result<(), AuthError> {
    storage.remove(USER_SLOT)?;
    log::info!("Logged out");
    Ok(())
}

/// Load the user persisted by a previous login, if any.
///
/// An unreadable `kanban_user` slot counts as signed out: it is logged and
/// removed so the store still opens.
pub fn restore(storage: &dyn KeyValueStorage) -> Result<Option<User>, AuthError> {
    match storage::read_json(storage, USER_SLOT) {
        Ok(user) => Ok(user),
        Err(err @ StorageError::Json { .. }) => {
            log::warn!("Discarding unreadable session: {err}");
            storage.remove(USER_SLOT)?;
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// All accounts registered through [`signup`].
pub fn directory(storage: &dyn KeyValueStorage) -> Result<Vec<AccountRecord>, AuthError> {
    Ok(storage::read_json(storage, USER_DIRECTORY_SLOT)?.unwrap_or_default())
}
