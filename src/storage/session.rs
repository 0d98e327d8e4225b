use tokio::sync::watch;

use crate::common::{Session, User};

use super::kv::{KeyValueStore, StorageError};

const USER_KEY: &str = "user";
const TOKEN_KEY: &str = "token";

/// Persisted identity of the logged-in user and their auth token.
///
/// Changes to the current user are published to every [`subscribe`](Self::subscribe)r.
pub struct SessionStore<S: KeyValueStore> {
    store: S,
    user_tx: watch::Sender<Option<User>>,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn open(store: S) -> Self {
        let user = load_user(&store);
        let (user_tx, _) = watch::channel(user);
        Self { store, user_tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.user_tx.subscribe()
    }

    pub fn current_user(&self) -> Option<User> {
        self.user_tx.borrow().clone()
    }

    pub fn token(&self) -> Result<Option<String>, StorageError> {
        self.store.get(TOKEN_KEY)
    }

    /// The active session, if both the user and the token are known.
    pub fn session(&self) -> Result<Option<Session>, StorageError> {
        let token = self.token()?;
        Ok(self
            .current_user()
            .zip(token)
            .map(|(user, token)| Session { user, token }))
    }

    pub fn save_user(&mut self, user: User) -> Result<(), StorageError> {
        let json = serde_json::to_string(&user)?;
        self.store.set(USER_KEY, &json)?;
        self.user_tx.send_replace(Some(user));
        Ok(())
    }

    pub fn save_token(&mut self, token: &str) -> Result<(), StorageError> {
        self.store.set(TOKEN_KEY, token)
    }

    /// Forget the user and the token.
    pub fn logout(&mut self) -> Result<(), StorageError> {
        self.store.remove(USER_KEY)?;
        self.store.remove(TOKEN_KEY)?;
        self.user_tx.send_replace(None);
        Ok(())
    }
}

fn load_user<S: KeyValueStore>(store: &S) -> Option<User> {
    let raw = match store.get(USER_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            log::warn!("Failed to read stored user: {err}");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(user) => Some(user),
        Err(err) => {
            log::warn!("Ignoring corrupt stored user: {err}");
            None
        }
    }
}
