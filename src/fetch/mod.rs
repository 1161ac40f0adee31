//! Remote user service glue. Calls run on worker threads so the UI thread
//! never blocks; each outcome arrives as an [`ApiEvent`] on an `mpsc`
//! channel and settles into a generation-keyed [`QuerySlot`], which is how
//! stale responses are discarded without explicit cancellation.

use std::fmt;
use std::sync::mpsc::Sender;
use std::thread;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

use crate::domain::{User, UserPatch};

/// Tri-state outcome of a query. There is no fourth state: a query is
/// loading until it settles, and a refetch replaces a success with a new
/// loading.
#[derive(Debug, Clone)]
pub enum FetchResult<T> {
    Loading,
    Error(FetchError),
    Success(T),
}

impl<T> FetchResult<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchResult::Loading)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            FetchResult::Success(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum FetchError {
    /// Transport-level failure.
    Network(String),
    /// Non-2xx response.
    Http { status: u16 },
    /// Response body did not match the expected record shape.
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(reason) => write!(f, "network error: {reason}"),
            FetchError::Http { status } => write!(f, "server returned status {status}"),
            FetchError::Decode(reason) => write!(f, "unexpected response shape: {reason}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// A tri-state slot for one logical query. The generation counter makes a
/// superseding fetch logically replace the pending one: a settle carrying
/// an older generation is ignored.
#[derive(Debug)]
pub struct QuerySlot<T> {
    generation: u64,
    result: FetchResult<T>,
}

impl<T> Default for QuerySlot<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            result: FetchResult::Loading,
        }
    }
}

impl<T> QuerySlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a (re)fetch: the slot goes back to loading and the returned
    /// generation must accompany the eventual settle.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.result = FetchResult::Loading;
        self.generation
    }

    /// Settle the slot. Returns false when the response was superseded.
    pub fn settle(&mut self, generation: u64, result: Result<T, FetchError>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.result = match result {
            Ok(value) => FetchResult::Success(value),
            Err(err) => FetchResult::Error(err),
        };
        true
    }

    /// Replace the value in place without a fetch (cache update after a
    /// successful mutation).
    pub fn put(&mut self, value: T) {
        self.result = FetchResult::Success(value);
    }

    pub fn result(&self) -> &FetchResult<T> {
        &self.result
    }

    pub fn result_mut(&mut self) -> &mut FetchResult<T> {
        &mut self.result
    }
}

/// Outcomes delivered back to the UI thread.
#[derive(Debug)]
pub enum ApiEvent {
    UsersLoaded {
        generation: u64,
        result: Result<Vec<User>, FetchError>,
    },
    UserLoaded {
        id: String,
        generation: u64,
        result: Result<User, FetchError>,
    },
    UserUpdated {
        id: String,
        result: Result<User, FetchError>,
    },
}

/// Blocking HTTP client for the user service, always invoked from worker
/// threads.
#[derive(Debug, Clone)]
pub struct UserApi {
    base_url: String,
    client: Client,
    events: Sender<ApiEvent>,
}

impl UserApi {
    pub fn new(base_url: impl Into<String>, events: Sender<ApiEvent>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
            events,
        }
    }

    /// `GET /users`
    pub fn fetch_users(&self, generation: u64) {
        let api = self.clone();
        thread::spawn(move || {
            let result = get_json::<Vec<User>>(&api.client, &format!("{}/users", api.base_url));
            let _ = api.events.send(ApiEvent::UsersLoaded { generation, result });
        });
    }

    /// `GET /users/{id}`
    pub fn fetch_user(&self, id: &str, generation: u64) {
        let api = self.clone();
        let id = id.to_string();
        thread::spawn(move || {
            let result = get_json::<User>(&api.client, &format!("{}/users/{}", api.base_url, id));
            let _ = api.events.send(ApiEvent::UserLoaded {
                id,
                generation,
                result,
            });
        });
    }

    /// `PATCH /users/{id}`
    pub fn update_user(&self, id: &str, patch: UserPatch) {
        let api = self.clone();
        let id = id.to_string();
        thread::spawn(move || {
            let result = patch_json::<User>(
                &api.client,
                &format!("{}/users/{}", api.base_url, id),
                &patch,
            );
            let _ = api.events.send(ApiEvent::UserUpdated { id, result });
        });
    }
}

fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, FetchError> {
    let response = client
        .get(url)
        .send()
        .map_err(|err| FetchError::Network(err.to_string()))?;
    decode_response(response)
}

fn patch_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    body: &UserPatch,
) -> Result<T, FetchError> {
    let response = client
        .patch(url)
        .json(body)
        .send()
        .map_err(|err| FetchError::Network(err.to_string()))?;
    decode_response(response)
}

fn decode_response<T: DeserializeOwned>(
    response: reqwest::blocking::Response,
) -> Result<T, FetchError> {
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http {
            status: status.as_u16(),
        });
    }
    let body = response
        .text()
        .map_err(|err| FetchError::Network(err.to_string()))?;
    serde_json::from_str(&body).map_err(|err| FetchError::Decode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn superseded_settle_is_ignored() {
        let mut slot: QuerySlot<u32> = QuerySlot::new();
        let first = slot.begin();
        let second = slot.begin();
        assert!(!slot.settle(first, Ok(1)));
        assert!(slot.result().is_loading());
        assert!(slot.settle(second, Ok(2)));
        assert_eq!(slot.result().success(), Some(&2));
    }

    #[test]
    fn refetch_replaces_success_with_loading() {
        let mut slot: QuerySlot<u32> = QuerySlot::new();
        let generation = slot.begin();
        slot.settle(generation, Ok(7));
        slot.begin();
        assert!(slot.result().is_loading());
    }

    #[test]
    fn error_settles_as_terminal_state() {
        let mut slot: QuerySlot<u32> = QuerySlot::new();
        let generation = slot.begin();
        slot.settle(generation, Err(FetchError::Http { status: 500 }));
        assert!(matches!(
            slot.result(),
            FetchResult::Error(FetchError::Http { status: 500 })
        ));
    }
}
