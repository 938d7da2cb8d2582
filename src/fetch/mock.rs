use async_trait::async_trait;
use bytes::Bytes;
use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
};
use url::Url;

use super::{FetchedResponse, Fetcher};
use crate::{Error, Result};

/// One canned reply.
#[derive(Debug, Clone)]
pub(crate) enum Scripted {
    Respond { status: u16, body: Vec<u8> },
    Transport,
    BodyError,
}

impl Scripted {
    pub fn ok(body: &str) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self::Respond {
            status,
            body: body.as_bytes().to_vec(),
        }
    }
}

/// Fetcher replaying scripted replies per URL. The last reply queued for a URL
/// repeats once the others are used up.
#[derive(Default)]
pub(crate) struct ScriptedFetcher {
    replies: Mutex<HashMap<String, VecDeque<Scripted>>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, url: &str, reply: Scripted) {
        self.replies
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(reply);
    }

    /// Drop any queued replies for `url` and use `reply` from now on.
    pub fn set(&self, url: &str, reply: Scripted) {
        self.replies
            .lock()
            .unwrap()
            .insert(url.to_string(), VecDeque::from([reply]));
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.as_str() == url)
            .count()
    }

    fn next_reply(&self, url: &str) -> Option<Scripted> {
        let mut replies = self.replies.lock().unwrap();
        let queue = replies.get_mut(url)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn get(&self, url: &Url) -> Result<FetchedResponse> {
        self.requests.lock().unwrap().push(url.to_string());

        let transport = || Error::FetchFailed {
            url: url.to_string(),
            reason: "connection refused".to_string(),
        };

        match self.next_reply(url.as_str()) {
            Some(Scripted::Respond { status, body }) => Ok(FetchedResponse {
                status,
                body: Ok(Bytes::from(body)),
            }),
            Some(Scripted::BodyError) => Ok(FetchedResponse {
                status: 200,
                body: Err(Error::FetchFailed {
                    url: url.to_string(),
                    reason: "connection reset while reading body".to_string(),
                }),
            }),
            Some(Scripted::Transport) | None => Err(transport()),
        }
    }
}
