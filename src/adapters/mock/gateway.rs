//! Scripted command gateway for testing.
//!
//! Responses are configured per command name. A command can also be put on
//! hold: calls to it park until the test releases them, in any order, which
//! is how out-of-order completions are exercised.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

use crate::error::CommandError;
use crate::traits::CommandGateway;

type Reply = Result<Value, CommandError>;

/// A recorded gateway call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub command: String,
    pub args: Value,
}

/// A parked call waiting for [`MockGateway::release`].
struct HeldCall {
    args: Value,
    reply: oneshot::Sender<Reply>,
}

#[derive(Default)]
struct MockGatewayState {
    sticky: HashMap<String, Reply>,
    queued: HashMap<String, VecDeque<Reply>>,
    held_commands: HashSet<String>,
    held: HashMap<String, Vec<HeldCall>>,
    calls: Vec<RecordedCall>,
}

/// Gateway returning scripted replies. Clones share state.
#[derive(Clone, Default)]
pub struct MockGateway {
    state: Arc<Mutex<MockGatewayState>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answer `command` with `value`.
    pub fn respond(&self, command: &str, value: Value) -> &Self {
        self.state
            .lock()
            .unwrap()
            .sticky
            .insert(command.to_string(), Ok(value));
        self
    }

    /// Always fail `command` with a backend error carrying `message`.
    pub fn fail(&self, command: &str, message: &str) -> &Self {
        self.state.lock().unwrap().sticky.insert(
            command.to_string(),
            Err(CommandError::Backend {
                command: command.to_string(),
                message: message.to_string(),
            }),
        );
        self
    }

    /// Answer the next call to `command` with `reply`. Queued replies are
    /// consumed before the sticky one.
    pub fn respond_once(&self, command: &str, reply: Reply) -> &Self {
        self.state
            .lock()
            .unwrap()
            .queued
            .entry(command.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    /// Park every subsequent call to `command` until released.
    pub fn hold(&self, command: &str) -> &Self {
        self.state
            .lock()
            .unwrap()
            .held_commands
            .insert(command.to_string());
        self
    }

    /// Number of calls to `command` currently parked.
    pub fn pending(&self, command: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .held
            .get(command)
            .map_or(0, Vec::len)
    }

    /// Yield until `count` calls to `command` are parked.
    pub async fn wait_for_pending(&self, command: &str, count: usize) {
        while self.pending(command) < count {
            tokio::task::yield_now().await;
        }
    }

    /// Complete the parked call at arrival position `index` with `reply`.
    ///
    /// Returns the arguments that call was made with, or `None` if there is
    /// no such parked call.
    pub fn release(&self, command: &str, index: usize, reply: Reply) -> Option<Value> {
        let held = {
            let mut state = self.state.lock().unwrap();
            let calls = state.held.get_mut(command)?;
            if index >= calls.len() {
                return None;
            }
            calls.remove(index)
        };
        let _ = held.reply.send(reply);
        Some(held.args)
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Calls made to `command`, in order.
    pub fn calls_to(&self, command: &str) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter(|c| c.command == command)
            .map(|c| c.args)
            .collect()
    }

    fn next_reply(state: &mut MockGatewayState, command: &str) -> Reply {
        if let Some(reply) = state.queued.get_mut(command).and_then(VecDeque::pop_front) {
            return reply;
        }
        state.sticky.get(command).cloned().unwrap_or_else(|| {
            Err(CommandError::Backend {
                command: command.to_string(),
                message: format!("No mock reply for '{}'", command),
            })
        })
    }
}

#[async_trait]
impl CommandGateway for MockGateway {
    async fn invoke(&self, command: &str, args: Value) -> Result<Value, CommandError> {
        let parked = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(RecordedCall {
                command: command.to_string(),
                args: args.clone(),
            });
            if state.held_commands.contains(command) {
                let (tx, rx) = oneshot::channel();
                state
                    .held
                    .entry(command.to_string())
                    .or_default()
                    .push(HeldCall { args, reply: tx });
                Some(rx)
            } else {
                None
            }
        };

        match parked {
            Some(rx) => rx.await.unwrap_or_else(|_| {
                Err(CommandError::Transport {
                    command: command.to_string(),
                    message: "mock call dropped".to_string(),
                })
            }),
            None => Self::next_reply(&mut self.state.lock().unwrap(), command),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_queued_before_sticky() {
        let gw = MockGateway::new();
        gw.respond("get_settings", json!({"a": 1}))
            .respond_once("get_settings", Ok(json!({"a": 0})));

        assert_eq!(gw.invoke("get_settings", json!({})).await.unwrap(), json!({"a": 0}));
        assert_eq!(gw.invoke("get_settings", json!({})).await.unwrap(), json!({"a": 1}));
        assert_eq!(gw.calls_to("get_settings").len(), 2);
    }

    #[tokio::test]
    async fn test_unscripted_command_fails() {
        let gw = MockGateway::new();
        assert!(gw.invoke("nope", json!(null)).await.is_err());
    }

    #[tokio::test]
    async fn test_held_calls_release_out_of_order() {
        let gw = MockGateway::new();
        gw.hold("search_mods");

        let first = tokio::spawn({
            let gw = gw.clone();
            async move { gw.invoke("search_mods", json!({"query": "a"})).await }
        });
        gw.wait_for_pending("search_mods", 1).await;
        let second = tokio::spawn({
            let gw = gw.clone();
            async move { gw.invoke("search_mods", json!({"query": "ab"})).await }
        });
        gw.wait_for_pending("search_mods", 2).await;

        let args = gw.release("search_mods", 1, Ok(json!("B"))).unwrap();
        assert_eq!(args, json!({"query": "ab"}));
        assert_eq!(second.await.unwrap().unwrap(), json!("B"));

        gw.release("search_mods", 0, Ok(json!("A")));
        assert_eq!(first.await.unwrap().unwrap(), json!("A"));
        assert_eq!(gw.pending("search_mods"), 0);
    }
}
