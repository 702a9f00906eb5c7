//! Command registry: maps chat command names to handlers.

use std::collections::HashMap;
use std::sync::Arc;

use futures::stream::BoxStream;
use tracing::debug;

/// Replies produced by one invocation, in the order they should be sent.
///
/// Streams are lazy: a handler's network call only starts once the replies
/// before it have been taken.
pub type ReplyStream = BoxStream<'static, String>;

/// A chat command.
pub trait CommandHandler: Send + Sync {
    /// Name the command is invoked by, without the leading `/`.
    fn name(&self) -> &'static str;

    /// One-line description shown in command listings.
    fn description(&self) -> &'static str;

    /// Handles a full message, command name included.
    fn handle(&self, message: &str) -> ReplyStream;
}

/// Registry of chat commands, built once at startup.
pub struct CommandRegistry {
    map: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    /// Create a new registry builder.
    pub fn builder() -> CommandRegistryBuilder {
        CommandRegistryBuilder::default()
    }

    /// Registered command names, sorted.
    pub fn list_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.map.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn CommandHandler>> {
        self.map.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Routes a message to the handler named by its first token.
    ///
    /// Returns `None` when no registered command matches; the host decides
    /// how to answer that.
    pub fn dispatch(&self, message: &str) -> Option<ReplyStream> {
        let name = command_name(message)?;
        let handler = self.map.get(&name)?;
        debug!(command = %name, "dispatching chat command");
        Some(handler.handle(message))
    }
}

/// First token of a message, without a leading `/`, lower-cased.
pub fn command_name(message: &str) -> Option<String> {
    let first = message.split_whitespace().next()?;
    let name = first.strip_prefix('/').unwrap_or(first);
    (!name.is_empty()).then(|| name.to_lowercase())
}

/// Builder for constructing a [`CommandRegistry`].
#[derive(Default)]
pub struct CommandRegistryBuilder {
    handlers: Vec<Arc<dyn CommandHandler>>,
}

impl CommandRegistryBuilder {
    /// Register a handler. A later handler with the same name replaces an
    /// earlier one.
    #[must_use]
    pub fn register<H: CommandHandler + 'static>(self, handler: H) -> Self {
        self.register_arc(Arc::new(handler))
    }

    #[must_use]
    pub fn register_arc(mut self, handler: Arc<dyn CommandHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn finish(self) -> CommandRegistry {
        let map = self
            .handlers
            .into_iter()
            .map(|h| (h.name().to_lowercase(), h))
            .collect();
        CommandRegistry { map }
    }
}
