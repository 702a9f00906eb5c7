//! Chat command plugin for a Bluetooth water controller.
//!
//! The plugin owns no device logic. A chat message such as
//! `/waterctl connect aa:bb:cc:dd:ee:ff` is parsed into a [`Subcommand`], sent
//! to the bridge service as one HTTP request, and the JSON answer is rendered
//! back as reply text.
//!
//! - [`parse()`]: command line to [`Subcommand`]
//! - [`format`](mod@format): bridge payloads to reply text
//! - [`CommandRegistry`]: command name to handler, built at startup
//! - [`WaterctlCommand`]: the `waterctl` handler
//! - [`WaterctlPlugin`]: config, bridge and registry wired together
//!
//! # Example
//! ```no_run
//! use futures::StreamExt;
//! use waterctl_bridge::BridgeConfig;
//! use waterctl_plugin::WaterctlPlugin;
//!
//! # async fn example() {
//! let plugin = WaterctlPlugin::new(BridgeConfig::new());
//! let _ = plugin.initialize().await;
//!
//! let registry = plugin.registry();
//! if let Some(mut replies) = registry.dispatch("/waterctl status") {
//!     while let Some(reply) = replies.next().await {
//!         println!("{reply}");
//!     }
//! }
//! # }
//! ```

pub mod command;
pub mod format;
pub mod parse;
pub mod plugin;
pub mod registry;

pub use command::WaterctlCommand;
pub use parse::{COMMAND_NAME, ParseError, Subcommand, parse};
pub use plugin::WaterctlPlugin;
pub use registry::{CommandHandler, CommandRegistry, CommandRegistryBuilder, ReplyStream};
