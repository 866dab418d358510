//! Production adapters for the outbound ports.

pub mod conf_dir;
pub mod console;
pub mod http_registry;
pub mod ws_probe;

pub use conf_dir::ConfDirStore;
pub use console::ConsoleReporter;
pub use http_registry::HttpRegistry;
pub use ws_probe::WsChainProbe;
