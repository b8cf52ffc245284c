pub mod command;
pub mod config;
pub mod request;
pub mod response;

pub use command::{
    ArgumentError, Command, CommandInvocation, CommandSpec, InventoryArgs, OptionValue,
    OrderStatusArgs, ParamKind, Priority, RequestPartArgs, StatusLookup, Subsystem,
};
pub use config::{ConfigError, ConfigFile, RelayConfig};
pub use request::OutboundRequest;
pub use response::{
    DeniedRequest, InventoryItem, InventoryPayload, OpenOrdersPayload, Order, OrderStatusPayload,
    RemoteResponse, RequestAck, RequestRecord,
};
