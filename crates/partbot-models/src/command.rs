use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const REQUEST_PART: &str = "requestpart";
pub const OPEN_ORDERS: &str = "openorders";
pub const ORDER_STATUS: &str = "orderstatus";
pub const INVENTORY: &str = "inventory";

/// Value type of a command parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Integer,
    Number,
}

impl ParamKind {
    /// Discord application command option type code.
    pub fn option_type(self) -> u8 {
        match self {
            ParamKind::String => 3,
            ParamKind::Integer => 4,
            ParamKind::Number => 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub name: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub choices: Vec<Choice>,
}

impl ParamSpec {
    fn optional(name: &'static str, description: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            description,
            kind,
            required: false,
            choices: Vec::new(),
        }
    }
}

/// Declarative description of one slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<ParamSpec>,
}

impl CommandSpec {
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Render this command in the Discord application command format.
    pub fn to_registration_json(&self) -> serde_json::Value {
        let options: Vec<serde_json::Value> = self
            .params
            .iter()
            .map(|p| {
                let mut option = serde_json::json!({
                    "type": p.kind.option_type(),
                    "name": p.name,
                    "description": p.description,
                    "required": p.required,
                });
                if !p.choices.is_empty() {
                    option["choices"] = p
                        .choices
                        .iter()
                        .map(|c| serde_json::json!({ "name": c.name, "value": c.value }))
                        .collect();
                }
                option
            })
            .collect();

        serde_json::json!({
            "name": self.name,
            "description": self.description,
            "options": options,
        })
    }
}

/// The four commands the bot registers, in registration order.
pub fn commands() -> Vec<CommandSpec> {
    vec![
        CommandSpec {
            name: REQUEST_PART,
            description: "Submit an FRC part request to Google Sheets",
            params: vec![
                ParamSpec {
                    name: "subsystem",
                    description: "Subsystem (Drive, Intake, Shooter, Climber, Electrical, etc.)",
                    kind: ParamKind::String,
                    required: true,
                    choices: Subsystem::ALL.iter().map(|s| s.choice()).collect(),
                },
                ParamSpec::optional("link", "Part link (URL)", ParamKind::String),
                ParamSpec::optional("qty", "Quantity", ParamKind::Integer),
                ParamSpec::optional("maxbudget", "Max budget (USD)", ParamKind::Number),
                ParamSpec {
                    choices: Priority::ALL.iter().map(|p| p.choice()).collect(),
                    ..ParamSpec::optional("priority", "Priority", ParamKind::String)
                },
                ParamSpec::optional(
                    "notes",
                    "Additional notes (size, length, etc.)",
                    ParamKind::String,
                ),
            ],
        },
        CommandSpec {
            name: OPEN_ORDERS,
            description: "Show all orders that have not been received",
            params: Vec::new(),
        },
        CommandSpec {
            name: ORDER_STATUS,
            description: "Check order or request status from Google Sheets",
            params: vec![
                ParamSpec::optional("requestid", "Request ID (e.g. REQ-1234)", ParamKind::String),
                ParamSpec::optional("orderid", "Order ID (e.g. ORD-5678)", ParamKind::String),
            ],
        },
        CommandSpec {
            name: INVENTORY,
            description: "Look up inventory from Google Sheets",
            params: vec![
                ParamSpec::optional("sku", "Exact SKU / part number", ParamKind::String),
                ParamSpec::optional("search", "Keyword search in name/SKU", ParamKind::String),
            ],
        },
    ]
}

pub fn find_command(name: &str) -> Option<CommandSpec> {
    commands().into_iter().find(|c| c.name == name)
}

/// Full registration body: every command as a JSON array.
pub fn registration_payload() -> serde_json::Value {
    serde_json::Value::Array(commands().iter().map(|c| c.to_registration_json()).collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subsystem {
    Drive,
    Intake,
    Shooter,
    Climber,
    Mechanical,
    Electrical,
    Vision,
    Pneumatics,
    Software,
    Spares,
    Other,
}

impl Subsystem {
    pub const ALL: [Subsystem; 11] = [
        Subsystem::Drive,
        Subsystem::Intake,
        Subsystem::Shooter,
        Subsystem::Climber,
        Subsystem::Mechanical,
        Subsystem::Electrical,
        Subsystem::Vision,
        Subsystem::Pneumatics,
        Subsystem::Software,
        Subsystem::Spares,
        Subsystem::Other,
    ];

    /// Label shown in the platform's choice picker.
    pub fn label(self) -> &'static str {
        match self {
            Subsystem::Drive => "Drive",
            Subsystem::Intake => "Intake",
            Subsystem::Shooter => "Shooter",
            Subsystem::Climber => "Climber",
            Subsystem::Mechanical => "Mechanical",
            Subsystem::Electrical => "Electrical",
            Subsystem::Vision => "Vision",
            Subsystem::Pneumatics => "Pneumatics",
            Subsystem::Software => "Software",
            Subsystem::Spares => "Spares",
            Subsystem::Other => "Other",
        }
    }

    /// Value submitted to the sheet. The "Software" choice has always been
    /// recorded as "Safety" on the sheet side.
    pub fn value(self) -> &'static str {
        match self {
            Subsystem::Software => "Safety",
            other => other.label(),
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.value() == value)
    }

    fn choice(self) -> Choice {
        Choice {
            name: self.label(),
            value: self.value(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Critical,
        Priority::High,
        Priority::Medium,
        Priority::Low,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Critical => "Critical",
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }

    fn choice(self) -> Choice {
        Choice {
            name: self.as_str(),
            value: self.as_str(),
        }
    }
}

/// A typed option value as delivered by the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Integer(i64),
    Number(f64),
    String(String),
}

impl OptionValue {
    /// Parse raw text according to the declared parameter kind.
    pub fn parse(kind: ParamKind, raw: &str) -> Option<Self> {
        match kind {
            ParamKind::String => Some(OptionValue::String(raw.to_string())),
            ParamKind::Integer => raw.trim().parse().ok().map(OptionValue::Integer),
            ParamKind::Number => raw.trim().parse().ok().map(OptionValue::Number),
        }
    }
}

/// One command invocation as delivered by the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandInvocation {
    pub command_name: String,
    pub requester: String,
    #[serde(default)]
    pub options: HashMap<String, OptionValue>,
}

impl CommandInvocation {
    pub fn new(command_name: impl Into<String>, requester: impl Into<String>) -> Self {
        Self {
            command_name: command_name.into(),
            requester: requester.into(),
            options: HashMap::new(),
        }
    }

    pub fn with_option(mut self, name: impl Into<String>, value: OptionValue) -> Self {
        self.options.insert(name.into(), value);
        self
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        match self.options.get(name) {
            Some(OptionValue::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.options.get(name) {
            Some(OptionValue::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        match self.options.get(name) {
            Some(OptionValue::Number(n)) => Some(*n),
            Some(OptionValue::Integer(i)) => Some(*i as f64),
            _ => None,
        }
    }

    /// String option with blank values treated as absent.
    fn non_empty(&self, name: &str) -> Option<String> {
        self.string(name)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArgumentError {
    #[error("missing required option `{0}`")]
    Missing(&'static str),

    #[error("`{value}` is not a valid choice for `{param}`")]
    InvalidChoice { param: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestPartArgs {
    pub requester: String,
    pub subsystem: Subsystem,
    pub link: Option<String>,
    pub quantity: i64,
    pub max_budget: Option<f64>,
    pub priority: Priority,
    pub notes: Option<String>,
}

impl RequestPartArgs {
    fn from_invocation(inv: &CommandInvocation) -> Result<Self, ArgumentError> {
        let raw_subsystem = inv
            .string("subsystem")
            .ok_or(ArgumentError::Missing("subsystem"))?;
        let subsystem =
            Subsystem::from_value(raw_subsystem).ok_or_else(|| ArgumentError::InvalidChoice {
                param: "subsystem",
                value: raw_subsystem.to_string(),
            })?;

        let priority = match inv.non_empty("priority") {
            Some(raw) => Priority::from_value(&raw).ok_or(ArgumentError::InvalidChoice {
                param: "priority",
                value: raw,
            })?,
            None => Priority::default(),
        };

        // Zero quantity and zero budget fall back to their defaults.
        let quantity = inv.integer("qty").filter(|q| *q != 0).unwrap_or(1);
        let max_budget = inv.number("maxbudget").filter(|b| *b != 0.0 && !b.is_nan());

        Ok(Self {
            requester: inv.requester.clone(),
            subsystem,
            link: inv.non_empty("link"),
            quantity,
            max_budget,
            priority,
            notes: inv.non_empty("notes"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderStatusArgs {
    pub request_id: String,
    pub order_id: String,
}

/// Which record an order-status lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLookup<'a> {
    Request(&'a str),
    Order(&'a str),
}

impl OrderStatusArgs {
    pub fn new(request_id: &str, order_id: &str) -> Self {
        Self {
            request_id: request_id.trim().to_string(),
            order_id: order_id.trim().to_string(),
        }
    }

    /// The request id wins when both are supplied. `None` when both are blank.
    pub fn lookup(&self) -> Option<StatusLookup<'_>> {
        if !self.request_id.is_empty() {
            Some(StatusLookup::Request(&self.request_id))
        } else if !self.order_id.is_empty() {
            Some(StatusLookup::Order(&self.order_id))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InventoryArgs {
    pub sku: String,
    pub search: String,
}

impl InventoryArgs {
    pub fn new(sku: &str, search: &str) -> Self {
        Self {
            sku: sku.trim().to_string(),
            search: search.trim().to_string(),
        }
    }

    /// The term echoed back in replies: the sku when given, else the search.
    pub fn query_term(&self) -> Option<&str> {
        [&self.sku, &self.search]
            .into_iter()
            .find(|s| !s.is_empty())
            .map(String::as_str)
    }
}

/// A command with its arguments already extracted and typed.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    RequestPart(RequestPartArgs),
    OpenOrders,
    OrderStatus(OrderStatusArgs),
    Inventory(InventoryArgs),
}

impl Command {
    /// `Ok(None)` for command names this bot does not handle.
    pub fn parse(inv: &CommandInvocation) -> Result<Option<Self>, ArgumentError> {
        let command = match inv.command_name.as_str() {
            REQUEST_PART => Command::RequestPart(RequestPartArgs::from_invocation(inv)?),
            OPEN_ORDERS => Command::OpenOrders,
            ORDER_STATUS => Command::OrderStatus(OrderStatusArgs::new(
                inv.string("requestid").unwrap_or_default(),
                inv.string("orderid").unwrap_or_default(),
            )),
            INVENTORY => Command::Inventory(InventoryArgs::new(
                inv.string("sku").unwrap_or_default(),
                inv.string("search").unwrap_or_default(),
            )),
            _ => return Ok(None),
        };
        Ok(Some(command))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::RequestPart(_) => REQUEST_PART,
            Command::OpenOrders => OPEN_ORDERS,
            Command::OrderStatus(_) => ORDER_STATUS,
            Command::Inventory(_) => INVENTORY,
        }
    }
}
