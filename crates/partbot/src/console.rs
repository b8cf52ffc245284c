//! Terminal surface: run a command locally and print what the requester
//! would have seen.

use std::io::Write;
use std::sync::Mutex;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use partbot_models::command::find_command;
use partbot_models::{CommandInvocation, OptionValue};
use partbot_relay::{RelayError, Reply, Responder, Visibility};
use tracing::debug;

/// Build an invocation from `name=value` pairs, typed by the command schema.
pub fn parse_invocation(
    command: &str,
    requester: &str,
    options: &[String],
) -> Result<CommandInvocation> {
    let spec = find_command(command).ok_or_else(|| anyhow!("Unknown command: {command}"))?;

    let mut invocation = CommandInvocation::new(command, requester);
    for raw in options {
        let (name, value) = raw
            .split_once('=')
            .ok_or_else(|| anyhow!("Expected NAME=VALUE, got `{raw}`"))?;
        let Some(param) = spec.param(name) else {
            bail!("`{command}` has no option named `{name}`");
        };
        let value = OptionValue::parse(param.kind, value)
            .ok_or_else(|| anyhow!("`{name}` expects {:?}, got `{value}`", param.kind))?;
        invocation = invocation.with_option(name, value);
    }
    Ok(invocation)
}

fn label(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Private => "[private]",
        Visibility::Public => "[public]",
    }
}

/// A [`Responder`] that writes replies to a stream, tagged with their visibility.
pub struct ConsoleResponder<W: Write + Send> {
    out: Mutex<W>,
    deferred: Mutex<Option<Visibility>>,
}

impl ConsoleResponder<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleResponder<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            deferred: Mutex::new(None),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self, visibility: Visibility, content: &str) -> Result<(), RelayError> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| RelayError::Respond("console writer poisoned".to_string()))?;
        writeln!(out, "{} {content}", label(visibility))
            .and_then(|_| out.flush())
            .map_err(|e| RelayError::Respond(e.to_string()))
    }
}

#[async_trait]
impl<W: Write + Send> Responder for ConsoleResponder<W> {
    async fn reply(&self, reply: Reply) -> Result<(), RelayError> {
        self.write(reply.visibility, &reply.content)
    }

    async fn defer(&self, visibility: Visibility) -> Result<(), RelayError> {
        debug!(visibility = label(visibility), "Deferred reply");
        let mut deferred = self
            .deferred
            .lock()
            .map_err(|_| RelayError::Respond("console state poisoned".to_string()))?;
        *deferred = Some(visibility);
        Ok(())
    }

    async fn edit_reply(&self, content: String) -> Result<(), RelayError> {
        let visibility = self
            .deferred
            .lock()
            .map_err(|_| RelayError::Respond("console state poisoned".to_string()))?
            .ok_or_else(|| RelayError::Respond("edit without a deferred reply".to_string()))?;
        self.write(visibility, &content)
    }
}
