use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::IsTerminal;

use crate::core::pipeline::OutboundMessage;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Self {
        match name {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub pretty: bool,
    pub use_color: bool,
    pub verbose: bool,
}

/// `color` is the config value: auto, always or never.
pub fn detect_color(color_flag: bool, color: &str) -> bool {
    if !color_flag || color == "never" {
        return false;
    }
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    color == "always" || std::io::stdout().is_terminal()
}

#[derive(Serialize, Debug, PartialEq)]
struct MessagePayload {
    kind: &'static str,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'static str>,
}

fn payload(message: &OutboundMessage) -> MessagePayload {
    match message {
        OutboundMessage::Text(text) => MessagePayload {
            kind: "text",
            text: text.clone(),
            error: None,
        },
        OutboundMessage::Error(err) => MessagePayload {
            kind: "error",
            text: err.to_string(),
            error: Some(err.kind()),
        },
    }
}

/// Print the reply channel. Returns true when any message is an error.
pub fn print_messages(messages: &[OutboundMessage], opts: &OutputOptions) -> Result<bool> {
    let failed = messages
        .iter()
        .any(|m| matches!(m, OutboundMessage::Error(_)));

    match opts.format {
        OutputFormat::Text => {
            if opts.use_color {
                colored::control::set_override(true);
            }
            for message in messages {
                match message {
                    OutboundMessage::Text(text) => println!("{}", text),
                    OutboundMessage::Error(err) if opts.use_color => {
                        println!("{}", err.to_string().red())
                    }
                    OutboundMessage::Error(err) => println!("{}", err),
                }
            }
        }
        OutputFormat::Json => {
            let payloads: Vec<MessagePayload> = messages.iter().map(payload).collect();
            let json = if opts.pretty {
                serde_json::to_string_pretty(&payloads)?
            } else {
                serde_json::to_string(&payloads)?
            };
            println!("{}", json);

            if failed && opts.verbose {
                for message in messages {
                    if let OutboundMessage::Error(err) = message {
                        eprintln!("Report failed ({}): {}", err.kind(), err);
                    }
                }
            }
        }
    }

    Ok(failed)
}
