//! Translux Sign Serial Protocol
//!
//! This crate defines the line-oriented ASCII protocol a host uses to set
//! the text shown on the sign. The sign listens on a plain UART (9600 baud
//! by default) and accepts one command at a time.
//!
//! # Protocol Overview
//!
//! ```text
//! ┌─────────┬──────────────────────────┬──────────────────────────────┐
//! │ COMMAND │ ARGUMENTS                │ MEANING                      │
//! ├─────────┼──────────────────────────┼──────────────────────────────┤
//! │ ?       │ -                        │ print help                   │
//! │ r       │ -                        │ read back current message    │
//! │ c       │ -                        │ clear the message buffer     │
//! │ s       │ ROW(1-4) TEXT CR|LF      │ set one row of text          │
//! │ b       │ TEXT CR|LF               │ load text as a single block  │
//! └─────────┴──────────────────────────┴──────────────────────────────┘
//! ```
//!
//! Line terminators and blanks between commands are ignored, so a host can
//! send `s1HELLO\r\n` and the trailing `\n` is simply skipped.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod parser;

pub use command::{Command, CommandError, Text, MAX_COMMAND_SIZE, MAX_TEXT_LEN, ROW_COUNT};
pub use parser::CommandParser;
