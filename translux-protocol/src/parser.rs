//! Byte-at-a-time command parser
//!
//! The sign receives commands from a UART one byte at a time, so the parser
//! is a small state machine that yields a [`Command`] once the final byte of
//! a command has been seen.

use crate::command::{
    Command, CommandError, Text, CMD_BLOCK, CMD_CLEAR, CMD_HELP, CMD_READBACK, CMD_SET_ROW,
    ROW_COUNT,
};

/// State machine for parsing incoming commands
#[derive(Debug, Clone)]
pub struct CommandParser {
    state: ParseState,
    text: Text,
    truncated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for a command byte
    Idle,
    /// Got `s`, waiting for the row digit
    WaitingForRow,
    /// Collecting row text until CR/LF
    ReadingRow(u8),
    /// Collecting block text until CR/LF
    ReadingBlock,
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandParser {
    /// Create a new command parser
    pub fn new() -> Self {
        Self {
            state: ParseState::Idle,
            text: Text::new(),
            truncated: false,
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::Idle;
        self.text.clear();
        self.truncated = false;
    }

    /// Whether the text of the most recent text command overflowed
    ///
    /// Bytes past [`MAX_TEXT_LEN`](crate::MAX_TEXT_LEN) are dropped, the same
    /// way the sign's message buffer truncates at capacity.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Check if the parser is between commands
    pub fn is_idle(&self) -> bool {
        self.state == ParseState::Idle
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(command))` when a complete command is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on parse error.
    /// After an error the parser is back in its idle state.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Command>, CommandError> {
        match self.state {
            ParseState::Idle => match byte {
                // Stray terminators and blanks between commands
                b'\r' | b'\n' | b' ' | b'\t' | 0 => Ok(None),
                CMD_HELP => Ok(Some(Command::Help)),
                CMD_READBACK => Ok(Some(Command::Readback)),
                CMD_CLEAR => Ok(Some(Command::Clear)),
                CMD_SET_ROW => {
                    self.state = ParseState::WaitingForRow;
                    Ok(None)
                }
                CMD_BLOCK => {
                    self.begin_text(ParseState::ReadingBlock);
                    Ok(None)
                }
                other => Err(CommandError::UnknownCommand(other)),
            },
            ParseState::WaitingForRow => {
                if (b'1'..b'1' + ROW_COUNT).contains(&byte) {
                    self.begin_text(ParseState::ReadingRow(byte - b'1'));
                    Ok(None)
                } else {
                    self.reset();
                    Err(CommandError::InvalidRow(byte))
                }
            }
            ParseState::ReadingRow(row) => {
                if is_terminator(byte) {
                    let text = self.take_text();
                    Ok(Some(Command::SetRow { row, text }))
                } else {
                    self.push_text(byte);
                    Ok(None)
                }
            }
            ParseState::ReadingBlock => {
                if is_terminator(byte) {
                    let text = self.take_text();
                    Ok(Some(Command::Block { text }))
                } else {
                    self.push_text(byte);
                    Ok(None)
                }
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete command found, if any.
    /// Remaining bytes after a complete command are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Command>, CommandError> {
        for &byte in bytes {
            if let Some(command) = self.feed(byte)? {
                return Ok(Some(command));
            }
        }
        Ok(None)
    }

    fn begin_text(&mut self, state: ParseState) {
        self.text.clear();
        self.truncated = false;
        self.state = state;
    }

    fn push_text(&mut self, byte: u8) {
        if self.text.push(byte).is_err() {
            self.truncated = true;
        }
    }

    fn take_text(&mut self) -> Text {
        let text = self.text.clone();
        self.text.clear();
        self.state = ParseState::Idle;
        text
    }
}

fn is_terminator(byte: u8) -> bool {
    byte == b'\r' || byte == b'\n'
}
