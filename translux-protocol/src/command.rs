//! Commands understood by the sign
//!
//! Each command starts with a single ASCII command byte. Text-carrying
//! commands run until the first CR or LF.

use heapless::Vec;

// Command bytes
pub const CMD_HELP: u8 = b'?';
pub const CMD_READBACK: u8 = b'r';
pub const CMD_CLEAR: u8 = b'c';
pub const CMD_SET_ROW: u8 = b's';
pub const CMD_BLOCK: u8 = b'b';

/// Line terminator written by the encoder
pub const LINE_END: &[u8] = b"\r\n";

/// Number of addressable rows (`s1` through `s4`)
pub const ROW_COUNT: u8 = 4;

/// Maximum text carried by a single command
///
/// Matches the sign's message buffer capacity.
pub const MAX_TEXT_LEN: usize = 256;

/// Maximum encoded command size (COMMAND + ROW + TEXT + CR LF)
pub const MAX_COMMAND_SIZE: usize = 1 + 1 + MAX_TEXT_LEN + LINE_END.len();

/// Bounded text payload
pub type Text = Vec<u8, MAX_TEXT_LEN>;

/// Errors that can occur while parsing or encoding commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// First byte of a command is not a known command byte
    UnknownCommand(u8),
    /// Row digit after `s` is not in `1..=4`
    InvalidRow(u8),
    /// Text exceeds [`MAX_TEXT_LEN`]
    TextTooLong,
    /// Text contains a line terminator and cannot be encoded
    InvalidText,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// A parsed or constructed command
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Print the help text
    Help,
    /// Report the current message contents
    Readback,
    /// Reset the message buffer to blanks
    Clear,
    /// Set the text of one row (0-based)
    SetRow { row: u8, text: Text },
    /// Load text into the buffer as one unsegmented block
    Block { text: Text },
}

impl Command {
    /// Create a row command, `row` being 0-based
    pub fn set_row(row: u8, text: &[u8]) -> Result<Self, CommandError> {
        if row >= ROW_COUNT {
            return Err(CommandError::InvalidRow(row));
        }
        Ok(Command::SetRow {
            row,
            text: Self::text_from(text)?,
        })
    }

    /// Create a block command
    pub fn block(text: &[u8]) -> Result<Self, CommandError> {
        Ok(Command::Block {
            text: Self::text_from(text)?,
        })
    }

    fn text_from(text: &[u8]) -> Result<Text, CommandError> {
        if text.iter().any(|&b| b == b'\r' || b == b'\n') {
            return Err(CommandError::InvalidText);
        }
        let mut vec = Vec::new();
        vec.extend_from_slice(text)
            .map_err(|_| CommandError::TextTooLong)?;
        Ok(vec)
    }

    /// The command byte that introduces this command on the wire
    pub fn command_byte(&self) -> u8 {
        match self {
            Command::Help => CMD_HELP,
            Command::Readback => CMD_READBACK,
            Command::Clear => CMD_CLEAR,
            Command::SetRow { .. } => CMD_SET_ROW,
            Command::Block { .. } => CMD_BLOCK,
        }
    }

    /// Encode this command into a byte buffer
    ///
    /// Returns the number of bytes written. Single-byte commands are sent
    /// without a terminator; text commands end with CR LF.
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, CommandError> {
        let (row, text): (Option<u8>, &[u8]) = match self {
            Command::Help | Command::Readback | Command::Clear => (None, &[]),
            Command::SetRow { row, text } => (Some(*row), text),
            Command::Block { text } => (None, text),
        };
        let has_text = matches!(self, Command::SetRow { .. } | Command::Block { .. });

        let len = 1 + row.map_or(0, |_| 1) + text.len() + if has_text { LINE_END.len() } else { 0 };
        if buffer.len() < len {
            return Err(CommandError::BufferTooSmall);
        }

        let mut pos = 0;
        buffer[pos] = self.command_byte();
        pos += 1;
        if let Some(row) = row {
            if row >= ROW_COUNT {
                return Err(CommandError::InvalidRow(row));
            }
            buffer[pos] = b'1' + row;
            pos += 1;
        }
        if has_text {
            buffer[pos..pos + text.len()].copy_from_slice(text);
            pos += text.len();
            buffer[pos..pos + LINE_END.len()].copy_from_slice(LINE_END);
            pos += LINE_END.len();
        }

        Ok(pos)
    }

    /// Encode this command into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_COMMAND_SIZE>, CommandError> {
        let mut buffer = [0u8; MAX_COMMAND_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| CommandError::BufferTooSmall)?;
        Ok(vec)
    }
}
