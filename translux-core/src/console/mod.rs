//! Command console
//!
//! Applies serial commands to the message buffer. Every command that
//! changes the text re-renders the matrix and presents it to the sink, so
//! the sign always shows what was last loaded.

use core::fmt::Write;

use heapless::String;
use translux_protocol::{Command, CommandError, CommandParser};

use crate::config::SignConfig;
use crate::message::{LoadTarget, MessageBuffer, MessageError, ROW_COUNT};
use crate::render::BitMatrix;
use crate::traits::{FontProvider, MatrixSink, SinkError};

/// Help text sent in reply to `?`
pub const HELP_TEXT: &str = "Translux sign commands:\r\n\
    \x20 ?             this help\r\n\
    \x20 r             read back current message\r\n\
    \x20 c             clear message\r\n\
    \x20 s<1-4><text>  set row text, end with CR or LF\r\n\
    \x20 b<text>       set block text, end with CR or LF\r\n";

/// Capacity of a readback reply
pub const READBACK_CAPACITY: usize = 512;

/// Console errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsoleError {
    /// Malformed command
    Command(CommandError),
    /// Row rejected by the message buffer
    Message(MessageError),
    /// Sink failed to take the rendered matrix
    Sink(SinkError),
    /// Reply did not fit its buffer
    ReplyOverflow,
}

impl From<CommandError> for ConsoleError {
    fn from(e: CommandError) -> Self {
        ConsoleError::Command(e)
    }
}

impl From<MessageError> for ConsoleError {
    fn from(e: MessageError) -> Self {
        ConsoleError::Message(e)
    }
}

impl From<SinkError> for ConsoleError {
    fn from(e: SinkError) -> Self {
        ConsoleError::Sink(e)
    }
}

/// Reply to an executed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Help text
    Help(&'static str),
    /// Current message contents
    Readback(String<READBACK_CAPACITY>),
    /// Text changed and was presented
    Updated,
}

impl Reply {
    /// Reply text to send back over the serial port
    pub fn as_str(&self) -> &str {
        match self {
            Reply::Help(text) => text,
            Reply::Readback(text) => text.as_str(),
            Reply::Updated => "OK\r\n",
        }
    }
}

/// Serial front end for a message buffer
pub struct Console<'f, F: FontProvider + ?Sized> {
    message: MessageBuffer<'f, F>,
    matrix: BitMatrix,
    parser: CommandParser,
}

impl<'f, F: FontProvider + ?Sized> Console<'f, F> {
    /// Create a console with a blank message
    pub fn new(font: &'f F) -> Self {
        Self {
            message: MessageBuffer::new(font),
            matrix: BitMatrix::new(),
            parser: CommandParser::new(),
        }
    }

    /// Create a console showing the configured boot lines
    pub fn with_config(font: &'f F, config: &SignConfig) -> Self {
        let mut console = Self::new(font);
        console.message.load_rows(config.boot_rows());
        console.message.render_into(&mut console.matrix);
        console
    }

    /// The message buffer
    pub fn message(&self) -> &MessageBuffer<'f, F> {
        &self.message
    }

    /// The message buffer, for direct updates
    ///
    /// Call [`refresh`](Self::refresh) afterwards to show the changes.
    pub fn message_mut(&mut self) -> &mut MessageBuffer<'f, F> {
        &mut self.message
    }

    /// Last rendered matrix
    pub fn matrix(&self) -> &BitMatrix {
        &self.matrix
    }

    /// Feed one received byte
    ///
    /// Returns `Ok(Some(reply))` once a complete command has been executed.
    pub fn feed<S: MatrixSink>(
        &mut self,
        byte: u8,
        sink: &mut S,
    ) -> Result<Option<Reply>, ConsoleError> {
        let command = match self.parser.feed(byte) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(None),
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Bad command: {:?}", e);
                return Err(e.into());
            }
        };
        self.execute(&command, sink).map(Some)
    }

    /// Execute a parsed command
    pub fn execute<S: MatrixSink>(
        &mut self,
        command: &Command,
        sink: &mut S,
    ) -> Result<Reply, ConsoleError> {
        #[cfg(feature = "defmt")]
        defmt::debug!("Executing {:?}", command);

        match command {
            Command::Help => Ok(Reply::Help(HELP_TEXT)),
            Command::Readback => Ok(Reply::Readback(self.readback()?)),
            Command::Clear => {
                self.message.init();
                self.refresh(sink)?;
                Ok(Reply::Updated)
            }
            Command::SetRow { row, text } => {
                self.message.load(text, LoadTarget::Row(*row as usize))?;
                self.refresh(sink)?;
                Ok(Reply::Updated)
            }
            Command::Block { text } => {
                self.message.load(text, LoadTarget::Block)?;
                self.refresh(sink)?;
                Ok(Reply::Updated)
            }
        }
    }

    /// Re-render and present the current message
    pub fn refresh<S: MatrixSink>(&mut self, sink: &mut S) -> Result<(), ConsoleError> {
        self.message.render_into(&mut self.matrix);
        sink.present(&self.matrix)?;
        Ok(())
    }

    /// Describe the current message, one line per row
    pub fn readback(&self) -> Result<String<READBACK_CAPACITY>, ConsoleError> {
        let mut out = String::new();
        if self.message.is_row_mode() {
            for row in 0..ROW_COUNT {
                let text = self.message.row_text(row);
                write!(out, "row {} ({}): ", row + 1, text.len())
                    .map_err(|_| ConsoleError::ReplyOverflow)?;
                push_printable(&mut out, text)?;
            }
        } else {
            let text = self.message.block_text();
            write!(out, "block ({}): ", text.len()).map_err(|_| ConsoleError::ReplyOverflow)?;
            push_printable(&mut out, text)?;
        }
        Ok(out)
    }
}

/// Append `text` and a line break, showing unprintable bytes as `.`
fn push_printable(out: &mut String<READBACK_CAPACITY>, text: &[u8]) -> Result<(), ConsoleError> {
    for &c in text {
        let shown = if c.is_ascii_graphic() || c == b' ' {
            c as char
        } else {
            '.'
        };
        out.push(shown).map_err(|_| ConsoleError::ReplyOverflow)?;
    }
    out.push_str("\r\n")
        .map_err(|_| ConsoleError::ReplyOverflow)
}
