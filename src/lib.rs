//! A minimal interactive line assembler for 6502 machine monitors
//!
//! Every line stands alone: the mnemonic is resolved, the operand text is
//! classified into an addressing mode, the pair is checked against the opcode
//! table and the encoded bytes are written straight into target memory.
//!
//! # Example
//!
//! ## Assemble single lines
//!
//! ```
//! # use lineasm::{_6502, Ram, Memory};
//! let mut memory = Ram::new();
//! let mut asm = _6502::Assembler::new(0x6000);
//!
//! asm.line("LDX #0A", &mut memory).unwrap();
//! asm.line("JSR FFEF", &mut memory).unwrap();
//!
//! assert_eq!(asm.address(), 0x6005);
//! assert_eq!(memory.read(0x6002), 0x20);
//! ```
//!
//! ## Drive a session
//!
//! ```
//! # use lineasm::{_6502, LineInput, Ram, Memory};
//! let mut input = LineInput::new(&b"NOP\nDEX\nBNE 6000\n\x1b\n"[..]);
//! let mut output = Vec::new();
//! let mut memory = Ram::new();
//!
//! let mut asm = _6502::Assembler::new(0x6000);
//! asm.run(&mut input, &mut output, &mut memory).unwrap();
//!
//! assert_eq!(memory.read(0x6003), 0xFC);
//! ```

#![deny(missing_docs)]

mod arch;
mod console;
mod memory;

pub use arch::*;
pub use console::{Command, CommandError, Field, LineInput};
pub use memory::Ram;

/// Architectures known by this crate
#[non_exhaustive]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Architecture {
    /// The 6502 ISA
    #[cfg(feature = "6502")]
    _6502,
}

/// Target memory the assembler writes into.
///
/// Only single byte operations are assumed to be atomic.
pub trait Memory {
    /// Store `value` at `address`.
    fn write(&mut self, address: u16, value: u8);

    /// Load the byte at `address`.
    fn read(&self, address: u16) -> u8;
}

/// A source of typed fields.
pub trait Input {
    /// Read the next field of the given kind.
    ///
    /// Characters the field does not accept are filtered out. `Ok(None)`
    /// signals Escape, which is out-of-band and never part of the text.
    fn read_field(&mut self, field: Field) -> std::io::Result<Option<String>>;
}

/// Where prompts and error messages go.
pub trait Output {
    /// Render the prompt for the line starting at `address`.
    fn address(&mut self, address: u16) -> std::io::Result<()>;

    /// Report an error on its own line.
    fn error(&mut self, err: &dyn std::error::Error) -> std::io::Result<()>;
}

impl<W: std::io::Write> Output for W {
    fn address(&mut self, address: u16) -> std::io::Result<()> {
        write!(self, "{:04X}: ", address)?;
        self.flush()
    }

    fn error(&mut self, err: &dyn std::error::Error) -> std::io::Result<()> {
        writeln!(self, "{}", err)
    }
}

/// A instruction encoder
pub trait Encoder {
    /// The instruction consumed by this encoder
    type Instruction: core::fmt::Debug;

    /// What a successful encode produces
    type Output;

    /// Errors produced during encoding
    type Error: core::fmt::Debug + std::error::Error;

    /// Encode a instruction
    fn encode(&mut self, inst: Self::Instruction) -> Result<Self::Output, Self::Error>;
}
