use super::{
    classify, Addressing, AddressingModes, Emitter, Encoded, Error, Instruction, Mnemonic, Result,
};
use crate::{Encoder, Field, Input, Memory, Output};

/// What a successfully assembled line left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emission {
    /// Where the instruction was written.
    pub address: u16,
    /// The instruction.
    pub instruction: Instruction,
    /// The bytes written.
    pub bytes: Encoded,
    /// Where the next line goes.
    pub next: u16,
}

/// The line assembler.
///
/// The only state kept between lines is the current address, which moves
/// past every instruction that made it into memory and stays put otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assembler {
    address: u16,
}

enum Step {
    Emitted(Emission),
    Skipped,
    Finished,
}

impl Assembler {
    /// Start assembling at `address`.
    pub fn new(address: u16) -> Self {
        Self { address }
    }

    /// The current address.
    pub fn address(&self) -> u16 {
        self.address
    }

    /// Resolve an upper-case mnemonic.
    pub fn resolve(mnemonic: &str) -> Result<Mnemonic> {
        Mnemonic::lookup(mnemonic).ok_or(Error::InvalidInstruction)
    }

    /// Turn the operand of `mnemonic` into a validated instruction.
    ///
    /// Instructions that only exist in implicit form ignore `operand`. A
    /// missing operand means the accumulator for the shifts and rotates.
    pub fn parse(mnemonic: Mnemonic, operand: &str) -> Result<Instruction> {
        let modes = mnemonic.modes();
        let addressing = if mnemonic.is_implicit() {
            Addressing::Implicit
        } else if operand.is_empty() && modes.contains(AddressingModes::ACCUMULATOR) {
            Addressing::Accumulator
        } else {
            classify(operand, modes)?
        };

        let instruction = Instruction::new(mnemonic, addressing);
        instruction.opcode()?;
        Ok(instruction)
    }

    /// Write `instruction` at the current address and move past it.
    pub fn emit<M: Memory + ?Sized>(
        &mut self,
        instruction: Instruction,
        memory: &mut M,
    ) -> Result<Emission> {
        let mut emitter = Emitter::new(memory, self.address);
        let bytes = emitter.encode(instruction)?;

        let emission = Emission {
            address: self.address,
            instruction,
            bytes,
            next: emitter.address(),
        };
        self.address = emission.next;
        Ok(emission)
    }

    /// Assemble one line of text such as `LDA (20),Y`.
    ///
    /// The text is taken as typed: upper-case, hex without prefix. Whitespace
    /// separates the mnemonic from the operand.
    pub fn line<M: Memory + ?Sized>(&mut self, text: &str, memory: &mut M) -> Result<Emission> {
        let text = text.trim();
        let (mnemonic, operand) = match text.find(char::is_whitespace) {
            Some(split) => (&text[..split], text[split..].trim()),
            None => (text, ""),
        };

        let mnemonic = Self::resolve(mnemonic)?;
        let instruction = Self::parse(mnemonic, operand)?;
        self.emit(instruction, memory)
    }

    /// Run an interactive session until Escape at the mnemonic prompt.
    ///
    /// Line errors are reported to `output` and the line is dropped; only I/O
    /// errors end the session early.
    pub fn run<I, O, M>(&mut self, input: &mut I, output: &mut O, memory: &mut M) -> Result<()>
    where
        I: Input + ?Sized,
        O: Output + ?Sized,
        M: Memory + ?Sized,
    {
        log::info!("assembling at ${:04X}", self.address);

        loop {
            match self.step(input, output, memory) {
                Ok(Step::Emitted(emission)) => {
                    log::debug!("{:04X}: {}", emission.address, emission.instruction)
                }
                Ok(Step::Skipped) => {}
                Ok(Step::Finished) => break,
                Err(Error::IO(err)) => return Err(Error::IO(err)),
                Err(err) => {
                    log::debug!("{:04X}: {:?}", self.address, err);
                    output.error(&err).map_err(Error::IO)?;
                }
            }
        }

        log::info!("assembly ended at ${:04X}", self.address);
        Ok(())
    }

    fn step<I, O, M>(&mut self, input: &mut I, output: &mut O, memory: &mut M) -> Result<Step>
    where
        I: Input + ?Sized,
        O: Output + ?Sized,
        M: Memory + ?Sized,
    {
        output.address(self.address).map_err(Error::IO)?;

        let mnemonic = match input.read_field(Field::Mnemonic).map_err(Error::IO)? {
            Some(text) if text.is_empty() => return Ok(Step::Skipped),
            Some(text) => Self::resolve(&text)?,
            None => return Ok(Step::Finished),
        };

        let operand = if mnemonic.is_implicit() {
            String::new()
        } else {
            match input.read_field(Field::Operand).map_err(Error::IO)? {
                Some(text) => text,
                None => return Ok(Step::Skipped),
            }
        };

        let instruction = Self::parse(mnemonic, &operand)?;
        self.emit(instruction, memory).map(Step::Emitted)
    }
}
