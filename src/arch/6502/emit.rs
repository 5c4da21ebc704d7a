use super::{Addressing, Error, Instruction, Result};
use crate::Memory;

/// The bytes of one encoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoded {
    bytes: [u8; 3],
    len: usize,
}

impl Encoded {
    fn new(opcode: u8, operand: &[u8]) -> Self {
        let mut bytes = [opcode, 0, 0];
        bytes[1..=operand.len()].copy_from_slice(operand);
        Self {
            bytes,
            len: operand.len() + 1,
        }
    }

    /// The encoded bytes, opcode first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// The number of bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false, there is at least an opcode.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl AsRef<[u8]> for Encoded {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Instruction {
    /// Encode the instruction as it would sit at `address`.
    ///
    /// 16 bit operands are little-endian. A relative operand becomes the signed
    /// displacement from the instruction following this one to the target.
    pub fn encode(&self, address: u16) -> Result<Encoded> {
        let opcode = self.opcode()?;

        let encoded = match self.addressing {
            Addressing::Implicit | Addressing::Accumulator => Encoded::new(opcode.byte, &[]),
            Addressing::Immediate(imm)
            | Addressing::ZeroPage(imm)
            | Addressing::ZeroPageX(imm)
            | Addressing::ZeroPageY(imm)
            | Addressing::IndexedIndirect(imm)
            | Addressing::IndirectIndexed(imm) => Encoded::new(opcode.byte, &[imm]),
            Addressing::Absolute(imm)
            | Addressing::AbsoluteX(imm)
            | Addressing::AbsoluteY(imm)
            | Addressing::Indirect(imm) => Encoded::new(opcode.byte, &imm.to_le_bytes()),
            Addressing::Relative(target) => {
                let from = address.wrapping_add(opcode.length() as u16);
                let displacement = i8::try_from(target.wrapping_sub(from) as i16)
                    .map_err(|_| Error::BranchOutOfRange { target, from })?;
                Encoded::new(opcode.byte, &[displacement as u8])
            }
        };

        Ok(encoded)
    }
}

/// Writes instructions into target memory, one after the other.
///
/// Every byte is read back after writing; a mismatch fails the instruction
/// and leaves the current address where it was.
pub struct Emitter<'m, M: Memory + ?Sized> {
    memory: &'m mut M,
    address: u16,
}

impl<'m, M: Memory + ?Sized> Emitter<'m, M> {
    /// Start emitting at `address`.
    pub fn new(memory: &'m mut M, address: u16) -> Self {
        Self { memory, address }
    }

    /// Where the next instruction goes.
    pub fn address(&self) -> u16 {
        self.address
    }

    /// Write `bytes` at the current address and verify them.
    ///
    /// On a failed read-back the previous contents are written back, as far
    /// as the memory takes them.
    pub fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let start = self.address;
        let addresses = (0u16..).map(move |offset| start.wrapping_add(offset));

        let saved: Vec<(u16, u8)> = addresses
            .clone()
            .take(bytes.len())
            .map(|address| (address, self.memory.read(address)))
            .collect();

        for (address, byte) in addresses.clone().zip(bytes) {
            self.memory.write(address, *byte);
        }

        for (address, byte) in addresses.zip(bytes) {
            let read = self.memory.read(address);
            if read != *byte {
                log::warn!(
                    "wrote {:02X} to ${:04X}, read back {:02X}",
                    byte,
                    address,
                    read
                );
                for (address, old) in &saved {
                    self.memory.write(*address, *old);
                }
                return Err(Error::Write { address });
            }
        }

        Ok(())
    }
}

impl<'m, M: Memory + ?Sized> crate::Encoder for Emitter<'m, M> {
    type Instruction = Instruction;

    type Output = Encoded;

    type Error = Error;

    fn encode(&mut self, inst: Self::Instruction) -> Result<Self::Output> {
        let encoded = inst.encode(self.address)?;
        self.write(encoded.as_bytes())?;

        log::debug!("${:04X}: {} => {:02X?}", self.address, inst, encoded.as_bytes());
        self.address = self.address.wrapping_add(encoded.len() as u16);

        Ok(encoded)
    }
}
