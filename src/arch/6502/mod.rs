//! The 6502 ISA
//!
//! Based on the information from:
//! <https://www.nesdev.org/obelisk-6502-guide/index.html>

mod emit;
mod error;
mod line;
mod opcode;
mod operand;

pub use emit::*;
pub use error::*;
pub use line::*;
pub use opcode::*;
pub use operand::*;

use std::fmt;

/// Result type of the 6502 assembler
pub type Result<T> = std::result::Result<T, Error>;

/// The syntactic form of an operand, without its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand; the instruction says everything.
    Implicit,
    /// Operates on the accumulator, written as `A`.
    Accumulator,
    /// `#NN`
    Immediate,
    /// `NN`
    ZeroPage,
    /// `NN,X`
    ZeroPageX,
    /// `NN,Y`
    ZeroPageY,
    /// `NNNN`
    Absolute,
    /// `NNNN,X`
    AbsoluteX,
    /// `NNNN,Y`
    AbsoluteY,
    /// `(NN,X)`
    IndexedIndirect,
    /// `(NN),Y`
    IndirectIndexed,
    /// `(NNNN)`
    Indirect,
    /// `NNNN`, encoded as a signed displacement from the next instruction.
    Relative,
}

impl AddressingMode {
    /// The number of operand bytes following the opcode.
    pub fn operand_length(self) -> usize {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndexedIndirect
            | AddressingMode::IndirectIndexed => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

bitflags::bitflags! {
    /// A set of [`AddressingMode`]s, typically the ones legal for an instruction.
    pub struct AddressingModes : u16 {
        /// [`AddressingMode::Implicit`]
        const IMPLICIT         = 1 << 0;
        /// [`AddressingMode::Accumulator`]
        const ACCUMULATOR      = 1 << 1;
        /// [`AddressingMode::Immediate`]
        const IMMEDIATE        = 1 << 2;
        /// [`AddressingMode::ZeroPage`]
        const ZERO_PAGE        = 1 << 3;
        /// [`AddressingMode::ZeroPageX`]
        const ZERO_PAGE_X      = 1 << 4;
        /// [`AddressingMode::ZeroPageY`]
        const ZERO_PAGE_Y      = 1 << 5;
        /// [`AddressingMode::Absolute`]
        const ABSOLUTE         = 1 << 6;
        /// [`AddressingMode::AbsoluteX`]
        const ABSOLUTE_X       = 1 << 7;
        /// [`AddressingMode::AbsoluteY`]
        const ABSOLUTE_Y       = 1 << 8;
        /// [`AddressingMode::IndexedIndirect`]
        const INDEXED_INDIRECT = 1 << 9;
        /// [`AddressingMode::IndirectIndexed`]
        const INDIRECT_INDEXED = 1 << 10;
        /// [`AddressingMode::Indirect`]
        const INDIRECT         = 1 << 11;
        /// [`AddressingMode::Relative`]
        const RELATIVE         = 1 << 12;
    }
}

impl From<AddressingMode> for AddressingModes {
    fn from(mode: AddressingMode) -> Self {
        match mode {
            AddressingMode::Implicit => Self::IMPLICIT,
            AddressingMode::Accumulator => Self::ACCUMULATOR,
            AddressingMode::Immediate => Self::IMMEDIATE,
            AddressingMode::ZeroPage => Self::ZERO_PAGE,
            AddressingMode::ZeroPageX => Self::ZERO_PAGE_X,
            AddressingMode::ZeroPageY => Self::ZERO_PAGE_Y,
            AddressingMode::Absolute => Self::ABSOLUTE,
            AddressingMode::AbsoluteX => Self::ABSOLUTE_X,
            AddressingMode::AbsoluteY => Self::ABSOLUTE_Y,
            AddressingMode::IndexedIndirect => Self::INDEXED_INDIRECT,
            AddressingMode::IndirectIndexed => Self::INDIRECT_INDEXED,
            AddressingMode::Indirect => Self::INDIRECT,
            AddressingMode::Relative => Self::RELATIVE,
        }
    }
}

/// A classified operand: its addressing mode together with its value.
///
/// Some instructions support several different modes while others
/// may only support one. In addition the two index registers can not always be
/// used interchangeably.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addressing {
    /// No operand.
    Implicit,

    /// The accumulator.
    Accumulator,

    /// An 8 bit constant.
    Immediate(u8),

    /// An address in the first 256 bytes of memory.
    ZeroPage(u8),

    /// A zero page address indexed by X, wrapping within the zero page.
    ZeroPageX(u8),

    /// A zero page address indexed by Y, wrapping within the zero page.
    ZeroPageY(u8),

    /// A full 16 bit address.
    Absolute(u16),

    /// A 16 bit address indexed by X.
    AbsoluteX(u16),

    /// A 16 bit address indexed by Y.
    AbsoluteY(u16),

    /// A zero page table of addresses, indexed by X before the lookup.
    IndexedIndirect(u8),

    /// A zero page pointer, indexed by Y after the lookup.
    IndirectIndexed(u8),

    /// The address of the least significant byte of the real target. JMP only.
    Indirect(u16),

    /// The branch target. Only the displacement to it ends up in memory, see
    /// [`Instruction::encode`].
    Relative(u16),
}

impl Addressing {
    /// The addressing mode, without the value.
    pub fn mode(&self) -> AddressingMode {
        match self {
            Addressing::Implicit => AddressingMode::Implicit,
            Addressing::Accumulator => AddressingMode::Accumulator,
            Addressing::Immediate(_) => AddressingMode::Immediate,
            Addressing::ZeroPage(_) => AddressingMode::ZeroPage,
            Addressing::ZeroPageX(_) => AddressingMode::ZeroPageX,
            Addressing::ZeroPageY(_) => AddressingMode::ZeroPageY,
            Addressing::Absolute(_) => AddressingMode::Absolute,
            Addressing::AbsoluteX(_) => AddressingMode::AbsoluteX,
            Addressing::AbsoluteY(_) => AddressingMode::AbsoluteY,
            Addressing::IndexedIndirect(_) => AddressingMode::IndexedIndirect,
            Addressing::IndirectIndexed(_) => AddressingMode::IndirectIndexed,
            Addressing::Indirect(_) => AddressingMode::Indirect,
            Addressing::Relative(_) => AddressingMode::Relative,
        }
    }

    /// The length the operand takes in bytes once encoded.
    pub fn length(&self) -> usize {
        self.mode().operand_length()
    }
}

macro_rules! inst {
    ($($(#[doc = $doc:expr])* $name:ident),+,) => {
        /// A 6502 instruction, named by its three letter mnemonic.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Mnemonic {
            $($(#[doc = $doc])* $name),+
        }

        const MNEMONICS: &[(&str, Mnemonic)] = &[
            $((stringify!($name), Mnemonic::$name)),+
        ];
    };
}

inst! {
    /// Add with Carry
    ADC,
    /// Logical AND
    AND,
    /// Arithmetic Shift Left
    ASL,
    /// Branch if Carry Clear
    BCC,
    /// Branch if Carry Set
    BCS,
    /// Branch if Equal
    BEQ,
    /// Bit Test
    BIT,
    /// Branch if Minus
    BMI,
    /// Branch if Not Equal
    BNE,
    /// Branch if Positive
    BPL,
    /// Force Interrupt
    BRK,
    /// Branch if Overflow Clear
    BVC,
    /// Branch if Overflow Set
    BVS,
    /// Clear Carry Flag
    CLC,
    /// Clear Decimal Mode
    CLD,
    /// Clear Interrupt Disable
    CLI,
    /// Clear Overflow Flag
    CLV,
    /// Compare
    CMP,
    /// Compare X Register
    CPX,
    /// Compare Y Register
    CPY,
    /// Decrement Memory
    DEC,
    /// Decrement X Register
    DEX,
    /// Decrement Y Register
    DEY,
    /// Exclusive OR
    EOR,
    /// Increment Memory
    INC,
    /// Increment X Register
    INX,
    /// Increment Y Register
    INY,
    /// Jump
    JMP,
    /// Jump to Subroutine
    JSR,
    /// Load Accumulator
    LDA,
    /// Load X Register
    LDX,
    /// Load Y Register
    LDY,
    /// Logical Shift Right
    LSR,
    /// No Operation
    NOP,
    /// Logical Inclusive OR
    ORA,
    /// Push Accumulator
    PHA,
    /// Push Processor Status
    PHP,
    /// Pull Accumulator
    PLA,
    /// Pull Processor Status
    PLP,
    /// Rotate Left
    ROL,
    /// Rotate Right
    ROR,
    /// Return from Interrupt
    RTI,
    /// Return from Subroutine
    RTS,
    /// Subtract with Carry
    SBC,
    /// Set Carry Flag
    SEC,
    /// Set Decimal Flag
    SED,
    /// Set Interrupt Disable
    SEI,
    /// Store Accumulator
    STA,
    /// Store X Register
    STX,
    /// Store Y Register
    STY,
    /// Transfer Accumulator to X
    TAX,
    /// Transfer Accumulator to Y
    TAY,
    /// Transfer Stack Pointer to X
    TSX,
    /// Transfer X to Accumulator
    TXA,
    /// Transfer X to Stack Pointer
    TXS,
    /// Transfer Y to Accumulator
    TYA,
}

impl Mnemonic {
    /// Look up an upper-case mnemonic.
    ///
    /// The comparison is exact; normalizing case is up to the caller.
    pub fn lookup(text: &str) -> Option<Mnemonic> {
        MNEMONICS
            .iter()
            .find(|(name, _)| *name == text)
            .map(|(_, mnemonic)| *mnemonic)
    }

    /// The three letter name.
    pub fn name(self) -> &'static str {
        MNEMONICS
            .iter()
            .find(|(_, mnemonic)| *mnemonic == self)
            .map(|(name, _)| *name)
            .unwrap_or("???")
    }

    /// Whether the instruction never takes an operand.
    pub fn is_implicit(self) -> bool {
        self.modes() == AddressingModes::IMPLICIT
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An instruction with its operand, ready to be validated and encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// What to do.
    pub mnemonic: Mnemonic,
    /// What to do it with.
    pub addressing: Addressing,
}

impl Instruction {
    /// Pair a mnemonic with an operand. Nothing is validated yet.
    pub fn new(mnemonic: Mnemonic, addressing: Addressing) -> Self {
        Self {
            mnemonic,
            addressing,
        }
    }

    /// The encoded length in bytes, opcode included.
    pub fn length(&self) -> usize {
        self.addressing.length() + 1
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic)?;
        match self.addressing {
            Addressing::Implicit => Ok(()),
            Addressing::Accumulator => write!(f, " A"),
            Addressing::Immediate(v) => write!(f, " #{:02X}", v),
            Addressing::ZeroPage(v) => write!(f, " {:02X}", v),
            Addressing::ZeroPageX(v) => write!(f, " {:02X},X", v),
            Addressing::ZeroPageY(v) => write!(f, " {:02X},Y", v),
            Addressing::Absolute(v) | Addressing::Relative(v) => write!(f, " {:04X}", v),
            Addressing::AbsoluteX(v) => write!(f, " {:04X},X", v),
            Addressing::AbsoluteY(v) => write!(f, " {:04X},Y", v),
            Addressing::IndexedIndirect(v) => write!(f, " ({:02X},X)", v),
            Addressing::IndirectIndexed(v) => write!(f, " ({:02X}),Y", v),
            Addressing::Indirect(v) => write!(f, " ({:04X})", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn mnemonics_are_unique() {
        let names: HashSet<_> = MNEMONICS.iter().map(|(name, _)| *name).collect();
        assert_eq!(names.len(), MNEMONICS.len());
        assert_eq!(MNEMONICS.len(), 56);
        assert!(MNEMONICS.iter().all(|(name, _)| name.len() == 3));
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(Mnemonic::lookup("LDA"), Some(Mnemonic::LDA));
        assert_eq!(Mnemonic::lookup("TYA"), Some(Mnemonic::TYA));
        assert_eq!(Mnemonic::lookup("lda"), None);
        assert_eq!(Mnemonic::lookup("XYZ"), None);
        assert_eq!(Mnemonic::lookup("LD"), None);
        assert_eq!(Mnemonic::lookup("LDAX"), None);
    }

    #[test]
    fn names_round_trip() {
        for (name, mnemonic) in MNEMONICS {
            assert_eq!(mnemonic.name(), *name);
        }
    }

    #[test]
    fn implicit_only_instructions() {
        assert!(Mnemonic::NOP.is_implicit());
        assert!(Mnemonic::DEX.is_implicit());
        assert!(!Mnemonic::ASL.is_implicit());
        assert!(!Mnemonic::BNE.is_implicit());
    }

    #[test]
    fn displays_instructions() {
        let inst = Instruction::new(Mnemonic::LDA, Addressing::IndirectIndexed(0x20));
        assert_eq!(inst.to_string(), "LDA (20),Y");
        assert_eq!(inst.length(), 2);

        let inst = Instruction::new(Mnemonic::JMP, Addressing::Indirect(0xFFFC));
        assert_eq!(inst.to_string(), "JMP (FFFC)");
        assert_eq!(inst.length(), 3);
    }
}
