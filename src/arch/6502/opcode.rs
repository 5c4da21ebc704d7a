use super::{AddressingMode, AddressingModes, Error, Instruction, Mnemonic, Result};

/// One legal (instruction, addressing mode) combination and its encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    /// The encoded opcode byte.
    pub byte: u8,
    /// The instruction.
    pub mnemonic: Mnemonic,
    /// The addressing mode.
    pub mode: AddressingMode,
}

impl Opcode {
    /// The legal combinations of the base 6502, in no particular order.
    pub fn table() -> &'static [Opcode] {
        OPCODES
    }

    /// Find the encoding of `mnemonic` in `mode`.
    ///
    /// `None` means the combination is illegal.
    pub fn lookup(mnemonic: Mnemonic, mode: AddressingMode) -> Option<Opcode> {
        OPCODES
            .iter()
            .find(|op| op.mnemonic == mnemonic && op.mode == mode)
            .copied()
    }

    /// The instruction length in bytes, opcode included.
    pub fn length(&self) -> usize {
        self.mode.operand_length() + 1
    }
}

impl Mnemonic {
    /// Every addressing mode this instruction can be encoded with.
    pub fn modes(self) -> AddressingModes {
        OPCODES
            .iter()
            .filter(|op| op.mnemonic == self)
            .fold(AddressingModes::empty(), |modes, op| modes | AddressingModes::from(op.mode))
    }
}

impl Instruction {
    /// Validate the instruction against the opcode table.
    pub fn opcode(&self) -> Result<Opcode> {
        Opcode::lookup(self.mnemonic, self.addressing.mode())
            .ok_or(Error::InvalidAddressing(self.mnemonic))
    }
}

macro_rules! opcodes {
    ($($op:literal => $inst:ident($mode:ident)),+,) => {
        static OPCODES: &[Opcode] = &[
            $(Opcode {
                byte: $op,
                mnemonic: Mnemonic::$inst,
                mode: AddressingMode::$mode,
            }),+
        ];
    };
}

opcodes! {
    // ADC
    0x69 => ADC(Immediate),
    0x65 => ADC(ZeroPage),
    0x75 => ADC(ZeroPageX),
    0x6D => ADC(Absolute),
    0x7D => ADC(AbsoluteX),
    0x79 => ADC(AbsoluteY),
    0x61 => ADC(IndexedIndirect),
    0x71 => ADC(IndirectIndexed),

    // AND
    0x29 => AND(Immediate),
    0x25 => AND(ZeroPage),
    0x35 => AND(ZeroPageX),
    0x2D => AND(Absolute),
    0x3D => AND(AbsoluteX),
    0x39 => AND(AbsoluteY),
    0x21 => AND(IndexedIndirect),
    0x31 => AND(IndirectIndexed),

    // ASL
    0x0A => ASL(Accumulator),
    0x06 => ASL(ZeroPage),
    0x16 => ASL(ZeroPageX),
    0x0E => ASL(Absolute),
    0x1E => ASL(AbsoluteX),

    // Branches
    0x90 => BCC(Relative),
    0xB0 => BCS(Relative),
    0xF0 => BEQ(Relative),
    0x30 => BMI(Relative),
    0xD0 => BNE(Relative),
    0x10 => BPL(Relative),
    0x50 => BVC(Relative),
    0x70 => BVS(Relative),

    // BIT
    0x24 => BIT(ZeroPage),
    0x2C => BIT(Absolute),

    // BRK
    0x00 => BRK(Implicit),

    // Flags
    0x18 => CLC(Implicit),
    0xD8 => CLD(Implicit),
    0x58 => CLI(Implicit),
    0xB8 => CLV(Implicit),
    0x38 => SEC(Implicit),
    0xF8 => SED(Implicit),
    0x78 => SEI(Implicit),

    // CMP
    0xC9 => CMP(Immediate),
    0xC5 => CMP(ZeroPage),
    0xD5 => CMP(ZeroPageX),
    0xCD => CMP(Absolute),
    0xDD => CMP(AbsoluteX),
    0xD9 => CMP(AbsoluteY),
    0xC1 => CMP(IndexedIndirect),
    0xD1 => CMP(IndirectIndexed),

    // CPX
    0xE0 => CPX(Immediate),
    0xE4 => CPX(ZeroPage),
    0xEC => CPX(Absolute),

    // CPY
    0xC0 => CPY(Immediate),
    0xC4 => CPY(ZeroPage),
    0xCC => CPY(Absolute),

    // DEC
    0xC6 => DEC(ZeroPage),
    0xD6 => DEC(ZeroPageX),
    0xCE => DEC(Absolute),
    0xDE => DEC(AbsoluteX),

    // DEX, DEY
    0xCA => DEX(Implicit),
    0x88 => DEY(Implicit),

    // EOR
    0x49 => EOR(Immediate),
    0x45 => EOR(ZeroPage),
    0x55 => EOR(ZeroPageX),
    0x4D => EOR(Absolute),
    0x5D => EOR(AbsoluteX),
    0x59 => EOR(AbsoluteY),
    0x41 => EOR(IndexedIndirect),
    0x51 => EOR(IndirectIndexed),

    // INC
    0xE6 => INC(ZeroPage),
    0xF6 => INC(ZeroPageX),
    0xEE => INC(Absolute),
    0xFE => INC(AbsoluteX),

    // INX, INY
    0xE8 => INX(Implicit),
    0xC8 => INY(Implicit),

    // JMP
    0x4C => JMP(Absolute),
    0x6C => JMP(Indirect),

    // JSR
    0x20 => JSR(Absolute),

    // LDA
    0xA9 => LDA(Immediate),
    0xA5 => LDA(ZeroPage),
    0xB5 => LDA(ZeroPageX),
    0xAD => LDA(Absolute),
    0xBD => LDA(AbsoluteX),
    0xB9 => LDA(AbsoluteY),
    0xA1 => LDA(IndexedIndirect),
    0xB1 => LDA(IndirectIndexed),

    // LDX
    0xA2 => LDX(Immediate),
    0xA6 => LDX(ZeroPage),
    0xB6 => LDX(ZeroPageY),
    0xAE => LDX(Absolute),
    0xBE => LDX(AbsoluteY),

    // LDY
    0xA0 => LDY(Immediate),
    0xA4 => LDY(ZeroPage),
    0xB4 => LDY(ZeroPageX),
    0xAC => LDY(Absolute),
    0xBC => LDY(AbsoluteX),

    // LSR
    0x4A => LSR(Accumulator),
    0x46 => LSR(ZeroPage),
    0x56 => LSR(ZeroPageX),
    0x4E => LSR(Absolute),
    0x5E => LSR(AbsoluteX),

    // NOP
    0xEA => NOP(Implicit),

    // ORA
    0x09 => ORA(Immediate),
    0x05 => ORA(ZeroPage),
    0x15 => ORA(ZeroPageX),
    0x0D => ORA(Absolute),
    0x1D => ORA(AbsoluteX),
    0x19 => ORA(AbsoluteY),
    0x01 => ORA(IndexedIndirect),
    0x11 => ORA(IndirectIndexed),

    // Stack
    0x48 => PHA(Implicit),
    0x08 => PHP(Implicit),
    0x68 => PLA(Implicit),
    0x28 => PLP(Implicit),

    // ROL
    0x2A => ROL(Accumulator),
    0x26 => ROL(ZeroPage),
    0x36 => ROL(ZeroPageX),
    0x2E => ROL(Absolute),
    0x3E => ROL(AbsoluteX),

    // ROR
    0x6A => ROR(Accumulator),
    0x66 => ROR(ZeroPage),
    0x76 => ROR(ZeroPageX),
    0x6E => ROR(Absolute),
    0x7E => ROR(AbsoluteX),

    // RTI, RTS
    0x40 => RTI(Implicit),
    0x60 => RTS(Implicit),

    // SBC
    0xE9 => SBC(Immediate),
    0xE5 => SBC(ZeroPage),
    0xF5 => SBC(ZeroPageX),
    0xED => SBC(Absolute),
    0xFD => SBC(AbsoluteX),
    0xF9 => SBC(AbsoluteY),
    0xE1 => SBC(IndexedIndirect),
    0xF1 => SBC(IndirectIndexed),

    // STA
    0x85 => STA(ZeroPage),
    0x95 => STA(ZeroPageX),
    0x8D => STA(Absolute),
    0x9D => STA(AbsoluteX),
    0x99 => STA(AbsoluteY),
    0x81 => STA(IndexedIndirect),
    0x91 => STA(IndirectIndexed),

    // STX
    0x86 => STX(ZeroPage),
    0x96 => STX(ZeroPageY),
    0x8E => STX(Absolute),

    // STY
    0x84 => STY(ZeroPage),
    0x94 => STY(ZeroPageX),
    0x8C => STY(Absolute),

    // Transfers
    0xAA => TAX(Implicit),
    0xA8 => TAY(Implicit),
    0xBA => TSX(Implicit),
    0x8A => TXA(Implicit),
    0x9A => TXS(Implicit),
    0x98 => TYA(Implicit),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_is_consistent() {
        assert_eq!(OPCODES.len(), 151);

        let pairs: HashSet<_> = OPCODES.iter().map(|op| (op.mnemonic, op.mode)).collect();
        assert_eq!(pairs.len(), OPCODES.len());

        let bytes: HashSet<_> = OPCODES.iter().map(|op| op.byte).collect();
        assert_eq!(bytes.len(), OPCODES.len());
    }

    #[test]
    fn every_mnemonic_is_encodable() {
        for (_, mnemonic) in super::super::MNEMONICS {
            assert!(!mnemonic.modes().is_empty(), "{} has no encoding", mnemonic);
        }
    }

    #[test]
    fn lookup() {
        let op = Opcode::lookup(Mnemonic::LDX, AddressingMode::Immediate).unwrap();
        assert_eq!(op.byte, 0xA2);
        assert_eq!(op.length(), 2);

        let op = Opcode::lookup(Mnemonic::JSR, AddressingMode::Absolute).unwrap();
        assert_eq!(op.byte, 0x20);
        assert_eq!(op.length(), 3);

        let op = Opcode::lookup(Mnemonic::LDA, AddressingMode::IndirectIndexed).unwrap();
        assert_eq!(op.byte, 0xB1);

        assert_eq!(Opcode::lookup(Mnemonic::JSR, AddressingMode::Immediate), None);
        assert_eq!(Opcode::lookup(Mnemonic::STA, AddressingMode::Immediate), None);
        assert_eq!(Opcode::lookup(Mnemonic::LDA, AddressingMode::Indirect), None);
    }

    #[test]
    fn legal_modes() {
        assert_eq!(Mnemonic::NOP.modes(), AddressingModes::IMPLICIT);
        assert_eq!(Mnemonic::BNE.modes(), AddressingModes::RELATIVE);
        assert_eq!(
            Mnemonic::JMP.modes(),
            AddressingModes::ABSOLUTE | AddressingModes::INDIRECT
        );
        assert_eq!(
            Mnemonic::STX.modes(),
            AddressingModes::ZERO_PAGE | AddressingModes::ZERO_PAGE_Y | AddressingModes::ABSOLUTE
        );
        assert!(Mnemonic::ROR.modes().contains(AddressingModes::ACCUMULATOR));
    }

    #[test]
    fn invalid_addressing() {
        let inst = Instruction::new(Mnemonic::JSR, super::super::Addressing::Immediate(0x10));
        assert!(matches!(inst.opcode(), Err(Error::InvalidAddressing(Mnemonic::JSR))));
    }
}
