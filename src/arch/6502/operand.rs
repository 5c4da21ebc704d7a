use super::{Addressing, AddressingModes, Error, Result};

/// Work out the addressing mode and value of operand text.
///
/// `text` is upper-case and free of whitespace: hex digits plus the
/// characters `#(),XY`. `legal` are the addressing modes of the instruction
/// the operand belongs to; four bare digits are a [`Addressing::Relative`]
/// target when the instruction can branch and an [`Addressing::Absolute`]
/// address otherwise.
///
/// Nothing beyond the shape of the text is checked here, so `A` classifies as
/// [`Addressing::Accumulator`] even for an instruction without that mode.
pub fn classify(text: &str, legal: AddressingModes) -> Result<Addressing> {
    let addressing = match text.as_bytes() {
        b"A" => Addressing::Accumulator,
        [b'#', value @ ..] => Addressing::Immediate(byte(value)?),
        [b'(', value @ .., b',', b'X', b')'] => Addressing::IndexedIndirect(byte(value)?),
        [b'(', value @ .., b')', b',', b'Y'] => Addressing::IndirectIndexed(byte(value)?),
        [b'(', value @ .., b')'] => Addressing::Indirect(word(value)?),
        [value @ .., b',', b'X'] => match value.len() {
            2 => Addressing::ZeroPageX(byte(value)?),
            _ => Addressing::AbsoluteX(word(value)?),
        },
        [value @ .., b',', b'Y'] => match value.len() {
            2 => Addressing::ZeroPageY(byte(value)?),
            _ => Addressing::AbsoluteY(word(value)?),
        },
        value => match value.len() {
            2 => Addressing::ZeroPage(byte(value)?),
            _ if legal.contains(AddressingModes::RELATIVE) => Addressing::Relative(word(value)?),
            _ => Addressing::Absolute(word(value)?),
        },
    };

    Ok(addressing)
}

fn byte(digits: &[u8]) -> Result<u8> {
    match digits {
        [hi, lo] => Ok(digit(*hi)? << 4 | digit(*lo)?),
        _ => Err(Error::InvalidOperand),
    }
}

fn word(digits: &[u8]) -> Result<u16> {
    match digits {
        [a, b, c, d] => Ok(u16::from_be_bytes([byte(&[*a, *b])?, byte(&[*c, *d])?])),
        _ => Err(Error::InvalidOperand),
    }
}

fn digit(c: u8) -> Result<u8> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(Error::InvalidOperand),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::_6502::Mnemonic;

    fn modes(mnemonic: Mnemonic) -> AddressingModes {
        mnemonic.modes()
    }

    #[test]
    fn shapes() {
        let lda = modes(Mnemonic::LDA);
        let cases = [
            ("A", Addressing::Accumulator),
            ("#0A", Addressing::Immediate(0x0A)),
            ("80", Addressing::ZeroPage(0x80)),
            ("80,X", Addressing::ZeroPageX(0x80)),
            ("80,Y", Addressing::ZeroPageY(0x80)),
            ("FFEF", Addressing::Absolute(0xFFEF)),
            ("0200,X", Addressing::AbsoluteX(0x0200)),
            ("0200,Y", Addressing::AbsoluteY(0x0200)),
            ("(40,X)", Addressing::IndexedIndirect(0x40)),
            ("(40),Y", Addressing::IndirectIndexed(0x40)),
            ("(FFFC)", Addressing::Indirect(0xFFFC)),
        ];

        for (text, expected) in cases.iter() {
            assert_eq!(classify(text, lda).unwrap(), *expected, "{}", text);
        }
    }

    #[test]
    fn four_digits_follow_the_instruction() {
        assert_eq!(
            classify("6003", modes(Mnemonic::BNE)).unwrap(),
            Addressing::Relative(0x6003)
        );
        assert_eq!(
            classify("6003", modes(Mnemonic::JMP)).unwrap(),
            Addressing::Absolute(0x6003)
        );
        // Two digits never mean a branch target.
        assert_eq!(
            classify("03", modes(Mnemonic::BNE)).unwrap(),
            Addressing::ZeroPage(0x03)
        );
    }

    #[test]
    fn malformed() {
        let lda = modes(Mnemonic::LDA);
        for text in [
            "", "#", "#1", "#123", "1", "123", "12345", "0G", "ab", "12,", "12,Z", "123,X",
            "(12)", "(1234,X)", "(12,Y)", "(12),X", "(12", "12)", "AA,XY", "#(12)",
        ]
        .iter()
        {
            assert!(
                matches!(classify(text, lda), Err(Error::InvalidOperand)),
                "{:?} classified",
                text
            );
        }
    }

    #[test]
    fn classification_is_pure() {
        let bne = modes(Mnemonic::BNE);
        assert_eq!(classify("6003", bne).unwrap(), classify("6003", bne).unwrap());
    }
}
