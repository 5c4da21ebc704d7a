use super::Mnemonic;

/// Everything that can end the assembly of a line early.
///
/// The [`Display`](std::fmt::Display) text is what the user sees.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The mnemonic is not a 6502 instruction.
    #[error("Invalid instruction")]
    InvalidInstruction,

    /// The operand text has no recognizable shape.
    #[error("Invalid operand")]
    InvalidOperand,

    /// The branch target is further than a signed byte away.
    #[error("Invalid operand")]
    BranchOutOfRange {
        /// Where the branch wants to go.
        target: u16,
        /// The address the displacement is relative to.
        from: u16,
    },

    /// The instruction exists, but not with this operand.
    #[error("Invalid addressing mode")]
    InvalidAddressing(Mnemonic),

    /// Target memory did not keep a byte.
    #[error("Unable to write to ${address:04X}")]
    Write {
        /// The address that failed read-back.
        address: u16,
    },

    /// An I/O Error was encountered while talking to the user
    #[error(transparent)]
    IO(std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(Error::InvalidInstruction.to_string(), "Invalid instruction");
        assert_eq!(Error::InvalidOperand.to_string(), "Invalid operand");
        assert_eq!(
            Error::BranchOutOfRange {
                target: 0x7000,
                from: 0x6002
            }
            .to_string(),
            "Invalid operand"
        );
        assert_eq!(
            Error::InvalidAddressing(Mnemonic::JSR).to_string(),
            "Invalid addressing mode"
        );
        assert_eq!(
            Error::Write { address: 0xF00D }.to_string(),
            "Unable to write to $F00D"
        );
    }
}
