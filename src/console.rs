use crate::Input;
use std::io::BufRead;
use std::str::FromStr;

const ESC: char = '\u{1b}';

/// The two fields of an assembly line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The three letter instruction name.
    Mnemonic,
    /// Everything after the mnemonic.
    Operand,
}

impl Field {
    /// Whether `c` may appear in this field.
    pub fn accepts(self, c: char) -> bool {
        match self {
            Field::Mnemonic => c.is_ascii_uppercase(),
            Field::Operand => matches!(c, '0'..='9' | 'A'..='F' | '#' | '(' | ')' | ',' | 'X' | 'Y'),
        }
    }

    /// Drop everything this field does not accept.
    pub fn filter(self, text: &str) -> String {
        text.chars().filter(|&c| self.accepts(c)).collect()
    }
}

/// Line oriented [`Input`] over any [`BufRead`].
///
/// Each mnemonic read consumes one line of text, which is upper-cased and
/// split at the first whitespace; the remainder is served as the operand.
/// End of input and the ESC character both signal Escape.
pub struct LineInput<R> {
    reader: R,
    operand: Option<String>,
}

impl<R: BufRead> LineInput<R> {
    /// Wrap `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            operand: None,
        }
    }

    /// Read one whole line, upper-cased and without its line ending.
    ///
    /// Returns `Ok(None)` at end of input.
    pub fn read_line(&mut self) -> std::io::Result<Option<String>> {
        self.operand = None;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let line = line.trim_end_matches(&['\r', '\n'][..]);
        Ok(Some(line.to_ascii_uppercase()))
    }
}

impl<R: BufRead> Input for LineInput<R> {
    fn read_field(&mut self, field: Field) -> std::io::Result<Option<String>> {
        let text = match field {
            Field::Mnemonic => {
                let line = match self.read_line()? {
                    Some(line) => line,
                    None => return Ok(None),
                };
                let line = line.trim_start();
                let split = line.find(char::is_whitespace).unwrap_or_else(|| line.len());
                let (mnemonic, operand) = line.split_at(split);
                self.operand = Some(operand.to_string());
                mnemonic.to_string()
            }
            Field::Operand => self.operand.take().unwrap_or_default(),
        };

        if text.contains(ESC) {
            self.operand = None;
            return Ok(None);
        }

        Ok(Some(field.filter(&text)))
    }
}

/// Errors while parsing a monitor command
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The command letter is not known.
    #[error("Unknown command")]
    Unknown,

    /// The argument is not a 4 digit hexadecimal address.
    #[error("Invalid address")]
    Address,
}

/// A monitor command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `A XXXX`: assemble lines starting at `XXXX`.
    Assemble(u16),
    /// `M XXXX`: show the memory starting at `XXXX`.
    Memory(u16),
    /// `Q`: leave the monitor.
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or(CommandError::Unknown)?;
        let argument = words.next();

        match (command, argument) {
            ("A", Some(address)) => address_of(address).map(Command::Assemble),
            ("M", Some(address)) => address_of(address).map(Command::Memory),
            ("A", None) | ("M", None) => Err(CommandError::Address),
            ("Q", None) => Ok(Command::Quit),
            _ => Err(CommandError::Unknown),
        }
    }
}

fn address_of(text: &str) -> Result<u16, CommandError> {
    let valid = text.len() == 4 && text.chars().all(|c| matches!(c, '0'..='9' | 'A'..='F'));
    if !valid {
        return Err(CommandError::Address);
    }
    u16::from_str_radix(text, 16).map_err(|_| CommandError::Address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_mnemonic_and_operand() {
        let mut input = LineInput::new(&b"  lda ($20),y\nnop\n"[..]);

        assert_eq!(input.read_field(Field::Mnemonic).unwrap(), Some("LDA".into()));
        assert_eq!(input.read_field(Field::Operand).unwrap(), Some("(20),Y".into()));
        assert_eq!(input.read_field(Field::Mnemonic).unwrap(), Some("NOP".into()));
        assert_eq!(input.read_field(Field::Operand).unwrap(), Some("".into()));
        assert_eq!(input.read_field(Field::Mnemonic).unwrap(), None);
    }

    #[test]
    fn filters_operand_charset() {
        let mut input = LineInput::new(&b"STA $0200, X\n"[..]);

        input.read_field(Field::Mnemonic).unwrap();
        assert_eq!(input.read_field(Field::Operand).unwrap(), Some("0200,X".into()));
    }

    #[test]
    fn escape_in_either_field() {
        let mut input = LineInput::new(&b"\x1b\nLDA 12\x1b\n"[..]);

        assert_eq!(input.read_field(Field::Mnemonic).unwrap(), None);
        assert_eq!(input.read_field(Field::Mnemonic).unwrap(), Some("LDA".into()));
        assert_eq!(input.read_field(Field::Operand).unwrap(), None);
    }

    #[test]
    fn unread_operand_is_discarded() {
        let mut input = LineInput::new(&b"XYZ 1234\nINX\n"[..]);

        input.read_field(Field::Mnemonic).unwrap();
        assert_eq!(input.read_field(Field::Mnemonic).unwrap(), Some("INX".into()));
        assert_eq!(input.read_field(Field::Operand).unwrap(), Some("".into()));
    }

    #[test]
    fn parses_commands() {
        assert_eq!("A 6000".parse::<Command>(), Ok(Command::Assemble(0x6000)));
        assert_eq!("M FFEF".parse::<Command>(), Ok(Command::Memory(0xFFEF)));
        assert_eq!("Q".parse::<Command>(), Ok(Command::Quit));
        assert_eq!("A 600".parse::<Command>(), Err(CommandError::Address));
        assert_eq!("A".parse::<Command>(), Err(CommandError::Address));
        assert_eq!("A 60G0".parse::<Command>(), Err(CommandError::Address));
        assert_eq!("Z 6000".parse::<Command>(), Err(CommandError::Unknown));
        assert_eq!("".parse::<Command>(), Err(CommandError::Unknown));
    }
}
