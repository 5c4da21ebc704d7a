use lineasm::_6502::{Assembler, Error};
use lineasm::{Command, LineInput, Memory, Ram};
use std::io::{self, Write};
use std::ops::RangeInclusive;
use std::process;

const DEFAULT_ROM: RangeInclusive<u16> = 0xF000..=0xFFFF;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let rom = match parse_args(&args) {
        Some(rom) => rom,
        None => {
            eprintln!("Usage: lineasm [--rom XXXX-YYYY]");
            process::exit(1);
        }
    };

    if let Err(e) = run(rom) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Option<RangeInclusive<u16>> {
    match args {
        [] => Some(DEFAULT_ROM),
        [flag, range] if flag == "--rom" => {
            let (start, end) = range.split_once('-')?;
            let start = u16::from_str_radix(start, 16).ok()?;
            let end = u16::from_str_radix(end, 16).ok()?;
            Some(start..=end)
        }
        _ => None,
    }
}

fn run(rom: RangeInclusive<u16>) -> Result<(), Error> {
    log::info!("ROM at ${:04X}-${:04X}", rom.start(), rom.end());

    let mut memory = Ram::new();
    memory.protect(rom);

    let stdin = io::stdin();
    let mut input = LineInput::new(stdin.lock());
    let stdout = io::stdout();
    let mut output = stdout.lock();

    loop {
        write!(output, "* ").map_err(Error::IO)?;
        output.flush().map_err(Error::IO)?;

        let line = match input.read_line().map_err(Error::IO)? {
            Some(line) => line,
            None => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(Command::Assemble(address)) => {
                Assembler::new(address).run(&mut input, &mut output, &mut memory)?;
                writeln!(output).map_err(Error::IO)?;
            }
            Ok(Command::Memory(address)) => {
                write!(output, "{:04X}:", address).map_err(Error::IO)?;
                for offset in 0..8u16 {
                    let byte = memory.read(address.wrapping_add(offset));
                    write!(output, " {:02X}", byte).map_err(Error::IO)?;
                }
                writeln!(output).map_err(Error::IO)?;
            }
            Ok(Command::Quit) => break,
            Err(e) => writeln!(output, "{}", e).map_err(Error::IO)?,
        }
    }

    Ok(())
}
