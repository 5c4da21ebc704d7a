use lineasm::_6502::Assembler;
use lineasm::{Command, LineInput, Ram};

fn assemble(command: &str, lines: &str) -> (Ram, Assembler, String) {
    let start = match command.parse::<Command>() {
        Ok(Command::Assemble(address)) => address,
        other => panic!("not an assemble command: {:?}", other),
    };

    let mut memory = Ram::new();
    let mut input = LineInput::new(lines.as_bytes());
    let mut output = Vec::new();
    let mut asm = Assembler::new(start);

    asm.run(&mut input, &mut output, &mut memory).unwrap();

    (memory, asm, String::from_utf8(output).unwrap())
}

#[test]
fn documented_session() {
    let (memory, asm, output) = assemble(
        "A 6000",
        "NOP\nLDX #0A\nJSR FFEF\nDEX\nBNE 6003\n\x1b\n",
    );

    assert_eq!(
        memory.peek(0x6000, 9),
        vec![0xEA, 0xA2, 0x0A, 0x20, 0xEF, 0xFF, 0xCA, 0xD0, 0xFA]
    );
    assert_eq!(asm.address(), 0x6009);
    assert_eq!(output, "6000: 6001: 6003: 6006: 6007: 6009: ");
}

#[test]
fn lower_case_and_dollar_signs_are_tolerated() {
    let (memory, asm, _) = assemble("A 0300", "lda #$41\nsta $0400,x\nrts\n");

    assert_eq!(
        memory.peek(0x0300, 6),
        vec![0xA9, 0x41, 0x9D, 0x00, 0x04, 0x60]
    );
    assert_eq!(asm.address(), 0x0306);
}

#[test]
fn indirect_modes() {
    let (memory, _, output) = assemble(
        "A C000",
        "LDA (20),Y\nSTA (22,X)\nJMP (FFFC)\nJMP (20),Y\n",
    );

    assert_eq!(
        memory.peek(0xC000, 7),
        vec![0xB1, 0x20, 0x81, 0x22, 0x6C, 0xFC, 0xFF]
    );
    assert!(output.ends_with("C007: Invalid addressing mode\nC007: "));
}

#[test]
fn unknown_mnemonic_writes_nothing() {
    let (memory, asm, output) = assemble("A 6000", "XYZ 1234\n");

    assert_eq!(output, "6000: Invalid instruction\n6000: ");
    assert_eq!(asm.address(), 0x6000);
    assert_eq!(memory.peek(0x6000, 3), vec![0, 0, 0]);
}
