use super::*;
use pretty_assertions::assert_eq;
use test_case::test_case;

fn primary(code: u8) -> Opcode {
    *InstructionSet::standard()
        .primary(code)
        .unwrap_or_else(|| panic!("missing primary opcode {code:02X}"))
}

fn extended(code: u8) -> Opcode {
    *InstructionSet::standard()
        .extended(code)
        .unwrap_or_else(|| panic!("missing extended opcode {code:02X}"))
}

#[test]
fn test_primary_table_has_exactly_the_illegal_holes() {
    let set = InstructionSet::standard();
    for code in 0..=u8::MAX {
        let expect_missing = ILLEGAL_OPCODES.contains(&code) || code == PREFIX_CB;
        assert_eq!(set.primary(code).is_none(), expect_missing, "opcode {code:02X}");
    }
    assert_eq!(set.primary_entries().count(), 256 - ILLEGAL_OPCODES.len() - 1);
}

#[test]
fn test_extended_table_is_complete() {
    let set = InstructionSet::standard();
    assert_eq!(set.extended_entries().count(), 256);
    assert!(set.extended_entries().all(|(_, op)| op.length == 2 && !op.transfers_control));
}

#[test_case(0x00, "NOP", 1 ; "nop")]
#[test_case(0x01, "LD BC,n16", 3 ; "ld bc")]
#[test_case(0x22, "LD (HL+),A", 1 ; "ld hl inc")]
#[test_case(0x36, "LD (HL),n8", 2 ; "ld hl imm")]
#[test_case(0x7E, "LD A,(HL)", 1 ; "ld a hl")]
#[test_case(0x86, "ADD A,(HL)", 1 ; "add hl")]
#[test_case(0xFE, "CP A,n8", 2 ; "cp imm")]
#[test_case(0xF1, "POP AF", 1 ; "pop af")]
#[test_case(0x31, "LD SP,n16", 3 ; "ld sp")]
#[test_case(0xEF, "RST 28h", 1 ; "rst 28")]
#[test_case(0xCC, "CALL Z,n16", 3 ; "call z")]
#[test_case(0x10, "STOP", 2 ; "stop")]
fn test_primary_decoding(code: u8, mnemonic: &str, length: u8) {
    let op = primary(code);
    assert_eq!(op.mnemonic, mnemonic);
    assert_eq!(op.length, length);
}

#[test_case(0x37, "SWAP A")]
#[test_case(0x7C, "BIT 7,H")]
#[test_case(0x9E, "RES 3,(HL)")]
#[test_case(0xC0, "SET 0,B")]
fn test_extended_decoding(code: u8, mnemonic: &str) {
    assert_eq!(extended(code).mnemonic, mnemonic);
}

#[test_case(0x00, 1)]
#[test_case(0x01, 3)]
#[test_case(0x03, 2)]
#[test_case(0x08, 5)]
#[test_case(0x09, 2)]
#[test_case(0x34, 3)]
#[test_case(0x36, 3)]
#[test_case(0x41, 1)]
#[test_case(0x46, 2)]
#[test_case(0x70, 2)]
#[test_case(0x86, 2)]
#[test_case(0xC6, 2)]
#[test_case(0xC1, 3)]
#[test_case(0xC5, 4)]
#[test_case(0xE0, 3)]
#[test_case(0xE2, 2)]
#[test_case(0xE8, 4)]
#[test_case(0xEA, 4)]
#[test_case(0xF8, 3)]
#[test_case(0xF9, 2)]
fn test_primary_cycles(code: u8, cycles: u8) {
    let op = primary(code);
    assert_eq!((op.cost(false), op.cost(true)), (cycles, cycles));
}

#[test_case(0x18, 3, 3 ; "jr")]
#[test_case(0x20, 2, 3 ; "jr nz")]
#[test_case(0xC3, 4, 4 ; "jp")]
#[test_case(0xCA, 3, 4 ; "jp z")]
#[test_case(0xE9, 1, 1 ; "jp hl")]
#[test_case(0xCD, 6, 6 ; "call")]
#[test_case(0xD4, 3, 6 ; "call nc")]
#[test_case(0xC9, 4, 4 ; "ret")]
#[test_case(0xD8, 2, 5 ; "ret c")]
#[test_case(0xD9, 4, 4 ; "reti")]
#[test_case(0xFF, 4, 4 ; "rst 38")]
fn test_branch_cycles(code: u8, not_taken: u8, taken: u8) {
    let op = primary(code);
    assert!(op.transfers_control);
    assert_eq!((op.cost(false), op.cost(true)), (not_taken, taken));
}

#[test]
fn test_only_jumps_calls_returns_transfer_control() {
    let count = InstructionSet::standard()
        .primary_entries()
        .filter(|(_, op)| op.transfers_control)
        .count();
    // JR x5, JP x6 (incl. JP HL), CALL x5, RET x5, RETI, RST x8
    assert_eq!(count, 30);
}

#[test_case(0x06, 2, 4 ; "rlc")]
#[test_case(0x46, 2, 3 ; "bit")]
#[test_case(0x86, 2, 4 ; "res")]
#[test_case(0xC6, 2, 4 ; "set")]
fn test_extended_hl_cycles(hl_code: u8, register: u8, memory: u8) {
    assert_eq!(extended(hl_code).cycles, memory);
    assert_eq!(extended(hl_code + 1).cycles, register);
}

#[test]
fn test_removing_entries_leaves_standard_untouched() {
    let reduced = InstructionSet::standard()
        .clone()
        .without_primary(0x00)
        .without_extended(0x40);
    assert!(reduced.primary(0x00).is_none());
    assert!(reduced.extended(0x40).is_none());
    assert!(InstructionSet::standard().primary(0x00).is_some());
    assert!(InstructionSet::standard().extended(0x40).is_some());
}
