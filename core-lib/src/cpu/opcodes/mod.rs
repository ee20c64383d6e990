//! Opcode dispatch tables.
//!
//! The instruction set is two independent 256-entry tables: the primary
//! table indexed by the byte at PC, and the extended table reached through
//! the `0xCB` prefix and indexed by the byte at PC+1. Empty entries are
//! undefined opcodes; executing one is a fatal error, never a no-op.
use once_cell::sync::Lazy;

pub mod alu;
pub mod cb;
pub mod control;
pub mod helpers;
pub mod jump;
pub mod load_store;
pub mod types;

pub use types::{Condition, Handler, Opcode};

use crate::cpu::registers::{Reg16, Reg8};
use types::Opcode as Op;

/// Escape byte selecting the extended table
pub const PREFIX_CB: u8 = 0xCB;

/// Primary opcodes with no defined instruction on the SM83.
pub const ILLEGAL_OPCODES: [u8; 11] = [
    0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
];

static STANDARD: Lazy<InstructionSet> = Lazy::new(|| InstructionSet {
    primary: primary_table(),
    extended: extended_table(),
});

/// A primary and an extended opcode table.
#[derive(Debug, Clone)]
pub struct InstructionSet {
    primary: [Option<Opcode>; 256],
    extended: [Option<Opcode>; 256],
}

impl InstructionSet {
    /// The complete SM83 instruction set, built once on first use.
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    pub fn primary(&self, opcode: u8) -> Option<&Opcode> {
        self.primary[usize::from(opcode)].as_ref()
    }

    pub fn extended(&self, opcode: u8) -> Option<&Opcode> {
        self.extended[usize::from(opcode)].as_ref()
    }

    /// Copy of this set with one primary entry removed.
    #[must_use]
    pub fn without_primary(mut self, opcode: u8) -> Self {
        self.primary[usize::from(opcode)] = None;
        self
    }

    /// Copy of this set with one extended entry removed.
    #[must_use]
    pub fn without_extended(mut self, opcode: u8) -> Self {
        self.extended[usize::from(opcode)] = None;
        self
    }

    /// Iterates over `(opcode, entry)` for every defined primary opcode.
    pub fn primary_entries(&self) -> impl Iterator<Item = (u8, &Opcode)> {
        entries(&self.primary)
    }

    /// Iterates over `(opcode, entry)` for every defined extended opcode.
    pub fn extended_entries(&self) -> impl Iterator<Item = (u8, &Opcode)> {
        entries(&self.extended)
    }
}

fn entries(table: &[Option<Opcode>; 256]) -> impl Iterator<Item = (u8, &Opcode)> {
    (0..=u8::MAX).zip(table.iter()).filter_map(|(code, op)| op.as_ref().map(|op| (code, op)))
}

/// Mnemonics that depend on the decoded operands are built once and live for
/// the rest of the program.
fn leak(name: String) -> &'static str {
    Box::leak(name.into_boxed_str())
}

/// Cost of an 8-bit operation: `(HL)` forms pay for the memory access(es).
const fn operand_cycles(reg: Reg8, register: u8, memory: u8) -> u8 {
    match reg {
        Reg8::HlIndirect => memory,
        _ => register,
    }
}

#[allow(clippy::too_many_lines)]
fn primary_table() -> [Option<Opcode>; 256] {
    let mut table: [Option<Opcode>; 256] = [None; 256];
    let mut set = |code: u8, op: Opcode| table[usize::from(code)] = Some(op);

    set(0x00, Op::plain("NOP", 1, 1, control::nop));
    set(0x10, Op::plain("STOP", 2, 1, control::stop));
    set(0x76, Op::plain("HALT", 1, 1, control::halt));
    set(0xF3, Op::plain("DI", 1, 1, control::di));
    set(0xFB, Op::plain("EI", 1, 1, control::ei));

    // --- 16-bit loads and arithmetic, one row per pair (BC, DE, HL, SP) ---
    for row in 0..4u8 {
        let rr = Reg16::from_bits_sp(row).name();
        let base = row << 4;
        set(base | 0x01, Op::plain(leak(format!("LD {rr},n16")), 3, 3, load_store::ld_rr_n16));
        set(base | 0x03, Op::plain(leak(format!("INC {rr}")), 1, 2, alu::inc_rr));
        set(base | 0x09, Op::plain(leak(format!("ADD HL,{rr}")), 1, 2, alu::add_hl_rr));
        set(base | 0x0B, Op::plain(leak(format!("DEC {rr}")), 1, 2, alu::dec_rr));
    }

    // --- Accumulator through a pointer pair ---
    for (row, ptr) in ["(BC)", "(DE)", "(HL+)", "(HL-)"].into_iter().enumerate() {
        let base = (row as u8) << 4;
        set(base | 0x02, Op::plain(leak(format!("LD {ptr},A")), 1, 2, load_store::ld_ind_a));
        set(base | 0x0A, Op::plain(leak(format!("LD A,{ptr}")), 1, 2, load_store::ld_a_ind));
    }

    // --- 8-bit INC/DEC/LD r,n8 columns ---
    for index in 0..8u8 {
        let reg = Reg8::from_bits(index);
        let r = reg.name();
        let base = index << 3;
        let rmw = operand_cycles(reg, 1, 3);
        set(base | 0x04, Op::plain(leak(format!("INC {r}")), 1, rmw, alu::inc_r));
        set(base | 0x05, Op::plain(leak(format!("DEC {r}")), 1, rmw, alu::dec_r));
        let name = leak(format!("LD {r},n8"));
        set(base | 0x06, Op::plain(name, 2, operand_cycles(reg, 2, 3), load_store::ld_r_n8));
    }

    set(0x07, Op::plain("RLCA", 1, 1, cb::rotate_a));
    set(0x0F, Op::plain("RRCA", 1, 1, cb::rotate_a));
    set(0x17, Op::plain("RLA", 1, 1, cb::rotate_a));
    set(0x1F, Op::plain("RRA", 1, 1, cb::rotate_a));
    set(0x27, Op::plain("DAA", 1, 1, alu::daa_a));
    set(0x2F, Op::plain("CPL", 1, 1, alu::cpl));
    set(0x37, Op::plain("SCF", 1, 1, alu::scf));
    set(0x3F, Op::plain("CCF", 1, 1, alu::ccf));
    set(0x08, Op::plain("LD (n16),SP", 3, 5, load_store::ld_n16_sp));

    // --- LD r,r' block (0x76 is HALT) ---
    for code in 0x40..=0x7Fu8 {
        if code == 0x76 {
            continue;
        }
        let dst = Reg8::from_bits(code >> 3);
        let src = Reg8::from_bits(code);
        let cycles = if dst == Reg8::HlIndirect || src == Reg8::HlIndirect { 2 } else { 1 };
        let name = leak(format!("LD {},{}", dst.name(), src.name()));
        set(code, Op::plain(name, 1, cycles, load_store::ld_r_r));
    }

    // --- ALU block and its immediate forms ---
    for code in 0x80..=0xBFu8 {
        let alu_op = alu::AluOp::from_bits(code >> 3);
        let src = Reg8::from_bits(code);
        let name = leak(format!("{}{}", alu_op.name(), src.name()));
        set(code, Op::plain(name, 1, operand_cycles(src, 1, 2), alu::alu_r));
    }
    for index in 0..8u8 {
        let name = leak(format!("{}n8", alu::AluOp::from_bits(index).name()));
        set(0xC6 | (index << 3), Op::plain(name, 2, 2, alu::alu_n8));
    }

    // --- Control transfer ---
    set(0x18, Op::branch("JR e8", 2, 3, 3, jump::jr));
    set(0xC3, Op::branch("JP n16", 3, 4, 4, jump::jp));
    set(0xE9, Op::branch("JP HL", 1, 1, 1, jump::jp_hl));
    set(0xCD, Op::branch("CALL n16", 3, 6, 6, jump::call));
    set(0xC9, Op::branch("RET", 1, 4, 4, jump::ret));
    set(0xD9, Op::branch("RETI", 1, 4, 4, jump::reti));
    for index in 0..4u8 {
        let cc = Condition::from_bits(index).name();
        let base = index << 3;
        set(0x20 | base, Op::branch(leak(format!("JR {cc},e8")), 2, 2, 3, jump::jr_cc));
        set(0xC0 | base, Op::branch(leak(format!("RET {cc}")), 1, 2, 5, jump::ret_cc));
        set(0xC2 | base, Op::branch(leak(format!("JP {cc},n16")), 3, 3, 4, jump::jp_cc));
        set(0xC4 | base, Op::branch(leak(format!("CALL {cc},n16")), 3, 3, 6, jump::call_cc));
    }
    for index in 0..8u8 {
        let vector = index << 3;
        set(0xC7 | vector, Op::branch(leak(format!("RST {vector:02X}h")), 1, 4, 4, jump::rst));
    }

    // --- Stack ---
    for row in 0..4u8 {
        let rr = Reg16::from_bits_af(row).name();
        let base = 0xC0 | (row << 4);
        set(base | 0x01, Op::plain(leak(format!("POP {rr}")), 1, 3, load_store::pop));
        set(base | 0x05, Op::plain(leak(format!("PUSH {rr}")), 1, 4, load_store::push));
    }
    set(0xE8, Op::plain("ADD SP,e8", 2, 4, alu::add_sp_e8));
    set(0xF8, Op::plain("LD HL,SP+e8", 2, 3, load_store::ld_hl_sp_e8));
    set(0xF9, Op::plain("LD SP,HL", 1, 2, load_store::ld_sp_hl));

    // --- High page and absolute addressing ---
    set(0xE0, Op::plain("LDH (n8),A", 2, 3, load_store::ldh_n8_a));
    set(0xF0, Op::plain("LDH A,(n8)", 2, 3, load_store::ldh_a_n8));
    set(0xE2, Op::plain("LD (C),A", 1, 2, load_store::ldh_c_a));
    set(0xF2, Op::plain("LD A,(C)", 1, 2, load_store::ldh_a_c));
    set(0xEA, Op::plain("LD (n16),A", 3, 4, load_store::ld_n16_a));
    set(0xFA, Op::plain("LD A,(n16)", 3, 4, load_store::ld_a_n16));

    table
}

fn extended_table() -> [Option<Opcode>; 256] {
    let mut table: [Option<Opcode>; 256] = [None; 256];
    for code in 0..=u8::MAX {
        let reg = Reg8::from_bits(code);
        let r = reg.name();
        let bit = (code >> 3) & 0x07;
        let op = match code >> 6 {
            0 => {
                let shift = cb::ShiftOp::from_bits(code >> 3);
                let name = leak(format!("{} {r}", shift.name()));
                Op::plain(name, 2, operand_cycles(reg, 2, 4), cb::shift_r)
            }
            1 => Op::plain(leak(format!("BIT {bit},{r}")), 2, operand_cycles(reg, 2, 3), cb::bit_r),
            2 => Op::plain(leak(format!("RES {bit},{r}")), 2, operand_cycles(reg, 2, 4), cb::res_r),
            _ => Op::plain(leak(format!("SET {bit},{r}")), 2, operand_cycles(reg, 2, 4), cb::set_r),
        };
        table[usize::from(code)] = Some(op);
    }
    table
}

#[cfg(test)]
mod tests;
