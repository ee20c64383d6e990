// Integration tests: small hand-assembled programs run through the public API,
// the way a host would drive the core.

use anyhow::{bail, ensure, Result};
use pretty_assertions::assert_eq;
use sm83_core::{Cpu, CpuConfig, CpuError, Memory, MemoryBus, RunState, StartupState};

const ENTRY: u16 = 0x0100;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

fn boot(program: &[u8]) -> Result<(Cpu, Memory)> {
    init_tracing();
    let mem = Memory::with_program(ENTRY, program)?;
    let cpu = Cpu::with_config(
        CpuConfig::default()
            .with_startup(StartupState::PostBoot)
            .with_trace(true),
    );
    Ok((cpu, mem))
}

/// Steps until the core halts, returning the M-cycles spent.
fn run_until_halt(cpu: &mut Cpu, mem: &mut Memory, limit: usize) -> Result<u64> {
    let mut cycles = 0;
    for _ in 0..limit {
        cycles += u64::from(cpu.step(&mut *mem)?);
        if cpu.state() == RunState::Halted {
            return Ok(cycles);
        }
    }
    bail!("no HALT within {limit} steps, PC={:#06X}", cpu.regs.pc)
}

#[test]
fn integration_countdown_loop() -> Result<()> {
    // LD B,5 ; loop: DEC B ; JR NZ,loop ; HALT
    let (mut cpu, mut mem) = boot(&[0x06, 0x05, 0x05, 0x20, 0xFD, 0x76])?;
    let cycles = run_until_halt(&mut cpu, &mut mem, 64)?;
    assert_eq!(cpu.regs.b, 0);
    assert_eq!(cycles, 22);
    assert_eq!(cpu.total_cycles(), 22);
    assert_eq!(cpu.opcodes_run(), 12);
    assert_eq!(cpu.regs.pc, 0x0106);
    Ok(())
}

#[test]
fn integration_bcd_addition() -> Result<()> {
    // LD A,0x45 ; ADD A,0x38 ; DAA ; HALT
    let (mut cpu, mut mem) = boot(&[0x3E, 0x45, 0xC6, 0x38, 0x27, 0x76])?;
    run_until_halt(&mut cpu, &mut mem, 8)?;
    assert_eq!(cpu.regs.a, 0x83);
    assert!(!cpu.regs.flag(sm83_core::Flags::CARRY));
    Ok(())
}

#[test]
fn integration_subroutine_call() -> Result<()> {
    // LD SP,0xFFFE ; CALL 0x0110 ; HALT ... 0x0110: LD A,0x99 ; RET
    let (mut cpu, mut mem) = boot(&[0x31, 0xFE, 0xFF, 0xCD, 0x10, 0x01, 0x76])?;
    mem.load(0x0110, &[0x3E, 0x99, 0xC9])?;
    run_until_halt(&mut cpu, &mut mem, 16)?;
    assert_eq!(cpu.regs.a, 0x99);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(cpu.regs.pc, 0x0107);
    Ok(())
}

#[test]
fn integration_fill_with_hl_increment() -> Result<()> {
    // LD HL,0xC000 ; LD B,4 ; LD A,0xAA ; loop: LD (HL+),A ; DEC B ; JR NZ,loop ; HALT
    let program = [
        0x21, 0x00, 0xC0, 0x06, 0x04, 0x3E, 0xAA, 0x22, 0x05, 0x20, 0xFC, 0x76,
    ];
    let (mut cpu, mut mem) = boot(&program)?;
    run_until_halt(&mut cpu, &mut mem, 64)?;
    assert_eq!(mem.slice(0xC000, 5), &[0xAA, 0xAA, 0xAA, 0xAA, 0x00]);
    assert_eq!(cpu.regs.hl(), 0xC004);
    Ok(())
}

#[test]
fn integration_interrupt_wakes_halt() -> Result<()> {
    // EI ; HALT ; NOP ... 0x0040: LD A,0x11 ; RETI
    let (mut cpu, mut mem) = boot(&[0xFB, 0x76, 0x00])?;
    mem.load(0x0040, &[0x3E, 0x11, 0xD9])?;
    run_until_halt(&mut cpu, &mut mem, 4)?;
    assert!(cpu.ime);

    assert_eq!(cpu.service_interrupt(&mut mem, 0x0040), Some(5));
    cpu.step(&mut mem)?;
    cpu.step(&mut mem)?;
    assert_eq!(cpu.regs.a, 0x11);
    assert_eq!(cpu.regs.pc, 0x0102);
    assert!(cpu.ime);
    assert_eq!(cpu.state(), RunState::Running);
    Ok(())
}

#[test]
fn integration_illegal_opcode_stops_program() -> Result<()> {
    // NOP ; <illegal 0xED>
    let (mut cpu, mut mem) = boot(&[0x00, 0xED, 0x00])?;
    cpu.step(&mut mem)?;
    let err = match cpu.step(&mut mem) {
        Err(err) => err,
        Ok(cycles) => bail!("illegal opcode executed in {cycles} cycles"),
    };
    let CpuError::UnimplementedOpcode(report) = &err;
    assert_eq!(report.opcode, 0xED);
    assert_eq!(report.snapshot.registers.pc, 0x0101);
    assert_eq!(report.snapshot.opcodes_run, 1);
    assert_eq!(mem.read8(0x0101), 0xED);

    let wrapped = anyhow::Error::from(err);
    assert!(wrapped.to_string().contains("ED"));
    ensure!(cpu.step(&mut mem).is_err(), "faulted core kept running");
    Ok(())
}
