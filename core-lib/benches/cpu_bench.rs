// Criterion benches for the fetch/dispatch/execute loop. Setup failures panic,
// as is usual for benches.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sm83_core::{Cpu, CpuConfig, Flags, Memory, RunState, StartupState};

const ENTRY: u16 = 0x0100;

fn post_boot() -> Cpu {
    Cpu::with_config(CpuConfig::default().with_startup(StartupState::PostBoot))
}

fn load(program: &[u8]) -> Memory {
    Memory::with_program(ENTRY, program).expect("bench setup failed")
}

fn cpu_step_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("CPU Operations");
    group.sample_size(100);

    for (name, program) in [
        ("NOP instruction", &[0x00][..]),
        ("LD r,r instructions", &[0x7F][..]), // LD A,A
        ("ADD A,r instructions", &[0x87][..]), // ADD A,A
        ("Memory operations", &[0x3E, 0x42][..]), // LD A,n8
        ("CB instructions", &[0xCB, 0x7C][..]), // BIT 7,H
    ] {
        let mut mem = load(program);
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut cpu = post_boot();
                black_box(cpu.step(&mut mem).expect("step failed"))
            })
        });
    }

    // Flag operations
    group.bench_function("Flag operations", |b| {
        let mut cpu = post_boot();
        b.iter(|| {
            cpu.regs.set_flags(Flags::ZERO | Flags::SUBTRACT);
            cpu.regs.set_flag(Flags::CARRY, true);
            black_box(cpu.regs.flags())
        })
    });

    group.finish();
}

fn cpu_loop_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("CPU Loops");
    group.sample_size(50);

    // LD B,0 ; loop: DEC B ; JR NZ,loop ; HALT (256 iterations)
    let mut mem = load(&[0x06, 0x00, 0x05, 0x20, 0xFD, 0x76]);
    group.bench_function("Countdown loop", |b| {
        b.iter(|| {
            let mut cpu = post_boot();
            while cpu.state() == RunState::Running {
                cpu.step(&mut mem).expect("step failed");
            }
            black_box(cpu.total_cycles())
        })
    });

    group.finish();
}

fn cpu_interrupt_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("CPU Interrupts");
    group.sample_size(100);

    let mut mem = load(&[]);
    group.bench_function("Interrupt handling", |b| {
        b.iter(|| {
            let mut cpu = post_boot();
            cpu.ime = true;
            black_box(cpu.service_interrupt(&mut mem, 0x0040))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    cpu_step_benchmark,
    cpu_loop_benchmark,
    cpu_interrupt_benchmark
);
criterion_main!(benches);
