//! Simulation statistics collection and reporting.
//!
//! This module tracks what a run spent its cycles on. It provides:
//! 1. **Cycles:** Total cycles and their split into executing, delaying, and waiting.
//! 2. **Instruction mix:** Counts by mnemonic (SET, OUT, WAIT, JMP, MOV, .wrap).
//! 3. **Control flow:** Jumps taken and not taken, and skipped non-instruction lines.
//! 4. **Data:** Bits shifted out of the out buffer.

use std::time::Instant;

use crate::core::trace::{CycleEvent, CycleTrace};
use crate::isa::{Instruction, Mnemonic, Op};

/// Simulation statistics for one run.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total cycles elapsed.
    pub cycles: u64,
    /// Cycles in which an instruction executed.
    pub instructions_executed: u64,
    /// Cycles spent counting down `[n]` delays.
    pub delay_cycles: u64,
    /// Cycles spent polling a `WAIT` condition.
    pub wait_cycles: u64,
    /// Label-only, directive, and empty lines skipped.
    pub non_instruction_lines: u64,

    /// `SET pins` instructions executed.
    pub inst_set: u64,
    /// `OUT` instructions executed.
    pub inst_out: u64,
    /// `WAIT` instructions executed.
    pub inst_wait: u64,
    /// `JMP` instructions executed (taken or not).
    pub inst_jmp: u64,
    /// `MOV` instructions executed.
    pub inst_mov: u64,
    /// `.wrap` directives executed.
    pub inst_wrap: u64,

    /// Jumps taken.
    pub jumps_taken: u64,
    /// Conditional jumps that fell through.
    pub jumps_not_taken: u64,

    /// Bits shifted out of the out buffer.
    pub bits_consumed: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_executed: 0,
            delay_cycles: 0,
            wait_cycles: 0,
            non_instruction_lines: 0,
            inst_set: 0,
            inst_out: 0,
            inst_wait: 0,
            inst_jmp: 0,
            inst_mov: 0,
            inst_wrap: 0,
            jumps_taken: 0,
            jumps_not_taken: 0,
            bits_consumed: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"cycles"`, `"instruction_mix"`, `"control"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "cycles", "instruction_mix", "control"];

impl SimStats {
    /// Accounts for one step.
    ///
    /// `instruction` is the line the step executed, used to count `OUT` bits; pass `None`
    /// for delay and wait cycles.
    pub fn record(&mut self, trace: &CycleTrace, instruction: Option<&Instruction>) {
        match &trace.event {
            CycleEvent::Delay => self.delay_cycles += 1,
            CycleEvent::Wait { .. } => self.wait_cycles += 1,
            CycleEvent::NonInstruction { .. } => {
                self.non_instruction_lines += 1;
                return;
            }
            CycleEvent::Executed(mnemonic) => {
                self.instructions_executed += 1;
                self.count_mnemonic(*mnemonic);
            }
            CycleEvent::JumpTaken { .. } => {
                self.instructions_executed += 1;
                self.inst_jmp += 1;
                self.jumps_taken += 1;
            }
            CycleEvent::JumpNotTaken => {
                self.instructions_executed += 1;
                self.inst_jmp += 1;
                self.jumps_not_taken += 1;
            }
        }
        if let Some(Instruction {
            op: Op::Out { bits, .. },
            ..
        }) = instruction
        {
            self.bits_consumed += u64::from(*bits);
        }
        self.cycles += 1;
    }

    /// Bumps the per-mnemonic counter.
    const fn count_mnemonic(&mut self, mnemonic: Mnemonic) {
        match mnemonic {
            Mnemonic::Set => self.inst_set += 1,
            Mnemonic::Out => self.inst_out += 1,
            Mnemonic::Wait => self.inst_wait += 1,
            Mnemonic::Jmp => self.inst_jmp += 1,
            Mnemonic::Mov => self.inst_mov += 1,
            Mnemonic::Wrap => self.inst_wrap += 1,
        }
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an empty slice
    /// to print all sections (same as `print()`).
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_executed.max(1) as f64;
        let pct = |n: u64, of: f64| (n as f64 / of) * 100.0;

        if want("summary") {
            let khz = if seconds > 0.0 {
                (self.cycles as f64 / seconds) / 1000.0
            } else {
                0.0
            };
            println!("\n==========================================================");
            println!("PIO STATE MACHINE SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {seconds:.4} s");
            println!("sim_cycles               {}", self.cycles);
            println!("sim_freq                 {khz:.2} kHz");
            println!("sim_insts                {}", self.instructions_executed);
            println!("bits_consumed            {}", self.bits_consumed);
            println!("----------------------------------------------------------");
        }
        if want("cycles") {
            println!("CYCLE BREAKDOWN");
            println!(
                "  cycles.exec            {} ({:.2}%)",
                self.instructions_executed,
                pct(self.instructions_executed, cyc)
            );
            println!(
                "  cycles.delay           {} ({:.2}%)",
                self.delay_cycles,
                pct(self.delay_cycles, cyc)
            );
            println!(
                "  cycles.wait            {} ({:.2}%)",
                self.wait_cycles,
                pct(self.wait_cycles, cyc)
            );
            println!("----------------------------------------------------------");
        }
        if want("instruction_mix") {
            println!("INSTRUCTION MIX");
            for (name, count) in [
                ("op.set", self.inst_set),
                ("op.out", self.inst_out),
                ("op.wait", self.inst_wait),
                ("op.jmp", self.inst_jmp),
                ("op.mov", self.inst_mov),
                ("op.wrap", self.inst_wrap),
            ] {
                println!("  {name:<22} {count} ({:.2}%)", pct(count, instr));
            }
            println!("----------------------------------------------------------");
        }
        if want("control") {
            println!("CONTROL FLOW");
            println!("  jmp.taken              {}", self.jumps_taken);
            println!("  jmp.not_taken          {}", self.jumps_not_taken);
            println!("  lines.skipped          {}", self.non_instruction_lines);
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
