//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the pipeline. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions and derived CPI.
//! 2. **Hazards:** Data, control and structural stall cycles plus inserted bubbles.
//! 3. **Instruction mix:** Retired counts by class (ALU, load, store, control).
//! 4. **Control flow:** Jumps and branch outcomes.
//!
//! Counters are observational only; nothing in the pipeline reads them.

use std::time::Instant;

use crate::isa::InstrClass;

/// Simulation statistics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulated cycles.
    pub cycles: u64,
    /// Instructions retired by Writeback, HALT excluded.
    pub instructions_retired: u64,

    /// Retired arithmetic, logical and move instructions.
    pub inst_alu: u64,
    /// Retired loads.
    pub inst_load: u64,
    /// Retired stores.
    pub inst_store: u64,
    /// Retired jumps and branches.
    pub inst_control: u64,

    /// Decode cycles spent waiting on the scoreboard.
    pub stalls_data: u64,
    /// Decode cycles spent holding an unresolved conditional branch.
    pub stalls_control: u64,
    /// Cycles a stage held its instruction because its successor was stalled.
    pub stalls_structural: u64,
    /// Bubbles inserted behind a stalled stage.
    pub bubbles: u64,

    /// Conditional branches whose condition held in Execute-1.
    pub branches_taken: u64,
    /// Conditional branches whose condition did not hold in Execute-1.
    pub branches_not_taken: u64,
    /// JUMP instructions executed.
    pub jumps: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_control: 0,
            stalls_data: 0,
            stalls_control: 0,
            stalls_structural: 0,
            bubbles: 0,
            branches_taken: 0,
            branches_not_taken: 0,
            jumps: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"hazards"`, `"instruction_mix"`, `"control"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "hazards", "instruction_mix", "control"];

impl SimStats {
    /// Counts one retired instruction of `class`. HALT is not counted.
    pub fn record_retire(&mut self, class: InstrClass) {
        match class {
            InstrClass::Alu => self.inst_alu += 1,
            InstrClass::Load => self.inst_load += 1,
            InstrClass::Store => self.inst_store += 1,
            InstrClass::Control => self.inst_control += 1,
            InstrClass::Halt => return,
        }
        self.instructions_retired += 1;
    }

    /// Total stall cycles across all hazard classes.
    pub const fn total_stalls(&self) -> u64 {
        self.stalls_data + self.stalls_control + self.stalls_structural
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// # Arguments
    ///
    /// * `sections` - Slice of section names to print, or empty for all.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |n: u64, total: f64| (n as f64 / total) * 100.0;

        if want("summary") {
            println!("\n==========================================================");
            println!("APEX PIPELINE SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {seconds:.4} s");
            println!("sim_cycles               {}", self.cycles);
            println!("sim_insts                {}", self.instructions_retired);
            println!(
                "sim_ipc                  {:.4}",
                self.instructions_retired as f64 / cyc
            );
            println!("sim_cpi                  {:.4}", cyc / instr);
            println!("----------------------------------------------------------");
        }
        if want("hazards") {
            println!("HAZARDS");
            println!(
                "  stalls.data            {} ({:.2}%)",
                self.stalls_data,
                pct(self.stalls_data, cyc)
            );
            println!(
                "  stalls.control         {} ({:.2}%)",
                self.stalls_control,
                pct(self.stalls_control, cyc)
            );
            println!(
                "  stalls.structural      {} ({:.2}%)",
                self.stalls_structural,
                pct(self.stalls_structural, cyc)
            );
            println!("  bubbles                {}", self.bubbles);
            println!("----------------------------------------------------------");
        }
        if want("instruction_mix") {
            println!("INSTRUCTION MIX");
            println!(
                "  op.alu                 {} ({:.2}%)",
                self.inst_alu,
                pct(self.inst_alu, instr)
            );
            println!(
                "  op.load                {} ({:.2}%)",
                self.inst_load,
                pct(self.inst_load, instr)
            );
            println!(
                "  op.store               {} ({:.2}%)",
                self.inst_store,
                pct(self.inst_store, instr)
            );
            println!(
                "  op.control             {} ({:.2}%)",
                self.inst_control,
                pct(self.inst_control, instr)
            );
            println!("----------------------------------------------------------");
        }
        if want("control") {
            println!("CONTROL FLOW");
            println!("  branch.taken           {}", self.branches_taken);
            println!("  branch.not_taken       {}", self.branches_not_taken);
            println!("  jump                   {}", self.jumps);
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
