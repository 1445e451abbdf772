//! Pipeline stage latches.
//!
//! Each stage owns exactly one [`Latch`]. A latch holds either a bubble or one in-flight
//! instruction together with the scratch values earlier stages computed for it, plus the
//! two control bits that drive the stall protocol:
//! 1. **`busy`:** The stage does nothing this cycle. Every stage but Fetch starts busy and is
//!    released when its first instruction arrives; halt-drain sets it again to shut stages off.
//! 2. **`stalled`:** The stage is holding its content and will not forward it this cycle.
//!    Upstream stages observe it and hold in turn.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::isa::{Instruction, Opcode};

/// Number of stage latches.
pub const STAGE_COUNT: usize = 7;

/// Pipeline stage identifiers, in program order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    /// Instruction fetch.
    Fetch,
    /// Decode and register read.
    Decode,
    /// First execute cycle (ALU, address generation, branch evaluation).
    Execute1,
    /// Second execute cycle.
    Execute2,
    /// Data memory access.
    Memory1,
    /// Second memory cycle.
    Memory2,
    /// Register commit and retirement.
    Writeback,
}

impl Stage {
    /// All stages in program order.
    pub const ALL: [Self; STAGE_COUNT] = [
        Self::Fetch,
        Self::Decode,
        Self::Execute1,
        Self::Execute2,
        Self::Memory1,
        Self::Memory2,
        Self::Writeback,
    ];

    /// Stages between Decode and Writeback where an issued instruction is still in flight.
    pub const BACKEND: [Self; 4] = [
        Self::Execute1,
        Self::Execute2,
        Self::Memory1,
        Self::Memory2,
    ];

    /// The stage this one forwards into, `None` for Writeback.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Fetch => Some(Self::Decode),
            Self::Decode => Some(Self::Execute1),
            Self::Execute1 => Some(Self::Execute2),
            Self::Execute2 => Some(Self::Memory1),
            Self::Memory1 => Some(Self::Memory2),
            Self::Memory2 => Some(Self::Writeback),
            Self::Writeback => None,
        }
    }

    /// Display name used in trace output.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fetch => "Fetch",
            Self::Decode => "Decode/RF",
            Self::Execute1 => "Execute-1",
            Self::Execute2 => "Execute-2",
            Self::Memory1 => "Memory-1",
            Self::Memory2 => "Memory-2",
            Self::Writeback => "Writeback",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An instruction travelling down the pipeline with its stage-local scratch values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InFlight {
    /// Program counter the instruction was fetched from.
    pub pc: u32,
    /// The decoded instruction.
    pub instr: Instruction,
    /// Operand value latched from `rs1` in Decode.
    pub rs1_value: i32,
    /// Operand value latched from `rs2` in Decode.
    pub rs2_value: i32,
    /// Operand value latched from `rs3` in Decode.
    pub rs3_value: i32,
    /// Effective data address computed in Execute-1.
    pub mem_address: i32,
    /// Value destined for `rd`.
    pub result: i32,
    /// Target computed by JUMP, or by a taken BZ/BNZ. Informational only: Fetch is never
    /// redirected.
    pub branch_target: Option<u32>,
}

impl InFlight {
    /// Wraps a freshly fetched instruction.
    pub const fn new(pc: u32, instr: Instruction) -> Self {
        Self {
            pc,
            instr,
            rs1_value: 0,
            rs2_value: 0,
            rs3_value: 0,
            mem_address: 0,
            result: 0,
            branch_target: None,
        }
    }

    /// Shorthand for `self.instr.opcode`.
    pub const fn opcode(&self) -> Opcode {
        self.instr.opcode
    }
}

/// Content of a latch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Slot {
    /// No useful work.
    #[default]
    Bubble,
    /// An instruction occupies the stage.
    Occupied(InFlight),
}

impl Slot {
    /// Whether the slot holds nothing.
    pub const fn is_bubble(&self) -> bool {
        matches!(self, Self::Bubble)
    }

    /// The occupying instruction, if any.
    pub const fn entry(&self) -> Option<&InFlight> {
        match self {
            Self::Bubble => None,
            Self::Occupied(entry) => Some(entry),
        }
    }

    /// Removes the occupying instruction, leaving a bubble.
    pub fn take(&mut self) -> Option<InFlight> {
        match std::mem::take(self) {
            Self::Bubble => None,
            Self::Occupied(entry) => Some(entry),
        }
    }
}

/// One stage's latch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Latch {
    /// Bubble or in-flight instruction.
    pub slot: Slot,
    /// Stage disabled: it neither acts nor forwards.
    pub busy: bool,
    /// Stage holding its content this cycle.
    pub stalled: bool,
}

impl Latch {
    /// Whether an instruction occupies the latch.
    pub const fn is_occupied(&self) -> bool {
        !self.slot.is_bubble()
    }

    /// The occupying instruction, if any.
    pub const fn entry(&self) -> Option<&InFlight> {
        self.slot.entry()
    }

    /// Opcode of the occupying instruction, if any.
    pub fn opcode(&self) -> Option<Opcode> {
        self.entry().map(InFlight::opcode)
    }

    /// Accepts an instruction from upstream; an arriving instruction releases `busy`.
    fn receive(&mut self, entry: InFlight) {
        self.slot = Slot::Occupied(entry);
        self.busy = false;
    }
}

/// The ordered set of stage latches, owned by the pipeline engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Latches {
    latches: [Latch; STAGE_COUNT],
}

impl Default for Latches {
    fn default() -> Self {
        Self::new()
    }
}

impl Latches {
    /// Reset state: every latch empty, every stage but Fetch busy.
    pub fn new() -> Self {
        let mut latches: [Latch; STAGE_COUNT] = Default::default();
        for latch in &mut latches[1..] {
            latch.busy = true;
        }
        Self { latches }
    }

    /// Moves `entry` into the latch after `from`. Writeback has no successor; the call is
    /// then a no-op.
    pub fn forward(&mut self, from: Stage, entry: InFlight) {
        if let Some(next) = from.next() {
            self[next].receive(entry);
        }
    }

    /// Replaces the content of `stage` with a bubble.
    pub fn insert_bubble(&mut self, stage: Stage) {
        self[stage].slot = Slot::Bubble;
    }

    /// Number of latches holding an instruction.
    pub fn occupancy(&self) -> usize {
        self.latches.iter().filter(|l| l.is_occupied()).count()
    }
}

impl Index<Stage> for Latches {
    type Output = Latch;

    fn index(&self, stage: Stage) -> &Latch {
        &self.latches[stage as usize]
    }
}

impl IndexMut<Stage> for Latches {
    fn index_mut(&mut self, stage: Stage) -> &mut Latch {
        &mut self.latches[stage as usize]
    }
}
