pub mod invoker;
pub mod pipeline;
pub mod stage1_reconstruct;
pub mod stage2_regenerate;
pub mod stage3_compare;
pub mod stage4_structure;

pub use invoker::*;
pub use pipeline::*;
pub use stage1_reconstruct::*;
pub use stage2_regenerate::*;
pub use stage3_compare::*;
pub use stage4_structure::*;

use std::fmt;

/// The four model calls of one cycle, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    PromptReconstruction,
    Regeneration,
    Comparison,
    Structuring,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::PromptReconstruction,
        Stage::Regeneration,
        Stage::Comparison,
        Stage::Structuring,
    ];

    /// 1-based position in the chain
    pub fn number(&self) -> usize {
        match self {
            Stage::PromptReconstruction => 1,
            Stage::Regeneration => 2,
            Stage::Comparison => 3,
            Stage::Structuring => 4,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::PromptReconstruction => "prompt reconstruction",
            Stage::Regeneration => "regeneration",
            Stage::Comparison => "comparison",
            Stage::Structuring => "structuring",
        };
        f.write_str(name)
    }
}
