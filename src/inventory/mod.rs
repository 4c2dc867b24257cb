// Hardware inventory probes and snapshot assembly
pub mod assembler;
pub mod parse;
pub mod probe_cpu;
pub mod probe_disks;
pub mod probe_identity;
pub mod probe_memory;
pub mod runner;
pub mod types;

// Re-export the probe entry points
pub use assembler::Collector;
pub use probe_cpu::probe_cpu_info;
pub use probe_identity::{node_name, probe_model_info};
pub use probe_memory::probe_memory_info;
