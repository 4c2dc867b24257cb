pub mod inventory;
pub mod watch;

pub use inventory::{post_inventory, show_cpu, show_disks, show_inventory, show_memory, show_model};
pub use watch::watch;
