//! Converters from local monitoring output to CSV

pub mod power;
pub mod top;
pub mod vnstat;

pub use power::{read_power_dir, write_power_csv};
pub use top::{read_top_file, write_top_csv};
pub use vnstat::{read_vnstat_file, write_traffic_csv, Granularity};
