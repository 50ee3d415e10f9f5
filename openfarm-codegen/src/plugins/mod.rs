//! Built-in protocol plugins and the name registry

mod csv;
mod ros;

pub use csv::CsvPlugin;
pub use ros::RosPlugin;

use crate::plugin::Plugin;

/// Look up a built-in plugin by registry name.
///
/// Accepts both the short and the `_comm`-suffixed spellings.
pub fn plugin_by_name(name: &str) -> Option<Box<dyn Plugin>> {
    match name {
        "csv" | "csv_comm" => Some(Box::new(CsvPlugin)),
        "ros" | "ros_comm" => Some(Box::new(RosPlugin)),
        _ => None,
    }
}
