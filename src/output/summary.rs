//! Run summary printed to stdout.

use crate::config::PeeringConfig;
use crate::processing::PeeringOutcome;
use colored::Colorize;

/// Summary lines, without colour.
pub fn summary_lines(config: &PeeringConfig, outcome: &PeeringOutcome) -> Vec<String> {
    vec![
        format!(
            "{}: {}/{} = {}",
            config.tenant1.label,
            config.tenant1.resource_group,
            config.tenant1.virtual_network,
            outcome.tenant1_vnet
        ),
        format!(
            "{}: {}/{} = {}",
            config.tenant2.label,
            config.tenant2.resource_group,
            config.tenant2.virtual_network,
            outcome.tenant2_vnet
        ),
        format!("peering on {}: {}", config.tenant2.label, outcome.on_tenant2),
        format!("peering on {}: {}", config.tenant1.label, outcome.on_tenant1),
    ]
}

pub fn print_summary(config: &PeeringConfig, outcome: &PeeringOutcome) {
    println!("{}", "Virtual network peering in place".on_green());
    for line in summary_lines(config, outcome) {
        println!("  {line}");
    }
}
