use clap::ArgMatches;
use serde::Serialize;
use tracing::info;

use chatavel_core::config::GroupConfig;
use chatavel_core::{Feature, WindowSize, launch};

use crate::table::TableFormatter;

#[derive(Debug, Serialize)]
struct FeatureEntry {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    icon: &'static str,
    color: &'static str,
    size: WindowSize,
}

impl FeatureEntry {
    fn new(feature: Feature) -> Self {
        let spec = launch(feature, &GroupConfig::default());
        Self {
            id: feature.as_str(),
            title: feature.title(),
            description: feature.description(),
            icon: feature.icon(),
            color: feature.color(),
            size: spec.size.unwrap_or_default(),
        }
    }
}

pub(crate) fn handle_features_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.features_started", json_output = json_output);

    let features = Feature::all();
    if json_output {
        let entries: Vec<FeatureEntry> = features.iter().copied().map(FeatureEntry::new).collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!("Features:");
        TableFormatter::new(features).print_table(features);
    }

    info!(event = "cli.features_completed", count = features.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_entry_sizes() {
        assert_eq!(FeatureEntry::new(Feature::Chat).size, WindowSize::Large);
        assert_eq!(FeatureEntry::new(Feature::Map).size, WindowSize::Medium);
    }
}
