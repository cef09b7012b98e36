use std::path::PathBuf;

use morsel_client::commands;
use morsel_client::commands::query::QueryRunOptions;
use morsel_client::{ClientResult, Settings, SettingsOverrides, SuccessEnvelope};

use crate::cli::{Cli, Commands, IsoDate};
use crate::server;

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Ingest {
            data_dir,
            output_dir,
            product,
            skip_intermediates,
            json: _,
        } => commands::ingest::run(&SettingsOverrides {
            data_dir: data_dir.clone(),
            output_dir: output_dir.clone(),
            product: product.clone(),
            skip_intermediates: *skip_intermediates,
            ..SettingsOverrides::default()
        }),
        Commands::Query {
            metric,
            region,
            from,
            to,
            dataset,
            hike_date,
            json: _,
        } => commands::query::run(&QueryRunOptions {
            metric: metric.clone(),
            region: region.clone(),
            from: iso_string(from),
            to: iso_string(to),
            settings: dataset_overrides(dataset, hike_date),
        }),
        Commands::Options {
            dataset,
            hike_date,
            json: _,
        } => commands::options::run(&dataset_overrides(dataset, hike_date)),
        Commands::Serve {
            dataset,
            host,
            port,
            hike_date,
        } => {
            let settings = Settings::resolve(&SettingsOverrides {
                host: host.clone(),
                port: *port,
                ..dataset_overrides(dataset, hike_date)
            })?;
            server::run(&settings)
        }
    }
}

fn dataset_overrides(dataset: &Option<PathBuf>, hike_date: &Option<IsoDate>) -> SettingsOverrides {
    SettingsOverrides {
        dataset: dataset.clone(),
        hike_date: iso_string(hike_date),
        ..SettingsOverrides::default()
    }
}

fn iso_string(value: &Option<IsoDate>) -> Option<String> {
    value.as_ref().map(|date| date.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use crate::cli::{Commands, parse_from};

    use super::dataset_overrides;

    #[test]
    fn dataset_flags_become_setting_overrides() {
        let parsed = parse_from([
            "morsel",
            "options",
            "--dataset",
            "./out/sales.csv",
            "--hike-date",
            "2020-06-01",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            if let Commands::Options {
                dataset, hike_date, ..
            } = &cli.command
            {
                let overrides = dataset_overrides(dataset, hike_date);
                assert_eq!(
                    overrides.dataset.as_deref(),
                    Some(std::path::Path::new("./out/sales.csv"))
                );
                assert_eq!(overrides.hike_date.as_deref(), Some("2020-06-01"));
                assert!(overrides.home.is_none());
            }
        }
    }
}
