use crate::cli::Commands;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    match command {
        Commands::Ingest { json, .. }
        | Commands::Query { json, .. }
        | Commands::Options { json, .. } => {
            if *json {
                OutputMode::Json
            } else {
                OutputMode::Text
            }
        }
        Commands::Serve { .. } => OutputMode::Text,
    }
}

#[cfg(test)]
mod tests {
    use super::{OutputMode, mode_for_command};
    use crate::cli::parse_from;

    #[test]
    fn mode_uses_json_when_flag_is_set() {
        let cases: [&[&str]; 3] = [
            &["morsel", "ingest", "--json"],
            &["morsel", "query", "--metric", "sales", "--json"],
            &["morsel", "options", "--json"],
        ];
        for args in cases {
            let parsed = parse_from(args);
            assert!(parsed.is_ok());
            if let Ok(cli) = parsed {
                assert_eq!(mode_for_command(&cli.command), OutputMode::Json);
            }
        }
    }

    #[test]
    fn mode_uses_text_without_json_flag() {
        let cases: [&[&str]; 4] = [
            &["morsel", "ingest"],
            &["morsel", "query"],
            &["morsel", "options"],
            &["morsel", "serve", "--port", "9000"],
        ];
        for args in cases {
            let parsed = parse_from(args);
            assert!(parsed.is_ok());
            if let Ok(cli) = parsed {
                assert_eq!(mode_for_command(&cli.command), OutputMode::Text);
            }
        }
    }
}
