use crate::ClientResult;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::ingest::execute;
use crate::settings::{Settings, SettingsOverrides};

pub fn run(overrides: &SettingsOverrides) -> ClientResult<SuccessEnvelope> {
    let settings = Settings::resolve(overrides)?;
    run_with_settings(&settings)
}

#[doc(hidden)]
pub fn run_with_settings(settings: &Settings) -> ClientResult<SuccessEnvelope> {
    let summary = execute(settings)?;
    success("ingest", summary)
}
