use eco9_core::{
    resolve_eco9_config_path, resolve_eco9_data_dir, ActivityId, ConfigPathScope, UserId,
};
use eco9_impact::{impact_for, Assessment};
use eco9_model::{ActivityCategory, ActivityInput, ActivityQuery};
use serde_json::json;

use crate::config::{AppConfig, LoadedConfig};
use crate::output::{emit_ok, CliError, OutputMode};
use crate::state::{build_calculator, AppState};

pub(crate) struct ListArgs {
    pub(crate) user: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) limit: usize,
    pub(crate) cursor: Option<String>,
}

pub(crate) fn config_paths(output_mode: OutputMode) -> Result<(), CliError> {
    emit_ok(
        output_mode,
        &json!({
            "workspace_config": resolve_eco9_config_path(ConfigPathScope::Workspace),
            "user_config": resolve_eco9_config_path(ConfigPathScope::User),
            "data_dir": resolve_eco9_data_dir(),
        }),
    )
}

pub(crate) fn show_config(loaded: &LoadedConfig, output_mode: OutputMode) -> Result<(), CliError> {
    emit_ok(
        output_mode,
        &json!({
            "config": loaded.config,
            "source": loaded.source,
            "data_dir": resolve_eco9_data_dir(),
        }),
    )
}

pub(crate) fn impact_calculate(
    config: &AppConfig,
    input: ActivityInput,
    checked: bool,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let calculator = build_calculator(&config.impact)?;
    let assessment = if checked {
        calculator.calculate_checked(&input)?
    } else {
        let resolution = calculator.resolve(input.category.as_str(), input.subtype.as_deref());
        let impact = impact_for(resolution.multiplier, input.value);
        Assessment {
            value: input.value,
            resolution,
            impact,
        }
    };
    emit_ok(
        output_mode,
        &json!({
            "category": input.category,
            "value": assessment.value,
            "unit": input.unit,
            "impact": assessment.impact,
            "source": assessment.resolution.source,
            "multiplier": assessment.resolution.multiplier,
        }),
    )
}

pub(crate) fn impact_table(config: &AppConfig, output_mode: OutputMode) -> Result<(), CliError> {
    let calculator = build_calculator(&config.impact)?;
    let source = config
        .impact
        .multipliers
        .as_ref()
        .map_or_else(|| "builtin".to_string(), |p| p.display().to_string());
    emit_ok(
        output_mode,
        &json!({
            "source": source,
            "fingerprint": calculator.fingerprint(),
            "negative_values": calculator.policy(),
            "table": calculator.table(),
        }),
    )
}

pub(crate) fn activity_log(
    state: &AppState,
    user: &str,
    input: &ActivityInput,
    note: Option<String>,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let user = UserId::new(user)?;
    let stored = state.log_activity(user, input, note)?;
    emit_ok(output_mode, &stored)
}

pub(crate) fn activity_show(state: &AppState, id: u64, output_mode: OutputMode) -> Result<(), CliError> {
    let activity = state.get_activity(ActivityId::new(id)?)?;
    emit_ok(output_mode, &activity)
}

pub(crate) fn activity_update(
    state: &AppState,
    id: u64,
    input: &ActivityInput,
    note: Option<String>,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let updated = state.update_activity(ActivityId::new(id)?, input, note)?;
    emit_ok(output_mode, &updated)
}

pub(crate) fn activity_delete(state: &AppState, id: u64, output_mode: OutputMode) -> Result<(), CliError> {
    let id = ActivityId::new(id)?;
    state.delete_activity(id)?;
    emit_ok(output_mode, &json!({ "deleted": id }))
}

pub(crate) fn activity_list(
    state: &AppState,
    args: ListArgs,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let query = ActivityQuery {
        user: args.user.map(UserId::new).transpose()?,
        category: args.category.map(ActivityCategory::from),
        limit: args.limit,
        cursor: args.cursor,
    };
    let page = state.list_activities(&query)?;
    emit_ok(output_mode, &page)
}

pub(crate) fn summary(
    state: &AppState,
    user: Option<&str>,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let user = user.map(UserId::new).transpose()?;
    let summary = state.summary(user.as_ref())?;
    emit_ok(output_mode, &summary)
}
