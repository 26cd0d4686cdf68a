// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

use eco9_core::{ActivityId, Error, ExitCode, MachineError, UserId};
use eco9_impact::{builtin_table, load_table_from_path, summarize, ImpactCalculator, MultiplierSource};
use eco9_model::{
    Activity, ActivityInput, ActivityPage, ActivityQuery, ImpactSummary, NewActivity,
    MAX_PAGE_LIMIT, NOTE_MAX_LEN,
};
use eco9_store::{open_repository, ActivityRepository, StoreError};

use crate::config::{AppConfig, ImpactConfig};

#[derive(Debug)]
#[non_exhaustive]
pub enum AppError {
    Core(Error),
    Store(StoreError),
}

impl AppError {
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Core(err) => err.exit_code(),
            Self::Store(err) => err.code.exit_code(),
        }
    }

    #[must_use]
    pub fn to_machine(&self) -> MachineError {
        match self {
            Self::Core(err) => err.to_machine(),
            Self::Store(err) => err.to_machine(),
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Core(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Core(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<Error> for AppError {
    fn from(value: Error) -> Self {
        Self::Core(value)
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Loads the configured multiplier table, or the built-in one.
pub fn build_calculator(config: &ImpactConfig) -> Result<ImpactCalculator, Error> {
    let table = match config.multipliers.as_deref() {
        Some(path) => load_table_from_path(path)?,
        None => builtin_table().clone(),
    };
    ImpactCalculator::new(table, config.negative_values)
}

/// Everything a command needs: configuration, calculator and repository.
///
/// Built once per process by [`AppState::init`] and torn down by
/// [`AppState::shutdown`].
pub struct AppState {
    config: AppConfig,
    calculator: ImpactCalculator,
    repository: Box<dyn ActivityRepository>,
}

impl AppState {
    pub fn init(config: AppConfig) -> Result<Self, AppError> {
        let calculator = build_calculator(&config.impact)?;
        let repository = open_repository(&config.store)?;
        tracing::info!(
            backend = repository.backend().as_str(),
            table_fingerprint = calculator.fingerprint(),
            categories = calculator.table().categories().len(),
            negative_values = calculator.policy().as_str(),
            "eco9 state initialized"
        );
        Ok(Self {
            config,
            calculator,
            repository,
        })
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn calculator(&self) -> &ImpactCalculator {
        &self.calculator
    }

    #[must_use]
    pub fn repository(&self) -> &dyn ActivityRepository {
        self.repository.as_ref()
    }

    pub fn log_activity(
        &self,
        user: UserId,
        input: &ActivityInput,
        note: Option<String>,
    ) -> Result<Activity, AppError> {
        let record = self.score(user, input, note)?;
        let stored = self.repository.insert(record)?;
        tracing::info!(
            id = stored.id.get(),
            user = %stored.user,
            category = %stored.category,
            co2_saved = stored.impact.co2_saved,
            "activity logged"
        );
        Ok(stored)
    }

    /// Recalculates the impact from `input` and replaces the stored record.
    /// The owning user is kept.
    pub fn update_activity(
        &self,
        id: ActivityId,
        input: &ActivityInput,
        note: Option<String>,
    ) -> Result<Activity, AppError> {
        let existing = self.repository.get(id)?;
        let record = self.score(existing.user, input, note)?;
        let updated = self.repository.update(id, record)?;
        tracing::info!(id = id.get(), "activity updated");
        Ok(updated)
    }

    pub fn delete_activity(&self, id: ActivityId) -> Result<(), AppError> {
        self.repository.delete(id)?;
        tracing::info!(id = id.get(), "activity deleted");
        Ok(())
    }

    pub fn get_activity(&self, id: ActivityId) -> Result<Activity, AppError> {
        Ok(self.repository.get(id)?)
    }

    pub fn list_activities(&self, query: &ActivityQuery) -> Result<ActivityPage, AppError> {
        Ok(self.repository.list(query)?)
    }

    /// Totals over every stored activity, optionally for one user.
    pub fn summary(&self, user: Option<&UserId>) -> Result<ImpactSummary, AppError> {
        let mut query = ActivityQuery {
            user: user.cloned(),
            limit: MAX_PAGE_LIMIT,
            ..ActivityQuery::default()
        };
        let mut activities = Vec::new();
        loop {
            let page = self.repository.list(&query)?;
            activities.extend(page.items);
            match page.next_cursor {
                Some(cursor) => query.cursor = Some(cursor),
                None => break,
            }
        }
        Ok(summarize(&activities))
    }

    pub fn shutdown(self) -> Result<(), AppError> {
        self.repository.close()?;
        tracing::info!(backend = self.repository.backend().as_str(), "eco9 state shut down");
        Ok(())
    }

    fn score(
        &self,
        user: UserId,
        input: &ActivityInput,
        note: Option<String>,
    ) -> Result<NewActivity, AppError> {
        if let Some(text) = note.as_deref() {
            if text.len() > NOTE_MAX_LEN {
                return Err(Error::InvalidArgument {
                    field: "note",
                    value: format!("{} bytes", text.len()),
                    reason: "exceeds maximum length",
                }
                .into());
            }
        }
        let assessment = self.calculator.calculate_checked(input)?;
        let subtype = match assessment.resolution.source {
            MultiplierSource::Subtype { subtype, .. } => Some(subtype),
            MultiplierSource::GlobalDefault => None,
        };
        Ok(NewActivity {
            user,
            category: input.category.clone(),
            subtype,
            value: assessment.value,
            unit: input.unit.clone(),
            note,
            impact: assessment.impact,
        })
    }
}
