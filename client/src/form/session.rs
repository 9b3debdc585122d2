use std::sync::Arc;

use anyhow::anyhow;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::error;

use dailyflo::task::{RoutineType, Task, TaskCreation, TaskId, TaskPatch};

use crate::{
    store::{TaskCache, TaskStore},
    DailyfloClientError,
};

use super::{
    occurrence::resolve_occurrence_date,
    prompt::{RECURRING_UPDATE_MESSAGE, RECURRING_UPDATE_OPTIONS, RECURRING_UPDATE_TITLE},
    reconciler::{create_mode_is_dirty, effective_schedule, validate, EffectiveSchedule},
    ConfirmationPrompt, FormDefaults, FormFields, InitialValues, RecurringSaveChoice,
    ScheduleAutosave, ScheduleDraft,
};

/// Route parameters the form screen is opened with.
///
/// A missing `task_id` means create mode; `due_date` seeds the create-mode
/// draft; `occurrence_date` is present only when entering the form from a
/// specific occurrence in a recurring series view.
#[derive(Debug, Clone, Default)]
pub struct FormRoute {
    pub task_id: Option<TaskId>,
    pub due_date: Option<DateTime<Utc>>,
    pub occurrence_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Creating,
    Editing,
}

#[derive(Debug, PartialEq)]
pub enum SaveOutcome {
    Saved(Task),
    Cancelled,
}

/// One form session: created when the form screen mounts, discarded when it
/// closes. Owns the draft, the cached field state and the save flows.
pub struct FormSession {
    store: Arc<dyn TaskStore + Send + Sync>,
    prompt: Arc<dyn ConfirmationPrompt + Send + Sync>,
    cache: TaskCache,
    defaults: FormDefaults,
    mode: FormMode,
    task: Option<Task>,
    occurrence_date: Option<NaiveDate>,
    pub draft: ScheduleDraft,
    pub fields: FormFields,
    initial_values: Option<InitialValues>,
    autosave: ScheduleAutosave,
    closing: bool,
}

impl FormSession {
    /// Opens a form session from route parameters.
    ///
    /// In edit mode the task is looked up in the local cache first; on a miss
    /// (deep link, stale cache) the full task list is re-fetched once, with
    /// no retry.
    pub async fn open(
        store: Arc<dyn TaskStore + Send + Sync>,
        prompt: Arc<dyn ConfirmationPrompt + Send + Sync>,
        mut cache: TaskCache,
        defaults: FormDefaults,
        route: FormRoute,
        now: DateTime<Utc>,
    ) -> Result<FormSession, DailyfloClientError> {
        let Some(task_id) = route.task_id else {
            let mut fields = FormFields::from_defaults(&defaults);
            fields.due_date = route.due_date;
            let mut draft = ScheduleDraft::new();
            if let Some(due_date) = route.due_date {
                draft.set_due_date(due_date);
            }

            return Ok(FormSession {
                store,
                prompt,
                cache,
                defaults,
                mode: FormMode::Creating,
                task: None,
                occurrence_date: None,
                draft,
                fields,
                initial_values: None,
                autosave: ScheduleAutosave::new(),
                closing: false,
            });
        };

        let task = match cache.get(task_id) {
            Some(task) => task.clone(),
            None => {
                let tasks = store.fetch_all_tasks().await?;
                cache.replace_all(tasks);
                cache
                    .get(task_id)
                    .cloned()
                    .ok_or(DailyfloClientError::TaskNotFound(task_id))?
            }
        };

        let occurrence_at = resolve_occurrence_date(&task, route.occurrence_date, now);
        let fields = FormFields::from_task(&task, occurrence_at);
        let draft = ScheduleDraft::from_task(&task, occurrence_at);
        let initial_values = InitialValues::capture(&fields);
        let mut autosave = ScheduleAutosave::new();
        autosave.task_loaded();

        Ok(FormSession {
            store,
            prompt,
            cache,
            defaults,
            mode: FormMode::Editing,
            task: Some(task),
            occurrence_date: route.occurrence_date,
            draft,
            fields,
            initial_values: Some(initial_values),
            autosave,
            closing: false,
        })
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn task(&self) -> Option<&Task> {
        self.task.as_ref()
    }

    pub fn cache(&self) -> &TaskCache {
        &self.cache
    }

    pub fn is_closing(&self) -> bool {
        self.closing
    }

    pub fn effective_schedule(&self, now: DateTime<Utc>) -> EffectiveSchedule {
        effective_schedule(&self.draft, &self.fields, now)
    }

    pub fn is_dirty(&self) -> bool {
        match self.mode {
            FormMode::Creating => create_mode_is_dirty(&self.fields, &self.defaults),
            FormMode::Editing => self
                .initial_values
                .as_ref()
                .map(|initial_values| initial_values.differs_from(&self.fields))
                .unwrap_or(false),
        }
    }

    /// In edit mode the save button mirrors the dirty flag; in create mode
    /// the title is the only required field.
    pub fn save_button_visible(&self) -> bool {
        match self.mode {
            FormMode::Creating => !self.fields.title.is_empty(),
            FormMode::Editing => self.is_dirty(),
        }
    }

    /// Runs the schedule auto-save decision for the current draft, issuing
    /// at most one update call.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn sync_schedule(&mut self) -> Result<Option<Task>, DailyfloClientError> {
        let Some(task) = self.task.as_ref() else {
            return Ok(None);
        };
        let Some(patch) = self.autosave.plan(&self.draft, &self.fields, task) else {
            return Ok(None);
        };

        let updated = self.store.update_task(task.id, &patch).await?;
        self.autosave.save_succeeded();
        self.task = Some(updated.clone());
        self.cache.upsert(updated.clone());

        Ok(Some(updated))
    }

    /// Changing the routine type bypasses the dirty-check/save-button flow
    /// and updates the record immediately.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn set_routine_type(
        &mut self,
        routine_type: RoutineType,
    ) -> Result<(), DailyfloClientError> {
        self.fields.routine_type = routine_type;

        if let Some(task) = self.task.as_ref() {
            let patch = TaskPatch {
                routine_type: Some(routine_type),
                ..Default::default()
            };
            let updated = self.store.update_task(task.id, &patch).await?;
            self.task = Some(updated.clone());
            self.cache.upsert(updated);
        }

        Ok(())
    }

    /// The explicit save action.
    ///
    /// Validation failures and remote write failures leave the session open
    /// so the user can retry; a successful save (or a cancelled prompt)
    /// resolves the session.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn save(&mut self, now: DateTime<Utc>) -> Result<SaveOutcome, DailyfloClientError> {
        if self.closing {
            return Ok(SaveOutcome::Cancelled);
        }

        validate(&self.fields)?;
        let schedule = self.effective_schedule(now);

        match self.mode {
            FormMode::Creating => {
                let creation = self.build_creation(&schedule, self.fields.routine_type);
                self.closing = true;
                match self.store.create_task(&creation).await {
                    Ok(created) => {
                        self.cache.upsert(created.clone());
                        Ok(SaveOutcome::Saved(created))
                    }
                    Err(save_error) => {
                        self.closing = false;
                        Err(save_error)
                    }
                }
            }
            FormMode::Editing => {
                let task = self
                    .task
                    .clone()
                    .ok_or_else(|| anyhow!("Form session in edit mode without a loaded task"))?;

                if task.is_recurring() {
                    self.save_recurring(&task, schedule, now).await
                } else {
                    self.update_task_in_place(&task, &schedule).await
                }
            }
        }
    }

    async fn save_recurring(
        &mut self,
        task: &Task,
        schedule: EffectiveSchedule,
        now: DateTime<Utc>,
    ) -> Result<SaveOutcome, DailyfloClientError> {
        // the occurrence date is known either from the route or derived from
        // the form's current due date
        let occurrence_day = self
            .occurrence_date
            .unwrap_or_else(|| schedule.due_date.date_naive());

        let choice = self
            .prompt
            .choose_recurring_update(
                RECURRING_UPDATE_TITLE,
                RECURRING_UPDATE_MESSAGE,
                &RECURRING_UPDATE_OPTIONS,
            )
            .await;

        match choice {
            RecurringSaveChoice::Cancel => Ok(SaveOutcome::Cancelled),
            RecurringSaveChoice::AllOccurrences => self.update_task_in_place(task, &schedule).await,
            RecurringSaveChoice::ThisOccurrenceOnly => {
                let occurrence_at =
                    resolve_occurrence_date(task, Some(occurrence_day), now);
                self.fork_occurrence(task, &schedule, occurrence_day, occurrence_at)
                    .await
            }
        }
    }

    /// Forks one occurrence into a standalone task, then records the
    /// occurrence date as an exception on the recurring series. The second
    /// step is issued only once the first has succeeded; a failure of the
    /// second step leaves a standalone duplicate behind, which is logged but
    /// not surfaced as a distinct recoverable case.
    async fn fork_occurrence(
        &mut self,
        task: &Task,
        schedule: &EffectiveSchedule,
        occurrence_day: NaiveDate,
        occurrence_at: DateTime<Utc>,
    ) -> Result<SaveOutcome, DailyfloClientError> {
        let mut creation = self.build_creation(schedule, RoutineType::Once);
        creation.due_date = Some(occurrence_at);

        self.closing = true;
        let forked = match self.store.create_task(&creation).await {
            Ok(forked) => forked,
            Err(save_error) => {
                self.closing = false;
                return Err(save_error);
            }
        };
        self.cache.upsert(forked.clone());

        let mut metadata = task.metadata.clone();
        metadata.add_recurrence_exception(occurrence_day);
        let patch = TaskPatch {
            metadata: Some(metadata),
            ..Default::default()
        };
        match self.store.update_task(task.id, &patch).await {
            Ok(updated) => {
                self.task = Some(updated.clone());
                self.cache.upsert(updated);
            }
            Err(update_error) => {
                error!(
                    "Failed to record recurrence exception {occurrence_day} on task {}: \
                     a standalone duplicate now exists alongside the series: {update_error:?}",
                    task.id
                );
            }
        }

        Ok(SaveOutcome::Saved(forked))
    }

    async fn update_task_in_place(
        &mut self,
        task: &Task,
        schedule: &EffectiveSchedule,
    ) -> Result<SaveOutcome, DailyfloClientError> {
        let patch = self.full_patch(task, schedule);

        self.closing = true;
        match self.store.update_task(task.id, &patch).await {
            Ok(updated) => {
                self.task = Some(updated.clone());
                self.cache.upsert(updated.clone());
                Ok(SaveOutcome::Saved(updated))
            }
            Err(save_error) => {
                self.closing = false;
                Err(save_error)
            }
        }
    }

    fn build_creation(&self, schedule: &EffectiveSchedule, routine_type: RoutineType) -> TaskCreation {
        TaskCreation {
            title: self.fields.title.clone(),
            description: self.fields.description.clone(),
            due_date: Some(schedule.due_date),
            time: schedule.time,
            duration: schedule.duration,
            priority_level: self.fields.priority,
            color: self.fields.color,
            icon: self.fields.icon.clone(),
            routine_type,
            list: self.fields.list,
            sort_order: 0,
            metadata: self.fields.build_metadata(&schedule.alerts, None),
        }
    }

    fn full_patch(&self, task: &Task, schedule: &EffectiveSchedule) -> TaskPatch {
        TaskPatch {
            title: Some(self.fields.title.clone()),
            description: Some(self.fields.description.clone()),
            due_date: Some(Some(schedule.due_date)),
            time: Some(schedule.time),
            duration: Some(schedule.duration),
            priority_level: Some(self.fields.priority),
            color: Some(self.fields.color),
            icon: Some(self.fields.icon.clone()),
            routine_type: Some(self.fields.routine_type),
            list: Some(self.fields.list),
            metadata: Some(self.fields.build_metadata(&schedule.alerts, Some(&task.metadata))),
        }
    }
}
