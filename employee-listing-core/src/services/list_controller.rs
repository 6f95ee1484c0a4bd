//! Employee list state and dialog workflow controller

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult};
use crate::services::{ControllerConfig, PersistenceMode};
use crate::traits::EmployeeStore;
use crate::types::{
    Column, Department, Employee, EmployeeFields, EmployeeId, ListView, SortDirection, Workflow,
};
use crate::utils::coerce::parse_experience;

/// Employee list controller
///
/// Owns the loaded records, the displayed (searched/sorted) view and the
/// dialog workflow of one mounted panel. All mutating operations take
/// `&mut self`, so transitions never interleave; store calls are the only
/// suspension points.
pub struct EmployeeListController {
    store: Arc<dyn EmployeeStore>,
    config: ControllerConfig,
    all_records: Vec<Employee>,
    visible_records: Vec<Employee>,
    search_text: String,
    sort: Option<SortDirection>,
    workflow: Workflow,
    last_error: Option<String>,
}

impl EmployeeListController {
    /// Create a controller with default settings
    #[must_use]
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self::with_config(store, ControllerConfig::default())
    }

    #[must_use]
    pub fn with_config(store: Arc<dyn EmployeeStore>, config: ControllerConfig) -> Self {
        Self {
            store,
            config,
            all_records: Vec::new(),
            visible_records: Vec::new(),
            search_text: String::new(),
            sort: None,
            workflow: Workflow::Idle,
            last_error: None,
        }
    }

    // ===== Read access =====

    pub fn all_records(&self) -> &[Employee] {
        &self.all_records
    }

    pub fn visible_records(&self) -> &[Employee] {
        &self.visible_records
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn sort(&self) -> Option<SortDirection> {
        self.sort
    }

    pub fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    /// Message of the last remote failure, for user-visible display
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Snapshot for one render of the presentation layer
    pub fn view(&self) -> ListView<'_> {
        ListView {
            visible_records: &self.visible_records,
            search_text: &self.search_text,
            sort: self.sort,
            workflow: &self.workflow,
            department_options: Department::ALL,
            last_error: self.last_error.as_deref(),
            date_display: &self.config.date_display,
        }
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    // ===== Load =====

    /// Fetch every record from the store (mount time).
    ///
    /// On failure both lists are left empty and the error is kept in
    /// `last_error` so the panel renders with no rows.
    pub async fn load(&mut self) -> CoreResult<usize> {
        if !self.workflow.is_idle() {
            return Err(self.invalid("load"));
        }

        let result = with_timeout(self.config.request_timeout, self.store.list_all()).await;

        self.search_text.clear();
        self.sort = None;
        match result {
            Ok(items) => {
                let records: Vec<Employee> = items.into_iter().map(Employee::from).collect();
                let count = records.len();
                self.visible_records.clone_from(&records);
                self.all_records = records;
                self.last_error = None;
                log::info!("Loaded {count} employees");
                Ok(count)
            }
            Err(e) => {
                self.all_records.clear();
                self.visible_records.clear();
                Err(self.report("load", &e, CoreError::LoadFailure))
            }
        }
    }

    // ===== Search & sort =====

    /// Update the search box text; the view changes only on `apply_search`.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Recompute the view as the records whose name contains the search text
    /// (case-insensitive), in load order. Resets the name sort.
    pub fn apply_search(&mut self) -> usize {
        let needle = self.search_text.to_lowercase();
        self.visible_records = self
            .all_records
            .iter()
            .filter(|e| e.name_matches(&needle))
            .cloned()
            .collect();
        self.sort = None;
        log::debug!(
            "Search matched {} of {} employees",
            self.visible_records.len(),
            self.all_records.len()
        );
        self.visible_records.len()
    }

    /// Flip the name sort and reorder the view.
    pub fn toggle_name_sort(&mut self) -> SortDirection {
        let direction = SortDirection::toggled(self.sort);
        sort_by_name(&mut self.visible_records, direction);
        self.sort = Some(direction);
        direction
    }

    /// Column header click. Only the name column sorts; returns whether the
    /// view was reordered.
    pub fn sort_by_column(&mut self, column: Column) -> bool {
        if !column.is_sortable() {
            log::debug!("Column `{}` is not sortable", column.key());
            return false;
        }
        self.toggle_name_sort();
        true
    }

    // ===== Edit workflow =====

    /// Open the edit dialog over a copy of the record.
    pub fn begin_edit(&mut self, id: EmployeeId) -> CoreResult<()> {
        if !self.workflow.is_idle() {
            return Err(self.invalid("begin_edit"));
        }
        let record = self
            .all_records
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(CoreError::RecordNotFound(id))?;
        self.workflow = Workflow::Editing { record };
        Ok(())
    }

    pub fn set_edit_name(&mut self, name: impl Into<String>) -> CoreResult<()> {
        let name = name.into();
        self.edit_field("set_edit_name", |r| r.name = name)
    }

    pub fn set_edit_dob(&mut self, date: Option<NaiveDate>) -> CoreResult<()> {
        self.edit_field("set_edit_dob", |r| r.date_of_birth = date)
    }

    pub fn set_edit_department(&mut self, department: Department) -> CoreResult<()> {
        self.edit_field("set_edit_department", |r| {
            r.department = Some(department);
        })
    }

    /// Experience text input; unparsable input becomes 0.
    pub fn set_edit_experience(&mut self, input: &str) -> CoreResult<()> {
        let years = parse_experience(input);
        self.edit_field("set_edit_experience", |r| r.experience_years = years)
    }

    /// Save clicked: ask for confirmation. Nothing is persisted yet.
    pub fn request_save_edit(&mut self) -> CoreResult<()> {
        self.transition("request_save_edit", |w| match w {
            Workflow::Editing { record } => Ok(Workflow::ConfirmingEdit {
                record,
                pending: false,
            }),
            other => Err(other),
        })
    }

    /// Confirmed: replace the record with matching id in both lists, in place.
    ///
    /// In remote persistence mode the store update runs first; on failure, or
    /// if the future is dropped before the store answers, the confirmation
    /// stays open and local state is untouched.
    pub async fn confirm_save_edit(&mut self) -> CoreResult<Employee> {
        let record = match &self.workflow {
            Workflow::ConfirmingEdit {
                record,
                pending: false,
            } => record.clone(),
            _ => return Err(self.invalid("confirm_save_edit")),
        };

        if self.config.persistence == PersistenceMode::Remote {
            let fields = record.fields();
            let in_flight = PendingGuard::arm(&mut self.workflow);
            let result =
                with_timeout(self.config.request_timeout, self.store.update(record.id, &fields))
                    .await;
            in_flight.finish();
            if let Err(e) = result {
                return Err(self.report("update", &e, CoreError::UpdateFailure));
            }
        }

        if !replace_by_id(&mut self.all_records, &record) {
            log::warn!("Edited employee {} is no longer loaded", record.id);
        }
        replace_by_id(&mut self.visible_records, &record);
        self.workflow = Workflow::Idle;
        log::info!("Saved employee {}", record.id);
        Ok(record)
    }

    /// Close the edit dialog or its confirmation without saving.
    pub fn cancel_save_edit(&mut self) -> CoreResult<()> {
        self.transition("cancel_save_edit", |w| match w {
            Workflow::Editing { .. } | Workflow::ConfirmingEdit { pending: false, .. } => {
                Ok(Workflow::Idle)
            }
            other => Err(other),
        })
    }

    // ===== Delete =====

    /// Remove the record with `id` from both lists, without confirmation.
    ///
    /// Returns `false` when no record has that id. In remote persistence mode
    /// the store delete runs first and a failure leaves the lists untouched.
    pub async fn delete_record(&mut self, id: EmployeeId) -> CoreResult<bool> {
        if !self.workflow.is_idle() {
            return Err(self.invalid("delete_record"));
        }
        let Some(position) = self.all_records.iter().position(|e| e.id == id) else {
            log::debug!("Delete ignored, employee {id} not loaded");
            return Ok(false);
        };

        if self.config.persistence == PersistenceMode::Remote {
            let result = with_timeout(self.config.request_timeout, self.store.delete(id)).await;
            if let Err(e) = result {
                return Err(self.report("delete", &e, CoreError::DeleteFailure));
            }
        }

        self.all_records.remove(position);
        if let Some(visible) = self.visible_records.iter().position(|e| e.id == id) {
            self.visible_records.remove(visible);
        }
        log::info!("Deleted employee {id}");
        Ok(true)
    }

    // ===== Add workflow =====

    /// Open the add dialog over a fresh draft.
    pub fn begin_add(&mut self) -> CoreResult<()> {
        self.transition("begin_add", |w| match w {
            Workflow::Idle => Ok(Workflow::Adding {
                draft: Employee::draft(),
            }),
            other => Err(other),
        })
    }

    pub fn set_draft_name(&mut self, name: impl Into<String>) -> CoreResult<()> {
        let name = name.into();
        self.draft_field("set_draft_name", |d| d.name = name)
    }

    pub fn set_draft_dob(&mut self, date: Option<NaiveDate>) -> CoreResult<()> {
        self.draft_field("set_draft_dob", |d| d.date_of_birth = date)
    }

    pub fn set_draft_department(&mut self, department: Department) -> CoreResult<()> {
        self.draft_field("set_draft_department", |d| {
            d.department = Some(department);
        })
    }

    /// Experience text input; unparsable input becomes 0.
    pub fn set_draft_experience(&mut self, input: &str) -> CoreResult<()> {
        let years = parse_experience(input);
        self.draft_field("set_draft_experience", |d| d.experience_years = years)
    }

    /// Add clicked: ask for confirmation.
    pub fn request_save_add(&mut self) -> CoreResult<()> {
        self.transition("request_save_add", |w| match w {
            Workflow::Adding { draft } => Ok(Workflow::ConfirmingAdd {
                draft,
                pending: false,
            }),
            other => Err(other),
        })
    }

    /// Confirmed: create the record in the store, then append it locally
    /// with the assigned id.
    ///
    /// On failure the confirmation stays open, nothing is appended, and the
    /// error is kept in `last_error`. Dropping the future before the store
    /// answers also leaves the confirmation open, not in flight.
    pub async fn confirm_save_add(&mut self) -> CoreResult<Employee> {
        let fields = self.begin_confirm_add()?;
        let in_flight = PendingGuard::watch(&mut self.workflow);
        let result = with_timeout(self.config.request_timeout, self.store.create(&fields)).await;
        in_flight.disarm();
        self.complete_confirm_add(result)
    }

    /// First half of `confirm_save_add` for hosts that run the store call
    /// themselves: marks the confirmation in flight and returns the fields to
    /// send. Until `complete_confirm_add` runs, every workflow action is
    /// rejected.
    pub fn begin_confirm_add(&mut self) -> CoreResult<EmployeeFields> {
        if let Workflow::ConfirmingAdd { draft, pending } = &mut self.workflow {
            if !*pending {
                *pending = true;
                return Ok(draft.fields());
            }
        }
        Err(self.invalid("confirm_save_add"))
    }

    /// Second half of `confirm_save_add`: apply the store's answer.
    pub fn complete_confirm_add(
        &mut self,
        result: CoreResult<EmployeeId>,
    ) -> CoreResult<Employee> {
        let Workflow::ConfirmingAdd {
            draft,
            pending: true,
        } = &self.workflow
        else {
            return Err(self.invalid("complete_confirm_add"));
        };
        let fields = draft.fields();

        let id = match result {
            Ok(id) if !id.is_assigned() => Err(CoreError::StorageError(
                "store did not assign an id".to_string(),
            )),
            Ok(id) if self.all_records.iter().any(|e| e.id == id) => Err(
                CoreError::StorageError(format!("store assigned duplicate id {id}")),
            ),
            other => other,
        };

        match id {
            Ok(id) => {
                self.workflow = Workflow::Idle;
                let record = Employee::from_fields(id, fields);
                self.all_records.push(record.clone());
                self.visible_records.push(record.clone());
                // Appended at the end, so the view is no longer name-ordered.
                self.sort = None;
                log::info!("Created employee {id}");
                Ok(record)
            }
            Err(e) => {
                self.set_pending(false);
                Err(self.report("create", &e, CoreError::CreateFailure))
            }
        }
    }

    /// Close the add dialog or its confirmation, discarding the draft.
    pub fn cancel_add(&mut self) -> CoreResult<()> {
        self.transition("cancel_add", |w| match w {
            Workflow::Adding { .. } | Workflow::ConfirmingAdd { pending: false, .. } => {
                Ok(Workflow::Idle)
            }
            other => Err(other),
        })
    }

    // ===== Internal helpers =====

    /// Apply a workflow step; a rejected step puts the workflow back unchanged.
    fn transition(
        &mut self,
        action: &'static str,
        step: impl FnOnce(Workflow) -> Result<Workflow, Workflow>,
    ) -> CoreResult<()> {
        let from = self.workflow.kind();
        match step(std::mem::take(&mut self.workflow)) {
            Ok(next) => {
                log::debug!("{action}: {from} -> {}", next.kind());
                self.workflow = next;
                Ok(())
            }
            Err(unchanged) => {
                self.workflow = unchanged;
                Err(self.invalid(action))
            }
        }
    }

    fn edit_field(
        &mut self,
        action: &'static str,
        apply: impl FnOnce(&mut Employee),
    ) -> CoreResult<()> {
        if let Workflow::Editing { record } = &mut self.workflow {
            apply(record);
            return Ok(());
        }
        Err(self.invalid(action))
    }

    fn draft_field(
        &mut self,
        action: &'static str,
        apply: impl FnOnce(&mut Employee),
    ) -> CoreResult<()> {
        if let Workflow::Adding { draft } = &mut self.workflow {
            apply(draft);
            return Ok(());
        }
        Err(self.invalid(action))
    }

    fn set_pending(&mut self, value: bool) {
        self.workflow.set_pending(value);
    }

    fn invalid(&self, action: &'static str) -> CoreError {
        let state = self.workflow.kind();
        log::error!("Rejected `{action}` while {state}");
        CoreError::InvalidTransition { action, state }
    }

    /// Log a store failure, keep it for display and wrap it as the
    /// operation's failure.
    fn report(
        &mut self,
        operation: &str,
        err: &CoreError,
        wrap: fn(String) -> CoreError,
    ) -> CoreError {
        if err.is_expected() {
            log::warn!("Employee {operation} failed: {err}");
        } else {
            log::error!("Employee {operation} failed: {err}");
        }
        let wrapped = wrap(err.to_string());
        self.last_error = Some(wrapped.to_string());
        wrapped
    }
}

/// Clears a confirmation's in-flight flag when the awaiting future goes away.
///
/// A host that drops a confirm future (task torn down, losing `select!` arm)
/// gets the confirmation back instead of a workflow stuck in flight.
struct PendingGuard<'a> {
    workflow: &'a mut Workflow,
    armed: bool,
}

impl<'a> PendingGuard<'a> {
    /// Mark the confirmation in flight until the guard drops.
    fn arm(workflow: &'a mut Workflow) -> Self {
        workflow.set_pending(true);
        Self::watch(workflow)
    }

    /// Guard a flag that is already set.
    fn watch(workflow: &'a mut Workflow) -> Self {
        Self {
            workflow,
            armed: true,
        }
    }

    /// The store answered: clear the flag.
    fn finish(mut self) {
        self.workflow.set_pending(false);
        self.armed = false;
    }

    /// The store answered: keep the flag for the caller to resolve.
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.armed && self.workflow.is_pending() {
            log::debug!("Store call abandoned while {}", self.workflow.kind());
            self.workflow.set_pending(false);
        }
    }
}

/// Bound a store call by the configured timeout.
async fn with_timeout<T>(
    limit: Duration,
    call: impl Future<Output = CoreResult<T>>,
) -> CoreResult<T> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(CoreError::Timeout(
            u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        )),
    }
}

/// Stable sort by case-insensitive name; equal names keep their order in
/// both directions.
fn sort_by_name(records: &mut [Employee], direction: SortDirection) {
    match direction {
        SortDirection::Ascending => records.sort_by_cached_key(|e| e.name.to_lowercase()),
        SortDirection::Descending => {
            records.sort_by_cached_key(|e| std::cmp::Reverse(e.name.to_lowercase()));
        }
    }
}

fn replace_by_id(records: &mut [Employee], updated: &Employee) -> bool {
    match records.iter_mut().find(|e| e.id == updated.id) {
        Some(slot) => {
            slot.clone_from(updated);
            true
        }
        None => false,
    }
}
