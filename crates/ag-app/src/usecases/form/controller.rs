use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use tracing::{debug, info, info_span, Instrument};

use ag_core::form::{FieldView, FormState};
use ag_core::validation::{
    validate_field, validate_form, AsyncValidatorRegistry, FormSchema, FormValues,
};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Owns the state of one form.
///
/// Blur validation is debounced per field: a new blur on the same field
/// replaces the pending one. Every pending or in-flight blur validation
/// carries a sequence number and only writes its result while that number
/// is still current, so a stale result never overwrites a newer value,
/// a submit, or a reset.
///
/// Dropping the controller aborts its pending validations.
pub struct FormController {
    shared: Arc<FormShared>,
}

struct FormShared {
    schema: Arc<FormSchema>,
    validators: AsyncValidatorRegistry,
    initial_values: FormValues,
    debounce: Duration,
    inner: Mutex<FormInner>,
}

struct FormInner {
    state: FormState,
    pending: HashMap<String, PendingValidation>,
    sequences: HashMap<String, u64>,
}

struct PendingValidation {
    seq: u64,
    handle: AbortHandle,
}

impl FormInner {
    /// Aborts the field's pending validation and invalidates any result
    /// still on its way. Returns the new current sequence number.
    fn cancel_pending(&mut self, field: &str) -> u64 {
        let seq = self.sequences.entry(field.to_string()).or_insert(0);
        *seq += 1;
        let seq = *seq;

        if let Some(pending) = self.pending.remove(field) {
            debug!(field, seq = pending.seq, "cancelling pending validation");
            pending.handle.abort();
            self.state.field_mut(field).is_validating = false;
        }
        seq
    }

    fn cancel_all(&mut self) {
        let fields: Vec<String> = self.pending.keys().cloned().collect();
        for field in fields {
            self.cancel_pending(&field);
        }
    }

    fn is_current(&self, field: &str, seq: u64) -> bool {
        self.sequences.get(field) == Some(&seq)
    }
}

impl FormController {
    /// Create a controller; schema fields missing from `initial_values`
    /// start empty.
    pub fn new(
        schema: Arc<FormSchema>,
        validators: AsyncValidatorRegistry,
        mut initial_values: FormValues,
        debounce: Duration,
    ) -> Self {
        for name in schema.field_names() {
            initial_values.entry(name.to_string()).or_default();
        }

        let state = FormState::new(&initial_values);
        Self {
            shared: Arc::new(FormShared {
                schema,
                validators,
                initial_values,
                debounce,
                inner: Mutex::new(FormInner {
                    state,
                    pending: HashMap::new(),
                    sequences: HashMap::new(),
                }),
            }),
        }
    }

    /// Keystroke: store the value and clear the field's error until the
    /// next blur or submit.
    pub async fn set_value(&self, field: &str, value: impl Into<String>) {
        let mut inner = self.shared.inner.lock().await;
        inner.cancel_pending(field);
        let state = inner.state.field_mut(field);
        state.value = value.into();
        state.error = None;
    }

    /// Programmatic value change; keeps the current error and any pending
    /// validation.
    pub async fn set_field_value(&self, field: &str, value: impl Into<String>) {
        let mut inner = self.shared.inner.lock().await;
        inner.state.field_mut(field).value = value.into();
    }

    /// Inject an error, e.g. one reported by the server.
    pub async fn set_field_error(&self, field: &str, error: Option<String>) {
        let mut inner = self.shared.inner.lock().await;
        inner.state.field_mut(field).error = error;
    }

    /// Field lost focus: mark it touched and (re)start its debounce timer.
    pub async fn blur(&self, field: &str) {
        let mut inner = self.shared.inner.lock().await;
        inner.state.field_mut(field).touched = true;
        let seq = inner.cancel_pending(field);
        let value = inner.state.field_mut(field).value.clone();

        let shared = Arc::clone(&self.shared);
        let field_name = field.to_string();
        let span = info_span!("usecase.form.blur_validation", field = %field_name, seq);
        let handle = tokio::spawn(
            async move { shared.run_blur_validation(field_name, value, seq).await }
                .instrument(span),
        );

        inner.pending.insert(
            field.to_string(),
            PendingValidation {
                seq,
                handle: handle.abort_handle(),
            },
        );
    }

    /// Validate the whole form. Marks every field touched, replaces all
    /// errors, and returns whether the form is valid.
    ///
    /// Fields edited while validation runs keep their current error, and the
    /// submit then reports the form as not valid.
    pub async fn submit(&self) -> bool {
        let span = info_span!("usecase.form.submit");
        async {
            let (values, snapshot) = {
                let mut inner = self.shared.inner.lock().await;
                inner.cancel_all();
                inner.state.set_submitting(true);
                inner.state.touch_all();
                (inner.state.values(), inner.sequences.clone())
            };

            let result =
                validate_form(&values, &self.shared.schema, &self.shared.validators).await;

            let mut inner = self.shared.inner.lock().await;
            let stale: Vec<String> = values
                .keys()
                .filter(|field| inner.sequences.get(*field) != snapshot.get(*field))
                .cloned()
                .collect();

            let mut errors = result.errors;
            for field in &stale {
                match inner.state.field(field).and_then(|state| state.error.clone()) {
                    Some(error) => errors.insert(field.clone(), error),
                    None => errors.remove(field),
                };
            }
            inner.state.replace_errors(&errors);
            inner.state.set_submitting(false);

            let is_valid = result.is_valid && stale.is_empty();
            if !stale.is_empty() {
                debug!(?stale, "fields changed during submit");
            }
            info!(is_valid, error_count = errors.len(), "form submitted");
            is_valid
        }
        .instrument(span)
        .await
    }

    /// Restore the initial values and forget errors, touched and
    /// validating flags.
    pub async fn reset(&self) {
        let mut inner = self.shared.inner.lock().await;
        for field in inner.state.values().into_keys() {
            inner.cancel_pending(&field);
        }
        inner.state = FormState::new(&self.shared.initial_values);
        debug!("form reset");
    }

    pub async fn field_view(&self, field: &str) -> FieldView {
        self.shared.inner.lock().await.state.view(field)
    }

    pub async fn values(&self) -> FormValues {
        self.shared.inner.lock().await.state.values()
    }

    pub async fn value(&self, field: &str) -> String {
        self.shared
            .inner
            .lock()
            .await
            .state
            .field(field)
            .map(|state| state.value.clone())
            .unwrap_or_default()
    }

    pub async fn is_submitting(&self) -> bool {
        self.shared.inner.lock().await.state.is_submitting()
    }

    pub fn schema(&self) -> &FormSchema {
        &self.shared.schema
    }
}

impl Drop for FormController {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.shared.inner.try_lock() {
            inner.cancel_all();
        }
    }
}

impl FormShared {
    async fn run_blur_validation(&self, field: String, value: String, seq: u64) {
        tokio::time::sleep(self.debounce).await;

        let values = {
            let mut inner = self.inner.lock().await;
            if !inner.is_current(&field, seq) {
                return;
            }
            inner.state.field_mut(&field).is_validating = true;
            inner.state.values()
        };

        let result =
            validate_field(&field, &value, &values, &self.schema, &self.validators).await;

        let mut inner = self.inner.lock().await;
        if !inner.is_current(&field, seq) {
            debug!("discarding stale validation result");
            return;
        }
        inner.pending.remove(&field);
        let state = inner.state.field_mut(&field);
        state.error = result.error;
        state.is_validating = false;
        debug!(is_valid = result.is_valid, "field validated");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;

    use async_trait::async_trait;
    use tokio::time::sleep;

    use ag_core::validation::{AsyncFieldValidator, AsyncVerdict, FieldRule};

    use super::*;

    /// Records every value it sees; rejects `taken@example.com`.
    struct RecordingValidator {
        seen: StdMutex<Vec<String>>,
        delay: Duration,
    }

    impl RecordingValidator {
        fn new(delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                seen: StdMutex::new(Vec::new()),
                delay,
            })
        }

        fn seen(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AsyncFieldValidator for RecordingValidator {
        async fn validate(&self, value: &str) -> anyhow::Result<AsyncVerdict> {
            self.seen.lock().unwrap().push(value.to_string());
            if !self.delay.is_zero() {
                sleep(self.delay).await;
            }
            if value == "taken@example.com" {
                Ok(AsyncVerdict::invalid("Email already registered"))
            } else {
                Ok(AsyncVerdict::valid())
            }
        }
    }

    fn schema() -> Arc<FormSchema> {
        Arc::new(
            FormSchema::new(vec![
                FieldRule::new("name").required("Name is required"),
                FieldRule::new("email")
                    .required("Email is required")
                    .email("Invalid email"),
            ])
            .unwrap(),
        )
    }

    fn controller(validator: Arc<RecordingValidator>) -> FormController {
        FormController::new(
            schema(),
            AsyncValidatorRegistry::new().register("email", validator),
            FormValues::new(),
            DEFAULT_DEBOUNCE,
        )
    }

    #[tokio::test]
    async fn new_fills_missing_schema_fields() {
        let form = controller(RecordingValidator::new(Duration::ZERO));
        let values = form.values().await;
        assert_eq!(values.get("name").map(String::as_str), Some(""));
        assert_eq!(values.get("email").map(String::as_str), Some(""));
    }

    #[tokio::test]
    async fn untouched_invalid_field_shows_no_error() {
        let form = controller(RecordingValidator::new(Duration::ZERO));
        form.set_value("email", "not-an-email").await;

        let view = form.field_view("email").await;
        assert_eq!(view.value, "not-an-email");
        assert_eq!(view.error, None);
        assert!(!view.touched);
        assert!(!view.is_valid);
    }

    #[tokio::test]
    async fn blur_validates_after_debounce() {
        tokio::time::pause();
        let validator = RecordingValidator::new(Duration::ZERO);
        let form = controller(validator.clone());

        form.set_value("email", "taken@example.com").await;
        form.blur("email").await;

        let view = form.field_view("email").await;
        assert!(view.touched);
        assert_eq!(view.error, None);
        assert!(validator.seen().is_empty());

        sleep(Duration::from_millis(600)).await;

        let view = form.field_view("email").await;
        assert_eq!(view.error.as_deref(), Some("Email already registered"));
        assert!(!view.is_validating);
        assert_eq!(validator.seen(), vec!["taken@example.com"]);
    }

    #[tokio::test]
    async fn repeated_blur_within_window_runs_once_with_latest_value() {
        tokio::time::pause();
        let validator = RecordingValidator::new(Duration::ZERO);
        let form = controller(validator.clone());

        form.set_value("email", "first@example.com").await;
        form.blur("email").await;
        sleep(Duration::from_millis(200)).await;
        form.set_field_value("email", "second@example.com").await;
        form.blur("email").await;

        sleep(Duration::from_millis(1_000)).await;

        assert_eq!(validator.seen(), vec!["second@example.com"]);
        assert!(form.field_view("email").await.is_valid);
    }

    #[tokio::test]
    async fn blur_on_different_fields_validates_each() {
        tokio::time::pause();
        let validator = RecordingValidator::new(Duration::ZERO);
        let form = controller(validator.clone());

        form.set_value("email", "ana@example.com").await;
        form.blur("email").await;
        form.blur("name").await;

        sleep(Duration::from_millis(600)).await;

        assert_eq!(
            form.field_view("name").await.error.as_deref(),
            Some("Name is required")
        );
        assert!(form.field_view("email").await.is_valid);
        assert_eq!(validator.seen().len(), 1);
    }

    #[tokio::test]
    async fn field_is_validating_while_async_check_runs() {
        tokio::time::pause();
        let validator = RecordingValidator::new(Duration::from_secs(2));
        let form = controller(validator.clone());

        form.set_value("email", "ana@example.com").await;
        form.blur("email").await;
        sleep(Duration::from_millis(600)).await;

        let view = form.field_view("email").await;
        assert!(view.is_validating);
        assert!(!view.is_valid);

        sleep(Duration::from_secs(3)).await;
        let view = form.field_view("email").await;
        assert!(!view.is_validating);
        assert!(view.is_valid);
    }

    #[tokio::test]
    async fn typing_discards_in_flight_validation() {
        tokio::time::pause();
        let validator = RecordingValidator::new(Duration::from_secs(2));
        let form = controller(validator.clone());

        form.set_value("email", "taken@example.com").await;
        form.blur("email").await;
        sleep(Duration::from_millis(600)).await;
        assert!(form.field_view("email").await.is_validating);

        form.set_value("email", "fresh@example.com").await;
        sleep(Duration::from_secs(5)).await;

        let view = form.field_view("email").await;
        assert_eq!(view.value, "fresh@example.com");
        assert_eq!(view.error, None);
        assert!(!view.is_validating);
    }

    #[tokio::test]
    async fn set_value_clears_error_optimistically() {
        let form = controller(RecordingValidator::new(Duration::ZERO));
        assert!(!form.submit().await);
        assert!(form.field_view("name").await.error.is_some());

        form.set_value("name", "A").await;
        assert_eq!(form.field_view("name").await.error, None);
    }

    #[tokio::test]
    async fn submit_touches_every_field_and_replaces_errors() {
        tokio::time::pause();
        let validator = RecordingValidator::new(Duration::ZERO);
        let form = controller(validator.clone());

        form.set_field_error("email", Some("server said no".into())).await;
        form.set_value("email", "nope").await;
        form.set_field_error("email", Some("stale".into())).await;

        assert!(!form.submit().await);
        assert!(!form.is_submitting().await);

        let name = form.field_view("name").await;
        assert!(name.touched);
        assert_eq!(name.error.as_deref(), Some("Name is required"));
        assert_eq!(
            form.field_view("email").await.error.as_deref(),
            Some("Invalid email")
        );

        form.set_value("name", "Ana").await;
        form.set_value("email", "ana@example.com").await;
        assert!(form.submit().await);
        assert_eq!(form.field_view("email").await.error, None);
        assert_eq!(validator.seen(), vec!["ana@example.com"]);
    }

    #[tokio::test]
    async fn submit_wins_over_pending_blur_validation() {
        tokio::time::pause();
        let validator = RecordingValidator::new(Duration::ZERO);
        let form = controller(validator.clone());

        form.set_value("name", "Ana").await;
        form.set_value("email", "taken@example.com").await;
        form.blur("email").await;
        form.set_field_value("email", "ana@example.com").await;

        assert!(form.submit().await);
        sleep(Duration::from_secs(1)).await;

        assert_eq!(form.field_view("email").await.error, None);
        assert_eq!(validator.seen(), vec!["ana@example.com"]);
    }

    #[tokio::test]
    async fn value_edited_during_submit_is_not_overwritten() {
        tokio::time::pause();
        let form = Arc::new(controller(RecordingValidator::new(Duration::from_secs(1))));
        form.set_value("name", "Ana").await;
        form.set_value("email", "taken@example.com").await;

        let submitting = tokio::spawn({
            let form = form.clone();
            async move { form.submit().await }
        });
        sleep(Duration::from_millis(500)).await;
        form.set_value("email", "fresh@example.com").await;

        assert!(!submitting.await.unwrap());
        let email = form.field_view("email").await;
        assert_eq!(email.value, "fresh@example.com");
        assert_eq!(email.error, None);
        assert!(email.touched);
        assert_eq!(form.field_view("name").await.error, None);
        assert!(!form.is_submitting().await);
    }

    #[tokio::test]
    async fn edit_during_submit_makes_result_invalid_even_if_old_value_passed() {
        tokio::time::pause();
        let form = Arc::new(controller(RecordingValidator::new(Duration::from_secs(1))));
        form.set_value("name", "Ana").await;
        form.set_value("email", "ana@example.com").await;

        let submitting = tokio::spawn({
            let form = form.clone();
            async move { form.submit().await }
        });
        sleep(Duration::from_millis(500)).await;
        form.set_value("email", "not-an-email").await;

        assert!(!submitting.await.unwrap());
        assert_eq!(form.field_view("email").await.error, None);
    }

    #[tokio::test]
    async fn reset_restores_initial_values() {
        tokio::time::pause();
        let mut initial = FormValues::new();
        initial.insert("name".into(), "Initial".into());
        let validator = RecordingValidator::new(Duration::ZERO);
        let form = FormController::new(
            schema(),
            AsyncValidatorRegistry::new().register("email", validator.clone()),
            initial,
            DEFAULT_DEBOUNCE,
        );

        form.set_value("name", "").await;
        form.set_value("email", "ana@example.com").await;
        form.blur("email").await;
        form.submit().await;
        form.blur("email").await;
        form.reset().await;
        sleep(Duration::from_secs(1)).await;

        let name = form.field_view("name").await;
        assert_eq!(name.value, "Initial");
        assert!(!name.touched);
        assert_eq!(name.error, None);
        let email = form.field_view("email").await;
        assert_eq!(email.value, "");
        assert!(!email.touched);
        assert!(!email.is_validating);
    }
}
