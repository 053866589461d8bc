//! Three-step booking wizard: service, schedule, then contact details.
//!
//! Each step is a variant that owns the values already validated by earlier
//! guards, so a wizard on the details step always has a service and a slot.
//! Raw input for every field lives in [`BookingDraft`] and survives Back.

use crate::core::form::FormSettings;
use crate::core::{payload, rules, schedule};
use crate::domain::model::{BookingRequest, Field, FieldError, ServiceId, Slot};
use crate::domain::ports::{Clock, NotificationDispatcher, SystemClock};
use crate::utils::error::{Result, SiteError, ValidationErrors};
use chrono::{NaiveDate, NaiveTime};
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingDraft {
    pub service: Option<ServiceId>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Service(ServiceId),
    Date(NaiveDate),
    Time(NaiveTime),
    FullName(String),
    Email(String),
    Phone(String),
    Message(String),
}

impl FieldInput {
    pub fn field(&self) -> Field {
        match self {
            FieldInput::Service(_) => Field::Service,
            FieldInput::Date(_) => Field::Date,
            FieldInput::Time(_) => Field::Time,
            FieldInput::FullName(_) => Field::FullName,
            FieldInput::Email(_) => Field::Email,
            FieldInput::Phone(_) => Field::Phone,
            FieldInput::Message(_) => Field::Message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardStep {
    Service {
        draft: BookingDraft,
    },
    Schedule {
        service: ServiceId,
        draft: BookingDraft,
    },
    Details {
        service: ServiceId,
        slot: Slot,
        draft: BookingDraft,
    },
    Submitted {
        request: BookingRequest,
        submitted_at: Instant,
    },
}

impl WizardStep {
    fn initial() -> Self {
        WizardStep::Service {
            draft: BookingDraft::default(),
        }
    }

    /// 1-based step number; the submitted state reports 3.
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Service { .. } => 1,
            WizardStep::Schedule { .. } => 2,
            WizardStep::Details { .. } | WizardStep::Submitted { .. } => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WizardStep::Service { .. } => "service",
            WizardStep::Schedule { .. } => "schedule",
            WizardStep::Details { .. } => "details",
            WizardStep::Submitted { .. } => "submitted",
        }
    }

    fn accepts(&self, field: Field) -> bool {
        match self {
            WizardStep::Service { .. } => field == Field::Service,
            WizardStep::Schedule { .. } => matches!(field, Field::Date | Field::Time),
            WizardStep::Details { .. } => matches!(
                field,
                Field::FullName | Field::Email | Field::Phone | Field::Message
            ),
            WizardStep::Submitted { .. } => false,
        }
    }
}

fn service_guard(draft: &BookingDraft) -> Result<ServiceId> {
    rules::service(draft.service).map_err(single)
}

fn schedule_guard(draft: &BookingDraft, today: NaiveDate) -> Result<Slot> {
    let mut errors = ValidationErrors::new();
    let date = errors.check(rules::date(draft.date, today));
    let time = errors.check(rules::time(draft.time));
    match (date, time) {
        (Some(date), Some(time)) => Ok(Slot { date, time }),
        _ => Err(SiteError::Validation(errors)),
    }
}

fn details_guard(
    service: ServiceId,
    slot: Slot,
    draft: &BookingDraft,
    today: NaiveDate,
) -> Result<BookingRequest> {
    let mut errors = ValidationErrors::new();
    // the chosen day may have stopped being "after today" while the form sat open
    errors.check(rules::date(Some(slot.date), today));
    let full_name = errors.check(rules::full_name(&draft.full_name));
    let email = errors.check(rules::email(&draft.email));
    let phone = errors.check(rules::phone(&draft.phone));

    match (full_name, email, phone) {
        (Some(full_name), Some(email), Some(phone)) if errors.is_empty() => Ok(BookingRequest {
            service,
            slot,
            full_name,
            email,
            phone,
            message: rules::optional_message(&draft.message),
        }),
        _ => Err(SiteError::Validation(errors)),
    }
}

fn single(error: FieldError) -> SiteError {
    let mut errors = ValidationErrors::new();
    errors.push(error);
    SiteError::Validation(errors)
}

pub struct BookingWizard<C: Clock = SystemClock> {
    step: WizardStep,
    clock: C,
    settings: FormSettings,
}

impl BookingWizard<SystemClock> {
    pub fn new(settings: FormSettings) -> Self {
        Self::with_clock(settings, SystemClock)
    }
}

impl<C: Clock> BookingWizard<C> {
    pub fn with_clock(settings: FormSettings, clock: C) -> Self {
        Self {
            step: WizardStep::initial(),
            clock,
            settings,
        }
    }

    pub fn step(&self) -> &WizardStep {
        &self.step
    }

    pub fn step_number(&self) -> u8 {
        self.step.number()
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.step, WizardStep::Submitted { .. })
    }

    pub fn draft(&self) -> Option<&BookingDraft> {
        match &self.step {
            WizardStep::Service { draft }
            | WizardStep::Schedule { draft, .. }
            | WizardStep::Details { draft, .. } => Some(draft),
            WizardStep::Submitted { .. } => None,
        }
    }

    /// Hourly slots for `date`, or none when the date cannot be booked.
    pub fn available_slots(&self, date: NaiveDate) -> Vec<NaiveTime> {
        schedule::available_slots(date, self.clock.today())
    }

    /// Stores a field value on the current step and returns its inline error, if any.
    ///
    /// Every mutating call first clears a submitted wizard whose reset delay
    /// has run out, so callers never have to poll `reset_if_due` themselves.
    ///
    /// Times outside working hours are pulled onto the nearest boundary before
    /// they are stored.
    pub fn input(&mut self, input: FieldInput) -> Result<Option<FieldError>> {
        self.reset_if_due(Instant::now());
        let field = input.field();
        if !self.step.accepts(field) {
            return Err(SiteError::InvalidTransition {
                step: self.step.name().to_string(),
                action: format!("edit {}", field.label()),
            });
        }

        let today = self.clock.today();
        let draft = match &mut self.step {
            WizardStep::Service { draft }
            | WizardStep::Schedule { draft, .. }
            | WizardStep::Details { draft, .. } => draft,
            WizardStep::Submitted { .. } => {
                return Err(SiteError::InvalidTransition {
                    step: "submitted".to_string(),
                    action: format!("edit {}", field.label()),
                })
            }
        };

        let feedback = match input {
            FieldInput::Service(service) => {
                draft.service = Some(service);
                rules::service(draft.service).err()
            }
            FieldInput::Date(date) => {
                draft.date = Some(date);
                rules::date(draft.date, today).err()
            }
            FieldInput::Time(time) => {
                let clamped = schedule::clamp_to_working_hours(time);
                if clamped != time {
                    tracing::debug!("Clamped time {} to {}", time, clamped);
                }
                draft.time = Some(clamped);
                rules::time(draft.time).err()
            }
            FieldInput::FullName(value) => {
                draft.full_name = value;
                rules::full_name(&draft.full_name).err()
            }
            FieldInput::Email(value) => {
                draft.email = value;
                rules::email(&draft.email).err()
            }
            FieldInput::Phone(value) => {
                draft.phone = value;
                rules::phone(&draft.phone).err()
            }
            FieldInput::Message(value) => {
                draft.message = value;
                None
            }
        };

        Ok(feedback)
    }

    /// Moves forward one step when the current step's guard passes.
    pub fn next(&mut self) -> Result<u8> {
        self.reset_if_due(Instant::now());
        let today = self.clock.today();
        let next = match &self.step {
            WizardStep::Service { draft } => WizardStep::Schedule {
                service: service_guard(draft)?,
                draft: draft.clone(),
            },
            WizardStep::Schedule { service, draft } => WizardStep::Details {
                service: *service,
                slot: schedule_guard(draft, today)?,
                draft: draft.clone(),
            },
            other => {
                return Err(SiteError::InvalidTransition {
                    step: other.name().to_string(),
                    action: "next".to_string(),
                })
            }
        };

        tracing::debug!("Booking wizard: {} -> {}", self.step.name(), next.name());
        self.step = next;
        Ok(self.step.number())
    }

    /// Steps back without touching any entered value. No-op on the first step.
    pub fn back(&mut self) -> u8 {
        self.reset_if_due(Instant::now());
        let previous = match &self.step {
            WizardStep::Schedule { draft, .. } => Some(WizardStep::Service {
                draft: draft.clone(),
            }),
            WizardStep::Details { service, draft, .. } => Some(WizardStep::Schedule {
                service: *service,
                draft: draft.clone(),
            }),
            WizardStep::Service { .. } | WizardStep::Submitted { .. } => None,
        };

        if let Some(previous) = previous {
            tracing::debug!("Booking wizard: {} -> {}", self.step.name(), previous.name());
            self.step = previous;
        }
        self.step.number()
    }

    /// Validates the details step and hands the booking to `dispatcher` once.
    ///
    /// On dispatch failure the wizard stays on the details step with every
    /// value intact; nothing is retried.
    pub async fn submit<D>(&mut self, dispatcher: &D) -> Result<BookingRequest>
    where
        D: NotificationDispatcher + ?Sized,
    {
        self.reset_if_due(Instant::now());
        let today = self.clock.today();
        let request = match &self.step {
            WizardStep::Details {
                service,
                slot,
                draft,
            } => details_guard(*service, *slot, draft, today)?,
            other => {
                return Err(SiteError::InvalidTransition {
                    step: other.name().to_string(),
                    action: "submit".to_string(),
                })
            }
        };

        let payload = payload::booking_payload(&request, &self.settings.owner_email);
        tracing::info!(
            "📨 Dispatching booking request: {} on {} at {}",
            request.service,
            payload.get("date").unwrap_or_default(),
            payload.get("time").unwrap_or_default()
        );

        if let Err(e) = dispatcher.send(&payload).await {
            tracing::error!("❌ Booking dispatch failed: {}", e);
            return Err(match e {
                e @ SiteError::DispatchError { .. } => e,
                other => SiteError::dispatch(other.to_string()),
            });
        }

        tracing::info!("✅ Booking request submitted for {}", request.email);
        self.step = WizardStep::Submitted {
            request: request.clone(),
            submitted_at: Instant::now(),
        };
        Ok(request)
    }

    /// Clears everything back to the first step.
    pub fn reset(&mut self) {
        self.step = WizardStep::initial();
    }

    /// Resets a submitted wizard once the reset delay has passed. Returns whether it reset.
    pub fn reset_if_due(&mut self, now: Instant) -> bool {
        let due = matches!(
            &self.step,
            WizardStep::Submitted { submitted_at, .. } if self.settings.reset_due(*submitted_at, now)
        );
        if due {
            tracing::debug!("Booking wizard: submitted -> service");
            self.reset();
        }
        due
    }

    /// Waits out the reset delay of a submitted wizard, then resets it.
    pub async fn wait_for_reset(&mut self) {
        let submitted_at = match &self.step {
            WizardStep::Submitted { submitted_at, .. } => *submitted_at,
            _ => return,
        };
        self.settings.sleep_until_reset(submitted_at).await;
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::DispatchPayload;
    use crate::domain::ports::FixedClock;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    struct RecordingDispatcher {
        sent: Mutex<Vec<DispatchPayload>>,
        fail: bool,
    }

    impl RecordingDispatcher {
        fn new(fail: bool) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail,
            }
        }

        fn calls(&self) -> usize {
            self.sent.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl NotificationDispatcher for RecordingDispatcher {
        async fn send(&self, payload: &DispatchPayload) -> Result<()> {
            self.sent.lock().unwrap().push(payload.clone());
            if self.fail {
                Err(SiteError::dispatch("mail service unavailable"))
            } else {
                Ok(())
            }
        }
    }

    // Thursday
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn hour(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn wizard() -> BookingWizard<FixedClock> {
        BookingWizard::with_clock(FormSettings::new("owner@example.com"), FixedClock(today()))
    }

    fn wizard_on_details() -> BookingWizard<FixedClock> {
        let mut w = wizard();
        w.input(FieldInput::Service(ServiceId::VideoProduction)).unwrap();
        w.next().unwrap();
        w.input(FieldInput::Date(monday())).unwrap();
        w.input(FieldInput::Time(hour(10))).unwrap();
        w.next().unwrap();
        w
    }

    fn fill_details(w: &mut BookingWizard<FixedClock>, email: &str) {
        w.input(FieldInput::FullName("John Doe".to_string())).unwrap();
        w.input(FieldInput::Email(email.to_string())).unwrap();
        w.input(FieldInput::Phone("555-1234".to_string())).unwrap();
    }

    #[test]
    fn test_starts_on_service_step() {
        let w = wizard();
        assert_eq!(w.step_number(), 1);
        assert_eq!(w.draft(), Some(&BookingDraft::default()));
    }

    #[test]
    fn test_service_guard_blocks_without_service() {
        let mut w = wizard();
        match w.next() {
            Err(SiteError::Validation(errors)) => assert!(errors.contains(Field::Service)),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(w.step_number(), 1);
    }

    #[test]
    fn test_schedule_guard_requires_date_and_time() {
        let mut w = wizard();
        w.input(FieldInput::Service(ServiceId::Consultation)).unwrap();
        assert_eq!(w.next().unwrap(), 2);

        match w.next() {
            Err(SiteError::Validation(errors)) => {
                assert!(errors.contains(Field::Date));
                assert!(errors.contains(Field::Time));
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        w.input(FieldInput::Time(hour(11))).unwrap();
        assert!(w.next().is_err());
        assert_eq!(w.step_number(), 2);
    }

    #[test]
    fn test_weekend_date_rejected_on_input_and_guard() {
        let mut w = wizard();
        w.input(FieldInput::Service(ServiceId::Consultation)).unwrap();
        w.next().unwrap();

        let saturday = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let feedback = w.input(FieldInput::Date(saturday)).unwrap();
        assert_eq!(feedback.map(|e| e.field), Some(Field::Date));

        w.input(FieldInput::Time(hour(10))).unwrap();
        assert!(matches!(w.next(), Err(SiteError::Validation(_))));
    }

    #[test]
    fn test_time_input_is_clamped() {
        let mut w = wizard();
        w.input(FieldInput::Service(ServiceId::Consultation)).unwrap();
        w.next().unwrap();

        assert_eq!(w.input(FieldInput::Time(hour(7))).unwrap(), None);
        assert_eq!(w.draft().unwrap().time, Some(hour(9)));

        assert_eq!(w.input(FieldInput::Time(hour(20))).unwrap(), None);
        assert_eq!(w.draft().unwrap().time, Some(hour(17)));

        w.input(FieldInput::Time(hour(12))).unwrap();
        assert_eq!(w.draft().unwrap().time, Some(hour(12)));
    }

    #[test]
    fn test_input_for_other_step_is_rejected() {
        let mut w = wizard();
        let result = w.input(FieldInput::Email("john@example.com".to_string()));
        assert!(matches!(result, Err(SiteError::InvalidTransition { .. })));
    }

    #[test]
    fn test_back_preserves_values() {
        let mut w = wizard_on_details();
        w.input(FieldInput::FullName("John Doe".to_string())).unwrap();

        assert_eq!(w.back(), 2);
        let draft = w.draft().unwrap();
        assert_eq!(draft.date, Some(monday()));
        assert_eq!(draft.time, Some(hour(10)));
        assert_eq!(draft.full_name, "John Doe");

        assert_eq!(w.back(), 1);
        assert_eq!(w.draft().unwrap().service, Some(ServiceId::VideoProduction));
        assert_eq!(w.back(), 1);

        // walking forward again needs no re-entry
        w.next().unwrap();
        assert_eq!(w.next().unwrap(), 3);
        assert_eq!(w.draft().unwrap().full_name, "John Doe");
    }

    #[test]
    fn test_next_on_details_is_invalid() {
        let mut w = wizard_on_details();
        assert!(matches!(w.next(), Err(SiteError::InvalidTransition { .. })));
    }

    #[test]
    fn test_available_slots_follow_clock() {
        let w = wizard();
        assert_eq!(w.available_slots(monday()).len(), 9);
        assert!(w.available_slots(today()).is_empty());
    }

    #[tokio::test]
    async fn test_submit_dispatches_formatted_payload() {
        let mut w = wizard_on_details();
        fill_details(&mut w, "john@example.com");
        let dispatcher = RecordingDispatcher::new(false);

        let request = w.submit(&dispatcher).await.unwrap();

        assert_eq!(request.service, ServiceId::VideoProduction);
        assert_eq!(request.message, None);
        assert!(w.is_submitted());
        assert_eq!(dispatcher.calls(), 1);

        let sent = dispatcher.sent.lock().unwrap();
        assert_eq!(sent[0].get("date"), Some("October 19, 2026"));
        assert_eq!(sent[0].get("time"), Some("10:00 AM"));
        assert_eq!(sent[0].get("to_email"), Some("owner@example.com"));
    }

    #[tokio::test]
    async fn test_invalid_email_blocks_dispatch() {
        let mut w = wizard_on_details();
        fill_details(&mut w, "not-an-email");
        let dispatcher = RecordingDispatcher::new(false);

        match w.submit(&dispatcher).await {
            Err(SiteError::Validation(errors)) => {
                assert!(errors.contains(Field::Email));
                assert_eq!(errors.errors().len(), 1);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(dispatcher.calls(), 0);
        assert_eq!(w.step_number(), 3);
    }

    #[tokio::test]
    async fn test_dispatch_failure_keeps_details() {
        let mut w = wizard_on_details();
        fill_details(&mut w, "john@example.com");
        let dispatcher = RecordingDispatcher::new(true);

        let result = w.submit(&dispatcher).await;

        assert!(matches!(result, Err(SiteError::DispatchError { .. })));
        assert!(matches!(w.step(), WizardStep::Details { .. }));
        let draft = w.draft().unwrap();
        assert_eq!(draft.full_name, "John Doe");
        assert_eq!(draft.email, "john@example.com");
        assert_eq!(draft.phone, "555-1234");
        assert_eq!(dispatcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_submit_outside_details_step() {
        let mut w = wizard();
        let dispatcher = RecordingDispatcher::new(false);
        assert!(matches!(
            w.submit(&dispatcher).await,
            Err(SiteError::InvalidTransition { .. })
        ));
        assert_eq!(dispatcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_reset_after_delay() {
        let mut w = wizard_on_details();
        fill_details(&mut w, "john@example.com");
        w.submit(&RecordingDispatcher::new(false)).await.unwrap();

        let submitted_at = match w.step() {
            WizardStep::Submitted { submitted_at, .. } => *submitted_at,
            other => panic!("expected submitted, got {:?}", other),
        };

        assert!(!w.reset_if_due(submitted_at + Duration::from_secs(1)));
        assert!(w.is_submitted());
        assert!(w.reset_if_due(submitted_at + Duration::from_secs(5)));

        assert_eq!(w.step_number(), 1);
        assert_eq!(w.draft(), Some(&BookingDraft::default()));
    }

    #[tokio::test]
    async fn test_wait_for_reset_clears_fields() {
        let settings =
            FormSettings::new("owner@example.com").with_reset_delay(Duration::from_millis(20));
        let mut w = BookingWizard::with_clock(settings, FixedClock(today()));
        w.input(FieldInput::Service(ServiceId::ContentCreation)).unwrap();
        w.next().unwrap();
        w.input(FieldInput::Date(monday())).unwrap();
        w.input(FieldInput::Time(hour(15))).unwrap();
        w.next().unwrap();
        fill_details(&mut w, "john@example.com");
        w.submit(&RecordingDispatcher::new(false)).await.unwrap();

        w.wait_for_reset().await;

        assert!(!w.is_submitted());
        assert_eq!(w.draft(), Some(&BookingDraft::default()));
    }

    #[tokio::test]
    async fn test_expired_submission_resets_on_next_input() {
        let settings =
            FormSettings::new("owner@example.com").with_reset_delay(Duration::from_millis(10));
        let mut w = BookingWizard::with_clock(settings, FixedClock(today()));
        w.input(FieldInput::Service(ServiceId::Collaboration)).unwrap();
        w.next().unwrap();
        w.input(FieldInput::Date(monday())).unwrap();
        w.input(FieldInput::Time(hour(10))).unwrap();
        w.next().unwrap();
        fill_details(&mut w, "john@example.com");
        w.submit(&RecordingDispatcher::new(false)).await.unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;

        let feedback = w.input(FieldInput::Service(ServiceId::Consultation)).unwrap();
        assert_eq!(feedback, None);
        assert_eq!(w.step_number(), 1);
        assert_eq!(w.draft().unwrap().service, Some(ServiceId::Consultation));
        assert_eq!(w.draft().unwrap().full_name, "");
    }

    #[tokio::test]
    async fn test_pending_submission_still_blocks_edits() {
        let mut w = wizard_on_details();
        fill_details(&mut w, "john@example.com");
        w.submit(&RecordingDispatcher::new(false)).await.unwrap();

        // default delay is seconds away
        let result = w.input(FieldInput::Service(ServiceId::Consultation));
        assert!(matches!(result, Err(SiteError::InvalidTransition { .. })));
        assert!(w.is_submitted());
        assert_eq!(w.back(), 3);
    }
}
