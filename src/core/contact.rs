use crate::core::form::FormSettings;
use crate::core::{payload, rules};
use crate::domain::model::{ContactRequest, FieldError};
use crate::domain::ports::NotificationDispatcher;
use crate::utils::error::{Result, SiteError, ValidationErrors};
use crate::utils::validation::Validate;
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactDraft {
    fn to_request(&self) -> Result<ContactRequest> {
        let mut errors = ValidationErrors::new();
        let name = errors.check(rules::full_name(&self.name));
        let email = errors.check(rules::email(&self.email));
        let subject = errors.check(rules::subject(&self.subject));
        let message = errors.check(rules::contact_message(&self.message));

        match (name, email, subject, message) {
            (Some(name), Some(email), Some(subject), Some(message)) => Ok(ContactRequest {
                name,
                email,
                subject,
                message,
            }),
            _ => Err(SiteError::Validation(errors)),
        }
    }
}

impl Validate for ContactDraft {
    fn validate(&self) -> Result<()> {
        self.to_request().map(|_| ())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactInput {
    Name(String),
    Email(String),
    Subject(String),
    Message(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactState {
    Editing {
        draft: ContactDraft,
    },
    Sent {
        request: ContactRequest,
        sent_at: Instant,
    },
}

/// Single-step contact form.
pub struct ContactForm {
    state: ContactState,
    settings: FormSettings,
}

impl ContactForm {
    pub fn new(settings: FormSettings) -> Self {
        Self {
            state: ContactState::Editing {
                draft: ContactDraft::default(),
            },
            settings,
        }
    }

    pub fn state(&self) -> &ContactState {
        &self.state
    }

    pub fn is_sent(&self) -> bool {
        matches!(self.state, ContactState::Sent { .. })
    }

    pub fn draft(&self) -> Option<&ContactDraft> {
        match &self.state {
            ContactState::Editing { draft } => Some(draft),
            ContactState::Sent { .. } => None,
        }
    }

    /// Stores one field and returns its inline error. A sent form whose reset
    /// delay has passed is cleared first.
    pub fn input(&mut self, input: ContactInput) -> Result<Option<FieldError>> {
        self.reset_if_due(Instant::now());
        let draft = match &mut self.state {
            ContactState::Editing { draft } => draft,
            ContactState::Sent { .. } => {
                return Err(SiteError::InvalidTransition {
                    step: "sent".to_string(),
                    action: "edit contact form".to_string(),
                })
            }
        };

        let feedback = match input {
            ContactInput::Name(value) => {
                draft.name = value;
                rules::full_name(&draft.name).err()
            }
            ContactInput::Email(value) => {
                draft.email = value;
                rules::email(&draft.email).err()
            }
            ContactInput::Subject(value) => {
                draft.subject = value;
                rules::subject(&draft.subject).err()
            }
            ContactInput::Message(value) => {
                draft.message = value;
                rules::contact_message(&draft.message).err()
            }
        };
        Ok(feedback)
    }

    pub async fn submit<D>(&mut self, dispatcher: &D) -> Result<ContactRequest>
    where
        D: NotificationDispatcher + ?Sized,
    {
        self.reset_if_due(Instant::now());
        let request = match &self.state {
            ContactState::Editing { draft } => draft.to_request()?,
            ContactState::Sent { .. } => {
                return Err(SiteError::InvalidTransition {
                    step: "sent".to_string(),
                    action: "submit".to_string(),
                })
            }
        };

        let payload = payload::contact_payload(&request, &self.settings.owner_email);
        tracing::info!("📨 Dispatching contact message: {}", request.subject);

        if let Err(e) = dispatcher.send(&payload).await {
            tracing::error!("❌ Contact dispatch failed: {}", e);
            return Err(match e {
                e @ SiteError::DispatchError { .. } => e,
                other => SiteError::dispatch(other.to_string()),
            });
        }

        self.state = ContactState::Sent {
            request: request.clone(),
            sent_at: Instant::now(),
        };
        Ok(request)
    }

    pub fn reset(&mut self) {
        self.state = ContactState::Editing {
            draft: ContactDraft::default(),
        };
    }

    pub fn reset_if_due(&mut self, now: Instant) -> bool {
        let due = matches!(
            &self.state,
            ContactState::Sent { sent_at, .. } if self.settings.reset_due(*sent_at, now)
        );
        if due {
            self.reset();
        }
        due
    }

    pub async fn wait_for_reset(&mut self) {
        let sent_at = match &self.state {
            ContactState::Sent { sent_at, .. } => *sent_at,
            ContactState::Editing { .. } => return,
        };
        self.settings.sleep_until_reset(sent_at).await;
        self.reset();
    }
}
