use crate::models::{Coordinate, FoodDesertResult};

/// Where a submission gets its coordinate from
#[derive(Debug, Clone, PartialEq)]
pub enum LocationSource {
    Address(String),
    Coordinate(Coordinate),
}

/// Presentation state of the check-area form
#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Idle {
        message: Option<String>,
    },
    AwaitingGeolocation,
    ReadyToSubmit {
        coordinate: Coordinate,
    },
    Submitting {
        source: LocationSource,
    },
    ShowingResult {
        coordinate: Coordinate,
        result: FoodDesertResult,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    UseMyLocation(bool),
    LocationAcquired(Coordinate),
    LocationFailed(String),
    Submit,
    Succeeded {
        coordinate: Coordinate,
        result: FoodDesertResult,
    },
    Failed(String),
}

/// Events that do not apply in the current state. The state is left as is.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("A check is already in progress")]
    AlreadySubmitting,

    #[error("Waiting for your current location")]
    AwaitingLocation,

    #[error("Not waiting for a location")]
    NotAwaitingLocation,

    #[error("No check is in progress")]
    NotSubmitting,
}

pub const ADDRESS_REQUIRED: &str = "Address is required";

/// The check-area form: typed address, the "use my location" toggle, the
/// last position fix and the current state.
#[derive(Debug, Clone)]
pub struct AreaCheck {
    address: String,
    use_location: bool,
    last_fix: Option<Coordinate>,
    state: FormState,
}

impl Default for AreaCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl AreaCheck {
    pub fn new() -> Self {
        Self {
            address: String::new(),
            use_location: false,
            last_fix: None,
            state: FormState::Idle { message: None },
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn is_using_location(&self) -> bool {
        self.use_location
    }

    pub fn last_fix(&self) -> Option<Coordinate> {
        self.last_fix
    }

    /// The submit control is disabled while a check runs
    pub fn is_submit_disabled(&self) -> bool {
        matches!(self.state, FormState::Submitting { .. })
    }

    /// The address can only be edited while the form is not submitting
    pub fn set_address(&mut self, address: impl Into<String>) -> Result<(), FormError> {
        if self.is_submit_disabled() {
            return Err(FormError::AlreadySubmitting);
        }
        self.address = address.into();
        Ok(())
    }

    pub fn handle(&mut self, event: FormEvent) -> Result<(), FormError> {
        let next = match (&self.state, event) {
            (FormState::Submitting { .. }, FormEvent::UseMyLocation(_) | FormEvent::Submit) => {
                return Err(FormError::AlreadySubmitting);
            }

            (_, FormEvent::UseMyLocation(true)) => {
                self.use_location = true;
                self.last_fix = None;
                FormState::AwaitingGeolocation
            }
            (_, FormEvent::UseMyLocation(false)) => {
                self.use_location = false;
                self.last_fix = None;
                FormState::Idle { message: None }
            }

            (FormState::AwaitingGeolocation, FormEvent::LocationAcquired(coordinate)) => {
                self.last_fix = Some(coordinate);
                FormState::ReadyToSubmit { coordinate }
            }
            (FormState::AwaitingGeolocation, FormEvent::LocationFailed(message)) => {
                self.use_location = false;
                FormState::Idle {
                    message: Some(message),
                }
            }
            (_, FormEvent::LocationAcquired(_) | FormEvent::LocationFailed(_)) => {
                return Err(FormError::NotAwaitingLocation);
            }

            (FormState::AwaitingGeolocation, FormEvent::Submit) => {
                return Err(FormError::AwaitingLocation);
            }
            (_, FormEvent::Submit) => self.submission()?,

            (FormState::Submitting { .. }, FormEvent::Succeeded { coordinate, result }) => {
                FormState::ShowingResult { coordinate, result }
            }
            (FormState::Submitting { .. }, FormEvent::Failed(message)) => {
                FormState::Error { message }
            }
            (_, FormEvent::Succeeded { .. } | FormEvent::Failed(_)) => {
                return Err(FormError::NotSubmitting);
            }
        };

        self.state = next;
        Ok(())
    }

    fn submission(&self) -> Result<FormState, FormError> {
        if self.use_location {
            return match self.last_fix {
                Some(coordinate) => Ok(FormState::Submitting {
                    source: LocationSource::Coordinate(coordinate),
                }),
                None => Err(FormError::AwaitingLocation),
            };
        }

        let address = self.address.trim();
        if address.is_empty() {
            return Ok(FormState::Error {
                message: ADDRESS_REQUIRED.to_string(),
            });
        }

        Ok(FormState::Submitting {
            source: LocationSource::Address(address.to_string()),
        })
    }
}
