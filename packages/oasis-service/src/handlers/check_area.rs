use axum::{extract::State, response::Html, Form};
use tracing::{debug, info, warn};

use crate::{
    app::AppState,
    libraries::{
        check_area_form::{AreaCheck, FormError, FormEvent, FormState, LocationSource},
        geolocation::{self, GeolocationError},
    },
    models::{CheckAreaForm, Coordinate, FoodDesertResult},
    services::{mapbox::MapboxError, page_renderer},
};

#[derive(Debug, thiserror::Error)]
pub enum CheckAreaError {
    #[error("Unable to geocode the provided address")]
    AddressNotFound,

    #[error("Geocoding request failed: {0}")]
    Geocoding(MapboxError),

    #[error("Unable to check food desert status: {0}")]
    Evaluation(MapboxError),
}

pub async fn home() -> Html<String> {
    Html(page_renderer::render_home())
}

pub async fn check_area_page(State(state): State<AppState>) -> Html<String> {
    render(&state, &AreaCheck::new(), None)
}

/// Run one submission of the check-area form through the form state machine:
/// position answer (if any), then geocoding, then evaluation. An event the
/// state machine rejects ends the run and is shown next to the form.
pub async fn submit_check_area(
    State(state): State<AppState>,
    Form(form): Form<CheckAreaForm>,
) -> Html<String> {
    let mut check = AreaCheck::new();

    let notice = match run_submission(&state, &form, &mut check).await {
        Ok(()) => None,
        Err(e) => {
            debug!("Form event rejected: {}", e);
            Some(e.to_string())
        }
    };

    render(&state, &check, notice.as_deref())
}

async fn run_submission(
    state: &AppState,
    form: &CheckAreaForm,
    check: &mut AreaCheck,
) -> Result<(), FormError> {
    check.set_address(form.address.as_str())?;

    if form.is_using_location() {
        check.handle(FormEvent::UseMyLocation(true))?;

        match geolocation::location_from_form(form) {
            Ok(coordinate) => check.handle(FormEvent::LocationAcquired(coordinate))?,
            Err(GeolocationError::Pending) => {}
            Err(e) => {
                debug!("Geolocation failed in browser: {}", e);
                return check.handle(FormEvent::LocationFailed(e.to_string()));
            }
        }
    }

    check.handle(FormEvent::Submit)?;

    let source = match check.state() {
        FormState::Submitting { source } => source.clone(),
        // Validation failures land in the error state straight away
        _ => return Ok(()),
    };

    let outcome = match resolve_and_evaluate(state, source).await {
        Ok((coordinate, result)) => FormEvent::Succeeded { coordinate, result },
        Err(e) => {
            warn!("Area check failed: {}", e);
            FormEvent::Failed(e.to_string())
        }
    };

    check.handle(outcome)
}

async fn resolve_and_evaluate(
    state: &AppState,
    source: LocationSource,
) -> Result<(Coordinate, FoodDesertResult), CheckAreaError> {
    let coordinate = match source {
        LocationSource::Coordinate(coordinate) => coordinate,
        LocationSource::Address(address) => state
            .geocoder
            .geocode(&address)
            .await
            .map_err(CheckAreaError::Geocoding)?
            .ok_or(CheckAreaError::AddressNotFound)?,
    };

    info!(
        "Checking area at ({}, {})",
        coordinate.latitude, coordinate.longitude
    );

    let result = state
        .evaluator
        .check(&coordinate)
        .await
        .map_err(CheckAreaError::Evaluation)?;

    Ok((coordinate, result))
}

fn render(state: &AppState, check: &AreaCheck, notice: Option<&str>) -> Html<String> {
    let map = page_renderer::MapSettings {
        static_url: &state.config.mapbox_static_url,
        public_token: &state.config.public_mapbox_token,
    };
    Html(page_renderer::render_check_area(check, notice, &map))
}
