use crate::{
    libraries::{
        check_area_form::{AreaCheck, FormState},
        food_desert::DISTANCE_THRESHOLD_METERS,
        geolocation::UNSUPPORTED_MARKER,
    },
    models::{Coordinate, FoodDesertResult},
};

const MAP_ZOOM: u32 = 14;
const MAP_WIDTH: u32 = 600;
const MAP_HEIGHT: u32 = 400;

/// Everything the pages need to draw the map
pub struct MapSettings<'a> {
    pub static_url: &'a str,
    pub public_token: &'a str,
}

impl MapSettings<'_> {
    /// Static street map centred on `coordinate` with a red marker
    pub fn image_url(&self, coordinate: &Coordinate) -> String {
        let position = coordinate.lon_lat();
        format!(
            "{}/pin-l+ff0000({})/{},{}/{}x{}?access_token={}",
            self.static_url.trim_end_matches('/'),
            position,
            position,
            MAP_ZOOM,
            MAP_WIDTH,
            MAP_HEIGHT,
            self.public_token
        )
    }
}

pub fn render_home() -> String {
    layout(
        "Oasis",
        r#"<h1>Welcome to Oasis</h1>
<p>Discover if you're in a food desert and find better food options in your area.</p>
<a class="button" href="/check-area">Get Started</a>"#,
    )
}

/// Check-area page for the current form state. `notice` is an inline message
/// that does not come from the state itself (e.g. a rejected submission).
pub fn render_check_area(check: &AreaCheck, notice: Option<&str>, map: &MapSettings) -> String {
    let mut body = String::from("<h1>Check Your Area</h1>\n");
    body.push_str(&render_form(check, notice));

    if let FormState::ShowingResult { coordinate, result } = check.state() {
        body.push_str(&format!(
            r#"<div class="map"><img alt="Map of the checked location" src="{}" width="{}" height="{}"></div>
"#,
            escape(&map.image_url(coordinate)),
            MAP_WIDTH,
            MAP_HEIGHT
        ));
        body.push_str(&render_result(result));
    }

    layout("Check Your Area", &body)
}

fn render_form(check: &AreaCheck, notice: Option<&str>) -> String {
    let using_location = check.is_using_location();
    let submitting = check.is_submit_disabled();

    let (latitude, longitude) = match check.last_fix() {
        Some(fix) if using_location => (fix.latitude.to_string(), fix.longitude.to_string()),
        _ => (String::new(), String::new()),
    };

    let mut messages: Vec<&str> = Vec::new();
    match check.state() {
        FormState::Idle {
            message: Some(message),
        }
        | FormState::Error { message } => messages.push(message),
        _ => {}
    }
    messages.extend(notice);

    let errors: String = messages
        .iter()
        .map(|message| format!(r#"<p class="error">{}</p>"#, escape(message)))
        .collect();

    let status = match check.state() {
        FormState::AwaitingGeolocation => "Waiting for your current location...",
        FormState::ReadyToSubmit { .. } => "Location acquired.",
        _ => "",
    };

    format!(
        r#"<form id="check-area" method="post" action="/check-area">
  <label for="address">Address</label>
  <input type="text" id="address" name="address" value="{address}"{address_disabled}>
  <label><input type="checkbox" id="use_location" name="use_location" value="on"{checked}> Use my current location</label>
  <input type="hidden" id="latitude" name="latitude" value="{latitude}">
  <input type="hidden" id="longitude" name="longitude" value="{longitude}">
  <input type="hidden" id="geolocation_error" name="geolocation_error" value="">
  <p id="geolocation_status">{status}</p>
  {errors}
  <button type="submit" id="submit"{submit_disabled}>{label}</button>
</form>
<script>{script}</script>
"#,
        address = escape(check.address()),
        address_disabled = if using_location { " disabled" } else { "" },
        checked = if using_location { " checked" } else { "" },
        latitude = latitude,
        longitude = longitude,
        status = status,
        errors = errors,
        submit_disabled = if submitting { " disabled" } else { "" },
        label = if submitting { "Loading..." } else { "Check Area" },
        script = geolocation_script(),
    )
}

fn render_result(result: &FoodDesertResult) -> String {
    let verdict = if result.is_food_desert {
        format!(
            "This area is a food desert: no food source within {:.0} meters (1 mile).",
            DISTANCE_THRESHOLD_METERS
        )
    } else {
        "This area is not a food desert.".to_string()
    };

    let sources: String = if result.food_sources.is_empty() {
        "<p>No food sources found nearby.</p>".to_string()
    } else {
        let items: String = result
            .food_sources
            .iter()
            .map(|source| {
                format!(
                    "<li><strong>{}</strong> {} <span class=\"distance\">{:.0} m</span></li>\n",
                    escape(&source.name),
                    escape(&source.place_name),
                    source.distance
                )
            })
            .collect();
        format!("<ol>\n{}</ol>", items)
    };

    format!(
        r#"<section class="result">
<h2>Area Information</h2>
<p class="verdict">{}</p>
<h3>Nearby food sources</h3>
{}
</section>
"#,
        verdict, sources
    )
}

/// One-shot browser position request. The answer travels back in the hidden
/// form fields.
fn geolocation_script() -> String {
    format!(
        r#"
(function () {{
  var form = document.getElementById('check-area');
  var toggle = document.getElementById('use_location');
  var address = document.getElementById('address');
  var lat = document.getElementById('latitude');
  var lon = document.getElementById('longitude');
  var err = document.getElementById('geolocation_error');
  var status = document.getElementById('geolocation_status');
  var submit = document.getElementById('submit');

  function locate() {{
    lat.value = ''; lon.value = ''; err.value = '';
    if (!('geolocation' in navigator)) {{
      err.value = '{unsupported}';
      status.textContent = 'Geolocation is not supported by your browser';
      return;
    }}
    status.textContent = 'Waiting for your current location...';
    navigator.geolocation.getCurrentPosition(function (position) {{
      lat.value = position.coords.latitude;
      lon.value = position.coords.longitude;
      status.textContent = 'Location acquired.';
    }}, function (error) {{
      err.value = error.message;
      status.textContent = 'Error: ' + error.message;
    }});
  }}

  toggle.addEventListener('change', function () {{
    address.disabled = toggle.checked;
    if (toggle.checked) {{ locate(); }} else {{ lat.value = ''; lon.value = ''; err.value = ''; status.textContent = ''; }}
  }});

  if (toggle.checked && !lat.value) {{ locate(); }}

  form.addEventListener('submit', function () {{
    submit.disabled = true;
    submit.textContent = 'Loading...';
  }});
}})();
"#,
        unsupported = UNSUPPORTED_MARKER
    )
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{}</title>
</head>
<body>
<main>
{}
</main>
</body>
</html>
"#,
        escape(title),
        body
    )
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
