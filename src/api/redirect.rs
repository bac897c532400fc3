// Rendering of navigation outcomes as HTTP redirects

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::service::{Flash, Navigation};

#[derive(Serialize)]
struct RedirectBody<'a> {
    location: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    flash: Option<&'a Flash>,
}

/// `302 Found` to `location`, echoing the location and flash in the body
pub fn redirect(location: &str, flash: Option<&Flash>) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, location.to_string())],
        Json(RedirectBody { location, flash }),
    )
        .into_response()
}

/// Redirect for a service outcome; `referrer` resolves "back" targets
pub fn navigate(navigation: &Navigation, referrer: Option<&str>) -> Response {
    let location = navigation.to.location(referrer);
    redirect(&location, navigation.flash.as_ref())
}
