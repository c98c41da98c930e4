//! Status banner driven by the session status variant.

use dioxus::prelude::*;
use roadlens_session::{SessionStatus, SubmitFailure};

/// Visual tone of the banner. Derived from the status variant, never
/// from message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Neutral,
    Success,
    Error,
}

/// Banner tone + message for a status, or `None` to hide the banner.
fn banner_for(status: &SessionStatus) -> Option<(Tone, String)> {
    match status {
        SessionStatus::Idle | SessionStatus::AwaitingSelection => None,
        SessionStatus::Processing => Some((Tone::Neutral, "Processing images...".into())),
        SessionStatus::Succeeded => {
            Some((Tone::Success, "All images processed successfully".into()))
        }
        SessionStatus::Failed(SubmitFailure::EmptySelection) => {
            Some((Tone::Error, "Please select at least one image".into()))
        }
        SessionStatus::Failed(reason) => {
            Some((Tone::Error, format!("Error processing images: {reason}")))
        }
    }
}

/// Props for the [`StatusBanner`] component.
#[derive(Props, Clone, PartialEq)]
pub struct StatusBannerProps {
    /// Current session status.
    status: SessionStatus,
}

/// Colored status strip under the upload controls. Hidden while the
/// session has nothing to report.
#[component]
pub fn StatusBanner(props: StatusBannerProps) -> Element {
    match banner_for(&props.status) {
        None => rsx! {},
        Some((tone, message)) => {
            let tone_class = match tone {
                Tone::Neutral => "banner banner-neutral",
                Tone::Success => "banner banner-success",
                Tone::Error => "banner banner-error",
            };
            rsx! {
                div { class: "{tone_class}", role: "status", "{message}" }
            }
        }
    }
}
