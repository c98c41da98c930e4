//! Edge-detection parameter panel.
//!
//! Number inputs for the Canny thresholds and Gaussian sigma, a select
//! for the kernel size. Threshold edits are cross-clamped so the lower
//! threshold never exceeds the upper one, the same discipline the
//! hysteresis thresholds get everywhere else.

use dioxus::prelude::*;
use roadlens_session::{EdgeParams, KernelSize, ParamUpdate};

/// Props for the [`ParameterPanel`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ParameterPanelProps {
    /// Current parameter record (read-only).
    params: EdgeParams,
    /// Fired with a validated update when any control changes.
    on_update: EventHandler<ParamUpdate>,
}

/// Parameter controls for the edge-detection endpoint. Every change
/// fires `on_update`; the owner applies it to the session and pushes
/// the new snapshot fire-and-forget.
#[component]
pub fn ParameterPanel(props: ParameterPanelProps) -> Element {
    let params = props.params;
    let on_update = props.on_update;

    rsx! {
        section { class: "param-panel",
            h2 { class: "section-title", "Edge Detection Parameters" }
            div { class: "param-grid",
                {render_number(
                    "lower_threshold",
                    "Lower Threshold",
                    f64::from(params.lower_threshold),
                    0.0,
                    255.0,
                    1.0,
                    move |v| {
                        // Keep lower <= upper.
                        let clamped = to_u8(v).min(params.upper_threshold);
                        on_update.call(ParamUpdate::LowerThreshold(clamped));
                    },
                )}
                {render_number(
                    "upper_threshold",
                    "Upper Threshold",
                    f64::from(params.upper_threshold),
                    0.0,
                    255.0,
                    1.0,
                    move |v| {
                        // Keep upper >= lower.
                        let clamped = to_u8(v).max(params.lower_threshold);
                        on_update.call(ParamUpdate::UpperThreshold(clamped));
                    },
                )}
                {render_kernel_select(params.gaussian_size, move |size| {
                    on_update.call(ParamUpdate::GaussianSize(size));
                })}
                {render_number(
                    "gaussian_sigma",
                    "Gaussian Sigma",
                    f64::from(params.gaussian_sigma),
                    0.0,
                    25.0,
                    0.1,
                    move |v| {
                        #[allow(clippy::cast_possible_truncation)]
                        on_update.call(ParamUpdate::GaussianSigma(v as f32));
                    },
                )}
            }
        }
    }
}

/// Clamp a control value onto the 0-255 threshold scale.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// Render a labeled number input.
fn render_number(
    id: &str,
    label: &str,
    value: f64,
    min: f64,
    max: f64,
    step: f64,
    on_input: impl Fn(f64) + 'static,
) -> Element {
    let id = id.to_string();
    let label = label.to_string();

    rsx! {
        div { class: "param-field",
            label { r#for: "{id}", class: "param-label", "{label}" }
            input {
                r#type: "number",
                id: "{id}",
                min: "{min}",
                max: "{max}",
                step: "{step}",
                value: "{value}",
                class: "param-input",
                oninput: move |e| {
                    match e.value().parse::<f64>() {
                        Ok(v) => on_input(v.clamp(min, max)),
                        Err(err) => {
                            web_sys::console::warn_1(
                                &format!("number parse failure: {err:?} from {:?}", e.value())
                                    .into(),
                            );
                        }
                    }
                },
            }
        }
    }
}

/// Render the kernel-size select.
fn render_kernel_select(selected: KernelSize, on_change: impl Fn(KernelSize) + 'static) -> Element {
    rsx! {
        div { class: "param-field",
            label { r#for: "gaussian_size", class: "param-label", "Gaussian Kernel Size" }
            select {
                id: "gaussian_size",
                class: "param-input",
                value: "{selected.pixels()}",
                onchange: move |e| {
                    let parsed = e
                        .value()
                        .parse::<u8>()
                        .ok()
                        .and_then(|v| KernelSize::try_from(v).ok());
                    match parsed {
                        Some(size) => on_change(size),
                        None => {
                            web_sys::console::warn_1(
                                &format!("unsupported kernel size: {:?}", e.value()).into(),
                            );
                        }
                    }
                },

                for size in KernelSize::ALL {
                    option {
                        value: "{size.pixels()}",
                        selected: size == selected,
                        "{size.pixels()}x{size.pixels()}"
                    }
                }
            }
        }
    }
}
