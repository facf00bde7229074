//! Form elements - Immutable descriptors for buttons and modal fields
//!
//! Descriptors hold attributes only. Range checks (slider bounds, dropdown
//! indices) belong to the presenter that renders them.

use serde::{Deserialize, Serialize};

/// Button for choice and message forms
///
/// The icon is ignored by message forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Button {
    /// Create a button without an icon
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            icon: None,
        }
    }

    /// Create a button with an icon
    pub fn with_icon(text: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            icon: Some(icon.into()),
        }
    }
}

/// On/off switch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toggle {
    pub label: String,
    #[serde(default)]
    pub default_value: Option<bool>,
}

/// Numeric slider
///
/// `step` must be positive and the default must sit on a step within
/// `[min, max]`; the presenter enforces both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slider {
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    #[serde(default)]
    pub default_value: Option<f64>,
}

/// Single choice from a list of options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dropdown {
    pub label: String,
    pub options: Vec<String>,
    /// `None` leaves the choice to the presenter, unlike `Some(0)`
    #[serde(default)]
    pub default_index: Option<usize>,
}

/// Free text input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextField {
    pub label: String,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub default_value: Option<String>,
}

/// Decorative image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Icon {
    pub path: String,
}

/// Modal form field
///
/// Layouts tag each field with `"type"`. Tags this crate does not know
/// deserialize to [`Field::Unknown`] and are skipped when the form is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Field {
    Toggle(Toggle),
    Slider(Slider),
    Dropdown(Dropdown),
    TextField(TextField),
    Icon(Icon),
    #[serde(other)]
    Unknown,
}

impl Field {
    /// Toggle with an optional default state
    pub fn toggle(label: impl Into<String>, default_value: Option<bool>) -> Self {
        Self::Toggle(Toggle {
            label: label.into(),
            default_value,
        })
    }

    /// Slider over `[min, max]` in increments of `step`
    pub fn slider(
        label: impl Into<String>,
        min: f64,
        max: f64,
        step: f64,
        default_value: Option<f64>,
    ) -> Self {
        Self::Slider(Slider {
            label: label.into(),
            min,
            max,
            step,
            default_value,
        })
    }

    /// Dropdown over `options`
    pub fn dropdown<S: Into<String>>(
        label: impl Into<String>,
        options: impl IntoIterator<Item = S>,
        default_index: Option<usize>,
    ) -> Self {
        Self::Dropdown(Dropdown {
            label: label.into(),
            options: options.into_iter().map(Into::into).collect(),
            default_index,
        })
    }

    /// Text field with optional placeholder and default text
    pub fn text_field(
        label: impl Into<String>,
        placeholder: Option<&str>,
        default_value: Option<&str>,
    ) -> Self {
        Self::TextField(TextField {
            label: label.into(),
            placeholder: placeholder.map(str::to_string),
            default_value: default_value.map(str::to_string),
        })
    }

    /// Decorative icon
    pub fn icon(path: impl Into<String>) -> Self {
        Self::Icon(Icon { path: path.into() })
    }

    /// Whether the presenter returns a value for this field
    pub fn produces_value(&self) -> bool {
        !matches!(self, Self::Icon(_) | Self::Unknown)
    }
}
