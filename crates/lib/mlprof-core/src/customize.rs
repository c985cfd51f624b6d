use serde::Deserialize;

/// Options that change what is plotted and how. Read-only once constructed.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Customization {
    #[serde(default)]
    pub log_y: bool,
    #[serde(default)]
    pub bs_normalized: bool,
    #[serde(default)]
    pub filling: bool,
    #[serde(default)]
    pub top_right_label: String,
}

impl Customization {
    pub fn y_axis_title(&self) -> &'static str {
        if self.bs_normalized {
            "Runtime / batch size [ms]"
        } else {
            "Runtime [ms]"
        }
    }
}
