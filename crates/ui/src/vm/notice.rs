use crate::views::ViewError;

/// Modal message replacing a native message box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
    pub is_error: bool,
}

impl Notice {
    #[must_use]
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            is_error: false,
        }
    }

    #[must_use]
    pub fn error(title: impl Into<String>, err: &ViewError) -> Self {
        Self {
            title: title.into(),
            body: err.message().to_string(),
            is_error: true,
        }
    }
}
