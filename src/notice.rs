//! Modal notifications shown to the user after an action.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Success,
    Error,
    Info,
}

/// A dialog with a fixed title, message and a single confirm button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub icon: Icon,
    pub title: String,
    pub text: String,
    pub confirm: &'static str,
}

impl Notice {
    const OK: &'static str = "OK";

    pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Icon::Success, title, text, Self::OK)
    }

    pub fn error(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Icon::Error, title, text, Self::OK)
    }

    pub fn info(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Icon::Info, title, text, "Close")
    }

    fn new(
        icon: Icon,
        title: impl Into<String>,
        text: impl Into<String>,
        confirm: &'static str,
    ) -> Self {
        Self {
            icon,
            title: title.into(),
            text: text.into(),
            confirm,
        }
    }

    pub fn payment_confirmed() -> Self {
        Self::success(
            "Payment Confirmed!",
            "Your payment has been successfully processed and a confirmation email has been sent.",
        )
    }

    pub fn is_error(&self) -> bool {
        self.icon == Icon::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.text)
    }
}
