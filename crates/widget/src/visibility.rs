/// Whether the conversation window is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    Open,
    #[default]
    Closed,
}

impl Visibility {
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// Strict flip; rapid repeated toggles simply alternate.
    pub fn toggled(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }
}
