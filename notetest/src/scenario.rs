use crate::report::allure::Label;

/// Static description of one API test case.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Scenario {
    /// Stable identifier, also used as the report history id.
    pub name: &'static str,
    /// Functional area, e.g. "Notes management".
    pub feature: &'static str,
    /// Operation within the feature, e.g. "Create note".
    pub story: &'static str,
    /// Human readable title shown in the report.
    pub title: &'static str,
    /// Status the call under test is expected to answer with.
    pub expected_status: u16,
}

impl Scenario {
    pub const fn new(
        name: &'static str,
        feature: &'static str,
        story: &'static str,
        title: &'static str,
        expected_status: u16,
    ) -> Self {
        Self {
            name,
            feature,
            story,
            title,
            expected_status,
        }
    }

    pub fn labels(&self) -> Vec<Label> {
        vec![
            Label::new("feature", self.feature),
            Label::new("story", self.story),
            Label::new("suite", self.feature),
        ]
    }
}
