/// A position the candidate can interview for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobRole {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

// Preset titles are sent to the question service with this suffix so the
// generated questions stay at entry level.
pub const PRESET_SUFFIX: &str = " Basic Fresher";

pub fn builtin_roles() -> &'static [JobRole] {
    &[
        JobRole {
            id: "ui-designer",
            title: "UI Designer",
            description: "Create beautiful, intuitive interfaces for web and mobile applications.",
        },
        JobRole {
            id: "frontend-dev",
            title: "Frontend Developer",
            description: "Build responsive and interactive user interfaces using modern web technologies.",
        },
        JobRole {
            id: "data-analyst",
            title: "Data Analyst",
            description: "Analyze data to provide insights and support business decisions.",
        },
        JobRole {
            id: "product-manager",
            title: "Product Manager",
            description: "Define product vision and coordinate development efforts.",
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleSelection {
    /// One of the built-in roles, by id.
    Preset(String),
    /// Free-form title typed by the candidate.
    Custom(String),
}

/// Resolves a selection to the job title sent to the question service.
/// Unknown preset ids and blank custom titles resolve to nothing; the
/// caller must not start an interview without a title.
pub fn resolve_job_title(selection: &RoleSelection) -> Option<String> {
    match selection {
        RoleSelection::Preset(id) => builtin_roles()
            .iter()
            .find(|role| role.id == id)
            .map(|role| format!("{}{}", role.title, PRESET_SUFFIX)),
        RoleSelection::Custom(title) => {
            let trimmed = title.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_resolves_with_suffix() {
        let title = resolve_job_title(&RoleSelection::Preset("frontend-dev".into()));
        assert_eq!(title.as_deref(), Some("Frontend Developer Basic Fresher"));
    }

    #[test]
    fn unknown_preset_resolves_to_none() {
        assert_eq!(resolve_job_title(&RoleSelection::Preset("backend-dev".into())), None);
    }

    #[test]
    fn custom_title_passes_through_trimmed() {
        let title = resolve_job_title(&RoleSelection::Custom("  Staff Engineer  ".into()));
        assert_eq!(title.as_deref(), Some("Staff Engineer"));
    }

    #[test]
    fn blank_custom_title_resolves_to_none() {
        assert_eq!(resolve_job_title(&RoleSelection::Custom("   ".into())), None);
    }
}
