//! Demo tasks used when the caller supplies none

pub const SAMPLE_TASKS: &[&str] = &[
    "need to call client about the website redesign project they mentioned last week also check if they want mobile app too",
    "fix the login bug that users are reporting on the dashboard page asap before end of week",
    "review sarah's code for the payment integration feature and provide feedback by tomorrow",
    "schedule team meeting to discuss Q4 roadmap and budget planning stuff",
    "update documentation for the new API endpoints we released last month",
    "research competitor pricing models for our new subscription service launch",
    "follow up with legal team about data privacy compliance requirements for EU users",
    "optimize database queries causing slow loading times on reports page",
    "create wireframes for the new onboarding flow design mockups",
    "prepare presentation slides for stakeholder meeting next tuesday about project status",
];

/// Owned copy of [`SAMPLE_TASKS`]
pub fn sample_tasks() -> Vec<String> {
    SAMPLE_TASKS.iter().map(|t| t.to_string()).collect()
}
