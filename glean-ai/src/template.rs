//! Prompt templates.
//!
//! A template turns the caller's typed arguments into the user prompt for
//! one request. It is rendered exactly once per run or stream, so templates
//! with side effects (counters, clocks) observe one invocation per call.

/// Renders typed arguments into a prompt string.
///
/// Any `Fn(&A) -> String` closure is a template:
///
/// ```
/// use glean_ai::PromptTemplate;
///
/// let template = |city: &String| format!("List three facts about {city}.");
/// assert!(template.render(&"Osaka".to_string()).contains("Osaka"));
/// ```
pub trait PromptTemplate<A>: Send + Sync {
    /// Produce the user prompt for the given arguments.
    fn render(&self, args: &A) -> String;
}

impl<A, F> PromptTemplate<A> for F
where
    F: Fn(&A) -> String + Send + Sync,
{
    fn render(&self, args: &A) -> String {
        self(args)
    }
}
