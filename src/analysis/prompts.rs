//! Prompt templates for debate analysis.
//!
//! Four templates cover the (mode, perspective present) combinations.
//! Topic and perspective are substituted verbatim.

use super::types::{AnalysisMode, ValidatedRequest};

/// System instruction framing the model as a debate coach.
pub const DEBATE_COACH_SYSTEM_PROMPT: &str = "You are an expert debate coach and critical thinking specialist. \
Your job is to help prepare debaters by analyzing arguments, identifying weaknesses, \
and suggesting improvements. Your responses should be complete and well-structured.";

const COUNTERARGUMENTS_TO_POSITION: &str = "Generate strong, thoughtful counterarguments to the following position on this debate topic:

Topic: {topic}
Position: {perspective}

Provide 3-5 well-reasoned counterarguments that challenge this position effectively.";

const BALANCED_ARGUMENTS: &str = "Generate balanced arguments for both sides of this debate topic: {topic}. \
Provide 3-4 strong points for each perspective, organized clearly.";

const FALLACIES_IN_ARGUMENT: &str = "Analyze the following argument for logical fallacies and reasoning flaws:

Topic: {topic}
Argument: {perspective}

Identify any fallacies present, explain why they're fallacies, and suggest how to strengthen the argument.";

const FALLACIES_FOR_TOPIC: &str = "For the debate topic: '{topic}', identify common logical fallacies \
that might occur when arguing this topic. Explain each fallacy and provide an example of how it \
might appear in this specific debate.";

/// Select the template for a mode and perspective presence.
pub fn template_for(mode: AnalysisMode, has_perspective: bool) -> &'static str {
    match (mode, has_perspective) {
        (AnalysisMode::Counterarguments, true) => COUNTERARGUMENTS_TO_POSITION,
        (AnalysisMode::Counterarguments, false) => BALANCED_ARGUMENTS,
        (AnalysisMode::Fallacies, true) => FALLACIES_IN_ARGUMENT,
        (AnalysisMode::Fallacies, false) => FALLACIES_FOR_TOPIC,
    }
}

/// Build the user prompt for a validated request.
pub fn build_prompt(request: &ValidatedRequest) -> String {
    let template = template_for(request.mode, request.has_perspective());
    fill_template(
        template,
        &request.topic,
        request.perspective.as_deref().unwrap_or_default(),
    )
}

/// Substitute `{topic}` and `{perspective}` in one left-to-right pass.
///
/// Inserted values are never scanned again, so placeholders typed by the
/// caller come through untouched.
fn fill_template(template: &str, topic: &str, perspective: &str) -> String {
    let mut out = String::with_capacity(template.len() + topic.len() + perspective.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix("{topic}") {
            out.push_str(topic);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{perspective}") {
            out.push_str(perspective);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}
