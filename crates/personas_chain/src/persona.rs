//! The built-in chain that turns a video transcript into a persona
//! character sheet.

use crate::ChainDefinition;
use personas_core::ChainStep;

const ANALYSIS_PROMPT: &str = "Conduct comprehensive research on the provided transcript. Identify key characteristics of the speaker, including age, professional field, distinct personality traits, style of communication, narrative context, and self-awareness. Additionally, consider any unique aspects such as their use of humor, their cultural background, core values, passions, fears, personal history, and social interactions. Your output for this stage is an in-depth written analysis that exhibits an understanding of both the superficial and more profound aspects of the speaker's persona.";

const DRAFTING_PROMPT: &str = "Craft your documented analysis into a draft of the 'You are a...' character sheet. It should encapsulate all crucial personality dimensions, along with the motivations and aspirations of the persona. Keep in mind to balance succinctness and depth of detail for each dimension. The deliverable here is a comprehensive draft of the character sheet that captures the speaker's unique essence.";

const REFINEMENT_PROMPT: &str = "Compare the draft character sheet with the original transcript, validating its content and ensuring it captures both the speaker’s overt characteristics and the subtler undertones. Fine-tune any areas that require clarity, have been overlooked, or require more authenticity. Use clear and illustrative examples from the transcript to refine your sheet and offer meaningful, tangible reference points. Your finalized deliverable is a coherent, comprehensive, and nuanced 'You are a...' character sheet that serves as a go-to guide for an actor recreating the persona.";

/// Analysis → character sheet draft → validation and refinement.
pub fn youtube_persona_steps() -> Vec<ChainStep> {
    vec![
        ChainStep::new("Analysis", ANALYSIS_PROMPT),
        ChainStep::new("Character Sheet Drafting", DRAFTING_PROMPT),
        ChainStep::new("Validation and Refinement", REFINEMENT_PROMPT),
    ]
}

/// [`youtube_persona_steps`] as a named definition.
pub fn youtube_persona_definition() -> ChainDefinition {
    ChainDefinition::from_valid_steps(Some("youtube-persona".to_string()), youtube_persona_steps())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persona_chain_has_three_ordered_steps() {
        let steps = youtube_persona_steps();
        let names: Vec<_> = steps.iter().map(|s| s.name().as_str()).collect();
        assert_eq!(
            names,
            ["Analysis", "Character Sheet Drafting", "Validation and Refinement"]
        );
        assert!(steps.iter().all(|s| s.system_prompt().contains("character sheet")
            || s.system_prompt().contains("persona")));
    }

    #[test]
    fn persona_definition_is_named_and_valid() {
        let definition = youtube_persona_definition();
        assert_eq!(definition.name(), Some("youtube-persona"));
        assert!(ChainDefinition::new(None, definition.into_steps()).is_ok());
    }
}
