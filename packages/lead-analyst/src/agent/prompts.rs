//! Fixed prompt text for the lead-ranking agent.

use crate::traits::reasoner::ReasoningRequest;

/// Question asked when the caller does not supply one.
pub const DEFAULT_QUESTION: &str =
    "Which leads are most likely to buy in the next month? Rank them with scores and explain why.";

/// Returned when the loop produced nothing usable.
pub const NO_ANALYSIS: &str = "No analysis could be generated.";

/// Prefix of the partial answer returned when the loop stops early.
pub const INCOMPLETE_PREFIX: &str =
    "Analysis incomplete: the agent stopped before producing a final ranking.";

/// Scoring rubric and mandatory output shape.
pub const SYSTEM_PROMPT: &str = r#"You are an expert sales analyst. Your job is to analyze sales call transcripts and rank leads by their likelihood of purchasing within the next month.

You have access to these tools:
- VectorSearchTool: Search actual sales transcript data
- LinkedInSearchTool: Get professional background on any lead

Your analysis process:
1. Use VectorSearchTool to retrieve all relevant transcript data about leads and buying intent
2. Identify all lead names from the transcripts
3. For each lead, use LinkedInSearchTool to enrich their profile
4. Score and rank each lead from 0-100 based on:
   - Buying intent phrases ("we need this by", "ready to move forward", "when can we start")
   - Budget mentions (explicit amounts, "budget approved", "we have funds")
   - Timeline urgency ("next quarter", "by end of month", "ASAP")
   - Objections vs positive signals (ratio matters)
   - Decision-maker authority (C-suite > Director > Manager > IC)
   - Company size (larger = bigger deal but longer cycle)

Output format: you MUST use exactly this structure:
1. [Lead Name] - Score: [0-100]
- [Key signal 1 from transcript]
- [Key signal 2 from transcript]
- [LinkedIn insight]
- [Summary of why they will/won't buy soon]

2. [Lead Name] - Score: [0-100]
...

Be specific. Quote actual phrases from transcripts when possible."#;

/// Text-protocol template for reasoners without native tool calling.
const REACT_TEMPLATE: &str = r#"Answer the following questions as best you can. You have access to the following tools:

{tools}

Use the following format:

Question: the input question you must answer
Thought: you should always think about what to do
Action: the action to take, should be one of [{tool_names}]
Action Input: the input to the action
Observation: the result of the action
... (this Thought/Action/Action Input/Observation can repeat N times)
Thought: I now know the final answer
Final Answer: the final answer to the original input question

Begin!

Question: {input}
Thought: {agent_scratchpad}"#;

/// Instructions and question combined into the agent's single input.
pub fn agent_input(instructions: &str, question: &str) -> String {
    format!("{}\n\nManager's question: {}", instructions, question)
}

/// Render a request with the text protocol.
pub fn render_react_prompt(request: &ReasoningRequest<'_>) -> String {
    let tools = request
        .tools
        .iter()
        .map(|t| format!("{}: {}", t.name(), t.description()))
        .collect::<Vec<_>>()
        .join("\n");
    let tool_names = request
        .tools
        .iter()
        .map(|t| t.name())
        .collect::<Vec<_>>()
        .join(", ");

    REACT_TEMPLATE
        .replace("{tools}", &tools)
        .replace("{tool_names}", &tool_names)
        .replace("{input}", &agent_input(request.instructions, request.question))
        .replace("{agent_scratchpad}", &request.scratchpad.render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::scratchpad::Scratchpad;
    use crate::agent::tools::ToolKind;

    #[test]
    fn test_react_prompt_lists_tools_and_question() {
        let mut scratchpad = Scratchpad::new();
        scratchpad.record(
            Some("I should search first".into()),
            "VectorSearchTool",
            "budget approved",
            "=== Lead: Sarah Johnson ===",
        );

        let request = ReasoningRequest {
            instructions: SYSTEM_PROMPT,
            question: DEFAULT_QUESTION,
            tools: ToolKind::ALL,
            scratchpad: &scratchpad,
        };
        let prompt = render_react_prompt(&request);

        assert!(prompt.contains("should be one of [VectorSearchTool, LinkedInSearchTool]"));
        assert!(prompt.contains("LinkedInSearchTool: Look up a lead's LinkedIn profile"));
        assert!(prompt.contains(&format!("Manager's question: {}", DEFAULT_QUESTION)));
        assert!(prompt.ends_with("Observation: === Lead: Sarah Johnson ===\nThought: "));
    }
}
