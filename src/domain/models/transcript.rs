#[cfg(test)]
#[path = "transcript_test.rs"]
mod tests;

use super::Turn;

pub const INSTRUCTION_PROMPT: &str = r#"You are an expert study planner assistant. Your tasks:
1. Engage in a structured conversation to fully understand the student's needs. Ask only one question at a time, never several questions together, and collect:
   - Subject of study
   - Learning goals (e.g., exam preparation, skill development)
   - Daily study time available
   - Current skill level (Beginner/Intermediate/Advanced)
   - Preferred learning style (Visual, Auditory, Reading/Writing, Kinesthetic)
2. After gathering all details, generate a personalized study plan that includes:
   - A topic-wise breakdown with clear subtopics
   - A detailed daily/weekly schedule with time allocations
   - Practical study techniques and revision strategies
   Don't hallucinate.
3. Use the ResourceSearch tool to find books, videos, and online materials. Don't hallucinate."#;

pub const GREETING: &str = "Welcome! I'm your AI Study Assistant. Let's create your perfect learning plan! Could you first tell me what subject you want to focus on?";

/// Conversational memory for a single chat session. The first turn is always
/// the instruction turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Default for Transcript {
    fn default() -> Transcript {
        return Transcript {
            turns: Transcript::initial_turns(),
        };
    }
}

impl Transcript {
    fn initial_turns() -> Vec<Turn> {
        return vec![
            Turn::instruction(INSTRUCTION_PROMPT),
            Turn::assistant(GREETING),
        ];
    }

    pub fn reset(&mut self) {
        self.turns = Transcript::initial_turns();
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        return &self.turns;
    }

    /// Every turn the student gets to see, which excludes the leading
    /// instruction turn.
    pub fn visible_turns(&self) -> &[Turn] {
        return &self.turns[1..];
    }
}
