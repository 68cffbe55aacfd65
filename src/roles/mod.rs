mod private
{
  use crate::config::{ Category, RoleConfig };

  /// Category-specific framing appended to every role's system prompt, the
  /// same table for every role (§4.7).
  #[ must_use ]
  pub fn category_context( category : Category ) -> &'static str
  {
    match category
    {
      Category::Creative => "Focus on open-ended creative expression, tone, and narrative voice.",
      Category::Technical => "Focus on precise terminology, correctness, and unambiguous technical detail.",
      Category::Analytical => "Focus on structured reasoning, evidence, and logical consistency.",
      Category::Marketing => "Focus on persuasive framing, audience, and a clear call to action.",
      Category::Educational => "Focus on pedagogical clarity, progressive difficulty, and comprehension checks.",
      Category::BuildAgent => "Focus on orchestration patterns, tool boundaries, and agent-to-agent handoffs.",
      Category::SystemPrompt => "Focus on clear instructions, constraints, and behavior guidelines for an AI system.",
      Category::CodeGeneration => "Focus on correctness, maintainability, and explicit error handling in generated code.",
      Category::Documentation => "Focus on comprehensiveness, accuracy, and readability for the intended audience.",
    }
  }

  /// The immutable, role-keyed configuration table the Orchestrator is
  /// constructed with (§4.7, §9). Frozen once at startup; no role mutates
  /// its own entry between calls.
  #[ derive( Debug, Clone ) ]
  pub struct RoleTable
  {
    /// Deconstructor: breaks the raw prompt into structured components.
    pub deconstructor : RoleConfig,
    /// Diagnoser: full diagnosis, run after Deconstruct.
    pub diagnoser : RoleConfig,
    /// Diagnoser (preliminary): quick pass run only alongside Deconstruct.
    pub diagnoser_preliminary : RoleConfig,
    /// Designer: produces the redesigned prompt.
    pub designer : RoleConfig,
    /// Evaluator: scores the redesigned prompt's sample output.
    pub evaluator : RoleConfig,
  }

  impl Default for RoleTable
  {
    fn default() -> Self
    {
      Self
      {
        deconstructor : RoleConfig::new(
          "You break down vague or unstructured prompts into clear, analyzable components: core intent, key entities, desired output format, missing context, and ambiguities.",
          0.5,
          1500,
        ),
        diagnoser : RoleConfig::new(
          "You identify weaknesses, ambiguities, and potential issues in a prompt given its deconstruction: unclear instructions, missing context, likely misinterpretations, lack of specificity, and structural problems.",
          0.4,
          1500,
        ),
        diagnoser_preliminary : RoleConfig::new(
          "You give a brief, preliminary diagnosis of a prompt: obvious missing information, unclear instructions, and lack of specificity. Keep it short and actionable.",
          0.4,
          800,
        ),
        designer : RoleConfig::new(
          "You create a refined, optimized prompt that eliminates ambiguities, adds necessary context, specifies the desired output format, and preserves the original intent. Provide the optimized prompt and a brief explanation of the improvements.",
          0.8,
          2000,
        ),
        evaluator : RoleConfig::new(
          "You evaluate prompt quality on clarity, completeness, actionability, and likely output quality, each worth up to 25 points, for a total score out of 100. Provide a per-dimension rubric and a clear overall score.",
          0.3,
          1000,
        ),
      }
    }
  }

  /// Neutral system prompt used for the Sample stage: running the
  /// redesigned prompt itself, not evaluating or redesigning it (§4.9).
  pub const SAMPLE_SYSTEM_PROMPT : &str = "Respond directly and helpfully to the user's prompt.";
}

crate::mod_interface!
{
  own use
  {
    category_context,
    RoleTable,
    SAMPLE_SYSTEM_PROMPT,
  };

  /// Deconstructor role adapter.
  layer deconstructor;

  /// Diagnoser role adapter (full and preliminary variants).
  layer diagnoser;

  /// Designer role adapter, with optional RAG context injection.
  layer designer;

  /// Evaluator role adapter.
  layer evaluator;
}
